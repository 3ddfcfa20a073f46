// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use anyhow::Result;

use fintrack::{cli, commands, config::Config};

fn main() -> Result<()> {
    let cli = cli::build_cli();
    let matches = cli.get_matches();

    let config = Config::from_matches(&matches)?;
    config.init_logging();
    tracing::debug!(api = %config.api_base, data_dir = %config.data_dir.display(), "starting");

    let mut app = config.build_app()?;

    match matches.subcommand() {
        Some(("login", sub)) => commands::auth::login(&mut app, sub)?,
        Some(("register", sub)) => commands::auth::register(&mut app, sub)?,
        Some(("logout", _)) => commands::auth::logout(&mut app)?,
        Some(_) if !app.is_authenticated() => eprintln!("{}", commands::LOGIN_HINT),
        Some(("tx", sub)) => commands::transactions::handle(&mut app, sub)?,
        Some(("settings", sub)) => commands::settings::handle(&mut app, sub)?,
        Some(("dashboard", sub)) => commands::dashboard::handle(&mut app, sub)?,
        Some(("categories", sub)) => commands::categories::handle(&mut app, sub)?,
        Some(("shell", _)) => {
            let stdin = std::io::stdin();
            let mut stdout = std::io::stdout();
            commands::shell::run(&mut app, stdin.lock(), &mut stdout)?;
        }
        _ => {
            cli::build_cli().print_help()?;
            println!();
        }
    }
    Ok(())
}
