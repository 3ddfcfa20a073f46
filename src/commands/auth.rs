// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::transport::Transport;
use crate::utils::req_arg;
use anyhow::Result;

pub fn login<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    let username = req_arg(sub, "username")?;
    let password = req_arg(sub, "password")?;
    match app.login(&username, &password) {
        Ok(()) => println!("Logged in as {}", username),
        // shown inline, the way the login form shows it
        Err(e) => eprintln!("{}", e),
    }
    Ok(())
}

pub fn register<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    let username = req_arg(sub, "username")?;
    let email = req_arg(sub, "email")?;
    let password = req_arg(sub, "password")?;
    match app.register(&username, &email, &password) {
        Ok(()) => println!("Registered and logged in as {}", username),
        Err(e) => eprintln!("{}", e),
    }
    Ok(())
}

pub fn logout<T: Transport>(app: &mut App<T>) -> Result<()> {
    app.logout()?;
    println!("Logged out");
    Ok(())
}
