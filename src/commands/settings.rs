// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::{App, SettingsForm};
use crate::commands::flush_notice;
use crate::transport::Transport;
use crate::utils::{maybe_print_json, opt_arg, pretty_table};
use anyhow::Result;

pub fn handle<T: Transport>(app: &mut App<T>, m: &clap::ArgMatches) -> Result<()> {
    if let Err(e) = app.refresh_settings() {
        app.notices().error(e.notice_text("Failed to load settings"));
        flush_notice(app);
        return Ok(());
    }
    match m.subcommand() {
        Some(("show", sub)) => show(app, sub)?,
        Some(("set", sub)) => set(app, sub),
        _ => {}
    }
    flush_notice(app);
    Ok(())
}

fn show<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    let settings = app.store().settings();
    if maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), settings)? {
        return Ok(());
    }
    let form = SettingsForm::from_settings(settings);
    let or_dash = |s: String| if s.is_empty() { "-".to_string() } else { s };
    let rows = vec![
        vec!["Balance".to_string(), form.balance],
        vec!["Monthly limit".to_string(), form.monthly_limit],
        vec!["Start date".to_string(), or_dash(form.start_date)],
        vec!["End date".to_string(), or_dash(form.end_date)],
    ];
    println!("{}", pretty_table(&["Setting", "Value"], rows));
    Ok(())
}

fn set<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) {
    let mut form = SettingsForm::from_settings(app.store().settings());
    if let Some(v) = opt_arg(sub, "balance") {
        form.balance = v;
    }
    if let Some(v) = opt_arg(sub, "limit") {
        form.monthly_limit = v;
    }
    if let Some(v) = opt_arg(sub, "start") {
        form.start_date = v;
    }
    if let Some(v) = opt_arg(sub, "end") {
        form.end_date = v;
    }
    let _ = app.save_settings(&form);
}
