// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::flush_notice;
use crate::dashboard::DashboardStats;
use crate::models::CategoryAggregate;
use crate::transport::Transport;
use crate::utils::maybe_print_json;
use anyhow::Result;
use serde::Serialize;

#[derive(Serialize)]
struct DashboardJson<'a> {
    stats: DashboardStats,
    categories: &'a CategoryAggregate,
}

pub fn handle<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    app.initialize();
    let out = DashboardJson {
        stats: app.dashboard_stats(),
        categories: app.store().categories(),
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &out)? {
        print_dashboard(app);
    }
    flush_notice(app);
    Ok(())
}

pub fn print_dashboard<T: Transport>(app: &App<T>) {
    println!("{}", app.panel().to_table());
    match app.chart().backend().frame() {
        Some(frame) => println!("{}", frame),
        None => println!("No spending recorded yet."),
    }
}
