// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::flush_notice;
use crate::store::{CategorySource, local_categories};
use crate::transport::Transport;
use crate::utils::{fmt_money, maybe_print_json, pretty_table};
use anyhow::Result;

pub fn handle<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    app.initialize();
    let (aggregate, source) = if sub.get_flag("local") {
        (local_categories(app.store().transactions()), CategorySource::Local)
    } else {
        (app.store().categories().clone(), app.store().category_source())
    };
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &aggregate)? {
        let rows = aggregate
            .iter()
            .map(|(name, total)| vec![name.clone(), fmt_money(total, app.currency())])
            .collect();
        println!("{}", pretty_table(&["Category", "Total"], rows));
        let label = match source {
            CategorySource::Server => "server analytics",
            CategorySource::Local => "local transactions",
        };
        println!("Source: {}", label);
    }
    flush_notice(app);
    Ok(())
}
