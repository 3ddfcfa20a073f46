// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use crate::app::App;
use crate::commands::flush_notice;
use crate::editor::TransactionFields;
use crate::render::{ActionKind, RowAction};
use crate::transport::Transport;
use crate::utils::{maybe_print_json, opt_arg};
use anyhow::{Context, Result};

pub fn handle<T: Transport>(app: &mut App<T>, m: &clap::ArgMatches) -> Result<()> {
    match m.subcommand() {
        Some(("list", sub)) => list(app, sub)?,
        Some(("add", sub)) => add(app, sub),
        Some(("edit", sub)) => edit(app, sub)?,
        Some(("rm", sub)) => rm(app, sub)?,
        _ => {}
    }
    flush_notice(app);
    Ok(())
}

fn list<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    if let Err(e) = app.refresh_transactions() {
        app.notices().error(e.notice_text("Failed to load transactions"));
        return Ok(());
    }
    app.render();
    let view = app.list_view();
    if !maybe_print_json(sub.get_flag("json"), sub.get_flag("jsonl"), &view.rows())? {
        println!("{}", view);
    }
    Ok(())
}

/// Fill the form from the command line. Flags left out keep `base`.
pub fn fields_from_args(sub: &clap::ArgMatches, base: TransactionFields) -> TransactionFields {
    TransactionFields {
        category: opt_arg(sub, "category").unwrap_or(base.category),
        amount: opt_arg(sub, "amount").unwrap_or(base.amount),
        date: opt_arg(sub, "date").unwrap_or(base.date),
        description: opt_arg(sub, "desc").unwrap_or(base.description),
    }
}

fn add<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) {
    let fields = fields_from_args(sub, TransactionFields::default());
    app.open_create(fields.clone());
    // failures are already on the notice board
    let _ = app.submit_create(fields);
}

fn edit<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing transaction id")?;
    if let Err(e) = app.refresh_transactions() {
        app.notices().error(e.notice_text("Failed to load transactions"));
        return Ok(());
    }
    app.render();
    let _ = app.dispatch(RowAction {
        kind: ActionKind::Edit,
        id,
    });
    let Some(current) = app.edit_fields_mut() else {
        eprintln!("No transaction #{} in the current list", id);
        return Ok(());
    };
    *current = fields_from_args(sub, std::mem::take(current));
    let _ = app.submit_open_edit();
    Ok(())
}

fn rm<T: Transport>(app: &mut App<T>, sub: &clap::ArgMatches) -> Result<()> {
    let id = *sub.get_one::<i64>("id").context("Missing transaction id")?;
    let _ = app.submit_delete(id);
    Ok(())
}
