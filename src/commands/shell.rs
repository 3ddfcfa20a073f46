// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Line-oriented interactive session. Row actions typed here go through the
//! controller's dispatch table, so ids that are not on the current list are
//! ignored.

use std::io::{BufRead, Write};
use std::time::Instant;

use anyhow::Result;

use crate::app::{App, SettingsForm};
use crate::commands::LOGIN_HINT;
use crate::editor::TransactionFields;
use crate::notice::NoticeKind;
use crate::render::{ActionKind, RowAction};
use crate::transport::Transport;

const HELP: &str = "\
commands:
  list                              show transactions
  dash                              dashboard and category chart
  add <category> <amount> [date] [description...]
  edit <id>                         open the edit form
    set <category|amount|date|desc> <value...>
    save | cancel
  rm <id>                           delete a transaction
  settings [balance=..] [limit=..] [start=..] [end=..]
  refresh | logout | help | quit";

enum Flow {
    Continue,
    Quit,
}

pub fn run<T, R, W>(app: &mut App<T>, input: R, out: &mut W) -> Result<()>
where
    T: Transport,
    R: BufRead,
    W: Write,
{
    app.initialize();
    writeln!(out, "{}", HELP)?;
    let mut lines = input.lines();
    loop {
        if let Some(n) = app.notices().visible(Instant::now()) {
            let tag = match n.kind {
                NoticeKind::Success => "ok",
                NoticeKind::Error => "error",
            };
            writeln!(out, "[{}] {}", tag, n.text)?;
        }
        if app.needs_login() {
            writeln!(out, "{}", LOGIN_HINT)?;
        }
        match app.edit_form().target() {
            Some(id) => write!(out, "edit #{}> ", id)?,
            None => write!(out, "> ")?,
        }
        out.flush()?;
        let Some(line) = lines.next() else {
            break;
        };
        let line = line?;
        if let Flow::Quit = step(app, line.trim(), out)? {
            break;
        }
    }
    writeln!(out)?;
    Ok(())
}

fn step<T: Transport, W: Write>(app: &mut App<T>, line: &str, out: &mut W) -> Result<Flow> {
    let mut words = line.split_whitespace();
    let Some(cmd) = words.next() else {
        return Ok(Flow::Continue);
    };
    let rest: Vec<&str> = words.collect();
    match cmd {
        "help" => writeln!(out, "{}", HELP)?,
        "quit" | "exit" => return Ok(Flow::Quit),
        "list" => writeln!(out, "{}", app.list_view())?,
        "dash" => {
            writeln!(out, "{}", app.panel().to_table())?;
            if let Some(frame) = app.chart().backend().frame() {
                writeln!(out, "{}", frame)?;
            }
        }
        "refresh" => app.initialize(),
        "add" => {
            let fields = parse_add(&rest);
            app.open_create(fields.clone());
            let _ = app.submit_create(fields);
        }
        "edit" => {
            if let Some(id) = parse_id(&rest) {
                let _ = app.dispatch(RowAction {
                    kind: ActionKind::Edit,
                    id,
                });
                if let Some(fields) = app.edit_form().fields() {
                    writeln!(
                        out,
                        "category={} amount={} date={} desc={}",
                        fields.category, fields.amount, fields.date, fields.description
                    )?;
                }
            }
        }
        "set" => {
            let Some((field, value)) = rest.split_first() else {
                writeln!(out, "usage: set <category|amount|date|desc> <value...>")?;
                return Ok(Flow::Continue);
            };
            let value = value.join(" ");
            match app.edit_fields_mut() {
                Some(fields) => match *field {
                    "category" => fields.category = value,
                    "amount" => fields.amount = value,
                    "date" => fields.date = value,
                    "desc" | "description" => fields.description = value,
                    other => writeln!(out, "Unknown field '{}'", other)?,
                },
                None => writeln!(out, "No edit form open")?,
            }
        }
        "save" => {
            let _ = app.submit_open_edit();
        }
        "cancel" => app.close_edit(),
        "rm" => {
            if let Some(id) = parse_id(&rest) {
                let _ = app.dispatch(RowAction {
                    kind: ActionKind::Delete,
                    id,
                });
            }
        }
        "settings" if rest.is_empty() => {
            let form = SettingsForm::from_settings(app.store().settings());
            writeln!(
                out,
                "balance={} limit={} start={} end={}",
                form.balance, form.monthly_limit, form.start_date, form.end_date
            )?;
        }
        "settings" => {
            let mut form = SettingsForm::from_settings(app.store().settings());
            for kv in &rest {
                let (k, v) = kv.split_once('=').unwrap_or((*kv, ""));
                match k {
                    "balance" => form.balance = v.to_string(),
                    "limit" => form.monthly_limit = v.to_string(),
                    "start" => form.start_date = v.to_string(),
                    "end" => form.end_date = v.to_string(),
                    other => {
                        writeln!(out, "Unknown setting '{}'", other)?;
                        return Ok(Flow::Continue);
                    }
                }
            }
            let _ = app.save_settings(&form);
        }
        "logout" => {
            app.logout()?;
            writeln!(out, "Logged out")?;
            return Ok(Flow::Quit);
        }
        other => writeln!(out, "Unknown command '{}'. Type `help`.", other)?,
    }
    Ok(Flow::Continue)
}

fn parse_id(rest: &[&str]) -> Option<i64> {
    rest.first().and_then(|s| s.trim_start_matches('#').parse().ok())
}

/// `<category> <amount> [YYYY-MM-DD] [description...]`
fn parse_add(rest: &[&str]) -> TransactionFields {
    let mut fields = TransactionFields::new(
        rest.first().copied().unwrap_or_default(),
        rest.get(1).copied().unwrap_or_default(),
    );
    let mut tail = rest.iter().skip(2).copied().peekable();
    if tail
        .peek()
        .is_some_and(|first| chrono::NaiveDate::parse_from_str(first, "%Y-%m-%d").is_ok())
    {
        fields.date = tail.next().unwrap_or_default().to_string();
    }
    fields.description = tail.collect::<Vec<_>>().join(" ");
    fields
}
