// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

//! Projection of the state store onto the terminal: the transaction list,
//! the dashboard panel and the category chart. Every function here is a
//! pure re-render of whatever it is handed.

use std::collections::BTreeMap;
use std::fmt;

use comfy_table::Table;
use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::Serialize;

use crate::dashboard::DashboardStats;
use crate::models::{CategoryAggregate, Transaction};
use crate::utils::{fmt_display_date, fmt_money, pretty_table, saturating_sum};

pub const EMPTY_PLACEHOLDER: &str = "No transactions yet.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum ActionKind {
    Edit,
    Delete,
}

/// An action a rendered row offers, keyed by the transaction it targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct RowAction {
    pub kind: ActionKind,
    pub id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionRowView {
    pub id: i64,
    pub category: String,
    pub amount: String,
    pub description: Option<String>,
    pub date: String,
    pub actions: [RowAction; 2],
}

#[derive(Debug, Clone, PartialEq)]
pub enum TransactionListView {
    Empty,
    Rows(Vec<TransactionRowView>),
}

impl TransactionListView {
    pub fn rows(&self) -> &[TransactionRowView] {
        match self {
            TransactionListView::Empty => &[],
            TransactionListView::Rows(rows) => rows,
        }
    }

    pub fn actions(&self) -> impl Iterator<Item = RowAction> + '_ {
        self.rows().iter().flat_map(|r| r.actions)
    }

    pub fn to_table(&self) -> Table {
        let rows = self
            .rows()
            .iter()
            .map(|r| {
                vec![
                    r.id.to_string(),
                    r.date.clone(),
                    r.category.clone(),
                    r.amount.clone(),
                    r.description.clone().unwrap_or_default(),
                ]
            })
            .collect();
        pretty_table(&["ID", "Date", "Category", "Amount", "Description"], rows)
    }
}

impl fmt::Display for TransactionListView {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TransactionListView::Empty => write!(f, "{}", EMPTY_PLACEHOLDER),
            TransactionListView::Rows(_) => write!(f, "{}", self.to_table()),
        }
    }
}

/// Most recent first; transactions sharing a date keep their input order and
/// undated ones go last.
pub fn sort_by_date_desc(transactions: &[Transaction]) -> Vec<&Transaction> {
    let mut sorted: Vec<&Transaction> = transactions.iter().collect();
    sorted.sort_by(|a, b| b.date.cmp(&a.date));
    sorted
}

pub fn render_transaction_list(transactions: &[Transaction], currency: &str) -> TransactionListView {
    if transactions.is_empty() {
        return TransactionListView::Empty;
    }
    let rows = sort_by_date_desc(transactions)
        .into_iter()
        .map(|t| TransactionRowView {
            id: t.id,
            category: t.category.clone(),
            amount: fmt_money(&t.amount, currency),
            description: t.note().map(str::to_string),
            date: t.date.as_ref().map(fmt_display_date).unwrap_or_default(),
            actions: [
                RowAction {
                    kind: ActionKind::Edit,
                    id: t.id,
                },
                RowAction {
                    kind: ActionKind::Delete,
                    id: t.id,
                },
            ],
        })
        .collect();
    TransactionListView::Rows(rows)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum StatSlot {
    Balance,
    Limit,
    Spent,
    Remaining,
    Days,
    Daily,
}

impl StatSlot {
    pub const ALL: [StatSlot; 6] = [
        StatSlot::Balance,
        StatSlot::Limit,
        StatSlot::Spent,
        StatSlot::Remaining,
        StatSlot::Days,
        StatSlot::Daily,
    ];

    pub fn label(self) -> &'static str {
        match self {
            StatSlot::Balance => "Balance",
            StatSlot::Limit => "Monthly limit",
            StatSlot::Spent => "Spent",
            StatSlot::Remaining => "Remaining",
            StatSlot::Days => "Days left",
            StatSlot::Daily => "Daily budget",
        }
    }
}

/// A display target with a text slot per statistic it shows.
pub trait StatSurface {
    fn slot_mut(&mut self, slot: StatSlot) -> Option<&mut String>;
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct DashboardPanel {
    slots: BTreeMap<StatSlot, String>,
}

impl DashboardPanel {
    pub fn full() -> Self {
        Self::with_slots(&StatSlot::ALL)
    }

    pub fn with_slots(slots: &[StatSlot]) -> Self {
        Self {
            slots: slots.iter().map(|s| (*s, String::new())).collect(),
        }
    }

    pub fn get(&self, slot: StatSlot) -> Option<&str> {
        self.slots.get(&slot).map(String::as_str)
    }

    pub fn to_table(&self) -> Table {
        let rows = self
            .slots
            .iter()
            .map(|(slot, v)| vec![slot.label().to_string(), v.clone()])
            .collect();
        pretty_table(&["Stat", "Value"], rows)
    }
}

impl StatSurface for DashboardPanel {
    fn slot_mut(&mut self, slot: StatSlot) -> Option<&mut String> {
        self.slots.get_mut(&slot)
    }
}

pub fn stat_text(stats: &DashboardStats, slot: StatSlot) -> String {
    match slot {
        StatSlot::Balance => stats.balance.normalize().to_string(),
        StatSlot::Limit => stats.monthly_limit.normalize().to_string(),
        StatSlot::Spent => format!("{:.2}", stats.total_spent),
        StatSlot::Remaining => format!("{:.2}", stats.remaining),
        StatSlot::Days => stats.days_left.to_string(),
        StatSlot::Daily => format!("{:.2}", stats.daily_budget),
    }
}

/// Write every statistic the surface has room for; the rest are skipped.
pub fn render_dashboard(stats: &DashboardStats, surface: &mut dyn StatSurface) {
    for slot in StatSlot::ALL {
        if let Some(target) = surface.slot_mut(slot) {
            *target = stat_text(stats, slot);
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ChartSeries {
    pub labels: Vec<String>,
    pub values: Vec<Decimal>,
}

impl ChartSeries {
    pub fn from_aggregate(aggregate: &CategoryAggregate) -> Self {
        let (labels, values): (Vec<String>, Vec<Decimal>) = aggregate.iter().map(|(k, v)| (k.clone(), *v)).unzip();
        Self { labels, values }
    }

    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

/// A pie-chart implementation the spending chart draws through.
pub trait ChartBackend {
    type Handle;

    fn draw(&mut self, series: &ChartSeries) -> Self::Handle;
    fn dispose(&mut self, handle: Self::Handle);
    fn clear(&mut self);
}

pub struct SpendingChart<B: ChartBackend> {
    backend: B,
    current: Option<B::Handle>,
}

impl<B: ChartBackend> SpendingChart<B> {
    pub fn new(backend: B) -> Self {
        Self {
            backend,
            current: None,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn has_chart(&self) -> bool {
        self.current.is_some()
    }

    pub fn render_chart(&mut self, aggregate: &CategoryAggregate) {
        if let Some(prev) = self.current.take() {
            self.backend.dispose(prev);
        }
        let series = ChartSeries::from_aggregate(aggregate);
        if series.is_empty() {
            self.backend.clear();
            return;
        }
        self.current = Some(self.backend.draw(&series));
    }
}

const BAR_WIDTH: u32 = 20;

/// Renders the pie as a share table with proportional bars.
#[derive(Debug, Default)]
pub struct TerminalPie {
    currency: String,
    frame: Option<(u64, String)>,
    next_id: u64,
}

impl TerminalPie {
    pub fn new(currency: &str) -> Self {
        Self {
            currency: currency.to_string(),
            ..Self::default()
        }
    }

    pub fn frame(&self) -> Option<&str> {
        self.frame.as_ref().map(|(_, s)| s.as_str())
    }
}

impl ChartBackend for TerminalPie {
    type Handle = u64;

    fn draw(&mut self, series: &ChartSeries) -> u64 {
        let total = saturating_sum(series.values.iter().map(|v| v.abs()));
        let rows = series
            .labels
            .iter()
            .zip(&series.values)
            .map(|(label, value)| {
                let share = if total.is_zero() {
                    Decimal::ZERO
                } else {
                    value.abs() / total * Decimal::ONE_HUNDRED
                };
                let cells = (share * Decimal::from(BAR_WIDTH) / Decimal::ONE_HUNDRED)
                    .round()
                    .to_usize()
                    .unwrap_or(0);
                vec![
                    label.clone(),
                    fmt_money(value, &self.currency),
                    format!("{:.1}%", share),
                    "█".repeat(cells),
                ]
            })
            .collect();
        let table = pretty_table(&["Category", "Amount", "Share", ""], rows);
        self.next_id += 1;
        self.frame = Some((self.next_id, table.to_string()));
        self.next_id
    }

    fn dispose(&mut self, handle: u64) {
        if self.frame.as_ref().is_some_and(|(id, _)| *id == handle) {
            self.frame = None;
        }
    }

    fn clear(&mut self) {
        self.frame = None;
    }
}
