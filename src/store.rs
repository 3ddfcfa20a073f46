// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use rust_decimal::Decimal;

use crate::models::{CategoryAggregate, Settings, Transaction};
use crate::utils::saturating_sum;

/// Where the current category aggregate came from.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CategorySource {
    #[default]
    Local,
    Server,
}

/// Last successfully fetched server snapshot. Every write is a full
/// overwrite; nothing is merged.
#[derive(Debug, Clone, Default)]
pub struct StateStore {
    transactions: Vec<Transaction>,
    categories: CategoryAggregate,
    category_source: CategorySource,
    settings: Settings,
}

impl StateStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    pub fn categories(&self) -> &CategoryAggregate {
        &self.categories
    }

    pub fn category_source(&self) -> CategorySource {
        self.category_source
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn find(&self, id: i64) -> Option<&Transaction> {
        self.transactions.iter().find(|t| t.id == id)
    }

    pub fn replace_transactions(&mut self, list: Vec<Transaction>) {
        self.transactions = list;
    }

    pub fn replace_settings(&mut self, settings: Settings) {
        self.settings = settings;
    }

    /// Install a server-computed aggregate.
    pub fn replace_categories(&mut self, categories: CategoryAggregate) {
        self.categories = categories;
        self.category_source = CategorySource::Server;
    }

    /// Rebuild the aggregate from the transactions held locally.
    pub fn derive_categories_from_transactions(&mut self) {
        self.categories = local_categories(&self.transactions);
        self.category_source = CategorySource::Local;
    }
}

pub fn local_categories(transactions: &[Transaction]) -> CategoryAggregate {
    let mut out = CategoryAggregate::new();
    for t in transactions {
        let slot = out.entry(t.category.clone()).or_insert(Decimal::ZERO);
        *slot = saturating_sum([*slot, t.amount]);
    }
    out
}
