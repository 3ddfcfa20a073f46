// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::models::{Settings, Transaction};
use crate::utils::{saturating_sub, saturating_sum};

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DashboardStats {
    pub balance: Decimal,
    pub monthly_limit: Decimal,
    pub total_spent: Decimal,
    pub remaining: Decimal,
    pub days_left: i64,
    pub daily_budget: Decimal,
}

/// Summary figures for the dashboard.
///
/// `total_spent` sums every transaction held, not only those inside the
/// settings' start/end window; `days_left` and `daily_budget` do look at
/// the end date.
pub fn compute(transactions: &[Transaction], settings: &Settings, today: NaiveDate) -> DashboardStats {
    let total_spent = saturating_sum(transactions.iter().map(|t| t.amount));
    let remaining = saturating_sub(settings.monthly_limit, total_spent);
    let days_left = days_left(settings.end_date, today);
    let daily_budget = if days_left > 0 {
        remaining
            .checked_div(Decimal::from(days_left))
            .unwrap_or(Decimal::ZERO)
    } else {
        Decimal::ZERO
    };
    DashboardStats {
        balance: settings.balance,
        monthly_limit: settings.monthly_limit,
        total_spent,
        remaining,
        days_left,
        daily_budget,
    }
}

pub fn days_left(end_date: Option<NaiveDate>, today: NaiveDate) -> i64 {
    end_date
        .map(|end| (end - today).num_days().max(0))
        .unwrap_or(0)
}
