// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};

/// Category name -> summed amount.
pub type CategoryAggregate = BTreeMap<String, Decimal>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Transaction {
    pub id: i64,
    pub category: String,
    #[serde(
        deserialize_with = "de_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub amount: Decimal,
    #[serde(default)]
    pub description: Option<String>,
    /// `None` when the server holds an empty or malformed date.
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub date: Option<NaiveDate>,
}

impl Transaction {
    /// Description, if the server stored a non-empty one.
    pub fn note(&self) -> Option<&str> {
        self.description.as_deref().filter(|d| !d.is_empty())
    }
}

/// Body of `POST /transactions` and `PUT /transactions/{id}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransactionInput {
    pub category: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub amount: Decimal,
    pub description: String,
    pub date: NaiveDate,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    #[serde(
        default,
        deserialize_with = "de_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub balance: Decimal,
    #[serde(
        default,
        deserialize_with = "de_amount",
        serialize_with = "rust_decimal::serde::float::serialize"
    )]
    pub monthly_limit: Decimal,
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub end_date: Option<NaiveDate>,
}

/// `PUT /settings` answer. Every field is optional so that gaps can be
/// back-filled from what was sent.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SettingsReply {
    #[serde(default, deserialize_with = "de_amount_opt")]
    pub balance: Option<Decimal>,
    #[serde(default, deserialize_with = "de_amount_opt")]
    pub monthly_limit: Option<Decimal>,
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub start_date: Option<NaiveDate>,
    #[serde(default, deserialize_with = "de_lenient_date")]
    pub end_date: Option<NaiveDate>,
}

impl SettingsReply {
    pub fn or_sent(self, sent: &Settings) -> Settings {
        Settings {
            balance: self.balance.unwrap_or(sent.balance),
            monthly_limit: self.monthly_limit.unwrap_or(sent.monthly_limit),
            start_date: self.start_date.or(sent.start_date),
            end_date: self.end_date.or(sent.end_date),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Analytics {
    #[serde(default, deserialize_with = "de_aggregate")]
    pub categories: CategoryAggregate,
    #[serde(default, deserialize_with = "de_amount_opt")]
    pub total_spent: Option<Decimal>,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest<'a> {
    pub username: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest<'a> {
    pub username: &'a str,
    pub email: &'a str,
    pub password: &'a str,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub token_type: Option<String>,
}

/// FastAPI error envelope. `detail` is usually a string but validation
/// failures send a list of objects.
#[derive(Debug, Clone, Deserialize)]
pub struct ErrorBody {
    #[serde(default)]
    pub detail: Option<serde_json::Value>,
}

impl ErrorBody {
    pub fn detail_text(&self) -> Option<String> {
        match self.detail.as_ref()? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

/// Parse a JSON number (or numeric string) into a `Decimal` from its literal
/// text, so `12.5` stays `12.5` rather than going through `f64`.
pub fn decimal_from_json(v: &serde_json::Value) -> Option<Decimal> {
    let text = match v {
        serde_json::Value::Number(n) => n.to_string(),
        serde_json::Value::String(s) => s.trim().to_string(),
        _ => return None,
    };
    text.parse::<Decimal>()
        .or_else(|_| Decimal::from_scientific(&text))
        .ok()
        .map(|d| d.normalize())
}

/// Dates are free text on the server. Anything that is not `YYYY-MM-DD`
/// reads as no date instead of failing the whole payload.
fn de_lenient_date<'de, D>(d: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    Ok(match v {
        Some(serde_json::Value::String(s)) => NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok(),
        _ => None,
    })
}

fn de_amount_opt<'de, D>(d: D) -> Result<Option<Decimal>, D::Error>
where
    D: Deserializer<'de>,
{
    let v = Option::<serde_json::Value>::deserialize(d)?;
    match v {
        None | Some(serde_json::Value::Null) => Ok(None),
        Some(v) => decimal_from_json(&v)
            .map(Some)
            .ok_or_else(|| serde::de::Error::custom(format!("invalid amount {}", v))),
    }
}

fn de_amount<'de, D>(d: D) -> Result<Decimal, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(de_amount_opt(d)?.unwrap_or(Decimal::ZERO))
}

fn de_aggregate<'de, D>(d: D) -> Result<CategoryAggregate, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<BTreeMap<String, serde_json::Value>>::deserialize(d)?;
    let mut out = CategoryAggregate::new();
    for (name, v) in raw.unwrap_or_default() {
        // SUM() over an empty group comes back as null
        let total = match v {
            serde_json::Value::Null => Decimal::ZERO,
            v => decimal_from_json(&v)
                .ok_or_else(|| serde::de::Error::custom(format!("invalid total for '{}'", name)))?,
        };
        out.insert(name, total);
    }
    Ok(out)
}
