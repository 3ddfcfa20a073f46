// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::error::ApiError;
use crate::models::{Transaction, TransactionInput};

pub const MISSING_FIELDS: &str = "Please enter category and amount";

/// Raw form contents, exactly as typed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct TransactionFields {
    pub category: String,
    pub amount: String,
    pub date: String,
    pub description: String,
}

impl TransactionFields {
    pub fn new(category: &str, amount: &str) -> Self {
        Self {
            category: category.to_string(),
            amount: amount.to_string(),
            ..Self::default()
        }
    }

    pub fn from_transaction(t: &Transaction) -> Self {
        Self {
            category: t.category.clone(),
            amount: t.amount.normalize().to_string(),
            date: t
                .date
                .map(|d| d.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
            description: t.description.clone().unwrap_or_default(),
        }
    }

    /// Category must be non-blank and amount numeric. A blank date means today.
    pub fn validate(&self, today: NaiveDate) -> Result<TransactionInput, ApiError> {
        let category = self.category.trim();
        let amount = self.amount.trim();
        let amount = amount
            .parse::<Decimal>()
            .or_else(|_| Decimal::from_scientific(amount));
        let amount = match amount {
            Ok(a) if !category.is_empty() => a,
            _ => return Err(ApiError::Validation(MISSING_FIELDS.to_string())),
        };
        let date = match self.date.trim() {
            "" => today,
            s => NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|_| {
                ApiError::Validation(format!("Invalid date '{}', expected YYYY-MM-DD", s))
            })?,
        };
        Ok(TransactionInput {
            category: category.to_string(),
            amount,
            description: self.description.trim().to_string(),
            date,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormMode {
    Create,
    Edit,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditorState {
    Idle,
    Editing {
        fields: TransactionFields,
        error: Option<String>,
    },
    Submitting {
        fields: TransactionFields,
    },
}

/// One transaction form: Idle -> Editing -> Submitting -> Idle on success,
/// back to Editing with the fields kept on failure.
#[derive(Debug, Clone)]
pub struct TransactionEditor {
    mode: FormMode,
    target: Option<i64>,
    state: EditorState,
}

impl TransactionEditor {
    pub fn new(mode: FormMode) -> Self {
        Self {
            mode,
            target: None,
            state: EditorState::Idle,
        }
    }

    pub fn mode(&self) -> FormMode {
        self.mode
    }

    pub fn state(&self) -> &EditorState {
        &self.state
    }

    /// Transaction the edit form is bound to.
    pub fn target(&self) -> Option<i64> {
        self.target
    }

    pub fn is_open(&self) -> bool {
        !matches!(self.state, EditorState::Idle)
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            EditorState::Editing { error, .. } => error.as_deref(),
            _ => None,
        }
    }

    pub fn open(&mut self, fields: TransactionFields, target: Option<i64>) {
        self.target = target;
        self.state = EditorState::Editing {
            fields,
            error: None,
        };
    }

    pub fn fields(&self) -> Option<&TransactionFields> {
        match &self.state {
            EditorState::Idle => None,
            EditorState::Editing { fields, .. } | EditorState::Submitting { fields } => Some(fields),
        }
    }

    pub fn fields_mut(&mut self) -> Option<&mut TransactionFields> {
        match &mut self.state {
            EditorState::Editing { fields, .. } => Some(fields),
            _ => None,
        }
    }

    /// Validate `fields` and move to Submitting. On a validation error the
    /// form stays in Editing with the message and nothing is sent.
    pub fn begin_submit(
        &mut self,
        fields: TransactionFields,
        today: NaiveDate,
    ) -> Result<TransactionInput, ApiError> {
        match fields.validate(today) {
            Ok(input) => {
                self.state = EditorState::Submitting { fields };
                Ok(input)
            }
            Err(e) => {
                self.state = EditorState::Editing {
                    fields,
                    error: Some(e.to_string()),
                };
                Err(e)
            }
        }
    }

    pub fn succeed(&mut self) {
        self.close();
    }

    pub fn fail(&mut self, message: String) {
        let fields = match std::mem::replace(&mut self.state, EditorState::Idle) {
            EditorState::Editing { fields, .. } | EditorState::Submitting { fields } => fields,
            EditorState::Idle => TransactionFields::default(),
        };
        self.state = EditorState::Editing {
            fields,
            error: Some(message),
        };
    }

    pub fn close(&mut self) {
        self.target = None;
        self.state = EditorState::Idle;
    }
}
