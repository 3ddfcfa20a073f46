// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use thiserror::Error;

/// Every way a user action against the Finance Tracker API can fail.
///
/// Errors are caught where the action was triggered and turned into a
/// user-visible message; nothing is retried.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ApiError {
    /// Rejected locally before any request was made.
    #[error("{0}")]
    Validation(String),
    /// Login or registration refused by the server.
    #[error("{0}")]
    Auth(String),
    /// The server answered 401; the stored credential has been discarded.
    #[error("Session expired, please log in again")]
    Unauthorized,
    #[error("{}", .detail.as_deref().unwrap_or("Request failed"))]
    Server { status: u16, detail: Option<String> },
    #[error("Connection error")]
    Connection(String),
    #[error("Unexpected response from server: {0}")]
    Decode(String),
    /// A request body could not be serialized; nothing was sent.
    #[error("Could not encode request: {0}")]
    Encode(String),
}

impl ApiError {
    /// Text for a transient notice. `fallback` is used when the server gave no detail.
    pub fn notice_text(&self, fallback: &str) -> String {
        match self {
            ApiError::Server { detail: None, .. } => fallback.to_string(),
            other => other.to_string(),
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ApiError::Unauthorized)
    }
}

#[derive(Debug, Error)]
#[error("{0}")]
pub struct TransportError(pub String);

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError(e.to_string())
    }
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        ApiError::Connection(e.0)
    }
}
