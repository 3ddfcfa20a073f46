// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::collections::HashMap;

use anyhow::Result;
use rusqlite::Connection;
use tracing::{info, warn};

use crate::db;
use crate::transport::ApiRequest;

pub const TOKEN_KEY: &str = "auth_token";

/// Local key-value persistence for the session credential.
pub trait CredentialStore {
    fn load(&self, key: &str) -> Result<Option<String>>;
    fn save(&mut self, key: &str, value: &str) -> Result<()>;
    fn remove(&mut self, key: &str) -> Result<()>;
}

/// Credential persisted in the local SQLite file, surviving restarts.
pub struct SqliteCredentialStore {
    conn: Connection,
}

impl SqliteCredentialStore {
    pub fn new(conn: Connection) -> Result<Self> {
        db::init_schema(&conn)?;
        Ok(Self { conn })
    }
}

impl CredentialStore for SqliteCredentialStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        db::kv_get(&self.conn, key)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        db::kv_set(&self.conn, key, value)
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        db::kv_remove(&self.conn, key)
    }
}

#[derive(Debug, Default)]
pub struct MemoryCredentialStore {
    values: HashMap<String, String>,
}

impl MemoryCredentialStore {
    pub fn with_token(token: &str) -> Self {
        let mut s = Self::default();
        s.values.insert(TOKEN_KEY.to_string(), token.to_string());
        s
    }
}

impl CredentialStore for MemoryCredentialStore {
    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.values.get(key).cloned())
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.values.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<()> {
        self.values.remove(key);
        Ok(())
    }
}

/// Holds the bearer credential and decides what every outgoing request carries.
pub struct AuthSession {
    store: Box<dyn CredentialStore>,
    reauth_requested: bool,
}

impl AuthSession {
    pub fn new(store: Box<dyn CredentialStore>) -> Self {
        Self {
            store,
            reauth_requested: false,
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Box::new(MemoryCredentialStore::default()))
    }

    /// Current credential. Read from the store on every call, so a token
    /// removed elsewhere is never sent again.
    pub fn credential(&self) -> Option<String> {
        match self.store.load(TOKEN_KEY) {
            Ok(v) => v.filter(|t| !t.is_empty()),
            Err(e) => {
                warn!(error = %e, "failed to read stored credential");
                None
            }
        }
    }

    pub fn is_authenticated(&self) -> bool {
        self.credential().is_some()
    }

    pub fn attach_credential(&self, req: ApiRequest) -> ApiRequest {
        match self.credential() {
            Some(token) => req.header("Authorization", format!("Bearer {}", token)),
            None => req,
        }
    }

    pub fn store_credential(&mut self, token: &str) -> Result<()> {
        self.store.save(TOKEN_KEY, token)?;
        self.reauth_requested = false;
        Ok(())
    }

    /// The server rejected the credential: forget it and ask for a new login.
    pub fn on_unauthorized(&mut self) {
        if let Err(e) = self.store.remove(TOKEN_KEY) {
            warn!(error = %e, "failed to clear stored credential");
        }
        info!("credential rejected by server; re-authentication required");
        self.reauth_requested = true;
    }

    /// Consumes the pending re-authentication request, if any.
    pub fn take_reauth_request(&mut self) -> bool {
        std::mem::take(&mut self.reauth_requested)
    }

    pub fn logout(&mut self) -> Result<()> {
        self.store.remove(TOKEN_KEY)
    }
}
