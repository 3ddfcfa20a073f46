// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use fintrack::db;
use fintrack::session::{AuthSession, CredentialStore, SqliteCredentialStore, TOKEN_KEY};
use rusqlite::Connection;
use tempfile::tempdir;

#[test]
fn credential_survives_reopening_the_store() {
    let dir = tempdir().unwrap();
    {
        let conn = db::open_or_init(dir.path()).unwrap();
        let mut session = AuthSession::new(Box::new(SqliteCredentialStore::new(conn).unwrap()));
        assert!(!session.is_authenticated());
        session.store_credential("tok-1").unwrap();
    }
    let conn = db::open_or_init(dir.path()).unwrap();
    let session = AuthSession::new(Box::new(SqliteCredentialStore::new(conn).unwrap()));
    assert_eq!(session.credential().as_deref(), Some("tok-1"));
}

#[test]
fn unauthorized_removes_the_persisted_credential() {
    let dir = tempdir().unwrap();
    let conn = db::open_or_init(dir.path()).unwrap();
    let mut session = AuthSession::new(Box::new(SqliteCredentialStore::new(conn).unwrap()));
    session.store_credential("tok-1").unwrap();
    session.on_unauthorized();
    assert!(session.credential().is_none());
    assert!(session.take_reauth_request());
    assert!(!session.take_reauth_request());

    let conn = db::open_or_init(dir.path()).unwrap();
    assert_eq!(db::kv_get(&conn, TOKEN_KEY).unwrap(), None);
}

#[test]
fn store_overwrites_and_removes_keys() {
    let conn = Connection::open_in_memory().unwrap();
    let mut store = SqliteCredentialStore::new(conn).unwrap();
    store.save(TOKEN_KEY, "a").unwrap();
    store.save(TOKEN_KEY, "b").unwrap();
    assert_eq!(store.load(TOKEN_KEY).unwrap().as_deref(), Some("b"));
    store.remove(TOKEN_KEY).unwrap();
    assert_eq!(store.load(TOKEN_KEY).unwrap(), None);
    // removing twice is fine
    store.remove(TOKEN_KEY).unwrap();
}

#[test]
fn empty_stored_token_counts_as_logged_out() {
    let conn = Connection::open_in_memory().unwrap();
    let mut store = SqliteCredentialStore::new(conn).unwrap();
    store.save(TOKEN_KEY, "").unwrap();
    let session = AuthSession::new(Box::new(store));
    assert!(!session.is_authenticated());
}
