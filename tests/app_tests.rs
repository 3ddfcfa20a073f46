// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

mod common;

use common::{FakeServer, date, fixed_today, logged_in_app};
use fintrack::app::SettingsForm;
use fintrack::editor::{EditorState, MISSING_FIELDS, TransactionFields};
use fintrack::error::ApiError;
use fintrack::notice::NoticeKind;
use fintrack::render::{ActionKind, RowAction, StatSlot};
use fintrack::store::CategorySource;
use rust_decimal::Decimal;
use serde_json::json;

fn latest_notice(app: &mut fintrack::app::App<FakeServer>) -> (String, NoticeKind) {
    let n = app.notices().latest().cloned().expect("a notice");
    (n.text, n.kind)
}

#[test]
fn initialize_loads_everything_and_renders() {
    let server = FakeServer::new().with_transactions(&[
        ("food", 100.0, "2024-03-01"),
        ("rent", 300.0, "2024-03-02"),
    ]);
    server.set_settings(json!({
        "balance": 5000.0, "monthly_limit": 1000.0, "start_date": "2024-03-01", "end_date": "2024-03-15"
    }));
    let app = logged_in_app(server);

    assert_eq!(app.store().transactions().len(), 2);
    assert_eq!(app.store().category_source(), CategorySource::Server);
    assert_eq!(app.panel().get(StatSlot::Spent), Some("400.00"));
    assert_eq!(app.panel().get(StatSlot::Remaining), Some("600.00"));
    assert_eq!(app.panel().get(StatSlot::Days), Some("5"));
    assert_eq!(app.panel().get(StatSlot::Daily), Some("120.00"));
    assert!(app.chart().has_chart());
    assert_eq!(app.list_view().rows()[0].category, "RENT");
}

#[test]
fn invalid_create_never_reaches_the_network() {
    let mut app = logged_in_app(FakeServer::new());
    let before = app.gateway().transport().request_count();

    let err = app
        .submit_create(TransactionFields::new("   ", "12"))
        .unwrap_err();
    assert_eq!(err, ApiError::Validation(MISSING_FIELDS.into()));
    let err = app
        .submit_create(TransactionFields::new("Food", "twelve"))
        .unwrap_err();
    assert!(matches!(err, ApiError::Validation(_)));

    assert_eq!(app.gateway().transport().request_count(), before);
    assert_eq!(latest_notice(&mut app), (MISSING_FIELDS.to_string(), NoticeKind::Error));
    match app.create_form().state() {
        EditorState::Editing { fields, error } => {
            assert_eq!(fields.amount, "twelve");
            assert!(error.is_some());
        }
        other => panic!("unexpected state {:?}", other),
    }
}

#[test]
fn create_refreshes_from_server_and_defaults_date() {
    let mut app = logged_in_app(FakeServer::new());
    app.submit_create(TransactionFields::new("Food", "12.5"))
        .unwrap();

    let t = &app.store().transactions()[0];
    assert_eq!(t.category, "FOOD");
    assert_eq!(t.date, Some(fixed_today()));
    assert_eq!(app.store().categories()["FOOD"], Decimal::new(125, 1));
    assert_eq!(app.create_form().state(), &EditorState::Idle);
    assert_eq!(latest_notice(&mut app), ("Transaction added".to_string(), NoticeKind::Success));

    // the refresh re-fetched the list and the analytics
    let paths: Vec<String> = app
        .gateway()
        .transport()
        .requests()
        .iter()
        .rev()
        .take(3)
        .map(|r| format!("{} {}", r.method, r.path))
        .collect();
    assert_eq!(
        paths,
        vec!["GET /analytics", "GET /transactions", "POST /transactions"]
    );
}

#[test]
fn open_edit_for_unknown_id_is_a_no_op() {
    let mut app = logged_in_app(FakeServer::new().with_transactions(&[("food", 5.0, "2024-03-01")]));
    assert!(!app.open_edit(42));
    assert!(!app.edit_form().is_open());
    assert!(app.notices().latest().is_none());
}

#[test]
fn edit_flow_replaces_transaction_and_closes_form() {
    let mut app = logged_in_app(FakeServer::new().with_transactions(&[("food", 5.0, "2024-03-01")]));
    app.dispatch(RowAction {
        kind: ActionKind::Edit,
        id: 1,
    })
    .unwrap();
    assert_eq!(app.edit_form().target(), Some(1));
    let fields = app.edit_fields_mut().unwrap();
    assert_eq!(fields.category, "FOOD");
    assert_eq!(fields.amount, "5");
    fields.amount = "7.25".into();
    fields.description = "snacks".into();

    app.submit_open_edit().unwrap();
    assert!(!app.edit_form().is_open());
    let t = app.store().find(1).unwrap();
    assert_eq!(t.amount, Decimal::new(725, 2));
    assert_eq!(t.note(), Some("snacks"));
    assert_eq!(latest_notice(&mut app).0, "Transaction updated");
}

#[test]
fn failed_update_keeps_fields_and_shows_server_error() {
    let server = FakeServer::new().with_transactions(&[("food", 5.0, "2024-03-01")]);
    let mut app = logged_in_app(server);
    assert!(app.open_edit(1));
    let mut fields = app.edit_form().fields().cloned().unwrap();
    fields.category = "Travel".into();

    // the row disappeared server-side after it was rendered
    let err = app.submit_update(77, fields).unwrap_err();
    assert!(matches!(err, ApiError::Server { status: 404, .. }));
    assert_eq!(app.edit_form().error(), Some("Transaction not found"));
    assert_eq!(app.edit_form().fields().unwrap().category, "Travel");
    assert_eq!(
        latest_notice(&mut app),
        ("Transaction not found".to_string(), NoticeKind::Error)
    );
}

#[test]
fn delete_of_unknown_id_is_reported_verbatim() {
    let mut app = logged_in_app(FakeServer::new());
    assert!(app.submit_delete(12345).is_err());
    assert_eq!(latest_notice(&mut app).0, "Transaction not found");
}

#[test]
fn delete_through_dispatch_refreshes_list() {
    let server = FakeServer::new().with_transactions(&[
        ("food", 5.0, "2024-03-01"),
        ("fuel", 9.0, "2024-03-02"),
    ]);
    let mut app = logged_in_app(server);
    app.dispatch(RowAction {
        kind: ActionKind::Delete,
        id: 2,
    })
    .unwrap();
    assert_eq!(app.gateway().transport().stored_count(), 1);
    assert_eq!(app.store().transactions().len(), 1);
    assert!(!app.has_action(RowAction {
        kind: ActionKind::Delete,
        id: 2
    }));
    assert_eq!(latest_notice(&mut app).0, "Transaction deleted");
}

#[test]
fn stale_actions_are_ignored() {
    let mut app = logged_in_app(FakeServer::new().with_transactions(&[("food", 5.0, "2024-03-01")]));
    let before = app.gateway().transport().request_count();
    app.dispatch(RowAction {
        kind: ActionKind::Delete,
        id: 99,
    })
    .unwrap();
    assert_eq!(app.gateway().transport().request_count(), before);
}

#[test]
fn unauthorized_mutation_requests_login() {
    let server = FakeServer::new();
    let mut app = logged_in_app(server);
    app.gateway().transport().revoke_all();

    let err = app.submit_create(TransactionFields::new("Food", "1")).unwrap_err();
    assert!(err.is_unauthorized());
    assert!(!app.is_authenticated());
    assert!(app.needs_login());
    assert_eq!(
        latest_notice(&mut app),
        ("Session expired, please log in again".to_string(), NoticeKind::Error)
    );
}

#[test]
fn save_settings_replaces_and_rerenders_dashboard() {
    let mut app = logged_in_app(FakeServer::new().with_transactions(&[("food", 250.0, "2024-03-01")]));
    let form = SettingsForm {
        balance: "3000".into(),
        monthly_limit: "1000".into(),
        start_date: "2024-03-01".into(),
        end_date: "2024-03-20".into(),
    };
    app.save_settings(&form).unwrap();

    let s = app.store().settings();
    assert_eq!(s.monthly_limit, Decimal::new(1000, 0));
    assert_eq!(s.end_date, Some(date("2024-03-20")));
    assert_eq!(app.panel().get(StatSlot::Remaining), Some("750.00"));
    assert_eq!(app.panel().get(StatSlot::Days), Some("10"));
    assert_eq!(app.panel().get(StatSlot::Daily), Some("75.00"));
    assert_eq!(latest_notice(&mut app).0, "Settings saved");
}

#[test]
fn settings_form_treats_garbage_numbers_as_zero() {
    let form = SettingsForm {
        balance: "abc".into(),
        monthly_limit: "".into(),
        start_date: "".into(),
        end_date: "".into(),
    };
    let s = form.to_settings().unwrap();
    assert_eq!(s.balance, Decimal::ZERO);
    assert_eq!(s.monthly_limit, Decimal::ZERO);
    assert_eq!(s.end_date, None);
}

#[test]
fn logout_forgets_credential_and_state() {
    let mut app = logged_in_app(FakeServer::new().with_transactions(&[("food", 5.0, "2024-03-01")]));
    app.logout().unwrap();
    assert!(!app.is_authenticated());
    assert!(app.store().transactions().is_empty());
    assert!(app.list_view().rows().is_empty());
}

#[test]
fn undated_rows_render_blank_and_sort_last() {
    let server = FakeServer::new().with_transactions(&[
        ("rent", 20.0, ""),
        ("food", 10.0, "2024-03-01"),
    ]);
    let app = logged_in_app(server);
    let rows = app.list_view().rows();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].category, "FOOD");
    assert_eq!(rows[1].category, "RENT");
    assert_eq!(rows[1].date, "");
    assert_eq!(app.panel().get(StatSlot::Spent), Some("30.00"));
}

#[test]
fn huge_amounts_saturate_instead_of_panicking() {
    let server = FakeServer::new().with_transactions(&[
        ("big", 5e28, "2024-03-01"),
        ("big", 5e28, "2024-03-02"),
    ]);
    let app = logged_in_app(server);

    assert_eq!(app.store().transactions().len(), 2);
    let stats = app.dashboard_stats();
    assert_eq!(stats.total_spent, Decimal::MAX);
    assert_eq!(stats.remaining, Decimal::MIN);
    // the server total does not fit a Decimal, so the local sum stays
    assert_eq!(app.store().category_source(), CategorySource::Local);
    assert_eq!(app.store().categories()["BIG"], Decimal::MAX);
    assert!(app.chart().has_chart());
}

#[test]
fn missing_limit_from_server_keeps_the_held_one() {
    let server = FakeServer::new();
    server.set_settings(json!({
        "balance": 100.0, "monthly_limit": 1000.0, "start_date": null, "end_date": null
    }));
    let mut app = logged_in_app(server);
    assert_eq!(app.store().settings().monthly_limit, Decimal::new(1000, 0));

    app.gateway().transport().set_settings(json!({
        "balance": 200.0, "monthly_limit": null, "start_date": null, "end_date": null
    }));
    app.refresh_settings().unwrap();
    let s = app.store().settings();
    assert_eq!(s.balance, Decimal::new(200, 0));
    assert_eq!(s.monthly_limit, Decimal::new(1000, 0));
}
