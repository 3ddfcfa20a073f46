// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use fintrack::app::App;
use fintrack::error::TransportError;
use fintrack::gateway::Gateway;
use fintrack::session::{AuthSession, MemoryCredentialStore};
use fintrack::transport::{ApiRequest, ApiResponse, Transport};
use reqwest::Method;
use serde_json::{Value, json};

pub const TOKEN: &str = "tok-alice";

#[derive(Default)]
struct ServerState {
    users: HashMap<String, String>,
    tokens: HashSet<String>,
    transactions: Vec<Value>,
    next_id: i64,
    settings: Value,
}

/// In-process stand-in for the Finance Tracker API.
pub struct FakeServer {
    state: RefCell<ServerState>,
    requests: RefCell<Vec<ApiRequest>>,
    offline: Cell<bool>,
}

impl FakeServer {
    pub fn new() -> Self {
        let mut state = ServerState {
            next_id: 1,
            settings: json!({"balance": 0.0, "monthly_limit": 0.0, "start_date": null, "end_date": null}),
            ..ServerState::default()
        };
        state.users.insert("alice".into(), "secret".into());
        state.tokens.insert(TOKEN.into());
        Self {
            state: RefCell::new(state),
            requests: RefCell::new(Vec::new()),
            offline: Cell::new(false),
        }
    }

    pub fn with_transactions(self, rows: &[(&str, f64, &str)]) -> Self {
        for (category, amount, date) in rows {
            self.insert(category, *amount, date);
        }
        self
    }

    pub fn insert(&self, category: &str, amount: f64, date: &str) -> i64 {
        let mut s = self.state.borrow_mut();
        let id = s.next_id;
        s.next_id += 1;
        s.transactions.push(json!({
            "id": id, "category": category.to_uppercase(), "amount": amount,
            "description": "", "date": date
        }));
        id
    }

    pub fn set_settings(&self, v: Value) {
        self.state.borrow_mut().settings = v;
    }

    pub fn revoke_all(&self) {
        self.state.borrow_mut().tokens.clear();
    }

    pub fn set_offline(&self, offline: bool) {
        self.offline.set(offline);
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.borrow().clone()
    }

    pub fn last_request(&self) -> Option<ApiRequest> {
        self.requests.borrow().last().cloned()
    }

    pub fn request_count(&self) -> usize {
        self.requests.borrow().len()
    }

    pub fn stored_count(&self) -> usize {
        self.state.borrow().transactions.len()
    }

    fn reply(status: u16, body: Value) -> ApiResponse {
        ApiResponse {
            status,
            body: body.to_string(),
        }
    }

    fn route(&self, req: &ApiRequest) -> ApiResponse {
        let mut s = self.state.borrow_mut();
        let body = req.body.clone().unwrap_or(Value::Null);
        match (&req.method, req.path.as_str()) {
            (m, "/auth/login") if *m == Method::POST => {
                let user = body["username"].as_str().unwrap_or_default();
                let pass = body["password"].as_str().unwrap_or_default();
                if s.users.get(user).map(String::as_str) == Some(pass) {
                    let token = format!("tok-{}", user);
                    s.tokens.insert(token.clone());
                    Self::reply(200, json!({"access_token": token, "token_type": "bearer"}))
                } else {
                    Self::reply(401, json!({"detail": "Invalid credentials"}))
                }
            }
            (m, "/auth/register") if *m == Method::POST => {
                let user = body["username"].as_str().unwrap_or_default().to_string();
                if s.users.contains_key(&user) {
                    return Self::reply(400, json!({"detail": "Username or email already exists"}));
                }
                let pass = body["password"].as_str().unwrap_or_default().to_string();
                s.users.insert(user.clone(), pass);
                let token = format!("tok-{}", user);
                s.tokens.insert(token.clone());
                Self::reply(200, json!({"access_token": token, "token_type": "bearer"}))
            }
            _ => {
                match req.authorization().and_then(|h| h.strip_prefix("Bearer ")) {
                    None => return Self::reply(403, json!({"detail": "Not authenticated"})),
                    Some(t) if !s.tokens.contains(t) => {
                        return Self::reply(401, json!({"detail": "Invalid token"}));
                    }
                    Some(_) => {}
                }
                Self::data_route(&mut s, req, body)
            }
        }
    }

    fn data_route(s: &mut ServerState, req: &ApiRequest, body: Value) -> ApiResponse {
        let id_in_path = req
            .path
            .strip_prefix("/transactions/")
            .and_then(|p| p.parse::<i64>().ok());
        match (req.method.as_str(), req.path.as_str(), id_in_path) {
            ("GET", "/transactions", _) => {
                let mut rows = s.transactions.clone();
                rows.sort_by(|a, b| b["date"].as_str().cmp(&a["date"].as_str()));
                Self::reply(200, Value::Array(rows))
            }
            ("POST", "/transactions", _) => {
                let id = s.next_id;
                s.next_id += 1;
                let row = json!({
                    "id": id,
                    "category": body["category"].as_str().unwrap_or_default().to_uppercase(),
                    "amount": body["amount"],
                    "description": body["description"],
                    "date": body["date"],
                });
                s.transactions.push(row.clone());
                Self::reply(200, row)
            }
            ("PUT", _, Some(id)) => {
                let Some(row) = s.transactions.iter_mut().find(|t| t["id"] == json!(id)) else {
                    return Self::reply(404, json!({"detail": "Transaction not found"}));
                };
                *row = json!({
                    "id": id,
                    "category": body["category"].as_str().unwrap_or_default().to_uppercase(),
                    "amount": body["amount"],
                    "description": body["description"],
                    "date": body["date"],
                });
                Self::reply(200, row.clone())
            }
            ("DELETE", _, Some(id)) => {
                let before = s.transactions.len();
                s.transactions.retain(|t| t["id"] != json!(id));
                if s.transactions.len() == before {
                    Self::reply(404, json!({"detail": "Transaction not found"}))
                } else {
                    Self::reply(200, json!({"message": "Transaction deleted successfully"}))
                }
            }
            ("GET", "/settings", _) => Self::reply(200, s.settings.clone()),
            ("PUT", "/settings", _) => {
                for key in ["balance", "monthly_limit", "start_date", "end_date"] {
                    if !body[key].is_null() {
                        s.settings[key] = body[key].clone();
                    }
                }
                Self::reply(200, s.settings.clone())
            }
            ("GET", "/analytics", _) => {
                let mut cats: BTreeMap<String, f64> = BTreeMap::new();
                let mut total = 0.0;
                for t in &s.transactions {
                    let amt = t["amount"].as_f64().unwrap_or_default();
                    *cats
                        .entry(t["category"].as_str().unwrap_or_default().to_string())
                        .or_default() += amt;
                    total += amt;
                }
                Self::reply(200, json!({"categories": cats, "total_spent": total}))
            }
            _ => Self::reply(404, json!({"detail": "Not Found"})),
        }
    }
}

impl Transport for FakeServer {
    fn execute(&self, req: &ApiRequest) -> Result<ApiResponse, TransportError> {
        self.requests.borrow_mut().push(req.clone());
        if self.offline.get() {
            return Err(TransportError("error sending request: connection refused".into()));
        }
        Ok(self.route(req))
    }
}

pub fn logged_in_gateway(server: FakeServer) -> Gateway<FakeServer> {
    Gateway::new(
        server,
        AuthSession::new(Box::new(MemoryCredentialStore::with_token(TOKEN))),
    )
}

pub fn fixed_today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 3, 10).unwrap()
}

pub fn logged_in_app(server: FakeServer) -> App<FakeServer> {
    let mut app = App::new(logged_in_gateway(server), "₹").with_clock(fixed_today);
    app.initialize();
    app
}

pub fn date(s: &str) -> NaiveDate {
    NaiveDate::parse_from_str(s, "%Y-%m-%d").unwrap()
}
