// Copyright (c) 2025 Soumyadip Sarkar.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use reqwest::Method;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::error::ApiError;
use crate::models::{
    Analytics, ErrorBody, LoginRequest, RegisterRequest, Settings, SettingsReply, TokenResponse,
    Transaction, TransactionInput,
};
use crate::session::AuthSession;
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// CRUD access to the Finance Tracker API. One attempt per call; no retries.
pub struct Gateway<T: Transport> {
    transport: T,
    session: AuthSession,
}

impl<T: Transport> Gateway<T> {
    pub fn new(transport: T, session: AuthSession) -> Self {
        Self { transport, session }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn session(&self) -> &AuthSession {
        &self.session
    }

    pub fn session_mut(&mut self) -> &mut AuthSession {
        &mut self.session
    }

    pub fn login(&mut self, username: &str, password: &str) -> Result<(), ApiError> {
        let req = ApiRequest::new(Method::POST, "/auth/login")
            .json(&LoginRequest { username, password })
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        self.authenticate(req, "Login failed")
    }

    pub fn register(&mut self, username: &str, email: &str, password: &str) -> Result<(), ApiError> {
        let req = ApiRequest::new(Method::POST, "/auth/register")
            .json(&RegisterRequest {
                username,
                email,
                password,
            })
            .map_err(|e| ApiError::Encode(e.to_string()))?;
        self.authenticate(req, "Registration failed")
    }

    fn authenticate(&mut self, req: ApiRequest, fallback: &str) -> Result<(), ApiError> {
        let resp = self.transport.execute(&req)?;
        if !resp.is_success() {
            let detail = error_detail(&resp).unwrap_or_else(|| fallback.to_string());
            return Err(ApiError::Auth(detail));
        }
        let token: TokenResponse = decode(&resp)?;
        self.session
            .store_credential(&token.access_token)
            .map_err(|e| ApiError::Auth(format!("Could not store credential: {}", e)))?;
        debug!(path = %req.path, "authenticated");
        Ok(())
    }

    pub fn list_transactions(&mut self) -> Result<Vec<Transaction>, ApiError> {
        let resp = self.send(ApiRequest::new(Method::GET, "/transactions"))?;
        decode(&resp)
    }

    pub fn create_transaction(&mut self, input: &TransactionInput) -> Result<Transaction, ApiError> {
        let req = with_body(ApiRequest::new(Method::POST, "/transactions"), input)?;
        decode(&self.send(req)?)
    }

    pub fn update_transaction(
        &mut self,
        id: i64,
        input: &TransactionInput,
    ) -> Result<Transaction, ApiError> {
        let req = with_body(ApiRequest::new(Method::PUT, format!("/transactions/{}", id)), input)?;
        decode(&self.send(req)?)
    }

    pub fn delete_transaction(&mut self, id: i64) -> Result<(), ApiError> {
        self.send(ApiRequest::new(Method::DELETE, format!("/transactions/{}", id)))?;
        Ok(())
    }

    pub fn get_settings(&mut self) -> Result<Settings, ApiError> {
        decode(&self.send(ApiRequest::new(Method::GET, "/settings"))?)
    }

    /// Full replacement. Fields missing from the answer keep the values sent.
    pub fn put_settings(&mut self, settings: &Settings) -> Result<Settings, ApiError> {
        let req = with_body(ApiRequest::new(Method::PUT, "/settings"), settings)?;
        let reply: SettingsReply = decode(&self.send(req)?)?;
        Ok(reply.or_sent(settings))
    }

    pub fn get_analytics(&mut self) -> Result<Analytics, ApiError> {
        decode(&self.send(ApiRequest::new(Method::GET, "/analytics"))?)
    }

    fn send(&mut self, req: ApiRequest) -> Result<ApiResponse, ApiError> {
        let req = self.session.attach_credential(req);
        let resp = self.transport.execute(&req).map_err(|e| {
            warn!(method = %req.method, path = %req.path, error = %e, "request failed");
            ApiError::from(e)
        })?;
        match resp.status {
            401 => {
                self.session.on_unauthorized();
                Err(ApiError::Unauthorized)
            }
            _ if resp.is_success() => Ok(resp),
            status => {
                let detail = error_detail(&resp);
                debug!(status, ?detail, path = %req.path, "server rejected request");
                Err(ApiError::Server { status, detail })
            }
        }
    }
}

fn with_body<B: serde::Serialize>(req: ApiRequest, body: &B) -> Result<ApiRequest, ApiError> {
    req.json(body).map_err(|e| ApiError::Encode(e.to_string()))
}

fn decode<R: DeserializeOwned>(resp: &ApiResponse) -> Result<R, ApiError> {
    serde_json::from_str(&resp.body).map_err(|e| ApiError::Decode(e.to_string()))
}

fn error_detail(resp: &ApiResponse) -> Option<String> {
    serde_json::from_str::<ErrorBody>(&resp.body)
        .ok()
        .and_then(|b| b.detail_text())
}
