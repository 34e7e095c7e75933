// src/integrations/backend/client.rs
//
// GameHatch REST backend client.
//
// ARCHITECTURE:
// - Thin HTTP layer over the storefront backend
// - Returns raw JSON payloads; shape normalization happens in `shapes`
//   and in the services, never here
// - Maps transport failures -> AppError::Network, non-OK statuses ->
//   AppError::ServerRejected with a best-effort extracted message
// - Holds the bearer token set by the auth service

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::{header, Client, RequestBuilder, Response, StatusCode};
use serde::Serialize;
use serde_json::{json, Value};
use std::sync::RwLock;
use std::time::Duration;

use super::shapes::field_ci;
use crate::domain::{ItemId, UserId};
use crate::error::{AppError, AppResult};

/// Connection settings for the remote backend.
#[derive(Debug, Clone)]
pub struct BackendConfig {
    /// Base URL including the API prefix, e.g. `"http://localhost:5000/api"`.
    pub base_url: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl Default for BackendConfig {
    fn default() -> Self {
        Self {
            base_url: "http://localhost:5000/api".to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

impl BackendConfig {
    /// Default configuration with a `GAMEHATCH_API_URL` environment
    /// override.
    pub fn from_env() -> Self {
        let mut config = Self::default();
        if let Ok(url) = std::env::var("GAMEHATCH_API_URL") {
            if !url.trim().is_empty() {
                config.base_url = url.trim_end_matches('/').to_string();
            }
        }
        config
    }
}

/// Signup request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SignupPayload {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// The remote REST contract this client consumes.
///
/// Services depend on this trait, not on the concrete client, so tests
/// can substitute a scripted backend.
#[async_trait]
pub trait BackendApi: Send + Sync {
    /// Install or clear the bearer token attached to subsequent calls.
    fn set_bearer(&self, token: Option<String>);

    async fn login(&self, username_or_email: &str, password: &str) -> AppResult<Value>;
    async fn signup(&self, payload: &SignupPayload) -> AppResult<Value>;
    async fn logout(&self) -> AppResult<()>;

    /// Full user list; identity-resolution fallback only.
    async fn list_users(&self) -> AppResult<Value>;

    async fn list_games(&self) -> AppResult<Value>;

    async fn fetch_wishlist(&self, user: &UserId) -> AppResult<Value>;
    async fn add_wishlist_entry(
        &self,
        user: &UserId,
        item: &ItemId,
        added_at: DateTime<Utc>,
    ) -> AppResult<Value>;
    async fn remove_wishlist_entry(&self, user: &UserId, item: &ItemId) -> AppResult<Value>;
}

/// reqwest-backed implementation of `BackendApi`.
pub struct RestBackendClient {
    config: BackendConfig,
    http: Client,
    bearer: RwLock<Option<String>>,
}

impl RestBackendClient {
    pub fn new(config: BackendConfig) -> AppResult<Self> {
        let http = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| AppError::Other(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            config,
            http,
            bearer: RwLock::new(None),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
    }

    fn with_bearer(&self, request: RequestBuilder) -> RequestBuilder {
        match self.bearer.read().unwrap().as_deref() {
            Some(token) => request.header(header::AUTHORIZATION, format!("Bearer {}", token)),
            None => request,
        }
    }

    /// Check the status and parse the body as JSON.
    async fn read_json(response: Response) -> AppResult<Value> {
        let status = response.status();

        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ServerRejected {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        response
            .json()
            .await
            .map_err(|e| AppError::InvalidResponseFormat(format!("invalid JSON body: {}", e)))
    }
}

/// Best-effort extraction of a human-readable error message from a
/// response body: structured `message`/`error` field first, raw text
/// second, bare status last.
fn error_message(status: StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<Value>(body) {
        if let Some(message) = field_ci(&parsed, &["message", "error"]).and_then(Value::as_str) {
            if !message.trim().is_empty() {
                return message.trim().to_string();
            }
        }
    }

    let trimmed = body.trim();
    if !trimmed.is_empty() {
        return trimmed.to_string();
    }

    format!("HTTP {}", status.as_u16())
}

#[async_trait]
impl BackendApi for RestBackendClient {
    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.write().unwrap() = token;
    }

    async fn login(&self, username_or_email: &str, password: &str) -> AppResult<Value> {
        let response = self
            .http
            .post(self.url("/auth/login"))
            .json(&json!({
                "usernameOrEmail": username_or_email,
                "password": password,
            }))
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn signup(&self, payload: &SignupPayload) -> AppResult<Value> {
        let response = self
            .http
            .post(self.url("/auth/signup"))
            .json(payload)
            .send()
            .await?;

        Self::read_json(response).await
    }

    async fn logout(&self) -> AppResult<()> {
        let request = self.with_bearer(self.http.post(self.url("/auth/logout")));
        let response = request.send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::ServerRejected {
                status: status.as_u16(),
                message: error_message(status, &body),
            });
        }

        Ok(())
    }

    async fn list_users(&self) -> AppResult<Value> {
        let request = self.with_bearer(self.http.get(self.url("/users")));
        Self::read_json(request.send().await?).await
    }

    async fn list_games(&self) -> AppResult<Value> {
        let response = self.http.get(self.url("/games")).send().await?;
        Self::read_json(response).await
    }

    async fn fetch_wishlist(&self, user: &UserId) -> AppResult<Value> {
        let request = self.with_bearer(
            self.http
                .get(self.url(&format!("/wishlist/{}", user.as_str()))),
        );
        Self::read_json(request.send().await?).await
    }

    async fn add_wishlist_entry(
        &self,
        user: &UserId,
        item: &ItemId,
        added_at: DateTime<Utc>,
    ) -> AppResult<Value> {
        let request = self.with_bearer(self.http.post(self.url("/wishlist/add")).json(&json!({
            "userId": user.as_str(),
            "gameId": item.as_str(),
            "addedAt": added_at.to_rfc3339(),
        })));

        Self::read_json(request.send().await?).await
    }

    async fn remove_wishlist_entry(&self, user: &UserId, item: &ItemId) -> AppResult<Value> {
        let request = self.with_bearer(self.http.post(self.url("/wishlist/remove")).json(&json!({
            "userId": user.as_str(),
            "gameId": item.as_str(),
        })));

        Self::read_json(request.send().await?).await
    }
}
