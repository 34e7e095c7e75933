// src/services/test_support.rs
//
// Scripted in-memory backend for service tests.
//
// Behaves like a tiny storefront server: wishlist rows live in a Vec and
// add/remove actually mutate them, so re-sync flows are exercised against
// state that changes underneath the service, the way the real backend
// does.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::domain::{ItemId, UserId};
use crate::error::{AppError, AppResult};
use crate::integrations::backend::shapes::resolve_entry_item_id;
use crate::integrations::{BackendApi, SignupPayload};

#[derive(Default)]
pub(crate) struct FakeBackend {
    login_response: Mutex<Option<Value>>,
    signup_response: Mutex<Option<Value>>,
    users: Mutex<Option<Value>>,
    games: Mutex<Option<Value>>,
    wishlist_rows: Mutex<Vec<Value>>,
    /// When set, wishlist payloads are wrapped under this key instead of
    /// arriving as a bare array.
    wishlist_wrapper: Mutex<Option<String>>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    fail_logout: AtomicBool,
    bearer: Mutex<Option<String>>,
    list_users_calls: AtomicUsize,
    list_games_calls: AtomicUsize,
    logout_calls: AtomicUsize,
}

impl FakeBackend {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_login(&self, payload: Value) {
        *self.login_response.lock().unwrap() = Some(payload);
    }

    pub fn set_signup(&self, payload: Value) {
        *self.signup_response.lock().unwrap() = Some(payload);
    }

    pub fn set_users(&self, payload: Value) {
        *self.users.lock().unwrap() = Some(payload);
    }

    pub fn set_games(&self, payload: Value) {
        *self.games.lock().unwrap() = Some(payload);
    }

    pub fn set_wishlist_rows(&self, rows: Vec<Value>) {
        *self.wishlist_rows.lock().unwrap() = rows;
    }

    pub fn wrap_wishlist(&self, key: &str) {
        *self.wishlist_wrapper.lock().unwrap() = Some(key.to_string());
    }

    pub fn fail_reads(&self) {
        self.fail_reads.store(true, Ordering::SeqCst);
    }

    pub fn fail_writes(&self) {
        self.fail_writes.store(true, Ordering::SeqCst);
    }

    pub fn fail_logout(&self) {
        self.fail_logout.store(true, Ordering::SeqCst);
    }

    pub fn bearer(&self) -> Option<String> {
        self.bearer.lock().unwrap().clone()
    }

    pub fn wishlist_rows(&self) -> Vec<Value> {
        self.wishlist_rows.lock().unwrap().clone()
    }

    pub fn list_users_calls(&self) -> usize {
        self.list_users_calls.load(Ordering::SeqCst)
    }

    pub fn list_games_calls(&self) -> usize {
        self.list_games_calls.load(Ordering::SeqCst)
    }

    pub fn logout_calls(&self) -> usize {
        self.logout_calls.load(Ordering::SeqCst)
    }

    fn rejected(status: u16, message: &str) -> AppError {
        AppError::ServerRejected {
            status,
            message: message.to_string(),
        }
    }
}

#[async_trait]
impl BackendApi for FakeBackend {
    fn set_bearer(&self, token: Option<String>) {
        *self.bearer.lock().unwrap() = token;
    }

    async fn login(&self, _username_or_email: &str, _password: &str) -> AppResult<Value> {
        self.login_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::rejected(401, "Invalid credentials"))
    }

    async fn signup(&self, _payload: &SignupPayload) -> AppResult<Value> {
        self.signup_response
            .lock()
            .unwrap()
            .clone()
            .ok_or_else(|| Self::rejected(400, "Signup failed"))
    }

    async fn logout(&self) -> AppResult<()> {
        if self.fail_logout.load(Ordering::SeqCst) {
            return Err(Self::rejected(500, "logout unavailable"));
        }
        self.logout_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn list_users(&self) -> AppResult<Value> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejected(500, "users unavailable"));
        }
        self.list_users_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.users.lock().unwrap().clone().unwrap_or_else(|| json!([])))
    }

    async fn list_games(&self) -> AppResult<Value> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejected(500, "games unavailable"));
        }
        self.list_games_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.games.lock().unwrap().clone().unwrap_or_else(|| json!([])))
    }

    async fn fetch_wishlist(&self, _user: &UserId) -> AppResult<Value> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(Self::rejected(500, "wishlist unavailable"));
        }

        let rows = self.wishlist_rows.lock().unwrap().clone();
        let payload = match self.wishlist_wrapper.lock().unwrap().as_deref() {
            Some(key) => json!({ key: rows }),
            None => Value::Array(rows),
        };
        Ok(payload)
    }

    async fn add_wishlist_entry(
        &self,
        user: &UserId,
        item: &ItemId,
        added_at: DateTime<Utc>,
    ) -> AppResult<Value> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::rejected(500, "add failed"));
        }

        self.wishlist_rows.lock().unwrap().push(json!({
            "gameId": item.as_str(),
            "userId": user.as_str(),
            "addedAt": added_at.to_rfc3339(),
        }));
        Ok(json!({"message": "added"}))
    }

    async fn remove_wishlist_entry(&self, _user: &UserId, item: &ItemId) -> AppResult<Value> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(Self::rejected(500, "remove failed"));
        }

        self.wishlist_rows
            .lock()
            .unwrap()
            .retain(|row| resolve_entry_item_id(row).as_ref() != Some(item));
        Ok(json!({"message": "removed"}))
    }
}
