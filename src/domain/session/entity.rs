// src/domain/session/entity.rs
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::domain::UserId;

/// The authenticated user as the backend describes them.
///
/// Deliberately loose: the login endpoint is inconsistent about which
/// fields it returns and how it names them, so everything beyond the
/// identity trio is carried verbatim in `extra`.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserRecord {
    pub id: Option<UserId>,
    pub username: Option<String>,
    pub email: Option<String>,
    #[serde(default)]
    pub extra: Value,
}

impl UserRecord {
    pub fn has_identity(&self) -> bool {
        self.id.is_some() || self.username.is_some() || self.email.is_some()
    }
}

/// The client-side session.
///
/// State machine: Anonymous -(login success)-> Authenticated
/// -(logout | purge | corruption)-> Anonymous. No intermediate states;
/// login failures leave the session untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct AuthSession {
    pub token: Option<String>,
    pub user: Option<UserRecord>,
    pub is_authenticated: bool,
}

impl AuthSession {
    pub fn anonymous() -> Self {
        Self::default()
    }

    /// `is_authenticated` is true iff both token and user are present.
    pub fn authenticated(token: String, user: UserRecord) -> Self {
        Self {
            token: Some(token),
            user: Some(user),
            is_authenticated: true,
        }
    }

    pub fn is_anonymous(&self) -> bool {
        !self.is_authenticated
    }
}
