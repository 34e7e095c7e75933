// src/services/auth_service.rs
//
// Session lifecycle: login, signup, logout, purge, hydrate.
//
// POLICY:
// - Auth failures are never swallowed: the user must know a login failed
// - Logout clears local state even when the remote call fails; a user is
//   never stuck "logged in" because the server is unreachable
// - A session counts as authenticated only once token and user have been
//   persisted to the durable store

use serde_json::Value;
use std::sync::{Arc, RwLock};

use crate::domain::{AuthSession, DomainError, UserRecord};
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, SessionCleared, SessionEstablished};
use crate::integrations::backend::shapes::{self, field_ci, LoginShape};
use crate::integrations::{BackendApi, SignupPayload};
use crate::repositories::{session_keys, SessionRepository, StoreNamespace};

#[derive(Debug, Clone)]
pub struct SignupRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    pub confirm_password: String,
}

/// Acknowledgement of a successful signup. No session is established;
/// the caller logs in separately.
#[derive(Debug, Clone)]
pub struct SignupAck {
    pub message: Option<String>,
}

pub struct AuthService {
    backend: Arc<dyn BackendApi>,
    session_repo: Arc<dyn SessionRepository>,
    event_bus: Arc<EventBus>,
    session: RwLock<AuthSession>,
}

impl AuthService {
    pub fn new(
        backend: Arc<dyn BackendApi>,
        session_repo: Arc<dyn SessionRepository>,
        event_bus: Arc<EventBus>,
    ) -> Self {
        Self {
            backend,
            session_repo,
            event_bus,
            session: RwLock::new(AuthSession::anonymous()),
        }
    }

    pub fn current_session(&self) -> AuthSession {
        self.session.read().unwrap().clone()
    }

    /// Repopulate the in-memory session from the durable store at
    /// startup. A corrupted stored user record triggers a purge rather
    /// than an error: stale state must never block the app from starting.
    pub fn hydrate(&self) -> AppResult<AuthSession> {
        let token = self
            .session_repo
            .get(StoreNamespace::User, session_keys::TOKEN)?;
        let user_json = self
            .session_repo
            .get(StoreNamespace::User, session_keys::USER)?;

        match (token, user_json) {
            (Some(token), Some(user_json)) => match serde_json::from_str::<UserRecord>(&user_json)
            {
                Ok(user) => {
                    self.backend.set_bearer(Some(token.clone()));
                    let session = AuthSession::authenticated(token, user);
                    *self.session.write().unwrap() = session.clone();
                    Ok(session)
                }
                Err(e) => {
                    log::warn!("stored user record is corrupt, purging session: {}", e);
                    self.purge_auth()?;
                    Ok(AuthSession::anonymous())
                }
            },
            (None, None) => Ok(AuthSession::anonymous()),
            // One half of the pair is missing: stale state, clear it.
            _ => {
                log::warn!("incomplete stored session, purging");
                self.purge_auth()?;
                Ok(AuthSession::anonymous())
            }
        }
    }

    pub async fn login(&self, username_or_email: &str, password: &str) -> AppResult<AuthSession> {
        let payload = self.backend.login(username_or_email, password).await?;

        let refresh = shapes::refresh_token(&payload);
        let (token, user) = LoginShape::classify(payload).into_session_parts()?;

        // Persist before flipping the in-memory state; is_authenticated
        // means "persisted", not "seen a token once".
        self.session_repo
            .put(StoreNamespace::User, session_keys::TOKEN, &token)?;
        self.session_repo.put(
            StoreNamespace::User,
            session_keys::USER,
            &serde_json::to_string(&user)?,
        )?;
        if let Some(refresh) = refresh {
            self.session_repo.put(
                StoreNamespace::User,
                session_keys::REFRESH_TOKEN,
                &refresh,
            )?;
        }

        self.backend.set_bearer(Some(token.clone()));

        let session = AuthSession::authenticated(token, user.clone());
        *self.session.write().unwrap() = session.clone();

        self.event_bus
            .emit(SessionEstablished::new(user.id, user.username));

        Ok(session)
    }

    pub async fn signup(&self, request: SignupRequest) -> AppResult<SignupAck> {
        if request.password != request.confirm_password {
            return Err(AppError::Domain(DomainError::InvariantViolation(
                "Passwords do not match".to_string(),
            )));
        }

        let payload = self
            .backend
            .signup(&SignupPayload {
                username: request.username,
                email: request.email,
                password: request.password,
                confirm_password: request.confirm_password,
            })
            .await?;

        let message = field_ci(&payload, &["message"])
            .and_then(Value::as_str)
            .map(str::to_string);

        Ok(SignupAck { message })
    }

    /// Best-effort remote invalidation, then an unconditional local
    /// clear. Always leaves the session anonymous.
    pub async fn logout(&self) -> AuthSession {
        if self.current_session().is_authenticated {
            if let Err(e) = self.backend.logout().await {
                log::warn!("remote logout failed (ignored): {}", e);
            }
        }

        if let Err(e) = self.clear_local("logout") {
            log::error!("failed to clear local session store: {}", e);
        }

        AuthSession::anonymous()
    }

    /// Local-only hard reset; recovery path for corrupted/stale tokens.
    pub fn purge_auth(&self) -> AppResult<()> {
        self.clear_local("purge")
    }

    fn clear_local(&self, reason: &str) -> AppResult<()> {
        self.session_repo.clear(StoreNamespace::User)?;
        self.backend.set_bearer(None);
        *self.session.write().unwrap() = AuthSession::anonymous();
        self.event_bus.emit(SessionCleared::new(reason));
        Ok(())
    }
}
