// src/services/identity_resolver.rs
//
// Resolution of the current user's id.
//
// The backend's login response is not guaranteed to include `user.id`, so
// a fallback chain exists, ordered from free to expensive:
//   1. the direct field on the stored user record
//   2. the bearer token's JWT claims
//   3. a full remote user-list fetch matched by username or email
// Step 3 is O(n) over all users and must only run when 1 and 2 both miss.

use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use serde_json::Value;
use std::sync::Arc;

use crate::domain::{AuthSession, UserId};
use crate::error::AppResult;
use crate::integrations::backend::shapes::{field_ci, normalize_list_payload, normalize_user};
use crate::integrations::BackendApi;

/// Claim names tried, in order, when scraping the token payload.
const ID_CLAIMS: [&str; 5] = ["sub", "nameid", "userId", "uid", "id"];

pub struct IdentityResolver {
    backend: Arc<dyn BackendApi>,
}

impl IdentityResolver {
    pub fn new(backend: Arc<dyn BackendApi>) -> Self {
        Self { backend }
    }

    /// Resolve the session's user id, or `Ok(None)` when no step in the
    /// chain can produce one. The remote fallback degrades to `None` on
    /// failure instead of erroring: identity resolution is a read path.
    pub async fn resolve_user_id(&self, session: &AuthSession) -> AppResult<Option<UserId>> {
        if let Some(id) = session.user.as_ref().and_then(|user| user.id.clone()) {
            return Ok(Some(id));
        }

        if let Some(id) = session.token.as_deref().and_then(claims_user_id) {
            return Ok(Some(id));
        }

        self.resolve_via_user_list(session).await
    }

    /// Last resort: fetch every user and match by username or email,
    /// case-insensitively.
    async fn resolve_via_user_list(&self, session: &AuthSession) -> AppResult<Option<UserId>> {
        let Some(user) = session.user.as_ref() else {
            return Ok(None);
        };

        let username = user.username.as_deref().map(str::to_lowercase);
        let email = user.email.as_deref().map(str::to_lowercase);
        if username.is_none() && email.is_none() {
            return Ok(None);
        }

        let payload = match self.backend.list_users().await {
            Ok(payload) => payload,
            Err(e) => {
                log::warn!("user-list identity fallback failed: {}", e);
                return Ok(None);
            }
        };

        let raw_users = match normalize_list_payload(&payload, &["data", "users"]) {
            Ok(raw) => raw,
            Err(e) => {
                log::warn!("unrecognized user-list payload: {}", e);
                return Ok(None);
            }
        };

        for raw in &raw_users {
            let candidate = normalize_user(raw);
            let username_match = match (&username, &candidate.username) {
                (Some(needle), Some(have)) => needle == &have.to_lowercase(),
                _ => false,
            };
            let email_match = match (&email, &candidate.email) {
                (Some(needle), Some(have)) => needle == &have.to_lowercase(),
                _ => false,
            };

            if username_match || email_match {
                if let Some(id) = candidate.id {
                    return Ok(Some(id));
                }
            }
        }

        Ok(None)
    }
}

/// Pull a user id out of a bearer token's claims, trying the known claim
/// names in order. Returns `None` for anything that does not decode as a
/// JWT - corrupted tokens are an expected input here, not an error.
pub(crate) fn claims_user_id(token: &str) -> Option<UserId> {
    let claims = decode_claims(token)?;
    for claim in ID_CLAIMS {
        if let Some(id) = field_ci(&claims, &[claim]).and_then(UserId::from_value) {
            return Some(id);
        }
    }
    None
}

/// Decode the payload segment of a JWT without verifying the signature.
/// The client has no verification key; the claims are only a hint for
/// identity resolution, never an authorization decision.
pub(crate) fn decode_claims(token: &str) -> Option<Value> {
    let mut segments = token.split('.');
    let _header = segments.next()?;
    let payload = segments.next()?;

    let bytes = URL_SAFE_NO_PAD.decode(payload.trim_end_matches('=')).ok()?;
    let claims: Value = serde_json::from_slice(&bytes).ok()?;
    claims.is_object().then_some(claims)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UserRecord;
    use crate::services::test_support::FakeBackend;
    use serde_json::json;

    /// Build an unsigned JWT-looking token with the given claims object.
    fn token_with_claims(claims: Value) -> String {
        let header = URL_SAFE_NO_PAD.encode(br#"{"alg":"none"}"#);
        let payload = URL_SAFE_NO_PAD.encode(claims.to_string().as_bytes());
        format!("{}.{}.sig", header, payload)
    }

    #[test]
    fn test_decode_claims_roundtrip() {
        let token = token_with_claims(json!({"sub": "u1", "exp": 1}));
        let claims = decode_claims(&token).unwrap();
        assert_eq!(claims["sub"], "u1");
    }

    #[test]
    fn test_claims_chain_order() {
        // `sub` wins over later claim names.
        let token = token_with_claims(json!({"id": "later", "sub": "first"}));
        assert_eq!(claims_user_id(&token).unwrap().as_str(), "first");

        // Numeric claim values normalize too.
        let token = token_with_claims(json!({"nameid": 42}));
        assert_eq!(claims_user_id(&token).unwrap().as_str(), "42");
    }

    #[test]
    fn test_corrupt_token_resolves_to_none() {
        assert!(claims_user_id("not-a-jwt").is_none());
        assert!(claims_user_id("a.b!!!.c").is_none());
        assert!(claims_user_id("").is_none());
    }

    #[tokio::test]
    async fn test_direct_field_short_circuits() {
        let backend = Arc::new(FakeBackend::new());
        let resolver = IdentityResolver::new(backend.clone());

        let session = AuthSession::authenticated(
            "garbage-token".into(),
            UserRecord {
                id: Some(UserId::new("u1")),
                ..Default::default()
            },
        );

        let id = resolver.resolve_user_id(&session).await.unwrap();
        assert_eq!(id.unwrap().as_str(), "u1");
        assert_eq!(backend.list_users_calls(), 0);
    }

    #[tokio::test]
    async fn test_token_claims_beat_remote_lookup() {
        let backend = Arc::new(FakeBackend::new());
        let resolver = IdentityResolver::new(backend.clone());

        let session = AuthSession::authenticated(
            token_with_claims(json!({"sub": "u9"})),
            UserRecord {
                username: Some("ann".into()),
                ..Default::default()
            },
        );

        let id = resolver.resolve_user_id(&session).await.unwrap();
        assert_eq!(id.unwrap().as_str(), "u9");
        assert_eq!(backend.list_users_calls(), 0);
    }

    #[tokio::test]
    async fn test_remote_fallback_matches_email_case_insensitively() {
        let backend = Arc::new(FakeBackend::new());
        backend.set_users(json!([
            {"id": 1, "username": "bob", "email": "bob@shop.test"},
            {"id": 2, "username": "ann", "email": "Ann@Shop.Test"},
        ]));
        let resolver = IdentityResolver::new(backend.clone());

        let session = AuthSession::authenticated(
            "opaque-token".into(),
            UserRecord {
                email: Some("ann@shop.test".into()),
                ..Default::default()
            },
        );

        let id = resolver.resolve_user_id(&session).await.unwrap();
        assert_eq!(id.unwrap().as_str(), "2");
        assert_eq!(backend.list_users_calls(), 1);
    }

    #[tokio::test]
    async fn test_unresolvable_identity_is_none_not_error() {
        let backend = Arc::new(FakeBackend::new());
        backend.fail_reads();
        let resolver = IdentityResolver::new(backend);

        let session = AuthSession::authenticated(
            "opaque-token".into(),
            UserRecord {
                username: Some("ghost".into()),
                ..Default::default()
            },
        );

        assert!(resolver.resolve_user_id(&session).await.unwrap().is_none());
    }
}
