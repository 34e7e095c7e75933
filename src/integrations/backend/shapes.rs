// src/integrations/backend/shapes.rs
//
// Normalization of the backend's inconsistent payload shapes.
//
// The REST backend is tolerated as-is: the same endpoint can answer with
// different wrappers, field names and casings depending on which code path
// served it. Everything the rest of the crate consumes goes through the
// tagged unions and normalizers in this module, so duck-typing checks do
// not leak anywhere else. Shapes that match nothing classify as Unknown
// and fail loudly instead of being half-parsed.

use chrono::{DateTime, Utc};
use serde_json::Value;

use crate::domain::{CatalogItem, ItemId, UserId, UserRecord};
use crate::error::{AppError, AppResult};

/// Case-insensitive object field lookup.
///
/// Backend field casing is unreliable (`gameId` vs `GameId`), so every
/// read goes through this instead of indexing directly.
pub(crate) fn field_ci<'a>(value: &'a Value, names: &[&str]) -> Option<&'a Value> {
    let obj = value.as_object()?;
    for name in names {
        for (key, field) in obj {
            if key.eq_ignore_ascii_case(name) {
                return Some(field);
            }
        }
    }
    None
}

fn string_field(value: &Value, names: &[&str]) -> Option<String> {
    match field_ci(value, names)? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}

fn number_field(value: &Value, names: &[&str]) -> Option<f64> {
    match field_ci(value, names)? {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

/// Short, safe description of a payload for error messages.
fn describe(value: &Value) -> String {
    let mut text = value.to_string();
    if text.len() > 200 {
        text.truncate(200);
        text.push_str("...");
    }
    text
}

// ============================================================================
// LOGIN RESPONSES
// ============================================================================

/// The three login payload shapes the backend is known to produce, plus
/// the loud failure variants.
#[derive(Debug, Clone)]
pub enum LoginShape {
    /// `{ token: "...", user: {...} }`
    TokenWithUser { token: String, user: Value },
    /// `{ accessToken: "...", user: {...} }`
    AccessTokenWithUser { token: String, user: Value },
    /// `{ token: "...", userId: 42, username: "..." }` - user fields flat
    /// on the response object.
    FlatToken { token: String, fields: Value },
    /// An otherwise plausible login body with no token anywhere.
    MissingToken(Value),
    /// Matches nothing this client knows about.
    Unknown(Value),
}

impl LoginShape {
    pub fn classify(payload: Value) -> Self {
        if !payload.is_object() {
            return LoginShape::Unknown(payload);
        }

        let user = field_ci(&payload, &["user"]).filter(|v| v.is_object()).cloned();
        let token = string_field(&payload, &["token"]);
        let access_token = string_field(&payload, &["accessToken", "access_token"]);

        match (user, token, access_token) {
            (Some(user), Some(token), _) => LoginShape::TokenWithUser { token, user },
            (Some(user), None, Some(token)) => LoginShape::AccessTokenWithUser { token, user },
            (None, Some(token), _) | (None, None, Some(token)) => LoginShape::FlatToken {
                token,
                fields: payload,
            },
            (Some(_), None, None) => LoginShape::MissingToken(payload),
            (None, None, None) => {
                let user_ish = field_ci(&payload, &["userId", "username", "email"]).is_some();
                if user_ish {
                    LoginShape::MissingToken(payload)
                } else {
                    LoginShape::Unknown(payload)
                }
            }
        }
    }

    /// Collapse a classified shape into the single normalized form the
    /// session layer stores.
    pub fn into_session_parts(self) -> AppResult<(String, UserRecord)> {
        match self {
            LoginShape::TokenWithUser { token, user }
            | LoginShape::AccessTokenWithUser { token, user } => Ok((token, normalize_user(&user))),
            LoginShape::FlatToken { token, fields } => Ok((token, normalize_user(&fields))),
            LoginShape::MissingToken(_) => Err(AppError::MissingToken),
            LoginShape::Unknown(payload) => {
                Err(AppError::InvalidResponseFormat(describe(&payload)))
            }
        }
    }
}

/// Extract a refresh token if the login payload carried one.
pub fn refresh_token(payload: &Value) -> Option<String> {
    string_field(payload, &["refreshToken", "refresh_token"])
}

/// Map an arbitrary user-shaped object into the normalized record.
pub fn normalize_user(value: &Value) -> UserRecord {
    let id = field_ci(value, &["id", "userId", "uid", "_id"]).and_then(UserId::from_value);
    let username = string_field(value, &["username", "userName", "name"]);
    let email = string_field(value, &["email"]);

    UserRecord {
        id,
        username,
        email,
        extra: value.clone(),
    }
}

// ============================================================================
// LIST RESPONSES
// ============================================================================

/// Unwrap a list payload that may arrive bare, or wrapped under one of
/// the given keys.
pub fn normalize_list_payload(payload: &Value, wrappers: &[&str]) -> AppResult<Vec<Value>> {
    if let Some(items) = payload.as_array() {
        return Ok(items.clone());
    }

    if let Some(inner) = field_ci(payload, wrappers) {
        if let Some(items) = inner.as_array() {
            return Ok(items.clone());
        }
    }

    Err(AppError::InvalidResponseFormat(describe(payload)))
}

/// Wishlist payloads arrive bare, `data`-wrapped or `games`-wrapped.
pub fn normalize_wishlist_payload(payload: &Value) -> AppResult<Vec<Value>> {
    normalize_list_payload(payload, &["data", "games"])
}

// ============================================================================
// WISHLIST ENTRIES
// ============================================================================

/// Resolve the item id of a raw wishlist entry across known field casings.
pub fn resolve_entry_item_id(entry: &Value) -> Option<ItemId> {
    field_ci(entry, &["gameId", "GameId", "id", "itemId"]).and_then(ItemId::from_value)
}

/// Parse the entry's added-at timestamp when present and well-formed.
pub fn entry_added_at(entry: &Value) -> Option<DateTime<Utc>> {
    let raw = string_field(entry, &["addedAt", "added_at"])?;
    DateTime::parse_from_rfc3339(&raw)
        .ok()
        .map(|dt| dt.with_timezone(&Utc))
}

/// Heuristic: an entry that already carries a title and an image field
/// embeds full item data and needs no catalog join.
pub fn entry_as_full_item(entry: &Value) -> Option<CatalogItem> {
    let has_title = string_field(entry, &["title", "name"]).is_some();
    let has_image = field_ci(
        entry,
        &["image", "imageUrl", "imageRef", "cover", "background_image"],
    )
    .is_some();

    if has_title && has_image {
        normalize_catalog_item(entry)
    } else {
        None
    }
}

/// Map a raw item-shaped object into a CatalogItem. Requires a resolvable
/// id and a title; everything else is optional.
pub fn normalize_catalog_item(value: &Value) -> Option<CatalogItem> {
    let id = resolve_entry_item_id(value)?;
    let title = string_field(value, &["title", "name"])?;

    Some(CatalogItem {
        id,
        title,
        genre: string_field(value, &["genre", "category"]),
        price: number_field(value, &["price"]).unwrap_or(0.0),
        image: string_field(
            value,
            &["image", "imageUrl", "imageRef", "cover", "background_image"],
        ),
        rating: number_field(value, &["rating"]),
        platforms: field_ci(value, &["platforms"])
            .and_then(Value::as_array)
            .map(|values| {
                values
                    .iter()
                    .filter_map(|v| v.as_str().map(str::to_string))
                    .collect()
            })
            .unwrap_or_default(),
    })
}
