// src/domain/ids.rs
//
// Identifier newtypes.
//
// The backend is not consistent about id representation: the same item id
// can arrive as a JSON number in one payload and a JSON string in another.
// Both newtypes normalize to a string form on deserialization so that
// lookups and joins compare reliably.

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Identifier of a purchasable catalog item.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemId(String);

/// Identifier of a storefront user.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct UserId(String);

impl ItemId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Accepts JSON strings and numbers; rejects everything else.
    pub fn from_value(value: &Value) -> Option<Self> {
        id_string_from_value(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// A well-formed id is non-empty after trimming.
    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn from_value(value: &Value) -> Option<Self> {
        id_string_from_value(value).map(Self)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_valid(&self) -> bool {
        !self.0.trim().is_empty()
    }
}

fn id_string_from_value(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

impl<'de> Deserialize<'de> for ItemId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        ItemId::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("item id must be a string or number"))
    }
}

impl<'de> Deserialize<'de> for UserId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        UserId::from_value(&value)
            .ok_or_else(|| serde::de::Error::custom("user id must be a string or number"))
    }
}

impl std::fmt::Display for ItemId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::fmt::Display for UserId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}
