// src/domain/wishlist/entity.rs
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::{CatalogItem, ItemId, UserId};

/// A saved item on a user's wishlist, enriched with full catalog data.
///
/// Unique per `(user_id, id)` pair. The raw backend record may carry only
/// the bare identifiers; the enrichment join happens in the wishlist
/// service before an entry of this type ever exists. A wishlist has no
/// meaning without an authenticated owner.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WishlistEntry {
    pub id: ItemId,
    pub user_id: UserId,
    pub added_at: DateTime<Utc>,
    pub item: CatalogItem,
}

impl WishlistEntry {
    pub fn new(user_id: UserId, added_at: DateTime<Utc>, item: CatalogItem) -> Self {
        Self {
            id: item.id.clone(),
            user_id,
            added_at,
            item,
        }
    }
}
