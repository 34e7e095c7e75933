// src/domain/wishlist/invariants.rs
use std::collections::HashSet;

use super::entity::WishlistEntry;
use crate::domain::{DomainError, DomainResult};

/// Validates wishlist invariants over the full collection
pub fn validate_wishlist(entries: &[WishlistEntry]) -> DomainResult<()> {
    validate_unique_per_user(entries)?;
    validate_ids_match_items(entries)?;
    Ok(())
}

/// Unique by (user_id, item id) pair
fn validate_unique_per_user(entries: &[WishlistEntry]) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for entry in entries {
        if !seen.insert((entry.user_id.as_str(), entry.id.as_str())) {
            return Err(DomainError::InvariantViolation(format!(
                "Duplicate wishlist entry for user {} item {}",
                entry.user_id, entry.id
            )));
        }
    }
    Ok(())
}

/// An entry's id always matches the catalog item it resolved to
fn validate_ids_match_items(entries: &[WishlistEntry]) -> DomainResult<()> {
    for entry in entries {
        if entry.id != entry.item.id {
            return Err(DomainError::InvariantViolation(format!(
                "Wishlist entry id {} does not match resolved item id {}",
                entry.id, entry.item.id
            )));
        }
    }
    Ok(())
}
