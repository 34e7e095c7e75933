// src/domain/cart/reducer.rs
//
// Pure cart state transitions.
//
// CRITICAL RULES:
// - No I/O, no side effects: input state + action -> new state
// - Operations on an unknown id are silent no-ops, never errors;
//   UI code depends on idempotent retries
// - A line's quantity never reaches 0: decreasing below 1 removes it

use serde::{Deserialize, Serialize};

use super::entity::{CartLine, CartState};
use crate::domain::ItemId;

/// All state transitions the cart supports.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum CartAction {
    /// Insert a new line, or merge quantities into an existing line with
    /// the same id.
    AddToCart(CartLine),
    /// Bump the matching line's quantity by one.
    IncreaseQuantity(ItemId),
    /// Drop the matching line's quantity by one; at quantity 1 the line
    /// is removed entirely.
    DecreaseQuantity(ItemId),
    /// Delete the line unconditionally.
    RemoveFromCart(ItemId),
    /// Empty the cart (used by the simulated checkout).
    ClearCart,
}

impl CartState {
    /// Apply a single action, producing the next state.
    pub fn apply(&self, action: CartAction) -> CartState {
        let mut next = self.clone();

        match action {
            CartAction::AddToCart(incoming) => {
                let quantity = incoming.quantity.max(1);
                match next.lines.iter_mut().find(|line| line.id == incoming.id) {
                    Some(existing) => existing.quantity += quantity,
                    None => next.lines.push(CartLine { quantity, ..incoming }),
                }
            }
            CartAction::IncreaseQuantity(id) => {
                if let Some(line) = next.lines.iter_mut().find(|line| line.id == id) {
                    line.quantity += 1;
                }
            }
            CartAction::DecreaseQuantity(id) => {
                if let Some(index) = next.lines.iter().position(|line| line.id == id) {
                    if next.lines[index].quantity > 1 {
                        next.lines[index].quantity -= 1;
                    } else {
                        next.lines.remove(index);
                    }
                }
            }
            CartAction::RemoveFromCart(id) => {
                next.lines.retain(|line| line.id != id);
            }
            CartAction::ClearCart => {
                next.lines.clear();
            }
        }

        next.with_recomputed_totals()
    }
}
