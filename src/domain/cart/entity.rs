// src/domain/cart/entity.rs
use serde::{Deserialize, Serialize};

use crate::domain::ItemId;

/// A single line item in the cart.
///
/// At most one line exists per item id; repeated adds merge into the
/// existing line. Quantity never falls below 1 - removal deletes the
/// line instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartLine {
    pub id: ItemId,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
    pub image: String,
}

impl CartLine {
    pub fn new(id: ItemId, name: impl Into<String>, unit_price: f64, image: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            unit_price,
            quantity: 1,
            image: image.into(),
        }
    }

    pub fn with_quantity(mut self, quantity: u32) -> Self {
        self.quantity = quantity.max(1);
        self
    }

    pub fn line_total(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }
}

/// The cart as a whole: a normalized collection of lines plus derived totals.
///
/// Totals are recomputed on every transition and are never mutated
/// independently of the lines they summarize. The cart lives only in
/// memory for the duration of a session; it is not tied to a user identity
/// (anonymous carts are allowed).
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CartState {
    pub lines: Vec<CartLine>,
    pub total_quantity: u32,
    pub total_amount: f64,
}

impl CartState {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn line(&self, id: &ItemId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.id == id)
    }

    pub fn contains(&self, id: &ItemId) -> bool {
        self.line(id).is_some()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Rebuild the derived totals from the lines.
    pub(crate) fn with_recomputed_totals(mut self) -> Self {
        self.total_quantity = self.lines.iter().map(|line| line.quantity).sum();
        self.total_amount = self.lines.iter().map(CartLine::line_total).sum();
        self
    }
}
