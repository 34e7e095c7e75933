// src/domain/cart/invariants.rs
use std::collections::HashSet;

use super::entity::CartState;
use crate::domain::{DomainError, DomainResult};

/// Validates all cart invariants
/// These are the absolute rules that must hold for a CartState to be valid
pub fn validate_cart(cart: &CartState) -> DomainResult<()> {
    validate_unique_lines(cart)?;
    validate_quantities(cart)?;
    validate_prices(cart)?;
    validate_totals(cart)?;
    Ok(())
}

/// At most one line per item id
fn validate_unique_lines(cart: &CartState) -> DomainResult<()> {
    let mut seen = HashSet::new();
    for line in &cart.lines {
        if !seen.insert(line.id.as_str()) {
            return Err(DomainError::InvariantViolation(format!(
                "Duplicate cart line for item {}",
                line.id
            )));
        }
    }
    Ok(())
}

/// Quantity never falls below 1
fn validate_quantities(cart: &CartState) -> DomainResult<()> {
    for line in &cart.lines {
        if line.quantity < 1 {
            return Err(DomainError::InvariantViolation(format!(
                "Cart line {} has quantity {}",
                line.id, line.quantity
            )));
        }
    }
    Ok(())
}

/// Unit price must not be negative
fn validate_prices(cart: &CartState) -> DomainResult<()> {
    for line in &cart.lines {
        if line.unit_price < 0.0 {
            return Err(DomainError::InvariantViolation(format!(
                "Cart line {} has negative price {}",
                line.id, line.unit_price
            )));
        }
    }
    Ok(())
}

/// Totals must equal the sums derived from the lines
fn validate_totals(cart: &CartState) -> DomainResult<()> {
    let quantity: u32 = cart.lines.iter().map(|line| line.quantity).sum();
    let amount: f64 = cart
        .lines
        .iter()
        .map(|line| line.unit_price * line.quantity as f64)
        .sum();

    if cart.total_quantity != quantity {
        return Err(DomainError::InvariantViolation(format!(
            "total_quantity {} does not match line sum {}",
            cart.total_quantity, quantity
        )));
    }
    if (cart.total_amount - amount).abs() > 1e-9 {
        return Err(DomainError::InvariantViolation(format!(
            "total_amount {} does not match line sum {}",
            cart.total_amount, amount
        )));
    }
    Ok(())
}
