// src/domain/session/mod.rs

pub mod entity;

pub use entity::{AuthSession, UserRecord};
