// src/integrations/backend/mod.rs

pub mod client;
pub mod shapes;

pub use client::{BackendApi, BackendConfig, RestBackendClient, SignupPayload};
pub use shapes::LoginShape;
