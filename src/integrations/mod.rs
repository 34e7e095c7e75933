// src/integrations/mod.rs
//
// External collaborators.
//
// CRITICAL RULES:
// - This is INFRASTRUCTURE, not DOMAIN
// - Never creates or modifies domain entities directly beyond mapping
// - Returns normalized data that services can consume
// - Handles all external API concerns

pub mod backend;

pub use backend::{BackendApi, BackendConfig, RestBackendClient, SignupPayload};
