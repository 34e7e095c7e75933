// src/application/mod.rs
//
// Application Layer
//
// ARCHITECTURE:
// - This layer sits ABOVE the domain and services
// - It owns composition: one `AppState` wires the pool, repositories,
//   backend client and services together
// - It translates internal errors into UI-facing responses
// - It never reaches around the services into repositories

pub mod error_handling;
pub mod state;

pub use error_handling::{ErrorResponse, ErrorType, ToErrorResponse};
pub use state::AppState;
