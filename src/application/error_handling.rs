// src/application/error_handling.rs
//
// Error Handling for the UI boundary
//
// ARCHITECTURE:
// - Maps internal errors → user-friendly responses
// - Provides consistent error format for UI
// - Never exposes internal implementation details
// - Logs errors for debugging

use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Standard error response for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error_type: ErrorType,
    pub message: String,
    pub details: Option<String>,
}

/// Error categories for UI
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorType {
    /// No authenticated session (401)
    Authentication,

    /// Invalid input/validation error (400)
    Validation,

    /// Domain invariant violation (422)
    DomainError,

    /// The server rejected the request (4xx/5xx with a message)
    ServerRejected,

    /// Could not reach the backend at all
    Network,

    /// Local database/persistence error (500)
    Database,

    /// Resource not found (404)
    NotFound,

    /// Other/unknown error (500)
    Internal,
}

impl ErrorResponse {
    /// Create error response from AppError
    pub fn from_app_error(error: AppError) -> Self {
        match error {
            AppError::NotAuthenticated => Self {
                success: false,
                error_type: ErrorType::Authentication,
                message: "You must be logged in to do that".to_string(),
                details: None,
            },

            AppError::InvalidItem(details) => Self {
                success: false,
                error_type: ErrorType::Validation,
                message: "Invalid item".to_string(),
                details: Some(details),
            },

            AppError::MissingToken => Self {
                success: false,
                error_type: ErrorType::Authentication,
                message: "Login did not return a token".to_string(),
                details: None,
            },

            AppError::InvalidResponseFormat(details) => {
                log::error!("unrecognized backend response: {}", details);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "The server sent an unexpected response".to_string(),
                    details: None,
                }
            }

            AppError::ServerRejected { status, message } => Self {
                success: false,
                error_type: ErrorType::ServerRejected,
                message,
                details: Some(format!("HTTP {}", status)),
            },

            AppError::Network(net_error) => {
                log::warn!("network error: {:?}", net_error);

                Self {
                    success: false,
                    error_type: ErrorType::Network,
                    message: "Could not reach the server".to_string(),
                    details: None,
                }
            }

            AppError::NotFound => Self {
                success: false,
                error_type: ErrorType::NotFound,
                message: "Resource not found".to_string(),
                details: None,
            },

            AppError::Domain(domain_error) => Self {
                success: false,
                error_type: ErrorType::DomainError,
                message: domain_error.to_string(),
                details: None,
            },

            AppError::Database(db_error) => {
                log::error!("database error: {:?}", db_error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Local storage operation failed".to_string(),
                    details: Some("Check logs for details".to_string()),
                }
            }

            AppError::Pool(pool_error) => {
                log::error!("connection pool error: {}", pool_error);

                Self {
                    success: false,
                    error_type: ErrorType::Database,
                    message: "Local storage connection failed".to_string(),
                    details: None,
                }
            }

            AppError::Serialization(serde_error) => {
                log::error!("serialization error: {:?}", serde_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "Data serialization failed".to_string(),
                    details: None,
                }
            }

            AppError::Io(io_error) => {
                log::error!("io error: {:?}", io_error);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message: "File system operation failed".to_string(),
                    details: Some(io_error.to_string()),
                }
            }

            AppError::Other(message) => {
                log::error!("unexpected error: {}", message);

                Self {
                    success: false,
                    error_type: ErrorType::Internal,
                    message,
                    details: None,
                }
            }
        }
    }

    /// Create validation error
    pub fn validation(message: String) -> Self {
        Self {
            success: false,
            error_type: ErrorType::Validation,
            message,
            details: None,
        }
    }

    /// Create not found error
    pub fn not_found(resource: &str) -> Self {
        Self {
            success: false,
            error_type: ErrorType::NotFound,
            message: format!("{} not found", resource),
            details: None,
        }
    }
}

/// Helper trait to convert Results to ErrorResponse
pub trait ToErrorResponse<T> {
    fn to_error_response(self) -> Result<T, String>;
}

impl<T> ToErrorResponse<T> for Result<T, AppError> {
    fn to_error_response(self) -> Result<T, String> {
        self.map_err(|e| {
            let error_response = ErrorResponse::from_app_error(e);
            serde_json::to_string(&error_response)
                .unwrap_or_else(|_| "Internal error".to_string())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_authenticated_maps_to_authentication() {
        let error = ErrorResponse::from_app_error(AppError::NotAuthenticated);
        assert_eq!(error.error_type, ErrorType::Authentication);
        assert!(!error.success);
    }

    #[test]
    fn test_server_rejection_keeps_server_message() {
        let error = ErrorResponse::from_app_error(AppError::ServerRejected {
            status: 401,
            message: "Invalid credentials".to_string(),
        });
        assert_eq!(error.error_type, ErrorType::ServerRejected);
        assert_eq!(error.message, "Invalid credentials");
        assert_eq!(error.details.as_deref(), Some("HTTP 401"));
    }

    #[test]
    fn test_unrecognized_response_hides_internals() {
        let error = ErrorResponse::from_app_error(AppError::InvalidResponseFormat(
            "login payload: {\"weird\": true}".to_string(),
        ));
        assert_eq!(error.error_type, ErrorType::Internal);
        assert!(error.details.is_none());
    }

    #[test]
    fn test_validation_error() {
        let error = ErrorResponse::validation("Invalid input".to_string());
        assert_eq!(error.error_type, ErrorType::Validation);
        assert_eq!(error.message, "Invalid input");
    }

    #[test]
    fn test_serialization() {
        let error = ErrorResponse::not_found("Game");
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("not_found"));
        assert!(json.contains("Game not found"));
    }

    #[test]
    fn test_to_error_response_serializes() {
        let result: Result<(), AppError> = Err(AppError::NotFound);
        let err = result.to_error_response().unwrap_err();
        assert!(err.contains("not_found"));
    }
}
