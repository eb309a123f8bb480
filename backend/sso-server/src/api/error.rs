//! REST API error types
//!
//! Every error renders as `{"error": {"code", "message", "field"?}}` with a
//! matching status code. Storage details stay in the log.

use crate::OAuthError;

use sso_core::StoreError;
use sso_db::DbError;
use sso_link::LinkError;

use std::panic::Location;

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use error_location::ErrorLocation;
use serde::Serialize;
use thiserror::Error;

/// JSON error response body
#[derive(Debug, Serialize)]
pub struct ApiErrorResponse {
    pub error: ApiErrorBody,
}

#[derive(Debug, Serialize)]
pub struct ApiErrorBody {
    /// Machine-readable error code (e.g., "NOT_FOUND", "REGISTRATION_DISABLED")
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub field: Option<String>,
}

/// API errors with associated HTTP status codes
#[derive(Debug, Error)]
pub enum ApiError {
    /// 400
    #[error("Bad request: {message} {location}")]
    BadRequest {
        message: String,
        field: Option<String>,
        location: ErrorLocation,
    },

    /// 401
    #[error("Unauthorized: {message} {location}")]
    Unauthorized {
        message: String,
        location: ErrorLocation,
    },

    /// 403
    #[error("Forbidden: {message} {location}")]
    Forbidden {
        message: String,
        location: ErrorLocation,
    },

    /// 403, the provider may not create new accounts
    #[error("Registration disabled: {message} {location}")]
    RegistrationDisabled {
        message: String,
        location: ErrorLocation,
    },

    /// 404
    #[error("Resource not found: {message} {location}")]
    NotFound {
        message: String,
        location: ErrorLocation,
    },

    /// 409, lost a race; the client may retry the whole request
    #[error("Conflict: {message} {location}")]
    Conflict {
        message: String,
        location: ErrorLocation,
    },

    /// 500
    #[error("Internal error: {message} {location}")]
    Internal {
        message: String,
        location: ErrorLocation,
    },

    /// 502, the identity provider failed or was unreachable
    #[error("Provider error: {message} {location}")]
    BadGateway {
        message: String,
        location: ErrorLocation,
    },

    /// 503, a transient backend failure; the client may retry
    #[error("Service unavailable: {message} {location}")]
    Unavailable {
        message: String,
        location: ErrorLocation,
    },
}

impl ApiError {
    #[track_caller]
    pub fn bad_request<S: Into<String>>(message: S, field: Option<&str>) -> Self {
        ApiError::BadRequest {
            message: message.into(),
            field: field.map(str::to_string),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn not_found<S: Into<String>>(message: S) -> Self {
        ApiError::NotFound {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn unauthorized<S: Into<String>>(message: S) -> Self {
        ApiError::Unauthorized {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn forbidden<S: Into<String>>(message: S) -> Self {
        ApiError::Forbidden {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    #[track_caller]
    pub fn internal<S: Into<String>>(message: S) -> Self {
        ApiError::Internal {
            message: message.into(),
            location: ErrorLocation::from(Location::caller()),
        }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden { .. } | ApiError::RegistrationDisabled { .. } => {
                StatusCode::FORBIDDEN
            }
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Conflict { .. } => StatusCode::CONFLICT,
            ApiError::Internal { .. } => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::BadGateway { .. } => StatusCode::BAD_GATEWAY,
            ApiError::Unavailable { .. } => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        if status.is_server_error() {
            log::error!("{}", self);
        } else {
            log::warn!("{}", self);
        }

        let (code, message, field) = match self {
            ApiError::BadRequest { message, field, .. } => ("BAD_REQUEST", message, field),
            ApiError::Unauthorized { message, .. } => ("UNAUTHORIZED", message, None),
            ApiError::Forbidden { message, .. } => ("FORBIDDEN", message, None),
            ApiError::RegistrationDisabled { message, .. } => {
                ("REGISTRATION_DISABLED", message, None)
            }
            ApiError::NotFound { message, .. } => ("NOT_FOUND", message, None),
            ApiError::Conflict { message, .. } => ("CONFLICT", message, None),
            ApiError::Internal { message, .. } => ("INTERNAL_ERROR", message, None),
            ApiError::BadGateway { message, .. } => ("PROVIDER_ERROR", message, None),
            ApiError::Unavailable { message, .. } => ("SERVICE_UNAVAILABLE", message, None),
        };

        let body = ApiErrorBody {
            code: code.into(),
            message,
            field,
        };

        (status, Json(ApiErrorResponse { error: body })).into_response()
    }
}

/// Convert linking errors to API errors. The linker has already logged them.
///
/// Retryable storage failures answer 503 so clients know to try again.
impl From<LinkError> for ApiError {
    #[track_caller]
    fn from(e: LinkError) -> Self {
        let location = ErrorLocation::from(Location::caller());
        let retryable = e.is_retryable();

        match e {
            LinkError::RegistrationDisabled { provider, .. } => ApiError::RegistrationDisabled {
                message: format!("Registration via {} SSO is disabled", provider),
                location,
            },
            LinkError::Duplicate { .. } => ApiError::Conflict {
                message: "An account with this email was just created, please retry".to_string(),
                location,
            },
            LinkError::InvalidIdentity { message, .. } => ApiError::BadRequest {
                message,
                field: Some("id".to_string()),
                location,
            },
            LinkError::Storage { .. } if retryable => ApiError::Unavailable {
                message: "Storage temporarily unavailable, please retry".to_string(),
                location,
            },
            LinkError::Storage { .. } => ApiError::Internal {
                message: "Storage operation failed".to_string(),
                location,
            },
        }
    }
}

/// Convert handshake failures. A refused code means the login itself is not
/// trusted; anything else is the provider's fault.
impl From<OAuthError> for ApiError {
    #[track_caller]
    fn from(e: OAuthError) -> Self {
        let location = ErrorLocation::from(Location::caller());

        match e {
            OAuthError::NotConfigured { .. } => ApiError::NotFound {
                message: "SSO login is not configured".to_string(),
                location,
            },
            OAuthError::InvalidCode { message, .. } => ApiError::Unauthorized { message, location },
            other => {
                log::error!("OAuth handshake failed: {}", other);
                ApiError::BadGateway {
                    message: "Identity provider request failed".to_string(),
                    location,
                }
            }
        }
    }
}

/// Convert store errors to API errors
impl From<StoreError> for ApiError {
    #[track_caller]
    fn from(e: StoreError) -> Self {
        log::error!("Store error: {}", e);
        ApiError::internal("Storage operation failed")
    }
}

/// Convert database errors to API errors
impl From<DbError> for ApiError {
    #[track_caller]
    fn from(e: DbError) -> Self {
        log::error!("Database error: {}", e);
        ApiError::internal("Database operation failed")
    }
}

pub type Result<T> = std::result::Result<T, ApiError>;
