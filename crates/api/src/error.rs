// Copyright (C) 2026 Fred Clausen
// Use of this source code is governed by an MIT-style
// license that can be found in the LICENSE file or at
// https://opensource.org/licenses/MIT.

//! Error types for the API layer.

use cinema_domain::DomainError;
use thiserror::Error;

/// Authorization errors raised before any request is sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthError {
    /// The identity's role does not permit the action.
    Unauthorized {
        /// The action that was attempted.
        action: String,
        /// The role required for this action.
        required_role: String,
    },
    /// The role string is not recognized.
    UnknownRole(String),
}

impl std::fmt::Display for AuthError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Unauthorized {
                action,
                required_role,
            } => {
                write!(f, "Unauthorized: '{action}' requires {required_role} role")
            }
            Self::UnknownRole(role) => write!(f, "Unknown role '{role}'"),
        }
    }
}

impl std::error::Error for AuthError {}

/// Failures talking to the cinema API.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum GatewayError {
    /// The token is missing or expired (HTTP 401).
    #[error("authentication expired")]
    Unauthorized,

    /// The resource does not exist (HTTP 404).
    #[error("{resource} not found")]
    NotFound { resource: String },

    /// The API refused the request (HTTP 400).
    #[error("request rejected: {message}")]
    Rejected { message: String },

    /// Any other non-success status.
    #[error("unexpected status {status} from {resource}")]
    Status { status: u16, resource: String },

    /// The request never produced a response.
    #[error("transport error: {0}")]
    Transport(String),

    /// The response body did not match the expected shape.
    #[error("failed to decode {resource}: {message}")]
    Decode { resource: String, message: String },

    /// The configured base URL cannot be used.
    #[error("invalid base URL '{0}'")]
    InvalidBaseUrl(String),
}

impl GatewayError {
    /// Returns true for the authentication-expired outcome.
    #[must_use]
    pub const fn is_unauthorized(&self) -> bool {
        matches!(self, Self::Unauthorized)
    }
}

/// Outcome of a refused or failed booking cancellation.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum CancelError {
    /// Refused locally: the booking is not active or starts within the hour.
    #[error("booking {booking_id} can no longer be cancelled")]
    NotCancellable { booking_id: i64 },

    /// The API reports the cancellation window has closed (HTTP 400).
    #[error("the cancellation window has closed")]
    WindowClosed,

    /// The booking does not exist (HTTP 404).
    #[error("booking not found")]
    NotFound,

    /// Authentication expired (HTTP 401); the caller should log out.
    #[error("authentication expired")]
    AuthExpired,

    /// Any other failure.
    #[error("cancellation failed: {0}")]
    Failed(GatewayError),
}

impl From<GatewayError> for CancelError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => Self::AuthExpired,
            GatewayError::NotFound { .. } => Self::NotFound,
            GatewayError::Rejected { .. } => Self::WindowClosed,
            other => Self::Failed(other),
        }
    }
}

/// Failures of administrative actions (session deletion, new directors).
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AdminError {
    /// The identity may not perform the action.
    #[error(transparent)]
    Forbidden(#[from] AuthError),

    /// The session's status forbids the action.
    #[error("{reason}")]
    Refused { reason: &'static str },

    /// The submitted form is invalid.
    #[error(transparent)]
    Invalid(#[from] DomainError),

    /// The target does not exist (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Authentication expired (HTTP 401); the caller should log out.
    #[error("authentication expired")]
    AuthExpired,

    /// Any other failure.
    #[error("request failed: {0}")]
    Failed(GatewayError),
}

impl From<GatewayError> for AdminError {
    fn from(err: GatewayError) -> Self {
        match err {
            GatewayError::Unauthorized => Self::AuthExpired,
            GatewayError::NotFound { .. } => Self::NotFound,
            other => Self::Failed(other),
        }
    }
}
