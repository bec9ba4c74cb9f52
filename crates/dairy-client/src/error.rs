//! Backend call errors.

use dairy_commerce::CommerceError;
use dairy_data::FetchError;
use thiserror::Error;

/// Errors from backend calls.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Transport failure or non-2xx response.
    #[error(transparent)]
    Fetch(#[from] FetchError),

    /// The backend answered but did not accept the request.
    #[error("Rejected by backend: {}", .message.as_deref().unwrap_or("no message"))]
    Rejected { message: Option<String> },

    /// No session token is available.
    #[error("Not authenticated: no session token")]
    MissingAuth,

    /// The request could not be built from local state.
    #[error(transparent)]
    Commerce(#[from] CommerceError),
}

impl ApiError {
    /// Message supplied by the backend, if any.
    pub fn backend_message(&self) -> Option<String> {
        match self {
            ApiError::Fetch(e) => e.backend_message(),
            ApiError::Rejected { message } => message
                .as_ref()
                .filter(|m| !m.trim().is_empty())
                .cloned(),
            _ => None,
        }
    }

    /// Text to show the operator: the backend message, else `fallback`.
    pub fn user_message(&self, fallback: &str) -> String {
        self.backend_message()
            .unwrap_or_else(|| fallback.to_string())
    }
}
