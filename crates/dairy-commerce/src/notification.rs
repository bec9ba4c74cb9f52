//! Dismissable notifications surfaced to the operator.

use serde::{Deserialize, Serialize};

/// Fallback when submission fails without a backend message.
pub const SUBMIT_FAILED_FALLBACK: &str = "An error occurred while submitting the order";

/// Fallback when a catalog fetch fails without a backend message.
pub const FETCH_FAILED_FALLBACK: &str = "An error occurred while fetching products";

/// Message shown after a successful submission.
pub const SUBMIT_SUCCEEDED: &str = "Order submitted successfully";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotificationKind {
    Success,
    Error,
}

/// A notification with a title and description.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notification {
    pub kind: NotificationKind,
    pub title: String,
    pub description: String,
}

impl Notification {
    pub fn success(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Success,
            title: "Success".to_string(),
            description: description.into(),
        }
    }

    pub fn error(description: impl Into<String>) -> Self {
        Self {
            kind: NotificationKind::Error,
            title: "Error".to_string(),
            description: description.into(),
        }
    }

    pub fn is_error(&self) -> bool {
        self.kind == NotificationKind::Error
    }
}
