// core/src/error.rs
use anyhow::Error as AnyhowError;
use thiserror::Error;

use crate::model::OrderStatus;

#[derive(Debug, Error)]
pub enum CoreError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Order not found: {key}")]
    UnknownOrder { key: String },

    #[error("Invalid status: '{0}'")]
    InvalidStatus(String),

    #[error("Cannot change order status from {from} to {to}")]
    InvalidTransition { from: OrderStatus, to: OrderStatus },

    #[error("A rejection reason is required to reject an order")]
    MissingReason,

    #[error("Tracking id already in use: {0}")]
    DuplicateTrackingId(String),

    #[error("Notification failed: {source}")]
    Notification {
        #[source]
        source: AnyhowError,
    },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CoreError {
    /// Message suitable for showing to the caller of a failed operation.
    pub fn user_message(&self) -> String {
        match self {
            CoreError::InvalidTransition { from, .. } if from.is_terminal() => {
                format!(
                    "This order is already {} and cannot be changed.",
                    from.as_str().to_lowercase()
                )
            }
            CoreError::UnknownOrder { .. } => "Order not found".to_string(),
            other => other.to_string(),
        }
    }
}

impl From<AnyhowError> for CoreError {
    fn from(err: AnyhowError) -> Self {
        CoreError::Notification { source: err }
    }
}

pub type CoreResult<T, E = CoreError> = std::result::Result<T, E>;
