//! Order Session Errors

use foxi::orders::DraftError;
use thiserror::Error;

use crate::api::ApiError;

/// Session operations that can fail remotely.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operation {
    /// Listing all or restaurant-scoped orders
    FetchOrders,

    /// Listing the caller's own orders
    FetchMyOrders,

    /// Loading a single order
    FetchOrder,

    /// Submitting the cart
    CreateOrder,

    /// Changing an order's status
    UpdateStatus,

    /// Cancelling an order
    CancelOrder,

    /// Loading restaurant statistics
    FetchStatistics,
}

impl Operation {
    /// Message shown when the server gives no usable explanation.
    pub fn fallback_message(self) -> &'static str {
        match self {
            Self::FetchOrders => "Chyba při načítání objednávek",
            Self::FetchMyOrders => "Chyba při načítání vašich objednávek",
            Self::FetchOrder => "Chyba při načítání objednávky",
            Self::CreateOrder => "Chyba při vytváření objednávky",
            Self::UpdateStatus => "Chyba při aktualizaci objednávky",
            Self::CancelOrder => "Chyba při rušení objednávky",
            Self::FetchStatistics => "Chyba při načítání statistik",
        }
    }
}

/// Errors surfaced by order submission and registry operations.
#[derive(Debug, Error)]
pub enum OrderError {
    /// A local precondition failed; nothing was sent.
    #[error(transparent)]
    Validation(#[from] DraftError),

    /// The server declined the request.
    #[error("{0}")]
    Rejected(String),

    /// The request did not complete or the response was unusable.
    #[error("{message}")]
    Transport {
        /// Operation-specific fallback message
        message: &'static str,

        /// Underlying client error
        #[source]
        source: ApiError,
    },

    /// The referenced order does not exist.
    #[error("order not found")]
    NotFound,

    /// Another checkout on this session has not finished yet.
    #[error("an order submission is already in progress")]
    SubmissionInProgress,
}

impl OrderError {
    /// Classify a client error for the given operation.
    pub fn from_api(source: ApiError, operation: Operation) -> Self {
        match source {
            ApiError::NotFound => Self::NotFound,
            ApiError::Rejected { message, .. } => Self::Rejected(
                message.unwrap_or_else(|| operation.fallback_message().to_string()),
            ),
            source => Self::Transport {
                message: operation.fallback_message(),
                source,
            },
        }
    }
}
