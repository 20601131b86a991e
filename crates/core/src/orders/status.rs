//! Order Status

use std::{
    convert::Infallible,
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use serde::{Deserialize, Serialize};

/// Lifecycle stage of an order, as reported by the server.
///
/// Codes the client does not know yet are kept verbatim in
/// [`OrderStatus::Other`] so they survive a round trip.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum OrderStatus {
    /// Waiting for the restaurant to accept.
    Pending,

    /// Accepted by the restaurant.
    Confirmed,

    /// Being cooked.
    Preparing,

    /// Ready for pickup or delivery.
    Ready,

    /// On the way to the customer.
    OutForDelivery,

    /// Handed over to the customer.
    Delivered,

    /// Cancelled by the customer or the restaurant.
    Cancelled,

    /// A status code unknown to this client.
    Other(String),
}

impl OrderStatus {
    /// Every status the client knows about, in lifecycle order.
    pub const KNOWN: [Self; 7] = [
        Self::Pending,
        Self::Confirmed,
        Self::Preparing,
        Self::Ready,
        Self::OutForDelivery,
        Self::Delivered,
        Self::Cancelled,
    ];

    /// Parse a code, returning `None` for codes outside the known set.
    pub fn parse_known(code: &str) -> Option<Self> {
        match Self::from(code) {
            Self::Other(_) => None,
            status => Some(status),
        }
    }

    /// Wire code of the status.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Confirmed => "confirmed",
            Self::Preparing => "preparing",
            Self::Ready => "ready",
            Self::OutForDelivery => "out_for_delivery",
            Self::Delivered => "delivered",
            Self::Cancelled => "cancelled",
            Self::Other(code) => code,
        }
    }

    /// Localized label for display.
    pub fn display_name(&self) -> &str {
        display_name(self.as_str())
    }

    /// Whether the order can no longer change.
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Delivered | Self::Cancelled)
    }
}

/// Map a status code to its localized label, passing unknown codes through.
pub fn display_name(code: &str) -> &str {
    match code {
        "pending" => "Čeká na potvrzení",
        "confirmed" => "Potvrzeno",
        "preparing" => "Připravuje se",
        "ready" => "Připraveno k vyzvednutí",
        "out_for_delivery" => "Na cestě",
        "delivered" => "Doručeno",
        "cancelled" => "Zrušeno",
        other => other,
    }
}

impl From<&str> for OrderStatus {
    fn from(code: &str) -> Self {
        match code {
            "pending" => Self::Pending,
            "confirmed" => Self::Confirmed,
            "preparing" => Self::Preparing,
            "ready" => Self::Ready,
            "out_for_delivery" => Self::OutForDelivery,
            "delivered" => Self::Delivered,
            "cancelled" => Self::Cancelled,
            other => Self::Other(other.to_string()),
        }
    }
}

impl From<String> for OrderStatus {
    fn from(code: String) -> Self {
        match Self::from(code.as_str()) {
            Self::Other(_) => Self::Other(code),
            status => status,
        }
    }
}

impl From<OrderStatus> for String {
    fn from(status: OrderStatus) -> Self {
        match status {
            OrderStatus::Other(code) => code,
            status => status.as_str().to_string(),
        }
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(Self::from(s))
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}
