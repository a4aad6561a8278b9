use serde::{Deserialize, Serialize};
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

/// The lifecycle state of an order as recorded by the marketplace.
///
/// Labels outside the known set are kept verbatim in `Other` so that counting by
/// status never loses rows.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderStatus {
    Created,
    Approved,
    Invoiced,
    Processing,
    Shipped,
    Delivered,
    Unavailable,
    Canceled,
    #[serde(untagged)]
    Other(String),
}

impl OrderStatus {
    /// Returns the label used in the source data.
    pub fn as_str(&self) -> &str {
        match self {
            OrderStatus::Created => "created",
            OrderStatus::Approved => "approved",
            OrderStatus::Invoiced => "invoiced",
            OrderStatus::Processing => "processing",
            OrderStatus::Shipped => "shipped",
            OrderStatus::Delivered => "delivered",
            OrderStatus::Unavailable => "unavailable",
            OrderStatus::Canceled => "canceled",
            OrderStatus::Other(label) => label,
        }
    }
}

impl FromStr for OrderStatus {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let status = match s.trim() {
            "created" => OrderStatus::Created,
            "approved" => OrderStatus::Approved,
            "invoiced" => OrderStatus::Invoiced,
            "processing" => OrderStatus::Processing,
            "shipped" => OrderStatus::Shipped,
            "delivered" => OrderStatus::Delivered,
            "unavailable" => OrderStatus::Unavailable,
            "canceled" => OrderStatus::Canceled,
            other => OrderStatus::Other(other.to_string()),
        };
        Ok(status)
    }
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_labels_round_trip_through_display() {
        for label in ["created", "approved", "invoiced", "processing", "shipped", "delivered", "unavailable", "canceled"] {
            let status: OrderStatus = label.parse().unwrap();
            assert!(!matches!(status, OrderStatus::Other(_)), "{label} should be a known status");
            assert_eq!(status.to_string(), label);
        }
    }

    #[test]
    fn unknown_labels_are_kept() {
        let status: OrderStatus = "lost_in_transit".parse().unwrap();
        assert_eq!(status, OrderStatus::Other("lost_in_transit".to_string()));
        assert_eq!(status.as_str(), "lost_in_transit");
    }

    #[test]
    fn serializes_as_plain_label() {
        assert_eq!(serde_json::to_string(&OrderStatus::Delivered).unwrap(), "\"delivered\"");
        assert_eq!(
            serde_json::to_string(&OrderStatus::Other("weird".into())).unwrap(),
            "\"weird\""
        );
    }
}
