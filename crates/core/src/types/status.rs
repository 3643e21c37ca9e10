//! Status enums shared across the admin surface.
//!
//! These are the server-defined closed sets. The admin client only ever
//! requests transitions among the documented values; it never invents new
//! ones, so every enum here round-trips through its exact wire literal.

use core::fmt;

use serde::{Deserialize, Serialize};

/// Error returned when parsing a status from a string fails.
#[derive(thiserror::Error, Debug, Clone)]
#[error("unknown {kind} value: {value}")]
pub struct StatusParseError {
    kind: &'static str,
    value: String,
}

impl StatusParseError {
    pub fn new(kind: &'static str, value: &str) -> Self {
        Self {
            kind,
            value: value.to_owned(),
        }
    }
}

/// Product approval state.
///
/// The wire literal for the out-of-stock state contains spaces; that quirk
/// is the backend's and is preserved here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ApprovalStatus {
    Pending,
    Approved,
    Rejected,
    #[serde(rename = "out of stock")]
    OutOfStock,
}

impl ApprovalStatus {
    /// All documented values, in review order.
    pub const ALL: [Self; 4] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::OutOfStock,
    ];

    /// The exact wire literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::OutOfStock => "out of stock",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::OutOfStock => "Out of stock",
        }
    }
}

impl fmt::Display for ApprovalStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for ApprovalStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "out of stock" | "out_of_stock" => Ok(Self::OutOfStock),
            _ => Err(StatusParseError::new("approval status", s)),
        }
    }
}

/// After-sale request category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestType {
    Return,
    Refund,
    Exchange,
    Support,
    Complaint,
}

impl RequestType {
    /// The exact wire literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Return => "return",
            Self::Refund => "refund",
            Self::Exchange => "exchange",
            Self::Support => "support",
            Self::Complaint => "complaint",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Return => "Return",
            Self::Refund => "Refund",
            Self::Exchange => "Exchange",
            Self::Support => "Support",
            Self::Complaint => "Complaint",
        }
    }
}

impl fmt::Display for RequestType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestType {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "return" => Ok(Self::Return),
            "refund" => Ok(Self::Refund),
            "exchange" => Ok(Self::Exchange),
            "support" => Ok(Self::Support),
            "complaint" => Ok(Self::Complaint),
            _ => Err(StatusParseError::new("request type", s)),
        }
    }
}

/// After-sale request lifecycle state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RequestStatus {
    Pending,
    Approved,
    Rejected,
    Processing,
    Completed,
    Cancelled,
}

impl RequestStatus {
    /// All documented values, in lifecycle order.
    pub const ALL: [Self; 6] = [
        Self::Pending,
        Self::Approved,
        Self::Rejected,
        Self::Processing,
        Self::Completed,
        Self::Cancelled,
    ];

    /// The exact wire literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Processing => "processing",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
            Self::Processing => "Processing",
            Self::Completed => "Completed",
            Self::Cancelled => "Cancelled",
        }
    }

    /// Whether the request has reached a terminal state.
    #[must_use]
    pub const fn is_terminal(self) -> bool {
        matches!(self, Self::Rejected | Self::Completed | Self::Cancelled)
    }
}

impl fmt::Display for RequestStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for RequestStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "processing" => Ok(Self::Processing),
            "completed" => Ok(Self::Completed),
            "cancelled" => Ok(Self::Cancelled),
            _ => Err(StatusParseError::new("request status", s)),
        }
    }
}

/// Store application review state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum StoreStatus {
    Pending,
    Approved,
    Rejected,
}

impl StoreStatus {
    /// The exact wire literal.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Pending => "Pending",
            Self::Approved => "Approved",
            Self::Rejected => "Rejected",
        }
    }
}

impl fmt::Display for StoreStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for StoreStatus {
    type Err = StatusParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            _ => Err(StatusParseError::new("store status", s)),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_approval_status_wire_literals() {
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::Pending).unwrap(),
            "\"pending\""
        );
        // The backend really does use a spaced literal here
        assert_eq!(
            serde_json::to_string(&ApprovalStatus::OutOfStock).unwrap(),
            "\"out of stock\""
        );

        let parsed: ApprovalStatus = serde_json::from_str("\"out of stock\"").unwrap();
        assert_eq!(parsed, ApprovalStatus::OutOfStock);
    }

    #[test]
    fn test_approval_status_from_str() {
        assert_eq!(
            "PENDING".parse::<ApprovalStatus>().unwrap(),
            ApprovalStatus::Pending
        );
        assert_eq!(
            "out_of_stock".parse::<ApprovalStatus>().unwrap(),
            ApprovalStatus::OutOfStock
        );
        assert!("shipped".parse::<ApprovalStatus>().is_err());
    }

    #[test]
    fn test_request_type_roundtrip() {
        for kind in [
            RequestType::Return,
            RequestType::Refund,
            RequestType::Exchange,
            RequestType::Support,
            RequestType::Complaint,
        ] {
            let json = serde_json::to_string(&kind).unwrap();
            let back: RequestType = serde_json::from_str(&json).unwrap();
            assert_eq!(back, kind);
            assert_eq!(kind.as_str().parse::<RequestType>().unwrap(), kind);
        }
    }

    #[test]
    fn test_request_status_terminal() {
        assert!(RequestStatus::Completed.is_terminal());
        assert!(RequestStatus::Cancelled.is_terminal());
        assert!(!RequestStatus::Processing.is_terminal());
        assert!(!RequestStatus::Pending.is_terminal());
    }

    #[test]
    fn test_store_status_display_matches_wire() {
        for status in [
            StoreStatus::Pending,
            StoreStatus::Approved,
            StoreStatus::Rejected,
        ] {
            assert_eq!(
                serde_json::to_string(&status).unwrap(),
                format!("\"{status}\"")
            );
        }
    }

    #[test]
    fn test_labels() {
        assert_eq!(ApprovalStatus::OutOfStock.label(), "Out of stock");
        assert_eq!(RequestStatus::Processing.label(), "Processing");
        assert_eq!(StoreStatus::Pending.label(), "Pending");
    }

    #[test]
    fn test_parse_error_names_the_kind() {
        let err = "voided".parse::<RequestStatus>().unwrap_err();
        assert_eq!(err.to_string(), "unknown request status value: voided");
    }
}
