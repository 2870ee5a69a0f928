use std::collections::BTreeMap;

use crate::domain::value::Provider;

/// Success marker for a gateway send. The protocol returns no message id on
/// success, so there is nothing else to carry.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SendReceipt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InboundMessage {
    pub provider: Provider,
    /// Gateway message reference (`REF`), when the callback carried one.
    pub msgid: Option<String>,
    pub src: String,
    pub dst: String,
    pub body: String,
    /// Wire fields not consumed by the core mapping (`NET`, `ID`, ...).
    pub meta: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusReport {
    pub provider: Provider,
    pub msgid: String,
    pub status: DeliveryStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
/// Delivery state reported by the gateway in the `STATE` field.
///
/// The wire vocabulary is closed; codes outside it are preserved verbatim in
/// [`DeliveryStatus::Other`] rather than being coerced to a delivery outcome.
pub enum DeliveryStatus {
    Delivered,
    Expired,
    Deleted,
    Undelivered,
    Accepted,
    Rejected,
    Failed,
    Unknown,
    Other(String),
}

impl DeliveryStatus {
    /// Map a wire `STATE` code to its status variant.
    pub fn from_wire(code: &str) -> Self {
        match code {
            "DELIVRD" => Self::Delivered,
            "EXPIRED" => Self::Expired,
            "DELETED" => Self::Deleted,
            "UNDELIV" => Self::Undelivered,
            "ACCEPTD" => Self::Accepted,
            "REJECTD" => Self::Rejected,
            "FAILED" => Self::Failed,
            "UNKNOWN" => Self::Unknown,
            other => Self::Other(other.to_owned()),
        }
    }

    /// The wire `STATE` code this variant corresponds to.
    pub fn wire_code(&self) -> &str {
        match self {
            Self::Delivered => "DELIVRD",
            Self::Expired => "EXPIRED",
            Self::Deleted => "DELETED",
            Self::Undelivered => "UNDELIV",
            Self::Accepted => "ACCEPTD",
            Self::Rejected => "REJECTD",
            Self::Failed => "FAILED",
            Self::Unknown => "UNKNOWN",
            Self::Other(code) => code,
        }
    }
}
