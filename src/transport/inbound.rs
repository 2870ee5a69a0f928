//! Inbound callback decoding: received messages and delivery-status reports.

use crate::domain::{DeliveryStatus, InboundMessage, Provider, StatusReport};
use crate::transport::form::WireFields;

const REF_FIELD: &str = "REF";
const SND_FIELD: &str = "SND";
const RCV_FIELD: &str = "RCV";
const TXT_FIELD: &str = "TXT";
const STATE_FIELD: &str = "STATE";
const DELIVERYTIME_FIELD: &str = "DELIVERYTIME";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("callback is missing required field {field}")]
    MissingField { field: &'static str },

    #[error("callback field {field} has unparseable value: {value}")]
    InvalidField { field: &'static str, value: String },
}

/// Decode a "message received" callback into an [`InboundMessage`].
///
/// `SND`, `RCV` and `TXT` are required; `REF` is optional (the gateway omits
/// it for some routes). Every field not consumed by the core mapping lands
/// in `meta` untouched.
pub fn decode_message(
    fields: &WireFields,
    provider: &Provider,
) -> Result<InboundMessage, DecodeError> {
    let src = require(fields, SND_FIELD)?;
    let dst = require(fields, RCV_FIELD)?;
    let body = require(fields, TXT_FIELD)?;
    let msgid = fields
        .get(REF_FIELD)
        .filter(|value| !value.is_empty())
        .cloned();

    let meta = fields
        .iter()
        .filter(|(key, _)| {
            !matches!(key.as_str(), REF_FIELD | SND_FIELD | RCV_FIELD | TXT_FIELD)
        })
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    Ok(InboundMessage {
        provider: provider.clone(),
        msgid,
        src: src.to_owned(),
        dst: dst.to_owned(),
        body: body.to_owned(),
        meta,
    })
}

/// Decode a delivery-status callback into a [`StatusReport`].
///
/// `REF` and `STATE` are required. Unrecognized `STATE` codes decode to
/// [`DeliveryStatus::Other`] with the raw code preserved; a delivery outcome
/// is never guessed. `DELIVERYTIME` is validated when present and then
/// discarded.
pub fn decode_status(fields: &WireFields, provider: &Provider) -> Result<StatusReport, DecodeError> {
    let msgid = require(fields, REF_FIELD)?;
    let state = require(fields, STATE_FIELD)?;

    if let Some(value) = fields.get(DELIVERYTIME_FIELD) {
        validate_delivery_time(value)?;
    }

    Ok(StatusReport {
        provider: provider.clone(),
        msgid: msgid.to_owned(),
        status: DeliveryStatus::from_wire(state),
    })
}

fn require<'a>(fields: &'a WireFields, field: &'static str) -> Result<&'a str, DecodeError> {
    fields
        .get(field)
        .map(String::as_str)
        .ok_or(DecodeError::MissingField { field })
}

// DELIVERYTIME is `YYYYMMDDHHmm`; the value is not part of the normalized
// report, but a garbled one still marks the callback as malformed.
fn validate_delivery_time(value: &str) -> Result<(), DecodeError> {
    let invalid = || DecodeError::InvalidField {
        field: DELIVERYTIME_FIELD,
        value: value.to_owned(),
    };

    let b = value.as_bytes();
    if b.len() != 12 || !b.iter().all(u8::is_ascii_digit) {
        return Err(invalid());
    }

    let two = |i: usize| u32::from(b[i] - b'0') * 10 + u32::from(b[i + 1] - b'0');
    let (month, day, hour, minute) = (two(4), two(6), two(8), two(10));
    if !(1..=12).contains(&month) || !(1..=31).contains(&day) || hour > 23 || minute > 59 {
        return Err(invalid());
    }
    Ok(())
}
