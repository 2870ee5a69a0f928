//! Outgoing send encoding and gateway response classification.

use std::fmt;

use crate::domain::{
    MessageText, OutgoingMessage, Password, RawPhoneNumber, SendReceipt, SenderId, Username,
    ValidationError,
};
use crate::transport::{charset, ucs2};

/// `CT` value for single-byte plain text bodies.
pub const CT_PLAIN_TEXT: &str = "0";

/// `CT` value for hex-encoded UCS2 bodies.
pub const CT_UCS2: &str = "9";

const CT_FIELD: &str = "CT";
const HEX_FIELD: &str = "HEX";

/// Fields owned by the encoder; same-named provider options never override
/// them.
const PROTECTED_FIELDS: [&str; 7] = [
    Username::FIELD,
    Password::FIELD,
    RawPhoneNumber::FIELD,
    SenderId::FIELD,
    MessageText::FIELD,
    HEX_FIELD,
    CT_FIELD,
];

#[derive(Debug, Clone, PartialEq, Eq)]
/// Encoded field set for one outgoing send.
///
/// Values are byte strings: `TXT` carries charset bytes, everything else is
/// ASCII. `hex` reports whether the body took the UCS2 fallback.
pub struct EncodedSend {
    pub params: Vec<(String, Vec<u8>)>,
    pub hex: bool,
}

/// Encode an outgoing message into gateway wire fields.
///
/// The body goes out as single-byte `TXT` when every character is in the
/// gateway repertoire, and as hex-encoded UCS2 in `HEX` otherwise; a message
/// is never partially hex-encoded. The sender falls back to
/// `default_sender` when the message carries no override.
pub fn encode_send_form(
    message: &OutgoingMessage,
    default_sender: Option<&SenderId>,
) -> Result<EncodedSend, ValidationError> {
    let sender = message
        .sender()
        .or(default_sender)
        .ok_or(ValidationError::MissingSender)?;

    let mut params = Vec::<(String, Vec<u8>)>::new();
    params.push((
        RawPhoneNumber::FIELD.to_owned(),
        message.to().raw().as_bytes().to_vec(),
    ));
    params.push((
        SenderId::FIELD.to_owned(),
        sender.as_str().as_bytes().to_vec(),
    ));

    let hex = match charset::encode_text(message.body().as_str()) {
        Some(bytes) => {
            params.push((MessageText::FIELD.to_owned(), bytes));
            params.push((CT_FIELD.to_owned(), CT_PLAIN_TEXT.as_bytes().to_vec()));
            false
        }
        None => {
            params.push((
                HEX_FIELD.to_owned(),
                ucs2::encode_ucs2_hex(message.body().as_str()).into_bytes(),
            ));
            params.push((CT_FIELD.to_owned(), CT_UCS2.as_bytes().to_vec()));
            true
        }
    };

    for (key, value) in message.options() {
        if PROTECTED_FIELDS.contains(&key.as_str()) {
            continue;
        }
        params.push((key.clone(), value.as_bytes().to_vec()));
    }

    Ok(EncodedSend { params, hex })
}

/// Percent-encode wire fields into an `application/x-www-form-urlencoded`
/// body. Operates on raw bytes; the charset work already happened upstream.
pub fn encode_form_body(params: &[(String, Vec<u8>)]) -> String {
    let mut body = String::new();
    for (idx, (key, value)) in params.iter().enumerate() {
        if idx > 0 {
            body.push('&');
        }
        percent_encode_into(&mut body, key.as_bytes());
        body.push('=');
        percent_encode_into(&mut body, value);
    }
    body
}

fn percent_encode_into(out: &mut String, bytes: &[u8]) {
    const UPPER_HEX: &[u8; 16] = b"0123456789ABCDEF";
    for &b in bytes {
        match b {
            b' ' => out.push('+'),
            b'0'..=b'9' | b'A'..=b'Z' | b'a'..=b'z' | b'-' | b'_' | b'.' | b'~' => {
                out.push(b as char);
            }
            _ => {
                out.push('%');
                out.push(UPPER_HEX[usize::from(b >> 4)] as char);
                out.push(UPPER_HEX[usize::from(b & 0xf)] as char);
            }
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
/// Gateway error condition derived from the HTTP response status.
pub enum GatewayErrorKind {
    /// Gateway-side failure (5xx).
    ServerFailure,
    /// The gateway rejected the request as malformed (400).
    MalformedRequest,
    /// Wrong account credentials (401/403).
    AuthFailed,
    /// Any other non-2xx status.
    Unknown,
}

impl GatewayErrorKind {
    /// Stable symbolic code for this error condition.
    pub fn code(self) -> &'static str {
        match self {
            Self::ServerFailure => "E001",
            Self::MalformedRequest => "E002",
            Self::AuthFailed => "E003",
            Self::Unknown => "E000",
        }
    }
}

impl fmt::Display for GatewayErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("gateway error {kind}: HTTP status {status}")]
/// Non-success response from the gateway, classified by status code.
pub struct GatewayError {
    pub kind: GatewayErrorKind,
    pub status: u16,
    pub body: Option<String>,
}

/// Classify the gateway's HTTP response to a send.
///
/// 2xx is the opaque success receipt (this protocol returns no message id);
/// everything else maps through a fixed table, with unlisted codes landing
/// on [`GatewayErrorKind::Unknown`] so classification is total.
pub fn classify_send_response(status: u16, body: &str) -> Result<SendReceipt, GatewayError> {
    if (200..=299).contains(&status) {
        return Ok(SendReceipt);
    }

    let kind = match status {
        400 => GatewayErrorKind::MalformedRequest,
        401 | 403 => GatewayErrorKind::AuthFailed,
        500..=599 => GatewayErrorKind::ServerFailure,
        _ => GatewayErrorKind::Unknown,
    };

    let body = body.trim();
    Err(GatewayError {
        kind,
        status,
        body: if body.is_empty() {
            None
        } else {
            Some(body.to_owned())
        },
    })
}
