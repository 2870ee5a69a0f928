//! Typed Rust adapter for the PSWin SMS gateway HTTP protocol.
//!
//! The crate covers three things: encoding outgoing messages into gateway
//! form requests (choosing between the gateway's single-byte plain-text
//! charset and a hex-encoded UCS2 fallback), decoding inbound callbacks
//! (received messages and delivery-status reports) into normalized domain
//! objects, and classifying gateway HTTP responses into a typed error
//! taxonomy. HTTP routing and message dispatch stay with the host, wired in
//! through the [`receiver::InboundSink`] port.
//!
//! ```rust,no_run
//! use pswin::{Credentials, MessageText, OutgoingMessage, PswinClient, RawPhoneNumber, SenderId};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), pswin::PswinError> {
//!     let client = PswinClient::builder(Credentials::new("user", "password")?)
//!         .default_sender(SenderId::new("MyShop")?)
//!         .build()?;
//!     let mut message = OutgoingMessage::new(
//!         RawPhoneNumber::new("+4759443671")?,
//!         MessageText::new("Hei på deg")?,
//!     );
//!     client.send(&mut message).await?;
//!     Ok(())
//! }
//! ```
#![forbid(unsafe_code)]

pub mod client;
pub mod domain;
pub mod receiver;
mod transport;

pub use client::{Credentials, IS_HEX_PARAM, PswinClient, PswinClientBuilder, PswinError};
pub use domain::{
    DeliveryStatus, GatewayUrl, InboundMessage, MessageText, OutgoingMessage, Password,
    PhoneNumber, Provider, RawPhoneNumber, SendReceipt, SenderId, StatusReport, Username,
    ValidationError,
};
pub use receiver::{CallbackReceiver, InboundSink};
pub use transport::{
    CT_PLAIN_TEXT, CT_UCS2, DecodeError, EncodedSend, GatewayError, GatewayErrorKind, SUBSTITUTE,
    Ucs2Error, WireFields, classify_send_response, decode_message, decode_status, decode_text,
    decode_ucs2_hex, encode_form_body, encode_send_form, encode_text, encode_ucs2_hex,
    is_representable, parse_wire_fields,
};
