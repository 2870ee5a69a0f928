//! Transport layer: wire-format details of the gateway HTTP protocol.

mod charset;
mod form;
mod inbound;
mod send;
mod ucs2;

pub use charset::{SUBSTITUTE, decode_text, encode_text, is_representable};
pub use form::{WireFields, parse_wire_fields};
pub use inbound::{DecodeError, decode_message, decode_status};
pub use send::{
    CT_PLAIN_TEXT, CT_UCS2, EncodedSend, GatewayError, GatewayErrorKind, classify_send_response,
    encode_form_body, encode_send_form,
};
pub use ucs2::{Ucs2Error, decode_ucs2_hex, encode_ucs2_hex};
