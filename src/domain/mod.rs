//! Domain layer: strong types with validation and invariants (no I/O).

mod request;
mod response;
mod validation;
mod value;

pub use request::OutgoingMessage;
pub use response::{DeliveryStatus, InboundMessage, SendReceipt, StatusReport};
pub use validation::ValidationError;
pub use value::{
    GatewayUrl, MessageText, Password, PhoneNumber, Provider, RawPhoneNumber, SenderId, Username,
};
