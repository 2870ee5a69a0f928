//! Callback receiver: decodes inbound gateway callbacks and hands the
//! results to the host's dispatch layer.
//!
//! Routing stays with the host: it owns the HTTP server, registers whatever
//! paths it likes for the "message received" and "delivery status" hooks,
//! and forwards each request's raw query string or form body here.

use std::sync::Arc;

use crate::domain::{InboundMessage, Provider, StatusReport};
use crate::transport::{DecodeError, decode_message, decode_status, parse_wire_fields};

/// Port through which decoded inbound traffic leaves this crate.
///
/// The host's dispatch framework implements this and owns delivery to
/// application receivers.
pub trait InboundSink: Send + Sync {
    fn receive_message(&self, message: InboundMessage);
    fn receive_status(&self, status: StatusReport);
}

/// Receiver for one configured gateway account.
///
/// Each callback is handled independently; a malformed one is logged and
/// dropped without affecting any other. The host should answer HTTP 200 to
/// the gateway even when a handler returns an error; a non-2xx reply would
/// only make the gateway re-deliver the same unparseable payload.
pub struct CallbackReceiver {
    provider: Provider,
    sink: Arc<dyn InboundSink>,
}

impl CallbackReceiver {
    pub fn new(provider: Provider, sink: Arc<dyn InboundSink>) -> Self {
        Self { provider, sink }
    }

    /// Tag this receiver stamps on decoded objects.
    pub fn provider(&self) -> &Provider {
        &self.provider
    }

    /// Handle a "message received" callback. `raw` is the query string (GET)
    /// or the form-encoded body (POST); both carry the same field set.
    pub fn message_callback(&self, raw: &[u8]) -> Result<(), DecodeError> {
        let fields = parse_wire_fields(raw);
        match decode_message(&fields, &self.provider) {
            Ok(message) => {
                self.sink.receive_message(message);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("dropping malformed message callback: {err}");
                Err(err)
            }
        }
    }

    /// Handle a delivery-status callback.
    pub fn status_callback(&self, raw: &[u8]) -> Result<(), DecodeError> {
        let fields = parse_wire_fields(raw);
        match decode_status(&fields, &self.provider) {
            Ok(status) => {
                self.sink.receive_status(status);
                Ok(())
            }
            Err(err) => {
                tracing::warn!("dropping malformed status callback: {err}");
                Err(err)
            }
        }
    }
}
