use std::collections::BTreeMap;

use crate::domain::value::{MessageText, RawPhoneNumber, SenderId};

#[derive(Debug, Clone)]
/// Outgoing message bound for the gateway.
///
/// `options` are passthrough wire fields merged into the request (protocol
/// fields always win over same-named options). `provider_params` are
/// annotations the send path attaches, readable by the caller after the send
/// call returns.
pub struct OutgoingMessage {
    to: RawPhoneNumber,
    body: MessageText,
    sender: Option<SenderId>,
    options: BTreeMap<String, String>,
    provider_params: BTreeMap<String, String>,
}

impl OutgoingMessage {
    /// Create a message with the default sender configured on the client.
    pub fn new(to: RawPhoneNumber, body: MessageText) -> Self {
        Self {
            to,
            body,
            sender: None,
            options: BTreeMap::new(),
            provider_params: BTreeMap::new(),
        }
    }

    /// Override the sender id for this message only.
    pub fn with_sender(mut self, sender: SenderId) -> Self {
        self.sender = Some(sender);
        self
    }

    /// Attach a passthrough wire option.
    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Destination address (`RCV`).
    pub fn to(&self) -> &RawPhoneNumber {
        &self.to
    }

    /// Message body.
    pub fn body(&self) -> &MessageText {
        &self.body
    }

    /// Per-message sender override, if any.
    pub fn sender(&self) -> Option<&SenderId> {
        self.sender.as_ref()
    }

    /// Passthrough wire options.
    pub fn options(&self) -> &BTreeMap<String, String> {
        &self.options
    }

    /// Annotations attached during send (e.g. `is_hex`).
    pub fn provider_params(&self) -> &BTreeMap<String, String> {
        &self.provider_params
    }

    pub(crate) fn set_provider_param(&mut self, key: &str, value: impl Into<String>) {
        self.provider_params.insert(key.to_owned(), value.into());
    }
}
