//! Client layer: orchestrates transport calls and maps transport ↔ domain.

use std::error::Error as StdError;
use std::future::Future;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use crate::domain::{
    GatewayUrl, OutgoingMessage, Password, SendReceipt, SenderId, Username, ValidationError,
};
use crate::transport::{GatewayError, classify_send_response, encode_form_body, encode_send_form};

const DEFAULT_ENDPOINT: &str = "https://simple.pswin.com/";

/// Provider param attached to a message when its body took the UCS2 hex
/// path.
pub const IS_HEX_PARAM: &str = "is_hex";

type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

#[derive(Debug, Clone)]
struct HttpResponse {
    status: u16,
    body: String,
}

trait HttpTransport: Send + Sync {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>>;
}

#[derive(Debug, Clone)]
struct ReqwestTransport {
    client: reqwest::Client,
}

impl HttpTransport for ReqwestTransport {
    fn post_form<'a>(
        &'a self,
        url: &'a str,
        body: String,
    ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
        Box::pin(async move {
            // The body is percent-encoded upstream: TXT carries gateway
            // charset bytes that serde-style form serialization would mangle.
            let response = self
                .client
                .post(url)
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(body)
                .send()
                .await?;
            let status = response.status().as_u16();
            let body = response.text().await?;
            Ok(HttpResponse { status, body })
        })
    }
}

#[derive(Debug, Clone)]
/// Gateway account credentials (`USER`/`PW`) sent with every request.
pub struct Credentials {
    user: Username,
    password: Password,
}

impl Credentials {
    /// Create validated credentials.
    pub fn new(
        user: impl Into<String>,
        password: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        Ok(Self {
            user: Username::new(user)?,
            password: Password::new(password)?,
        })
    }

    fn push_form_params(&self, params: &mut Vec<(String, Vec<u8>)>) {
        params.push((
            Username::FIELD.to_owned(),
            self.user.as_str().as_bytes().to_vec(),
        ));
        params.push((
            Password::FIELD.to_owned(),
            self.password.as_str().as_bytes().to_vec(),
        ));
    }
}

#[derive(Debug, thiserror::Error)]
/// Errors returned by [`PswinClient::send`].
///
/// Send-path failures always surface to the caller; nothing is retried or
/// swallowed at this layer.
pub enum PswinError {
    /// HTTP client / transport failure (DNS, TLS, timeouts, etc).
    #[error("transport error: {0}")]
    Transport(#[source] Box<dyn StdError + Send + Sync>),

    /// The gateway answered with a non-2xx status.
    #[error("gateway error: {0}")]
    Gateway(#[from] GatewayError),

    /// One of the domain constructors rejected an invalid value.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),
}

#[derive(Debug, Clone)]
/// Builder for [`PswinClient`].
///
/// Use this when you need to customize the endpoint, default sender,
/// timeout, or user-agent.
pub struct PswinClientBuilder {
    credentials: Credentials,
    endpoint: String,
    default_sender: Option<SenderId>,
    timeout: Option<Duration>,
    user_agent: Option<String>,
}

impl PswinClientBuilder {
    /// Create a builder with the default endpoint and no overrides.
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            default_sender: None,
            timeout: None,
            user_agent: None,
        }
    }

    /// Override the gateway endpoint URL.
    pub fn endpoint(mut self, endpoint: GatewayUrl) -> Self {
        self.endpoint = endpoint.into_string();
        self
    }

    /// Set the sender id used when a message carries no override.
    pub fn default_sender(mut self, sender: SenderId) -> Self {
        self.default_sender = Some(sender);
        self
    }

    /// Set an HTTP client timeout applied to the entire request.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Override the HTTP `User-Agent` header.
    pub fn user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = Some(user_agent.into());
        self
    }

    /// Build a [`PswinClient`].
    pub fn build(self) -> Result<PswinClient, PswinError> {
        let mut builder = reqwest::Client::builder();
        if let Some(timeout) = self.timeout {
            builder = builder.timeout(timeout);
        }
        if let Some(user_agent) = self.user_agent {
            builder = builder.user_agent(user_agent);
        }

        let client = builder
            .build()
            .map_err(|err| PswinError::Transport(Box::new(err)))?;

        Ok(PswinClient {
            credentials: self.credentials,
            endpoint: self.endpoint,
            default_sender: self.default_sender,
            http: Arc::new(ReqwestTransport { client }),
        })
    }
}

#[derive(Clone)]
/// High-level PSWin gateway client.
///
/// This type orchestrates encoding (including the plain-text/UCS2 mode
/// decision), the HTTP call, and response classification. By default it
/// posts to `https://simple.pswin.com/`.
pub struct PswinClient {
    credentials: Credentials,
    endpoint: String,
    default_sender: Option<SenderId>,
    http: Arc<dyn HttpTransport>,
}

impl PswinClient {
    /// Create a client using the default endpoint and no default sender.
    ///
    /// For more customization, use [`PswinClient::builder`].
    pub fn new(credentials: Credentials) -> Self {
        Self {
            credentials,
            endpoint: DEFAULT_ENDPOINT.to_owned(),
            default_sender: None,
            http: Arc::new(ReqwestTransport {
                client: reqwest::Client::new(),
            }),
        }
    }

    /// Start building a client with custom settings.
    pub fn builder(credentials: Credentials) -> PswinClientBuilder {
        PswinClientBuilder::new(credentials)
    }

    /// Send an SMS message through the gateway.
    ///
    /// When the body exceeds the gateway's single-byte repertoire it goes
    /// out hex-encoded as UCS2 and the message is annotated with
    /// [`IS_HEX_PARAM`] (readable via `message.provider_params()` after the
    /// call returns). A successful send yields an opaque [`SendReceipt`]:
    /// this protocol returns no message id.
    ///
    /// Errors:
    /// - [`PswinError::Validation`] when neither the message nor the client
    ///   provides a sender id,
    /// - [`PswinError::Transport`] when the HTTP call itself fails,
    /// - [`PswinError::Gateway`] for non-2xx gateway responses.
    pub async fn send(&self, message: &mut OutgoingMessage) -> Result<SendReceipt, PswinError> {
        let encoded = encode_send_form(message, self.default_sender.as_ref())?;
        if encoded.hex {
            message.set_provider_param(IS_HEX_PARAM, "true");
        }

        let mut params = Vec::<(String, Vec<u8>)>::new();
        self.credentials.push_form_params(&mut params);
        params.extend(encoded.params);

        let response = self
            .http
            .post_form(&self.endpoint, encode_form_body(&params))
            .await
            .map_err(PswinError::Transport)?;

        let receipt = classify_send_response(response.status, &response.body)?;
        Ok(receipt)
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use crate::domain::{MessageText, RawPhoneNumber};
    use crate::transport::{GatewayErrorKind, WireFields, parse_wire_fields};

    use super::*;

    #[derive(Debug, Clone)]
    struct FakeTransport {
        state: Arc<Mutex<FakeTransportState>>,
    }

    #[derive(Debug)]
    struct FakeTransportState {
        last_url: Option<String>,
        last_body: Option<String>,
        response_status: u16,
        response_body: String,
    }

    impl FakeTransport {
        fn new(response_status: u16, response_body: impl Into<String>) -> Self {
            Self {
                state: Arc::new(Mutex::new(FakeTransportState {
                    last_url: None,
                    last_body: None,
                    response_status,
                    response_body: response_body.into(),
                })),
            }
        }

        fn last_request(&self) -> (Option<String>, WireFields) {
            let state = self.state.lock().unwrap();
            let fields = state
                .last_body
                .as_deref()
                .map(|body| parse_wire_fields(body.as_bytes()))
                .unwrap_or_default();
            (state.last_url.clone(), fields)
        }
    }

    impl HttpTransport for FakeTransport {
        fn post_form<'a>(
            &'a self,
            url: &'a str,
            body: String,
        ) -> BoxFuture<'a, Result<HttpResponse, Box<dyn StdError + Send + Sync>>> {
            Box::pin(async move {
                let (status, response_body) = {
                    let mut state = self.state.lock().unwrap();
                    state.last_url = Some(url.to_owned());
                    state.last_body = Some(body);
                    (state.response_status, state.response_body.clone())
                };
                Ok(HttpResponse {
                    status,
                    body: response_body,
                })
            })
        }
    }

    fn assert_field(fields: &WireFields, key: &str, value: &str) {
        assert_eq!(
            fields.get(key).map(String::as_str),
            Some(value),
            "field {key}; got: {fields:?}"
        );
    }

    fn make_client(transport: FakeTransport, default_sender: Option<&str>) -> PswinClient {
        PswinClient {
            credentials: Credentials::new("user", "password").unwrap(),
            endpoint: "https://example.invalid/sms".to_owned(),
            default_sender: default_sender.map(|s| SenderId::new(s).unwrap()),
            http: Arc::new(transport),
        }
    }

    fn message(body: &str) -> OutgoingMessage {
        OutgoingMessage::new(
            RawPhoneNumber::new("+123456").unwrap(),
            MessageText::new(body).unwrap(),
        )
    }

    #[tokio::test]
    async fn send_posts_credentials_and_plain_text_fields() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone(), Some("MyShop"));

        let mut msg = message("hey");
        let receipt = client.send(&mut msg).await.unwrap();
        assert_eq!(receipt, SendReceipt);
        // Success carries no message id and no hex annotation.
        assert!(!msg.provider_params().contains_key(IS_HEX_PARAM));

        let (url, fields) = transport.last_request();
        assert_eq!(url.as_deref(), Some("https://example.invalid/sms"));
        assert_field(&fields, "USER", "user");
        assert_field(&fields, "PW", "password");
        assert_field(&fields, "RCV", "+123456");
        assert_field(&fields, "SND", "MyShop");
        assert_field(&fields, "TXT", "hey");
        assert_field(&fields, "CT", "0");
    }

    #[tokio::test]
    async fn send_round_trips_repertoire_text_through_the_wire_encoding() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone(), Some("MyShop"));

        let mut msg = message("RaLejaLe hemmat i høssøLæssom å naumøLa spikkjipørse.");
        client.send(&mut msg).await.unwrap();
        assert!(!msg.provider_params().contains_key(IS_HEX_PARAM));

        let (_, fields) = transport.last_request();
        assert_field(
            &fields,
            "TXT",
            "RaLejaLe hemmat i høssøLæssom å naumøLa spikkjipørse.",
        );
        assert_field(&fields, "CT", "0");
    }

    #[tokio::test]
    async fn send_hex_encodes_foreign_text_and_annotates_the_message() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone(), Some("MyShop"));

        let mut msg = message("מה קורה?");
        client.send(&mut msg).await.unwrap();
        assert_eq!(
            msg.provider_params().get(IS_HEX_PARAM).map(String::as_str),
            Some("true")
        );

        let (_, fields) = transport.last_request();
        assert_field(&fields, "HEX", "05de05d4002005e705d505e805d4003f");
        assert_field(&fields, "CT", "9");
        assert!(!fields.contains_key("TXT"));
    }

    #[tokio::test]
    async fn message_sender_overrides_the_configured_default() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone(), Some("MyShop"));

        let mut msg = message("hey").with_sender(SenderId::new("Fake sender").unwrap());
        client.send(&mut msg).await.unwrap();

        let (_, fields) = transport.last_request();
        assert_field(&fields, "SND", "Fake sender");
    }

    #[tokio::test]
    async fn send_maps_server_failure_to_gateway_error() {
        let transport = FakeTransport::new(500, "oops");
        let client = make_client(transport, Some("MyShop"));

        let err = client.send(&mut message("hey")).await.unwrap_err();
        match err {
            PswinError::Gateway(gateway) => {
                assert_eq!(gateway.kind, GatewayErrorKind::ServerFailure);
                assert_eq!(gateway.kind.code(), "E001");
                assert_eq!(gateway.status, 500);
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn send_without_any_sender_fails_before_the_http_call() {
        let transport = FakeTransport::new(200, "");
        let client = make_client(transport.clone(), None);

        let err = client.send(&mut message("hey")).await.unwrap_err();
        assert!(matches!(
            err,
            PswinError::Validation(ValidationError::MissingSender)
        ));

        let (url, _) = transport.last_request();
        assert_eq!(url, None);
    }

    #[test]
    fn credentials_constructor_validates_inputs() {
        assert!(Credentials::new("   ", "pass").is_err());
        assert!(Credentials::new("user", "").is_err());
        assert!(Credentials::new("user", "pass").is_ok());
    }

    #[test]
    fn builder_overrides_are_applied() {
        let client = PswinClient::builder(Credentials::new("user", "password").unwrap())
            .endpoint(GatewayUrl::new("https://example.invalid/gw").unwrap())
            .default_sender(SenderId::new("MyShop").unwrap())
            .build()
            .unwrap();
        assert_eq!(client.endpoint, "https://example.invalid/gw");
        assert_eq!(
            client.default_sender.as_ref().map(SenderId::as_str),
            Some("MyShop")
        );

        let client = PswinClient::new(Credentials::new("user", "password").unwrap());
        assert_eq!(client.endpoint, DEFAULT_ENDPOINT);
        assert_eq!(client.default_sender, None);
    }
}
