use serde_json::Value;

use crate::{
    ErrorSurfacingTransport, HttpRequestFactory, HttpTransport, RequestFactory, Transport,
};

/// The fixed base URL for the Apple Music API.
///
/// The URL already ends in a slash, and [`Client::api_request`] joins the
/// service path with another literal `/`, so every request URL contains
/// `/v1//`. The API accepts this form and existing integrations depend on
/// the exact URLs, so the join is kept as-is rather than normalized.
pub const API_URL: &str = "https://api.music.apple.com/v1/";

/// How JSON response bodies are materialized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseType {
    /// Decode into a generic JSON value tree.
    #[default]
    Object,
    /// Decode the top level into a key-ordered mapping.
    Assoc,
}

/// A decoded JSON response body.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiBody {
    /// Generic value tree, produced in [`ResponseType::Object`] mode.
    Object(Value),
    /// Top-level mapping, produced in [`ResponseType::Assoc`] mode.
    Assoc(serde_json::Map<String, Value>),
}
impl ApiBody {
    /// Collapse into a plain [`Value`], whichever mode produced it.
    pub fn into_value(self) -> Value {
        match self {
            ApiBody::Object(value) => value,
            ApiBody::Assoc(map) => Value::Object(map),
        }
    }
}

#[derive(Debug, Clone)]
/// The error returned when an API request fails: the transport call (or
/// the request construction before it) failed, and the underlying
/// message and code are carried in the fixed
/// `API Request: {service}, {message} ({code})` format.
pub struct AppleMusicApiError {
    message: String,
    code: i32,
}
impl AppleMusicApiError {
    pub(crate) fn request(service: &str, source: &crate::TransportError) -> Self {
        Self {
            message: format!("API Request: {service}, {} ({})", source.message, source.code),
            code: source.code,
        }
    }

    /// The formatted message: service path, underlying message, underlying code.
    pub fn message(&self) -> &str {
        &self.message
    }

    /// The code of the underlying failure.
    pub fn code(&self) -> i32 {
        self.code
    }
}
impl std::fmt::Display for AppleMusicApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.message)
    }
}
impl std::error::Error for AppleMusicApiError {}

/// A result type for the client.
pub type ClientResult<T> = Result<T, AppleMusicApiError>;

/// A client for the Apple Music API.
///
/// Requests take `&mut self`: the client records the last response
/// status, and exclusive access replaces any internal locking. Wrap it
/// yourself if it must be shared across tasks.
pub struct Client {
    pub(crate) transport: Box<dyn Transport>,
    pub(crate) request_factory: Box<dyn RequestFactory>,
    pub(crate) developer_token: String,
    pub(crate) music_user_token: String,
    pub(crate) last_http_status_code: u16,
    pub(crate) response_type: ResponseType,
}
impl Client {
    /// Create a client with the production transport and request factory.
    /// The transport is wrapped in [`ErrorSurfacingTransport`], so error
    /// statuses fail the request.
    pub fn new() -> Self {
        Self::with_parts(
            Box::new(ErrorSurfacingTransport::new(HttpTransport::new())),
            Box::new(HttpRequestFactory),
        )
    }

    /// Create a client with an injected transport and the default request
    /// factory.
    pub fn with_transport(transport: Box<dyn Transport>) -> Self {
        Self::with_parts(transport, Box::new(HttpRequestFactory))
    }

    /// Create a client from explicitly injected parts.
    pub fn with_parts(
        transport: Box<dyn Transport>,
        request_factory: Box<dyn RequestFactory>,
    ) -> Self {
        Self {
            transport,
            request_factory,
            developer_token: String::new(),
            music_user_token: String::new(),
            last_http_status_code: 0,
            response_type: ResponseType::default(),
        }
    }

    /// Set the developer token sent as the `Authorization` bearer
    /// credential on every request. Stored verbatim.
    pub fn set_developer_token(&mut self, developer_token: impl Into<String>) {
        self.developer_token = developer_token.into();
    }

    /// The current developer token, empty if unset.
    pub fn developer_token(&self) -> &str {
        &self.developer_token
    }

    /// Set the music user token. An empty value omits the
    /// `Music-User-Token` header.
    pub fn set_music_user_token(&mut self, music_user_token: impl Into<String>) {
        self.music_user_token = music_user_token.into();
    }

    /// The status code of the most recently completed request, 0 before
    /// any request has completed. Left unchanged by failed requests.
    pub fn last_http_status_code(&self) -> u16 {
        self.last_http_status_code
    }

    /// Select how response bodies are decoded, starting with the next
    /// request.
    pub fn set_response_type(&mut self, response_type: ResponseType) {
        self.response_type = response_type;
    }

    /// The current decode mode.
    pub fn response_type(&self) -> ResponseType {
        self.response_type
    }
}
impl Default for Client {
    fn default() -> Self {
        Self::new()
    }
}
