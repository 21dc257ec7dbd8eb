use std::{collections::BTreeMap, io::Read};

use async_trait::async_trait;

/// A request payload.
pub enum Body {
    /// In-memory bytes.
    Bytes(Vec<u8>),
    /// A streaming handle. Read to completion before dispatch.
    Reader(Box<dyn Read + Send + Sync>),
}
impl Body {
    pub(crate) fn into_bytes(self) -> Result<Vec<u8>, TransportError> {
        match self {
            Body::Bytes(bytes) => Ok(bytes),
            Body::Reader(mut reader) => {
                let mut bytes = Vec::new();
                reader
                    .read_to_end(&mut bytes)
                    .map_err(|e| TransportError::new(e.to_string(), 0))?;
                Ok(bytes)
            }
        }
    }
}
impl std::fmt::Debug for Body {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Body::Bytes(bytes) => f.debug_tuple("Bytes").field(&bytes.len()).finish(),
            Body::Reader(_) => f.debug_tuple("Reader").finish(),
        }
    }
}
impl From<Vec<u8>> for Body {
    fn from(bytes: Vec<u8>) -> Self {
        Body::Bytes(bytes)
    }
}
impl From<String> for Body {
    fn from(text: String) -> Self {
        Body::Bytes(text.into_bytes())
    }
}
impl From<&str> for Body {
    fn from(text: &str) -> Self {
        Body::Bytes(text.as_bytes().to_vec())
    }
}

/// A request ready for dispatch. Built fresh for every call and consumed
/// by the transport; never stored.
#[derive(Debug)]
pub struct Request {
    /// The HTTP method token.
    pub method: String,
    /// The absolute request URL.
    pub url: String,
    /// Header map, one value per name.
    pub headers: BTreeMap<String, String>,
    /// Optional payload.
    pub body: Option<Body>,
}

/// A response as seen by the client: the status code and the raw body.
#[derive(Debug, Clone)]
pub struct Response {
    /// The HTTP status code.
    pub status: u16,
    /// The raw response body.
    pub body: Vec<u8>,
}

/// An error raised by a transport or request factory.
#[derive(Debug, Clone)]
pub struct TransportError {
    /// Description of the failure.
    pub message: String,
    /// Numeric code from the underlying library, or the HTTP status for
    /// surfaced error responses. 0 when no code applies.
    pub code: i32,
}
impl TransportError {
    /// Create a new transport error.
    pub fn new(message: impl Into<String>, code: i32) -> Self {
        Self {
            message: message.into(),
            code,
        }
    }
}
impl std::fmt::Display for TransportError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.message, self.code)
    }
}
impl std::error::Error for TransportError {}
impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        TransportError::new(e.to_string(), 0)
    }
}

/// Turns a constructed request into a response or a transport error.
#[async_trait]
pub trait Transport: Send + Sync {
    /// Send the request and return the response, however the server
    /// answered. Status policy is left to the caller or a wrapping
    /// [`ErrorSurfacingTransport`].
    async fn send(&self, request: Request) -> Result<Response, TransportError>;
}

/// Assembles a request from its parts.
pub trait RequestFactory: Send + Sync {
    /// Build a request, validating the pieces.
    fn build(
        &self,
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<Body>,
    ) -> Result<Request, TransportError>;
}

/// The production transport, backed by reqwest.
pub struct HttpTransport {
    client: reqwest::Client,
}
impl HttpTransport {
    /// Create a transport with a fresh reqwest client.
    pub fn new() -> Self {
        Self {
            client: reqwest::Client::new(),
        }
    }
}
impl Default for HttpTransport {
    fn default() -> Self {
        Self::new()
    }
}
#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let method = reqwest::Method::from_bytes(request.method.as_bytes())
            .map_err(|e| TransportError::new(e.to_string(), 0))?;

        let mut builder = self.client.request(method, &request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body.into_bytes()?);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.bytes().await?.to_vec();
        Ok(Response { status, body })
    }
}

/// Decorator that surfaces non-2xx/3xx responses as transport errors,
/// carrying the status code as the error code. Installed around the
/// default transport by [`Client::new`](crate::Client::new); an injected
/// transport that already enforces its own status policy can skip it.
pub struct ErrorSurfacingTransport<T> {
    inner: T,
}
impl<T: Transport> ErrorSurfacingTransport<T> {
    /// Wrap a transport with the error-surfacing policy.
    pub fn new(inner: T) -> Self {
        Self { inner }
    }
}
#[async_trait]
impl<T: Transport> Transport for ErrorSurfacingTransport<T> {
    async fn send(&self, request: Request) -> Result<Response, TransportError> {
        let response = self.inner.send(request).await?;
        if (200..400).contains(&response.status) {
            Ok(response)
        } else {
            Err(TransportError::new(
                format!("server responded with status {}", response.status),
                i32::from(response.status),
            ))
        }
    }
}

/// The production request factory.
pub struct HttpRequestFactory;
impl RequestFactory for HttpRequestFactory {
    fn build(
        &self,
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<Body>,
    ) -> Result<Request, TransportError> {
        reqwest::Method::from_bytes(method.as_bytes())
            .map_err(|_| TransportError::new(format!("invalid HTTP method: {method:?}"), 0))?;

        Ok(Request {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body,
        })
    }
}
