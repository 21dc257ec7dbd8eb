use std::collections::BTreeMap;

use serde_json::Value;

use crate::{API_URL, ApiBody, AppleMusicApiError, Body, Client, ClientResult, ResponseType};

/// Making requests to the Apple Music API.
impl Client {
    /// Perform an authenticated request against the API.
    ///
    /// `service` is appended to [`API_URL`] with a literal `/` (see the
    /// note on the constant about the resulting double slash). The
    /// authorization headers are computed from the current tokens and
    /// merged over `headers`, winning any key collision. On success the
    /// response status is recorded and the body is decoded as JSON per
    /// the current response type; a body that does not parse decodes to
    /// null rather than failing.
    ///
    /// # Errors
    ///
    /// Returns an error if the request cannot be built or the transport
    /// fails, including error statuses the transport surfaces as
    /// failures.
    pub async fn api_request(
        &mut self,
        method: &str,
        service: &str,
        headers: &[(&str, String)],
        body: Option<Body>,
    ) -> ClientResult<ApiBody> {
        let url = format!("{API_URL}/{service}");

        let mut merged: BTreeMap<String, String> = headers
            .iter()
            .map(|(name, value)| (name.to_string(), value.clone()))
            .collect();
        for (name, value) in self.authorization_headers() {
            merged.insert(name, value);
        }

        tracing::debug!("dispatching {method} {url}");

        let result = match self.request_factory.build(method, &url, &merged, body) {
            Ok(request) => self.transport.send(request).await,
            Err(e) => Err(e),
        };
        let response = match result {
            Ok(response) => response,
            Err(e) => {
                tracing::warn!("request to {service} failed: {e}");
                return Err(AppleMusicApiError::request(service, &e));
            }
        };

        self.last_http_status_code = response.status;
        tracing::debug!("{service} completed with status {}", response.status);

        Ok(match self.response_type {
            ResponseType::Object => {
                ApiBody::Object(serde_json::from_slice(&response.body).unwrap_or(Value::Null))
            }
            ResponseType::Assoc => {
                ApiBody::Assoc(serde_json::from_slice(&response.body).unwrap_or_default())
            }
        })
    }

    fn authorization_headers(&self) -> Vec<(String, String)> {
        let mut headers = vec![(
            "Authorization".to_string(),
            format!("Bearer {}", self.developer_token),
        )];
        if !self.music_user_token.is_empty() {
            headers.push(("Music-User-Token".to_string(), self.music_user_token.clone()));
        }
        headers
    }
}
