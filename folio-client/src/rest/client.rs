//! REST client implementation with bearer auth, retry, and error mapping.

use reqwest::{Client, Method, Response, header};
use serde::de::DeserializeOwned;
use std::sync::Arc;
use tracing::{debug, warn};

use folio_core::error::{ApiError, FolioError, GENERIC_API_MESSAGE, NetworkError};

use super::config::RestConfig;
use super::token::TokenStore;

/// REST client for the Folio backend.
///
/// Every outgoing request carries `Authorization: Bearer <token>` when the
/// token store holds one; without a token the request proceeds
/// unauthenticated and the server is expected to reject it.
///
/// # Example
///
/// ```ignore
/// use folio_client::rest::{RestClient, RestConfig, TokenStore};
/// use std::sync::Arc;
///
/// let config = RestConfig::builder()
///     .base_url("https://api.example.com")
///     .build();
/// let tokens = Arc::new(TokenStore::load(".folio/token"));
///
/// let client = RestClient::new(config, tokens)?;
/// let portfolios: Vec<PortfolioSummary> =
///     client.get("/portfolios").send_json().await?;
/// ```
pub struct RestClient {
    config: RestConfig,
    http_client: Client,
    tokens: Arc<TokenStore>,
}

impl RestClient {
    /// Creates a new REST client.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the HTTP client cannot be created.
    pub fn new(config: RestConfig, tokens: Arc<TokenStore>) -> Result<Self, NetworkError> {
        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::USER_AGENT,
            config
                .user_agent
                .parse()
                .map_err(|_| NetworkError::ConnectionFailed {
                    reason: "Invalid user agent".to_string(),
                })?,
        );

        let http_client = Client::builder()
            .timeout(config.timeout())
            .default_headers(headers)
            .build()
            .map_err(|e| NetworkError::ConnectionFailed {
                reason: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self {
            config,
            http_client,
            tokens,
        })
    }

    /// Creates a GET request builder.
    #[must_use]
    pub fn get(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::GET, path)
    }

    /// Creates a POST request builder.
    #[must_use]
    pub fn post(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::POST, path)
    }

    /// Creates a PUT request builder.
    #[must_use]
    pub fn put(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::PUT, path)
    }

    /// Creates a DELETE request builder.
    #[must_use]
    pub fn delete(&self, path: &str) -> RequestBuilder<'_> {
        RequestBuilder::new(self, Method::DELETE, path)
    }

    /// Returns the configuration.
    #[must_use]
    pub fn config(&self) -> &RestConfig {
        &self.config
    }

    /// Returns the token store.
    #[must_use]
    pub fn tokens(&self) -> &Arc<TokenStore> {
        &self.tokens
    }

    /// Builds the full URL for a path.
    #[must_use]
    pub fn build_url(&self, path: &str) -> String {
        if path.starts_with("http://") || path.starts_with("https://") {
            path.to_string()
        } else {
            format!("{}{}", self.config.base_url.trim_end_matches('/'), path)
        }
    }

    async fn execute_request(
        &self,
        method: Method,
        url: &str,
        query: &[(String, String)],
        body: Option<&str>,
    ) -> Result<Response, NetworkError> {
        debug!(method = %method, url = %url, "Sending request");

        let mut request = self.http_client.request(method, url);

        if !query.is_empty() {
            request = request.query(query);
        }

        // Bearer token is read per request; login/logout between calls
        // takes effect immediately.
        if let Some(token) = self.tokens.current() {
            request = request.bearer_auth(token);
        }

        if let Some(b) = body {
            request = request
                .header(header::CONTENT_TYPE, "application/json")
                .body(b.to_string());
        }

        request.send().await.map_err(|e| {
            if e.is_timeout() {
                NetworkError::Timeout {
                    timeout_ms: self.config.timeout_ms,
                }
            } else if e.is_connect() {
                NetworkError::ConnectionFailed {
                    reason: e.to_string(),
                }
            } else {
                NetworkError::Http {
                    status_code: e.status().map_or(0, |s| s.as_u16()),
                    reason: e.to_string(),
                }
            }
        })
    }
}

/// Request builder for REST API calls.
pub struct RequestBuilder<'a> {
    client: &'a RestClient,
    method: Method,
    path: String,
    query_params: Vec<(String, String)>,
    body: Option<String>,
}

impl<'a> RequestBuilder<'a> {
    fn new(client: &'a RestClient, method: Method, path: &str) -> Self {
        Self {
            client,
            method,
            path: path.to_string(),
            query_params: Vec::new(),
            body: None,
        }
    }

    /// Adds a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query_params.push((key.into(), value.into()));
        self
    }

    /// Sets the request body as JSON.
    #[must_use]
    pub fn json<T: serde::Serialize>(mut self, body: &T) -> Self {
        self.body = serde_json::to_string(body).ok();
        self
    }

    /// Sends the request and returns the raw response.
    ///
    /// Transient failures (timeouts, connection failures, 502/503/504)
    /// retry with exponential backoff up to the configured limit. 4xx
    /// responses never retry.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` if the request fails at the transport level.
    pub async fn send(self) -> Result<Response, NetworkError> {
        let url = self.client.build_url(&self.path);

        let mut attempt = 0u32;
        loop {
            let result = self
                .client
                .execute_request(
                    self.method.clone(),
                    &url,
                    &self.query_params,
                    self.body.as_deref(),
                )
                .await;

            match result {
                Ok(response) => {
                    let status = response.status().as_u16();
                    if matches!(status, 502 | 503 | 504) && self.client.config.should_retry(attempt)
                    {
                        let delay = self.client.config.calculate_retry_delay(attempt);
                        warn!(
                            attempt = attempt + 1,
                            status,
                            delay_ms = delay.as_millis(),
                            "Server unavailable, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Ok(response);
                }
                Err(e) => {
                    if e.is_recoverable() && self.client.config.should_retry(attempt) {
                        let delay = self.client.config.calculate_retry_delay(attempt);
                        warn!(
                            attempt = attempt + 1,
                            delay_ms = delay.as_millis(),
                            error = %e,
                            "Request failed, retrying"
                        );
                        tokio::time::sleep(delay).await;
                        attempt += 1;
                        continue;
                    }
                    return Err(e);
                }
            }
        }
    }

    /// Sends the request and deserializes the response as JSON.
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` for transport failures and unparseable
    /// bodies, `ApiError` for backend rejections.
    pub async fn send_json<T: DeserializeOwned>(self) -> Result<T, FolioError> {
        let response = self.send().await?;
        let response = check_status(response).await?;
        let body = response
            .text()
            .await
            .map_err(|e| NetworkError::MalformedResponse {
                reason: format!("Failed to read response: {e}"),
            })?;
        serde_json::from_str(&body).map_err(|e| {
            NetworkError::MalformedResponse {
                reason: format!("Failed to parse response: {e}"),
            }
            .into()
        })
    }

    /// Sends the request and discards the response body (204 paths).
    ///
    /// # Errors
    ///
    /// Returns `NetworkError` for transport failures, `ApiError` for
    /// backend rejections.
    pub async fn send_unit(self) -> Result<(), FolioError> {
        let response = self.send().await?;
        check_status(response).await?;
        Ok(())
    }
}

/// Maps a non-success response to a typed error.
async fn check_status(response: Response) -> Result<Response, FolioError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let code = status.as_u16();
    let body = response.text().await.unwrap_or_default();
    if code >= 500 {
        return Err(NetworkError::Http {
            status_code: code,
            reason: body,
        }
        .into());
    }
    Err(parse_api_error(code, &body).into())
}

/// Parses a backend rejection body into a typed [`ApiError`].
///
/// The backend sends `{"error": "..."}` on most rejections; older
/// endpoints use `{"message": "..."}`. Anything else falls back to a
/// generic message.
#[must_use]
pub fn parse_api_error(status: u16, body: &str) -> ApiError {
    let message = serde_json::from_str::<serde_json::Value>(body)
        .ok()
        .and_then(|json| {
            json.get("error")
                .or_else(|| json.get("message"))
                .and_then(|v| v.as_str())
                .map(ToString::to_string)
        })
        .unwrap_or_else(|| GENERIC_API_MESSAGE.to_string());

    match status {
        401 | 403 => ApiError::Unauthorized { message },
        404 => ApiError::NotFound { message },
        _ => ApiError::Rejected { status, message },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_client() -> RestClient {
        let config = RestConfig::builder()
            .base_url("https://api.example.com")
            .build();
        RestClient::new(config, Arc::new(TokenStore::in_memory())).unwrap()
    }

    #[test]
    fn test_build_url() {
        let client = test_client();
        assert_eq!(
            client.build_url("/portfolios"),
            "https://api.example.com/portfolios"
        );
        assert_eq!(
            client.build_url("https://other.com/path"),
            "https://other.com/path"
        );
    }

    #[test]
    fn test_build_url_trailing_slash() {
        let config = RestConfig::builder()
            .base_url("https://api.example.com/")
            .build();
        let client = RestClient::new(config, Arc::new(TokenStore::in_memory())).unwrap();
        assert_eq!(
            client.build_url("/portfolios"),
            "https://api.example.com/portfolios"
        );
    }

    #[test]
    fn test_request_builder_accumulates_query() {
        let client = test_client();
        let builder = client
            .get("/portfolios")
            .query("page", "1")
            .query("limit", "20");
        assert_eq!(builder.query_params.len(), 2);
    }

    #[test]
    fn test_parse_api_error_with_error_field() {
        let error = parse_api_error(422, r#"{"error": "allocations must total 100%"}"#);
        assert!(matches!(error, ApiError::Rejected { status: 422, .. }));
        assert_eq!(error.message(), "allocations must total 100%");
    }

    #[test]
    fn test_parse_api_error_with_message_field() {
        let error = parse_api_error(400, r#"{"message": "name is required"}"#);
        assert_eq!(error.message(), "name is required");
    }

    #[test]
    fn test_parse_api_error_fallback() {
        let error = parse_api_error(400, "not json at all");
        assert_eq!(error.message(), GENERIC_API_MESSAGE);
    }

    #[test]
    fn test_parse_api_error_unauthorized() {
        let error = parse_api_error(401, r#"{"error": "token expired"}"#);
        assert!(matches!(error, ApiError::Unauthorized { .. }));
    }

    #[test]
    fn test_parse_api_error_not_found() {
        let error = parse_api_error(404, "{}");
        assert!(matches!(error, ApiError::NotFound { .. }));
        assert_eq!(error.message(), GENERIC_API_MESSAGE);
    }
}
