//! HTTP transport implementation using reqwest.
//!
//! This adapter implements the `HttpClient` port on top of
//! `reqwest::Client`. Non-success statuses come back as responses;
//! only transport-level failures are errors.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use async_trait::async_trait;
use reqwest::{Client, Method, Url};

use tessera_application::ports::{HttpClient, HttpClientError};
use tessera_domain::{HttpMethod, RequestBody, RequestSpec, ResponseSpec};

/// HTTP transport backed by reqwest.
pub struct ReqwestHttpClient {
    client: Client,
}

impl ReqwestHttpClient {
    /// Creates a transport with default settings: redirects limited to
    /// 10, TLS verification enabled. Timeouts are per-request, taken
    /// from the [`RequestSpec`].
    ///
    /// # Errors
    /// Returns an error if the underlying client cannot be created.
    pub fn new() -> Result<Self, HttpClientError> {
        let client = Client::builder()
            .user_agent(concat!("Tessera/", env!("CARGO_PKG_VERSION")))
            .redirect(reqwest::redirect::Policy::limited(10))
            .build()
            .map_err(|e| HttpClientError::Other(e.to_string()))?;

        Ok(Self { client })
    }

    /// Creates a transport over a preconfigured reqwest client.
    #[must_use]
    pub const fn with_client(client: Client) -> Self {
        Self { client }
    }

    const fn to_reqwest_method(method: HttpMethod) -> Method {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
            HttpMethod::Put => Method::PUT,
            HttpMethod::Patch => Method::PATCH,
            HttpMethod::Delete => Method::DELETE,
            HttpMethod::Head => Method::HEAD,
            HttpMethod::Options => Method::OPTIONS,
        }
    }

    /// Applies the body to the builder, validating JSON content first.
    fn apply_body(
        builder: reqwest::RequestBuilder,
        body: &RequestBody,
        has_content_type_header: bool,
    ) -> Result<reqwest::RequestBuilder, HttpClientError> {
        if body.is_json() && !body.content.is_empty() {
            let _: serde_json::Value = serde_json::from_str(&body.content)
                .map_err(|e| HttpClientError::InvalidBody(format!("invalid JSON: {e}")))?;
        }

        let builder = if has_content_type_header {
            builder
        } else {
            builder.header("Content-Type", &body.content_type)
        };

        Ok(builder.body(body.content.clone()))
    }

    fn map_error(error: &reqwest::Error, timeout_ms: u64) -> HttpClientError {
        if error.is_timeout() {
            return HttpClientError::Timeout { timeout_ms };
        }
        if error.is_connect() {
            return HttpClientError::ConnectionFailed(error.to_string());
        }
        HttpClientError::Other(error.to_string())
    }
}

#[async_trait]
impl HttpClient for ReqwestHttpClient {
    async fn execute(&self, request: &RequestSpec) -> Result<ResponseSpec, HttpClientError> {
        let parsed_url = Url::parse(&request.url)
            .map_err(|e| HttpClientError::InvalidUrl(format!("{e}: {}", request.url)))?;

        let start = Instant::now();

        let mut builder = self
            .client
            .request(Self::to_reqwest_method(request.method), parsed_url)
            .timeout(Duration::from_millis(request.timeout_ms));

        for header in &request.headers {
            builder = builder.header(&header.name, &header.value);
        }

        if let Some(body) = &request.body {
            let has_content_type = request.header("content-type").is_some();
            builder = Self::apply_body(builder, body, has_content_type)?;
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Self::map_error(&e, request.timeout_ms))?;

        let duration = start.elapsed();
        let status = response.status().as_u16();

        let headers: HashMap<String, String> = response
            .headers()
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("<binary>").to_string()))
            .collect();

        let body = response
            .bytes()
            .await
            .map_err(|e| HttpClientError::Other(format!("failed to read body: {e}")))?
            .to_vec();

        Ok(ResponseSpec::new(status, headers, body, duration))
    }
}
