//! Authenticated request wrapper.

use std::sync::Arc;
use std::time::Duration;

use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderName, HeaderValue};
use reqwest::{Client, Method, Response, StatusCode, Url};
use serde::Serialize;
use tracing::{debug, warn};

use crate::application::services::SessionContext;
use crate::domain::errors::ApiError;

const USER_AGENT: &str = concat!("airsense/", env!("CARGO_PKG_VERSION"));

/// Per-request options for [`ApiClient::fetch`].
#[derive(Debug, Clone)]
pub struct FetchOptions {
    method: Method,
    headers: Vec<(String, String)>,
    body: Option<Vec<u8>>,
    query: Vec<(String, String)>,
}

impl Default for FetchOptions {
    fn default() -> Self {
        Self::new(Method::GET)
    }
}

impl FetchOptions {
    /// Options for `method` with no headers, query or body.
    #[must_use]
    pub const fn new(method: Method) -> Self {
        Self {
            method,
            headers: Vec::new(),
            body: None,
            query: Vec::new(),
        }
    }

    /// GET request.
    #[must_use]
    pub fn get() -> Self {
        Self::new(Method::GET)
    }

    /// POST request.
    #[must_use]
    pub fn post() -> Self {
        Self::new(Method::POST)
    }

    /// DELETE request.
    #[must_use]
    pub fn delete() -> Self {
        Self::new(Method::DELETE)
    }

    /// Adds a header. It replaces a default header of the same name.
    #[must_use]
    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Serializes `body` as the JSON request body.
    ///
    /// # Errors
    /// Returns [`ApiError::Unexpected`] if the value cannot be serialized.
    pub fn json<T: Serialize + ?Sized>(mut self, body: &T) -> Result<Self, ApiError> {
        let bytes = serde_json::to_vec(body)
            .map_err(|e| ApiError::unexpected(format!("failed to encode request: {e}")))?;
        self.body = Some(bytes);
        Ok(self)
    }

    /// Request method.
    #[must_use]
    pub const fn method(&self) -> &Method {
        &self.method
    }
}

/// HTTP client that attaches the session credential to every request.
pub struct ApiClient {
    client: Client,
    base_url: Url,
    session: Arc<SessionContext>,
}

impl ApiClient {
    /// Creates a client for `base_url` with an overall request timeout.
    ///
    /// # Errors
    /// Returns error if the base URL is invalid or the HTTP client cannot be built.
    pub fn new(
        base_url: &str,
        timeout: Duration,
        session: Arc<SessionContext>,
    ) -> Result<Self, ApiError> {
        let base_url = Url::parse(base_url.trim_end_matches('/'))
            .map_err(|e| ApiError::unexpected(format!("invalid base URL {base_url}: {e}")))?;

        let client = Client::builder()
            .user_agent(USER_AGENT)
            .timeout(timeout)
            .build()
            .map_err(|e| ApiError::unexpected(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url,
            session,
        })
    }

    /// Session whose credential is attached.
    #[must_use]
    pub const fn session(&self) -> &Arc<SessionContext> {
        &self.session
    }

    /// Base URL relative paths are joined onto.
    #[must_use]
    pub const fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Builds an absolute URL from path segments, percent-encoding each one.
    ///
    /// # Errors
    /// Returns error if the base URL cannot carry a path.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url, ApiError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|()| ApiError::unexpected("base URL cannot have a path"))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    fn resolve(&self, target: &str) -> Result<Url, ApiError> {
        if target.starts_with("http://") || target.starts_with("https://") {
            return Url::parse(target)
                .map_err(|e| ApiError::unexpected(format!("invalid URL {target}: {e}")));
        }

        let base = self.base_url.as_str().trim_end_matches('/');
        let path = target.trim_start_matches('/');
        Url::parse(&format!("{base}/{path}"))
            .map_err(|e| ApiError::unexpected(format!("invalid URL {target}: {e}")))
    }

    /// Sends a request with the default headers and the current credential,
    /// returning the response uninterpreted.
    ///
    /// A `401` on a request that carried a credential expires the session
    /// before the response is handed back.
    ///
    /// # Errors
    /// Returns [`ApiError::Network`] when the request cannot be sent.
    pub async fn fetch(&self, target: &str, options: FetchOptions) -> Result<Response, ApiError> {
        let url = self.resolve(target)?;
        let token = self.session.token().await;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        if let Some(token) = &token {
            let mut value = HeaderValue::from_str(&token.bearer())
                .map_err(|e| ApiError::unexpected(format!("invalid credential header: {e}")))?;
            value.set_sensitive(true);
            headers.insert(AUTHORIZATION, value);
        }
        for (name, value) in options.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|e| ApiError::unexpected(format!("invalid header name {name}: {e}")))?;
            let value = HeaderValue::from_str(&value)
                .map_err(|e| ApiError::unexpected(format!("invalid value for {name}: {e}")))?;
            headers.insert(name, value);
        }

        debug!(
            method = %options.method,
            path = url.path(),
            authenticated = token.is_some(),
            "Sending request"
        );

        let mut request = self.client.request(options.method, url).headers(headers);
        if !options.query.is_empty() {
            request = request.query(&options.query);
        }
        if let Some(body) = options.body {
            request = request.body(body);
        }

        let response = request.send().await.map_err(|e| {
            warn!(error = %e, "Request failed");
            if e.is_timeout() {
                ApiError::network("request timed out")
            } else if e.is_connect() {
                ApiError::network("failed to connect to server")
            } else {
                ApiError::network(e.to_string())
            }
        })?;

        if response.status() == StatusCode::UNAUTHORIZED {
            if let Some(sent) = &token {
                warn!(path = response.url().path(), "Credential rejected, expiring session");
                self.session.expire(sent).await;
            }
        }

        Ok(response)
    }
}
