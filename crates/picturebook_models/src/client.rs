//! Shared HTTP client for every remote provider.
//!
//! All remote calls go through [`ProviderClient`], which turns every outcome
//! into a [`ProviderResult`]: transport problems become
//! [`ProviderErrorKind::Transport`], non-2xx responses become
//! [`ProviderErrorKind::Rejection`] and unreadable bodies become
//! [`ProviderErrorKind::Malformed`].

use crate::ProviderMetrics;
use picturebook_error::{ProviderError, ProviderResult};
use reqwest::{Client, RequestBuilder, Response, header::CONTENT_TYPE};
use serde::Serialize;
use serde_json::Value;
use std::time::{Duration, Instant};
use tracing::{debug, instrument, warn};

/// Longest response body excerpt kept in a rejection message.
const MAX_ERROR_BODY: usize = 512;

/// How a request authenticates.
#[derive(Clone, PartialEq, Eq)]
pub enum RequestAuth {
    /// No credentials
    None,
    /// `Authorization: Bearer {token}`
    Bearer(String),
    /// A provider-specific header carrying the key
    Header {
        /// Header name
        name: &'static str,
        /// Key
        value: String,
    },
}

impl std::fmt::Debug for RequestAuth {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestAuth::None => write!(f, "None"),
            RequestAuth::Bearer(_) => write!(f, "Bearer(..)"),
            RequestAuth::Header { name, .. } => write!(f, "Header({name})"),
        }
    }
}

/// One remote call: who it is for, where it goes and how long it may take.
#[derive(Debug, Clone, derive_getters::Getters)]
pub struct ProviderCall {
    /// Provider name used in errors, logs and metrics
    provider: String,
    /// Absolute URL
    url: String,
    /// Credentials
    auth: RequestAuth,
    /// Whole-request timeout
    timeout: Duration,
}

impl ProviderCall {
    /// A call with no credentials.
    pub fn new(provider: impl Into<String>, url: impl Into<String>, timeout: Duration) -> Self {
        Self {
            provider: provider.into(),
            url: url.into(),
            auth: RequestAuth::None,
            timeout,
        }
    }

    /// Attach credentials.
    pub fn with_auth(mut self, auth: RequestAuth) -> Self {
        self.auth = auth;
        self
    }

    /// Same provider, credentials and timeout, different URL.
    pub fn with_url(&self, url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..self.clone()
        }
    }
}

/// A raw response body with its declared type.
#[derive(Debug, Clone, PartialEq, Eq, derive_getters::Getters)]
pub struct ResponseBytes {
    /// Body
    bytes: Vec<u8>,
    /// `Content-Type` header, if present
    content_type: Option<String>,
}

impl ResponseBytes {
    /// Split into body and content type.
    pub fn into_parts(self) -> (Vec<u8>, Option<String>) {
        (self.bytes, self.content_type)
    }
}

/// HTTP client shared by all providers.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone, Default)]
pub struct ProviderClient {
    http: Client,
}

impl ProviderClient {
    /// Create a client with a fresh connection pool.
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap an existing `reqwest` client.
    pub fn with_http(http: Client) -> Self {
        Self { http }
    }

    /// POST a JSON body and parse a JSON response.
    #[instrument(skip(self, body), fields(provider = %call.provider, url = %call.url))]
    pub async fn post_json<B>(&self, call: &ProviderCall, body: &B) -> ProviderResult<Value>
    where
        B: Serialize + ?Sized,
    {
        let started = Instant::now();
        let result = match self.send(call, self.http.post(&call.url).json(body)).await {
            Ok(response) => read_json(call, response).await,
            Err(e) => Err(e),
        };
        observe(call, started, &result);
        result
    }

    /// POST a JSON body and return the raw response body.
    #[instrument(skip(self, body), fields(provider = %call.provider, url = %call.url))]
    pub async fn post_for_bytes<B>(
        &self,
        call: &ProviderCall,
        body: &B,
    ) -> ProviderResult<ResponseBytes>
    where
        B: Serialize + ?Sized,
    {
        let started = Instant::now();
        let result = match self.send(call, self.http.post(&call.url).json(body)).await {
            Ok(response) => read_bytes(call, response).await,
            Err(e) => Err(e),
        };
        observe(call, started, &result);
        result
    }

    /// GET and parse a JSON response.
    #[instrument(skip(self), fields(provider = %call.provider, url = %call.url))]
    pub async fn get_json(&self, call: &ProviderCall) -> ProviderResult<Value> {
        let started = Instant::now();
        let result = match self.send(call, self.http.get(&call.url)).await {
            Ok(response) => read_json(call, response).await,
            Err(e) => Err(e),
        };
        observe(call, started, &result);
        result
    }

    /// GET and return the raw response body.
    #[instrument(skip(self), fields(provider = %call.provider, url = %call.url))]
    pub async fn get_bytes(&self, call: &ProviderCall) -> ProviderResult<ResponseBytes> {
        let started = Instant::now();
        let result = match self.send(call, self.http.get(&call.url)).await {
            Ok(response) => read_bytes(call, response).await,
            Err(e) => Err(e),
        };
        observe(call, started, &result);
        result
    }

    async fn send(&self, call: &ProviderCall, request: RequestBuilder) -> ProviderResult<Response> {
        let request = match &call.auth {
            RequestAuth::None => request,
            RequestAuth::Bearer(token) => request.bearer_auth(token),
            RequestAuth::Header { name, value } => request.header(*name, value),
        };

        let response = request.timeout(call.timeout).send().await.map_err(|e| {
            if e.is_timeout() {
                ProviderError::transport(
                    &call.provider,
                    format!("timed out after {}s", call.timeout.as_secs_f32()),
                )
            } else {
                ProviderError::transport(&call.provider, format!("request failed: {}", e))
            }
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ProviderError::rejection(
                &call.provider,
                status.as_u16(),
                truncate_chars(body.trim(), MAX_ERROR_BODY),
            ));
        }
        debug!(status = status.as_u16(), "Provider responded");
        Ok(response)
    }
}

async fn read_json(call: &ProviderCall, response: Response) -> ProviderResult<Value> {
    let text = response.text().await.map_err(|e| {
        ProviderError::transport(&call.provider, format!("failed reading body: {}", e))
    })?;
    serde_json::from_str(&text).map_err(|e| {
        ProviderError::malformed(
            &call.provider,
            format!(
                "response is not JSON ({}): {}",
                e,
                truncate_chars(&text, MAX_ERROR_BODY)
            ),
        )
    })
}

async fn read_bytes(call: &ProviderCall, response: Response) -> ProviderResult<ResponseBytes> {
    let content_type = response
        .headers()
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(str::to_string);
    let bytes = response.bytes().await.map_err(|e| {
        ProviderError::transport(&call.provider, format!("failed reading body: {}", e))
    })?;
    Ok(ResponseBytes {
        bytes: bytes.to_vec(),
        content_type,
    })
}

fn observe<T>(call: &ProviderCall, started: Instant, result: &ProviderResult<T>) {
    let metrics = ProviderMetrics::get();
    metrics.record_request(&call.provider, started.elapsed().as_secs_f64());
    if let Err(e) = result {
        warn!(provider = %call.provider, class = e.kind.class(), error = %e.kind, "Provider call failed");
        metrics.record_failure(&call.provider, e.kind.class());
    }
}

/// At most `max` characters of `text`, cut on a character boundary.
pub(crate) fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
