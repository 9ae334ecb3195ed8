//! Request core shared by the async and blocking executors
//!
//! Everything that decides *what* goes on the wire lives here: header
//! construction, URL and query resolution, body serialization, the retry
//! decision and response classification. Executors only decide *how* the
//! bytes are sent.

use crate::config::ClientConfig;
use crate::error::{Error, Result};
use crate::http::request::RequestSpec;
use crate::http::response::Success;
use crate::observability::CallLog;
use activetrail_transport::{HttpRequest, HttpResponse, RetryPolicy, TransportError};
use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, USER_AGENT};
use http::{HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use std::time::Duration;
use url::Url;

/// Resolved, validated form of a [`ClientConfig`].
#[derive(Debug, Clone)]
pub struct RequestCore {
    base_url: Url,
    headers: HeaderMap,
    timeout: Duration,
    retry: RetryPolicy,
}

impl RequestCore {
    /// Validate `config` and precompute the default headers.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] for a missing or empty API key, a base URL
    /// that is not absolute http(s), or a header that cannot be encoded.
    pub fn new(config: &ClientConfig) -> Result<Self> {
        let api_key = config
            .api_key
            .as_ref()
            .map(|key| key.expose_secret().trim())
            .filter(|key| !key.is_empty())
            .ok_or_else(|| Error::Config("an API key is required".to_string()))?;

        let base_url = parse_base_url(config.base_url())?;

        let mut headers = HeaderMap::new();
        let mut auth = HeaderValue::from_str(api_key)
            .map_err(|_| Error::Config("API key contains invalid header characters".to_string()))?;
        auth.set_sensitive(true);
        headers.insert(AUTHORIZATION, auth);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
        headers.insert(
            USER_AGENT,
            HeaderValue::from_str(&config.user_agent())
                .map_err(|_| Error::Config("invalid User-Agent".to_string()))?,
        );
        for (name, value) in &config.default_headers {
            headers.insert(name.clone(), value.clone());
        }

        Ok(Self {
            base_url,
            headers,
            timeout: config.timeout,
            retry: RetryPolicy::new(config.max_retries),
        })
    }

    /// The resolved base URL (always ends with `/`).
    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Retry policy for transport failures.
    pub fn retry_policy(&self) -> RetryPolicy {
        self.retry
    }

    /// Resolve `path` against the base URL and append the query pairs.
    ///
    /// A leading `/` on the path is ignored so the base path (`/api/`) is
    /// kept.
    pub fn url_for(&self, spec: &RequestSpec) -> Result<Url> {
        let mut url = self
            .base_url
            .join(spec.path.trim_start_matches('/'))
            .map_err(|e| Error::validation(format!("invalid request path '{}': {e}", spec.path)))?;

        if !spec.query.is_empty() {
            url.query_pairs_mut()
                .extend_pairs(spec.query.iter().map(|(k, v)| (k.as_str(), v.as_str())));
        }

        Ok(url)
    }

    /// Build the wire request for `spec`.
    ///
    /// # Errors
    ///
    /// Returns a local [`Error::Validation`] for a header or path that cannot
    /// be encoded.
    pub fn prepare(&self, spec: &RequestSpec) -> Result<HttpRequest> {
        let url = self.url_for(spec)?;

        let mut headers = self.headers.clone();
        for (name, value) in &spec.headers {
            let name = HeaderName::from_bytes(name.as_bytes())
                .map_err(|_| Error::validation(format!("invalid header name: {name}")))?;
            let value = HeaderValue::from_str(value)
                .map_err(|_| Error::validation(format!("invalid header value for {name}")))?;
            headers.insert(name, value);
        }

        let mut request = HttpRequest::new(spec.method.clone(), url.as_str())
            .with_timeout(self.timeout);
        request.headers = headers;

        if let Some(body) = &spec.body {
            let bytes = serde_json::to_vec(body)
                .map_err(|e| Error::validation(format!("request body is not valid JSON: {e}")))?;
            request = request.with_body(bytes);
        }

        Ok(request)
    }

    /// Whether to try again after `retries_done` retries failed with `error`.
    pub fn should_retry(&self, error: &TransportError, retries_done: u32) -> bool {
        self.retry.should_retry(error, retries_done)
    }

    /// Classify the final outcome of an execution and log it.
    pub fn finish(
        &self,
        log: &CallLog,
        outcome: std::result::Result<HttpResponse, TransportError>,
    ) -> Result<Success> {
        match outcome {
            Ok(response) => match Success::from_response(&response) {
                Ok(success) => {
                    log.succeeded(response.status, response.body.len());
                    Ok(success)
                }
                Err(error) => {
                    log.failed(Some(response.status), &error);
                    Err(error)
                }
            },
            Err(error) => {
                let error = Error::transport(error, log.attempts());
                log.failed(None, &error);
                Err(error)
            }
        }
    }
}

fn parse_base_url(raw: &str) -> Result<Url> {
    let mut raw = raw.trim().to_string();
    if !raw.ends_with('/') {
        raw.push('/');
    }

    let url = Url::parse(&raw).map_err(|e| Error::Config(format!("invalid base URL '{raw}': {e}")))?;
    match url.scheme() {
        "http" | "https" => {}
        scheme => {
            return Err(Error::Config(format!(
                "base URL must use http or https, got '{scheme}'"
            )));
        }
    }
    if url.host_str().is_none() {
        return Err(Error::Config(format!("base URL has no host: '{raw}'")));
    }

    Ok(url)
}
