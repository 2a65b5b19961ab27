//! HTTP transport shared by the organization and partner clients.
//!
//! Every call is exactly one attempt: build the URL, attach authentication,
//! send, read the whole body, then classify. Failure statuses become
//! [`ApiError`]s from the response body; faults that never produced a
//! response become network errors.

use std::fmt;
use std::time::Duration;

use reqwest::{Method, StatusCode};
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, instrument};

use crate::error::{ApiError, Error};
use crate::types::{QueryString, decode_body};

use super::auth::Authenticator;
use super::upload::Upload;

/// `User-Agent` sent with every request.
pub const USER_AGENT: &str = concat!("turbodocx-rust/", env!("CARGO_PKG_VERSION"));

/// Payload of an outgoing request.
#[derive(Clone, Debug, Default)]
pub(crate) enum RequestBody {
    #[default]
    Empty,
    Json(Value),
    Multipart(Upload),
}

/// Everything needed to send one request.
#[derive(Clone, Debug)]
pub(crate) struct RequestParts {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) query: QueryString,
    pub(crate) body: RequestBody,
    /// Overrides the client's default deadline.
    pub(crate) timeout: Option<Duration>,
}

impl RequestParts {
    pub(crate) fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: QueryString::new(),
            body: RequestBody::Empty,
            timeout: None,
        }
    }
}

/// Authenticated HTTP client bound to one base URL.
#[derive(Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    auth: Authenticator,
    timeout: Duration,
}

impl HttpClient {
    pub(crate) fn new(
        base_url: impl Into<String>,
        auth: Authenticator,
        timeout: Duration,
    ) -> Result<Self, Error> {
        let client = reqwest::Client::builder()
            .user_agent(USER_AGENT)
            .build()
            .map_err(|e| Error::InvalidRequest(format!("failed to build HTTP client: {e}")))?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            auth,
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Default per-call deadline.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Full URL for a path and query.
    pub(crate) fn url(&self, path: &str, query: &QueryString) -> String {
        let separator = if path.starts_with('/') || path.is_empty() {
            ""
        } else {
            "/"
        };
        format!("{}{separator}{path}{query}", self.base_url)
    }

    /// Send a request and decode its JSON body.
    ///
    /// With `unwrap` set, a sole `{"data": ...}` wrapper is removed first.
    pub(crate) async fn execute<T: DeserializeOwned>(
        &self,
        parts: RequestParts,
        unwrap: bool,
    ) -> Result<T, Error> {
        let body = self.send(parts).await?;
        Ok(decode_body(&body, unwrap)?)
    }

    /// Send a request and return the raw body bytes.
    pub(crate) async fn execute_raw(&self, parts: RequestParts) -> Result<Vec<u8>, Error> {
        self.send(parts).await
    }

    /// Single attempt. Never retries.
    #[instrument(
        name = "turbodocx.request",
        skip(self, parts),
        fields(method = %parts.method, path = %parts.path)
    )]
    async fn send(&self, parts: RequestParts) -> Result<Vec<u8>, Error> {
        let url = self.url(&parts.path, &parts.query);
        let timeout = parts.timeout.unwrap_or(self.timeout);

        let request = self
            .auth
            .apply(self.client.request(parts.method, &url))
            .timeout(timeout);

        let request = match parts.body {
            RequestBody::Empty => request,
            RequestBody::Json(value) => request.json(&value),
            RequestBody::Multipart(upload) => {
                let prepared = upload.prepare().await?;
                debug!(
                    file_name = %prepared.file_name,
                    mime_type = prepared.mime_type,
                    size = prepared.bytes.len(),
                    "prepared upload"
                );
                request.multipart(prepared.into_form()?)
            }
        };

        let response = request.send().await.map_err(transport_error)?;
        let status = response.status();
        let body = response.bytes().await.map_err(transport_error)?;

        debug!(status = status.as_u16(), bytes = body.len(), "response received");

        if is_failure(status) {
            let err = ApiError::from_response(status, &body);
            debug!(kind = %err.kind, "request failed");
            return Err(err.into());
        }

        Ok(body.to_vec())
    }
}

impl fmt::Debug for HttpClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpClient")
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish_non_exhaustive()
    }
}

/// Any status of 400 or above, including nonstandard codes past 599.
fn is_failure(status: StatusCode) -> bool {
    status.as_u16() >= 400
}

/// Map a reqwest failure. Builder faults are the caller's request, not the
/// network.
fn transport_error(err: reqwest::Error) -> Error {
    if err.is_builder() {
        Error::InvalidRequest(error_chain(&err))
    } else {
        debug!(error = %err, "transport failure");
        ApiError::from_transport(&err).into()
    }
}

/// Render an error followed by each of its sources.
fn error_chain(err: &dyn std::error::Error) -> String {
    let mut message = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }
    message
}
