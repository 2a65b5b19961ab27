//! Error types for turbodocx.
//!
//! Every failed call resolves to exactly one [`Error`](enum@Error).
//!
//! # Error Hierarchy
//!
//! - [`Error`](enum@Error) — Main error type, returned by every operation
//!   - [`ApiError`] — Classified API failure carrying an [`ErrorKind`],
//!     the backend message, its machine-readable code and the HTTP status
//!   - `Io` — Local file read failure while preparing an upload
//!   - `Json` — Request encoding or response decoding failure
//!   - `InvalidRequest` — A request that could not be built locally
//!
//! HTTP status codes are classified once, at the transport boundary:
//!
//! | Status        | Kind                            |
//! |---------------|---------------------------------|
//! | 400           | [`ErrorKind::Validation`]       |
//! | 401           | [`ErrorKind::Authentication`]   |
//! | 404           | [`ErrorKind::NotFound`]         |
//! | 429           | [`ErrorKind::RateLimit`]        |
//! | other ≥ 400   | [`ErrorKind::Api`] with status  |
//! | no response   | [`ErrorKind::Network`]          |
//!
//! The client never retries. Retry policy belongs to the caller:
//!
//! ```rust,no_run
//! use turbodocx::*;
//!
//! # async fn example(client: TurboDocx) -> Result<(), Error> {
//! match client.get::<serde_json::Value>("/organizations/org-x").await {
//!     Ok(org) => println!("{org}"),
//!     Err(e) if e.is_not_found() => println!("no such organization"),
//!     Err(e) if e.is_rate_limit() || e.is_network() => {
//!         // back off and try again later
//!     }
//!     Err(e) => return Err(e),
//! }
//! # Ok(())
//! # }
//! ```

use std::fmt;

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

// ============================================================================
// Error Kind
// ============================================================================

/// Classification of an API failure.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Missing or rejected credentials (HTTP 401, or missing configuration).
    Authentication,
    /// The backend rejected the request payload (HTTP 400).
    Validation,
    /// The resource does not exist (HTTP 404).
    NotFound,
    /// Too many requests (HTTP 429).
    RateLimit,
    /// Any other HTTP failure status.
    Api(u16),
    /// The request never produced an HTTP response (DNS, connect, timeout,
    /// body read).
    Network,
}

impl ErrorKind {
    /// Classify an HTTP failure status.
    ///
    /// Only meaningful for statuses of 400 and above; any other code maps to
    /// `Api(status)`. Success statuses never reach the classifier.
    pub fn from_status(status: u16) -> Self {
        match status {
            400 => ErrorKind::Validation,
            401 => ErrorKind::Authentication,
            404 => ErrorKind::NotFound,
            429 => ErrorKind::RateLimit,
            other => ErrorKind::Api(other),
        }
    }
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::Authentication => f.write_str("Authentication error"),
            ErrorKind::Validation => f.write_str("Validation error"),
            ErrorKind::NotFound => f.write_str("Not found"),
            ErrorKind::RateLimit => f.write_str("Rate limit exceeded"),
            ErrorKind::Api(status) => write!(f, "API error (status {status})"),
            ErrorKind::Network => f.write_str("Network error"),
        }
    }
}

// ============================================================================
// API Errors
// ============================================================================

/// A classified API failure.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
#[error("{kind}: {message}")]
pub struct ApiError {
    /// Failure classification.
    pub kind: ErrorKind,
    /// Human-readable message, taken from the backend when it sent one.
    pub message: String,
    /// Machine-readable code from the backend error body, if any.
    pub code: Option<String>,
    /// HTTP status code. `None` for network failures.
    pub status: Option<u16>,
}

/// Error body returned by the backend.
///
/// Every field is optional and loosely typed; anything that is not a
/// non-empty string is rendered as JSON text.
#[derive(Debug, Default, Deserialize)]
struct ErrorBody {
    #[serde(default)]
    message: Option<serde_json::Value>,
    #[serde(default)]
    error: Option<serde_json::Value>,
    #[serde(default)]
    code: Option<serde_json::Value>,
}

impl ErrorBody {
    /// Parse an error body. Anything but a JSON object yields an empty body.
    fn parse(body: &[u8]) -> Self {
        match serde_json::from_slice::<serde_json::Value>(body) {
            Ok(value @ serde_json::Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_default()
            }
            _ => Self::default(),
        }
    }

    fn text(value: Option<&serde_json::Value>) -> Option<String> {
        match value? {
            serde_json::Value::Null => None,
            serde_json::Value::String(s) if s.is_empty() => None,
            serde_json::Value::String(s) => Some(s.clone()),
            other => Some(other.to_string()),
        }
    }
}

impl ApiError {
    /// Create an error with an explicit kind.
    pub fn new(kind: ErrorKind, message: impl Into<String>) -> Self {
        let status = match kind {
            ErrorKind::Authentication => Some(401),
            ErrorKind::Validation => Some(400),
            ErrorKind::NotFound => Some(404),
            ErrorKind::RateLimit => Some(429),
            ErrorKind::Api(status) => Some(status),
            ErrorKind::Network => None,
        };
        Self {
            kind,
            message: message.into(),
            code: None,
            status,
        }
    }

    /// Create an authentication error.
    pub fn authentication(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Authentication, message)
    }

    /// Create a validation error.
    pub fn validation(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Validation, message)
    }

    /// Create a network error. Network errors never carry a status.
    pub fn network(message: impl Into<String>) -> Self {
        Self::new(ErrorKind::Network, message)
    }

    /// Attach a machine-readable code.
    pub fn with_code(mut self, code: impl Into<String>) -> Self {
        self.code = Some(code.into());
        self
    }

    /// Classify a failed HTTP response from its status and raw body.
    ///
    /// The message is taken from the body's `message` field, then its
    /// `error` field, then the HTTP status line.
    pub fn from_response(status: StatusCode, body: &[u8]) -> Self {
        let parsed = ErrorBody::parse(body);

        let message = ErrorBody::text(parsed.message.as_ref())
            .or_else(|| ErrorBody::text(parsed.error.as_ref()))
            .unwrap_or_else(|| status.to_string());

        Self {
            kind: ErrorKind::from_status(status.as_u16()),
            message,
            code: ErrorBody::text(parsed.code.as_ref()),
            status: Some(status.as_u16()),
        }
    }

    /// Classify a transport fault that produced no usable response.
    pub fn from_transport(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            format!("Request timed out: {err}")
        } else if err.is_connect() {
            format!("Connection failed: {err}")
        } else if err.is_body() || err.is_decode() {
            format!("Failed to read response body: {err}")
        } else {
            format!("Request failed: {err}")
        };
        Self::network(message)
    }
}

// ============================================================================
// Main Error Type
// ============================================================================

/// Main error type for turbodocx operations.
#[derive(Debug, Error)]
pub enum Error {
    // ─── API ───
    #[error(transparent)]
    Api(#[from] ApiError),

    // ─── Local filesystem ───
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // ─── Serialization ───
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    // ─── Request construction ───
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl Error {
    /// The API error classification, if this is an API error.
    pub fn kind(&self) -> Option<ErrorKind> {
        match self {
            Error::Api(e) => Some(e.kind),
            _ => None,
        }
    }

    /// The HTTP status code, if the failure came from an HTTP response.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Api(e) => e.status,
            _ => None,
        }
    }

    /// The backend's machine-readable error code, if any.
    pub fn code(&self) -> Option<&str> {
        match self {
            Error::Api(e) => e.code.as_deref(),
            _ => None,
        }
    }

    /// Returns true for authentication failures.
    pub fn is_authentication(&self) -> bool {
        self.kind() == Some(ErrorKind::Authentication)
    }

    /// Returns true for validation failures.
    pub fn is_validation(&self) -> bool {
        self.kind() == Some(ErrorKind::Validation)
    }

    /// Returns true when the resource was not found.
    pub fn is_not_found(&self) -> bool {
        self.kind() == Some(ErrorKind::NotFound)
    }

    /// Returns true when the backend rate-limited the request.
    pub fn is_rate_limit(&self) -> bool {
        self.kind() == Some(ErrorKind::RateLimit)
    }

    /// Returns true when the request produced no HTTP response.
    pub fn is_network(&self) -> bool {
        self.kind() == Some(ErrorKind::Network)
    }
}
