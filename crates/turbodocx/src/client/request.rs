//! Call builders for fluent API requests.
//!
//! All call builders implement `IntoFuture` so they can be `.await`ed
//! directly. Nothing is sent until the builder is awaited, and dropping the
//! future abandons the request.

use std::future::{Future, IntoFuture};
use std::marker::PhantomData;
use std::pin::Pin;
use std::sync::Arc;
use std::time::Duration;

use reqwest::Method;
use serde::Serialize;
use serde::de::DeserializeOwned;

use crate::error::Error;
use crate::types::QueryString;

use super::http::{HttpClient, RequestBody, RequestParts};
use super::upload::Upload;

// ============================================================================
// ApiCall
// ============================================================================

/// A JSON API call decoding its response into `T`.
///
/// # Example
///
/// ```rust,no_run
/// # use turbodocx::*;
/// # use std::time::Duration;
/// # async fn example(client: TurboDocx) -> Result<(), turbodocx::Error> {
/// let users: serde_json::Value = client
///     .get("/organizations/org-1/users")
///     .query(ListQuery::new().limit(10))
///     .timeout(Duration::from_secs(5))
///     .await?;
///
/// let created: Enveloped<serde_json::Value> = client
///     .post("/organizations")
///     .json(&serde_json::json!({"name": "Acme"}))
///     .await?;
/// # Ok(())
/// # }
/// ```
pub struct ApiCall<T> {
    http: Arc<HttpClient>,
    parts: RequestParts,
    unwrap: bool,
    deferred: Option<Error>,
    _phantom: PhantomData<fn() -> T>,
}

impl<T> ApiCall<T> {
    pub(crate) fn new(http: Arc<HttpClient>, method: Method, path: impl Into<String>) -> Self {
        Self {
            http,
            parts: RequestParts::new(method, path),
            unwrap: true,
            deferred: None,
            _phantom: PhantomData,
        }
    }

    /// Send a JSON body.
    ///
    /// A serialization failure is reported when the call is awaited.
    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Self {
        match serde_json::to_value(body) {
            Ok(value) => {
                self.parts.body = RequestBody::Json(value);
                self.deferred = None;
            }
            Err(e) => self.deferred = Some(Error::Json(e)),
        }
        self
    }

    /// Send a multipart upload instead of a JSON body.
    pub fn upload(mut self, upload: Upload) -> Self {
        self.parts.body = RequestBody::Multipart(upload);
        self.deferred = None;
        self
    }

    /// Append query parameters.
    pub fn query(mut self, query: impl Into<QueryString>) -> Self {
        self.parts.query = std::mem::take(&mut self.parts.query).merge(query.into());
        self
    }

    /// Override the client's default deadline for this call.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.parts.timeout = Some(timeout);
        self
    }

    /// Decode the body exactly as sent, without removing a sole `data`
    /// wrapper.
    pub fn raw_envelope(mut self) -> Self {
        self.unwrap = false;
        self
    }

    pub fn method(&self) -> &Method {
        &self.parts.method
    }

    pub fn path(&self) -> &str {
        &self.parts.path
    }
}

impl<T: DeserializeOwned + Send + 'static> IntoFuture for ApiCall<T> {
    type Output = Result<T, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move {
            if let Some(err) = self.deferred {
                return Err(err);
            }
            self.http.execute(self.parts, self.unwrap).await
        })
    }
}

// ============================================================================
// Download
// ============================================================================

/// A call returning the raw response body, for binary payloads such as
/// signed documents.
pub struct Download {
    http: Arc<HttpClient>,
    parts: RequestParts,
}

impl Download {
    pub(crate) fn new(http: Arc<HttpClient>, path: impl Into<String>) -> Self {
        Self {
            http,
            parts: RequestParts::new(Method::GET, path),
        }
    }

    pub fn query(mut self, query: impl Into<QueryString>) -> Self {
        self.parts.query = std::mem::take(&mut self.parts.query).merge(query.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.parts.timeout = Some(timeout);
        self
    }

    pub fn path(&self) -> &str {
        &self.parts.path
    }
}

impl IntoFuture for Download {
    type Output = Result<Vec<u8>, Error>;
    type IntoFuture = Pin<Box<dyn Future<Output = Self::Output> + Send>>;

    fn into_future(self) -> Self::IntoFuture {
        Box::pin(async move { self.http.execute_raw(self.parts).await })
    }
}
