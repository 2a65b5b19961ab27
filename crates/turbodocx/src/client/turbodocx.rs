//! The organization-scoped TurboDocx client.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Error;

use super::auth::Authenticator;
use super::config::{ClientConfig, ClientConfigBuilder, Sender};
use super::http::HttpClient;
use super::request::{ApiCall, Download};
use super::upload::Upload;

/// Client for organization-scoped API calls.
///
/// Every request carries the bearer credential and the organization header.
/// Cloning is cheap: clones share the configuration and connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use turbodocx::*;
///
/// #[tokio::main]
/// async fn main() -> Result<(), turbodocx::Error> {
///     let client = TurboDocx::builder()
///         .api_key("your-api-key")
///         .org_id("your-org-id")
///         .build()?;
///
///     let org: serde_json::Value = client.get("/organizations/org-1").await?;
///
///     let uploaded: serde_json::Value = client
///         .upload("/deliverable/upload", Upload::path("contract.pdf").field("name", "Contract"))
///         .await?;
///
///     let pdf = client.get_raw("/deliverable/file/doc-1").await?;
///     println!("{org} {uploaded} {} bytes", pdf.len());
///     Ok(())
/// }
/// ```
#[derive(Clone, Debug)]
pub struct TurboDocx {
    http: Arc<HttpClient>,
    config: Arc<ClientConfig>,
}

impl TurboDocx {
    /// Start configuring a client.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Create a client from a resolved configuration.
    pub fn new(config: ClientConfig) -> Result<Self, Error> {
        let auth = Authenticator::organization(
            config.credential().clone(),
            Some(config.org_id().to_string()),
        );
        let http = HttpClient::new(config.base_url(), auth, config.timeout())?;

        tracing::debug!(base_url = config.base_url(), org_id = config.org_id(), "client created");

        Ok(Self {
            http: Arc::new(http),
            config: Arc::new(config),
        })
    }

    /// Create a client configured entirely from `TURBODOCX_*` environment
    /// variables.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if no credential or organization ID
    /// is set.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(ClientConfig::from_env()?)
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Sender identity for signature operations.
    pub fn sender(&self) -> Result<Sender, Error> {
        self.config.sender()
    }

    pub fn get<T>(&self, path: impl Into<String>) -> ApiCall<T> {
        self.call(Method::GET, path)
    }

    pub fn post<T>(&self, path: impl Into<String>) -> ApiCall<T> {
        self.call(Method::POST, path)
    }

    pub fn put<T>(&self, path: impl Into<String>) -> ApiCall<T> {
        self.call(Method::PUT, path)
    }

    pub fn patch<T>(&self, path: impl Into<String>) -> ApiCall<T> {
        self.call(Method::PATCH, path)
    }

    pub fn delete<T>(&self, path: impl Into<String>) -> ApiCall<T> {
        self.call(Method::DELETE, path)
    }

    /// POST a multipart upload.
    pub fn upload<T>(&self, path: impl Into<String>, upload: Upload) -> ApiCall<T> {
        self.call(Method::POST, path).upload(upload)
    }

    /// GET a binary payload without decoding it.
    pub fn get_raw(&self, path: impl Into<String>) -> Download {
        Download::new(self.http.clone(), path)
    }

    /// A call with an arbitrary method.
    pub fn call<T>(&self, method: Method, path: impl Into<String>) -> ApiCall<T> {
        ApiCall::new(self.http.clone(), method, path)
    }
}

impl ClientConfigBuilder {
    /// Resolve the configuration and create a [`TurboDocx`] client.
    pub fn build(self) -> Result<TurboDocx, Error> {
        TurboDocx::new(self.resolve()?)
    }
}
