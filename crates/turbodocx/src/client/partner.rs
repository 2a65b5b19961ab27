//! The partner-scoped TurboDocx client.
//!
//! Partner calls authenticate with the partner API key alone and never send
//! an organization header. Every path is rooted at `/partner/{partnerId}`.

use std::sync::Arc;

use reqwest::Method;

use crate::error::Error;

use super::auth::Authenticator;
use super::config::{PartnerConfig, PartnerConfigBuilder};
use super::http::HttpClient;
use super::request::{ApiCall, Download};

/// Client for partner-portal API calls.
///
/// Paths passed to the call methods are relative to the partner root:
/// `partner.get("/organizations")` requests
/// `/partner/{partnerId}/organizations`.
///
/// # Example
///
/// ```rust,no_run
/// use turbodocx::*;
///
/// # async fn example() -> Result<(), turbodocx::Error> {
/// let partner = TurboPartner::builder()
///     .partner_api_key("TDXP-...")
///     .partner_id("partner-1")
///     .build()?;
///
/// let orgs: serde_json::Value = partner
///     .get("/organizations")
///     .query(ListQuery::new().limit(20).search("acme"))
///     .await?;
///
/// let logs: serde_json::Value = partner
///     .get("/audit-logs")
///     .query(AuditLogQuery::new().action("org.create").success(true))
///     .await?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct TurboPartner {
    http: Arc<HttpClient>,
    config: Arc<PartnerConfig>,
}

impl TurboPartner {
    pub fn builder() -> PartnerConfigBuilder {
        PartnerConfigBuilder::default()
    }

    /// Create a client from a resolved configuration.
    pub fn new(config: PartnerConfig) -> Result<Self, Error> {
        let auth = Authenticator::partner(config.partner_api_key().to_string());
        let http = HttpClient::new(config.base_url(), auth, config.timeout())?;

        tracing::debug!(
            base_url = config.base_url(),
            partner_id = config.partner_id(),
            "partner client created"
        );

        Ok(Self {
            http: Arc::new(http),
            config: Arc::new(config),
        })
    }

    /// Create a client configured from `TURBODOCX_PARTNER_*` environment
    /// variables.
    pub fn from_env() -> Result<Self, Error> {
        Self::new(PartnerConfig::from_env()?)
    }

    pub fn config(&self) -> &PartnerConfig {
        &self.config
    }

    /// Absolute API path for a partner-relative suffix.
    pub fn path(&self, suffix: &str) -> String {
        let suffix = suffix.trim_start_matches('/');
        if suffix.is_empty() {
            format!("/partner/{}", self.config.partner_id())
        } else {
            format!("/partner/{}/{suffix}", self.config.partner_id())
        }
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

    /// GET a binary payload without decoding it.
    pub fn get_raw(&self, path: impl Into<String>) -> Download {
        Download::new(self.http.clone(), self.path(&path.into()))
    }

    /// A call with an arbitrary method, rooted at the partner path.
    pub fn call<T>(&self, method: Method, path: impl Into<String>) -> ApiCall<T> {
        ApiCall::new(self.http.clone(), method, self.path(&path.into()))
    }
}

impl PartnerConfigBuilder {
    /// Resolve the configuration and create a [`TurboPartner`] client.
    pub fn build(self) -> Result<TurboPartner, Error> {
        TurboPartner::new(self.resolve()?)
    }
}
