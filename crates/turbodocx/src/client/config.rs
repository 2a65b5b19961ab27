//! Connection configuration and its resolution.
//!
//! Every field resolves with a fixed precedence: an explicitly set value,
//! then the matching environment variable, then the built-in default.
//! Empty strings count as unset at every level.
//!
//! | Field            | Environment variable          | Default                      |
//! |------------------|-------------------------------|------------------------------|
//! | API key          | `TURBODOCX_API_KEY`           | —                            |
//! | Access token     | `TURBODOCX_ACCESS_TOKEN`      | —                            |
//! | Organization ID  | `TURBODOCX_ORG_ID`            | —                            |
//! | Base URL         | `TURBODOCX_BASE_URL`          | `https://api.turbodocx.com`  |
//! | Sender email     | `TURBODOCX_SENDER_EMAIL`      | —                            |
//! | Sender name      | `TURBODOCX_SENDER_NAME`       | —                            |
//! | Partner API key  | `TURBODOCX_PARTNER_API_KEY`   | —                            |
//! | Partner ID       | `TURBODOCX_PARTNER_ID`        | —                            |

use std::fmt;
use std::time::Duration;

use crate::error::{ApiError, Error};

use super::auth::Credential;

/// Production API endpoint.
pub const DEFAULT_BASE_URL: &str = "https://api.turbodocx.com";

/// Deadline applied to each call unless overridden.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

pub const ENV_API_KEY: &str = "TURBODOCX_API_KEY";
pub const ENV_ACCESS_TOKEN: &str = "TURBODOCX_ACCESS_TOKEN";
pub const ENV_ORG_ID: &str = "TURBODOCX_ORG_ID";
pub const ENV_BASE_URL: &str = "TURBODOCX_BASE_URL";
pub const ENV_SENDER_EMAIL: &str = "TURBODOCX_SENDER_EMAIL";
pub const ENV_SENDER_NAME: &str = "TURBODOCX_SENDER_NAME";
pub const ENV_PARTNER_API_KEY: &str = "TURBODOCX_PARTNER_API_KEY";
pub const ENV_PARTNER_ID: &str = "TURBODOCX_PARTNER_ID";

/// Read a variable from the process environment.
pub(crate) fn process_env(name: &str) -> Option<String> {
    std::env::var(name).ok()
}

/// Explicit value, else the environment, ignoring empty strings.
fn resolve_field(
    explicit: Option<String>,
    var: &str,
    lookup: &impl Fn(&str) -> Option<String>,
) -> Option<String> {
    explicit
        .filter(|v| !v.is_empty())
        .or_else(|| lookup(var).filter(|v| !v.is_empty()))
}

fn resolve_base_url(explicit: Option<String>, lookup: &impl Fn(&str) -> Option<String>) -> String {
    resolve_field(explicit, ENV_BASE_URL, lookup)
        .map(|url| url.trim_end_matches('/').to_string())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

// ============================================================================
// Sender
// ============================================================================

/// Identity shown on outgoing signature emails.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Sender {
    /// Reply-to address.
    pub email: String,
    /// Display name.
    pub name: Option<String>,
}

// ============================================================================
// ClientConfig
// ============================================================================

/// Resolved configuration of an organization-scoped client.
///
/// Immutable once built; shared read-only by every call of the client.
#[derive(Clone, Debug)]
pub struct ClientConfig {
    credential: Credential,
    org_id: String,
    base_url: String,
    sender_email: Option<String>,
    sender_name: Option<String>,
    timeout: Duration,
}

impl ClientConfig {
    /// Start building a configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::default()
    }

    /// Resolve a configuration purely from the environment.
    pub fn from_env() -> Result<Self, Error> {
        ClientConfigBuilder::default().resolve()
    }

    pub fn credential(&self) -> &Credential {
        &self.credential
    }

    pub fn org_id(&self) -> &str {
        &self.org_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn sender_email(&self) -> Option<&str> {
        self.sender_email.as_deref()
    }

    pub fn sender_name(&self) -> Option<&str> {
        self.sender_name.as_deref()
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// The sender identity required by signature operations.
    ///
    /// # Errors
    ///
    /// Returns a validation error if no sender email is configured.
    pub fn sender(&self) -> Result<Sender, Error> {
        let email = self.sender_email.clone().ok_or_else(|| {
            ApiError::validation(format!(
                "Sender email is required for signature operations; it is used as the \
                 reply-to address. Set it on the client or via {ENV_SENDER_EMAIL}."
            ))
        })?;
        Ok(Sender {
            email,
            name: self.sender_name.clone(),
        })
    }
}

/// Builder collecting explicit settings for a [`ClientConfig`].
///
/// # Example
///
/// ```rust,no_run
/// use turbodocx::ClientConfig;
///
/// # fn example() -> Result<(), turbodocx::Error> {
/// let config = ClientConfig::builder()
///     .api_key("your-api-key")
///     .org_id("your-org-id")
///     .sender_email("support@example.com")
///     .resolve()?;
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Default)]
pub struct ClientConfigBuilder {
    api_key: Option<String>,
    access_token: Option<String>,
    org_id: Option<String>,
    base_url: Option<String>,
    sender_email: Option<String>,
    sender_name: Option<String>,
    timeout: Option<Duration>,
}

impl ClientConfigBuilder {
    pub fn api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    /// Use an OAuth access token. Takes precedence over an API key.
    pub fn access_token(mut self, token: impl Into<String>) -> Self {
        self.access_token = Some(token.into());
        self
    }

    pub fn org_id(mut self, org_id: impl Into<String>) -> Self {
        self.org_id = Some(org_id.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn sender_email(mut self, email: impl Into<String>) -> Self {
        self.sender_email = Some(email.into());
        self
    }

    pub fn sender_name(mut self, name: impl Into<String>) -> Self {
        self.sender_name = Some(name.into());
        self
    }

    /// Default deadline for every call of the client.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Resolve against the process environment.
    pub fn resolve(self) -> Result<ClientConfig, Error> {
        self.resolve_with(process_env)
    }

    /// Resolve against a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if neither an API key nor an access
    /// token resolves, or if no organization ID resolves.
    pub fn resolve_with(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<ClientConfig, Error> {
        let api_key = resolve_field(self.api_key, ENV_API_KEY, &lookup);
        let access_token = resolve_field(self.access_token, ENV_ACCESS_TOKEN, &lookup);

        let credential = Credential::select(api_key, access_token).ok_or_else(|| {
            ApiError::authentication(format!(
                "API key or access token is required. Set one on the client or via \
                 {ENV_API_KEY} / {ENV_ACCESS_TOKEN}."
            ))
        })?;

        let org_id = resolve_field(self.org_id, ENV_ORG_ID, &lookup).ok_or_else(|| {
            ApiError::authentication(format!(
                "Organization ID is required. Set it on the client or via {ENV_ORG_ID}."
            ))
        })?;

        Ok(ClientConfig {
            credential,
            org_id,
            base_url: resolve_base_url(self.base_url, &lookup),
            sender_email: resolve_field(self.sender_email, ENV_SENDER_EMAIL, &lookup),
            sender_name: resolve_field(self.sender_name, ENV_SENDER_NAME, &lookup),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl fmt::Debug for ClientConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfigBuilder")
            .field("api_key", &self.api_key.as_ref().map(|_| "***"))
            .field("access_token", &self.access_token.as_ref().map(|_| "***"))
            .field("org_id", &self.org_id)
            .field("base_url", &self.base_url)
            .field("sender_email", &self.sender_email)
            .field("sender_name", &self.sender_name)
            .field("timeout", &self.timeout)
            .finish()
    }
}

// ============================================================================
// PartnerConfig
// ============================================================================

/// Resolved configuration of a partner-scoped client.
#[derive(Clone, Debug)]
pub struct PartnerConfig {
    partner_api_key: Credential,
    partner_id: String,
    base_url: String,
    timeout: Duration,
}

impl PartnerConfig {
    pub fn builder() -> PartnerConfigBuilder {
        PartnerConfigBuilder::default()
    }

    pub fn from_env() -> Result<Self, Error> {
        PartnerConfigBuilder::default().resolve()
    }

    pub(crate) fn partner_api_key(&self) -> &str {
        self.partner_api_key.secret()
    }

    pub fn partner_id(&self) -> &str {
        &self.partner_id
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }
}

/// Builder collecting explicit settings for a [`PartnerConfig`].
#[derive(Clone, Default)]
pub struct PartnerConfigBuilder {
    partner_api_key: Option<String>,
    partner_id: Option<String>,
    base_url: Option<String>,
    timeout: Option<Duration>,
}

impl PartnerConfigBuilder {
    /// Partner API key (issued with a `TDXP-` prefix).
    pub fn partner_api_key(mut self, key: impl Into<String>) -> Self {
        self.partner_api_key = Some(key.into());
        self
    }

    pub fn partner_id(mut self, partner_id: impl Into<String>) -> Self {
        self.partner_id = Some(partner_id.into());
        self
    }

    pub fn base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    pub fn resolve(self) -> Result<PartnerConfig, Error> {
        self.resolve_with(process_env)
    }

    /// Resolve against a custom variable lookup.
    ///
    /// # Errors
    ///
    /// Returns an authentication error if the partner API key is missing,
    /// then if the partner ID is missing.
    pub fn resolve_with(
        self,
        lookup: impl Fn(&str) -> Option<String>,
    ) -> Result<PartnerConfig, Error> {
        let partner_api_key = resolve_field(self.partner_api_key, ENV_PARTNER_API_KEY, &lookup)
            .ok_or_else(|| {
                ApiError::authentication(format!(
                    "Partner API key is required. Set it on the client or via \
                     {ENV_PARTNER_API_KEY}."
                ))
            })?;

        let partner_id = resolve_field(self.partner_id, ENV_PARTNER_ID, &lookup).ok_or_else(
            || {
                ApiError::authentication(format!(
                    "Partner ID is required. Set it on the client or via {ENV_PARTNER_ID}."
                ))
            },
        )?;

        Ok(PartnerConfig {
            partner_api_key: Credential::ApiKey(partner_api_key),
            partner_id,
            base_url: resolve_base_url(self.base_url, &lookup),
            timeout: self.timeout.unwrap_or(DEFAULT_TIMEOUT),
        })
    }
}

impl fmt::Debug for PartnerConfigBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("PartnerConfigBuilder")
            .field("partner_api_key", &self.partner_api_key.as_ref().map(|_| "***"))
            .field("partner_id", &self.partner_id)
            .field("base_url", &self.base_url)
            .field("timeout", &self.timeout)
            .finish()
    }
}
