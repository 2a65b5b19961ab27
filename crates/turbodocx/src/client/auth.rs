//! Request authentication.

use std::fmt;

use reqwest::RequestBuilder;
use reqwest::header::AUTHORIZATION;

/// Header carrying the organization scope of a request.
pub const ORG_ID_HEADER: &str = "x-rapiddocx-org-id";

/// A bearer credential.
///
/// `Debug` output never includes the secret.
#[derive(Clone, PartialEq, Eq)]
pub enum Credential {
    /// A TurboDocx API key (organization or partner key).
    ApiKey(String),
    /// An OAuth access token.
    AccessToken(String),
}

impl Credential {
    /// Pick the credential to use, preferring an access token over an API key.
    pub(crate) fn select(api_key: Option<String>, access_token: Option<String>) -> Option<Self> {
        access_token
            .map(Credential::AccessToken)
            .or_else(|| api_key.map(Credential::ApiKey))
    }

    /// The raw secret.
    pub fn secret(&self) -> &str {
        match self {
            Credential::ApiKey(s) | Credential::AccessToken(s) => s,
        }
    }

    /// The `Authorization` header value.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.secret())
    }

    /// Returns true if this is an OAuth access token.
    pub fn is_access_token(&self) -> bool {
        matches!(self, Credential::AccessToken(_))
    }
}

impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Credential::ApiKey(_) => f.write_str("ApiKey(***)"),
            Credential::AccessToken(_) => f.write_str("AccessToken(***)"),
        }
    }
}

/// Attaches authentication headers to outgoing requests.
///
/// Organization-scoped authenticators send the bearer token plus the
/// organization header; partner-scoped ones send only the bearer token.
#[derive(Clone, Debug)]
pub(crate) struct Authenticator {
    credential: Credential,
    org_id: Option<String>,
}

impl Authenticator {
    pub(crate) fn organization(credential: Credential, org_id: Option<String>) -> Self {
        Self { credential, org_id }
    }

    pub(crate) fn partner(partner_api_key: String) -> Self {
        Self {
            credential: Credential::ApiKey(partner_api_key),
            org_id: None,
        }
    }

    /// Add the `Authorization` and, when scoped to an organization, the
    /// organization header. No other header is touched.
    pub(crate) fn apply(&self, request: RequestBuilder) -> RequestBuilder {
        let request = request.header(AUTHORIZATION, self.credential.bearer());
        match &self.org_id {
            Some(org_id) => request.header(ORG_ID_HEADER, org_id),
            None => request,
        }
    }
}
