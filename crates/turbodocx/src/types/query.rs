//! Query-string construction for pagination and filtering.
//!
//! Unset parameters are omitted entirely and an empty query renders as an
//! empty string, so `format!("{path}{query}")` is always a valid URL path.
//!
//! ```
//! use turbodocx::{AuditLogQuery, ListQuery};
//!
//! let query = ListQuery::new().limit(10).offset(0).search("acme");
//! assert_eq!(query.to_query_string(), "?limit=10&offset=0&search=acme");
//!
//! assert_eq!(AuditLogQuery::new().to_query_string(), "");
//! ```

use std::fmt;

use url::form_urlencoded;

// ============================================================================
// QueryString
// ============================================================================

/// An ordered list of query parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct QueryString {
    pairs: Vec<(String, String)>,
}

impl QueryString {
    /// Create an empty query.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a parameter.
    pub fn param(mut self, key: impl Into<String>, value: impl ToString) -> Self {
        self.pairs.push((key.into(), value.to_string()));
        self
    }

    /// Append a parameter only when a value is present.
    ///
    /// Booleans render as `true` / `false`.
    pub fn optional<V: ToString>(self, key: impl Into<String>, value: Option<V>) -> Self {
        match value {
            Some(value) => self.param(key, value),
            None => self,
        }
    }

    /// Append every parameter of another query.
    pub fn merge(mut self, other: QueryString) -> Self {
        self.pairs.extend(other.pairs);
        self
    }

    /// Iterate over the parameters in insertion order.
    pub fn pairs(&self) -> impl Iterator<Item = (&str, &str)> {
        self.pairs.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Returns true if no parameter is set.
    pub fn is_empty(&self) -> bool {
        self.pairs.is_empty()
    }

    /// Get the first value for a key.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.pairs
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    /// Render as `?k=v&...`, or an empty string when no parameter is set.
    pub fn to_query_string(&self) -> String {
        if self.pairs.is_empty() {
            return String::new();
        }
        let encoded = form_urlencoded::Serializer::new(String::new())
            .extend_pairs(self.pairs.iter())
            .finish();
        format!("?{encoded}")
    }
}

impl fmt::Display for QueryString {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_query_string())
    }
}

// ============================================================================
// ListQuery
// ============================================================================

/// Pagination and search parameters shared by list endpoints.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ListQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
}

impl ListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    /// Maximum number of results.
    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    /// Number of results to skip.
    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    /// Free-text search filter.
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    pub fn to_query_string(&self) -> String {
        QueryString::from(self).to_query_string()
    }
}

impl From<&ListQuery> for QueryString {
    fn from(query: &ListQuery) -> Self {
        QueryString::new()
            .optional("limit", query.limit)
            .optional("offset", query.offset)
            .optional("search", query.search.as_deref())
    }
}

impl From<ListQuery> for QueryString {
    fn from(query: ListQuery) -> Self {
        QueryString::from(&query)
    }
}

// ============================================================================
// AuditLogQuery
// ============================================================================

/// Filters for audit log listings.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct AuditLogQuery {
    pub limit: Option<u32>,
    pub offset: Option<u32>,
    pub search: Option<String>,
    pub action: Option<String>,
    pub resource_type: Option<String>,
    pub resource_id: Option<String>,
    pub success: Option<bool>,
    /// ISO 8601 lower bound.
    pub start_date: Option<String>,
    /// ISO 8601 upper bound.
    pub end_date: Option<String>,
}

impl AuditLogQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn limit(mut self, limit: u32) -> Self {
        self.limit = Some(limit);
        self
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = Some(offset);
        self
    }

    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Filter by action type.
    pub fn action(mut self, action: impl Into<String>) -> Self {
        self.action = Some(action.into());
        self
    }

    /// Filter by resource type.
    pub fn resource_type(mut self, resource_type: impl Into<String>) -> Self {
        self.resource_type = Some(resource_type.into());
        self
    }

    /// Filter by resource ID.
    pub fn resource_id(mut self, resource_id: impl Into<String>) -> Self {
        self.resource_id = Some(resource_id.into());
        self
    }

    /// Filter by outcome.
    pub fn success(mut self, success: bool) -> Self {
        self.success = Some(success);
        self
    }

    pub fn start_date(mut self, start_date: impl Into<String>) -> Self {
        self.start_date = Some(start_date.into());
        self
    }

    pub fn end_date(mut self, end_date: impl Into<String>) -> Self {
        self.end_date = Some(end_date.into());
        self
    }

    pub fn to_query_string(&self) -> String {
        QueryString::from(self).to_query_string()
    }
}

impl From<&AuditLogQuery> for QueryString {
    fn from(query: &AuditLogQuery) -> Self {
        QueryString::new()
            .optional("limit", query.limit)
            .optional("offset", query.offset)
            .optional("search", query.search.as_deref())
            .optional("action", query.action.as_deref())
            .optional("resourceType", query.resource_type.as_deref())
            .optional("resourceId", query.resource_id.as_deref())
            .optional("success", query.success)
            .optional("startDate", query.start_date.as_deref())
            .optional("endDate", query.end_date.as_deref())
    }
}

impl From<AuditLogQuery> for QueryString {
    fn from(query: AuditLogQuery) -> Self {
        QueryString::from(&query)
    }
}
