//! Rust client core for the TurboDocx API.
//!
//! **turbodocx** provides the authenticated transport shared by every
//! TurboDocx endpoint: configuration with environment fallback, bearer and
//! organization headers, multipart uploads with sniffed content types,
//! response envelope unwrapping and a fixed error taxonomy.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use turbodocx::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), turbodocx::Error> {
//!     // Reads TURBODOCX_API_KEY, TURBODOCX_ORG_ID, ...
//!     let client = TurboDocx::from_env()?;
//!
//!     let users: serde_json::Value = client
//!         .get("/organizations/org-1/users")
//!         .query(ListQuery::new().limit(10))
//!         .await?;
//!     println!("{users}");
//!
//!     Ok(())
//! }
//! ```
//!
//! # Response Envelopes
//!
//! A body of the form `{"data": ...}` with no other key is unwrapped before
//! decoding. Bodies such as `{"success": true, "data": ...}` are decoded
//! whole; use [`Enveloped`] to reach their payload.
//!
//! # Errors
//!
//! Every failure is a single [`Error`]. HTTP failures and network faults are
//! [`ApiError`]s classified by [`ErrorKind`]; nothing is retried.

pub mod client;
pub mod error;
pub mod types;

// Re-export commonly used types at crate root
pub use error::{ApiError, Error, ErrorKind};
pub use types::*;

// Re-export client types
pub use client::{
    ApiCall, ClientConfig, ClientConfigBuilder, Credential, Download, FileSource, HttpClient,
    PartnerConfig, PartnerConfigBuilder, Sender, TurboDocx, TurboPartner, Upload,
};
