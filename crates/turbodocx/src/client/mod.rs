//! Client module for calling the TurboDocx API.
//!
//! This module provides the core client infrastructure:
//!
//! - [`TurboDocx`] — Organization-scoped client
//! - [`TurboPartner`] — Partner-scoped client, paths rooted at `/partner/{id}`
//! - [`ClientConfig`] / [`PartnerConfig`] — Resolved connection settings
//! - [`HttpClient`] — Single-attempt authenticated transport
//!
//! # Configuration
//!
//! Settings resolve as explicit value, then environment variable, then
//! default. See [`config`] for the variable names.
//!
//! # Call Builders
//!
//! Call builders are `.await`ed directly:
//!
//! - [`ApiCall`] — JSON request, smart-unwrapped JSON response
//! - [`Download`] — Raw response bytes
//!
//! Uploads are described by [`Upload`] and sent as `multipart/form-data`.

mod auth;
pub mod config;
mod http;
mod partner;
mod request;
mod turbodocx;
mod upload;

pub use auth::{Credential, ORG_ID_HEADER};
pub use config::{
    ClientConfig, ClientConfigBuilder, DEFAULT_BASE_URL, DEFAULT_TIMEOUT, PartnerConfig,
    PartnerConfigBuilder, Sender,
};
pub use http::{HttpClient, USER_AGENT};
pub use partner::TurboPartner;
pub use request::{ApiCall, Download};
pub use turbodocx::TurboDocx;
pub use upload::{FILE_FIELD, FileSource, Upload};
