//! Core value types shared by the TurboDocx clients.
//!
//! These are pure, I/O-free building blocks: file type sniffing,
//! query-string construction and response envelope decoding.

mod envelope;
mod file_type;
mod query;

pub use envelope::{Enveloped, decode_body, parse_body, unwrap_data};
pub use file_type::{
    DOCX_MIME, FileTypeInfo, OCTET_STREAM_MIME, PDF_MIME, PPTX_MIME, detect_file_type,
};
pub use query::{AuditLogQuery, ListQuery, QueryString};
