//! File type detection from magic bytes.

use std::fmt;

/// MIME type for PDF documents.
pub const PDF_MIME: &str = "application/pdf";

/// MIME type for Word (OOXML) documents.
pub const DOCX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document";

/// MIME type for PowerPoint (OOXML) presentations.
pub const PPTX_MIME: &str =
    "application/vnd.openxmlformats-officedocument.presentationml.presentation";

/// MIME type for unrecognized content.
pub const OCTET_STREAM_MIME: &str = "application/octet-stream";

/// How many leading bytes of a ZIP container are searched for OOXML markers.
const ZIP_SCAN_LIMIT: usize = 2000;

/// Detected MIME type and file extension of a buffer.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct FileTypeInfo {
    /// MIME type, e.g. `application/pdf`.
    pub mime_type: &'static str,
    /// Extension without the leading dot, e.g. `pdf`.
    pub extension: &'static str,
}

impl FileTypeInfo {
    pub const PDF: FileTypeInfo = FileTypeInfo {
        mime_type: PDF_MIME,
        extension: "pdf",
    };

    pub const DOCX: FileTypeInfo = FileTypeInfo {
        mime_type: DOCX_MIME,
        extension: "docx",
    };

    pub const PPTX: FileTypeInfo = FileTypeInfo {
        mime_type: PPTX_MIME,
        extension: "pptx",
    };

    pub const BINARY: FileTypeInfo = FileTypeInfo {
        mime_type: OCTET_STREAM_MIME,
        extension: "bin",
    };

    /// Detect the file type of a buffer. See [`detect_file_type`].
    pub fn detect(bytes: &[u8]) -> Self {
        detect_file_type(bytes)
    }

    /// File name used when uploading bytes without an explicit name.
    pub fn default_file_name(&self) -> String {
        format!("document.{}", self.extension)
    }
}

impl fmt::Display for FileTypeInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} (.{})", self.mime_type, self.extension)
    }
}

/// Detect a file's type from its leading bytes.
///
/// Recognizes PDF (`%PDF`) and the ZIP-based OOXML formats. A ZIP container
/// is classified by searching its first 2000 bytes for `ppt/`, then `word/`;
/// a ZIP with neither marker is treated as a Word document. Anything shorter
/// than four bytes or with an unknown signature is `application/octet-stream`.
///
/// # Example
///
/// ```
/// use turbodocx::{FileTypeInfo, detect_file_type};
///
/// assert_eq!(detect_file_type(b"%PDF-1.7\n"), FileTypeInfo::PDF);
/// assert_eq!(detect_file_type(b"PK"), FileTypeInfo::BINARY);
/// ```
pub fn detect_file_type(bytes: &[u8]) -> FileTypeInfo {
    if bytes.len() < 4 {
        return FileTypeInfo::BINARY;
    }

    if bytes.starts_with(b"%PDF") {
        return FileTypeInfo::PDF;
    }

    if bytes.starts_with(b"PK") {
        let header = &bytes[..bytes.len().min(ZIP_SCAN_LIMIT)];
        if contains(header, b"ppt/") {
            return FileTypeInfo::PPTX;
        }
        // `word/` and markerless archives both land here
        return FileTypeInfo::DOCX;
    }

    FileTypeInfo::BINARY
}

fn contains(haystack: &[u8], needle: &[u8]) -> bool {
    haystack
        .windows(needle.len())
        .any(|window| window == needle)
}
