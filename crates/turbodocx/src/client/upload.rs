//! Multipart file uploads.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde_json::Value;

use crate::error::Error;
use crate::types::detect_file_type;

/// Name of the multipart part carrying the file.
pub const FILE_FIELD: &str = "file";

/// Where an upload's bytes come from.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FileSource {
    /// Bytes already in memory.
    Bytes(Vec<u8>),
    /// A file on the local filesystem, read when the call is sent.
    Path(PathBuf),
}

impl From<Vec<u8>> for FileSource {
    fn from(bytes: Vec<u8>) -> Self {
        FileSource::Bytes(bytes)
    }
}

impl From<&[u8]> for FileSource {
    fn from(bytes: &[u8]) -> Self {
        FileSource::Bytes(bytes.to_vec())
    }
}

impl From<PathBuf> for FileSource {
    fn from(path: PathBuf) -> Self {
        FileSource::Path(path)
    }
}

impl From<&Path> for FileSource {
    fn from(path: &Path) -> Self {
        FileSource::Path(path.to_path_buf())
    }
}

/// A file plus form fields, sent as `multipart/form-data`.
///
/// The file part's content type is sniffed from its magic bytes. Without an
/// explicit file name, a path upload uses the path's final component and a
/// byte upload uses `document.<ext>` for the sniffed type.
///
/// # Example
///
/// ```rust,no_run
/// use turbodocx::Upload;
///
/// let upload = Upload::path("contract.pdf")
///     .field("name", "Contract")
///     .json_field("recipients", &vec!["a@example.com"])
///     .unwrap();
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct Upload {
    source: FileSource,
    file_name: Option<String>,
    fields: BTreeMap<String, Value>,
}

impl Upload {
    pub fn new(source: impl Into<FileSource>) -> Self {
        Self {
            source: source.into(),
            file_name: None,
            fields: BTreeMap::new(),
        }
    }

    /// Upload bytes held in memory.
    pub fn bytes(bytes: impl Into<Vec<u8>>) -> Self {
        Self::new(FileSource::Bytes(bytes.into()))
    }

    /// Upload a file from disk.
    pub fn path(path: impl AsRef<Path>) -> Self {
        Self::new(FileSource::Path(path.as_ref().to_path_buf()))
    }

    /// Override the file name sent with the file part.
    pub fn file_name(mut self, name: impl Into<String>) -> Self {
        self.file_name = Some(name.into());
        self
    }

    /// Add a form field. Strings are sent verbatim; any other value is sent
    /// as its JSON text.
    pub fn field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.fields.insert(key.into(), value.into());
        self
    }

    /// Add a form field from any serializable value.
    pub fn json_field<T: Serialize + ?Sized>(
        self,
        key: impl Into<String>,
        value: &T,
    ) -> Result<Self, Error> {
        let value = serde_json::to_value(value)?;
        Ok(self.field(key, value))
    }

    pub fn source(&self) -> &FileSource {
        &self.source
    }

    pub fn fields(&self) -> &BTreeMap<String, Value> {
        &self.fields
    }

    /// Read the file and describe the part.
    pub(crate) async fn prepare(self) -> Result<PreparedUpload, Error> {
        let (bytes, path_name) = match self.source {
            FileSource::Bytes(bytes) => (bytes, None),
            FileSource::Path(path) => {
                let bytes = tokio::fs::read(&path).await?;
                let name = path
                    .file_name()
                    .map(|name| name.to_string_lossy().into_owned());
                (bytes, name)
            }
        };

        let info = detect_file_type(&bytes);
        let file_name = self
            .file_name
            .filter(|name| !name.is_empty())
            .or(path_name)
            .unwrap_or_else(|| info.default_file_name());

        let fields = self
            .fields
            .into_iter()
            .map(|(key, value)| (key, flatten_field(value)))
            .collect();

        Ok(PreparedUpload {
            bytes,
            file_name,
            mime_type: info.mime_type,
            fields,
        })
    }
}

/// Render a form field value as text.
fn flatten_field(value: Value) -> String {
    match value {
        Value::String(s) => s,
        other => other.to_string(),
    }
}

/// An upload with its bytes read and metadata settled.
#[derive(Debug)]
pub(crate) struct PreparedUpload {
    pub(crate) bytes: Vec<u8>,
    pub(crate) file_name: String,
    pub(crate) mime_type: &'static str,
    pub(crate) fields: Vec<(String, String)>,
}

impl PreparedUpload {
    pub(crate) fn into_form(self) -> Result<Form, Error> {
        let part = Part::bytes(self.bytes)
            .file_name(self.file_name)
            .mime_str(self.mime_type)
            .map_err(|e| Error::InvalidRequest(format!("invalid content type: {e}")))?;

        let form = self
            .fields
            .into_iter()
            .fold(Form::new(), |form, (key, value)| form.text(key, value));

        Ok(form.part(FILE_FIELD, part))
    }
}
