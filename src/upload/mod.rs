//! Upload normalization.
//!
//! Turns any supported file input (byte buffer, byte stream, Blob/File, or a
//! pre-built multipart form) plus optional metadata into one multipart body
//! and the caller headers to send with it. Encoder-computed headers
//! (`content-type` with boundary, `content-length`) are added by the transport,
//! underneath the caller's.
//!
//! The remote server expects exactly two things per upload: the binary field
//! (default name `file`) and a single text field `body` holding the JSON
//! metadata object `{filename?, secret?, nonce?}`.

pub mod form;
pub mod source;

pub use form::{
    FieldKind, FileBody, MultipartKind, MultipartTarget, NativeForm, NativeValue, StreamingForm,
    StreamingValue,
};
pub use source::{byte_stream, Blob, ByteStream, UploadSource};

use crate::error::UploadError;
use crate::http::Headers;
use serde::{Deserialize, Serialize};

/// Default multipart field name for the binary payload.
pub const DEFAULT_FIELD_NAME: &str = "file";

/// Name of the JSON metadata field.
pub const METADATA_FIELD: &str = "body";

/// Upload metadata, sent as one JSON blob in the `body` field.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadMetadata {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<i64>,
}

impl UploadMetadata {
    pub fn is_empty(&self) -> bool {
        self.filename.is_none() && self.secret.is_none() && self.nonce.is_none()
    }
}

/// Request for `POST /add_file`.
///
/// Either `form` or `file` must be set. Everything else is optional.
#[derive(Debug, Default)]
pub struct UploadFileRequest {
    /// Pre-built multipart form. Its kind overrides the client's default kind.
    pub form: Option<MultipartTarget>,
    pub file: Option<UploadSource>,
    /// Field name for `file` (default `file`).
    pub field_name: Option<String>,
    pub filename: Option<String>,
    pub secret: Option<String>,
    pub nonce: Option<i64>,
    /// Explicit metadata; wins over the discrete `filename`/`secret`/`nonce`.
    pub metadata: Option<UploadMetadata>,
    pub content_type: Option<String>,
    /// Extra request headers. These win over the encoder's own headers.
    pub headers: Headers,
}

impl UploadFileRequest {
    pub fn file(source: impl Into<UploadSource>) -> Self {
        Self {
            file: Some(source.into()),
            ..Default::default()
        }
    }

    pub fn form(form: impl Into<MultipartTarget>) -> Self {
        Self {
            form: Some(form.into()),
            ..Default::default()
        }
    }

    pub fn with_file(mut self, source: impl Into<UploadSource>) -> Self {
        self.file = Some(source.into());
        self
    }

    pub fn field_name(mut self, name: impl Into<String>) -> Self {
        self.field_name = Some(name.into());
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }

    pub fn nonce(mut self, nonce: i64) -> Self {
        self.nonce = Some(nonce);
        self
    }

    pub fn metadata(mut self, metadata: UploadMetadata) -> Self {
        self.metadata = Some(metadata);
        self
    }

    pub fn content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    pub fn header(mut self, name: &str, value: impl Into<String>) -> Self {
        self.headers.insert(name.to_ascii_lowercase(), value.into());
        self
    }
}

/// A normalized upload, ready for the transport.
#[derive(Debug)]
pub struct PreparedUpload {
    pub body: MultipartTarget,
    /// Caller headers, lower-cased.
    pub headers: Headers,
    pub metadata: UploadMetadata,
}

/// Normalize an upload request into one multipart body plus caller headers.
///
/// `default_kind` is only used when the request carries no pre-built form.
pub fn build_upload_request(
    request: UploadFileRequest,
    default_kind: MultipartKind,
) -> Result<PreparedUpload, UploadError> {
    let UploadFileRequest {
        form,
        file,
        field_name,
        filename,
        secret,
        nonce,
        metadata,
        content_type,
        headers: caller_headers,
    } = request;

    if form.is_none() && file.is_none() {
        return Err(UploadError::InvalidSpec(
            "either form or file must be provided".to_string(),
        ));
    }

    let mut form = form.unwrap_or_else(|| MultipartTarget::new(default_kind));
    let filename = non_empty(filename);
    let metadata = resolve_metadata(&form, metadata, filename.clone(), non_empty(secret), nonce);

    if let Some(source) = file {
        let field = field_name.as_deref().unwrap_or(DEFAULT_FIELD_NAME);
        append_source(
            &mut form,
            field,
            source,
            metadata.filename.clone().or(filename),
            non_empty(content_type),
        )?;
    }

    let json = serde_json::to_string(&metadata)
        .map_err(|e| UploadError::InvalidSpec(format!("metadata not serializable: {}", e)))?;
    form.set_text(METADATA_FIELD, json);

    let headers = caller_headers
        .into_iter()
        .map(|(name, value)| (name.to_ascii_lowercase(), value))
        .collect();

    Ok(PreparedUpload {
        body: form,
        headers,
        metadata,
    })
}

/// Priority: explicit metadata > discrete arguments > text fields on the form.
fn resolve_metadata(
    form: &MultipartTarget,
    explicit: Option<UploadMetadata>,
    filename: Option<String>,
    secret: Option<String>,
    nonce: Option<i64>,
) -> UploadMetadata {
    let mut meta = explicit.unwrap_or_default();

    meta.filename = meta
        .filename
        .or(filename)
        .or_else(|| non_empty(form.text_field("filename")));
    meta.secret = meta
        .secret
        .or(secret)
        .or_else(|| non_empty(form.text_field("secret")));
    meta.nonce = meta.nonce.or(nonce).or_else(|| {
        form.text_field("nonce")
            .and_then(|raw| raw.trim().parse::<i64>().ok())
    });

    meta
}

fn append_source(
    form: &mut MultipartTarget,
    field: &str,
    source: UploadSource,
    filename: Option<String>,
    content_type: Option<String>,
) -> Result<(), UploadError> {
    let filename = filename
        .or_else(|| source.inferred_name().map(str::to_string))
        .unwrap_or_else(|| "file".to_string());
    let mime = content_type.or_else(|| source.inferred_mime_type().map(str::to_string));

    match form {
        MultipartTarget::Streaming(f) => {
            let body = match source {
                UploadSource::Bytes(b) => FileBody::Bytes(b),
                UploadSource::Stream(s) => FileBody::Stream(s),
                // In-memory blobs stay sized parts.
                UploadSource::Blob(b) => FileBody::Bytes(b.bytes()),
            };
            f.append_file(field, body, filename, mime.as_deref());
        }
        MultipartTarget::Native(f) => {
            let blob = match source {
                UploadSource::Blob(b) => b,
                UploadSource::Bytes(b) => Blob::new(b)
                    .with_mime_type(mime.as_deref().unwrap_or("application/octet-stream")),
                other @ UploadSource::Stream(_) => {
                    return Err(UploadError::UnsupportedSource(format!(
                        "{} inputs cannot be appended to a native form; pass bytes or a Blob",
                        other.kind()
                    )))
                }
            };
            f.append_blob(field, blob, Some(&filename));
        }
    }
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
