//! Multipart form targets.
//!
//! Two part lists with incompatible append rules:
//!
//! - [`StreamingForm`]: server-side multipart. Accepts byte buffers and streams
//!   with an explicit filename and content type. The transport encodes it
//!   (boundary, framing, `content-length` when every part is sized).
//! - [`NativeForm`]: browser `FormData` semantics. Accepts text and Blobs only.
//!
//! Neither form frames bytes itself; both stay introspectable until sent.

use super::source::{Blob, ByteStream};
use bytes::Bytes;
use std::fmt;

/// Which multipart encoding a client builds uploads with.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MultipartKind {
    #[default]
    Streaming,
    Native,
}

/// Shape of a form field, for introspection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    Text,
    Bytes,
    Stream,
    Blob,
}

/// A multipart body, tagged by encoding.
#[derive(Debug)]
pub enum MultipartTarget {
    Streaming(StreamingForm),
    Native(NativeForm),
}

impl MultipartTarget {
    pub fn new(kind: MultipartKind) -> Self {
        match kind {
            MultipartKind::Streaming => MultipartTarget::Streaming(StreamingForm::new()),
            MultipartKind::Native => MultipartTarget::Native(NativeForm::new()),
        }
    }

    pub fn kind(&self) -> MultipartKind {
        match self {
            MultipartTarget::Streaming(_) => MultipartKind::Streaming,
            MultipartTarget::Native(_) => MultipartKind::Native,
        }
    }

    /// First text value stored under `name`. Binary fields are never coerced.
    pub fn text_field(&self, name: &str) -> Option<String> {
        match self {
            MultipartTarget::Streaming(f) => f.text_field(name).map(str::to_string),
            MultipartTarget::Native(f) => f.text_field(name).map(str::to_string),
        }
    }

    /// Replace every field called `name` with a single text value.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        match self {
            MultipartTarget::Streaming(f) => f.set_text(name, value),
            MultipartTarget::Native(f) => f.set_text(name, value),
        }
    }

    pub fn count(&self, name: &str) -> usize {
        match self {
            MultipartTarget::Streaming(f) => f.count(name),
            MultipartTarget::Native(f) => f.count(name),
        }
    }

    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        match self {
            MultipartTarget::Streaming(f) => f.field_kind(name),
            MultipartTarget::Native(f) => f.field_kind(name),
        }
    }
}

impl From<StreamingForm> for MultipartTarget {
    fn from(f: StreamingForm) -> Self {
        MultipartTarget::Streaming(f)
    }
}

impl From<NativeForm> for MultipartTarget {
    fn from(f: NativeForm) -> Self {
        MultipartTarget::Native(f)
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Streaming form
// ═════════════════════════════════════════════════════════════════════════════

/// Binary payload of a streaming form part.
pub enum FileBody {
    Bytes(Bytes),
    Stream(ByteStream),
}

impl fmt::Debug for FileBody {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FileBody::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            FileBody::Stream(_) => f.write_str("Stream(..)"),
        }
    }
}

/// Value of a [`StreamingForm`] part.
#[derive(Debug)]
pub enum StreamingValue {
    Text(String),
    File {
        body: FileBody,
        filename: String,
        content_type: String,
    },
}

impl StreamingValue {
    fn kind(&self) -> FieldKind {
        match self {
            StreamingValue::Text(_) => FieldKind::Text,
            StreamingValue::File {
                body: FileBody::Bytes(_),
                ..
            } => FieldKind::Bytes,
            StreamingValue::File {
                body: FileBody::Stream(_),
                ..
            } => FieldKind::Stream,
        }
    }
}

/// Server-side streaming multipart form.
#[derive(Default)]
pub struct StreamingForm {
    parts: Vec<(String, StreamingValue)>,
}

impl StreamingForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.parts
            .push((name.into(), StreamingValue::Text(value.into())));
    }

    /// Append a binary part. The content type defaults to `application/octet-stream`.
    pub fn append_file(
        &mut self,
        name: impl Into<String>,
        body: FileBody,
        filename: impl Into<String>,
        content_type: Option<&str>,
    ) {
        self.parts.push((
            name.into(),
            StreamingValue::File {
                body,
                filename: filename.into(),
                content_type: content_type
                    .unwrap_or("application/octet-stream")
                    .to_string(),
            },
        ));
    }

    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        self.delete(name);
        self.append_text(name, value);
    }

    pub fn delete(&mut self, name: &str) {
        self.parts.retain(|(n, _)| n != name);
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        self.parts.iter().find_map(|(n, v)| match v {
            StreamingValue::Text(t) if n == name => Some(t.as_str()),
            _ => None,
        })
    }

    pub fn count(&self, name: &str) -> usize {
        self.parts.iter().filter(|(n, _)| n == name).count()
    }

    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.parts
            .iter()
            .find(|(n, _)| n == name)
            .map(|(_, v)| v.kind())
    }

    /// Parts in append order, for the transport to encode.
    pub fn into_parts(self) -> Vec<(String, StreamingValue)> {
        self.parts
    }
}

impl fmt::Debug for StreamingForm {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let fields: Vec<_> = self
            .parts
            .iter()
            .map(|(n, v)| (n.as_str(), v.kind()))
            .collect();
        f.debug_struct("StreamingForm")
            .field("fields", &fields)
            .finish()
    }
}

// ═════════════════════════════════════════════════════════════════════════════
// Native form
// ═════════════════════════════════════════════════════════════════════════════

/// Value of a [`NativeForm`] entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NativeValue {
    Text(String),
    File { blob: Blob, filename: String },
}

/// Browser `FormData`-style form: text and Blob entries only.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NativeForm {
    entries: Vec<(String, NativeValue)>,
}

impl NativeForm {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append_text(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.entries
            .push((name.into(), NativeValue::Text(value.into())));
    }

    /// Append a Blob. The filename falls back to the blob's own name, then `"blob"`.
    pub fn append_blob(&mut self, name: impl Into<String>, blob: Blob, filename: Option<&str>) {
        let filename = filename
            .or(blob.name())
            .unwrap_or("blob")
            .to_string();
        self.entries
            .push((name.into(), NativeValue::File { blob, filename }));
    }

    /// `FormData.set`: the first entry is replaced in place, the rest are dropped.
    pub fn set_text(&mut self, name: &str, value: impl Into<String>) {
        let value = NativeValue::Text(value.into());
        match self.entries.iter().position(|(n, _)| n == name) {
            Some(idx) => {
                self.entries[idx].1 = value;
                let mut seen = 0;
                self.entries.retain(|(n, _)| {
                    if n != name {
                        return true;
                    }
                    seen += 1;
                    seen == 1
                });
            }
            None => self.entries.push((name.to_string(), value)),
        }
    }

    pub fn delete(&mut self, name: &str) {
        self.entries.retain(|(n, _)| n != name);
    }

    pub fn get(&self, name: &str) -> Option<&NativeValue> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, v)| v)
    }

    pub fn text_field(&self, name: &str) -> Option<&str> {
        match self.get(name)? {
            NativeValue::Text(t) => Some(t.as_str()),
            NativeValue::File { .. } => None,
        }
    }

    pub fn count(&self, name: &str) -> usize {
        self.entries.iter().filter(|(n, _)| n == name).count()
    }

    pub fn field_kind(&self, name: &str) -> Option<FieldKind> {
        self.get(name).map(|v| match v {
            NativeValue::Text(_) => FieldKind::Text,
            NativeValue::File { .. } => FieldKind::Blob,
        })
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &NativeValue)> {
        self.entries.iter().map(|(n, v)| (n.as_str(), v))
    }

    pub fn into_entries(self) -> Vec<(String, NativeValue)> {
        self.entries
    }
}
