//! Upload input shapes: raw bytes, byte streams, and Blob/File-like values.

use bytes::Bytes;
use futures_util::stream::{self, Stream};
use std::fmt;
use std::pin::Pin;

/// A single-pass byte stream, the server-side "Readable".
pub type ByteStream = Pin<Box<dyn Stream<Item = std::io::Result<Bytes>> + Send>>;

/// Wrap any `Send` stream of byte chunks into a [`ByteStream`].
pub fn byte_stream<S>(s: S) -> ByteStream
where
    S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
{
    Box::pin(s)
}

/// In-memory binary object with an optional MIME type.
///
/// A `Blob` with a name behaves like a browser `File`: the name is used as the
/// default upload filename.
#[derive(Clone, PartialEq, Eq)]
pub struct Blob {
    data: Bytes,
    mime_type: Option<String>,
    name: Option<String>,
}

impl Blob {
    pub fn new(data: impl Into<Bytes>) -> Self {
        Self {
            data: data.into(),
            mime_type: None,
            name: None,
        }
    }

    /// A named blob (the `File` shape).
    pub fn file(data: impl Into<Bytes>, name: impl Into<String>) -> Self {
        Self::new(data).with_name(name)
    }

    pub fn with_mime_type(mut self, mime: impl Into<String>) -> Self {
        let mime = mime.into();
        self.mime_type = (!mime.is_empty()).then_some(mime);
        self
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn mime_type(&self) -> Option<&str> {
        self.mime_type.as_deref()
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn size(&self) -> usize {
        self.data.len()
    }

    pub fn bytes(&self) -> Bytes {
        self.data.clone()
    }

    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.data).into_owned()
    }

    /// Stream the blob contents as a single chunk.
    pub fn stream(&self) -> ByteStream {
        byte_stream(stream::once(futures_util::future::ready(Ok(self.data.clone()))))
    }
}

impl fmt::Debug for Blob {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Blob")
            .field("size", &self.data.len())
            .field("mime_type", &self.mime_type)
            .field("name", &self.name)
            .finish()
    }
}

/// A raw file input for [`UploadFileRequest`](super::UploadFileRequest).
pub enum UploadSource {
    /// Raw byte buffer.
    Bytes(Bytes),
    /// Readable byte stream. Only streaming multipart forms accept this.
    Stream(ByteStream),
    /// Blob or File-like value.
    Blob(Blob),
}

impl UploadSource {
    pub fn stream<S>(s: S) -> Self
    where
        S: Stream<Item = std::io::Result<Bytes>> + Send + 'static,
    {
        UploadSource::Stream(byte_stream(s))
    }

    pub(crate) fn kind(&self) -> &'static str {
        match self {
            UploadSource::Bytes(_) => "bytes",
            UploadSource::Stream(_) => "stream",
            UploadSource::Blob(b) if b.name().is_some() => "file",
            UploadSource::Blob(_) => "blob",
        }
    }

    pub(crate) fn inferred_name(&self) -> Option<&str> {
        match self {
            UploadSource::Blob(b) => b.name(),
            _ => None,
        }
    }

    pub(crate) fn inferred_mime_type(&self) -> Option<&str> {
        match self {
            UploadSource::Blob(b) => b.mime_type(),
            _ => None,
        }
    }
}

impl fmt::Debug for UploadSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UploadSource::Bytes(b) => f.debug_tuple("Bytes").field(&b.len()).finish(),
            UploadSource::Stream(_) => f.write_str("Stream(..)"),
            UploadSource::Blob(b) => f.debug_tuple("Blob").field(b).finish(),
        }
    }
}

impl From<Bytes> for UploadSource {
    fn from(b: Bytes) -> Self {
        UploadSource::Bytes(b)
    }
}

impl From<Vec<u8>> for UploadSource {
    fn from(v: Vec<u8>) -> Self {
        UploadSource::Bytes(Bytes::from(v))
    }
}

impl From<&'static [u8]> for UploadSource {
    fn from(v: &'static [u8]) -> Self {
        UploadSource::Bytes(Bytes::from_static(v))
    }
}

impl From<Blob> for UploadSource {
    fn from(b: Blob) -> Self {
        UploadSource::Blob(b)
    }
}
