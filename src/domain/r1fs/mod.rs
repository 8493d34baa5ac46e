//! R1FS domain: content-addressed file storage.

pub mod client;

use crate::error::SdkError;
use base64::Engine;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Result of `GET /get_status`; the shape is node-defined.
pub type R1fsStatus = Map<String, Value>;

// ─── Results ─────────────────────────────────────────────────────────────────

/// Result of `add_file` / `add_file_base64`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UploadResult {
    #[serde(default)]
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// JSON answer of `get_file` when the node returns metadata instead of bytes.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FileMetadata {
    #[serde(default)]
    pub file_path: String,
    #[serde(default)]
    pub meta: Value,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// Result of the `add_{yaml,json,pickle}` and `calculate_*_cid` endpoints.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CidResult {
    pub cid: String,
}

/// Result of `get_yaml`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct YamlData {
    #[serde(default)]
    pub file_data: Value,
}

/// Result of `get_file_base64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Base64File {
    #[serde(default)]
    pub file_base64_str: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
}

impl Base64File {
    /// Decoded file content.
    pub fn decode(&self) -> Result<Vec<u8>, SdkError> {
        base64::engine::general_purpose::STANDARD
            .decode(self.file_base64_str.as_bytes())
            .map_err(|e| SdkError::Validation(format!("invalid base64 payload: {}", e)))
    }
}

/// Result of `delete_file` / `delete_files`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DeleteResult {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub success: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ─── Requests ────────────────────────────────────────────────────────────────

/// Body of `POST /add_file_base64`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadBase64Request {
    pub file_base64_str: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl UploadBase64Request {
    pub fn new(file_base64_str: impl Into<String>) -> Self {
        Self {
            file_base64_str: file_base64_str.into(),
            ..Default::default()
        }
    }

    /// Encode raw bytes with standard base64.
    pub fn from_bytes(data: &[u8]) -> Self {
        Self::new(base64::engine::general_purpose::STANDARD.encode(data))
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Input for `get_file` (query) and `get_file_base64` (JSON body).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DownloadFileRequest {
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl DownloadFileRequest {
    pub fn new(cid: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            secret: None,
        }
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Input for `get_yaml`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrieveYamlRequest {
    pub cid: String,
    pub secret: Option<String>,
}

impl RetrieveYamlRequest {
    pub fn new(cid: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            secret: None,
        }
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Body of `POST /add_{yaml,json,pickle}`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoreDataRequest {
    pub data: Value,
    /// Stored file name.
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<i64>,
}

impl StoreDataRequest {
    pub fn new(data: impl Into<Value>) -> Self {
        Self {
            data: data.into(),
            ..Default::default()
        }
    }

    /// Wrap any serializable value as `data`.
    pub fn json<T: Serialize + ?Sized>(data: &T) -> Result<Self, SdkError> {
        Ok(Self::new(serde_json::to_value(data)?))
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
}

/// Body of `POST /calculate_{json,pickle}_cid`. `nonce` is mandatory.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CalculateCidRequest {
    pub data: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nonce: Option<i64>,
    #[serde(rename = "fn", default, skip_serializing_if = "Option::is_none")]
    pub filename: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secret: Option<String>,
}

impl CalculateCidRequest {
    pub fn new(data: impl Into<Value>, nonce: i64) -> Self {
        Self {
            data: data.into(),
            nonce: Some(nonce),
            ..Default::default()
        }
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = Some(filename.into());
        self
    }

    pub fn secret(mut self, secret: impl Into<String>) -> Self {
        self.secret = Some(secret.into());
        self
    }
}

/// Body of `POST /delete_file`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFileRequest {
    pub cid: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpin_remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_gc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_local_files: Option<bool>,
}

impl DeleteFileRequest {
    pub fn new(cid: impl Into<String>) -> Self {
        Self {
            cid: cid.into(),
            ..Default::default()
        }
    }
}

/// Body of `POST /delete_files`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeleteFilesRequest {
    pub cids: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unpin_remote: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_gc: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cleanup_local_files: Option<bool>,
}

impl DeleteFilesRequest {
    pub fn new<I, S>(cids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            cids: cids.into_iter().map(Into::into).collect(),
            ..Default::default()
        }
    }
}

/// `data` must be present: neither `null` nor an empty string.
pub(crate) fn has_data(data: &Value) -> bool {
    match data {
        Value::Null => false,
        Value::String(s) => !s.is_empty(),
        _ => true,
    }
}
