//! Unified SDK error types.

use crate::http::RawResponse;
use thiserror::Error;

/// Top-level SDK error.
#[derive(Error, Debug)]
pub enum SdkError {
    #[error("HTTP error: {0}")]
    Http(#[from] HttpError),

    #[error("Upload error: {0}")]
    Upload(#[from] UploadError),

    /// A required field was missing or empty. Raised before any request is sent.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

impl SdkError {
    pub(crate) fn required(field: &str) -> Self {
        SdkError::Validation(format!("{} is required", field))
    }

    /// The raw response attached to a failed request, if any.
    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            SdkError::Http(HttpError::RequestFailed { response }) => Some(response.as_ref()),
            _ => None,
        }
    }
}

/// HTTP-layer errors.
#[derive(Error, Debug)]
pub enum HttpError {
    #[cfg(feature = "http")]
    #[error("Request failed: {0}")]
    Reqwest(#[from] reqwest::Error),

    /// Failure reported by a custom transport (DNS, refused connection, ...).
    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Failed to encode query: {0}")]
    Query(#[from] serde_urlencoded::ser::Error),

    /// The server answered with a status outside 2xx/3xx.
    #[error("Request failed with status {}", .response.status)]
    RequestFailed { response: Box<RawResponse> },

    /// The body was declared (or expected) as JSON but could not be decoded.
    #[error("Failed to parse response (status {status}): {source}")]
    MalformedResponse {
        status: u16,
        #[source]
        source: serde_json::Error,
    },
}

impl HttpError {
    /// Status code of the failed request, when the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            HttpError::RequestFailed { response } => Some(response.status),
            HttpError::MalformedResponse { status, .. } => Some(*status),
            #[cfg(feature = "http")]
            HttpError::Reqwest(e) => e.status().map(|s| s.as_u16()),
            HttpError::Transport(_) | HttpError::Query(_) => None,
        }
    }

    pub fn response(&self) -> Option<&RawResponse> {
        match self {
            HttpError::RequestFailed { response } => Some(response.as_ref()),
            _ => None,
        }
    }
}

/// Upload normalization errors.
#[derive(Error, Debug)]
pub enum UploadError {
    #[error("Invalid upload spec: {0}")]
    InvalidSpec(String),

    #[error("Unsupported upload source: {0}")]
    UnsupportedSource(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use bytes::Bytes;
    use std::collections::HashMap;

    #[test]
    fn test_request_failed_exposes_response() {
        let response = RawResponse {
            status: 404,
            headers: HashMap::new(),
            body: Bytes::from_static(b"missing"),
        };
        let err = SdkError::from(HttpError::RequestFailed {
            response: Box::new(response),
        });
        assert_eq!(err.to_string(), "HTTP error: Request failed with status 404");
        let attached = err.response().unwrap();
        assert_eq!(attached.status, 404);
        assert_eq!(attached.text(), "missing");
    }

    #[test]
    fn test_query_encoding_error_surfaces() {
        let cause = <serde_urlencoded::ser::Error as serde::ser::Error>::custom("unsupported value");
        let err = HttpError::from(cause);
        assert_eq!(err.to_string(), "Failed to encode query: unsupported value");
        assert_eq!(err.status(), None);
        assert!(err.response().is_none());
    }

    #[test]
    fn test_required_message() {
        let err = SdkError::required("hkey");
        assert!(matches!(err, SdkError::Validation(ref m) if m == "hkey is required"));
    }
}
