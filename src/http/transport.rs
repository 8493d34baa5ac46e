//! Transport abstraction: one `fetch` call per request.
//!
//! The SDK never talks to the network directly. [`ServiceHttp`](super::ServiceHttp)
//! hands a fully built [`HttpRequest`] to a [`Transport`], so tests and unusual
//! runtimes can plug in their own. [`ReqwestTransport`] is the default.

use crate::error::HttpError;
use crate::upload::MultipartTarget;
use async_trait::async_trait;
use bytes::Bytes;
use serde::de::DeserializeOwned;
use std::collections::HashMap;

/// Header map with lower-cased names.
pub type Headers = HashMap<String, String>;

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
        }
    }
}

#[cfg(feature = "http")]
impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Outgoing request body.
#[derive(Debug, Default)]
pub enum RequestBody {
    #[default]
    Empty,
    /// Pre-serialized JSON text.
    Json(String),
    Multipart(MultipartTarget),
}

/// A request as handed to the transport (the URL is passed separately).
#[derive(Debug)]
pub struct HttpRequest {
    pub method: Method,
    pub headers: Headers,
    pub body: RequestBody,
}

impl HttpRequest {
    pub fn get() -> Self {
        Self {
            method: Method::Get,
            headers: Headers::new(),
            body: RequestBody::Empty,
        }
    }

    pub fn post_json(json: String) -> Self {
        let mut headers = Headers::new();
        headers.insert("content-type".to_string(), "application/json".to_string());
        Self {
            method: Method::Post,
            headers,
            body: RequestBody::Json(json),
        }
    }

    pub fn post_multipart(form: MultipartTarget, headers: Headers) -> Self {
        Self {
            method: Method::Post,
            headers,
            body: RequestBody::Multipart(form),
        }
    }
}

/// Buffered HTTP response.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawResponse {
    pub status: u16,
    /// Header names are lower-cased.
    pub headers: HashMap<String, String>,
    pub body: Bytes,
}

impl RawResponse {
    /// 2xx and 3xx count as success.
    pub fn is_success(&self) -> bool {
        (200..400).contains(&self.status)
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .get(&name.to_ascii_lowercase())
            .map(String::as_str)
    }

    pub fn content_type(&self) -> Option<&str> {
        self.header("content-type")
    }

    pub fn is_json(&self) -> bool {
        self.content_type()
            .map(|ct| ct.to_ascii_lowercase().contains("application/json"))
            .unwrap_or(false)
    }

    pub fn bytes(&self) -> Bytes {
        self.body.clone()
    }

    /// Same as [`bytes`](Self::bytes); mirrors the fetch `Response` API.
    pub fn array_buffer(&self) -> Bytes {
        self.bytes()
    }

    /// Body decoded as UTF-8, lossily.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }

    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HttpError> {
        serde_json::from_slice(&self.body).map_err(|source| HttpError::MalformedResponse {
            status: self.status,
            source,
        })
    }
}

/// Pluggable fetch capability.
///
/// Implementations report transport-level failures as `Err`; non-2xx statuses
/// are returned as ordinary responses and classified by the caller.
///
/// Multipart bodies arrive as part lists. Implementations encode them and must
/// let `HttpRequest::headers` override any header their encoder computes.
#[cfg_attr(not(target_arch = "wasm32"), async_trait)]
#[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
pub trait Transport: Send + Sync {
    async fn fetch(&self, url: &str, request: HttpRequest) -> Result<RawResponse, HttpError>;
}

// ═════════════════════════════════════════════════════════════════════════════
// reqwest transport
// ═════════════════════════════════════════════════════════════════════════════

#[cfg(feature = "http")]
pub use reqwest_impl::ReqwestTransport;

#[cfg(feature = "http")]
mod reqwest_impl {
    use super::*;
    use crate::upload::{FileBody, NativeForm, NativeValue, StreamingForm, StreamingValue};
    use reqwest::header::{HeaderName, HeaderValue};
    use reqwest::multipart::{Form, Part};
    use reqwest::Client;

    /// Default transport backed by `reqwest` (native and WASM).
    ///
    /// Multipart bodies are encoded by `reqwest::multipart`, which owns the
    /// boundary, `content-type` and, for fully sized forms, `content-length`.
    /// Request headers are applied last and replace anything reqwest computed.
    #[derive(Debug, Clone)]
    pub struct ReqwestTransport {
        client: Client,
    }

    impl ReqwestTransport {
        pub fn new() -> Result<Self, HttpError> {
            Ok(Self {
                client: Client::builder().build()?,
            })
        }

        pub fn with_client(client: Client) -> Self {
            Self { client }
        }
    }

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl Transport for ReqwestTransport {
        async fn fetch(&self, url: &str, request: HttpRequest) -> Result<RawResponse, HttpError> {
            let HttpRequest {
                method,
                headers,
                body,
            } = request;

            let req = self.client.request(method.into(), url);
            let req = match body {
                RequestBody::Empty => req,
                RequestBody::Json(json) => req.body(json),
                RequestBody::Multipart(MultipartTarget::Streaming(form)) => {
                    req.multipart(streaming_form(form).await?)
                }
                RequestBody::Multipart(MultipartTarget::Native(form)) => {
                    req.multipart(native_form(form)?)
                }
            };

            let mut outgoing = req.build()?;
            for (name, value) in headers {
                let header = HeaderName::from_bytes(name.as_bytes())
                    .map_err(|e| HttpError::Transport(format!("invalid header name {:?}: {}", name, e)))?;
                let value = HeaderValue::from_str(&value)
                    .map_err(|e| HttpError::Transport(format!("invalid value for header {:?}: {}", name, e)))?;
                outgoing.headers_mut().insert(header, value);
            }

            let resp = self.client.execute(outgoing).await?;
            let status = resp.status().as_u16();
            let headers = resp
                .headers()
                .iter()
                .filter_map(|(name, value)| {
                    value
                        .to_str()
                        .ok()
                        .map(|v| (name.as_str().to_ascii_lowercase(), v.to_string()))
                })
                .collect();
            let body = resp.bytes().await?;

            Ok(RawResponse {
                status,
                headers,
                body,
            })
        }
    }

    async fn streaming_form(form: StreamingForm) -> Result<Form, HttpError> {
        let mut out = Form::new();
        for (name, value) in form.into_parts() {
            out = match value {
                StreamingValue::Text(text) => out.text(name, text),
                StreamingValue::File {
                    body,
                    filename,
                    content_type,
                } => {
                    let part = file_part(body)
                        .await?
                        .file_name(filename)
                        .mime_str(&content_type)?;
                    out.part(name, part)
                }
            };
        }
        Ok(out)
    }

    #[cfg(not(target_arch = "wasm32"))]
    async fn file_part(body: FileBody) -> Result<Part, HttpError> {
        Ok(match body {
            FileBody::Bytes(bytes) => Part::bytes(bytes.to_vec()),
            // Unsized: reqwest falls back to chunked transfer encoding.
            FileBody::Stream(stream) => Part::stream(reqwest::Body::wrap_stream(stream)),
        })
    }

    #[cfg(target_arch = "wasm32")]
    async fn file_part(body: FileBody) -> Result<Part, HttpError> {
        use futures_util::StreamExt;

        Ok(match body {
            FileBody::Bytes(bytes) => Part::bytes(bytes.to_vec()),
            FileBody::Stream(mut stream) => {
                let mut buf = Vec::new();
                while let Some(chunk) = stream.next().await {
                    let chunk = chunk
                        .map_err(|e| HttpError::Transport(format!("upload stream read failed: {}", e)))?;
                    buf.extend_from_slice(&chunk);
                }
                Part::bytes(buf)
            }
        })
    }

    fn native_form(form: NativeForm) -> Result<Form, HttpError> {
        let mut out = Form::new();
        for (name, value) in form.into_entries() {
            out = match value {
                NativeValue::Text(text) => out.text(name, text),
                NativeValue::File { blob, filename } => {
                    let mut part = Part::bytes(blob.bytes().to_vec()).file_name(filename);
                    if let Some(mime) = blob.mime_type() {
                        part = part.mime_str(mime)?;
                    }
                    out.part(name, part)
                }
            };
        }
        Ok(out)
    }
}
