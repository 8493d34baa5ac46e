//! Recording mock transport shared by the integration suites.

#![allow(dead_code)]

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use bytes::{Bytes, BytesMut};
use futures_util::StreamExt;
use serde_json::{json, Value};

use edge_sdk::config::EnvSource;
use edge_sdk::error::HttpError;
use edge_sdk::http::{Headers, HttpRequest, Method, RawResponse, RequestBody, Transport};
use edge_sdk::upload::{FileBody, MultipartKind, MultipartTarget, NativeValue, StreamingValue};
use edge_sdk::client::EdgeClient;

pub const CSTORE_URL: &str = "http://cstore.test:31234";
pub const R1FS_URL: &str = "http://r1fs.test:31235";

/// A streaming multipart part with its payload read to the end.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordedPart {
    Text(String),
    File {
        filename: String,
        content_type: String,
        data: Bytes,
        /// The payload came from a stream rather than a sized buffer.
        streamed: bool,
    },
}

/// Request body as seen by the mock.
#[derive(Debug)]
pub enum RecordedBody {
    Empty,
    Json(Value),
    Streaming(Vec<(String, RecordedPart)>),
    Native(Vec<(String, NativeValue)>),
}

#[derive(Debug)]
pub struct Recorded {
    pub url: String,
    pub method: Method,
    pub headers: Headers,
    pub body: RecordedBody,
}

impl Recorded {
    pub fn json(&self) -> &Value {
        match &self.body {
            RecordedBody::Json(v) => v,
            other => panic!("expected JSON body, got {:?}", other),
        }
    }

    pub fn streaming_parts(&self) -> &[(String, RecordedPart)] {
        match &self.body {
            RecordedBody::Streaming(parts) => parts,
            other => panic!("expected streaming multipart body, got {:?}", other),
        }
    }

    /// Every streaming part called `name`.
    pub fn parts_named(&self, name: &str) -> Vec<&RecordedPart> {
        self.streaming_parts()
            .iter()
            .filter(|(n, _)| n == name)
            .map(|(_, p)| p)
            .collect()
    }

    pub fn native_entries(&self) -> &[(String, NativeValue)] {
        match &self.body {
            RecordedBody::Native(entries) => entries,
            other => panic!("expected native multipart body, got {:?}", other),
        }
    }
}

/// Returns queued responses in order and records every request.
#[derive(Default)]
pub struct MockTransport {
    responses: Mutex<VecDeque<RawResponse>>,
    requests: Mutex<Vec<Recorded>>,
}

impl MockTransport {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn respond(&self, response: RawResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    pub fn respond_result(&self, result: Value) {
        self.respond(json_response(200, envelope(result)));
    }

    pub fn requests(&self) -> std::sync::MutexGuard<'_, Vec<Recorded>> {
        self.requests.lock().unwrap()
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn fetch(&self, url: &str, request: HttpRequest) -> Result<RawResponse, HttpError> {
        let HttpRequest {
            method,
            headers,
            body,
        } = request;
        let body = match body {
            RequestBody::Empty => RecordedBody::Empty,
            RequestBody::Json(text) => RecordedBody::Json(
                serde_json::from_str(&text).expect("request body should be valid JSON"),
            ),
            RequestBody::Multipart(MultipartTarget::Streaming(form)) => {
                let mut parts = Vec::new();
                for (name, value) in form.into_parts() {
                    parts.push((name, record_part(value).await?));
                }
                RecordedBody::Streaming(parts)
            }
            RequestBody::Multipart(MultipartTarget::Native(form)) => {
                RecordedBody::Native(form.into_entries())
            }
        };
        self.requests.lock().unwrap().push(Recorded {
            url: url.to_string(),
            method,
            headers,
            body,
        });
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or_else(|| HttpError::Transport("no response queued".into()))
    }
}

async fn record_part(value: StreamingValue) -> Result<RecordedPart, HttpError> {
    Ok(match value {
        StreamingValue::Text(text) => RecordedPart::Text(text),
        StreamingValue::File {
            body,
            filename,
            content_type,
        } => {
            let (data, streamed) = match body {
                FileBody::Bytes(bytes) => (bytes, false),
                FileBody::Stream(mut stream) => {
                    let mut buf = BytesMut::new();
                    while let Some(chunk) = stream.next().await {
                        buf.extend_from_slice(
                            &chunk.map_err(|e| HttpError::Transport(e.to_string()))?,
                        );
                    }
                    (buf.freeze(), true)
                }
            };
            RecordedPart::File {
                filename,
                content_type,
                data,
                streamed,
            }
        }
    })
}

// ── Response helpers ─────────────────────────────────────────────────────────

pub fn envelope(result: Value) -> Value {
    json!({
        "result": result,
        "server_node_addr": "0xai_mock_node",
        "evm_network": "devnet",
        "ee_node_alias": "mock-edge",
        "ee_node_address": "0xai_mock",
        "ee_node_eth_address": "0xmock",
        "ee_node_network": "devnet",
        "ee_node_ver": "2.0.0",
        "server_time": "2025-06-01 12:00:00"
    })
}

pub fn json_response(status: u16, body: Value) -> RawResponse {
    let mut headers = HashMap::new();
    headers.insert(
        "content-type".to_string(),
        "application/json; charset=utf-8".to_string(),
    );
    RawResponse {
        status,
        headers,
        body: Bytes::from(body.to_string()),
    }
}

pub fn binary_response(content_type: &str, body: &'static [u8]) -> RawResponse {
    let mut headers = HashMap::new();
    headers.insert("content-type".to_string(), content_type.to_string());
    RawResponse {
        status: 200,
        headers,
        body: Bytes::from_static(body),
    }
}

// ── Client helpers ───────────────────────────────────────────────────────────

pub fn client_with(mock: &Arc<MockTransport>, kind: MultipartKind, peers: &[&str]) -> EdgeClient {
    EdgeClient::builder()
        .env(EnvSource::isolated(HashMap::new()))
        .cstore_url(CSTORE_URL)
        .r1fs_url(R1FS_URL)
        .chainstore_peers(peers.iter().copied())
        .multipart_kind(kind)
        .transport(mock.clone())
        .build()
        .expect("client should build")
}

pub fn client(mock: &Arc<MockTransport>) -> EdgeClient {
    client_with(mock, MultipartKind::Streaming, &[])
}
