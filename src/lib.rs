//! # Edge SDK
//!
//! Rust client for edge node services: the replicated chain store (cstore)
//! and the content-addressed file store (r1fs). Works on native and WASM
//! targets.
//!
//! ## Architecture
//!
//! The SDK is organized in layers:
//!
//! 1. **Core**: Envelopes, upload normalization, domain types, configuration (always available, WASM-safe)
//! 2. **HTTP**: `Transport` trait, query encoding, `ServiceHttp` (reqwest transport behind the `http` feature)
//! 3. **High-Level Client**: `EdgeClient` with nested sub-clients
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use edge_sdk::prelude::*;
//!
//! let client = EdgeClient::builder()
//!     .cstore_url("localhost:31234")
//!     .r1fs_url("localhost:31235")
//!     .build()?;
//!
//! client.cstore().set_value(&SetValueRequest::new("greeting", "hi")).await?;
//! let value = client.cstore().get_value(&GetValueRequest::new("greeting")).await?;
//!
//! let uploaded = client
//!     .r1fs()
//!     .add_file(UploadFileRequest::file(b"hello".to_vec()).filename("hello.txt"))
//!     .await?;
//! let envelope = client.r1fs().get_file_full(&DownloadFileRequest::new(uploaded.cid)).await?;
//! ```

// ── Layer 1: Core ────────────────────────────────────────────────────────────

/// Shared helpers used across domains.
pub mod shared;

/// Domain modules: cstore and r1fs request/result types and sub-clients.
pub mod domain;

/// Response envelopes and response-mode selection.
pub mod envelope;

/// Upload sources, multipart forms, and upload normalization.
pub mod upload;

/// Configuration resolution.
pub mod config;

/// Unified SDK error types.
pub mod error;

/// Network defaults and environment keys.
pub mod network;

// ── Layer 2: HTTP ────────────────────────────────────────────────────────────

/// Transport abstraction and the per-service request core.
pub mod http;

// ── Layer 3: High-Level Client ───────────────────────────────────────────────

/// `EdgeClient`: the primary entry point.
pub mod client;

// ── Prelude ──────────────────────────────────────────────────────────────────

pub mod prelude {
    // Envelope + response modes
    pub use crate::envelope::{Content, Envelope, FullEnvelope, ResponseMode, ResultOnly};

    // Domain types: cstore
    pub use crate::domain::cstore::{
        CStoreStatus, ChainStoreValue, GetValueRequest, HGetAllRequest, HGetRequest, HSetRequest,
        HashValues, SetValueRequest,
    };

    // Domain types: r1fs
    pub use crate::domain::r1fs::{
        Base64File, CalculateCidRequest, CidResult, DeleteFileRequest, DeleteFilesRequest,
        DeleteResult, DownloadFileRequest, FileMetadata, R1fsStatus, RetrieveYamlRequest,
        StoreDataRequest, UploadBase64Request, UploadResult, YamlData,
    };

    // Uploads
    pub use crate::upload::{
        Blob, MultipartKind, MultipartTarget, NativeForm, StreamingForm, UploadFileRequest,
        UploadMetadata, UploadSource,
    };

    // Errors
    pub use crate::error::{HttpError, SdkError, UploadError};

    // Configuration
    pub use crate::config::{EdgeOptions, EnvSource, ExecutionContext};
    pub use crate::network::{DEFAULT_CSTORE_URL, DEFAULT_R1FS_URL};

    // Transport
    #[cfg(feature = "http")]
    pub use crate::http::ReqwestTransport;
    pub use crate::http::{HttpRequest, RawResponse, Transport};

    // Client + sub-clients
    pub use crate::client::{
        create_browser_client, create_edge_client, CStoreClient, EdgeClient, EdgeClientBuilder,
        R1fsClient,
    };
}
