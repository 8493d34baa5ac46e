//! High-level client: `EdgeClient` with nested sub-client accessors.
//!
//! Each service has its own sub-client in `domain/<name>/client.rs`.
//! This module keeps the builder, the resolved per-service HTTP clients, and
//! the accessor methods.

use crate::config::{EdgeConfig, EdgeOptions, EnvSource, ExecutionContext};
use crate::domain::cstore::client::CStore;
use crate::domain::r1fs::client::R1fs;
use crate::error::SdkError;
use crate::http::{ServiceHttp, Transport};
use crate::upload::MultipartKind;

use std::sync::Arc;

// Re-export sub-client types for convenience.
pub use crate::domain::cstore::client::CStore as CStoreClient;
pub use crate::domain::r1fs::client::R1fs as R1fsClient;

/// The primary entry point for the edge node SDK.
///
/// Provides nested sub-client accessors for each service:
/// `client.cstore()` and `client.r1fs()`.
#[derive(Debug, Clone)]
pub struct EdgeClient {
    pub(crate) cstore_http: ServiceHttp,
    pub(crate) r1fs_http: ServiceHttp,
    /// Attached to every cstore mutation.
    pub(crate) chainstore_peers: Vec<String>,
    /// Used for `add_file` uploads that do not bring their own form.
    pub(crate) multipart_kind: MultipartKind,
}

impl EdgeClient {
    pub fn builder() -> EdgeClientBuilder {
        EdgeClientBuilder::default()
    }

    /// Server-context client configured from the process environment.
    pub fn server() -> Result<Self, SdkError> {
        Self::builder().context(ExecutionContext::Server).build()
    }

    /// Browser-context client: native multipart forms by default.
    pub fn browser() -> Result<Self, SdkError> {
        Self::builder().context(ExecutionContext::Browser).build()
    }

    // ── Sub-client accessors ─────────────────────────────────────────────

    pub fn cstore(&self) -> CStore<'_> {
        CStore { client: self }
    }

    pub fn r1fs(&self) -> R1fs<'_> {
        R1fs { client: self }
    }

    // ── Resolved configuration ───────────────────────────────────────────

    pub fn cstore_url(&self) -> &str {
        self.cstore_http.base_url()
    }

    pub fn r1fs_url(&self) -> &str {
        self.r1fs_http.base_url()
    }

    pub fn chainstore_peers(&self) -> &[String] {
        &self.chainstore_peers
    }

    pub fn multipart_kind(&self) -> MultipartKind {
        self.multipart_kind
    }

    pub fn verbose(&self) -> bool {
        self.cstore_http.verbose()
    }
}

/// Server-context client from explicit options.
pub fn create_edge_client(options: EdgeOptions) -> Result<EdgeClient, SdkError> {
    EdgeClient::builder().options(options).build()
}

/// Browser-context client from explicit options.
pub fn create_browser_client(options: EdgeOptions) -> Result<EdgeClient, SdkError> {
    EdgeClient::builder()
        .options(options)
        .context(ExecutionContext::Browser)
        .build()
}

// ═════════════════════════════════════════════════════════════════════════════
// Builder
// ═════════════════════════════════════════════════════════════════════════════

#[derive(Default)]
pub struct EdgeClientBuilder {
    options: EdgeOptions,
    transport: Option<Arc<dyn Transport>>,
    multipart_kind: Option<MultipartKind>,
    context: ExecutionContext,
    env: EnvSource,
}

impl EdgeClientBuilder {
    /// Replace all explicit options at once.
    pub fn options(mut self, options: EdgeOptions) -> Self {
        self.options = options;
        self
    }

    pub fn cstore_url(mut self, url: &str) -> Self {
        self.options.cstore_url = Some(url.to_string());
        self
    }

    pub fn r1fs_url(mut self, url: &str) -> Self {
        self.options.r1fs_url = Some(url.to_string());
        self
    }

    pub fn chainstore_peers<I, S>(mut self, peers: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.options.chainstore_peers = Some(peers.into_iter().map(Into::into).collect());
        self
    }

    /// Peer list as a JSON array of strings.
    pub fn chainstore_peers_json(mut self, json: &str) -> Self {
        self.options.chainstore_peers_json = Some(json.to_string());
        self
    }

    pub fn verbose(mut self, verbose: bool) -> Self {
        self.options.verbose = Some(verbose);
        self
    }

    /// Alias for `verbose`, consulted only when `verbose` is unset.
    pub fn debug(mut self, debug: bool) -> Self {
        self.options.debug = Some(debug);
        self
    }

    pub fn transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Override the multipart implementation chosen by the context.
    pub fn multipart_kind(mut self, kind: MultipartKind) -> Self {
        self.multipart_kind = Some(kind);
        self
    }

    pub fn context(mut self, context: ExecutionContext) -> Self {
        self.context = context;
        self
    }

    pub fn env(mut self, env: EnvSource) -> Self {
        self.env = env;
        self
    }

    pub fn build(self) -> Result<EdgeClient, SdkError> {
        let config = EdgeConfig::resolve(&self.options, &self.env);
        let transport = match self.transport {
            Some(transport) => transport,
            None => default_transport()?,
        };
        let multipart_kind = self
            .multipart_kind
            .unwrap_or_else(|| self.context.default_multipart_kind());

        if config.verbose {
            tracing::debug!(
                cstore_url = %config.cstore_url,
                r1fs_url = %config.r1fs_url,
                peers = ?config.chainstore_peers,
                multipart = ?multipart_kind,
                "initializing edge client"
            );
        }

        Ok(EdgeClient {
            cstore_http: ServiceHttp::new(&config.cstore_url, transport.clone(), config.verbose),
            r1fs_http: ServiceHttp::new(&config.r1fs_url, transport, config.verbose),
            chainstore_peers: config.chainstore_peers,
            multipart_kind,
        })
    }
}

#[cfg(feature = "http")]
fn default_transport() -> Result<Arc<dyn Transport>, SdkError> {
    Ok(Arc::new(crate::http::ReqwestTransport::new()?))
}

#[cfg(not(feature = "http"))]
fn default_transport() -> Result<Arc<dyn Transport>, SdkError> {
    Err(SdkError::Config(
        "no transport configured: enable the `http` feature or set one with `transport()`"
            .to_string(),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::HttpError;
    use crate::http::{HttpRequest, RawResponse};
    use async_trait::async_trait;
    use std::collections::HashMap;

    struct Unreachable;

    #[cfg_attr(not(target_arch = "wasm32"), async_trait)]
    #[cfg_attr(target_arch = "wasm32", async_trait(?Send))]
    impl Transport for Unreachable {
        async fn fetch(&self, _url: &str, _request: HttpRequest) -> Result<RawResponse, HttpError> {
            Err(HttpError::Transport("unreachable".into()))
        }
    }

    fn isolated() -> EdgeClientBuilder {
        EdgeClient::builder()
            .env(EnvSource::isolated(HashMap::new()))
            .transport(Arc::new(Unreachable))
    }

    #[test]
    fn test_builder_defaults() {
        let client = isolated().build().unwrap();
        assert_eq!(client.cstore_url(), "http://localhost:31234");
        assert_eq!(client.r1fs_url(), "http://localhost:31235");
        assert!(client.chainstore_peers().is_empty());
        assert_eq!(client.multipart_kind(), MultipartKind::Streaming);
        assert!(!client.verbose());
    }

    #[test]
    fn test_builder_explicit_options() {
        let client = isolated()
            .cstore_url("https://cstore.example/")
            .r1fs_url("r1fs.example:80")
            .chainstore_peers(["peer-a", "peer-b"])
            .debug(true)
            .build()
            .unwrap();
        assert_eq!(client.cstore_url(), "https://cstore.example");
        assert_eq!(client.r1fs_url(), "http://r1fs.example:80");
        assert_eq!(client.chainstore_peers(), ["peer-a", "peer-b"]);
        assert!(client.verbose());
    }

    #[test]
    fn test_browser_context_uses_native_forms() {
        let client = isolated()
            .context(ExecutionContext::Browser)
            .build()
            .unwrap();
        assert_eq!(client.multipart_kind(), MultipartKind::Native);

        let forced = isolated()
            .context(ExecutionContext::Browser)
            .multipart_kind(MultipartKind::Streaming)
            .build()
            .unwrap();
        assert_eq!(forced.multipart_kind(), MultipartKind::Streaming);
    }

    #[test]
    fn test_peers_json_setter() {
        let client = isolated().chainstore_peers_json(r#"["x"]"#).build().unwrap();
        assert_eq!(client.chainstore_peers(), ["x"]);
        let bad = isolated().chainstore_peers_json("[oops").build().unwrap();
        assert!(bad.chainstore_peers().is_empty());
    }

    #[tokio::test]
    async fn test_validation_happens_before_transport() {
        let client = isolated().build().unwrap();
        let err = client
            .cstore()
            .get_value(&crate::domain::cstore::GetValueRequest::new(""))
            .await
            .unwrap_err();
        assert!(matches!(err, SdkError::Validation(ref m) if m == "key is required"));
    }
}
