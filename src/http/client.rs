//! Low-level HTTP client: `ServiceHttp`.
//!
//! One instance per remote service (cstore, r1fs). Builds `base_url + path`,
//! hands the request to the configured [`Transport`], and turns non-success
//! statuses into [`HttpError::RequestFailed`]. Response shaping happens in
//! [`crate::envelope`].

use crate::error::{HttpError, SdkError};
use crate::http::query::Query;
use crate::http::transport::{HttpRequest, RawResponse, Transport};
use crate::upload::PreparedUpload;

use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// Request Core for a single remote service.
#[derive(Clone)]
pub struct ServiceHttp {
    base_url: String,
    transport: Arc<dyn Transport>,
    verbose: bool,
}

impl ServiceHttp {
    pub fn new(base_url: &str, transport: Arc<dyn Transport>, verbose: bool) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            transport,
            verbose,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn verbose(&self) -> bool {
        self.verbose
    }

    // ── Convenience methods ──────────────────────────────────────────────

    pub async fn get(&self, path: &str, query: &Query) -> Result<RawResponse, HttpError> {
        self.request(&query.append_to(path)?, HttpRequest::get())
            .await
    }

    pub async fn post_json<B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<RawResponse, SdkError> {
        let json = serde_json::to_string(body)?;
        Ok(self.request(path, HttpRequest::post_json(json)).await?)
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        upload: PreparedUpload,
    ) -> Result<RawResponse, HttpError> {
        self.request(path, HttpRequest::post_multipart(upload.body, upload.headers))
            .await
    }

    // ── Core ─────────────────────────────────────────────────────────────

    /// Issue one request. Statuses outside 2xx/3xx fail with the response attached.
    pub async fn request(
        &self,
        path: &str,
        request: HttpRequest,
    ) -> Result<RawResponse, HttpError> {
        let url = format!("{}{}", self.base_url, path);
        let method = request.method;
        let start = chrono::Utc::now();
        if self.verbose {
            tracing::debug!(
                url = %url,
                method = method.as_str(),
                started_at = %start.to_rfc3339(),
                "edge-sdk request"
            );
        }

        let resp = self.transport.fetch(&url, request).await?;

        if self.verbose {
            let end = chrono::Utc::now();
            tracing::debug!(
                url = %url,
                method = method.as_str(),
                status = resp.status,
                duration_ms = (end - start).num_milliseconds(),
                "edge-sdk response"
            );
        }

        if !resp.is_success() {
            return Err(HttpError::RequestFailed {
                response: Box::new(resp),
            });
        }
        Ok(resp)
    }
}

impl fmt::Debug for ServiceHttp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ServiceHttp")
            .field("base_url", &self.base_url)
            .field("verbose", &self.verbose)
            .finish_non_exhaustive()
    }
}
