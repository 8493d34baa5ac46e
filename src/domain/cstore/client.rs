//! CStore sub-client: key/value and hash operations.
//!
//! Every operation comes in three forms: `op` returns the result only,
//! `op_full` returns the whole [`Envelope`], and `op_as::<M>` is generic over
//! the [`ResponseMode`].

use crate::client::EdgeClient;
use crate::domain::cstore::wire::{HSetBody, SetBody};
use crate::domain::cstore::{
    CStoreStatus, GetValueRequest, HGetAllRequest, HGetRequest, HSetRequest, HashValues,
    SetValueRequest,
};
use crate::envelope::{parse_envelope, resolve, Envelope, FullEnvelope, ResponseMode, ResultOnly};
use crate::error::SdkError;
use crate::http::{Query, ServiceHttp};
use crate::shared::require_non_empty;

/// Sub-client for the chain store.
pub struct CStore<'a> {
    pub(crate) client: &'a EdgeClient,
}

impl<'a> CStore<'a> {
    fn http(&self) -> &ServiceHttp {
        &self.client.cstore_http
    }

    fn peers(&self) -> &[String] {
        &self.client.chainstore_peers
    }

    // ── get_status ───────────────────────────────────────────────────────

    pub async fn get_status(&self) -> Result<CStoreStatus, SdkError> {
        self.get_status_as::<ResultOnly>().await
    }

    pub async fn get_status_full(&self) -> Result<Envelope<CStoreStatus>, SdkError> {
        self.get_status_as::<FullEnvelope>().await
    }

    pub async fn get_status_as<M: ResponseMode>(
        &self,
    ) -> Result<M::Output<CStoreStatus>, SdkError> {
        let resp = self.http().get("/get_status", &Query::new()).await?;
        Ok(resolve::<CStoreStatus, M>(&resp)?)
    }

    // ── set ──────────────────────────────────────────────────────────────

    pub async fn set_value(&self, request: &SetValueRequest) -> Result<bool, SdkError> {
        self.set_value_as::<ResultOnly>(request).await
    }

    pub async fn set_value_full(
        &self,
        request: &SetValueRequest,
    ) -> Result<Envelope<bool>, SdkError> {
        self.set_value_as::<FullEnvelope>(request).await
    }

    pub async fn set_value_as<M: ResponseMode>(
        &self,
        request: &SetValueRequest,
    ) -> Result<M::Output<bool>, SdkError> {
        require_non_empty("key", &request.key)?;
        if request.value.is_null() {
            return Err(SdkError::required("value"));
        }
        let body = SetBody {
            key: &request.key,
            value: request.value.to_wire_string(),
            chainstore_peers: self.peers(),
        };
        let resp = self.http().post_json("/set", &body).await?;
        Ok(resolve::<bool, M>(&resp)?)
    }

    // ── get ──────────────────────────────────────────────────────────────

    /// `None` when the key does not exist.
    pub async fn get_value(&self, request: &GetValueRequest) -> Result<Option<String>, SdkError> {
        self.get_value_as::<ResultOnly>(request).await
    }

    pub async fn get_value_full(
        &self,
        request: &GetValueRequest,
    ) -> Result<Envelope<Option<String>>, SdkError> {
        self.get_value_as::<FullEnvelope>(request).await
    }

    pub async fn get_value_as<M: ResponseMode>(
        &self,
        request: &GetValueRequest,
    ) -> Result<M::Output<Option<String>>, SdkError> {
        require_non_empty("key", &request.key)?;
        let query = Query::new().push("key", &request.key);
        let resp = self.http().get("/get", &query).await?;
        Ok(resolve::<Option<String>, M>(&resp)?)
    }

    // ── hset ─────────────────────────────────────────────────────────────

    pub async fn hset(&self, request: &HSetRequest) -> Result<bool, SdkError> {
        self.hset_as::<ResultOnly>(request).await
    }

    pub async fn hset_full(&self, request: &HSetRequest) -> Result<Envelope<bool>, SdkError> {
        self.hset_as::<FullEnvelope>(request).await
    }

    pub async fn hset_as<M: ResponseMode>(
        &self,
        request: &HSetRequest,
    ) -> Result<M::Output<bool>, SdkError> {
        require_non_empty("hkey", &request.hkey)?;
        require_non_empty("key", &request.key)?;
        if request.value.is_null() {
            return Err(SdkError::required("value"));
        }
        let body = HSetBody {
            hkey: &request.hkey,
            key: &request.key,
            value: request.value.to_wire_string(),
            chainstore_peers: self.peers(),
        };
        let resp = self.http().post_json("/hset", &body).await?;
        Ok(resolve::<bool, M>(&resp)?)
    }

    // ── hget ─────────────────────────────────────────────────────────────

    pub async fn hget(&self, request: &HGetRequest) -> Result<Option<String>, SdkError> {
        self.hget_as::<ResultOnly>(request).await
    }

    pub async fn hget_full(
        &self,
        request: &HGetRequest,
    ) -> Result<Envelope<Option<String>>, SdkError> {
        self.hget_as::<FullEnvelope>(request).await
    }

    pub async fn hget_as<M: ResponseMode>(
        &self,
        request: &HGetRequest,
    ) -> Result<M::Output<Option<String>>, SdkError> {
        require_non_empty("hkey", &request.hkey)?;
        require_non_empty("key", &request.key)?;
        let query = Query::new()
            .push("hkey", &request.hkey)
            .push("key", &request.key);
        let resp = self.http().get("/hget", &query).await?;
        Ok(resolve::<Option<String>, M>(&resp)?)
    }

    // ── hgetall ──────────────────────────────────────────────────────────

    /// A hash with no fields (or a `null` result) yields an empty map.
    pub async fn hgetall(&self, request: &HGetAllRequest) -> Result<HashValues, SdkError> {
        self.hgetall_as::<ResultOnly>(request).await
    }

    pub async fn hgetall_full(
        &self,
        request: &HGetAllRequest,
    ) -> Result<Envelope<HashValues>, SdkError> {
        self.hgetall_as::<FullEnvelope>(request).await
    }

    pub async fn hgetall_as<M: ResponseMode>(
        &self,
        request: &HGetAllRequest,
    ) -> Result<M::Output<HashValues>, SdkError> {
        require_non_empty("hkey", &request.hkey)?;
        let query = Query::new().push("hkey", &request.hkey);
        let resp = self.http().get("/hgetall", &query).await?;
        let envelope =
            parse_envelope::<Option<HashValues>>(&resp)?.map(Option::unwrap_or_default);
        Ok(M::select(envelope))
    }
}
