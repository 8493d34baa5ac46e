//! R1fs sub-client: uploads, downloads, structured data, deletion.
//!
//! Same three-form layout as the cstore sub-client: `op`, `op_full`,
//! `op_as::<M>`.

use crate::client::EdgeClient;
use crate::domain::r1fs::{
    has_data, Base64File, CalculateCidRequest, CidResult, DeleteFileRequest, DeleteFilesRequest,
    DeleteResult, DownloadFileRequest, FileMetadata, R1fsStatus, RetrieveYamlRequest,
    StoreDataRequest, UploadBase64Request, UploadResult, YamlData,
};
use crate::envelope::{
    resolve, resolve_content, Content, Envelope, FullEnvelope, ResponseMode, ResultOnly,
};
use crate::error::SdkError;
use crate::http::{Query, ServiceHttp};
use crate::shared::require_non_empty;
use crate::upload::{build_upload_request, UploadFileRequest};

/// Sub-client for the r1fs file store.
pub struct R1fs<'a> {
    pub(crate) client: &'a EdgeClient,
}

impl<'a> R1fs<'a> {
    fn http(&self) -> &ServiceHttp {
        &self.client.r1fs_http
    }

    // ── get_status ───────────────────────────────────────────────────────

    pub async fn get_status(&self) -> Result<R1fsStatus, SdkError> {
        self.get_status_as::<ResultOnly>().await
    }

    pub async fn get_status_full(&self) -> Result<Envelope<R1fsStatus>, SdkError> {
        self.get_status_as::<FullEnvelope>().await
    }

    pub async fn get_status_as<M: ResponseMode>(&self) -> Result<M::Output<R1fsStatus>, SdkError> {
        let resp = self.http().get("/get_status", &Query::new()).await?;
        Ok(resolve::<R1fsStatus, M>(&resp)?)
    }

    // ── add_file ─────────────────────────────────────────────────────────

    /// Multipart upload. The request must carry a file, a pre-built form, or both.
    pub async fn add_file(&self, request: UploadFileRequest) -> Result<UploadResult, SdkError> {
        self.add_file_as::<ResultOnly>(request).await
    }

    pub async fn add_file_full(
        &self,
        request: UploadFileRequest,
    ) -> Result<Envelope<UploadResult>, SdkError> {
        self.add_file_as::<FullEnvelope>(request).await
    }

    pub async fn add_file_as<M: ResponseMode>(
        &self,
        request: UploadFileRequest,
    ) -> Result<M::Output<UploadResult>, SdkError> {
        if request.form.is_none() && request.file.is_none() {
            return Err(SdkError::required("file or form"));
        }
        let upload = build_upload_request(request, self.client.multipart_kind)?;
        let resp = self.http().post_multipart("/add_file", upload).await?;
        Ok(resolve::<UploadResult, M>(&resp)?)
    }

    // ── add_file_base64 ──────────────────────────────────────────────────

    pub async fn add_file_base64(
        &self,
        request: &UploadBase64Request,
    ) -> Result<UploadResult, SdkError> {
        self.add_file_base64_as::<ResultOnly>(request).await
    }

    pub async fn add_file_base64_full(
        &self,
        request: &UploadBase64Request,
    ) -> Result<Envelope<UploadResult>, SdkError> {
        self.add_file_base64_as::<FullEnvelope>(request).await
    }

    pub async fn add_file_base64_as<M: ResponseMode>(
        &self,
        request: &UploadBase64Request,
    ) -> Result<M::Output<UploadResult>, SdkError> {
        require_non_empty("file_base64_str", &request.file_base64_str)?;
        let resp = self.http().post_json("/add_file_base64", request).await?;
        Ok(resolve::<UploadResult, M>(&resp)?)
    }

    // ── get_file ─────────────────────────────────────────────────────────

    /// Either JSON file metadata or the raw file bytes, depending on what the
    /// node answers with.
    pub async fn get_file(
        &self,
        request: &DownloadFileRequest,
    ) -> Result<Content<FileMetadata>, SdkError> {
        self.get_file_as::<ResultOnly>(request).await
    }

    pub async fn get_file_full(
        &self,
        request: &DownloadFileRequest,
    ) -> Result<Envelope<Content<FileMetadata>>, SdkError> {
        self.get_file_as::<FullEnvelope>(request).await
    }

    pub async fn get_file_as<M: ResponseMode>(
        &self,
        request: &DownloadFileRequest,
    ) -> Result<M::Output<Content<FileMetadata>>, SdkError> {
        require_non_empty("cid", &request.cid)?;
        let query = Query::new()
            .push("cid", &request.cid)
            .push_non_empty("secret", request.secret.as_deref());
        let resp = self.http().get("/get_file", &query).await?;
        Ok(resolve_content::<FileMetadata, M>(resp)?)
    }

    // ── get_file_base64 ──────────────────────────────────────────────────

    pub async fn get_file_base64(
        &self,
        request: &DownloadFileRequest,
    ) -> Result<Base64File, SdkError> {
        self.get_file_base64_as::<ResultOnly>(request).await
    }

    pub async fn get_file_base64_full(
        &self,
        request: &DownloadFileRequest,
    ) -> Result<Envelope<Base64File>, SdkError> {
        self.get_file_base64_as::<FullEnvelope>(request).await
    }

    pub async fn get_file_base64_as<M: ResponseMode>(
        &self,
        request: &DownloadFileRequest,
    ) -> Result<M::Output<Base64File>, SdkError> {
        require_non_empty("cid", &request.cid)?;
        let resp = self.http().post_json("/get_file_base64", request).await?;
        Ok(resolve::<Base64File, M>(&resp)?)
    }

    // ── add_yaml / add_json / add_pickle ─────────────────────────────────

    pub async fn add_yaml(&self, request: &StoreDataRequest) -> Result<CidResult, SdkError> {
        self.add_yaml_as::<ResultOnly>(request).await
    }

    pub async fn add_yaml_full(
        &self,
        request: &StoreDataRequest,
    ) -> Result<Envelope<CidResult>, SdkError> {
        self.add_yaml_as::<FullEnvelope>(request).await
    }

    pub async fn add_yaml_as<M: ResponseMode>(
        &self,
        request: &StoreDataRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        self.store_data::<M>("/add_yaml", request).await
    }

    pub async fn add_json(&self, request: &StoreDataRequest) -> Result<CidResult, SdkError> {
        self.add_json_as::<ResultOnly>(request).await
    }

    pub async fn add_json_full(
        &self,
        request: &StoreDataRequest,
    ) -> Result<Envelope<CidResult>, SdkError> {
        self.add_json_as::<FullEnvelope>(request).await
    }

    pub async fn add_json_as<M: ResponseMode>(
        &self,
        request: &StoreDataRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        self.store_data::<M>("/add_json", request).await
    }

    pub async fn add_pickle(&self, request: &StoreDataRequest) -> Result<CidResult, SdkError> {
        self.add_pickle_as::<ResultOnly>(request).await
    }

    pub async fn add_pickle_full(
        &self,
        request: &StoreDataRequest,
    ) -> Result<Envelope<CidResult>, SdkError> {
        self.add_pickle_as::<FullEnvelope>(request).await
    }

    pub async fn add_pickle_as<M: ResponseMode>(
        &self,
        request: &StoreDataRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        self.store_data::<M>("/add_pickle", request).await
    }

    async fn store_data<M: ResponseMode>(
        &self,
        path: &str,
        request: &StoreDataRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        if !has_data(&request.data) {
            return Err(SdkError::required("data"));
        }
        let resp = self.http().post_json(path, request).await?;
        Ok(resolve::<CidResult, M>(&resp)?)
    }

    // ── get_yaml ─────────────────────────────────────────────────────────

    pub async fn get_yaml(&self, request: &RetrieveYamlRequest) -> Result<YamlData, SdkError> {
        self.get_yaml_as::<ResultOnly>(request).await
    }

    pub async fn get_yaml_full(
        &self,
        request: &RetrieveYamlRequest,
    ) -> Result<Envelope<YamlData>, SdkError> {
        self.get_yaml_as::<FullEnvelope>(request).await
    }

    pub async fn get_yaml_as<M: ResponseMode>(
        &self,
        request: &RetrieveYamlRequest,
    ) -> Result<M::Output<YamlData>, SdkError> {
        require_non_empty("cid", &request.cid)?;
        let query = Query::new()
            .push("cid", &request.cid)
            .push_non_empty("secret", request.secret.as_deref());
        let resp = self.http().get("/get_yaml", &query).await?;
        Ok(resolve::<YamlData, M>(&resp)?)
    }

    // ── calculate_json_cid / calculate_pickle_cid ────────────────────────

    /// CID the data would get, without storing it.
    pub async fn calculate_json_cid(
        &self,
        request: &CalculateCidRequest,
    ) -> Result<CidResult, SdkError> {
        self.calculate_json_cid_as::<ResultOnly>(request).await
    }

    pub async fn calculate_json_cid_full(
        &self,
        request: &CalculateCidRequest,
    ) -> Result<Envelope<CidResult>, SdkError> {
        self.calculate_json_cid_as::<FullEnvelope>(request).await
    }

    pub async fn calculate_json_cid_as<M: ResponseMode>(
        &self,
        request: &CalculateCidRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        self.calculate_cid::<M>("/calculate_json_cid", request).await
    }

    pub async fn calculate_pickle_cid(
        &self,
        request: &CalculateCidRequest,
    ) -> Result<CidResult, SdkError> {
        self.calculate_pickle_cid_as::<ResultOnly>(request).await
    }

    pub async fn calculate_pickle_cid_full(
        &self,
        request: &CalculateCidRequest,
    ) -> Result<Envelope<CidResult>, SdkError> {
        self.calculate_pickle_cid_as::<FullEnvelope>(request).await
    }

    pub async fn calculate_pickle_cid_as<M: ResponseMode>(
        &self,
        request: &CalculateCidRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        self.calculate_cid::<M>("/calculate_pickle_cid", request).await
    }

    async fn calculate_cid<M: ResponseMode>(
        &self,
        path: &str,
        request: &CalculateCidRequest,
    ) -> Result<M::Output<CidResult>, SdkError> {
        if !has_data(&request.data) {
            return Err(SdkError::required("data"));
        }
        if request.nonce.is_none() {
            return Err(SdkError::required("nonce"));
        }
        let resp = self.http().post_json(path, request).await?;
        Ok(resolve::<CidResult, M>(&resp)?)
    }

    // ── delete_file / delete_files ───────────────────────────────────────

    pub async fn delete_file(&self, request: &DeleteFileRequest) -> Result<DeleteResult, SdkError> {
        self.delete_file_as::<ResultOnly>(request).await
    }

    pub async fn delete_file_full(
        &self,
        request: &DeleteFileRequest,
    ) -> Result<Envelope<DeleteResult>, SdkError> {
        self.delete_file_as::<FullEnvelope>(request).await
    }

    pub async fn delete_file_as<M: ResponseMode>(
        &self,
        request: &DeleteFileRequest,
    ) -> Result<M::Output<DeleteResult>, SdkError> {
        require_non_empty("cid", &request.cid)?;
        let resp = self.http().post_json("/delete_file", request).await?;
        Ok(resolve::<DeleteResult, M>(&resp)?)
    }

    pub async fn delete_files(
        &self,
        request: &DeleteFilesRequest,
    ) -> Result<DeleteResult, SdkError> {
        self.delete_files_as::<ResultOnly>(request).await
    }

    pub async fn delete_files_full(
        &self,
        request: &DeleteFilesRequest,
    ) -> Result<Envelope<DeleteResult>, SdkError> {
        self.delete_files_as::<FullEnvelope>(request).await
    }

    pub async fn delete_files_as<M: ResponseMode>(
        &self,
        request: &DeleteFilesRequest,
    ) -> Result<M::Output<DeleteResult>, SdkError> {
        if request.cids.is_empty() {
            return Err(SdkError::required("cids"));
        }
        if request.cids.iter().any(String::is_empty) {
            return Err(SdkError::Validation(
                "cids must not contain empty values".to_string(),
            ));
        }
        let resp = self.http().post_json("/delete_files", request).await?;
        Ok(resolve::<DeleteResult, M>(&resp)?)
    }
}
