//! reqwest-backed client for the B2SHARE v2 deposit API.

use std::path::Path;
use std::time::Duration;

use async_trait::async_trait;
use bytes::Bytes;
use reqwest::{header, Client, Response};
use serde_json::Value;
use tracing::{debug, instrument};

use eiscat_metadata::{MetadataRecord, ParameterPatch};

use crate::api::{DepositRepository, DraftHandle, FilesHandle};
use crate::error::ClientError;

/// Configuration for the B2SHARE client.
#[derive(Debug, Clone)]
pub struct B2ShareConfig {
    /// Base URL of the repository, e.g. `https://b2share.eudat.eu`.
    pub base_url: String,
    /// API access token.
    pub access_token: String,
    /// Per-request timeout; every repository call either returns or fails
    /// within this bound.
    pub request_timeout: Duration,
}

/// HTTP client for the B2SHARE deposit API.
pub struct B2ShareClient {
    http: Client,
    config: B2ShareConfig,
}

impl B2ShareClient {
    /// Create a client with bounded timeouts.
    pub fn new(config: B2ShareConfig) -> Result<Self, ClientError> {
        let http = Client::builder()
            .timeout(config.request_timeout)
            .connect_timeout(Duration::from_secs(30))
            .build()?;
        Ok(Self { http, config })
    }

    fn records_url(&self) -> String {
        format!("{}/api/records/", self.config.base_url.trim_end_matches('/'))
    }

    fn draft_url(&self, draft_id: &str) -> String {
        format!(
            "{}/api/records/{}/draft",
            self.config.base_url.trim_end_matches('/'),
            draft_id
        )
    }

    fn token_query(&self) -> [(&'static str, &str); 1] {
        [("access_token", self.config.access_token.as_str())]
    }
}

/// Surface client-error statuses as schema rejections with the response
/// body, and other failures as transport errors.
async fn check_status(response: Response) -> Result<Response, ClientError> {
    if response.status().is_client_error() {
        let status = response.status().as_u16();
        let message = response.text().await.unwrap_or_default();
        return Err(ClientError::SchemaRejection { status, message });
    }
    Ok(response.error_for_status()?)
}

/// Extract the draft id and file bucket from a create-draft response body.
fn parse_draft_response(body: &Value) -> Result<DraftHandle, ClientError> {
    let id = body
        .get("id")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::MalformedResponse("missing draft id".to_string()))?;
    let bucket_url = body
        .pointer("/links/files")
        .and_then(Value::as_str)
        .ok_or_else(|| ClientError::MalformedResponse("missing files link".to_string()))?;
    Ok(DraftHandle {
        id: id.to_string(),
        files: FilesHandle {
            bucket_url: bucket_url.to_string(),
        },
    })
}

#[async_trait]
impl DepositRepository for B2ShareClient {
    #[instrument(skip(self, record))]
    async fn create_draft(&self, record: &MetadataRecord) -> Result<DraftHandle, ClientError> {
        let response = self
            .http
            .post(self.records_url())
            .query(&self.token_query())
            .json(record)
            .send()
            .await?;
        let response = check_status(response).await?;
        let body: Value = response.json().await?;
        let draft = parse_draft_response(&body)?;
        debug!(draft_id = %draft.id, "Created draft record");
        Ok(draft)
    }

    #[instrument(skip(self, patch))]
    async fn update_draft(
        &self,
        draft_id: &str,
        patch: &ParameterPatch,
    ) -> Result<(), ClientError> {
        let response = self
            .http
            .patch(self.draft_url(draft_id))
            .query(&self.token_query())
            .json(patch)
            .header(header::CONTENT_TYPE, "application/json-patch+json")
            .send()
            .await?;
        check_status(response).await?;
        debug!(draft_id = %draft_id, "Applied parameter patch");
        Ok(())
    }

    #[instrument(skip(self))]
    async fn upload_file(&self, files: &FilesHandle, local_path: &Path) -> Result<(), ClientError> {
        let file_name = local_path
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::InvalidUploadPath(local_path.to_path_buf()))?;

        let data = Bytes::from(tokio::fs::read(local_path).await?);
        let size = data.len();

        let url = format!("{}/{}", files.bucket_url.trim_end_matches('/'), file_name);
        let response = self
            .http
            .put(&url)
            .query(&self.token_query())
            .body(data)
            .send()
            .await?;
        check_status(response).await?;
        debug!(url = %url, bytes = size, "Uploaded data file");
        Ok(())
    }
}
