//! Typed HTTP client for the codetrack API.
//!
//! One method per endpoint. Server errors are mapped to [`ApiError`]:
//! 404 becomes [`ApiError::NotFound`], other non-success statuses carry
//! the server's message. The client sends fields exactly as typed; all
//! normalization happens server-side.

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use codetrack_core::record::RecordStatus;
use codetrack_core::types::{DbId, Timestamp};

use crate::form::FormFields;

/// A record as returned by the API.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordView {
    pub id: DbId,
    pub code: String,
    pub person_name: String,
    pub link: Option<String>,
    pub description: Option<String>,
    pub status: RecordStatus,
    pub created_at: Timestamp,
    pub updated_at: Timestamp,
}

/// Client-side error taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// The server answered 404 for the requested record.
    #[error("Record not found")]
    NotFound,

    /// The server rejected the request; carries the server's message.
    #[error("{0}")]
    Rejected(String),

    /// Transport-level failure.
    #[error(transparent)]
    Http(#[from] reqwest::Error),
}

/// The `{ "data": ... }` envelope every success response uses.
#[derive(Debug, Deserialize)]
struct Envelope<T> {
    data: T,
}

/// The `{ "error": ..., "code": ... }` body error responses use.
#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: String,
}

/// Record payload for create requests.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct CreatePayload<'a> {
    code: &'a str,
    person_name: &'a str,
    link: &'a str,
    description: &'a str,
    status: RecordStatus,
}

/// Record payload for update requests (code travels in the path).
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct UpdatePayload<'a> {
    person_name: &'a str,
    link: &'a str,
    description: &'a str,
    status: RecordStatus,
}

/// HTTP client bound to one API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self {
            http: reqwest::Client::new(),
            base_url,
        }
    }

    /// GET /api/v1/records/{code}
    pub async fn fetch_record(&self, code: &str) -> Result<RecordView, ApiError> {
        let url = format!("{}/api/v1/records/{code}", self.base_url);
        handle(self.http.get(url).send().await?).await
    }

    /// GET /api/v1/search/name/{name}
    pub async fn search_by_name(&self, name: &str) -> Result<Vec<RecordView>, ApiError> {
        let url = format!("{}/api/v1/search/name/{name}", self.base_url);
        handle(self.http.get(url).send().await?).await
    }

    /// GET /api/v1/search/code/{code}
    pub async fn search_by_code(&self, code: &str) -> Result<Vec<RecordView>, ApiError> {
        let url = format!("{}/api/v1/search/code/{code}", self.base_url);
        handle(self.http.get(url).send().await?).await
    }

    /// POST /api/v1/records
    pub async fn create_record(&self, fields: &FormFields) -> Result<RecordView, ApiError> {
        let url = format!("{}/api/v1/records", self.base_url);
        let payload = CreatePayload {
            code: &fields.code,
            person_name: &fields.person_name,
            link: &fields.link,
            description: &fields.description,
            status: fields.status,
        };
        handle(self.http.post(url).json(&payload).send().await?).await
    }

    /// PUT /api/v1/records/{code}
    pub async fn update_record(
        &self,
        code: &str,
        fields: &FormFields,
    ) -> Result<RecordView, ApiError> {
        let url = format!("{}/api/v1/records/{code}", self.base_url);
        let payload = UpdatePayload {
            person_name: &fields.person_name,
            link: &fields.link,
            description: &fields.description,
            status: fields.status,
        };
        handle(self.http.put(url).json(&payload).send().await?).await
    }

    /// DELETE /api/v1/records/{code}
    pub async fn delete_record(&self, code: &str) -> Result<(), ApiError> {
        let url = format!("{}/api/v1/records/{code}", self.base_url);
        let response = self.http.delete(url).send().await?;
        let status = response.status();
        if status.is_success() {
            Ok(())
        } else if status == reqwest::StatusCode::NOT_FOUND {
            Err(ApiError::NotFound)
        } else {
            Err(rejection(response).await)
        }
    }
}

/// Unwrap a success envelope or map the error body.
async fn handle<T: DeserializeOwned>(response: reqwest::Response) -> Result<T, ApiError> {
    let status = response.status();
    if status.is_success() {
        Ok(response.json::<Envelope<T>>().await?.data)
    } else if status == reqwest::StatusCode::NOT_FOUND {
        Err(ApiError::NotFound)
    } else {
        Err(rejection(response).await)
    }
}

/// Extract the server's error message, falling back to the bare status.
async fn rejection(response: reqwest::Response) -> ApiError {
    let status = response.status();
    match response.json::<ErrorBody>().await {
        Ok(body) => ApiError::Rejected(body.error),
        Err(_) => ApiError::Rejected(format!("HTTP {status}")),
    }
}
