//! REST client for the host content-management system.
//!
//! Data and Template CRUD plus the advisory lock API. The host enforces its
//! own permissions; the acting user travels in the `X-Acting-User` header
//! and denials come back as 403, which surfaces as `Forbidden` here.

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::foundation::{DataId, DomainError, ErrorCode, TemplateId, UserId};
use crate::ports::{DataRecord, DataStore, LockService, Template, TemplateStore};

const ACTING_USER_HEADER: &str = "X-Acting-User";

/// Client for the host CMS REST API.
pub struct CoreCmsClient {
    http: reqwest::Client,
    base_url: String,
}

impl CoreCmsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }
}

#[derive(Deserialize)]
struct UpsertDataResponse {
    id: DataId,
}

#[async_trait]
impl DataStore for CoreCmsClient {
    async fn get(&self, data_id: &DataId, user_id: &UserId) -> Result<DataRecord, DomainError> {
        let response = self
            .http
            .get(self.url(&format!("/data/{}", data_id)))
            .header(ACTING_USER_HEADER, user_id.as_str())
            .send()
            .await
            .map_err(service_unreachable)?;
        decode_response(response, ErrorCode::DataNotFound).await
    }

    async fn upsert(&self, record: DataRecord, user_id: &UserId) -> Result<DataId, DomainError> {
        let response = self
            .http
            .post(self.url("/data"))
            .header(ACTING_USER_HEADER, user_id.as_str())
            .json(&record)
            .send()
            .await
            .map_err(service_unreachable)?;
        let body: UpsertDataResponse = decode_response(response, ErrorCode::DataNotFound).await?;
        Ok(body.id)
    }
}

#[async_trait]
impl TemplateStore for CoreCmsClient {
    async fn get(&self, template_id: &TemplateId) -> Result<Template, DomainError> {
        let response = self
            .http
            .get(self.url(&format!("/templates/{}", template_id)))
            .send()
            .await
            .map_err(service_unreachable)?;
        decode_response(response, ErrorCode::TemplateNotFound).await
    }
}

#[async_trait]
impl LockService for CoreCmsClient {
    async fn lock(&self, data_id: &DataId, user_id: &UserId) -> Result<(), DomainError> {
        let response = self
            .http
            .post(self.url(&format!("/locks/{}", data_id)))
            .header(ACTING_USER_HEADER, user_id.as_str())
            .send()
            .await
            .map_err(service_unreachable)?;
        check_status(response, ErrorCode::DataNotFound).await.map(|_| ())
    }

    async fn unlock(&self, data_id: &DataId, user_id: &UserId) -> Result<(), DomainError> {
        let response = self
            .http
            .delete(self.url(&format!("/locks/{}", data_id)))
            .header(ACTING_USER_HEADER, user_id.as_str())
            .send()
            .await
            .map_err(service_unreachable)?;
        check_status(response, ErrorCode::DataNotFound).await.map(|_| ())
    }
}

fn service_unreachable(e: reqwest::Error) -> DomainError {
    DomainError::new(
        ErrorCode::ServiceError,
        format!("The host system is unreachable: {}", e),
    )
}

/// Map a host system status to an error code; `not_found` names the record
/// kind the caller was after.
fn status_error(status: reqwest::StatusCode, not_found: ErrorCode, body: String) -> DomainError {
    let code = match status.as_u16() {
        403 => ErrorCode::Forbidden,
        404 => not_found,
        409 | 423 => ErrorCode::Locked,
        _ => ErrorCode::ServiceError,
    };
    DomainError::new(code, body)
}

async fn check_status(
    response: reqwest::Response,
    not_found: ErrorCode,
) -> Result<reqwest::Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, not_found, body))
}

async fn decode_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
    not_found: ErrorCode,
) -> Result<T, DomainError> {
    check_status(response, not_found)
        .await?
        .json::<T>()
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::ServiceError,
                format!("Malformed host system response: {}", e),
            )
        })
}
