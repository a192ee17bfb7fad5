//! REST client for the schema parser service.
//!
//! The parser service owns form generation, the element tree store, the
//! renderers, and schema validation. One client implements all three ports
//! backed by it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::ParserConfig;
use crate::domain::foundation::{DomainError, ElementId, ErrorCode};
use crate::ports::{FormRenderer, RemoveOutcome, SchemaParser, SchemaValidator};

/// Client for the parser service REST API.
pub struct ParserServiceClient {
    http: reqwest::Client,
    base_url: String,
    config: ParserConfig,
}

impl ParserServiceClient {
    /// Creates a client against the given base URL, with the parser behavior
    /// flags sent along with every generation request.
    pub fn new(base_url: impl Into<String>, config: ParserConfig) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into(),
            config,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    async fn post_json<B: Serialize, T: for<'de> Deserialize<'de>>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, DomainError> {
        let response = self
            .http
            .post(self.url(path))
            .json(body)
            .send()
            .await
            .map_err(|e| service_unreachable("parser", e))?;
        decode_response(response).await
    }
}

#[derive(Serialize)]
struct GenerateFormRequest<'a> {
    schema: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    document: Option<&'a str>,
    #[serde(flatten)]
    options: ParserConfig,
}

#[derive(Deserialize)]
struct GenerateFormResponse {
    root: ElementId,
}

#[derive(Serialize)]
struct SchemaRequest<'a> {
    schema: &'a str,
}

#[derive(Deserialize)]
struct HtmlResponse {
    html: String,
}

#[derive(Serialize)]
struct RenderRequest<'a> {
    root: &'a ElementId,
}

#[derive(Deserialize)]
struct DocumentResponse {
    document: String,
}

#[derive(Serialize)]
struct ValidateRequest<'a> {
    schema: &'a str,
    document: &'a str,
}

#[derive(Deserialize)]
struct ValidateResponse {
    #[serde(default)]
    errors: Vec<String>,
}

#[derive(Serialize)]
struct WellFormedRequest<'a> {
    document: &'a str,
}

#[derive(Deserialize)]
struct WellFormedResponse {
    well_formed: bool,
}

#[async_trait]
impl SchemaParser for ParserServiceClient {
    async fn generate_form(
        &self,
        schema: &str,
        document: Option<&str>,
    ) -> Result<ElementId, DomainError> {
        let response: GenerateFormResponse = self
            .post_json(
                "/forms/generate",
                &GenerateFormRequest {
                    schema,
                    document,
                    options: self.config.clone(),
                },
            )
            .await?;
        Ok(response.root)
    }

    async fn generate_choice_absent(
        &self,
        element_id: &ElementId,
        schema: &str,
    ) -> Result<String, DomainError> {
        let response: HtmlResponse = self
            .post_json(
                &format!("/elements/{}/choice", element_id),
                &SchemaRequest { schema },
            )
            .await?;
        Ok(response.html)
    }

    async fn generate_element_absent(
        &self,
        element_id: &ElementId,
        schema: &str,
    ) -> Result<String, DomainError> {
        let response: HtmlResponse = self
            .post_json(
                &format!("/elements/{}/generate", element_id),
                &SchemaRequest { schema },
            )
            .await?;
        Ok(response.html)
    }

    async fn remove_element(&self, element_id: &ElementId) -> Result<RemoveOutcome, DomainError> {
        let response = self
            .http
            .post(self.url(&format!("/elements/{}/remove", element_id)))
            .send()
            .await
            .map_err(|e| service_unreachable("parser", e))?;
        decode_response(response).await
    }

    async fn delete_branch(&self, root: &ElementId) -> Result<(), DomainError> {
        let response = self
            .http
            .delete(self.url(&format!("/branches/{}", root)))
            .send()
            .await
            .map_err(|e| service_unreachable("parser", e))?;
        check_status(response).await.map(|_| ())
    }
}

#[async_trait]
impl FormRenderer for ParserServiceClient {
    async fn render_form(&self, root: &ElementId) -> Result<String, DomainError> {
        let response: HtmlResponse = self.post_json("/render/form", &RenderRequest { root }).await?;
        Ok(response.html)
    }

    async fn render_document(&self, root: &ElementId) -> Result<String, DomainError> {
        let response: DocumentResponse = self
            .post_json("/render/document", &RenderRequest { root })
            .await?;
        Ok(response.document)
    }
}

#[async_trait]
impl SchemaValidator for ParserServiceClient {
    async fn validate(&self, schema: &str, document: &str) -> Result<Vec<String>, DomainError> {
        let response: ValidateResponse = self
            .post_json("/validate", &ValidateRequest { schema, document })
            .await?;
        Ok(response.errors)
    }

    async fn is_well_formed(&self, document: &str) -> Result<bool, DomainError> {
        let response: WellFormedResponse = self
            .post_json("/well-formed", &WellFormedRequest { document })
            .await?;
        Ok(response.well_formed)
    }
}

fn service_unreachable(service: &str, e: reqwest::Error) -> DomainError {
    DomainError::new(
        ErrorCode::ServiceError,
        format!("The {} service is unreachable: {}", service, e),
    )
}

/// Map a parser service status to an error code.
fn status_error(status: reqwest::StatusCode, body: String) -> DomainError {
    let code = match status.as_u16() {
        404 => ErrorCode::ElementNotFound,
        422 => ErrorCode::ParserError,
        _ => ErrorCode::ServiceError,
    };
    DomainError::new(code, body)
}

async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, DomainError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response.text().await.unwrap_or_default();
    Err(status_error(status, body))
}

async fn decode_response<T: for<'de> Deserialize<'de>>(
    response: reqwest::Response,
) -> Result<T, DomainError> {
    check_status(response)
        .await?
        .json::<T>()
        .await
        .map_err(|e| {
            DomainError::new(
                ErrorCode::ServiceError,
                format!("Malformed parser service response: {}", e),
            )
        })
}
