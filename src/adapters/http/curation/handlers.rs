//! HTTP handlers for curation workflow endpoints.
//!
//! Every endpoint requires the `curate_access` permission, mirroring the
//! gate on the draft workflow surface; ownership is enforced deeper down by
//! the application handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{draft_error_response, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::access;
use crate::application::handlers::curation::{
    Attachment, CancelChangesHandler, ClearFieldsHandler, DiscardFormHandler, DownloadHandler,
    GenerateAbsentHandler, LoadFormHandler, PublishDataHandler, SaveFormHandler,
    StartCurationHandler, ValidateFormHandler,
};
use crate::domain::foundation::{DraftId, RequestUser, CURATE_ACCESS};

use super::dto::{ElementRequest, LoadFormRequest, LoadedFormResponse, StartCurationRequest};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct CurationHandlers {
    pub start: Arc<StartCurationHandler>,
    pub load: Arc<LoadFormHandler>,
    pub clear_fields: Arc<ClearFieldsHandler>,
    pub cancel_changes: Arc<CancelChangesHandler>,
    pub discard: Arc<DiscardFormHandler>,
    pub save_form: Arc<SaveFormHandler>,
    pub validate: Arc<ValidateFormHandler>,
    pub publish: Arc<PublishDataHandler>,
    pub elements: Arc<GenerateAbsentHandler>,
    pub download: Arc<DownloadHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /curate/start - Start a curation session
pub async fn start_curation(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Json(req): Json<StartCurationRequest>,
) -> Response {
    let actor = auth.actor();
    if let Err(denied) = access::check_permission(&actor, CURATE_ACCESS) {
        return draft_error_response(denied.into());
    }

    match handlers
        .start
        .handle(&req.template, req.mode.into(), &actor)
        .await
    {
        Ok(draft) => (
            StatusCode::CREATED,
            Json(serde_json::json!({ "draft_id": draft.id().to_string() })),
        )
            .into_response(),
        Err(e) => draft_error_response(e),
    }
}

/// POST /curate/:id/load - Enter a draft and render its form
pub async fn load_form(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
    Json(req): Json<LoadFormRequest>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers
            .load
            .handle(&draft_id, &actor, req.reload_unsaved)
            .await
        {
            Ok(form) => {
                (StatusCode::OK, Json(LoadedFormResponse::from(form))).into_response()
            }
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/clear-fields - Reset the form to a blank tree
pub async fn clear_fields(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.clear_fields.handle(&draft_id, &actor).await {
            Ok(form) => (StatusCode::OK, Json(serde_json::json!({ "form": form }))).into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/cancel-changes - Revert to the last saved state
pub async fn cancel_changes(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.cancel_changes.handle(&draft_id, &actor).await {
            Ok(form) => (StatusCode::OK, Json(serde_json::json!({ "form": form }))).into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/discard - Abandon the session and delete the draft
pub async fn discard_form(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.discard.handle(&draft_id, &actor).await {
            Ok(()) => (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Form deleted with success." })),
            )
                .into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/save-form - Checkpoint the current form
pub async fn save_form(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.save_form.handle(&draft_id, &actor).await {
            Ok(_) => (
                StatusCode::OK,
                Json(serde_json::json!({ "message": "Form saved with success." })),
            )
                .into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/validate - Validate the document against its schema
pub async fn validate_form(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.validate.handle(&draft_id, &actor).await {
            Ok(errors) => {
                (StatusCode::OK, Json(serde_json::json!({ "errors": errors }))).into_response()
            }
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/publish - Promote the draft to a Data record
pub async fn publish_data(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.publish.handle(&draft_id, &actor).await {
            Ok(data_id) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "data_id": data_id.to_string(),
                    "message": "Data saved with success."
                })),
            )
                .into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/elements/generate-choice - Expand an absent choice
pub async fn generate_choice(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
    Json(req): Json<ElementRequest>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers
            .elements
            .generate_choice(&draft_id, &req.id, &actor)
            .await
        {
            Ok(form) => (StatusCode::OK, Json(serde_json::json!({ "form": form }))).into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/elements/generate - Expand an absent element
pub async fn generate_element(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
    Json(req): Json<ElementRequest>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers
            .elements
            .generate_element(&draft_id, &req.id, &actor)
            .await
        {
            Ok(form) => (StatusCode::OK, Json(serde_json::json!({ "form": form }))).into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// POST /curate/:id/elements/remove - Remove a repeated element
pub async fn remove_element(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
    Json(req): Json<ElementRequest>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers
            .elements
            .remove_element(&draft_id, &req.id, &actor)
            .await
        {
            Ok(outcome) => (StatusCode::OK, Json(outcome)).into_response(),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// GET /curate/:id/download/document - Download the current document
pub async fn download_document(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.download.document(&draft_id, &actor).await {
            Ok(attachment) => attachment_response(attachment),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

/// GET /curate/:id/download/template - Download the template schema
pub async fn download_template(
    State(handlers): State<CurationHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    with_draft(&auth, &draft_id, |actor, draft_id| async move {
        match handlers.download.template(&draft_id, &actor).await {
            Ok(attachment) => attachment_response(attachment),
            Err(e) => draft_error_response(e),
        }
    })
    .await
}

// ════════════════════════════════════════════════════════════════════════════
// Helpers
// ════════════════════════════════════════════════════════════════════════════

/// Permission gate + draft id parsing shared by every workflow endpoint.
async fn with_draft<F, Fut>(auth: &RequireAuth, raw_id: &str, run: F) -> Response
where
    F: FnOnce(RequestUser, DraftId) -> Fut,
    Fut: std::future::Future<Output = Response>,
{
    let actor = auth.actor();
    if let Err(denied) = access::check_permission(&actor, CURATE_ACCESS) {
        return draft_error_response(denied.into());
    }

    match raw_id.parse::<DraftId>() {
        Ok(draft_id) => run(actor, draft_id).await,
        Err(_) => (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid draft ID")),
        )
            .into_response(),
    }
}

fn attachment_response(attachment: Attachment) -> Response {
    (
        StatusCode::OK,
        [
            (header::CONTENT_TYPE, attachment.content_type),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", attachment.filename),
            ),
        ],
        attachment.content,
    )
        .into_response()
}
