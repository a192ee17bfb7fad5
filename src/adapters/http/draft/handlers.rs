//! HTTP handlers for draft endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::{draft_error_response, ErrorResponse};
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::draft::{
    AdminListDraftsHandler, AdminListDraftsQuery, ChangeOwnerHandler, CreateDraftHandler,
    DeleteDraftHandler, GetDraftHandler, ListDraftsHandler, ListDraftsQuery, PurgeDraftsHandler,
    UpdateDraftHandler,
};
use crate::domain::foundation::{DataId, DraftId, UserId};

use super::dto::{
    ChangeOwnerRequest, CreateDraftRequest, DraftResponse, ListDraftsParams, UpdateDraftRequest,
};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct DraftHandlers {
    pub get: Arc<GetDraftHandler>,
    pub create: Arc<CreateDraftHandler>,
    pub update: Arc<UpdateDraftHandler>,
    pub delete: Arc<DeleteDraftHandler>,
    pub change_owner: Arc<ChangeOwnerHandler>,
    pub list: Arc<ListDraftsHandler>,
    pub admin_list: Arc<AdminListDraftsHandler>,
    pub purge: Arc<PurgeDraftsHandler>,
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// GET /rest/drafts - List the acting user's drafts
pub async fn list_drafts(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Query(params): Query<ListDraftsParams>,
) -> Response {
    let query = ListDraftsQuery {
        template_id: params.template,
        no_data: params.no_data,
    };

    match handlers.list.handle(query, &auth.actor()).await {
        Ok(drafts) => {
            let body: Vec<DraftResponse> = drafts.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => draft_error_response(e),
    }
}

/// POST /rest/drafts - Create a draft owned by the acting user
pub async fn create_draft(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Json(mut req): Json<CreateDraftRequest>,
) -> Response {
    // The non-admin route never honors an explicit owner.
    req.user = None;
    create_draft_inner(handlers, auth, req).await
}

/// POST /rest/admin/drafts - Create a draft for any user
pub async fn admin_create_draft(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Json(req): Json<CreateDraftRequest>,
) -> Response {
    create_draft_inner(handlers, auth, req).await
}

async fn create_draft_inner(
    handlers: DraftHandlers,
    auth: RequireAuth,
    req: CreateDraftRequest,
) -> Response {
    let cmd = match req.into_command() {
        Ok(cmd) => cmd,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers.create.handle(cmd, &auth.actor()).await {
        Ok(draft) => (StatusCode::CREATED, Json(DraftResponse::from(draft))).into_response(),
        Err(e) => draft_error_response(e),
    }
}

/// GET /rest/drafts/:id - Retrieve a draft
pub async fn get_draft(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    let draft_id = match parse_draft_id(&draft_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.get.handle(&draft_id, &auth.actor()).await {
        Ok(draft) => (StatusCode::OK, Json(DraftResponse::from(draft))).into_response(),
        Err(e) => draft_error_response(e),
    }
}

/// PATCH /rest/drafts/:id - Update a draft
pub async fn update_draft(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
    Json(req): Json<UpdateDraftRequest>,
) -> Response {
    let draft_id = match parse_draft_id(&draft_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers
        .update
        .handle(&draft_id, req.into(), &auth.actor())
        .await
    {
        Ok(draft) => (StatusCode::OK, Json(DraftResponse::from(draft))).into_response(),
        Err(e) => draft_error_response(e),
    }
}

/// DELETE /rest/drafts/:id - Delete a draft
pub async fn delete_draft(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
) -> Response {
    let draft_id = match parse_draft_id(&draft_id) {
        Ok(id) => id,
        Err(response) => return response,
    };

    match handlers.delete.handle(&draft_id, &auth.actor()).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(e) => draft_error_response(e),
    }
}

/// PATCH /rest/drafts/:id/owner - Reassign a draft's owner
pub async fn change_owner(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Path(draft_id): Path<String>,
    Json(req): Json<ChangeOwnerRequest>,
) -> Response {
    let draft_id = match parse_draft_id(&draft_id) {
        Ok(id) => id,
        Err(response) => return response,
    };
    let new_owner = match UserId::new(req.user) {
        Ok(user) => user,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };

    match handlers
        .change_owner
        .handle(&draft_id, new_owner, &auth.actor())
        .await
    {
        Ok(draft) => (StatusCode::OK, Json(DraftResponse::from(draft))).into_response(),
        Err(e) => draft_error_response(e),
    }
}

/// GET /rest/admin/drafts - List drafts across all users
pub async fn admin_list_drafts(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Query(params): Query<ListDraftsParams>,
) -> Response {
    let except_user = match params.except_user.map(UserId::new).transpose() {
        Ok(user) => user,
        Err(e) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request(e.to_string())),
            )
                .into_response()
        }
    };
    let query = AdminListDraftsQuery {
        no_data: params.no_data,
        except_user,
    };

    match handlers.admin_list.handle(query, &auth.actor()).await {
        Ok(drafts) => {
            let body: Vec<DraftResponse> = drafts.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(body)).into_response()
        }
        Err(e) => draft_error_response(e),
    }
}

/// DELETE /rest/admin/drafts/data/:data_id - Purge drafts of a Data record
pub async fn purge_drafts(
    State(handlers): State<DraftHandlers>,
    auth: RequireAuth,
    Path(data_id): Path<String>,
) -> Response {
    let data_id = match data_id.parse::<DataId>() {
        Ok(id) => id,
        Err(_) => {
            return (
                StatusCode::BAD_REQUEST,
                Json(ErrorResponse::bad_request("Invalid data ID")),
            )
                .into_response()
        }
    };

    match handlers.purge.handle(&data_id, &auth.actor()).await {
        Ok(count) => (
            StatusCode::OK,
            Json(serde_json::json!({ "deleted": count })),
        )
            .into_response(),
        Err(e) => draft_error_response(e),
    }
}

fn parse_draft_id(raw: &str) -> Result<DraftId, Response> {
    raw.parse::<DraftId>().map_err(|_| {
        (
            StatusCode::BAD_REQUEST,
            Json(ErrorResponse::bad_request("Invalid draft ID")),
        )
            .into_response()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_draft_id_accepts_uuid() {
        assert!(parse_draft_id("550e8400-e29b-41d4-a716-446655440000").is_ok());
    }

    #[test]
    fn parse_draft_id_rejects_garbage() {
        let response = parse_draft_id("not-a-uuid").unwrap_err();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
