//! HTTP routes for draft endpoints.

use axum::{
    routing::{delete, get, patch, post},
    Router,
};

use super::handlers::{
    admin_create_draft, admin_list_drafts, change_owner, create_draft, delete_draft, get_draft,
    list_drafts, purge_drafts, update_draft, DraftHandlers,
};

/// Creates the user-facing draft router.
pub fn draft_routes(handlers: DraftHandlers) -> Router {
    Router::new()
        .route("/", get(list_drafts))
        .route("/", post(create_draft))
        .route("/:id", get(get_draft))
        .route("/:id", patch(update_draft))
        .route("/:id", delete(delete_draft))
        .route("/:id/owner", patch(change_owner))
        .with_state(handlers)
}

/// Creates the administrative draft router.
pub fn admin_draft_routes(handlers: DraftHandlers) -> Router {
    Router::new()
        .route("/", get(admin_list_drafts))
        .route("/", post(admin_create_draft))
        .route("/data/:data_id", delete(purge_drafts))
        .with_state(handlers)
}
