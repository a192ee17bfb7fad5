//! HTTP routes for curation workflow endpoints.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    cancel_changes, clear_fields, discard_form, download_document, download_template,
    generate_choice, generate_element, load_form, publish_data, remove_element, save_form,
    start_curation, validate_form, CurationHandlers,
};

/// Creates the curation workflow router.
pub fn curation_routes(handlers: CurationHandlers) -> Router {
    Router::new()
        .route("/start", post(start_curation))
        .route("/:id/load", post(load_form))
        .route("/:id/clear-fields", post(clear_fields))
        .route("/:id/cancel-changes", post(cancel_changes))
        .route("/:id/discard", post(discard_form))
        .route("/:id/save-form", post(save_form))
        .route("/:id/validate", post(validate_form))
        .route("/:id/publish", post(publish_data))
        .route("/:id/elements/generate-choice", post(generate_choice))
        .route("/:id/elements/generate", post(generate_element))
        .route("/:id/elements/remove", post(remove_element))
        .route("/:id/download/document", get(download_document))
        .route("/:id/download/template", get(download_template))
        .with_state(handlers)
}
