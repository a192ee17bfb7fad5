//! Integration tests for the REST layer wiring.
//!
//! Verifies that:
//! 1. The routers and handler states wire together
//! 2. Request DTOs deserialize correctly
//! 3. Response DTOs serialize correctly

use std::sync::Arc;

use serde_json::json;

use curate::adapters::http::curation::StartCurationRequest;
use curate::adapters::http::draft::{
    CreateDraftRequest, DraftResponse, ListDraftsParams, UpdateDraftRequest,
};
use curate::adapters::http::{
    admin_draft_routes, curation_routes, draft_routes, CurationHandlers, DraftHandlers,
};
use curate::adapters::memory::{
    InMemoryDataStore, InMemoryDraftRepository, InMemoryLockService, InMemoryTemplateStore,
    MockFormRenderer, MockSchemaParser, MockSchemaValidator,
};
use curate::application::handlers::curation::{
    CancelChangesHandler, ClearFieldsHandler, DiscardFormHandler, DownloadHandler, FormPipeline,
    GenerateAbsentHandler, LoadFormHandler, PublishDataHandler, SaveFormHandler,
    StartCurationHandler, ValidateFormHandler,
};
use curate::application::handlers::draft::{
    AdminListDraftsHandler, ChangeOwnerHandler, CreateDraftHandler, DeleteDraftHandler,
    GetDraftHandler, ListDraftsHandler, PurgeDraftsHandler, UpdateDraftHandler,
};
use curate::domain::draft::Draft;
use curate::domain::foundation::{DraftId, TemplateId, UserId};
use curate::ports::{
    DataStore, DraftRepository, FormRenderer, LockService, SchemaParser, SchemaValidator,
    TemplateStore,
};

// =============================================================================
// Wiring
// =============================================================================

#[test]
fn routers_wire_together() {
    let repo: Arc<dyn DraftRepository> = Arc::new(InMemoryDraftRepository::new());
    let parser: Arc<dyn SchemaParser> = Arc::new(MockSchemaParser::new());
    let renderer: Arc<dyn FormRenderer> = Arc::new(MockFormRenderer::new());
    let validator: Arc<dyn SchemaValidator> = Arc::new(MockSchemaValidator::new());
    let templates: Arc<dyn TemplateStore> = Arc::new(InMemoryTemplateStore::new());
    let data_store: Arc<dyn DataStore> = Arc::new(InMemoryDataStore::new());
    let locks: Arc<dyn LockService> = Arc::new(InMemoryLockService::new());

    let draft_handlers = DraftHandlers {
        get: Arc::new(GetDraftHandler::new(repo.clone())),
        create: Arc::new(CreateDraftHandler::new(repo.clone())),
        update: Arc::new(UpdateDraftHandler::new(repo.clone())),
        delete: Arc::new(DeleteDraftHandler::new(repo.clone(), parser.clone())),
        change_owner: Arc::new(ChangeOwnerHandler::new(repo.clone())),
        list: Arc::new(ListDraftsHandler::new(repo.clone())),
        admin_list: Arc::new(AdminListDraftsHandler::new(repo.clone())),
        purge: Arc::new(PurgeDraftsHandler::new(
            repo.clone(),
            parser.clone(),
            data_store.clone(),
        )),
    };

    let pipeline = FormPipeline::new(repo.clone(), parser.clone(), renderer, templates.clone());
    let curation_handlers = CurationHandlers {
        start: Arc::new(StartCurationHandler::new(
            repo.clone(),
            templates,
            validator.clone(),
        )),
        load: Arc::new(LoadFormHandler::new(pipeline.clone(), locks.clone())),
        clear_fields: Arc::new(ClearFieldsHandler::new(pipeline.clone())),
        cancel_changes: Arc::new(CancelChangesHandler::new(
            pipeline.clone(),
            data_store.clone(),
        )),
        discard: Arc::new(DiscardFormHandler::new(repo, parser, locks.clone())),
        save_form: Arc::new(SaveFormHandler::new(pipeline.clone())),
        validate: Arc::new(ValidateFormHandler::new(pipeline.clone(), validator)),
        publish: Arc::new(PublishDataHandler::new(pipeline.clone(), data_store, locks)),
        elements: Arc::new(GenerateAbsentHandler::new(pipeline.clone())),
        download: Arc::new(DownloadHandler::new(pipeline)),
    };

    let _app = axum::Router::new()
        .nest("/rest/drafts", draft_routes(draft_handlers.clone()))
        .nest("/rest/admin/drafts", admin_draft_routes(draft_handlers))
        .nest("/curate", curation_routes(curation_handlers));
}

// =============================================================================
// Request DTOs
// =============================================================================

#[test]
fn create_draft_request_deserializes() {
    let json = json!({
        "name": "doc1",
        "template": "550e8400-e29b-41d4-a716-446655440000",
        "form_string": "<root/>"
    });

    let req: CreateDraftRequest = serde_json::from_value(json).unwrap();
    assert_eq!(req.name, "doc1");
    assert_eq!(req.form_string, Some("<root/>".to_string()));
    assert!(req.user.is_none());
}

#[test]
fn admin_create_draft_request_accepts_explicit_user() {
    let json = json!({
        "name": "doc1",
        "template": "550e8400-e29b-41d4-a716-446655440000",
        "user": "2"
    });

    let req: CreateDraftRequest = serde_json::from_value(json).unwrap();
    let cmd = req.into_command().unwrap();
    assert_eq!(cmd.owner.unwrap().as_str(), "2");
}

#[test]
fn update_draft_request_tolerates_partial_bodies() {
    let req: UpdateDraftRequest = serde_json::from_value(json!({"name": "doc2"})).unwrap();
    assert_eq!(req.name, Some("doc2".to_string()));
    assert!(req.form_string.is_none());
    assert!(req.data.is_none());
}

#[test]
fn list_params_parse_filters() {
    let params: ListDraftsParams = serde_json::from_value(json!({
        "template": "550e8400-e29b-41d4-a716-446655440000",
        "no_data": true
    }))
    .unwrap();
    assert!(params.template.is_some());
    assert!(params.no_data);
    assert!(params.except_user.is_none());
}

#[test]
fn start_curation_request_covers_all_modes() {
    for body in [
        json!({"template": "550e8400-e29b-41d4-a716-446655440000", "mode": "new", "name": "doc1"}),
        json!({
            "template": "550e8400-e29b-41d4-a716-446655440000",
            "mode": "upload",
            "filename": "doc.xml",
            "content": "<root/>"
        }),
        json!({
            "template": "550e8400-e29b-41d4-a716-446655440000",
            "mode": "open",
            "draft": "650e8400-e29b-41d4-a716-446655440000"
        }),
    ] {
        assert!(serde_json::from_value::<StartCurationRequest>(body).is_ok());
    }
}

// =============================================================================
// Response DTOs
// =============================================================================

#[test]
fn draft_response_serializes_identifiers_as_strings() {
    let mut draft = Draft::new(
        DraftId::new(),
        UserId::new("1").unwrap(),
        TemplateId::from_uuid(uuid::Uuid::new_v4()),
        "doc1",
    )
    .unwrap();
    draft.set_form_string(Some("<root/>".to_string()));

    let response: DraftResponse = draft.clone().into();
    let json = serde_json::to_value(&response).unwrap();

    assert_eq!(json["id"], draft.id().to_string());
    assert_eq!(json["user"], "1");
    assert_eq!(json["name"], "doc1");
    assert_eq!(json["form_string"], "<root/>");
    assert!(json.get("data").is_none());
}
