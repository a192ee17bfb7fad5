//! Curate server binary.
//!
//! Loads configuration, wires the PostgreSQL repository and collaborator
//! clients into the application handlers, and serves the REST API.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, Router};
use sqlx::postgres::PgPoolOptions;
use tower_http::{timeout::TimeoutLayer, trace::TraceLayer};
use tracing_subscriber::EnvFilter;

use curate::adapters::auth::JwtTokenValidator;
use curate::adapters::http::middleware::{auth_middleware, AuthState};
use curate::adapters::http::{
    admin_draft_routes, curation_routes, draft_routes, CurationHandlers, DraftHandlers,
};
use curate::adapters::postgres::PostgresDraftRepository;
use curate::adapters::remote::{CoreCmsClient, ParserServiceClient};
use curate::application::handlers::curation::{
    CancelChangesHandler, ClearFieldsHandler, DiscardFormHandler, DownloadHandler, FormPipeline,
    GenerateAbsentHandler, LoadFormHandler, PublishDataHandler, SaveFormHandler,
    StartCurationHandler, ValidateFormHandler,
};
use curate::application::handlers::draft::{
    AdminListDraftsHandler, ChangeOwnerHandler, CreateDraftHandler, DeleteDraftHandler,
    GetDraftHandler, ListDraftsHandler, PurgeDraftsHandler, UpdateDraftHandler,
};
use curate::config::AppConfig;
use curate::ports::{
    DataStore, DraftRepository, FormRenderer, LockService, SchemaParser, SchemaValidator,
    TemplateStore,
};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    config.validate()?;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.server.log_level)),
        )
        .init();

    let pool = PgPoolOptions::new()
        .max_connections(config.database.max_connections)
        .acquire_timeout(config.database.acquire_timeout())
        .connect(&config.database.url)
        .await?;

    if config.database.run_migrations {
        sqlx::migrate!().run(&pool).await?;
        tracing::info!("database migrations applied");
    }

    // Ports
    let repo: Arc<dyn DraftRepository> = Arc::new(PostgresDraftRepository::new(pool));
    let parser_client = Arc::new(ParserServiceClient::new(
        config.services.parser_url.clone(),
        config.parser.clone(),
    ));
    let parser: Arc<dyn SchemaParser> = parser_client.clone();
    let renderer: Arc<dyn FormRenderer> = parser_client.clone();
    let schema_validator: Arc<dyn SchemaValidator> = parser_client;
    let cms_client = Arc::new(CoreCmsClient::new(config.services.core_url.clone()));
    let data_store: Arc<dyn DataStore> = cms_client.clone();
    let templates: Arc<dyn TemplateStore> = cms_client.clone();
    let locks: Arc<dyn LockService> = cms_client;

    // Draft CRUD handlers
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

    // Curation workflow handlers
    let pipeline = FormPipeline::new(
        repo.clone(),
        parser.clone(),
        renderer,
        templates.clone(),
    );
    let curation_handlers = CurationHandlers {
        start: Arc::new(StartCurationHandler::new(
            repo.clone(),
            templates,
            schema_validator.clone(),
        )),
        load: Arc::new(LoadFormHandler::new(pipeline.clone(), locks.clone())),
        clear_fields: Arc::new(ClearFieldsHandler::new(pipeline.clone())),
        cancel_changes: Arc::new(CancelChangesHandler::new(
            pipeline.clone(),
            data_store.clone(),
        )),
        discard: Arc::new(DiscardFormHandler::new(
            repo.clone(),
            parser.clone(),
            locks.clone(),
        )),
        save_form: Arc::new(SaveFormHandler::new(pipeline.clone())),
        validate: Arc::new(ValidateFormHandler::new(pipeline.clone(), schema_validator)),
        publish: Arc::new(PublishDataHandler::new(pipeline.clone(), data_store, locks)),
        elements: Arc::new(GenerateAbsentHandler::new(pipeline.clone())),
        download: Arc::new(DownloadHandler::new(pipeline)),
    };

    let validator: AuthState = Arc::new(JwtTokenValidator::new(config.auth.jwt_secret.clone()));
    let app = Router::new()
        .nest("/rest/drafts", draft_routes(draft_handlers.clone()))
        .nest("/rest/admin/drafts", admin_draft_routes(draft_handlers))
        .nest("/curate", curation_routes(curation_handlers))
        .layer(middleware::from_fn_with_state(validator, auth_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::new(Duration::from_secs(
            config.server.request_timeout_secs,
        )));

    let addr = config.server.socket_addr();
    tracing::info!(%addr, "curate server listening");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
