//! Ports - Trait seams between the application and external systems.
//!
//! The curation engine proper (schema parsing, element trees, rendering,
//! locking, Data/Template CRUD) lives in collaborator services; this crate
//! only talks to them through these traits.

mod data_store;
mod draft_repository;
mod form_renderer;
mod lock_service;
mod schema_parser;
mod schema_validator;
mod template_store;
mod token_validator;

pub use data_store::{DataRecord, DataStore};
pub use draft_repository::DraftRepository;
pub use form_renderer::FormRenderer;
pub use lock_service::LockService;
pub use schema_parser::{RemoveOutcome, SchemaParser};
pub use schema_validator::SchemaValidator;
pub use template_store::{Template, TemplateStore};
pub use token_validator::TokenValidator;
