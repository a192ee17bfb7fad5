//! In-memory port implementations.
//!
//! Used by unit and integration tests, and by local development runs that
//! have no parser service or host CMS to talk to. The repository enforces
//! the same `(user, template, name)` uniqueness rule as the PostgreSQL
//! adapter so constraint handling can be tested without a database.

mod collaborators;
mod draft_repository;

pub use collaborators::{
    InMemoryDataStore, InMemoryLockService, InMemoryTemplateStore, MockFormRenderer,
    MockSchemaParser, MockSchemaValidator,
};
pub use draft_repository::InMemoryDraftRepository;
