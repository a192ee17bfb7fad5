//! PostgreSQL adapters.

mod draft_repository;

pub use draft_repository::PostgresDraftRepository;
