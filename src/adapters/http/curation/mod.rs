//! REST adapter for the curation workflow.

mod dto;
mod handlers;
mod routes;

pub use dto::{ElementRequest, LoadFormRequest, LoadedFormResponse, StartCurationRequest};
pub use handlers::CurationHandlers;
pub use routes::curation_routes;
