//! HTTP adapters - REST API implementations.

pub mod curation;
pub mod draft;
mod error;
pub mod middleware;

pub use curation::{curation_routes, CurationHandlers};
pub use draft::{admin_draft_routes, draft_routes, DraftHandlers};
pub use error::{draft_error_response, ErrorResponse};
