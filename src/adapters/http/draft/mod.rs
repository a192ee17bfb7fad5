//! REST adapter for draft CRUD.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    ChangeOwnerRequest, CreateDraftRequest, DraftResponse, ListDraftsParams, UpdateDraftRequest,
};
pub use handlers::DraftHandlers;
pub use routes::{admin_draft_routes, draft_routes};
