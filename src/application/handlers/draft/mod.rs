//! Draft CRUD handlers.
//!
//! Thin operations over the draft repository; every one runs the
//! access-control gate before touching state.

mod admin_list_drafts;
mod change_owner;
mod create_draft;
mod delete_draft;
mod get_draft;
mod list_drafts;
mod purge_drafts;
mod update_draft;
mod update_element_root;

pub use admin_list_drafts::{AdminListDraftsHandler, AdminListDraftsQuery};
pub use change_owner::ChangeOwnerHandler;
pub use create_draft::{CreateDraftCommand, CreateDraftHandler};
pub use delete_draft::DeleteDraftHandler;
pub use get_draft::GetDraftHandler;
pub use list_drafts::{ListDraftsHandler, ListDraftsQuery};
pub use purge_drafts::PurgeDraftsHandler;
pub use update_draft::{UpdateDraftCommand, UpdateDraftHandler};
pub use update_element_root::UpdateElementRootHandler;
