//! Curation workflow handlers.
//!
//! The session-level orchestration: start a draft (blank, uploaded, or
//! reopened), keep the element tree and its rendered checkpoints in sync
//! while the user edits, validate, and finally promote the document to a
//! Data record in the host system.

mod cancel_changes;
mod clear_fields;
mod discard_form;
mod download;
mod generate_absent;
mod load_form;
mod pipeline;
mod publish_data;
mod save_form;
mod start_curation;
mod validate_form;

pub use cancel_changes::CancelChangesHandler;
pub use clear_fields::ClearFieldsHandler;
pub use discard_form::DiscardFormHandler;
pub use download::{Attachment, DownloadHandler};
pub use generate_absent::GenerateAbsentHandler;
pub use load_form::{LoadFormHandler, LoadedForm};
pub use pipeline::FormPipeline;
pub use publish_data::PublishDataHandler;
pub use save_form::SaveFormHandler;
pub use start_curation::{StartCurationHandler, StartMode};
pub use validate_form::ValidateFormHandler;
