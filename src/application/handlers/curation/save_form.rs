//! SaveFormHandler - checkpoint the current form as `form_string`.

use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{DraftId, RequestUser};

use super::FormPipeline;

/// Handler for saving the form.
///
/// Renders the current element tree and persists the result as the draft's
/// `form_string`. The draft stays a draft, the session stays open, and the
/// lock on any linked Data record stays held.
pub struct SaveFormHandler {
    pipeline: FormPipeline,
}

impl SaveFormHandler {
    pub fn new(pipeline: FormPipeline) -> Self {
        Self { pipeline }
    }

    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the user is neither superuser nor owner
    /// - `Validation` if the draft has no active element tree
    pub async fn handle(&self, draft_id: &DraftId, user: &RequestUser) -> Result<Draft, DraftError> {
        let mut draft = self.pipeline.fetch_for_write(draft_id, user).await?;

        let document = self.pipeline.render_document(&draft).await?;
        draft.set_form_string(Some(document));
        self.pipeline.repo().update(&draft).await?;
        tracing::debug!(draft_id = %draft.id(), "form checkpoint saved");
        Ok(draft)
    }
}
