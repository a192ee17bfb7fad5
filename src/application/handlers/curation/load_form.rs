//! LoadFormHandler - enter a draft and render its form.

use std::sync::Arc;

use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{AccessControlError, DraftId, RequestUser, UserId};
use crate::ports::LockService;

use super::FormPipeline;

/// A rendered form ready to be edited.
#[derive(Debug, Clone)]
pub struct LoadedForm {
    pub draft_id: DraftId,
    pub name: String,
    /// True when the draft edits an existing Data record.
    pub editing: bool,
    pub form_html: String,
}

/// Handler for entering a draft.
///
/// Entering a draft tied to existing Data locks that Data first, before the
/// ownership check, so a second editor is turned away with a lock conflict
/// rather than let in. If anything fails after the lock was taken, the lock
/// is released again.
pub struct LoadFormHandler {
    pipeline: FormPipeline,
    locks: Arc<dyn LockService>,
}

impl LoadFormHandler {
    pub fn new(pipeline: FormPipeline, locks: Arc<dyn LockService>) -> Self {
        Self { pipeline, locks }
    }

    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `Locked` if another user is editing the linked Data record
    /// - `AccessControl` if the user is neither superuser nor owner
    pub async fn handle(
        &self,
        draft_id: &DraftId,
        user: &RequestUser,
        reload_unsaved: bool,
    ) -> Result<LoadedForm, DraftError> {
        let acting = user
            .id()
            .cloned()
            .ok_or_else(AccessControlError::insufficient_rights)?;

        let mut draft = self
            .pipeline
            .repo()
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;

        if let Some(data_id) = draft.data() {
            self.locks.lock(data_id, &acting).await?;
        }

        match self.build(&mut draft, user, reload_unsaved).await {
            Ok(form) => Ok(form),
            Err(err) => {
                self.release(&draft, &acting).await;
                Err(err)
            }
        }
    }

    async fn build(
        &self,
        draft: &mut Draft,
        user: &RequestUser,
        reload_unsaved: bool,
    ) -> Result<LoadedForm, DraftError> {
        crate::application::access::check_can_read(user, draft)?;

        let template = self.pipeline.template_for(draft).await?;

        let root = match draft.element_root() {
            Some(root) if reload_unsaved => *root,
            _ => {
                let seed = draft.form_string().map(|s| s.to_string());
                self.pipeline
                    .rebuild_root(draft, &template.content, seed.as_deref())
                    .await?
            }
        };

        let form_html = self.pipeline.render_form(&root).await?;
        Ok(LoadedForm {
            draft_id: *draft.id(),
            name: draft.name().to_string(),
            editing: draft.edits_existing_data(),
            form_html,
        })
    }

    async fn release(&self, draft: &Draft, acting: &UserId) {
        if let Some(data_id) = draft.data() {
            if let Err(err) = self.locks.unlock(data_id, acting).await {
                tracing::warn!(draft_id = %draft.id(), error = %err, "failed to release lock");
            }
        }
    }
}
