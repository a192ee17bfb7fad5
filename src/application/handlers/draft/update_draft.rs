//! UpdateDraftHandler - partial update of a draft's fields.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{DataId, DraftId, ElementId, RequestUser};
use crate::ports::DraftRepository;

/// Command to patch a draft. Absent fields are left untouched.
#[derive(Debug, Clone, Default)]
pub struct UpdateDraftCommand {
    pub name: Option<String>,
    pub form_string: Option<String>,
    pub element_root: Option<ElementId>,
    pub data: Option<DataId>,
}

/// Handler for draft updates.
pub struct UpdateDraftHandler {
    repo: Arc<dyn DraftRepository>,
}

impl UpdateDraftHandler {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the user is neither superuser nor owner
    /// - `Validation` if a new name is empty after trimming
    /// - `NotUnique` if a rename collides with an existing draft
    pub async fn handle(
        &self,
        draft_id: &DraftId,
        cmd: UpdateDraftCommand,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let mut draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;

        access::check_can_write(user, &draft)?;

        if let Some(name) = cmd.name {
            draft.rename(name)?;
        }
        if let Some(form_string) = cmd.form_string {
            draft.set_form_string(Some(form_string));
        }
        if let Some(root) = cmd.element_root {
            draft.set_element_root(Some(root));
        }
        if let Some(data) = cmd.data {
            draft.link_data(Some(data));
        }

        self.repo.update(&draft).await?;
        Ok(draft)
    }
}
