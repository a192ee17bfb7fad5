//! CreateDraftHandler - create a draft for the acting user (or, for
//! administrators, any user).

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{
    AccessControlError, DataId, DraftId, ElementId, RequestUser, TemplateId, UserId,
};
use crate::ports::DraftRepository;

/// Command to create a draft.
#[derive(Debug, Clone)]
pub struct CreateDraftCommand {
    /// Explicit owner; defaults to the acting user. A non-superuser naming
    /// someone else is rejected by the write gate.
    pub owner: Option<UserId>,
    pub template_id: TemplateId,
    pub name: String,
    pub form_string: Option<String>,
    pub element_root: Option<ElementId>,
    pub data: Option<DataId>,
}

/// Handler for draft creation.
pub struct CreateDraftHandler {
    repo: Arc<dyn DraftRepository>,
}

impl CreateDraftHandler {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - `AccessControl` if the user is anonymous or creating for another user
    /// - `Validation` if the name is empty after trimming
    /// - `NotUnique` on a `(user, template, name)` collision
    pub async fn handle(
        &self,
        cmd: CreateDraftCommand,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let owner = match cmd.owner {
            Some(owner) => owner,
            None => user
                .id()
                .cloned()
                .ok_or_else(AccessControlError::insufficient_rights)?,
        };

        let mut draft = Draft::new(DraftId::new(), owner, cmd.template_id, cmd.name)?;
        draft.set_form_string(cmd.form_string);
        draft.set_element_root(cmd.element_root);
        draft.link_data(cmd.data);

        access::check_can_write(user, &draft)?;

        self.repo.insert(&draft).await?;
        tracing::info!(draft_id = %draft.id(), user = %draft.user(), "draft created");
        Ok(draft)
    }
}
