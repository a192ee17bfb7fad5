//! GetDraftHandler - gated retrieval of a single draft.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{DraftId, RequestUser, TemplateId};
use crate::ports::DraftRepository;

/// Handler for retrieving a draft by id or by exact name.
pub struct GetDraftHandler {
    repo: Arc<dyn DraftRepository>,
}

impl GetDraftHandler {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// Fetch a draft by id.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the user is neither superuser nor owner
    pub async fn handle(&self, draft_id: &DraftId, user: &RequestUser) -> Result<Draft, DraftError> {
        let draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;

        access::check_can_read(user, &draft)?;
        Ok(draft)
    }

    /// Exact lookup by the acting user's id, template, and name.
    pub async fn handle_by_name(
        &self,
        template_id: &TemplateId,
        name: &str,
        user: &RequestUser,
    ) -> Result<Option<Draft>, DraftError> {
        let owner = user
            .id()
            .ok_or_else(crate::domain::foundation::AccessControlError::insufficient_rights)?;

        let found = self
            .repo
            .find_by_user_and_template_and_name(owner, template_id, name)
            .await?;
        Ok(found)
    }
}
