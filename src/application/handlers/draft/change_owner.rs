//! ChangeOwnerHandler - reassign a draft to another user.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{DraftId, RequestUser, UserId};
use crate::ports::DraftRepository;

/// Handler for ownership transfer.
pub struct ChangeOwnerHandler {
    repo: Arc<dyn DraftRepository>,
}

impl ChangeOwnerHandler {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the acting user is anonymous, or neither
    ///   superuser nor current owner
    pub async fn handle(
        &self,
        draft_id: &DraftId,
        new_owner: UserId,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let mut draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;

        access::check_can_change_owner(user, &draft)?;

        tracing::info!(
            draft_id = %draft.id(),
            from = %draft.user(),
            to = %new_owner,
            "draft ownership transferred"
        );
        draft.assign_owner(new_owner);
        self.repo.update(&draft).await?;
        Ok(draft)
    }
}
