//! DiscardFormHandler - cancel the session and delete the draft.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::DraftError;
use crate::domain::foundation::{AccessControlError, DraftId, RequestUser};
use crate::ports::{DraftRepository, LockService, SchemaParser};

/// Handler for abandoning a curation session.
///
/// Releases the lock on the linked Data record (if any), deletes the element
/// subtree, then the draft itself.
pub struct DiscardFormHandler {
    repo: Arc<dyn DraftRepository>,
    parser: Arc<dyn SchemaParser>,
    locks: Arc<dyn LockService>,
}

impl DiscardFormHandler {
    pub fn new(
        repo: Arc<dyn DraftRepository>,
        parser: Arc<dyn SchemaParser>,
        locks: Arc<dyn LockService>,
    ) -> Self {
        Self {
            repo,
            parser,
            locks,
        }
    }

    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the user is neither superuser nor owner
    pub async fn handle(&self, draft_id: &DraftId, user: &RequestUser) -> Result<(), DraftError> {
        let draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;

        access::check_can_write(user, &draft)?;
        let acting = user
            .id()
            .ok_or_else(AccessControlError::insufficient_rights)?;

        if let Some(data_id) = draft.data() {
            self.locks.unlock(data_id, acting).await?;
        }
        if let Some(root) = draft.element_root() {
            self.parser.delete_branch(root).await?;
        }
        self.repo.delete(draft.id()).await?;
        tracing::info!(draft_id = %draft.id(), "curation session discarded");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDraftRepository, InMemoryLockService, MockSchemaParser,
    };
    use crate::domain::draft::Draft;
    use crate::domain::foundation::{AuthenticatedUser, DataId, TemplateId, UserId};
    use crate::ports::LockService as _;

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    #[tokio::test]
    async fn discard_unlocks_and_deletes() {
        let data_id = DataId::from_uuid(uuid::Uuid::new_v4());
        let mut d = Draft::new(
            DraftId::new(),
            UserId::new("1").unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap();
        d.link_data(Some(data_id));
        let root = crate::domain::foundation::ElementId::from_uuid(uuid::Uuid::new_v4());
        d.set_element_root(Some(root));

        let repo = Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()]));
        let parser = Arc::new(MockSchemaParser::new());
        let locks = Arc::new(InMemoryLockService::new());
        locks.lock(&data_id, &UserId::new("1").unwrap()).await.unwrap();

        let handler = DiscardFormHandler::new(repo.clone(), parser.clone(), locks.clone());
        handler.handle(d.id(), &actor("1")).await.unwrap();

        assert!(repo.is_empty());
        assert!(!locks.is_locked(&data_id));
        assert_eq!(parser.deleted_branches(), vec![root]);
    }

    #[tokio::test]
    async fn non_owner_cannot_discard() {
        let d = Draft::new(
            DraftId::new(),
            UserId::new("1").unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap();
        let handler = DiscardFormHandler::new(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            Arc::new(MockSchemaParser::new()),
            Arc::new(InMemoryLockService::new()),
        );

        let result = handler.handle(d.id(), &actor("2")).await;
        assert!(matches!(result, Err(DraftError::AccessControl(_))));
    }
}
