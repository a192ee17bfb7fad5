//! DeleteDraftHandler - delete a draft and its element subtree.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::DraftError;
use crate::domain::foundation::{DraftId, RequestUser};
use crate::ports::{DraftRepository, SchemaParser};

/// Handler for draft deletion.
///
/// Drafts are transient: deleting one also deletes the element subtree the
/// parser collaborator holds for it.
pub struct DeleteDraftHandler {
    repo: Arc<dyn DraftRepository>,
    parser: Arc<dyn SchemaParser>,
}

impl DeleteDraftHandler {
    pub fn new(repo: Arc<dyn DraftRepository>, parser: Arc<dyn SchemaParser>) -> Self {
        Self { repo, parser }
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

        // The subtree goes first so the draft row never outlives its branch.
        if let Some(root) = draft.element_root() {
            self.parser.delete_branch(root).await?;
        }
        self.repo.delete(draft.id()).await?;
        tracing::info!(draft_id = %draft.id(), "draft deleted");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDraftRepository, MockSchemaParser};
    use crate::domain::draft::Draft;
    use crate::domain::foundation::{AuthenticatedUser, ElementId, TemplateId, UserId};

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    fn draft_with_root(owner: &str) -> (Draft, ElementId) {
        let mut d = Draft::new(
            DraftId::new(),
            UserId::new(owner).unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap();
        let root = ElementId::from_uuid(uuid::Uuid::new_v4());
        d.set_element_root(Some(root));
        (d, root)
    }

    #[tokio::test]
    async fn delete_cascades_branch_removal() {
        let (d, root) = draft_with_root("1");
        let repo = Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()]));
        let parser = Arc::new(MockSchemaParser::new());
        let handler = DeleteDraftHandler::new(repo.clone(), parser.clone());

        handler.handle(d.id(), &actor("1")).await.unwrap();

        assert!(repo.find_by_id(d.id()).await.unwrap().is_none());
        assert_eq!(parser.deleted_branches(), vec![root]);
    }

    #[tokio::test]
    async fn delete_without_root_skips_branch_delete() {
        let d = Draft::new(
            DraftId::new(),
            UserId::new("1").unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap();
        let parser = Arc::new(MockSchemaParser::new());
        let handler = DeleteDraftHandler::new(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            parser.clone(),
        );

        handler.handle(d.id(), &actor("1")).await.unwrap();
        assert!(parser.deleted_branches().is_empty());
    }

    #[tokio::test]
    async fn non_owner_cannot_delete() {
        let (d, _) = draft_with_root("1");
        let repo = Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()]));
        let handler = DeleteDraftHandler::new(repo.clone(), Arc::new(MockSchemaParser::new()));

        let result = handler.handle(d.id(), &actor("2")).await;
        assert!(matches!(result, Err(DraftError::AccessControl(_))));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn missing_draft_is_not_found() {
        let handler = DeleteDraftHandler::new(
            Arc::new(InMemoryDraftRepository::new()),
            Arc::new(MockSchemaParser::new()),
        );
        let result = handler.handle(&DraftId::new(), &actor("1")).await;
        assert!(matches!(result, Err(DraftError::NotFound(_))));
    }
}
