//! UpdateElementRootHandler - swap a draft's element tree.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{DraftId, ElementId, RequestUser};
use crate::ports::{DraftRepository, SchemaParser};

/// Handler for replacing the element-tree root of a draft.
///
/// The previous subtree is deleted through the parser before the new root is
/// assigned, so abandoned trees never accumulate in the collaborator.
pub struct UpdateElementRootHandler {
    repo: Arc<dyn DraftRepository>,
    parser: Arc<dyn SchemaParser>,
}

impl UpdateElementRootHandler {
    pub fn new(repo: Arc<dyn DraftRepository>, parser: Arc<dyn SchemaParser>) -> Self {
        Self { repo, parser }
    }

    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the user is neither superuser nor owner
    pub async fn handle(
        &self,
        draft_id: &DraftId,
        new_root: ElementId,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let mut draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;

        access::check_can_write(user, &draft)?;

        if let Some(previous) = draft.element_root() {
            self.parser.delete_branch(previous).await?;
        }
        draft.set_element_root(Some(new_root));
        self.repo.update(&draft).await?;
        Ok(draft)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryDraftRepository, MockSchemaParser};
    use crate::domain::foundation::{AuthenticatedUser, TemplateId, UserId};

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    fn draft(owner: &str) -> Draft {
        Draft::new(
            DraftId::new(),
            UserId::new(owner).unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap()
    }

    #[tokio::test]
    async fn previous_branch_is_deleted_before_reassignment() {
        let mut d = draft("1");
        let old_root = ElementId::from_uuid(uuid::Uuid::new_v4());
        d.set_element_root(Some(old_root));

        let repo = Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()]));
        let parser = Arc::new(MockSchemaParser::new());
        let handler = UpdateElementRootHandler::new(repo.clone(), parser.clone());

        let new_root = ElementId::from_uuid(uuid::Uuid::new_v4());
        let updated = handler.handle(d.id(), new_root, &actor("1")).await.unwrap();

        assert_eq!(updated.element_root(), Some(&new_root));
        assert_eq!(parser.deleted_branches(), vec![old_root]);
    }

    #[tokio::test]
    async fn first_assignment_deletes_nothing() {
        let d = draft("1");
        let parser = Arc::new(MockSchemaParser::new());
        let handler = UpdateElementRootHandler::new(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            parser.clone(),
        );

        handler
            .handle(d.id(), ElementId::from_uuid(uuid::Uuid::new_v4()), &actor("1"))
            .await
            .unwrap();
        assert!(parser.deleted_branches().is_empty());
    }

    #[tokio::test]
    async fn non_owner_cannot_swap_root() {
        let d = draft("1");
        let handler = UpdateElementRootHandler::new(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            Arc::new(MockSchemaParser::new()),
        );

        let result = handler
            .handle(d.id(), ElementId::from_uuid(uuid::Uuid::new_v4()), &actor("2"))
            .await;
        assert!(matches!(result, Err(DraftError::AccessControl(_))));
    }
}
