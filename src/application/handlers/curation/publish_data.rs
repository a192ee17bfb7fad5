//! PublishDataHandler - promote a draft to a Data record.

use std::sync::Arc;

use crate::domain::draft::DraftError;
use crate::domain::foundation::{AccessControlError, DataId, DraftId, RequestUser};
use crate::ports::{DataRecord, DataStore, LockService};

use super::FormPipeline;

/// Handler for saving a draft as finalized Data.
///
/// Renders the element tree, creates or updates the Data record through the
/// host system (which enforces the Data's own write permission), releases
/// the lock, and deletes the draft. Drafts are transient: they do not
/// persist alongside their finished Data.
pub struct PublishDataHandler {
    pipeline: FormPipeline,
    data_store: Arc<dyn DataStore>,
    locks: Arc<dyn LockService>,
}

impl PublishDataHandler {
    pub fn new(
        pipeline: FormPipeline,
        data_store: Arc<dyn DataStore>,
        locks: Arc<dyn LockService>,
    ) -> Self {
        Self {
            pipeline,
            data_store,
            locks,
        }
    }

    /// Returns the id of the created or updated Data record.
    ///
    /// # Errors
    ///
    /// - `NotFound` if no draft has that id
    /// - `AccessControl` if the user may not write the draft, or the host
    ///   system denies writing the linked Data record
    /// - `Validation` if the draft has no active element tree
    pub async fn handle(&self, draft_id: &DraftId, user: &RequestUser) -> Result<DataId, DraftError> {
        let draft = self.pipeline.fetch_for_write(draft_id, user).await?;
        let acting = user
            .id()
            .cloned()
            .ok_or_else(AccessControlError::insufficient_rights)?;

        let document = self.pipeline.render_document(&draft).await?;

        let record = match draft.data() {
            Some(data_id) => {
                let mut existing = self.data_store.get(data_id, &acting).await?;
                existing.content = document;
                existing
            }
            None => DataRecord {
                id: None,
                title: draft.name().to_string(),
                template: *draft.template(),
                user_id: acting.clone(),
                content: document,
            },
        };

        let data_id = self.data_store.upsert(record, &acting).await?;

        if let Some(locked) = draft.data() {
            self.locks.unlock(locked, &acting).await?;
        }

        if let Some(root) = draft.element_root() {
            self.pipeline.parser().delete_branch(root).await?;
        }
        self.pipeline.repo().delete(draft.id()).await?;

        tracing::info!(draft_id = %draft.id(), data_id = %data_id, "draft published as data");
        Ok(data_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDataStore, InMemoryDraftRepository, InMemoryLockService, InMemoryTemplateStore,
        MockFormRenderer, MockSchemaParser,
    };
    use crate::domain::draft::Draft;
    use crate::domain::foundation::{AuthenticatedUser, ElementId, TemplateId, UserId};
    use crate::ports::LockService as _;

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    struct Fixture {
        handler: PublishDataHandler,
        repo: Arc<InMemoryDraftRepository>,
        data_store: Arc<InMemoryDataStore>,
        locks: Arc<InMemoryLockService>,
    }

    fn fixture(drafts: Vec<Draft>, data_store: InMemoryDataStore) -> Fixture {
        let repo = Arc::new(InMemoryDraftRepository::with_drafts(drafts));
        let data_store = Arc::new(data_store);
        let locks = Arc::new(InMemoryLockService::new());
        let handler = PublishDataHandler::new(
            FormPipeline::new(
                repo.clone(),
                Arc::new(MockSchemaParser::new()),
                Arc::new(MockFormRenderer::new().with_document("<root>final</root>")),
                Arc::new(InMemoryTemplateStore::new()),
            ),
            data_store.clone(),
            locks.clone(),
        );
        Fixture {
            handler,
            repo,
            data_store,
            locks,
        }
    }

    fn draft_with_root(owner: &str) -> Draft {
        let mut d = Draft::new(
            DraftId::new(),
            UserId::new(owner).unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap();
        d.set_element_root(Some(ElementId::from_uuid(uuid::Uuid::new_v4())));
        d
    }

    #[tokio::test]
    async fn publishing_creates_data_and_deletes_the_draft() {
        let d = draft_with_root("1");
        let f = fixture(vec![d.clone()], InMemoryDataStore::new());

        let data_id = f.handler.handle(d.id(), &actor("1")).await.unwrap();

        let stored = f
            .data_store
            .get(&data_id, &UserId::new("1").unwrap())
            .await
            .unwrap();
        assert_eq!(stored.title, "doc1");
        assert_eq!(stored.content, "<root>final</root>");
        assert!(f.repo.is_empty());
    }

    #[tokio::test]
    async fn publishing_an_edit_updates_existing_data_and_unlocks() {
        let mut d = draft_with_root("1");
        let data_id = DataId::from_uuid(uuid::Uuid::new_v4());
        d.link_data(Some(data_id));

        let store = InMemoryDataStore::new().with_record(crate::ports::DataRecord {
            id: Some(data_id),
            title: "published".to_string(),
            template: *d.template(),
            user_id: UserId::new("1").unwrap(),
            content: "<root>old</root>".to_string(),
        });
        let f = fixture(vec![d.clone()], store);
        f.locks.lock(&data_id, &UserId::new("1").unwrap()).await.unwrap();

        let returned = f.handler.handle(d.id(), &actor("1")).await.unwrap();

        assert_eq!(returned, data_id);
        let stored = f
            .data_store
            .get(&data_id, &UserId::new("1").unwrap())
            .await
            .unwrap();
        assert_eq!(stored.title, "published");
        assert_eq!(stored.content, "<root>final</root>");
        assert!(!f.locks.is_locked(&data_id));
        assert!(f.repo.is_empty());
    }

    #[tokio::test]
    async fn publishing_without_tree_fails_and_keeps_the_draft() {
        let d = Draft::new(
            DraftId::new(),
            UserId::new("1").unwrap(),
            TemplateId::from_uuid(uuid::Uuid::new_v4()),
            "doc1",
        )
        .unwrap();
        let f = fixture(vec![d.clone()], InMemoryDataStore::new());

        let result = f.handler.handle(d.id(), &actor("1")).await;
        assert!(matches!(result, Err(DraftError::Validation { .. })));
        assert_eq!(f.repo.len(), 1);
        assert!(f.data_store.is_empty());
    }
}
