//! CancelChangesHandler - drop unsaved edits and rebuild the form.

use std::sync::Arc;

use crate::domain::draft::DraftError;
use crate::domain::foundation::{AccessControlError, DraftId, RequestUser};
use crate::ports::DataStore;

use super::FormPipeline;

/// Handler for reverting the form to its last saved state.
///
/// The seed document, in order of preference: the linked Data record's
/// stored content, the draft's saved `form_string`, or nothing (a blank
/// form).
pub struct CancelChangesHandler {
    pipeline: FormPipeline,
    data_store: Arc<dyn DataStore>,
}

impl CancelChangesHandler {
    pub fn new(pipeline: FormPipeline, data_store: Arc<dyn DataStore>) -> Self {
        Self {
            pipeline,
            data_store,
        }
    }

    pub async fn handle(&self, draft_id: &DraftId, user: &RequestUser) -> Result<String, DraftError> {
        let mut draft = self.pipeline.fetch_for_write(draft_id, user).await?;
        let acting = user
            .id()
            .cloned()
            .ok_or_else(AccessControlError::insufficient_rights)?;
        let template = self.pipeline.template_for(&draft).await?;

        let seed = match draft.data() {
            Some(data_id) => Some(self.data_store.get(data_id, &acting).await?.content),
            None => draft.form_string().map(|s| s.to_string()),
        };

        let root = self
            .pipeline
            .rebuild_root(&mut draft, &template.content, seed.as_deref())
            .await?;
        self.pipeline.render_form(&root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDataStore, InMemoryDraftRepository, InMemoryTemplateStore, MockFormRenderer,
        MockSchemaParser,
    };
    use crate::domain::draft::Draft;
    use crate::domain::foundation::{AuthenticatedUser, DataId, TemplateId, UserId};
    use crate::ports::{DataRecord, DraftRepository, Template};

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    fn template() -> Template {
        Template {
            id: TemplateId::from_uuid(uuid::Uuid::new_v4()),
            filename: "schema.xsd".to_string(),
            content: "<xs:schema/>".to_string(),
        }
    }

    #[tokio::test]
    async fn reverts_to_linked_data_content_when_editing() {
        let t = template();
        let data_id = DataId::from_uuid(uuid::Uuid::new_v4());
        let mut d = Draft::new(
            crate::domain::foundation::DraftId::new(),
            UserId::new("1").unwrap(),
            t.id,
            "doc1",
        )
        .unwrap();
        d.link_data(Some(data_id));
        d.set_form_string(Some("<root>unsaved</root>".to_string()));

        let store = InMemoryDataStore::new().with_record(DataRecord {
            id: Some(data_id),
            title: "doc1".to_string(),
            template: t.id,
            user_id: UserId::new("1").unwrap(),
            content: "<root>published</root>".to_string(),
        });
        let handler = CancelChangesHandler::new(
            FormPipeline::new(
                Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
                Arc::new(MockSchemaParser::new()),
                Arc::new(MockFormRenderer::new()),
                Arc::new(InMemoryTemplateStore::new().with_template(t)),
            ),
            Arc::new(store),
        );

        let html = handler.handle(d.id(), &actor("1")).await.unwrap();
        assert!(html.starts_with("<form"));
    }

    #[tokio::test]
    async fn reverts_to_saved_form_string_for_pure_drafts() {
        let t = template();
        let mut d = Draft::new(
            crate::domain::foundation::DraftId::new(),
            UserId::new("1").unwrap(),
            t.id,
            "doc1",
        )
        .unwrap();
        d.set_form_string(Some("<root>saved</root>".to_string()));

        let repo = Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()]));
        let handler = CancelChangesHandler::new(
            FormPipeline::new(
                repo.clone(),
                Arc::new(MockSchemaParser::new()),
                Arc::new(MockFormRenderer::new()),
                Arc::new(InMemoryTemplateStore::new().with_template(t)),
            ),
            Arc::new(InMemoryDataStore::new()),
        );

        handler.handle(d.id(), &actor("1")).await.unwrap();
        let stored = repo.find_by_id(d.id()).await.unwrap().unwrap();
        assert!(stored.element_root().is_some());
    }
}
