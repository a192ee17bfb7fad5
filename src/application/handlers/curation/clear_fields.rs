//! ClearFieldsHandler - reset the form to a blank tree.

use crate::domain::draft::DraftError;
use crate::domain::foundation::{DraftId, RequestUser};

use super::FormPipeline;

/// Handler for clearing every field of the current form.
pub struct ClearFieldsHandler {
    pipeline: FormPipeline,
}

impl ClearFieldsHandler {
    pub fn new(pipeline: FormPipeline) -> Self {
        Self { pipeline }
    }

    /// Regenerate a blank tree from the template and return the re-rendered
    /// form. Unsaved edits are discarded with the old tree.
    pub async fn handle(&self, draft_id: &DraftId, user: &RequestUser) -> Result<String, DraftError> {
        let mut draft = self.pipeline.fetch_for_write(draft_id, user).await?;
        let template = self.pipeline.template_for(&draft).await?;

        let root = self
            .pipeline
            .rebuild_root(&mut draft, &template.content, None)
            .await?;
        self.pipeline.render_form(&root).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDraftRepository, InMemoryTemplateStore, MockFormRenderer, MockSchemaParser,
    };
    use crate::domain::draft::Draft;
    use crate::domain::foundation::{AuthenticatedUser, ElementId, TemplateId, UserId};
    use crate::ports::Template;
    use std::sync::Arc;

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    #[tokio::test]
    async fn clearing_discards_the_old_tree() {
        let template = Template {
            id: TemplateId::from_uuid(uuid::Uuid::new_v4()),
            filename: "schema.xsd".to_string(),
            content: "<xs:schema/>".to_string(),
        };
        let mut d = Draft::new(
            crate::domain::foundation::DraftId::new(),
            UserId::new("1").unwrap(),
            template.id,
            "doc1",
        )
        .unwrap();
        let old_root = ElementId::from_uuid(uuid::Uuid::new_v4());
        d.set_element_root(Some(old_root));

        let parser = Arc::new(MockSchemaParser::new());
        let handler = ClearFieldsHandler::new(FormPipeline::new(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            parser.clone(),
            Arc::new(MockFormRenderer::new()),
            Arc::new(InMemoryTemplateStore::new().with_template(template)),
        ));

        let html = handler.handle(d.id(), &actor("1")).await.unwrap();
        assert!(html.starts_with("<form"));
        assert_eq!(parser.deleted_branches(), vec![old_root]);
    }
}
