//! Shared plumbing for the curation workflow.
//!
//! Every workflow operation fetches a gated draft, and most of them
//! regenerate the element tree from some seed document and re-render it.
//! `FormPipeline` holds that common sequence so the handlers stay thin.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{DraftId, ElementId, RequestUser};
use crate::ports::{DraftRepository, FormRenderer, SchemaParser, Template, TemplateStore};

/// Shared generate/render plumbing for workflow handlers.
#[derive(Clone)]
pub struct FormPipeline {
    repo: Arc<dyn DraftRepository>,
    parser: Arc<dyn SchemaParser>,
    renderer: Arc<dyn FormRenderer>,
    templates: Arc<dyn TemplateStore>,
}

impl FormPipeline {
    pub fn new(
        repo: Arc<dyn DraftRepository>,
        parser: Arc<dyn SchemaParser>,
        renderer: Arc<dyn FormRenderer>,
        templates: Arc<dyn TemplateStore>,
    ) -> Self {
        Self {
            repo,
            parser,
            renderer,
            templates,
        }
    }

    pub(crate) fn repo(&self) -> &Arc<dyn DraftRepository> {
        &self.repo
    }

    pub(crate) fn parser(&self) -> &Arc<dyn SchemaParser> {
        &self.parser
    }

    /// Fetch a draft for a read-only operation.
    pub async fn fetch_for_read(
        &self,
        draft_id: &DraftId,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;
        access::check_can_read(user, &draft)?;
        Ok(draft)
    }

    /// Fetch a draft for a mutating operation.
    pub async fn fetch_for_write(
        &self,
        draft_id: &DraftId,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let draft = self
            .repo
            .find_by_id(draft_id)
            .await?
            .ok_or_else(|| DraftError::not_found(*draft_id))?;
        access::check_can_write(user, &draft)?;
        Ok(draft)
    }

    /// Fetch the draft's template from the host system.
    pub async fn template_for(&self, draft: &Draft) -> Result<Template, DraftError> {
        Ok(self.templates.get(draft.template()).await?)
    }

    /// Regenerate the element tree from a seed document and persist the new
    /// root. The previous subtree is deleted first.
    pub async fn rebuild_root(
        &self,
        draft: &mut Draft,
        schema: &str,
        seed: Option<&str>,
    ) -> Result<ElementId, DraftError> {
        let root = self.parser.generate_form(schema, seed).await?;
        if let Some(previous) = draft.element_root() {
            self.parser.delete_branch(previous).await?;
        }
        draft.set_element_root(Some(root));
        self.repo.update(draft).await?;
        Ok(root)
    }

    /// Render the draft's element tree as an HTML form.
    pub async fn render_form(&self, root: &ElementId) -> Result<String, DraftError> {
        Ok(self.renderer.render_form(root).await?)
    }

    /// Render the draft's element tree as document text.
    ///
    /// The tree is the source of truth while editing; a draft without one
    /// has nothing current to render.
    pub async fn render_document(&self, draft: &Draft) -> Result<String, DraftError> {
        let root = draft.element_root().ok_or_else(|| {
            DraftError::validation("element_root", "The draft has no active element tree.")
        })?;
        Ok(self.renderer.render_document(root).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDraftRepository, InMemoryTemplateStore, MockFormRenderer, MockSchemaParser,
    };
    use crate::domain::foundation::{AuthenticatedUser, TemplateId, UserId};

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    fn pipeline_with(repo: Arc<InMemoryDraftRepository>, parser: Arc<MockSchemaParser>) -> FormPipeline {
        FormPipeline::new(
            repo,
            parser,
            Arc::new(MockFormRenderer::new()),
            Arc::new(InMemoryTemplateStore::new()),
        )
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
    async fn rebuild_root_swaps_and_persists() {
        let mut d = draft("1");
        let old_root = ElementId::from_uuid(uuid::Uuid::new_v4());
        d.set_element_root(Some(old_root));
        let repo = Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()]));
        let parser = Arc::new(MockSchemaParser::new());
        let pipeline = pipeline_with(repo.clone(), parser.clone());

        let new_root = pipeline
            .rebuild_root(&mut d, "<schema/>", None)
            .await
            .unwrap();

        assert_eq!(parser.deleted_branches(), vec![old_root]);
        let stored = repo.find_by_id(d.id()).await.unwrap().unwrap();
        assert_eq!(stored.element_root(), Some(&new_root));
    }

    #[tokio::test]
    async fn render_document_requires_active_tree() {
        let d = draft("1");
        let pipeline = pipeline_with(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            Arc::new(MockSchemaParser::new()),
        );

        let result = pipeline.render_document(&d).await;
        assert!(matches!(result, Err(DraftError::Validation { .. })));
    }

    #[tokio::test]
    async fn fetch_for_write_applies_ownership_gate() {
        let d = draft("1");
        let pipeline = pipeline_with(
            Arc::new(InMemoryDraftRepository::with_drafts(vec![d.clone()])),
            Arc::new(MockSchemaParser::new()),
        );

        assert!(pipeline.fetch_for_write(d.id(), &actor("1")).await.is_ok());
        let denied = pipeline.fetch_for_write(d.id(), &actor("2")).await;
        assert!(matches!(denied, Err(DraftError::AccessControl(_))));
    }
}
