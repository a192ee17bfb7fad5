//! ValidateFormHandler - check the current document against the schema.

use std::sync::Arc;

use crate::domain::draft::DraftError;
use crate::domain::foundation::{DraftId, RequestUser};
use crate::ports::SchemaValidator;

use super::FormPipeline;

/// Handler for schema validation of the current form.
///
/// Renders the element tree and validates the result against the template's
/// schema. Returns the list of human-readable errors, empty when the
/// document is valid. Nothing persisted is mutated.
pub struct ValidateFormHandler {
    pipeline: FormPipeline,
    validator: Arc<dyn SchemaValidator>,
}

impl ValidateFormHandler {
    pub fn new(pipeline: FormPipeline, validator: Arc<dyn SchemaValidator>) -> Self {
        Self {
            pipeline,
            validator,
        }
    }

    pub async fn handle(
        &self,
        draft_id: &DraftId,
        user: &RequestUser,
    ) -> Result<Vec<String>, DraftError> {
        let draft = self.pipeline.fetch_for_read(draft_id, user).await?;
        let template = self.pipeline.template_for(&draft).await?;
        let document = self.pipeline.render_document(&draft).await?;

        Ok(self.validator.validate(&template.content, &document).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{
        InMemoryDraftRepository, InMemoryTemplateStore, MockFormRenderer, MockSchemaParser,
        MockSchemaValidator,
    };
    use crate::domain::draft::Draft;
    use crate::domain::foundation::{AuthenticatedUser, ElementId, TemplateId, UserId};
    use crate::ports::Template;

    fn actor(id: &str) -> RequestUser {
        RequestUser::authenticated(AuthenticatedUser::new(UserId::new(id).unwrap(), false, vec![]))
    }

    fn handler_with(validator: MockSchemaValidator, drafts: Vec<Draft>, t: Template) -> ValidateFormHandler {
        ValidateFormHandler::new(
            FormPipeline::new(
                Arc::new(InMemoryDraftRepository::with_drafts(drafts)),
                Arc::new(MockSchemaParser::new()),
                Arc::new(MockFormRenderer::new()),
                Arc::new(InMemoryTemplateStore::new().with_template(t)),
            ),
            Arc::new(validator),
        )
    }

    fn template() -> Template {
        Template {
            id: TemplateId::from_uuid(uuid::Uuid::new_v4()),
            filename: "schema.xsd".to_string(),
            content: "<xs:schema/>".to_string(),
        }
    }

    fn draft_with_root(template: &Template) -> Draft {
        let mut d = Draft::new(
            DraftId::new(),
            UserId::new("1").unwrap(),
            template.id,
            "doc1",
        )
        .unwrap();
        d.set_element_root(Some(ElementId::from_uuid(uuid::Uuid::new_v4())));
        d
    }

    #[tokio::test]
    async fn valid_document_returns_no_errors() {
        let t = template();
        let d = draft_with_root(&t);
        let handler = handler_with(MockSchemaValidator::new(), vec![d.clone()], t);

        let errors = handler.handle(d.id(), &actor("1")).await.unwrap();
        assert!(errors.is_empty());
    }

    #[tokio::test]
    async fn schema_violations_are_reported_as_messages() {
        let t = template();
        let d = draft_with_root(&t);
        let handler = handler_with(
            MockSchemaValidator::with_errors(vec!["missing element 'title'".to_string()]),
            vec![d.clone()],
            t,
        );

        let errors = handler.handle(d.id(), &actor("1")).await.unwrap();
        assert_eq!(errors, vec!["missing element 'title'".to_string()]);
    }
}
