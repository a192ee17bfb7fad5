//! GenerateAbsentHandler - expand or remove schema-driven elements.

use crate::domain::draft::DraftError;
use crate::domain::foundation::{DraftId, ElementId, RequestUser};
use crate::ports::RemoveOutcome;

use super::FormPipeline;

/// Handler for element-level form edits.
///
/// The parser owns occurrence bookkeeping; these operations just pass the
/// element and the draft's schema through and relay the rendered result.
pub struct GenerateAbsentHandler {
    pipeline: FormPipeline,
}

impl GenerateAbsentHandler {
    pub fn new(pipeline: FormPipeline) -> Self {
        Self { pipeline }
    }

    /// Expand a choice branch absent from the form.
    pub async fn generate_choice(
        &self,
        draft_id: &DraftId,
        element_id: &ElementId,
        user: &RequestUser,
    ) -> Result<String, DraftError> {
        let draft = self.pipeline.fetch_for_read(draft_id, user).await?;
        let template = self.pipeline.template_for(&draft).await?;
        Ok(self
            .pipeline
            .parser()
            .generate_choice_absent(element_id, &template.content)
            .await?)
    }

    /// Expand an element absent from the form.
    pub async fn generate_element(
        &self,
        draft_id: &DraftId,
        element_id: &ElementId,
        user: &RequestUser,
    ) -> Result<String, DraftError> {
        let draft = self.pipeline.fetch_for_read(draft_id, user).await?;
        let template = self.pipeline.template_for(&draft).await?;
        Ok(self
            .pipeline
            .parser()
            .generate_element_absent(element_id, &template.content)
            .await?)
    }

    /// Remove a repeated element occurrence.
    pub async fn remove_element(
        &self,
        draft_id: &DraftId,
        element_id: &ElementId,
        user: &RequestUser,
    ) -> Result<RemoveOutcome, DraftError> {
        self.pipeline.fetch_for_read(draft_id, user).await?;
        Ok(self.pipeline.parser().remove_element(element_id).await?)
    }
}
