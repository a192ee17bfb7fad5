//! DownloadHandler - export the current document or its template.

use crate::domain::draft::DraftError;
use crate::domain::foundation::{DraftId, RequestUser};

use super::FormPipeline;

/// A file ready to be sent as an attachment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Attachment {
    pub filename: String,
    pub content_type: String,
    pub content: String,
}

/// Handler for downloads from a curation session.
pub struct DownloadHandler {
    pipeline: FormPipeline,
}

impl DownloadHandler {
    pub fn new(pipeline: FormPipeline) -> Self {
        Self { pipeline }
    }

    /// Download the draft's current document.
    ///
    /// Rendered from the active element tree; falls back to the last saved
    /// `form_string` when no tree is active.
    pub async fn document(
        &self,
        draft_id: &DraftId,
        user: &RequestUser,
    ) -> Result<Attachment, DraftError> {
        let draft = self.pipeline.fetch_for_read(draft_id, user).await?;
        let template = self.pipeline.template_for(&draft).await?;

        let content = if draft.element_root().is_some() {
            self.pipeline.render_document(&draft).await?
        } else {
            draft
                .form_string()
                .map(|s| s.to_string())
                .ok_or_else(|| {
                    DraftError::validation("form_string", "The draft has no content to download.")
                })?
        };

        let (content_type, extension) = content_kind(&template.filename);
        Ok(Attachment {
            filename: format!("{}.{}", draft.name(), extension),
            content_type: content_type.to_string(),
            content,
        })
    }

    /// Download the draft's template schema.
    pub async fn template(
        &self,
        draft_id: &DraftId,
        user: &RequestUser,
    ) -> Result<Attachment, DraftError> {
        let draft = self.pipeline.fetch_for_read(draft_id, user).await?;
        let template = self.pipeline.template_for(&draft).await?;

        let content_type = if template.filename.ends_with(".json") {
            "application/schema+json"
        } else {
            "application/xml"
        };
        Ok(Attachment {
            filename: template.filename,
            content_type: content_type.to_string(),
            content: template.content,
        })
    }
}

/// Media type and file extension for a document, derived from the template's
/// schema family.
fn content_kind(template_filename: &str) -> (&'static str, &'static str) {
    if template_filename.ends_with(".json") {
        ("application/json", "json")
    } else {
        ("application/xml", "xml")
    }
}
