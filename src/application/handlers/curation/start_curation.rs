//! StartCurationHandler - open a curation session.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{
    AccessControlError, DraftId, RequestUser, TemplateId,
};
use crate::ports::{DraftRepository, SchemaValidator, TemplateStore};

/// How the session starts.
#[derive(Debug, Clone)]
pub enum StartMode {
    /// A blank document with the given name.
    New { name: String },
    /// An uploaded document; must be well-formed.
    Upload { filename: String, content: String },
    /// Reopen an existing draft.
    Open { draft_id: DraftId },
}

/// Handler for starting a curation session.
pub struct StartCurationHandler {
    repo: Arc<dyn DraftRepository>,
    templates: Arc<dyn TemplateStore>,
    validator: Arc<dyn SchemaValidator>,
}

impl StartCurationHandler {
    pub fn new(
        repo: Arc<dyn DraftRepository>,
        templates: Arc<dyn TemplateStore>,
        validator: Arc<dyn SchemaValidator>,
    ) -> Self {
        Self {
            repo,
            templates,
            validator,
        }
    }

    /// Returns the draft to enter.
    ///
    /// # Errors
    ///
    /// - `DoesNotExist` if the template is unknown
    /// - `Validation` if an uploaded file is not well-formed
    /// - `NotUnique` on a name collision
    /// - `AccessControl` for anonymous users, or when reopening a draft the
    ///   user doesn't own
    pub async fn handle(
        &self,
        template_id: &TemplateId,
        mode: StartMode,
        user: &RequestUser,
    ) -> Result<Draft, DraftError> {
        let owner = user
            .id()
            .cloned()
            .ok_or_else(AccessControlError::insufficient_rights)?;

        self.templates.get(template_id).await?;

        match mode {
            StartMode::New { name } => {
                let draft = Draft::new(DraftId::new(), owner, *template_id, name)?;
                self.repo.insert(&draft).await?;
                tracing::info!(draft_id = %draft.id(), "curation started from blank form");
                Ok(draft)
            }
            StartMode::Upload { filename, content } => {
                if !self.validator.is_well_formed(&content).await? {
                    return Err(DraftError::validation(
                        "file",
                        "Uploaded file is not well-formed.",
                    ));
                }
                let mut draft = Draft::new(DraftId::new(), owner, *template_id, filename)?;
                draft.set_form_string(Some(content));
                self.repo.insert(&draft).await?;
                tracing::info!(draft_id = %draft.id(), "curation started from upload");
                Ok(draft)
            }
            StartMode::Open { draft_id } => {
                let draft = self
                    .repo
                    .find_by_id(&draft_id)
                    .await?
                    .ok_or_else(|| DraftError::not_found(draft_id))?;
                access::check_can_read(user, &draft)?;
                Ok(draft)
            }
        }
    }
}
