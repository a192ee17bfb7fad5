//! ListDraftsHandler - user-scoped draft listings.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{AccessControlError, RequestUser, TemplateId};
use crate::ports::DraftRepository;

/// Query for the acting user's drafts.
#[derive(Debug, Clone, Default)]
pub struct ListDraftsQuery {
    /// Restrict to one template.
    pub template_id: Option<TemplateId>,
    /// Restrict to drafts not linked to a Data record.
    pub no_data: bool,
}

/// Handler for user-scoped listings.
///
/// The filter is built from the acting user's own id, and the read gate
/// still runs over the result afterwards; the gate rejects the whole result
/// set if any record slipped in that the user does not own.
pub struct ListDraftsHandler {
    repo: Arc<dyn DraftRepository>,
}

impl ListDraftsHandler {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - `AccessControl` if the user is anonymous
    pub async fn handle(
        &self,
        query: ListDraftsQuery,
        user: &RequestUser,
    ) -> Result<Vec<Draft>, DraftError> {
        let owner = user
            .id()
            .ok_or_else(AccessControlError::insufficient_rights)?;

        let mut drafts = match query.template_id {
            Some(template_id) if query.no_data => {
                self.repo
                    .find_by_user_and_template_with_no_data(owner, &template_id)
                    .await?
            }
            Some(template_id) => {
                self.repo
                    .find_by_user_and_template(owner, &template_id)
                    .await?
            }
            None => self.repo.find_by_user(owner).await?,
        };
        if query.template_id.is_none() && query.no_data {
            drafts.retain(|d| d.data().is_none());
        }

        access::check_can_read_all(user, &drafts)?;
        Ok(drafts)
    }
}
