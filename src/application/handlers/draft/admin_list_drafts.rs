//! AdminListDraftsHandler - administrative listings across all users.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::{Draft, DraftError};
use crate::domain::foundation::{RequestUser, UserId};
use crate::ports::DraftRepository;

/// Query for administrative listings.
#[derive(Debug, Clone, Default)]
pub struct AdminListDraftsQuery {
    /// Restrict to drafts not linked to a Data record.
    pub no_data: bool,
    /// Exclude one user's drafts (implies `no_data`, mirroring the
    /// orphan-review listing).
    pub except_user: Option<UserId>,
}

/// Handler for superuser-only listings.
pub struct AdminListDraftsHandler {
    repo: Arc<dyn DraftRepository>,
}

impl AdminListDraftsHandler {
    pub fn new(repo: Arc<dyn DraftRepository>) -> Self {
        Self { repo }
    }

    /// # Errors
    ///
    /// - `AccessControl` unless the acting user is a superuser
    pub async fn handle(
        &self,
        query: AdminListDraftsQuery,
        user: &RequestUser,
    ) -> Result<Vec<Draft>, DraftError> {
        access::check_superuser(user)?;

        let drafts = match query.except_user {
            Some(excluded) => {
                self.repo
                    .find_all_except_user_with_no_data(&excluded)
                    .await?
            }
            None if query.no_data => self.repo.find_all_with_no_data().await?,
            None => self.repo.find_all().await?,
        };
        Ok(drafts)
    }
}
