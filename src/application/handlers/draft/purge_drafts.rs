//! PurgeDraftsHandler - administrative cleanup of a Data record's drafts.

use std::sync::Arc;

use crate::application::access;
use crate::domain::draft::DraftError;
use crate::domain::foundation::{AccessControlError, DataId, RequestUser};
use crate::ports::{DataStore, DraftRepository, SchemaParser};

/// Handler for deleting every draft tied to a Data record.
///
/// Used by administrators to clean up drafts left behind when a Data record
/// is retired. The Data record must still resolve; a missing record surfaces
/// as 404 so the admin UI can tell the operator to refresh.
pub struct PurgeDraftsHandler {
    repo: Arc<dyn DraftRepository>,
    parser: Arc<dyn SchemaParser>,
    data_store: Arc<dyn DataStore>,
}

impl PurgeDraftsHandler {
    pub fn new(
        repo: Arc<dyn DraftRepository>,
        parser: Arc<dyn SchemaParser>,
        data_store: Arc<dyn DataStore>,
    ) -> Self {
        Self {
            repo,
            parser,
            data_store,
        }
    }

    /// Returns the number of drafts removed.
    ///
    /// # Errors
    ///
    /// - `AccessControl` unless the acting user is a superuser
    /// - `DoesNotExist` if the Data record is gone
    pub async fn handle(&self, data_id: &DataId, user: &RequestUser) -> Result<usize, DraftError> {
        access::check_superuser(user)?;
        let acting = user
            .id()
            .ok_or_else(AccessControlError::insufficient_rights)?;

        self.data_store.get(data_id, acting).await?;

        let drafts = self.repo.find_by_data(data_id).await?;
        let count = drafts.len();
        for draft in drafts {
            if let Some(root) = draft.element_root() {
                self.parser.delete_branch(root).await?;
            }
            self.repo.delete(draft.id()).await?;
        }
        tracing::info!(data_id = %data_id, count, "purged drafts for data record");
        Ok(count)
    }
}
