//! Data store port.
//!
//! CRUD on finalized Data records, owned by the host content-management
//! system. The host enforces its own write permissions; a draft linked to
//! existing Data therefore defers to the Data's own access rules when
//! publishing, and a denial comes back as `Forbidden`.

use crate::domain::foundation::{DataId, DomainError, TemplateId, UserId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A finalized Data record held by the host system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataRecord {
    /// Identifier, `None` until the host system assigns one.
    pub id: Option<DataId>,
    /// Document title.
    pub title: String,
    /// Template the document conforms to.
    pub template: TemplateId,
    /// Owning user in the host system.
    pub user_id: UserId,
    /// Document content (XML or JSON text).
    pub content: String,
}

/// Port for the host system's Data CRUD API.
#[async_trait]
pub trait DataStore: Send + Sync {
    /// Fetch a Data record.
    ///
    /// # Errors
    ///
    /// - `DataNotFound` if no record has that id
    /// - `Forbidden` if the user may not read it
    async fn get(&self, data_id: &DataId, user_id: &UserId) -> Result<DataRecord, DomainError>;

    /// Create or update a Data record, returning its id.
    ///
    /// # Errors
    ///
    /// - `Forbidden` if the user may not write the record
    async fn upsert(&self, record: DataRecord, user_id: &UserId) -> Result<DataId, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn data_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn DataStore) {}
    }
}
