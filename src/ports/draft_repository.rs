//! Draft repository port.
//!
//! Defines the contract for persisting and retrieving Draft aggregates.
//! Implementations handle the actual database operations.
//!
//! # Design
//!
//! - **User-scoped**: most queries filter by owner
//! - **Uniqueness**: `(user, template, name)` collisions must surface as
//!   `NotUnique` so the service layer can translate them to 400

use crate::domain::draft::Draft;
use crate::domain::foundation::{DataId, DomainError, DraftId, TemplateId, UserId};
use async_trait::async_trait;

/// Repository port for Draft aggregate persistence.
#[async_trait]
pub trait DraftRepository: Send + Sync {
    /// Insert a new draft.
    ///
    /// # Errors
    ///
    /// - `NotUnique` if `(user, template, name)` already exists
    /// - `DatabaseError` on persistence failure
    async fn insert(&self, draft: &Draft) -> Result<(), DomainError>;

    /// Update an existing draft.
    ///
    /// # Errors
    ///
    /// - `DraftNotFound` if the draft doesn't exist
    /// - `NotUnique` if a rename collides with an existing draft
    /// - `DatabaseError` on persistence failure
    async fn update(&self, draft: &Draft) -> Result<(), DomainError>;

    /// Find a draft by its ID. Returns `None` if not found.
    async fn find_by_id(&self, id: &DraftId) -> Result<Option<Draft>, DomainError>;

    /// All drafts, every user (administrative).
    async fn find_all(&self) -> Result<Vec<Draft>, DomainError>;

    /// All drafts owned by a user, most recently updated first.
    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Draft>, DomainError>;

    /// All drafts owned by a user for a given template.
    async fn find_by_user_and_template(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<Vec<Draft>, DomainError>;

    /// Drafts owned by a user for a template that are not linked to a Data
    /// record (the "open an existing form" list).
    async fn find_by_user_and_template_with_no_data(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<Vec<Draft>, DomainError>;

    /// Exact lookup by owner, template, and name.
    async fn find_by_user_and_template_and_name(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
        name: &str,
    ) -> Result<Option<Draft>, DomainError>;

    /// All drafts not linked to a Data record, every user (administrative).
    async fn find_all_with_no_data(&self) -> Result<Vec<Draft>, DomainError>;

    /// Drafts of every user except one, not linked to a Data record
    /// (administrative).
    async fn find_all_except_user_with_no_data(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Draft>, DomainError>;

    /// All drafts referencing the given Data record.
    async fn find_by_data(&self, data_id: &DataId) -> Result<Vec<Draft>, DomainError>;

    /// Delete a draft.
    ///
    /// # Errors
    ///
    /// - `DraftNotFound` if the draft doesn't exist
    /// - `DatabaseError` on persistence failure
    async fn delete(&self, id: &DraftId) -> Result<(), DomainError>;
}
