//! Schema validator port.

use crate::domain::foundation::DomainError;
use async_trait::async_trait;

/// Port for validating documents against a template schema.
#[async_trait]
pub trait SchemaValidator: Send + Sync {
    /// Validate a document against a schema.
    ///
    /// Returns the list of human-readable validation errors; an empty list
    /// means the document is valid. Does not mutate anything.
    async fn validate(&self, schema: &str, document: &str) -> Result<Vec<String>, DomainError>;

    /// Check that a document is well-formed (parseable at all), without
    /// validating it against a schema.
    async fn is_well_formed(&self, document: &str) -> Result<bool, DomainError>;
}
