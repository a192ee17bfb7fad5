//! Schema parser port.
//!
//! The parser collaborator owns the recursive schema-to-form generation and
//! the database-backed element tree. This crate never looks inside the tree;
//! it only asks for a root to be generated, for absent branches to be
//! expanded, and for subtrees to be deleted.

use crate::domain::foundation::{DomainError, ElementId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Outcome of removing a repeated element from the form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum RemoveOutcome {
    /// The element was removed; the remaining occurrences stand.
    Removed,
    /// The element is at its minimum occurrence count and was not removed.
    AtMinimum,
    /// The element was removed and its parent branch must be re-rendered.
    Rerender { html: String },
}

/// Port for the schema parser collaborator.
#[async_trait]
pub trait SchemaParser: Send + Sync {
    /// Generate an element tree for a schema, optionally seeded with an
    /// existing document, and return the root element id.
    ///
    /// # Errors
    ///
    /// - `ParserError` if the schema or seed document cannot be parsed
    async fn generate_form(
        &self,
        schema: &str,
        document: Option<&str>,
    ) -> Result<ElementId, DomainError>;

    /// Expand a choice branch that is absent from the form, returning the
    /// rendered HTML for the new branch.
    async fn generate_choice_absent(
        &self,
        element_id: &ElementId,
        schema: &str,
    ) -> Result<String, DomainError>;

    /// Expand an element that is absent from the form, returning the
    /// rendered HTML for the new element.
    async fn generate_element_absent(
        &self,
        element_id: &ElementId,
        schema: &str,
    ) -> Result<String, DomainError>;

    /// Remove a repeated element occurrence from the form.
    async fn remove_element(&self, element_id: &ElementId) -> Result<RemoveOutcome, DomainError>;

    /// Delete an element subtree, root included.
    async fn delete_branch(&self, root: &ElementId) -> Result<(), DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn schema_parser_is_object_safe() {
        fn _accepts_dyn(_parser: &dyn SchemaParser) {}
    }

    #[test]
    fn remove_outcome_serializes_with_tag() {
        let json = serde_json::to_string(&RemoveOutcome::Rerender {
            html: "<ul></ul>".to_string(),
        })
        .unwrap();
        assert!(json.contains("\"outcome\":\"rerender\""));
    }
}
