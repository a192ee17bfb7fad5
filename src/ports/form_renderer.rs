//! Form renderer port.
//!
//! Two renderings of the same element tree: the HTML form shown to the user
//! while editing, and the document (XML or JSON text) that gets validated,
//! checkpointed as `form_string`, and eventually published.

use crate::domain::foundation::{DomainError, ElementId};
use async_trait::async_trait;

/// Port for the renderer collaborator.
#[async_trait]
pub trait FormRenderer: Send + Sync {
    /// Render the element tree as an HTML form.
    async fn render_form(&self, root: &ElementId) -> Result<String, DomainError>;

    /// Render the element tree as document text.
    ///
    /// The element tree is the source of truth while editing; this is the
    /// only way to turn it back into a saved representation.
    async fn render_document(&self, root: &ElementId) -> Result<String, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn form_renderer_is_object_safe() {
        fn _accepts_dyn(_renderer: &dyn FormRenderer) {}
    }
}
