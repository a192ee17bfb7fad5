//! Template store port.

use crate::domain::foundation::{DomainError, TemplateId};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// A schema template held by the host system.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Template {
    pub id: TemplateId,
    /// Original upload filename, used for downloads.
    pub filename: String,
    /// Schema content (XSD or JSON Schema text).
    pub content: String,
}

/// Port for the host system's Template API.
#[async_trait]
pub trait TemplateStore: Send + Sync {
    /// Fetch a template.
    ///
    /// # Errors
    ///
    /// - `TemplateNotFound` if no template has that id
    async fn get(&self, template_id: &TemplateId) -> Result<Template, DomainError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn template_store_is_object_safe() {
        fn _accepts_dyn(_store: &dyn TemplateStore) {}
    }
}
