//! In-memory collaborator implementations.
//!
//! Canned stand-ins for the parser, renderer, validator, lock, Data, and
//! Template collaborators.

use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::domain::foundation::{DataId, DomainError, ElementId, ErrorCode, TemplateId, UserId};
use crate::ports::{
    DataRecord, DataStore, FormRenderer, LockService, RemoveOutcome, SchemaParser,
    SchemaValidator, Template, TemplateStore,
};

// ════════════════════════════════════════════════════════════════════════════
// Schema parser
// ════════════════════════════════════════════════════════════════════════════

/// Mock schema parser that fabricates element roots and records branch
/// deletions for assertions.
#[derive(Default)]
pub struct MockSchemaParser {
    deleted: Mutex<Vec<ElementId>>,
    remove_outcome: Option<RemoveOutcome>,
}

impl MockSchemaParser {
    pub fn new() -> Self {
        Self::default()
    }

    /// Configure the outcome reported by `remove_element`.
    pub fn with_remove_outcome(mut self, outcome: RemoveOutcome) -> Self {
        self.remove_outcome = Some(outcome);
        self
    }

    /// Roots whose branches were deleted, in order.
    pub fn deleted_branches(&self) -> Vec<ElementId> {
        self.deleted.lock().unwrap().clone()
    }
}

#[async_trait]
impl SchemaParser for MockSchemaParser {
    async fn generate_form(
        &self,
        _schema: &str,
        _document: Option<&str>,
    ) -> Result<ElementId, DomainError> {
        Ok(ElementId::from_uuid(Uuid::new_v4()))
    }

    async fn generate_choice_absent(
        &self,
        element_id: &ElementId,
        _schema: &str,
    ) -> Result<String, DomainError> {
        Ok(format!("<ul data-choice=\"{}\"></ul>", element_id))
    }

    async fn generate_element_absent(
        &self,
        element_id: &ElementId,
        _schema: &str,
    ) -> Result<String, DomainError> {
        Ok(format!("<li data-element=\"{}\"></li>", element_id))
    }

    async fn remove_element(&self, _element_id: &ElementId) -> Result<RemoveOutcome, DomainError> {
        Ok(self
            .remove_outcome
            .clone()
            .unwrap_or(RemoveOutcome::Removed))
    }

    async fn delete_branch(&self, root: &ElementId) -> Result<(), DomainError> {
        self.deleted.lock().unwrap().push(*root);
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Renderer and validator
// ════════════════════════════════════════════════════════════════════════════

/// Mock renderer returning canned output.
pub struct MockFormRenderer {
    document: String,
}

impl MockFormRenderer {
    pub fn new() -> Self {
        Self {
            document: "<root/>".to_string(),
        }
    }

    /// Configure the document text returned by `render_document`.
    pub fn with_document(mut self, document: impl Into<String>) -> Self {
        self.document = document.into();
        self
    }
}

impl Default for MockFormRenderer {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl FormRenderer for MockFormRenderer {
    async fn render_form(&self, root: &ElementId) -> Result<String, DomainError> {
        Ok(format!("<form data-root=\"{}\"></form>", root))
    }

    async fn render_document(&self, _root: &ElementId) -> Result<String, DomainError> {
        Ok(self.document.clone())
    }
}

/// Mock validator with configurable verdicts.
pub struct MockSchemaValidator {
    errors: Vec<String>,
    well_formed: bool,
}

impl MockSchemaValidator {
    /// Validator that accepts everything.
    pub fn new() -> Self {
        Self {
            errors: vec![],
            well_formed: true,
        }
    }

    /// Validator reporting the given schema errors.
    pub fn with_errors(errors: Vec<String>) -> Self {
        Self {
            errors,
            well_formed: true,
        }
    }

    /// Validator that rejects every document as malformed.
    pub fn rejecting_uploads() -> Self {
        Self {
            errors: vec![],
            well_formed: false,
        }
    }
}

impl Default for MockSchemaValidator {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SchemaValidator for MockSchemaValidator {
    async fn validate(&self, _schema: &str, _document: &str) -> Result<Vec<String>, DomainError> {
        Ok(self.errors.clone())
    }

    async fn is_well_formed(&self, _document: &str) -> Result<bool, DomainError> {
        Ok(self.well_formed)
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Lock service
// ════════════════════════════════════════════════════════════════════════════

/// In-memory advisory lock table.
#[derive(Default)]
pub struct InMemoryLockService {
    locks: Mutex<HashMap<DataId, UserId>>,
}

impl InMemoryLockService {
    pub fn new() -> Self {
        Self::default()
    }

    /// True if any user holds a lock on the Data record.
    pub fn is_locked(&self, data_id: &DataId) -> bool {
        self.locks.lock().unwrap().contains_key(data_id)
    }
}

#[async_trait]
impl LockService for InMemoryLockService {
    async fn lock(&self, data_id: &DataId, user_id: &UserId) -> Result<(), DomainError> {
        let mut locks = self.locks.lock().unwrap();
        match locks.get(data_id) {
            Some(holder) if holder != user_id => Err(DomainError::new(
                ErrorCode::Locked,
                "The document is locked by another user.",
            )),
            _ => {
                locks.insert(*data_id, user_id.clone());
                Ok(())
            }
        }
    }

    async fn unlock(&self, data_id: &DataId, user_id: &UserId) -> Result<(), DomainError> {
        let mut locks = self.locks.lock().unwrap();
        if locks.get(data_id) == Some(user_id) {
            locks.remove(data_id);
        }
        Ok(())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Data and template stores
// ════════════════════════════════════════════════════════════════════════════

/// In-memory Data record store.
#[derive(Default)]
pub struct InMemoryDataStore {
    records: Mutex<HashMap<DataId, DataRecord>>,
}

impl InMemoryDataStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a record (its id must be set).
    pub fn with_record(self, record: DataRecord) -> Self {
        let id = record.id.expect("seeded record needs an id");
        self.records.lock().unwrap().insert(id, record);
        self
    }

    /// Number of stored records.
    pub fn len(&self) -> usize {
        self.records.lock().unwrap().len()
    }

    /// True if the store holds no records.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl DataStore for InMemoryDataStore {
    async fn get(&self, data_id: &DataId, _user_id: &UserId) -> Result<DataRecord, DomainError> {
        self.records
            .lock()
            .unwrap()
            .get(data_id)
            .cloned()
            .ok_or_else(|| {
                DomainError::new(
                    ErrorCode::DataNotFound,
                    format!("Data not found: {}", data_id),
                )
            })
    }

    async fn upsert(&self, record: DataRecord, _user_id: &UserId) -> Result<DataId, DomainError> {
        let mut records = self.records.lock().unwrap();
        let id = record
            .id
            .unwrap_or_else(|| DataId::from_uuid(Uuid::new_v4()));
        let mut stored = record;
        stored.id = Some(id);
        records.insert(id, stored);
        Ok(id)
    }
}

/// In-memory Template store.
#[derive(Default)]
pub struct InMemoryTemplateStore {
    templates: HashMap<TemplateId, Template>,
}

impl InMemoryTemplateStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store with a template.
    pub fn with_template(mut self, template: Template) -> Self {
        self.templates.insert(template.id, template);
        self
    }
}

#[async_trait]
impl TemplateStore for InMemoryTemplateStore {
    async fn get(&self, template_id: &TemplateId) -> Result<Template, DomainError> {
        self.templates.get(template_id).cloned().ok_or_else(|| {
            DomainError::new(
                ErrorCode::TemplateNotFound,
                format!("Template not found: {}", template_id),
            )
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn data_id() -> DataId {
        DataId::from_uuid(Uuid::new_v4())
    }

    fn user(id: &str) -> UserId {
        UserId::new(id).unwrap()
    }

    #[tokio::test]
    async fn lock_is_exclusive_between_users() {
        let locks = InMemoryLockService::new();
        let data = data_id();

        locks.lock(&data, &user("1")).await.unwrap();
        let err = locks.lock(&data, &user("2")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::Locked);
    }

    #[tokio::test]
    async fn lock_is_reentrant_for_holder() {
        let locks = InMemoryLockService::new();
        let data = data_id();

        locks.lock(&data, &user("1")).await.unwrap();
        locks.lock(&data, &user("1")).await.unwrap();
    }

    #[tokio::test]
    async fn unlock_by_non_holder_keeps_lock() {
        let locks = InMemoryLockService::new();
        let data = data_id();

        locks.lock(&data, &user("1")).await.unwrap();
        locks.unlock(&data, &user("2")).await.unwrap();
        assert!(locks.is_locked(&data));
    }

    #[tokio::test]
    async fn data_store_assigns_id_on_create() {
        let store = InMemoryDataStore::new();
        let id = store
            .upsert(
                DataRecord {
                    id: None,
                    title: "doc1".to_string(),
                    template: TemplateId::from_uuid(Uuid::new_v4()),
                    user_id: user("1"),
                    content: "<root/>".to_string(),
                },
                &user("1"),
            )
            .await
            .unwrap();

        let fetched = store.get(&id, &user("1")).await.unwrap();
        assert_eq!(fetched.title, "doc1");
    }

    #[tokio::test]
    async fn template_store_reports_missing_template() {
        let store = InMemoryTemplateStore::new();
        let err = store
            .get(&TemplateId::from_uuid(Uuid::new_v4()))
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::TemplateNotFound);
    }

    #[tokio::test]
    async fn parser_records_deleted_branches() {
        let parser = MockSchemaParser::new();
        let root = ElementId::from_uuid(Uuid::new_v4());
        parser.delete_branch(&root).await.unwrap();
        assert_eq!(parser.deleted_branches(), vec![root]);
    }
}
