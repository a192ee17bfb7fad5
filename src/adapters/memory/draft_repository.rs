//! In-memory implementation of DraftRepository.

use std::sync::Mutex;

use async_trait::async_trait;

use crate::domain::draft::Draft;
use crate::domain::foundation::{DataId, DomainError, DraftId, ErrorCode, TemplateId, UserId};
use crate::ports::DraftRepository;

/// In-memory DraftRepository backed by a mutex-guarded vector.
#[derive(Default)]
pub struct InMemoryDraftRepository {
    drafts: Mutex<Vec<Draft>>,
}

impl InMemoryDraftRepository {
    /// Creates an empty repository.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a repository seeded with drafts.
    pub fn with_drafts(drafts: Vec<Draft>) -> Self {
        Self {
            drafts: Mutex::new(drafts),
        }
    }

    /// Number of stored drafts.
    pub fn len(&self) -> usize {
        self.drafts.lock().unwrap().len()
    }

    /// True if no drafts are stored.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn name_taken(&self, drafts: &[Draft], candidate: &Draft) -> bool {
        drafts.iter().any(|d| {
            d.id() != candidate.id()
                && d.user() == candidate.user()
                && d.template() == candidate.template()
                && d.name() == candidate.name()
        })
    }
}

#[async_trait]
impl DraftRepository for InMemoryDraftRepository {
    async fn insert(&self, draft: &Draft) -> Result<(), DomainError> {
        let mut drafts = self.drafts.lock().unwrap();
        if self.name_taken(&drafts, draft) {
            return Err(DomainError::new(
                ErrorCode::NotUnique,
                format!("A draft named '{}' already exists.", draft.name()),
            ));
        }
        drafts.push(draft.clone());
        Ok(())
    }

    async fn update(&self, draft: &Draft) -> Result<(), DomainError> {
        let mut drafts = self.drafts.lock().unwrap();
        if self.name_taken(&drafts, draft) {
            return Err(DomainError::new(
                ErrorCode::NotUnique,
                format!("A draft named '{}' already exists.", draft.name()),
            ));
        }
        match drafts.iter().position(|d| d.id() == draft.id()) {
            Some(pos) => {
                drafts[pos] = draft.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DraftNotFound,
                format!("Draft not found: {}", draft.id()),
            )),
        }
    }

    async fn find_by_id(&self, id: &DraftId) -> Result<Option<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.id() == id)
            .cloned())
    }

    async fn find_all(&self) -> Result<Vec<Draft>, DomainError> {
        Ok(self.drafts.lock().unwrap().clone())
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Draft>, DomainError> {
        let mut found: Vec<Draft> = self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user() == user_id)
            .cloned()
            .collect();
        found.sort_by(|a, b| b.updated_at().cmp(a.updated_at()));
        Ok(found)
    }

    async fn find_by_user_and_template(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<Vec<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user() == user_id && d.template() == template_id)
            .cloned()
            .collect())
    }

    async fn find_by_user_and_template_with_no_data(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<Vec<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user() == user_id && d.template() == template_id && d.data().is_none())
            .cloned()
            .collect())
    }

    async fn find_by_user_and_template_and_name(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
        name: &str,
    ) -> Result<Option<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .find(|d| d.user() == user_id && d.template() == template_id && d.name() == name)
            .cloned())
    }

    async fn find_all_with_no_data(&self) -> Result<Vec<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.data().is_none())
            .cloned()
            .collect())
    }

    async fn find_all_except_user_with_no_data(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.user() != user_id && d.data().is_none())
            .cloned()
            .collect())
    }

    async fn find_by_data(&self, data_id: &DataId) -> Result<Vec<Draft>, DomainError> {
        Ok(self
            .drafts
            .lock()
            .unwrap()
            .iter()
            .filter(|d| d.data() == Some(data_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, id: &DraftId) -> Result<(), DomainError> {
        let mut drafts = self.drafts.lock().unwrap();
        match drafts.iter().position(|d| d.id() == id) {
            Some(pos) => {
                drafts.remove(pos);
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::DraftNotFound,
                format!("Draft not found: {}", id),
            )),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::TemplateId;

    fn draft(user: &str, template: TemplateId, name: &str) -> Draft {
        Draft::new(DraftId::new(), UserId::new(user).unwrap(), template, name).unwrap()
    }

    fn template() -> TemplateId {
        TemplateId::from_uuid(uuid::Uuid::new_v4())
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let repo = InMemoryDraftRepository::new();
        let t = template();
        let d = draft("1", t, "doc1");

        repo.insert(&d).await.unwrap();

        let found = repo.find_by_id(d.id()).await.unwrap().unwrap();
        assert_eq!(found.name(), "doc1");
        assert_eq!(found.template(), &t);
    }

    #[tokio::test]
    async fn insert_rejects_duplicate_user_template_name() {
        let repo = InMemoryDraftRepository::new();
        let t = template();
        repo.insert(&draft("1", t, "doc1")).await.unwrap();

        let err = repo.insert(&draft("1", t, "doc1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::NotUnique);
    }

    #[tokio::test]
    async fn same_name_allowed_for_different_users() {
        let repo = InMemoryDraftRepository::new();
        let t = template();
        repo.insert(&draft("1", t, "doc1")).await.unwrap();
        repo.insert(&draft("2", t, "doc1")).await.unwrap();
        assert_eq!(repo.len(), 2);
    }

    #[tokio::test]
    async fn update_of_missing_draft_fails() {
        let repo = InMemoryDraftRepository::new();
        let err = repo.update(&draft("1", template(), "doc1")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::DraftNotFound);
    }

    #[tokio::test]
    async fn no_data_filters_exclude_linked_drafts() {
        let repo = InMemoryDraftRepository::new();
        let t = template();
        let mut linked = draft("1", t, "linked");
        linked.link_data(Some(crate::domain::foundation::DataId::from_uuid(
            uuid::Uuid::new_v4(),
        )));
        repo.insert(&linked).await.unwrap();
        repo.insert(&draft("1", t, "free")).await.unwrap();

        let no_data = repo.find_all_with_no_data().await.unwrap();
        assert_eq!(no_data.len(), 1);
        assert_eq!(no_data[0].name(), "free");
    }

    #[tokio::test]
    async fn except_user_filter_excludes_owner() {
        let repo = InMemoryDraftRepository::new();
        let t = template();
        repo.insert(&draft("1", t, "mine")).await.unwrap();
        repo.insert(&draft("2", t, "theirs")).await.unwrap();

        let others = repo
            .find_all_except_user_with_no_data(&UserId::new("1").unwrap())
            .await
            .unwrap();
        assert_eq!(others.len(), 1);
        assert_eq!(others[0].name(), "theirs");
    }

    #[tokio::test]
    async fn delete_removes_draft() {
        let repo = InMemoryDraftRepository::new();
        let d = draft("1", template(), "doc1");
        repo.insert(&d).await.unwrap();

        repo.delete(d.id()).await.unwrap();
        assert!(repo.find_by_id(d.id()).await.unwrap().is_none());
    }
}
