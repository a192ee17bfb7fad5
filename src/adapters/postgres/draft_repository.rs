//! PostgreSQL implementation of DraftRepository.

use async_trait::async_trait;
use sqlx::{postgres::PgRow, PgPool, Row};
use uuid::Uuid;

use crate::domain::draft::Draft;
use crate::domain::foundation::{
    DataId, DomainError, DraftId, ElementId, ErrorCode, TemplateId, Timestamp, UserId,
};
use crate::ports::DraftRepository;

/// Postgres error code for unique constraint violations.
const UNIQUE_VIOLATION: &str = "23505";

/// PostgreSQL implementation of DraftRepository.
///
/// The `(user_id, template_id, name)` unique index backs the NotUnique
/// contract of the port.
#[derive(Clone)]
pub struct PostgresDraftRepository {
    pool: PgPool,
}

impl PostgresDraftRepository {
    /// Creates a new PostgresDraftRepository.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

const SELECT_COLUMNS: &str = "id, user_id, template_id, name, form_string, element_root, data_id, \
                              created_at, updated_at";

#[async_trait]
impl DraftRepository for PostgresDraftRepository {
    async fn insert(&self, draft: &Draft) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO drafts (
                id, user_id, template_id, name, form_string, element_root, data_id,
                created_at, updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(draft.id().as_uuid())
        .bind(draft.user().as_str())
        .bind(draft.template().as_uuid())
        .bind(draft.name())
        .bind(draft.form_string())
        .bind(draft.element_root().map(|r| *r.as_uuid()))
        .bind(draft.data().map(|d| *d.as_uuid()))
        .bind(draft.created_at().as_datetime())
        .bind(draft.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("insert", e))?;

        Ok(())
    }

    async fn update(&self, draft: &Draft) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE drafts SET
                user_id = $2,
                name = $3,
                form_string = $4,
                element_root = $5,
                data_id = $6,
                updated_at = $7
            WHERE id = $1
            "#,
        )
        .bind(draft.id().as_uuid())
        .bind(draft.user().as_str())
        .bind(draft.name())
        .bind(draft.form_string())
        .bind(draft.element_root().map(|r| *r.as_uuid()))
        .bind(draft.data().map(|d| *d.as_uuid()))
        .bind(draft.updated_at().as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| write_error("update", e))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DraftNotFound,
                format!("Draft not found: {}", draft.id()),
            ));
        }

        Ok(())
    }

    async fn find_by_id(&self, id: &DraftId) -> Result<Option<Draft>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE id = $1",
            SELECT_COLUMNS
        ))
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch draft: {}", e)))?;

        row.map(row_to_draft).transpose()
    }

    async fn find_all(&self) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn find_by_user(&self, user_id: &UserId) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE user_id = $1 ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts by user: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn find_by_user_and_template(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE user_id = $1 AND template_id = $2 \
             ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(template_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn find_by_user_and_template_with_no_data(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
    ) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts \
             WHERE user_id = $1 AND template_id = $2 AND data_id IS NULL \
             ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(template_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn find_by_user_and_template_and_name(
        &self,
        user_id: &UserId,
        template_id: &TemplateId,
        name: &str,
    ) -> Result<Option<Draft>, DomainError> {
        let row = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE user_id = $1 AND template_id = $2 AND name = $3",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .bind(template_id.as_uuid())
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch draft: {}", e)))?;

        row.map(row_to_draft).transpose()
    }

    async fn find_all_with_no_data(&self) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE data_id IS NULL ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn find_all_except_user_with_no_data(
        &self,
        user_id: &UserId,
    ) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE user_id <> $1 AND data_id IS NULL \
             ORDER BY updated_at DESC",
            SELECT_COLUMNS
        ))
        .bind(user_id.as_str())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn find_by_data(&self, data_id: &DataId) -> Result<Vec<Draft>, DomainError> {
        let rows = sqlx::query(&format!(
            "SELECT {} FROM drafts WHERE data_id = $1",
            SELECT_COLUMNS
        ))
        .bind(data_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to fetch drafts by data: {}", e)))?;

        rows.into_iter().map(row_to_draft).collect()
    }

    async fn delete(&self, id: &DraftId) -> Result<(), DomainError> {
        let result = sqlx::query("DELETE FROM drafts WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to delete draft: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::DraftNotFound,
                format!("Draft not found: {}", id),
            ));
        }

        Ok(())
    }
}

fn write_error(operation: &str, e: sqlx::Error) -> DomainError {
    if let sqlx::Error::Database(db) = &e {
        if db.code().as_deref() == Some(UNIQUE_VIOLATION) {
            return DomainError::new(
                ErrorCode::NotUnique,
                "A draft with the same user, template, and name already exists.",
            );
        }
    }
    DomainError::database(format!("Failed to {} draft: {}", operation, e))
}

fn row_to_draft(row: PgRow) -> Result<Draft, DomainError> {
    let id: Uuid = row.get("id");
    let user_id: String = row.get("user_id");
    let template_id: Uuid = row.get("template_id");
    let name: String = row.get("name");
    let form_string: Option<String> = row.get("form_string");
    let element_root: Option<Uuid> = row.get("element_root");
    let data_id: Option<Uuid> = row.get("data_id");
    let created_at: chrono::DateTime<chrono::Utc> = row.get("created_at");
    let updated_at: chrono::DateTime<chrono::Utc> = row.get("updated_at");

    let user = UserId::new(user_id).map_err(|e| {
        DomainError::new(
            ErrorCode::InternalError,
            format!("Corrupt draft row: {}", e),
        )
    })?;

    Ok(Draft::reconstitute(
        DraftId::from_uuid(id),
        user,
        TemplateId::from_uuid(template_id),
        name,
        form_string,
        element_root.map(ElementId::from_uuid),
        data_id.map(DataId::from_uuid),
        Timestamp::from_datetime(created_at),
        Timestamp::from_datetime(updated_at),
    ))
}
