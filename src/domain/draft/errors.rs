//! Draft-specific error types.
//!
//! The taxonomy the HTTP layer translates: access control is always 403,
//! missing records 404, constraint/validation failures 400, lock conflicts
//! 409, anything else 500.

use crate::domain::foundation::{
    AccessControlError, DomainError, DraftId, ErrorCode, ValidationError,
};

/// Draft-specific errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DraftError {
    /// Permission denied by the access-control gate.
    AccessControl(AccessControlError),
    /// Draft was not found.
    NotFound(DraftId),
    /// A collaborator record (template, data, element) was not found.
    DoesNotExist(String),
    /// The (user, template, name) uniqueness constraint was violated.
    NotUnique(String),
    /// Validation failed.
    Validation { field: String, message: String },
    /// The linked Data record is locked by another editor.
    Locked(String),
    /// Persistence or collaborator failure.
    Model(String),
}

impl DraftError {
    pub fn not_found(id: DraftId) -> Self {
        DraftError::NotFound(id)
    }

    pub fn does_not_exist(message: impl Into<String>) -> Self {
        DraftError::DoesNotExist(message.into())
    }

    pub fn not_unique(message: impl Into<String>) -> Self {
        DraftError::NotUnique(message.into())
    }

    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        DraftError::Validation {
            field: field.into(),
            message: message.into(),
        }
    }

    pub fn locked(message: impl Into<String>) -> Self {
        DraftError::Locked(message.into())
    }

    pub fn model(message: impl Into<String>) -> Self {
        DraftError::Model(message.into())
    }

    pub fn message(&self) -> String {
        match self {
            DraftError::AccessControl(err) => err.message().to_string(),
            DraftError::NotFound(id) => format!("Draft not found: {}", id),
            DraftError::DoesNotExist(msg) => msg.clone(),
            DraftError::NotUnique(msg) => msg.clone(),
            DraftError::Validation { field, message } => {
                format!("Validation failed for '{}': {}", field, message)
            }
            DraftError::Locked(msg) => msg.clone(),
            DraftError::Model(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for DraftError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message())
    }
}

impl std::error::Error for DraftError {}

impl From<AccessControlError> for DraftError {
    fn from(err: AccessControlError) -> Self {
        DraftError::AccessControl(err)
    }
}

impl From<ValidationError> for DraftError {
    fn from(err: ValidationError) -> Self {
        match &err {
            ValidationError::EmptyField { field } => DraftError::Validation {
                field: field.clone(),
                message: err.to_string(),
            },
            ValidationError::InvalidFormat { field, .. } => DraftError::Validation {
                field: field.clone(),
                message: err.to_string(),
            },
        }
    }
}

impl From<DomainError> for DraftError {
    fn from(err: DomainError) -> Self {
        match err.code {
            ErrorCode::DraftNotFound
            | ErrorCode::TemplateNotFound
            | ErrorCode::DataNotFound
            | ErrorCode::ElementNotFound => DraftError::DoesNotExist(err.message),
            ErrorCode::NotUnique => DraftError::NotUnique(err.message),
            ErrorCode::ValidationFailed | ErrorCode::EmptyField | ErrorCode::InvalidFormat => {
                DraftError::Validation {
                    field: err
                        .details
                        .get("field")
                        .cloned()
                        .unwrap_or_else(|| "unknown".to_string()),
                    message: err.message,
                }
            }
            ErrorCode::Unauthorized | ErrorCode::Forbidden => {
                DraftError::AccessControl(AccessControlError::new(err.message))
            }
            ErrorCode::Locked => DraftError::Locked(err.message),
            _ => DraftError::Model(err.message),
        }
    }
}
