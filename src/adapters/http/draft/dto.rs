//! HTTP DTOs for draft endpoints.
//!
//! These types decouple the HTTP API from domain types, allowing independent
//! evolution.

use serde::{Deserialize, Serialize};

use crate::application::handlers::draft::{CreateDraftCommand, UpdateDraftCommand};
use crate::domain::draft::Draft;
use crate::domain::foundation::{DataId, ElementId, TemplateId, UserId, ValidationError};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to create a draft.
///
/// The `user` field is honored only on the administrative route; elsewhere
/// the draft is owned by the acting user.
#[derive(Debug, Clone, Deserialize)]
pub struct CreateDraftRequest {
    pub name: String,
    pub template: TemplateId,
    #[serde(default)]
    pub user: Option<String>,
    #[serde(default)]
    pub form_string: Option<String>,
    #[serde(default)]
    pub element_root: Option<ElementId>,
    #[serde(default)]
    pub data: Option<DataId>,
}

impl CreateDraftRequest {
    pub fn into_command(self) -> Result<CreateDraftCommand, ValidationError> {
        let owner = self.user.map(UserId::new).transpose()?;
        Ok(CreateDraftCommand {
            owner,
            template_id: self.template,
            name: self.name,
            form_string: self.form_string,
            element_root: self.element_root,
            data: self.data,
        })
    }
}

/// Request to patch a draft. Absent fields are left untouched.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct UpdateDraftRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub form_string: Option<String>,
    #[serde(default)]
    pub element_root: Option<ElementId>,
    #[serde(default)]
    pub data: Option<DataId>,
}

impl From<UpdateDraftRequest> for UpdateDraftCommand {
    fn from(req: UpdateDraftRequest) -> Self {
        UpdateDraftCommand {
            name: req.name,
            form_string: req.form_string,
            element_root: req.element_root,
            data: req.data,
        }
    }
}

/// Request to reassign a draft's owner.
#[derive(Debug, Clone, Deserialize)]
pub struct ChangeOwnerRequest {
    pub user: String,
}

/// Query parameters for listing drafts.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ListDraftsParams {
    #[serde(default)]
    pub template: Option<TemplateId>,
    #[serde(default)]
    pub no_data: bool,
    /// Administrative listing only: exclude one user's drafts.
    #[serde(default)]
    pub except_user: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Draft representation for API responses.
#[derive(Debug, Clone, Serialize)]
pub struct DraftResponse {
    pub id: String,
    pub user: String,
    pub template: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub form_string: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub element_root: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}

impl From<Draft> for DraftResponse {
    fn from(draft: Draft) -> Self {
        Self {
            id: draft.id().to_string(),
            user: draft.user().to_string(),
            template: draft.template().to_string(),
            name: draft.name().to_string(),
            form_string: draft.form_string().map(|s| s.to_string()),
            element_root: draft.element_root().map(|r| r.to_string()),
            data: draft.data().map(|d| d.to_string()),
            created_at: draft.created_at().as_datetime().to_rfc3339(),
            updated_at: draft.updated_at().as_datetime().to_rfc3339(),
        }
    }
}
