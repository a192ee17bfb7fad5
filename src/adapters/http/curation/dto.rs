//! HTTP DTOs for curation workflow endpoints.

use serde::{Deserialize, Serialize};

use crate::application::handlers::curation::{LoadedForm, StartMode};
use crate::domain::foundation::{DraftId, ElementId, TemplateId};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to start a curation session.
#[derive(Debug, Clone, Deserialize)]
pub struct StartCurationRequest {
    pub template: TemplateId,
    #[serde(flatten)]
    pub mode: StartModeRequest,
}

/// The three ways a session starts.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum StartModeRequest {
    New { name: String },
    Upload { filename: String, content: String },
    Open { draft: DraftId },
}

impl From<StartModeRequest> for StartMode {
    fn from(req: StartModeRequest) -> Self {
        match req {
            StartModeRequest::New { name } => StartMode::New { name },
            StartModeRequest::Upload { filename, content } => {
                StartMode::Upload { filename, content }
            }
            StartModeRequest::Open { draft } => StartMode::Open { draft_id: draft },
        }
    }
}

/// Request to load a form for editing.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct LoadFormRequest {
    /// Reuse the stored element tree instead of regenerating it, keeping
    /// edits that were never checkpointed.
    #[serde(default)]
    pub reload_unsaved: bool,
}

/// Request naming a form element.
#[derive(Debug, Clone, Deserialize)]
pub struct ElementRequest {
    pub id: ElementId,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// A rendered form ready to be edited.
#[derive(Debug, Clone, Serialize)]
pub struct LoadedFormResponse {
    pub draft_id: String,
    pub name: String,
    pub editing: bool,
    pub form: String,
}

impl From<LoadedForm> for LoadedFormResponse {
    fn from(form: LoadedForm) -> Self {
        Self {
            draft_id: form.draft_id.to_string(),
            name: form.name,
            editing: form.editing,
            form: form.form_html,
        }
    }
}
