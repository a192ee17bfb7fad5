//! Draft aggregate entity.
//!
//! A draft is one in-progress curation session: a user filling out a
//! document derived from a schema template. While the draft is being edited
//! the parser collaborator holds an element tree for it; the tree, when
//! present, is the source of truth and `form_string` is only a rendered
//! checkpoint of it.
//!
//! # Invariants
//!
//! - `user` is never empty (enforced by `UserId`)
//! - `name` is non-empty and carries no leading/trailing whitespace
//! - `template` is set at creation and never changes
//! - a non-null `data` means the draft edits an existing Data record

use crate::domain::foundation::{
    DataId, DraftId, ElementId, OwnedByUser, TemplateId, Timestamp, UserId, ValidationError,
};
use serde::{Deserialize, Serialize};

/// Maximum length for a draft name (storage column width).
pub const MAX_NAME_LENGTH: usize = 255;

/// Draft aggregate - one in-progress curation session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Draft {
    /// Unique identifier for this draft.
    id: DraftId,

    /// User who owns this draft.
    user: UserId,

    /// Schema template the document must conform to.
    template: TemplateId,

    /// Document name, trimmed.
    name: String,

    /// Last rendered content of the draft (XML or JSON text).
    form_string: Option<String>,

    /// Root of the element tree held by the parser collaborator.
    element_root: Option<ElementId>,

    /// Finalized Data record this draft edits, if any.
    data: Option<DataId>,

    /// When the draft was created.
    created_at: Timestamp,

    /// When the draft was last updated.
    updated_at: Timestamp,
}

impl Draft {
    /// Create a new draft.
    ///
    /// The name is cleaned (trimmed); an empty or whitespace-only name is
    /// rejected.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty after trimming
    /// - `InvalidFormat` if the name exceeds [`MAX_NAME_LENGTH`]
    pub fn new(
        id: DraftId,
        user: UserId,
        template: TemplateId,
        name: impl Into<String>,
    ) -> Result<Self, ValidationError> {
        let name = clean_name(name.into())?;

        let now = Timestamp::now();
        Ok(Self {
            id,
            user,
            template,
            name,
            form_string: None,
            element_root: None,
            data: None,
            created_at: now,
            updated_at: now,
        })
    }

    /// Reconstitute a draft from persistence (no validation).
    #[allow(clippy::too_many_arguments)]
    pub fn reconstitute(
        id: DraftId,
        user: UserId,
        template: TemplateId,
        name: String,
        form_string: Option<String>,
        element_root: Option<ElementId>,
        data: Option<DataId>,
        created_at: Timestamp,
        updated_at: Timestamp,
    ) -> Self {
        Self {
            id,
            user,
            template,
            name,
            form_string,
            element_root,
            data,
            created_at,
            updated_at,
        }
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Accessors
    // ─────────────────────────────────────────────────────────────────────────

    /// Returns the draft ID.
    pub fn id(&self) -> &DraftId {
        &self.id
    }

    /// Returns the owner's user ID.
    pub fn user(&self) -> &UserId {
        &self.user
    }

    /// Returns the template ID.
    pub fn template(&self) -> &TemplateId {
        &self.template
    }

    /// Returns the draft name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the last rendered content, if any.
    pub fn form_string(&self) -> Option<&str> {
        self.form_string.as_deref()
    }

    /// Returns the element-tree root, if one is active.
    pub fn element_root(&self) -> Option<&ElementId> {
        self.element_root.as_ref()
    }

    /// Returns the linked Data record, if any.
    pub fn data(&self) -> Option<&DataId> {
        self.data.as_ref()
    }

    /// Returns true if this draft edits an existing Data record.
    pub fn edits_existing_data(&self) -> bool {
        self.data.is_some()
    }

    /// Returns when the draft was created.
    pub fn created_at(&self) -> &Timestamp {
        &self.created_at
    }

    /// Returns when the draft was last updated.
    pub fn updated_at(&self) -> &Timestamp {
        &self.updated_at
    }

    // ─────────────────────────────────────────────────────────────────────────
    // Mutations
    // ─────────────────────────────────────────────────────────────────────────

    /// Rename the draft. The new name is cleaned like at creation.
    ///
    /// # Errors
    ///
    /// - `EmptyField` if the name is empty after trimming
    /// - `InvalidFormat` if the name exceeds [`MAX_NAME_LENGTH`]
    pub fn rename(&mut self, new_name: impl Into<String>) -> Result<(), ValidationError> {
        self.name = clean_name(new_name.into())?;
        self.touch();
        Ok(())
    }

    /// Replace the rendered content checkpoint.
    pub fn set_form_string(&mut self, form_string: Option<String>) {
        self.form_string = form_string;
        self.touch();
    }

    /// Point the draft at a new element-tree root.
    ///
    /// The caller is responsible for deleting the previous subtree through
    /// the parser collaborator before reassigning.
    pub fn set_element_root(&mut self, root: Option<ElementId>) {
        self.element_root = root;
        self.touch();
    }

    /// Link the draft to an existing Data record.
    pub fn link_data(&mut self, data: Option<DataId>) {
        self.data = data;
        self.touch();
    }

    /// Reassign ownership to another user.
    ///
    /// Only reachable through the change-owner gate.
    pub fn assign_owner(&mut self, new_owner: UserId) {
        self.user = new_owner;
        self.touch();
    }

    fn touch(&mut self) {
        self.updated_at = Timestamp::now();
    }
}

impl OwnedByUser for Draft {
    fn owner_id(&self) -> &UserId {
        &self.user
    }
}

/// Trim the name and reject empty or oversized results.
fn clean_name(name: String) -> Result<String, ValidationError> {
    let name = name.trim().to_string();
    if name.is_empty() {
        return Err(ValidationError::empty_field("name"));
    }
    if name.len() > MAX_NAME_LENGTH {
        return Err(ValidationError::invalid_format(
            "name",
            format!("longer than {} characters", MAX_NAME_LENGTH),
        ));
    }
    Ok(name)
}
