//! Update commands: `update` (to-dos) and `update-project`.
//!
//! String fields here are tri-state: absent leaves the field alone, an empty
//! string clears it, anything else replaces it. Both commands need an auth
//! token and an id, plus at least one encoded field beyond those two.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ThingsCommand;
use crate::things::error::ThingsError;
use crate::things::query::{COMMA, NEWLINE, Params};

/// Keys every update carries before any field to change.
const IDENTITY_KEYS: usize = 2;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateInput {
    /// Things URL-scheme authorization token
    #[serde(default)]
    pub auth_token: String,
    /// Id of the to-do to update
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Replaces the notes; an empty string clears them
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    /// An empty string removes the deadline
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Replaces all tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub prepend_checklist_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub append_checklist_items: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub list_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub heading_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<bool>,
    /// Duplicate the to-do before applying the update
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
}

impl ThingsCommand for UpdateInput {
    const COMMAND: &'static str = "update";

    fn build(&self) -> Result<Params, ThingsError> {
        let mut params = identity_params(&self.auth_token, &self.id)?;

        params.set_optional("title", self.title.as_deref());
        params.set_optional("notes", self.notes.as_deref());
        params.set_optional("prepend-notes", self.prepend_notes.as_deref());
        params.set_optional("append-notes", self.append_notes.as_deref());
        params.set_optional("when", self.when.as_deref());
        params.set_optional("deadline", self.deadline.as_deref());
        params.set_list("tags", &self.tags, COMMA);
        params.set_list("add-tags", &self.add_tags, COMMA);
        params.set_list("checklist-items", &self.checklist_items, NEWLINE);
        params.set_list(
            "prepend-checklist-items",
            &self.prepend_checklist_items,
            NEWLINE,
        );
        params.set_list(
            "append-checklist-items",
            &self.append_checklist_items,
            NEWLINE,
        );
        params.set_optional("list", self.list.as_deref());
        params.set_optional("list-id", self.list_id.as_deref());
        params.set_optional("heading", self.heading.as_deref());
        params.set_optional("heading-id", self.heading_id.as_deref());
        params.set_bool("completed", self.completed);
        params.set_bool("canceled", self.canceled);
        params.set_bool("reveal", self.reveal);
        params.set_bool("duplicate", self.duplicate);
        params.set_optional("creation-date", self.creation_date.as_deref());
        params.set_optional("completion-date", self.completion_date.as_deref());

        require_changes(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProjectInput {
    /// Things URL-scheme authorization token
    #[serde(default)]
    pub auth_token: String,
    /// Id of the project to update
    #[serde(default)]
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prepend_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub append_notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub add_tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duplicate: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
}

impl ThingsCommand for UpdateProjectInput {
    const COMMAND: &'static str = "update-project";

    fn build(&self) -> Result<Params, ThingsError> {
        let mut params = identity_params(&self.auth_token, &self.id)?;

        params.set_optional("title", self.title.as_deref());
        params.set_optional("notes", self.notes.as_deref());
        params.set_optional("prepend-notes", self.prepend_notes.as_deref());
        params.set_optional("append-notes", self.append_notes.as_deref());
        params.set_optional("when", self.when.as_deref());
        params.set_optional("deadline", self.deadline.as_deref());
        params.set_list("tags", &self.tags, COMMA);
        params.set_list("add-tags", &self.add_tags, COMMA);
        params.set_optional("area", self.area.as_deref());
        params.set_optional("area-id", self.area_id.as_deref());
        params.set_bool("completed", self.completed);
        params.set_bool("canceled", self.canceled);
        params.set_bool("reveal", self.reveal);
        params.set_bool("duplicate", self.duplicate);
        params.set_optional("creation-date", self.creation_date.as_deref());
        params.set_optional("completion-date", self.completion_date.as_deref());

        require_changes(params)
    }
}

fn identity_params(auth_token: &str, id: &str) -> Result<Params, ThingsError> {
    if auth_token.is_empty() {
        return Err(ThingsError::validation("authToken is required"));
    }
    if id.is_empty() {
        return Err(ThingsError::validation("id is required"));
    }

    let mut params = Params::new();
    params.set("auth-token", auth_token);
    params.set("id", id);
    Ok(params)
}

// Counts encoded keys, so an explicitly empty value is a change.
fn require_changes(params: Params) -> Result<Params, ThingsError> {
    if params.len() <= IDENTITY_KEYS {
        return Err(ThingsError::validation(
            "provide at least one field to update",
        ));
    }
    Ok(params)
}
