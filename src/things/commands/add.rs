//! Creation commands: `add` (to-dos) and `add-project`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ThingsCommand;
use crate::things::error::ThingsError;
use crate::things::query::{COMMA, NEWLINE, Params};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddInput {
    /// Title of the to-do
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Create several to-dos at once, one per title
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub titles: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    /// today, tomorrow, evening, anytime, someday, a date or a date time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    /// Names of existing tags
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub checklist_items: Vec<String>,
    /// title, notes, checklist-items or replace-title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub use_clipboard: Option<String>,
    /// Project or area to add to, by title
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
    /// Open the quick entry window instead of adding directly
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub show_quick_entry: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<bool>,
    /// ISO8601 date time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    /// ISO8601 date time
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
}

impl AddInput {
    fn has_content(&self) -> bool {
        !self.titles.is_empty()
            || self.title.as_deref().is_some_and(|t| !t.is_empty())
            || self.use_clipboard.as_deref().is_some_and(|c| !c.is_empty())
            || self.show_quick_entry.unwrap_or(false)
    }
}

impl ThingsCommand for AddInput {
    const COMMAND: &'static str = "add";

    fn build(&self) -> Result<Params, ThingsError> {
        if !self.has_content() {
            return Err(ThingsError::validation(
                "provide at least one of title, titles, useClipboard, or showQuickEntry",
            ));
        }

        let mut params = Params::new();
        params.set_str("title", self.title.as_deref());
        params.set_list("titles", &self.titles, NEWLINE);
        params.set_str("notes", self.notes.as_deref());
        params.set_str("when", self.when.as_deref());
        params.set_str("deadline", self.deadline.as_deref());
        params.set_list("tags", &self.tags, COMMA);
        params.set_list("checklist-items", &self.checklist_items, NEWLINE);
        params.set_str("use-clipboard", self.use_clipboard.as_deref());
        params.set_str("list", self.list.as_deref());
        params.set_str("list-id", self.list_id.as_deref());
        params.set_str("heading", self.heading.as_deref());
        params.set_str("heading-id", self.heading_id.as_deref());
        params.set_bool("completed", self.completed);
        params.set_bool("canceled", self.canceled);
        params.set_bool("show-quick-entry", self.show_quick_entry);
        params.set_bool("reveal", self.reveal);
        params.set_str("creation-date", self.creation_date.as_deref());
        params.set_str("completion-date", self.completion_date.as_deref());
        Ok(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct AddProjectInput {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub when: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub deadline: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub tags: Vec<String>,
    /// Area to add the project to, by title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub area_id: Option<String>,
    /// Titles of to-dos to create inside the project
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub to_dos: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub canceled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub creation_date: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completion_date: Option<String>,
}

impl ThingsCommand for AddProjectInput {
    const COMMAND: &'static str = "add-project";

    fn build(&self) -> Result<Params, ThingsError> {
        let mut params = Params::new();
        params.set_str("title", self.title.as_deref());
        params.set_str("notes", self.notes.as_deref());
        params.set_str("when", self.when.as_deref());
        params.set_str("deadline", self.deadline.as_deref());
        params.set_list("tags", &self.tags, COMMA);
        params.set_str("area", self.area.as_deref());
        params.set_str("area-id", self.area_id.as_deref());
        params.set_list("to-dos", &self.to_dos, NEWLINE);
        params.set_bool("completed", self.completed);
        params.set_bool("canceled", self.canceled);
        params.set_bool("reveal", self.reveal);
        params.set_str("creation-date", self.creation_date.as_deref());
        params.set_str("completion-date", self.completion_date.as_deref());
        Ok(params)
    }
}
