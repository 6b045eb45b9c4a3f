//! Navigation commands: `show`, `search`, `version`.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use super::ThingsCommand;
use crate::things::error::ThingsError;
use crate::things::query::{COMMA, Params};

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct ShowInput {
    /// Id of a to-do, project, area, tag or built-in list (inbox, today, upcoming, ...)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    /// Name of an area, project, tag or built-in list; ignored when id is set
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
    /// Tags to filter the shown list by
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub filter: Vec<String>,
}

impl ThingsCommand for ShowInput {
    const COMMAND: &'static str = "show";

    fn build(&self) -> Result<Params, ThingsError> {
        let id = self.id.as_deref().filter(|s| !s.is_empty());
        let query = self.query.as_deref().filter(|s| !s.is_empty());
        if id.is_none() && query.is_none() {
            return Err(ThingsError::validation("provide id or query"));
        }

        let mut params = Params::new();
        match id {
            Some(id) => params.set("id", id),
            None => params.set_str("query", query),
        }
        params.set_list("filter", &self.filter, COMMA);
        Ok(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct SearchInput {
    /// Text to search for; omit to just open the search UI
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query: Option<String>,
}

impl ThingsCommand for SearchInput {
    const COMMAND: &'static str = "search";

    fn build(&self) -> Result<Params, ThingsError> {
        let mut params = Params::new();
        params.set_str("query", self.query.as_deref());
        Ok(params)
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
pub struct VersionInput {}

impl ThingsCommand for VersionInput {
    const COMMAND: &'static str = "version";

    fn build(&self) -> Result<Params, ThingsError> {
        Ok(Params::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::things::query::encode_query;

    #[test]
    fn show_requires_id_or_query() {
        let err = ShowInput::default().build().unwrap_err();
        assert_eq!(err.to_string(), "provide id or query");

        let blank = ShowInput {
            id: Some(String::new()),
            query: Some(String::new()),
            filter: vec!["Work".into()],
        };
        assert!(blank.build().is_err());
    }

    #[test]
    fn show_prefers_id_over_query() {
        let input = ShowInput {
            id: Some("today".into()),
            query: Some("Vacation".into()),
            ..Default::default()
        };
        let params = input.build().unwrap();
        assert_eq!(params.get("id"), Some("today"));
        assert!(!params.contains("query"));
    }

    #[test]
    fn show_by_query_with_filter() {
        let input = ShowInput {
            query: Some("Home Office".into()),
            filter: vec!["Errand".into(), "Urgent".into()],
            ..Default::default()
        };
        assert_eq!(
            encode_query(&input.build().unwrap()),
            "filter=Errand%2CUrgent&query=Home%20Office"
        );
    }

    #[test]
    fn search_allows_empty_query() {
        assert!(SearchInput::default().build().unwrap().is_empty());
        let params = SearchInput {
            query: Some(String::new()),
        }
        .build()
        .unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn search_encodes_query() {
        let params = SearchInput {
            query: Some("dentist appointment".into()),
        }
        .build()
        .unwrap();
        assert_eq!(encode_query(&params), "query=dentist%20appointment");
    }

    #[test]
    fn version_has_no_params() {
        assert!(VersionInput {}.build().unwrap().is_empty());
        assert_eq!(VersionInput::COMMAND, "version");
    }
}
