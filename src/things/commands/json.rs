//! `json` command: bulk import through the Things JSON format.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::ThingsCommand;
use crate::things::error::ThingsError;
use crate::things::query::Params;

#[derive(Debug, Clone, Default, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "camelCase")]
pub struct JsonInput {
    /// Required when the payload contains update operations
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_token: Option<String>,
    /// Things JSON payload: an array of to-do / project objects, or the same as a JSON string
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reveal: Option<bool>,
}

impl JsonInput {
    /// Compact payload text. A string value is read as raw JSON text.
    fn payload(&self) -> Result<String, ThingsError> {
        match &self.data {
            None | Some(Value::Null) => Err(ThingsError::validation("data is required")),
            Some(Value::String(raw)) => compact_json(raw),
            Some(value) => Ok(value.to_string()),
        }
    }
}

impl ThingsCommand for JsonInput {
    const COMMAND: &'static str = "json";

    fn build(&self) -> Result<Params, ThingsError> {
        let data = self.payload()?;

        let mut params = Params::new();
        params.set_str("auth-token", self.auth_token.as_deref());
        params.set("data", data);
        params.set_bool("reveal", self.reveal);
        Ok(params)
    }
}

/// Validate `raw` as JSON and strip insignificant whitespace.
///
/// Everything outside whitespace between tokens is kept byte for byte
/// (key order, number formatting, escapes).
pub fn compact_json(raw: &str) -> Result<String, ThingsError> {
    if raw.trim().is_empty() {
        return Err(ThingsError::validation("data is required"));
    }
    serde_json::from_str::<Value>(raw)
        .map_err(|e| ThingsError::validation(format!("data must be valid JSON: {e}")))?;

    let mut out = String::with_capacity(raw.len());
    let mut in_string = false;
    let mut escaped = false;
    for c in raw.chars() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        match c {
            ' ' | '\t' | '\n' | '\r' => {}
            '"' => {
                in_string = true;
                out.push(c);
            }
            _ => out.push(c),
        }
    }
    Ok(out)
}
