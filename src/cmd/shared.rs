/*!
shared.rs - shared helpers for subcommands.

Focus:
  - parse_param_pairs: KEY=VALUE flags -> map
  - load_param_file: JSON / YAML object -> map
  - build_arguments_from_schema + primitive coercion (driven by the
    command input's JSON schema)
*/

use anyhow::{Context, Result, bail};
use serde_json::{Map, Value};
use std::collections::BTreeMap;

/* ---- Parameter Collection ---- */

/// Parse repeatable `--param KEY=VALUE` flags. Later keys win.
pub fn parse_param_pairs(pairs: &[String]) -> Result<BTreeMap<String, String>> {
    let mut provided = BTreeMap::new();
    for kv in pairs {
        let Some((k, v)) = kv.split_once('=') else {
            bail!("invalid --param (expected KEY=VALUE): {kv}");
        };
        let key = k.trim();
        if key.is_empty() {
            bail!("invalid --param (empty key): {kv}");
        }
        provided.insert(key.to_string(), v.to_string());
    }
    Ok(provided)
}

/// Load an argument object from a JSON or YAML file (by extension).
pub fn load_param_file(path: &str) -> Result<Map<String, Value>> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read param file: {path}"))?;
    parse_param_document(&raw, is_yaml_path(path))
}

fn is_yaml_path(path: &str) -> bool {
    let lower = path.to_ascii_lowercase();
    lower.ends_with(".yaml") || lower.ends_with(".yml")
}

pub fn parse_param_document(raw: &str, yaml: bool) -> Result<Map<String, Value>> {
    let value: Value = if yaml {
        let yaml_v: serde_yaml::Value =
            serde_yaml::from_str(raw).context("failed to parse YAML param file")?;
        serde_json::to_value(yaml_v).context("failed to convert YAML to JSON")?
    } else {
        serde_json::from_str(raw).context("failed to parse JSON param file")?
    };

    match value {
        Value::Object(obj) => Ok(obj),
        _ => bail!("param file root must be an object"),
    }
}

/* ---- Argument Building / Schema Handling ---- */

/// Merge raw `--param` strings into `base`, coercing each by the property
/// type declared in `schema`.
///
/// - Unknown keys are rejected (the inputs would silently ignore them).
/// - Keys listed in `schema.required` must end up present.
pub fn build_arguments_from_schema(
    schema: &Value,
    mut base: Map<String, Value>,
    provided: &BTreeMap<String, String>,
) -> Result<Map<String, Value>> {
    let props = schema.get("properties").and_then(|v| v.as_object());

    for (name, raw) in provided {
        let Some(prop) = props.and_then(|p| p.get(name)) else {
            let known = props
                .map(|p| p.keys().cloned().collect::<Vec<_>>().join(", "))
                .unwrap_or_default();
            bail!("unknown parameter: {name} (expected one of: {known})");
        };
        base.insert(
            name.clone(),
            coerce_value(raw, primary_type(prop), list_separators(name)),
        );
    }

    if let Some(required) = schema.get("required").and_then(|v| v.as_array()) {
        for r in required.iter().filter_map(|r| r.as_str()) {
            if !base.contains_key(r) {
                bail!("missing required parameter: {r}");
            }
        }
    }

    Ok(base)
}

/// First non-null `"type"` of a property schema (`["string","null"]` -> string).
fn primary_type(prop: &Value) -> &str {
    match prop.get("type") {
        Some(Value::String(t)) => t.as_str(),
        Some(Value::Array(types)) => types
            .iter()
            .filter_map(|t| t.as_str())
            .find(|t| *t != "null")
            .unwrap_or("string"),
        _ => "string",
    }
}

/// Array fields whose items are sent newline-joined (titles, checklist
/// items, project to-dos). Their items may contain commas.
const LINE_LIST_FIELDS: &[&str] = &[
    "titles",
    "checklistItems",
    "prependChecklistItems",
    "appendChecklistItems",
    "toDos",
];

/// Item separators for an array `--param`: `;` or newline for line lists,
/// comma for everything else (tags).
fn list_separators(name: &str) -> &'static [char] {
    if LINE_LIST_FIELDS.contains(&name) {
        &[';', '\n']
    } else {
        &[',']
    }
}

/// Attempt to coerce a raw string into a JSON value using a primitive type hint.
/// Arrays are split on any of `separators`.
pub fn coerce_value(raw: &str, type_hint: &str, separators: &[char]) -> Value {
    match type_hint {
        "boolean" => match raw.trim().to_ascii_lowercase().as_str() {
            "true" | "1" | "yes" | "y" => Value::Bool(true),
            "false" | "0" | "no" | "n" => Value::Bool(false),
            _ => Value::String(raw.to_string()),
        },
        "array" => Value::Array(
            raw.split(separators)
                .map(|s| s.trim())
                .filter(|s| !s.is_empty())
                .map(|s| Value::String(s.to_string()))
                .collect(),
        ),
        // Fallback: treat as plain string
        _ => Value::String(raw.to_string()),
    }
}

/* ---- Tests ---- */
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn schema() -> Value {
        json!({
            "type": "object",
            "properties": {
                "title": {"type": ["string", "null"]},
                "tags": {"type": "array", "items": {"type": "string"}},
                "reveal": {"type": ["boolean", "null"]},
                "data": true
            }
        })
    }

    #[test]
    fn coerce_boolean() {
        assert_eq!(coerce_value("true", "boolean", &[',']), json!(true));
        assert_eq!(coerce_value("No", "boolean", &[',']), json!(false));
        assert_eq!(coerce_value("maybe", "boolean", &[',']), json!("maybe"));
    }

    #[test]
    fn line_list_params_keep_commas() {
        let schema = json!({
            "type": "object",
            "properties": {
                "titles": {"type": "array", "items": {"type": "string"}},
                "checklistItems": {"type": "array", "items": {"type": "string"}},
                "tags": {"type": "array", "items": {"type": "string"}}
            }
        });
        let provided = BTreeMap::from([
            ("titles".to_string(), "Call Bob, re: lease; Pay rent".to_string()),
            ("checklistItems".to_string(), "Passport\nTickets, both ways".to_string()),
            ("tags".to_string(), "Home,Errand".to_string()),
        ]);
        let args = build_arguments_from_schema(&schema, Map::new(), &provided).unwrap();
        assert_eq!(args.get("titles"), Some(&json!(["Call Bob, re: lease", "Pay rent"])));
        assert_eq!(
            args.get("checklistItems"),
            Some(&json!(["Passport", "Tickets, both ways"]))
        );
        assert_eq!(args.get("tags"), Some(&json!(["Home", "Errand"])));
    }

    #[test]
    fn coerce_array() {
        assert_eq!(
            coerce_value("Travel, Planning,", "array", &[',']),
            json!(["Travel", "Planning"]),
            "comma splitting with trimming"
        );
    }

    #[test]
    fn parse_pairs_keeps_value_spaces() {
        let pairs = vec!["title=Plan trip".to_string(), "reveal=yes".to_string()];
        let map = parse_param_pairs(&pairs).unwrap();
        assert_eq!(map.get("title").map(String::as_str), Some("Plan trip"));
    }

    #[test]
    fn parse_pairs_rejects_missing_equals() {
        let err = parse_param_pairs(&["title".to_string()]).unwrap_err();
        assert!(err.to_string().contains("expected KEY=VALUE"));
        let err = parse_param_pairs(&["=x".to_string()]).unwrap_err();
        assert!(err.to_string().contains("empty key"));
    }

    #[test]
    fn build_arguments_coerces_by_schema() {
        let mut provided = BTreeMap::new();
        provided.insert("title".into(), "Plan trip".into());
        provided.insert("tags".into(), "Travel,Planning".into());
        provided.insert("reveal".into(), "yes".into());
        provided.insert("data".into(), "[1, 2]".into());

        let args = build_arguments_from_schema(&schema(), Map::new(), &provided).unwrap();
        assert_eq!(args.get("title"), Some(&json!("Plan trip")));
        assert_eq!(args.get("tags"), Some(&json!(["Travel", "Planning"])));
        assert_eq!(args.get("reveal"), Some(&json!(true)));
        assert_eq!(args.get("data"), Some(&json!("[1, 2]")));
    }

    #[test]
    fn params_override_base_object() {
        let base = json!({"title": "old", "tags": ["a"]})
            .as_object()
            .cloned()
            .unwrap();
        let mut provided = BTreeMap::new();
        provided.insert("title".into(), "new".into());

        let args = build_arguments_from_schema(&schema(), base, &provided).unwrap();
        assert_eq!(args.get("title"), Some(&json!("new")));
        assert_eq!(args.get("tags"), Some(&json!(["a"])));
    }

    #[test]
    fn unknown_parameter_is_rejected() {
        let mut provided = BTreeMap::new();
        provided.insert("titel".into(), "typo".into());
        let err = build_arguments_from_schema(&schema(), Map::new(), &provided).unwrap_err();
        assert!(err.to_string().contains("unknown parameter: titel"));
    }

    #[test]
    fn missing_required_parameter() {
        let schema = json!({
            "type": "object",
            "required": ["id"],
            "properties": {"id": {"type": "string"}}
        });
        let err = build_arguments_from_schema(&schema, Map::new(), &BTreeMap::new()).unwrap_err();
        assert!(err.to_string().contains("missing required parameter: id"));
    }

    #[test]
    fn yaml_document_keeps_lists() {
        let doc = "title: Plan trip\ntags:\n  - Travel\n  - Planning\n";
        let obj = parse_param_document(doc, true).unwrap();
        assert_eq!(obj.get("tags"), Some(&json!(["Travel", "Planning"])));
    }

    #[test]
    fn document_root_must_be_object() {
        let err = parse_param_document("[1,2]", false).unwrap_err();
        assert!(err.to_string().contains("must be an object"));
    }
}
