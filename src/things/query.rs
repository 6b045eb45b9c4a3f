/*!
query.rs

Parameter mapping + canonical query encoding for Things URLs.

  Params        - sorted key -> single value map (lists are pre-joined)
  encode_query  - form-urlencode with `+` rewritten to `%20`

Things' URL parser reads `+` literally, so the usual form encoding of a
space would end up inside titles and notes. Every `+` produced by the
encoder is therefore rewritten; a literal plus in the input is already
`%2B` and is untouched.
*/

use std::collections::BTreeMap;

use url::form_urlencoded;

/// Separator for tag-like list fields.
pub const COMMA: &str = ",";
/// Separator for multi-line content fields (titles, checklist items, to-dos).
pub const NEWLINE: &str = "\n";

/// Ordered parameter mapping for a single command.
///
/// Keys use the hyphenated form Things expects (`list-id`, `auth-token`).
/// Iteration order is byte-lexicographic, which keeps encoded output stable.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Params {
    entries: BTreeMap<String, String>,
}

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Unconditional insert (replaces any previous value).
    pub fn set(&mut self, key: &str, value: impl Into<String>) {
        self.entries.insert(key.to_string(), value.into());
    }

    /// Insert only when the value is present and non-empty.
    pub fn set_str(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value
            && !v.is_empty()
        {
            self.set(key, v);
        }
    }

    /// Insert whenever the value is present, even if empty (empty clears the field).
    pub fn set_optional(&mut self, key: &str, value: Option<&str>) {
        if let Some(v) = value {
            self.set(key, v);
        }
    }

    pub fn set_bool(&mut self, key: &str, value: Option<bool>) {
        if let Some(b) = value {
            self.set(key, if b { "true" } else { "false" });
        }
    }

    /// Insert a list as one joined value; empty lists are skipped.
    pub fn set_list(&mut self, key: &str, values: &[String], separator: &str) {
        if values.is_empty() {
            return;
        }
        self.set(key, values.join(separator));
    }

    #[cfg(test)]
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    #[cfg(test)]
    pub fn contains(&self, key: &str) -> bool {
        self.entries.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            entries: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// Encode params into a query string (without the leading `?`).
///
/// Returns an empty string for an empty mapping. Escaping follows RFC 3986
/// unreserved characters: space is `%20`, `~` stays literal, `*` is `%2A`.
pub fn encode_query(params: &Params) -> String {
    if params.is_empty() {
        return String::new();
    }

    let encoded = form_urlencoded::Serializer::new(String::new())
        .extend_pairs(params.iter())
        .finish();
    if !encoded.contains(['+', '*']) && !encoded.contains("%7E") {
        return encoded;
    }
    // form_urlencoded emits `+` only for space, `*` only for itself.
    encoded
        .replace('+', "%20")
        .replace('*', "%2A")
        .replace("%7E", "~")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_params_encode_to_empty_string() {
        assert_eq!(encode_query(&Params::new()), "");
    }

    #[test]
    fn spaces_become_percent20() {
        let params: Params = [("title", "Buy milk and eggs")].into_iter().collect();
        let encoded = encode_query(&params);
        assert_eq!(encoded, "title=Buy%20milk%20and%20eggs");
        assert!(!encoded.contains('+'));
    }

    #[test]
    fn literal_plus_stays_escaped() {
        let params: Params = [("notes", "1+1 = 2")].into_iter().collect();
        assert_eq!(encode_query(&params), "notes=1%2B1%20%3D%202");
    }

    #[test]
    fn tilde_is_unreserved_and_asterisk_is_escaped() {
        let params: Params = [("title", "a~b*c")].into_iter().collect();
        assert_eq!(encode_query(&params), "title=a~b%2Ac");
    }

    #[test]
    fn escaped_tilde_in_input_is_not_unescaped() {
        let params: Params = [("notes", "%7E ~")].into_iter().collect();
        assert_eq!(encode_query(&params), "notes=%257E%20~");
    }

    #[test]
    fn keys_are_sorted() {
        let params: Params = [("when", "today"), ("title", "x"), ("list-id", "abc")]
            .into_iter()
            .collect();
        assert_eq!(encode_query(&params), "list-id=abc&title=x&when=today");
    }

    #[test]
    fn encoding_is_deterministic() {
        let mut params = Params::new();
        params.set("title", "Plan trip");
        params.set_list("tags", &["Travel".into(), "Planning".into()], COMMA);
        assert_eq!(encode_query(&params), encode_query(&params.clone()));
    }

    #[test]
    fn list_joining() {
        let mut params = Params::new();
        params.set_list("tags", &["Travel".into(), "Planning".into()], COMMA);
        params.set_list(
            "checklist-items",
            &["Passport".into(), "Tickets".into()],
            NEWLINE,
        );
        params.set_list("to-dos", &[], NEWLINE);
        assert_eq!(
            encode_query(&params),
            "checklist-items=Passport%0ATickets&tags=Travel%2CPlanning"
        );
    }

    #[test]
    fn set_str_skips_empty_but_set_optional_keeps_it() {
        let mut params = Params::new();
        params.set_str("title", Some(""));
        params.set_str("notes", None);
        assert!(params.is_empty());

        params.set_optional("deadline", Some(""));
        params.set_optional("when", None);
        assert_eq!(params.len(), 1);
        assert_eq!(params.get("deadline"), Some(""));
        assert_eq!(encode_query(&params), "deadline=");
    }

    #[test]
    fn bools_are_lowercase_literals() {
        let mut params = Params::new();
        params.set_bool("completed", Some(true));
        params.set_bool("reveal", Some(false));
        params.set_bool("canceled", None);
        assert_eq!(encode_query(&params), "completed=true&reveal=false");
    }
}
