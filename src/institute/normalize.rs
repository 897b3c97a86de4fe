//! Payload normalization for list-valued submission fields
//!
//! List-valued fields (courses, faculty, accreditation, facilities)
//! arrive in one of three shapes depending on the client: omitted, a
//! JSON-encoded string (multi-step wizard posting flat fields), or a
//! structured array (JSON API). The shape is resolved here, once, at the
//! boundary; nothing downstream re-inspects it.
//!
//! A string that fails structured decoding is not an error: it degrades
//! to a single synthetic entry named after the raw string. A submission
//! is never aborted because one optional list field is malformed.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::db::schemas::{Course, FacultyMember};

/// Accepted wire shapes for a list-valued field
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ListInput<T> {
    /// Already-structured ordered sequence
    Items(Vec<T>),
    /// JSON-encoded string, or a bare value for the fallback entry
    Raw(String),
    /// Anything else (number, object, bool); normalizes to empty
    Other(serde_json::Value),
}

/// Entry types that can be synthesized from a bare string
pub trait FromRawName {
    fn from_raw_name(raw: &str) -> Self;
}

impl FromRawName for String {
    fn from_raw_name(raw: &str) -> Self {
        raw.trim().to_string()
    }
}

impl FromRawName for Course {
    fn from_raw_name(raw: &str) -> Self {
        Course {
            name: raw.trim().to_string(),
            ..Course::default()
        }
    }
}

impl FromRawName for FacultyMember {
    fn from_raw_name(raw: &str) -> Self {
        FacultyMember {
            name: raw.trim().to_string(),
            ..FacultyMember::default()
        }
    }
}

/// Resolve a list-valued field to its canonical ordered sequence
pub fn normalize<T>(input: Option<ListInput<T>>) -> Vec<T>
where
    T: DeserializeOwned + FromRawName,
{
    match input {
        None => Vec::new(),
        Some(ListInput::Items(items)) => items,
        Some(ListInput::Raw(raw)) => match serde_json::from_str::<Vec<T>>(&raw) {
            Ok(items) => items,
            // Defined fallback, not a failure: keep the text as a
            // single entry named after it
            Err(_) => vec![T::from_raw_name(&raw)],
        },
        Some(ListInput::Other(_)) => Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn decode<T: DeserializeOwned>(json: &str) -> Option<ListInput<T>> {
        serde_json::from_str(json).ok()
    }

    #[test]
    fn test_omitted_is_empty() {
        let out: Vec<Course> = normalize(None);
        assert!(out.is_empty());
    }

    #[test]
    fn test_structured_array_used_as_is() {
        let input = decode::<Course>(r#"[{"name":"CS","fee":50000.0},{"name":"Physics"}]"#);
        let out = normalize(input);
        assert_eq!(out.len(), 2);
        assert_eq!(out[0].name, "CS");
        assert_eq!(out[0].fee, Some(50000.0));
        assert_eq!(out[1].name, "Physics");
        assert_eq!(out[1].fee, None);
    }

    #[test]
    fn test_json_string_equals_direct_parse() {
        let encoded = r#""[{\"name\":\"CS\"},{\"name\":\"Math\"}]""#;
        let direct = r#"[{"name":"CS"},{"name":"Math"}]"#;

        let from_string = normalize(decode::<Course>(encoded));
        let from_array = normalize(decode::<Course>(direct));
        assert_eq!(from_string, from_array);
    }

    #[test]
    fn test_plain_string_degrades_to_single_entry() {
        let input = decode::<Course>(r#""Computer Science""#);
        let out = normalize(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Computer Science");
        assert_eq!(out[0].description, "");
        assert_eq!(out[0].duration, "");
        assert_eq!(out[0].fee, None);
        assert_eq!(out[0].category, "");
    }

    #[test]
    fn test_unexpected_type_is_empty() {
        assert!(normalize(decode::<Course>("42")).is_empty());
        assert!(normalize(decode::<Course>("true")).is_empty());
        assert!(normalize(decode::<Course>(r#"{"name":"CS"}"#)).is_empty());
    }

    #[test]
    fn test_string_list_shapes() {
        // Structured
        let out: Vec<String> = normalize(decode(r#"["ISO 9001","HEC"]"#));
        assert_eq!(out, vec!["ISO 9001".to_string(), "HEC".to_string()]);

        // JSON-encoded string
        let out: Vec<String> = normalize(decode(r#""[\"ISO 9001\"]""#));
        assert_eq!(out, vec!["ISO 9001".to_string()]);

        // Plain string falls back to a single entry
        let out: Vec<String> = normalize(decode(r#""HEC Recognized""#));
        assert_eq!(out, vec!["HEC Recognized".to_string()]);
    }

    #[test]
    fn test_faculty_fallback_entry() {
        let input = decode::<FacultyMember>(r#""Dr. Ahmed""#);
        let out = normalize(input);
        assert_eq!(out.len(), 1);
        assert_eq!(out[0].name, "Dr. Ahmed");
        assert_eq!(out[0].position, "");
        assert_eq!(out[0].image, "");
    }

    #[test]
    fn test_order_preserved() {
        let input = decode::<Course>(r#"[{"name":"B"},{"name":"A"},{"name":"B"}]"#);
        let out = normalize(input);
        let names: Vec<&str> = out.iter().map(|c| c.name.as_str()).collect();
        // Insertion order kept, duplicates kept
        assert_eq!(names, vec!["B", "A", "B"]);
    }
}
