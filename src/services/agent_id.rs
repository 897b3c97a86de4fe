//! Agent identifier generation
//!
//! Derives a unique-enough identifier from a display name: a lowercase
//! slug plus a short random suffix.

use rand::distributions::Alphanumeric;
use rand::{thread_rng, Rng};

const SUFFIX_LEN: usize = 6;

/// Generate an agent id for a display name
pub fn generate(display_name: &str) -> String {
    let slug: String = display_name
        .to_lowercase()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '-' })
        .collect();

    // Collapse runs of separators and trim the edges
    let slug = slug
        .split('-')
        .filter(|part| !part.is_empty())
        .collect::<Vec<_>>()
        .join("-");

    let slug = if slug.is_empty() {
        "agent".to_string()
    } else {
        slug
    };

    let suffix: String = thread_rng()
        .sample_iter(&Alphanumeric)
        .take(SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();

    format!("{}-{}", slug, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slug_shape() {
        let id = generate("Allied School");
        assert!(id.starts_with("allied-school-"));
        let suffix = id.rsplit('-').next().unwrap();
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_alphanumeric()));
    }

    #[test]
    fn test_punctuation_collapsed() {
        let id = generate("St. Mary's  College!");
        assert!(id.starts_with("st-mary-s-college-"));
        assert!(!id.contains("--"));
    }

    #[test]
    fn test_empty_name_falls_back() {
        let id = generate("   ");
        assert!(id.starts_with("agent-"));
    }

    #[test]
    fn test_ids_differ_between_calls() {
        assert_ne!(generate("ABC"), generate("ABC"));
    }
}
