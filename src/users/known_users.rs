use std::fs;
use std::path::Path;

use memchr::memmem;

use crate::error::PlaceformError;

/// Known user identifiers offered as email suggestions
///
/// Parsed once and never modified; lower-cased forms are computed up front so
/// each keystroke only lower-cases the query.
#[derive(Debug, Clone, Default)]
pub struct KnownUsers {
    entries: Vec<String>,
    lowercase: Vec<String>,
}

impl KnownUsers {
    pub fn new(entries: Vec<String>) -> Self {
        let lowercase = entries.iter().map(|e| e.to_lowercase()).collect();
        Self { entries, lowercase }
    }

    /// Parse a JSON array of strings
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let entries: Vec<String> = serde_json::from_str(json)?;
        Ok(Self::new(entries))
    }

    pub fn load(path: &Path) -> Result<Self, PlaceformError> {
        let contents = fs::read_to_string(path)?;
        let users = Self::from_json(&contents).map_err(|source| PlaceformError::InvalidUsers {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!("Loaded {} known users from {:?}", users.len(), path);
        Ok(users)
    }

    /// Every entry containing `term`, ignoring case, in list order
    ///
    /// An empty term matches everything.
    pub fn filter(&self, term: &str) -> Vec<String> {
        let term = term.to_lowercase();
        let finder = memmem::Finder::new(term.as_bytes());

        self.entries
            .iter()
            .zip(&self.lowercase)
            .filter(|(_, lower)| finder.find(lower.as_bytes()).is_some())
            .map(|(entry, _)| entry.clone())
            .collect()
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::io::Write;

    fn users(entries: &[&str]) -> KnownUsers {
        KnownUsers::new(entries.iter().map(|s| s.to_string()).collect())
    }

    #[test]
    fn test_substring_match_keeps_order() {
        let known = users(&["alice@x.com", "bob@x.com", "al@y.com"]);
        assert_eq!(known.filter("al"), vec!["alice@x.com", "al@y.com"]);
    }

    #[test]
    fn test_match_ignores_case_on_both_sides() {
        let known = users(&["Alice@X.com", "bob@x.com", "MALLORY@z.org"]);
        assert_eq!(known.filter("AL"), vec!["Alice@X.com", "MALLORY@z.org"]);
        assert_eq!(known.filter("x.COM"), vec!["Alice@X.com", "bob@x.com"]);
    }

    #[test]
    fn test_empty_term_matches_everything() {
        let known = users(&["alice@x.com", "bob@x.com"]);
        assert_eq!(known.filter(""), vec!["alice@x.com", "bob@x.com"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let known = users(&["alice@x.com"]);
        assert!(known.filter("zed").is_empty());
    }

    #[test]
    fn test_substring_must_be_contiguous() {
        let known = users(&["alice@x.com"]);
        assert!(known.filter("ae").is_empty());
    }

    #[test]
    fn test_duplicates_are_kept() {
        let known = users(&["al@x.com", "al@x.com"]);
        assert_eq!(known.filter("al").len(), 2);
    }

    #[test]
    fn test_non_ascii_case_folding() {
        let known = users(&["Élodie@exemple.fr", "zoe@exemple.fr"]);
        assert_eq!(known.filter("élo"), vec!["Élodie@exemple.fr"]);
    }

    #[test]
    fn test_from_json_parses_string_array() {
        let known = KnownUsers::from_json(r#"["a@x.com", "b@x.com"]"#).unwrap();
        assert_eq!(known.entries(), ["a@x.com".to_string(), "b@x.com".to_string()]);
    }

    #[test]
    fn test_from_json_rejects_other_shapes() {
        assert!(KnownUsers::from_json(r#"{"users": []}"#).is_err());
        assert!(KnownUsers::from_json(r#"[1, 2]"#).is_err());
        assert!(KnownUsers::from_json("not json").is_err());
    }

    #[test]
    fn test_load_reports_path_on_invalid_data() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[\"a@x.com\",").unwrap();

        let err = KnownUsers::load(file.path()).unwrap_err();
        assert!(matches!(err, PlaceformError::InvalidUsers { .. }));
        assert!(err.to_string().starts_with("Invalid users data"));
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let err = KnownUsers::load(&dir.path().join("users.json")).unwrap_err();
        assert!(matches!(err, PlaceformError::Io(_)));
    }

    // The filter result is exactly the order-preserving subsequence whose
    // lower-cased form contains the lower-cased term.
    proptest! {
        #![proptest_config(ProptestConfig::with_cases(200))]

        #[test]
        fn prop_filter_is_case_insensitive_subsequence(
            entries in prop::collection::vec("[a-zA-Z@.]{0,12}", 0..20),
            term in "[a-zA-Z@.]{0,4}",
        ) {
            let known = KnownUsers::new(entries.clone());
            let expected: Vec<String> = entries
                .iter()
                .filter(|e| e.to_lowercase().contains(&term.to_lowercase()))
                .cloned()
                .collect();

            prop_assert_eq!(known.filter(&term), expected);
        }
    }
}
