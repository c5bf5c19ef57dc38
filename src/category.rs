//! Candidate categories and suggestion filtering.
//!
//! The candidate list is fixed once constructed. Suggestions are the
//! candidates whose lowercase form starts with the trimmed, lowercased query,
//! sorted lexicographically. An empty query suggests everything.

use crate::error::{LabelError, Result};

/// Categories offered when no config overrides them.
pub const DEFAULT_CATEGORIES: &[&str] = &[
    "Food",
    "Beverages",
    "Sports",
    "Learning",
    "Travel",
    "Rent",
    "Bills",
    "Fees",
    "Others",
];

/// An immutable, ordered set of candidate strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateSet {
    items: Vec<String>,
}

impl CandidateSet {
    /// Builds a candidate set from the given names.
    ///
    /// Names are trimmed. Blank names are rejected; repeated names keep their
    /// first occurrence.
    pub fn new<I, S>(names: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut items: Vec<String> = Vec::new();
        for name in names {
            let name = name.as_ref().trim();
            if name.is_empty() {
                return Err(LabelError::config("Category names must not be blank"));
            }
            if !items.iter().any(|existing| existing == name) {
                items.push(name.to_string());
            }
        }

        if items.is_empty() {
            return Err(LabelError::config("At least one category is required"));
        }

        Ok(Self { items })
    }

    /// Returns the candidates in construction order.
    pub fn items(&self) -> &[String] {
        &self.items
    }

    /// Number of candidates.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Returns true if the set has no candidates.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Returns the suggestions for the given field text.
    pub fn suggestions(&self, text: &str) -> Vec<&str> {
        let query = normalize_query(text);

        let mut matches: Vec<&str> = self
            .items
            .iter()
            .map(String::as_str)
            .filter(|candidate| query.is_empty() || candidate.to_lowercase().starts_with(&query))
            .collect();
        matches.sort_unstable();
        matches
    }
}

impl Default for CandidateSet {
    fn default() -> Self {
        Self {
            items: DEFAULT_CATEGORIES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

/// Lowercases then trims, matching how the field text is compared.
pub fn normalize_query(text: &str) -> String {
    text.to_lowercase().trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_empty_query_returns_all_sorted() {
        let set = CandidateSet::default();
        let all = set.suggestions("");
        assert_eq!(
            all,
            vec![
                "Beverages",
                "Bills",
                "Fees",
                "Food",
                "Learning",
                "Others",
                "Rent",
                "Sports",
                "Travel",
            ]
        );
        assert_eq!(all.len(), 9);
    }

    #[test]
    fn test_whitespace_query_is_empty() {
        let set = CandidateSet::default();
        assert_eq!(set.suggestions("   ").len(), 9);
    }

    #[test]
    fn test_prefix_f() {
        let set = CandidateSet::default();
        assert_eq!(set.suggestions("f"), vec!["Fees", "Food"]);
    }

    #[test]
    fn test_prefix_case_insensitive() {
        let set = CandidateSet::default();
        assert_eq!(set.suggestions("FO"), vec!["Food"]);
        assert_eq!(set.suggestions("  bI "), vec!["Bills"]);
    }

    #[test]
    fn test_no_match_is_empty() {
        let set = CandidateSet::default();
        assert!(set.suggestions("z").is_empty());
    }

    #[test]
    fn test_substring_is_not_a_match() {
        let set = CandidateSet::default();
        // "ood" appears inside "Food" but is not a prefix
        assert!(set.suggestions("ood").is_empty());
    }

    #[test]
    fn test_every_result_sorted_and_prefixed() {
        let set = CandidateSet::default();
        for query in ["", "b", "Be", "s", "t", "r", "o", "x", "LEA", " fe"] {
            let results = set.suggestions(query);
            let q = normalize_query(query);
            assert!(results.windows(2).all(|w| w[0] <= w[1]), "unsorted for {query:?}");
            assert!(results.iter().all(|r| r.to_lowercase().starts_with(&q)));
        }
    }

    #[test]
    fn test_custom_set_trims_and_dedups() {
        let set = CandidateSet::new([" Tea ", "Coffee", "Tea"]).unwrap();
        assert_eq!(set.items(), &["Tea".to_string(), "Coffee".to_string()]);
        assert_eq!(set.suggestions(""), vec!["Coffee", "Tea"]);
    }

    #[test]
    fn test_custom_set_rejects_blank() {
        let err = CandidateSet::new(["Food", "  "]).unwrap_err();
        assert!(err.to_string().contains("must not be blank"));
    }

    #[test]
    fn test_custom_set_rejects_empty() {
        let names: Vec<String> = Vec::new();
        assert!(CandidateSet::new(names).is_err());
    }
}
