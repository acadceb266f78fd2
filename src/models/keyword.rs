// file: src/models/keyword.rs
// description: case-folded keywords and the ordered keyword set parsed from user input
// reference: https://docs.rs/regex

use crate::error::{Result, SearchError};
use lazy_static::lazy_static;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::fmt;

lazy_static! {
    static ref KEYWORD_DELIMITERS: Regex =
        Regex::new(r"[,;\r\n]+").expect("KEYWORD_DELIMITERS regex is valid");
}

/// A single search term, stored in its case-folded form.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Keyword(String);

impl Keyword {
    /// Trims and case-folds `raw`. Returns `None` for blank input.
    pub fn new(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_lowercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Keyword {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Ordered, de-duplicated, never-empty list of keywords.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct KeywordSet(Vec<Keyword>);

impl KeywordSet {
    /// Builds a set from individual terms, keeping the first occurrence of
    /// each case-folded keyword.
    pub fn new<I, S>(terms: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut keywords: Vec<Keyword> = Vec::new();
        for term in terms {
            if let Some(keyword) = Keyword::new(term.as_ref())
                && !keywords.contains(&keyword)
            {
                keywords.push(keyword);
            }
        }

        if keywords.is_empty() {
            return Err(SearchError::InvalidInput(
                "at least one non-blank keyword is required".to_string(),
            ));
        }

        Ok(Self(keywords))
    }

    /// Parses the raw keyword field: terms separated by commas, semicolons
    /// or line breaks.
    pub fn parse(raw: &str) -> Result<Self> {
        Self::new(KEYWORD_DELIMITERS.split(raw))
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Keyword> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, keyword: &Keyword) -> bool {
        self.0.contains(keyword)
    }
}

impl<'a> IntoIterator for &'a KeywordSet {
    type Item = &'a Keyword;
    type IntoIter = std::slice::Iter<'a, Keyword>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

impl fmt::Display for KeywordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined: Vec<&str> = self.0.iter().map(Keyword::as_str).collect();
        f.write_str(&joined.join(", "))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terms(set: &KeywordSet) -> Vec<&str> {
        set.iter().map(Keyword::as_str).collect()
    }

    #[test]
    fn test_parse_splits_trims_and_folds() {
        let set = KeywordSet::parse("  Budget , Revenue;forecast\nQ3 ").unwrap();
        assert_eq!(terms(&set), vec!["budget", "revenue", "forecast", "q3"]);
    }

    #[test]
    fn test_parse_deduplicates_after_case_folding() {
        let set = KeywordSet::parse("Budget, budget, BUDGET, total").unwrap();
        assert_eq!(terms(&set), vec!["budget", "total"]);
    }

    #[test]
    fn test_parse_keeps_inner_spaces() {
        let set = KeywordSet::parse("annual report, cash flow").unwrap();
        assert_eq!(terms(&set), vec!["annual report", "cash flow"]);
    }

    #[test]
    fn test_empty_input_is_invalid() {
        for raw in ["", "   ", ",,,", " ; \n , "] {
            let err = KeywordSet::parse(raw).unwrap_err();
            assert!(matches!(err, SearchError::InvalidInput(_)), "input {:?}", raw);
        }
    }

    #[test]
    fn test_new_from_terms() {
        let set = KeywordSet::new(["Alpha", " ", "beta"]).unwrap();
        assert_eq!(set.len(), 2);
        assert!(set.contains(&Keyword::new("ALPHA").unwrap()));
        assert_eq!(set.to_string(), "alpha, beta");
    }
}
