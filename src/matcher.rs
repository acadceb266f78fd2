// file: src/matcher.rs
// description: decides which keywords occur in a unit of extracted text
// reference: https://docs.rs/regex

use crate::error::{Result, SearchError};
use crate::models::{Keyword, KeywordSet};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchMode {
    /// Case-insensitive substring containment.
    #[default]
    Substring,
    /// Case-insensitive, only at word boundaries ("tax" does not match "taxi").
    WholeWord,
}

/// Keyword matcher for one search. Matching is OR across keywords and pure:
/// the same text always yields the same keyword set.
#[derive(Debug, Clone)]
pub struct Matcher {
    keywords: KeywordSet,
    word_patterns: Option<Vec<Regex>>,
}

impl Matcher {
    pub fn new(keywords: &KeywordSet) -> Self {
        Self {
            keywords: keywords.clone(),
            word_patterns: None,
        }
    }

    pub fn with_mode(keywords: &KeywordSet, mode: MatchMode) -> Result<Self> {
        let word_patterns = match mode {
            MatchMode::Substring => None,
            MatchMode::WholeWord => Some(
                keywords
                    .iter()
                    .map(|keyword| {
                        Regex::new(&whole_word_pattern(keyword.as_str()))
                            .map_err(|e| {
                                SearchError::InvalidInput(format!(
                                    "keyword '{}' cannot be matched as a whole word: {}",
                                    keyword, e
                                ))
                            })
                    })
                    .collect::<Result<Vec<_>>>()?,
            ),
        };

        Ok(Self {
            keywords: keywords.clone(),
            word_patterns,
        })
    }

    pub fn mode(&self) -> MatchMode {
        if self.word_patterns.is_some() {
            MatchMode::WholeWord
        } else {
            MatchMode::Substring
        }
    }

    pub fn keywords(&self) -> &KeywordSet {
        &self.keywords
    }

    /// Returns the keywords found in `text`; empty when nothing matched.
    pub fn matches(&self, text: &str) -> BTreeSet<Keyword> {
        if text.trim().is_empty() {
            return BTreeSet::new();
        }

        match &self.word_patterns {
            Some(patterns) => self
                .keywords
                .iter()
                .zip(patterns)
                .filter(|(_, pattern)| pattern.is_match(text))
                .map(|(keyword, _)| keyword.clone())
                .collect(),
            None => matches(text, &self.keywords),
        }
    }
}

/// `\b` only holds next to word characters, so edges like the `++` in
/// "c++" are left unanchored.
fn whole_word_pattern(keyword: &str) -> String {
    let is_word = |c: char| c.is_alphanumeric() || c == '_';
    let leading = if keyword.chars().next().is_some_and(is_word) { r"\b" } else { "" };
    let trailing = if keyword.chars().last().is_some_and(is_word) { r"\b" } else { "" };
    format!("(?i){}{}{}", leading, regex::escape(keyword), trailing)
}

/// Substring form of the matcher, usable without building a [`Matcher`].
pub fn matches(text: &str, keywords: &KeywordSet) -> BTreeSet<Keyword> {
    let folded = text.to_lowercase();
    keywords
        .iter()
        .filter(|keyword| folded.contains(keyword.as_str()))
        .cloned()
        .collect()
}
