//! Keyword classification.
//!
//! A [`KeywordSet`] is a named list of phrases; its [`KeywordMatcher`] finds
//! them anywhere in a message, ignoring case. Matching is substring based, so
//! `"uti"` also matches inside `"utilizar"`.

use std::collections::HashMap;

use regex::{Regex, RegexBuilder};
use serde::{Deserialize, Serialize};

use crate::Table;
use crate::error::{ChatlensError, Result};

const PANDEMIC_KEYWORDS: &[&str] = &[
    "covid",
    "covid-19",
    "corona vírus",
    "coronavírus",
    "pandemia",
    "quarentena",
    "isolamento social",
    "lockdown",
    "distanciamento social",
    "máscara",
    "PCR",
    "variante",
    "OMS",
    "organização mundial da saúde",
    "UTI",
    "tratamento",
    "ventilação mecânica",
    "febre",
    "tosse",
    "falta de ar",
    "perda de olfato",
    "paladar",
    "sars-cov-2",
    "epidemia",
];

const PROFANITY_KEYWORDS: &[&str] = &[
    "caralho",
    "porra",
    "fude",
    "foder",
    "fuder",
    "puta que pariu",
    "filho da puta",
    "tomar no cu",
    "merda",
    "desgraça",
    "bosta",
    "arrombado",
    "crlh",
    "pqp",
    "vsf",
    "corno",
    "maldito",
    "cacete",
];

/// A named list of keywords.
///
/// # Example
///
/// ```rust
/// use chatlens::analysis::KeywordSet;
///
/// let set = KeywordSet::new("weather", ["chuva", "sol"]);
/// let matcher = set.matcher()?;
/// assert!(matcher.is_match("Que CHUVA hoje"));
/// assert!(!matcher.is_match("nublado"));
/// # Ok::<(), chatlens::ChatlensError>(())
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordSet {
    pub name: String,
    #[serde(default)]
    pub keywords: Vec<String>,
}

impl KeywordSet {
    pub fn new<I, S>(name: impl Into<String>, keywords: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            keywords: keywords.into_iter().map(Into::into).collect(),
        }
    }

    /// COVID-19 related vocabulary (Brazilian Portuguese).
    pub fn pandemic() -> Self {
        Self::new("pandemic", PANDEMIC_KEYWORDS.iter().copied())
    }

    /// Common Brazilian Portuguese profanity.
    pub fn profanity() -> Self {
        Self::new("profanity", PROFANITY_KEYWORDS.iter().copied())
    }

    /// Compiles the set into a case-insensitive matcher.
    pub fn matcher(&self) -> Result<KeywordMatcher> {
        KeywordMatcher::new(&self.keywords)
    }
}

/// Compiled form of a [`KeywordSet`].
///
/// Longer keywords are tried first, so overlapping entries such as
/// `"covid"` and `"covid-19"` report the longer match.
#[derive(Debug, Clone)]
pub struct KeywordMatcher {
    regex: Option<Regex>,
}

impl KeywordMatcher {
    pub fn new<S: AsRef<str>>(keywords: &[S]) -> Result<Self> {
        let mut escaped: Vec<String> = keywords
            .iter()
            .map(AsRef::<str>::as_ref)
            .filter(|k| !k.is_empty())
            .map(regex::escape)
            .collect();
        if escaped.is_empty() {
            return Ok(Self { regex: None });
        }
        escaped.sort_by(|a, b| b.len().cmp(&a.len()).then_with(|| a.cmp(b)));
        escaped.dedup();

        let regex = RegexBuilder::new(&escaped.join("|"))
            .case_insensitive(true)
            .build()
            .map_err(|e| ChatlensError::invalid_format("keyword set", e.to_string()))?;
        Ok(Self { regex: Some(regex) })
    }

    /// Returns `true` if any keyword occurs in `text`.
    pub fn is_match(&self, text: &str) -> bool {
        self.regex.as_ref().is_some_and(|re| re.is_match(text))
    }

    /// Returns every non-overlapping keyword occurrence in `text`, as written.
    pub fn find_all<'t>(&self, text: &'t str) -> Vec<&'t str> {
        match &self.regex {
            Some(re) => re.find_iter(text).map(|m| m.as_str()).collect(),
            None => Vec::new(),
        }
    }
}

/// Frequency of one keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeywordCount {
    pub keyword: String,
    pub count: usize,
}

/// Returns the rows containing at least one keyword.
pub fn filter_by_keywords(table: &Table, matcher: &KeywordMatcher) -> Table {
    table.filter(|record| matcher.is_match(&record.message))
}

/// Counts keyword occurrences across all messages.
///
/// Occurrences are grouped by their lowercased text and sorted by count,
/// most frequent first, ties alphabetically.
pub fn keyword_occurrences(table: &Table, matcher: &KeywordMatcher) -> Vec<KeywordCount> {
    let mut counts: HashMap<String, usize> = HashMap::new();
    for record in table {
        for found in matcher.find_all(&record.message) {
            *counts.entry(found.to_lowercase()).or_default() += 1;
        }
    }

    let mut out: Vec<KeywordCount> = counts
        .into_iter()
        .map(|(keyword, count)| KeywordCount { keyword, count })
        .collect();
    out.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.keyword.cmp(&b.keyword)));
    out
}
