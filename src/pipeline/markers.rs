//! Hallucination markers: phrases the recognizer emits without matching speech.
//!
//! Matching is a case-insensitive substring search, compared char by char so
//! it stays correct for non-ASCII scripts.

use std::fs;
use std::path::Path;

/// Ordered, immutable set of hallucination phrases.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HallucinationMarkers {
    phrases: Vec<String>,
}

impl HallucinationMarkers {
    /// Build a marker set from phrases. Phrases are trimmed; blank ones are skipped.
    pub fn new<I, S>(phrases: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            phrases: phrases
                .into_iter()
                .map(|p| p.as_ref().trim().to_string())
                .filter(|p| !p.is_empty())
                .collect(),
        }
    }

    /// Parse a line-oriented marker resource: one phrase per line, blanks ignored.
    pub fn parse(contents: &str) -> Self {
        Self::new(contents.lines())
    }

    /// Load markers from a file.
    ///
    /// A missing path, missing file or unreadable file yields an empty set.
    pub fn load(path: Option<&Path>) -> Self {
        match path.map(fs::read_to_string) {
            Some(Ok(contents)) => Self::parse(&contents),
            _ => Self::default(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.phrases.is_empty()
    }

    pub fn len(&self) -> usize {
        self.phrases.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.phrases.iter().map(String::as_str)
    }

    /// True when any marker occurs in `text`, ignoring case.
    pub fn matches(&self, text: &str) -> bool {
        let haystack: Vec<char> = text.chars().collect();
        self.phrases.iter().any(|phrase| {
            let needle: Vec<char> = phrase.chars().collect();
            (0..haystack.len()).any(|i| matches_at(&haystack, i, &needle))
        })
    }

    /// Remove every occurrence of every marker (case-insensitive), then trim.
    ///
    /// Markers are removed one after another in set order, so text exposed by
    /// removing an earlier marker can still match a later one.
    pub fn strip(&self, text: &str) -> String {
        let mut current = text.to_string();
        for phrase in &self.phrases {
            current = remove_ignoring_case(&current, phrase);
        }
        current.trim().to_string()
    }
}

fn chars_eq_ignoring_case(a: char, b: char) -> bool {
    a == b || a.to_lowercase().eq(b.to_lowercase())
}

fn matches_at(haystack: &[char], i: usize, needle: &[char]) -> bool {
    !needle.is_empty()
        && i + needle.len() <= haystack.len()
        && haystack[i..i + needle.len()]
            .iter()
            .zip(needle)
            .all(|(h, n)| chars_eq_ignoring_case(*h, *n))
}

fn remove_ignoring_case(text: &str, phrase: &str) -> String {
    let haystack: Vec<char> = text.chars().collect();
    let needle: Vec<char> = phrase.chars().collect();
    let mut result = String::with_capacity(text.len());
    let mut i = 0;
    while i < haystack.len() {
        if matches_at(&haystack, i, &needle) {
            i += needle.len();
        } else {
            result.push(haystack[i]);
            i += 1;
        }
    }
    result
}
