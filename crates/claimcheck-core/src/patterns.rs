//! # Patterns Module
//!
//! The two ordered phrase lists checked before any evidence is read.
//!
//! A `PatternSet` is built once and never mutated. Phrases are stored
//! trimmed and lowercased; list order decides which phrase is reported
//! when several occur in the same claim.

use crate::error::CoreError;
use serde::{Deserialize, Serialize};

/// Built-in phrases that mark a claim as supported.
pub const BUILTIN_SUPPORTED: [&str; 8] = [
    "earth revolves around sun",
    "earth orbits sun",
    "sun center solar system",
    "gravity exists",
    "water boils 100 celsius",
    "broccoli green vegetable",
    "drinking water helps hydration",
    "vaccines prevent disease",
];

/// Built-in phrases that mark a claim as refuted.
pub const BUILTIN_REFUTED: [&str; 6] = [
    "vaccines cause autism",
    "earth is flat",
    "climate change hoax",
    "global warming hoax",
    "5g causes covid",
    "moon landing fake",
];

/// Serialized form: a mapping of verdict label to phrases.
#[derive(Debug, Default, Deserialize)]
struct RawPatterns {
    #[serde(default)]
    supported: Vec<String>,
    #[serde(default)]
    refuted: Vec<String>,
}

/// Immutable pair of disjoint phrase lists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPatterns")]
pub struct PatternSet {
    supported: Vec<String>,
    refuted: Vec<String>,
}

impl PatternSet {
    /// Build a pattern set from injected phrase lists.
    ///
    /// Phrases are trimmed and lowercased. Empty phrases and phrases
    /// present in both lists are rejected.
    pub fn new<S, R>(supported: S, refuted: R) -> Result<Self, CoreError>
    where
        S: IntoIterator,
        S::Item: AsRef<str>,
        R: IntoIterator,
        R::Item: AsRef<str>,
    {
        let supported = normalize_list(supported, "supported")?;
        let refuted = normalize_list(refuted, "refuted")?;

        if let Some(phrase) = supported.iter().find(|p| refuted.contains(p)) {
            return Err(CoreError::OverlappingPattern {
                phrase: phrase.clone(),
            });
        }

        Ok(Self { supported, refuted })
    }

    /// The eight supported and six refuted built-in phrases.
    #[must_use]
    pub fn builtin() -> Self {
        Self {
            supported: BUILTIN_SUPPORTED.iter().map(|p| (*p).to_string()).collect(),
            refuted: BUILTIN_REFUTED.iter().map(|p| (*p).to_string()).collect(),
        }
    }

    /// Supported phrases in priority order.
    #[must_use]
    pub fn supported(&self) -> &[String] {
        &self.supported
    }

    /// Refuted phrases in priority order.
    #[must_use]
    pub fn refuted(&self) -> &[String] {
        &self.refuted
    }

    /// First supported phrase (in list order) contained in `normalized`.
    #[must_use]
    pub fn match_supported(&self, normalized: &str) -> Option<&str> {
        first_contained(&self.supported, normalized)
    }

    /// First refuted phrase (in list order) contained in `normalized`.
    #[must_use]
    pub fn match_refuted(&self, normalized: &str) -> Option<&str> {
        first_contained(&self.refuted, normalized)
    }
}

impl Default for PatternSet {
    fn default() -> Self {
        Self::builtin()
    }
}

impl TryFrom<RawPatterns> for PatternSet {
    type Error = CoreError;

    fn try_from(raw: RawPatterns) -> Result<Self, Self::Error> {
        Self::new(raw.supported, raw.refuted)
    }
}

fn normalize_list<I>(phrases: I, list: &'static str) -> Result<Vec<String>, CoreError>
where
    I: IntoIterator,
    I::Item: AsRef<str>,
{
    phrases
        .into_iter()
        .map(|p| {
            let phrase = p.as_ref().trim().to_lowercase();
            if phrase.is_empty() {
                Err(CoreError::EmptyPattern { list })
            } else {
                Ok(phrase)
            }
        })
        .collect()
}

fn first_contained<'a>(phrases: &'a [String], normalized: &str) -> Option<&'a str> {
    phrases
        .iter()
        .find(|p| normalized.contains(p.as_str()))
        .map(String::as_str)
}

// =============================================================================
// TESTS
// =============================================================================
