//! # Types Module
//!
//! The verification data model: verdicts, stances, evidence input and the
//! result record written back to callers.
//!
//! Confidence is held as an integer number of hundredths. The only float
//! conversion happens at the serialization edge.

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

// =============================================================================
// VERDICT & STANCE
// =============================================================================

/// Closed set of verification outcomes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Verdict {
    Supported,
    Refuted,
    NotEnoughInfo,
}

impl Verdict {
    /// Wire name of the verdict.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Supported => "supported",
            Self::Refuted => "refuted",
            Self::NotEnoughInfo => "not_enough_info",
        }
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Assumed relationship between one evidence item and the claim.
///
/// Derived from the overall verdict, never from per-item analysis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Stance {
    Supports,
    Refutes,
}

// =============================================================================
// CONFIDENCE
// =============================================================================

/// Confidence score in hundredths (0..=100).
///
/// Serialized as a JSON number in `[0.0, 1.0]`, so `Confidence::new(85)`
/// is written as `0.85`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Confidence(u8);

impl Confidence {
    /// Direct pattern hit on the supported list.
    pub const PATTERN_SUPPORTED: Self = Self(85);
    /// Direct pattern hit on the refuted list.
    pub const PATTERN_REFUTED: Self = Self(90);
    /// No pattern and no evidence.
    pub const NO_MATCH: Self = Self(40);
    /// Overlap heuristic invoked with an empty evidence list.
    pub const NO_EVIDENCE: Self = Self(30);
    /// Fixed per-item confidence in tagged evidence.
    pub const EVIDENCE_ITEM: Self = Self(70);
    /// Starting point of the overlap heuristic.
    pub const OVERLAP_BASE: Self = Self(50);
    /// Increment per counted evidence item.
    pub const OVERLAP_STEP: Self = Self(10);
    /// Ceiling of the overlap heuristic.
    pub const OVERLAP_CAP: Self = Self(80);

    /// Create a confidence, clamped to 100.
    #[must_use]
    pub const fn new(hundredths: u8) -> Self {
        if hundredths > 100 {
            Self(100)
        } else {
            Self(hundredths)
        }
    }

    /// Raw value in hundredths.
    #[must_use]
    pub const fn hundredths(self) -> u8 {
        self.0
    }

    /// Overlap heuristic score: `min(cap, base + count * step)`.
    #[must_use]
    pub fn from_overlap_count(count: usize) -> Self {
        let raw = (Self::OVERLAP_BASE.0 as usize)
            .saturating_add(count.saturating_mul(Self::OVERLAP_STEP.0 as usize));
        Self(raw.min(Self::OVERLAP_CAP.0 as usize) as u8)
    }

    /// Value as a fraction in `[0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn as_f64(self) -> f64 {
        f64::from(self.0) / 100.0
    }

    /// Parse a fraction, rounding to the nearest hundredth.
    ///
    /// Returns `None` for NaN or values outside `[0.0, 1.0]`.
    #[must_use]
    #[allow(clippy::float_arithmetic)]
    pub fn from_f64(value: f64) -> Option<Self> {
        if !(0.0..=1.0).contains(&value) {
            return None;
        }
        Some(Self((value * 100.0).round() as u8))
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_f64())
    }
}

impl Serialize for Confidence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_f64(self.as_f64())
    }
}

impl<'de> Deserialize<'de> for Confidence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = f64::deserialize(deserializer)?;
        Self::from_f64(value).ok_or_else(|| {
            serde::de::Error::custom(format!("confidence {value} outside [0.0, 1.0]"))
        })
    }
}

// =============================================================================
// EVIDENCE INPUT
// =============================================================================

/// Default source label for evidence without one.
pub const UNKNOWN_SOURCE: &str = "Unknown";

/// One piece of external text offered for or against a claim.
///
/// Every field is optional; absent and `null` fields fall back to
/// defaults through the accessors. Unknown fields are ignored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceItem {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub snippet: Option<String>,
}

impl EvidenceItem {
    /// Create an evidence item with all three fields set.
    #[must_use]
    pub fn new(
        source: impl Into<String>,
        title: impl Into<String>,
        snippet: impl Into<String>,
    ) -> Self {
        Self {
            source: Some(source.into()),
            title: Some(title.into()),
            snippet: Some(snippet.into()),
        }
    }

    /// Source label, or `"Unknown"`.
    #[must_use]
    pub fn source(&self) -> &str {
        self.source.as_deref().unwrap_or(UNKNOWN_SOURCE)
    }

    /// Title, or the empty string.
    #[must_use]
    pub fn title(&self) -> &str {
        self.title.as_deref().unwrap_or_default()
    }

    /// Snippet, or the empty string.
    #[must_use]
    pub fn snippet(&self) -> &str {
        self.snippet.as_deref().unwrap_or_default()
    }

    /// Lowercased `snippet + " " + title`.
    #[must_use]
    pub fn search_text(&self) -> String {
        format!("{} {}", self.snippet(), self.title()).to_lowercase()
    }
}

// =============================================================================
// RESULT
// =============================================================================

/// Per-item entry in `evidence_analysis`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EvidenceAssessment {
    /// 0-based index into the evidence list as passed in.
    pub evidence_id: usize,
    pub stance: Stance,
    pub confidence: Confidence,
    pub source: String,
}

/// Outcome of one `verify` call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct VerificationResult {
    pub verdict: Verdict,
    pub confidence: Confidence,
    /// Which rule fired, in human-readable form.
    pub reasoning: String,
    /// At most five tagged evidence items.
    pub evidence_analysis: Vec<EvidenceAssessment>,
}

impl VerificationResult {
    /// Create a result with the given fields.
    #[must_use]
    pub fn new(
        verdict: Verdict,
        confidence: Confidence,
        reasoning: impl Into<String>,
        evidence_analysis: Vec<EvidenceAssessment>,
    ) -> Self {
        Self {
            verdict,
            confidence,
            reasoning: reasoning.into(),
            evidence_analysis,
        }
    }

    /// A `not_enough_info` result with no evidence analysis.
    #[must_use]
    pub fn insufficient(confidence: Confidence, reasoning: impl Into<String>) -> Self {
        Self::new(Verdict::NotEnoughInfo, confidence, reasoning, Vec::new())
    }
}

// =============================================================================
// TESTS
// =============================================================================
