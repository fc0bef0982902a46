//! # Verifier Module
//!
//! Claim verification against fixed phrase lists and supplied evidence.
//!
//! Precedence, first rule wins:
//! 1. a supported phrase occurs in the normalized claim
//! 2. a refuted phrase occurs in the normalized claim
//! 3. evidence is present: token-overlap heuristic
//! 4. otherwise: `not_enough_info`
//!
//! Every call is a pure function of `(patterns, claim, evidence)`.

use crate::patterns::PatternSet;
use crate::types::{
    Confidence, EvidenceAssessment, EvidenceItem, Stance, Verdict, VerificationResult,
};
use std::collections::BTreeSet;

/// Maximum number of entries in `evidence_analysis`.
pub const MAX_TAGGED_EVIDENCE: usize = 5;

/// Minimum number of shared tokens before an evidence item is counted.
pub const MIN_OVERLAP: usize = 3;

/// Substrings that count an overlapping evidence item as supporting.
pub const SUPPORT_KEYWORDS: [&str; 4] = ["true", "correct", "confirmed", "proven"];

/// Substrings that count an overlapping evidence item as refuting.
///
/// Only consulted when no support keyword is present.
pub const REFUTE_KEYWORDS: [&str; 4] = ["false", "wrong", "debunked", "myth"];

// =============================================================================
// OVERLAP TALLY
// =============================================================================

/// Supporting and refuting counts from the overlap heuristic.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct OverlapTally {
    pub support: usize,
    pub refute: usize,
}

impl OverlapTally {
    /// Count every evidence item (no truncation) against the claim tokens.
    #[must_use]
    pub fn count(claim: &str, evidence: &[EvidenceItem]) -> Self {
        let claim_lower = claim.to_lowercase();
        let claim_words = tokens(&claim_lower);
        let mut tally = Self::default();

        for item in evidence {
            let text = item.search_text();
            let overlap = tokens(&text).intersection(&claim_words).count();
            if overlap < MIN_OVERLAP {
                continue;
            }

            if contains_any(&text, &SUPPORT_KEYWORDS) {
                tally.support = tally.support.saturating_add(1);
            } else if contains_any(&text, &REFUTE_KEYWORDS) {
                tally.refute = tally.refute.saturating_add(1);
            }
        }

        tally
    }

    /// Verdict and confidence implied by the counts.
    #[must_use]
    pub fn decide(&self) -> (Verdict, Confidence) {
        if self.support > self.refute {
            (Verdict::Supported, Confidence::from_overlap_count(self.support))
        } else if self.refute > self.support {
            (Verdict::Refuted, Confidence::from_overlap_count(self.refute))
        } else {
            (Verdict::NotEnoughInfo, Confidence::NO_MATCH)
        }
    }
}

// =============================================================================
// CLAIM VERIFIER
// =============================================================================

/// Stateless heuristic verifier.
///
/// Holds only the immutable pattern configuration, so one instance can be
/// shared freely across threads.
#[derive(Debug, Clone, Default)]
pub struct ClaimVerifier {
    patterns: PatternSet,
}

impl ClaimVerifier {
    /// Create a verifier over the given pattern set.
    #[must_use]
    pub fn new(patterns: PatternSet) -> Self {
        Self { patterns }
    }

    /// The pattern configuration in use.
    #[must_use]
    pub fn patterns(&self) -> &PatternSet {
        &self.patterns
    }

    /// Assign a verdict to `claim` given `evidence`.
    ///
    /// Never fails: missing evidence fields fall back to defaults.
    #[must_use]
    pub fn verify(&self, claim: &str, evidence: &[EvidenceItem]) -> VerificationResult {
        let normalized = claim.to_lowercase();
        let normalized = normalized.trim();

        if let Some(phrase) = self.patterns.match_supported(normalized) {
            return VerificationResult::new(
                Verdict::Supported,
                Confidence::PATTERN_SUPPORTED,
                format!("Claim matches known supported pattern: {phrase}"),
                tag_evidence(evidence, Stance::Supports),
            );
        }

        if let Some(phrase) = self.patterns.match_refuted(normalized) {
            return VerificationResult::new(
                Verdict::Refuted,
                Confidence::PATTERN_REFUTED,
                format!("Claim matches known refuted pattern: {phrase}"),
                tag_evidence(evidence, Stance::Refutes),
            );
        }

        if !evidence.is_empty() {
            return self.analyze_with_evidence(claim, evidence);
        }

        VerificationResult::insufficient(
            Confidence::NO_MATCH,
            "No matching patterns found and insufficient evidence",
        )
    }

    /// Token-overlap heuristic over all evidence items.
    ///
    /// The tie case (including zero counts) tags evidence as `refutes`
    /// even though the verdict is `not_enough_info`.
    #[must_use]
    pub fn analyze_with_evidence(
        &self,
        claim: &str,
        evidence: &[EvidenceItem],
    ) -> VerificationResult {
        if evidence.is_empty() {
            return VerificationResult::insufficient(
                Confidence::NO_EVIDENCE,
                "No evidence provided",
            );
        }

        let tally = OverlapTally::count(claim, evidence);
        let (verdict, confidence) = tally.decide();
        let stance = if verdict == Verdict::Supported {
            Stance::Supports
        } else {
            Stance::Refutes
        };

        VerificationResult::new(
            verdict,
            confidence,
            format!(
                "Evidence analysis: {} supporting, {} refuting items",
                tally.support, tally.refute
            ),
            tag_evidence(evidence, stance),
        )
    }
}

/// Tag the first five evidence items with a fixed stance.
#[must_use]
pub fn tag_evidence(evidence: &[EvidenceItem], stance: Stance) -> Vec<EvidenceAssessment> {
    evidence
        .iter()
        .take(MAX_TAGGED_EVIDENCE)
        .enumerate()
        .map(|(evidence_id, item)| EvidenceAssessment {
            evidence_id,
            stance,
            confidence: Confidence::EVIDENCE_ITEM,
            source: item.source().to_string(),
        })
        .collect()
}

/// Whitespace-delimited tokens, duplicates collapsed.
///
/// The ASCII information separators U+001C..=U+001F also split tokens.
fn tokens(text: &str) -> BTreeSet<&str> {
    text.split(is_token_separator)
        .filter(|t| !t.is_empty())
        .collect()
}

fn is_token_separator(c: char) -> bool {
    c.is_whitespace() || ('\x1c'..='\x1f').contains(&c)
}

fn contains_any(text: &str, keywords: &[&str]) -> bool {
    keywords.iter().any(|k| text.contains(k))
}

// =============================================================================
// TESTS
// =============================================================================

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    fn item(source: &str, title: &str, snippet: &str) -> EvidenceItem {
        EvidenceItem::new(source, title, snippet)
    }

    #[test]
    fn supported_pattern_wins() {
        let verifier = ClaimVerifier::default();
        let result = verifier.verify("  EARTH REVOLVES AROUND SUN, obviously ", &[]);

        assert_eq!(result.verdict, Verdict::Supported);
        assert_eq!(result.confidence, Confidence::PATTERN_SUPPORTED);
        assert_eq!(
            result.reasoning,
            "Claim matches known supported pattern: earth revolves around sun"
        );
        assert!(result.evidence_analysis.is_empty());
    }

    #[test]
    fn phrase_must_occur_verbatim() {
        let verifier = ClaimVerifier::default();
        // "around the sun" is not "around sun"
        let result = verifier.verify("The Earth revolves around the Sun", &[]);
        assert_eq!(result.verdict, Verdict::NotEnoughInfo);
        assert_eq!(result.confidence, Confidence::NO_MATCH);
    }

    #[test]
    fn refuted_pattern() {
        let verifier = ClaimVerifier::default();
        let result = verifier.verify("Vaccines cause autism in children", &[]);

        assert_eq!(result.verdict, Verdict::Refuted);
        assert_eq!(result.confidence, Confidence::PATTERN_REFUTED);
        assert!(result.reasoning.ends_with("vaccines cause autism"));
    }

    #[test]
    fn supported_checked_before_refuted() {
        let verifier = ClaimVerifier::default();
        let result = verifier.verify("gravity exists but the earth is flat", &[]);
        assert_eq!(result.verdict, Verdict::Supported);
        assert!(result.reasoning.ends_with("gravity exists"));
    }

    #[test]
    fn pattern_hit_tags_evidence_with_stance() {
        let verifier = ClaimVerifier::default();
        let evidence: Vec<_> = (0..7).map(|i| item(&format!("S{i}"), "", "")).collect();

        let result = verifier.verify("the moon landing fake theory", &evidence);
        assert_eq!(result.verdict, Verdict::Refuted);
        assert_eq!(result.evidence_analysis.len(), MAX_TAGGED_EVIDENCE);
        for (i, entry) in result.evidence_analysis.iter().enumerate() {
            assert_eq!(entry.evidence_id, i);
            assert_eq!(entry.stance, Stance::Refutes);
            assert_eq!(entry.confidence, Confidence::EVIDENCE_ITEM);
            assert_eq!(entry.source, format!("S{i}"));
        }
    }

    #[test]
    fn no_pattern_no_evidence() {
        let verifier = ClaimVerifier::default();
        let result = verifier.verify("Coffee improves memory", &[]);

        assert_eq!(result.verdict, Verdict::NotEnoughInfo);
        assert_eq!(result.confidence, Confidence::NO_MATCH);
        assert_eq!(result.reasoning, "No matching patterns found and insufficient evidence");
        assert!(result.evidence_analysis.is_empty());
    }

    #[test]
    fn overlap_with_support_keyword() {
        let verifier = ClaimVerifier::default();
        let evidence = [item(
            "JournalX",
            "Coffee study",
            "Studies confirmed coffee improves memory in adults",
        )];

        let result = verifier.verify("Coffee improves memory", &evidence);
        assert_eq!(result.verdict, Verdict::Supported);
        assert_eq!(result.confidence, Confidence::new(60));
        assert_eq!(result.reasoning, "Evidence analysis: 1 supporting, 0 refuting items");
        assert_eq!(result.evidence_analysis.len(), 1);
        assert_eq!(result.evidence_analysis[0].stance, Stance::Supports);
        assert_eq!(result.evidence_analysis[0].source, "JournalX");
    }

    #[test]
    fn low_overlap_ties_and_tags_refutes() {
        let verifier = ClaimVerifier::default();
        let evidence = [EvidenceItem {
            snippet: Some("something else entirely".to_string()),
            title: Some(String::new()),
            source: None,
        }];

        let result = verifier.verify("Unrelated statement", &evidence);
        assert_eq!(result.verdict, Verdict::NotEnoughInfo);
        assert_eq!(result.confidence, Confidence::NO_MATCH);
        assert_eq!(result.reasoning, "Evidence analysis: 0 supporting, 0 refuting items");
        assert_eq!(result.evidence_analysis.len(), 1);
        assert_eq!(result.evidence_analysis[0].stance, Stance::Refutes);
        assert_eq!(result.evidence_analysis[0].source, "Unknown");
    }

    #[test]
    fn nonzero_tie_is_not_enough_info() {
        let verifier = ClaimVerifier::default();
        let claim = "the bridge was built in 1990";
        let evidence = [
            item("A", "", "confirmed: the bridge was built in 1990"),
            item("B", "", "debunked: the bridge was built in 1990"),
        ];

        let result = verifier.verify(claim, &evidence);
        assert_eq!(result.verdict, Verdict::NotEnoughInfo);
        assert_eq!(result.confidence, Confidence::NO_MATCH);
        assert_eq!(result.reasoning, "Evidence analysis: 1 supporting, 1 refuting items");
        assert_eq!(result.evidence_analysis.len(), 2);
        assert!(result.evidence_analysis.iter().all(|e| e.stance == Stance::Refutes));
    }

    #[test]
    fn repeated_claim_tokens_count_once() {
        // {"cats", "purr"} after collapsing duplicates
        let claim = "cats cats cats purr";
        let evidence = [item("A", "", "cats purr, true, cats purr")];
        assert_eq!(OverlapTally::count(claim, &evidence), OverlapTally::default());

        let claim = "cats cats purr loudly";
        let evidence = [item("A", "", "true: cats purr loudly")];
        assert_eq!(OverlapTally::count(claim, &evidence).support, 1);
    }

    #[test]
    fn information_separators_split_tokens() {
        let claim = "honey\x1fnever\x1cspoils";
        let evidence = [item("A", "", "proven: honey never spoils")];
        assert_eq!(OverlapTally::count(claim, &evidence).support, 1);
        assert_eq!(tokens("a\x1db \x1e c"), BTreeSet::from(["a", "b", "c"]));
    }

    #[test]
    fn support_keyword_shadows_refute_keyword() {
        let claim = "the bridge was built in 1990";
        let evidence = [item("A", "", "it is true and false that the bridge was built in 1990")];
        let tally = OverlapTally::count(claim, &evidence);
        assert_eq!(tally, OverlapTally { support: 1, refute: 0 });
    }

    #[test]
    fn keywords_match_as_substrings() {
        let claim = "the bridge was built in 1990";
        // "mythical" contains "myth"
        let evidence = [item("A", "", "a mythical account says the bridge was built in 1990")];
        let tally = OverlapTally::count(claim, &evidence);
        assert_eq!(tally, OverlapTally { support: 0, refute: 1 });
    }

    #[test]
    fn overlap_of_two_is_ignored() {
        let claim = "cats purr loudly";
        let evidence = [item("A", "", "cats purr, it is true")];
        // tokens "cats" and "purr," vs "purr": only "cats" is shared
        assert_eq!(OverlapTally::count(claim, &evidence), OverlapTally::default());

        let evidence = [item("A", "", "cats purr often, it is true")];
        assert_eq!(OverlapTally::count(claim, &evidence), OverlapTally::default());
    }

    #[test]
    fn title_counts_toward_overlap() {
        let claim = "red apples taste sweet";
        let evidence = [item("A", "Red apples taste", "proven by tasters")];
        let tally = OverlapTally::count(claim, &evidence);
        assert_eq!(tally.support, 1);
    }

    #[test]
    fn refute_majority() {
        let verifier = ClaimVerifier::default();
        let claim = "the great wall is visible from space";
        let evidence = [
            item("A", "", "myth: the great wall is visible from space"),
            item("B", "", "wrong: the great wall is visible from space"),
            item("C", "", "true: the great wall is visible from space"),
        ];

        let result = verifier.verify(claim, &evidence);
        assert_eq!(result.verdict, Verdict::Refuted);
        assert_eq!(result.confidence, Confidence::new(70));
        assert!(result.evidence_analysis.iter().all(|e| e.stance == Stance::Refutes));
    }

    #[test]
    fn all_evidence_counted_but_only_five_tagged() {
        let verifier = ClaimVerifier::default();
        let claim = "honey never spoils at all";
        let evidence: Vec<_> = (0..9)
            .map(|i| item(&format!("S{i}"), "", "confirmed: honey never spoils"))
            .collect();

        let result = verifier.verify(claim, &evidence);
        assert_eq!(result.reasoning, "Evidence analysis: 9 supporting, 0 refuting items");
        assert_eq!(result.confidence, Confidence::OVERLAP_CAP);
        assert_eq!(result.evidence_analysis.len(), MAX_TAGGED_EVIDENCE);
    }

    #[test]
    fn analyze_with_empty_evidence() {
        let verifier = ClaimVerifier::default();
        let result = verifier.analyze_with_evidence("anything", &[]);
        assert_eq!(result.verdict, Verdict::NotEnoughInfo);
        assert_eq!(result.confidence, Confidence::NO_EVIDENCE);
        assert_eq!(result.reasoning, "No evidence provided");
    }

    #[test]
    fn custom_patterns_are_used() {
        let patterns = PatternSet::new(["tea is hot"], ["ice is hot"]);
        let verifier = ClaimVerifier::new(patterns.unwrap_or_default());

        assert_eq!(verifier.verify("Tea is hot", &[]).verdict, Verdict::Supported);
        assert_eq!(verifier.verify("Ice is hot", &[]).verdict, Verdict::Refuted);
        assert_eq!(verifier.verify("earth is flat", &[]).verdict, Verdict::NotEnoughInfo);
    }
}
