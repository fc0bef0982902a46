//! # claimcheck-core
//!
//! Deterministic lexical claim verification.
//!
//! A claim is checked against two fixed phrase lists first. When no phrase
//! matches, the evidence snippets are scored by token overlap and sentiment
//! keywords. Nothing here performs I/O; the app layer (`apps/claimcheck`)
//! owns stdin/stdout, configuration files and the HTTP surface.
//!
//! ```
//! use claimcheck_core::{ClaimVerifier, Verdict};
//!
//! let verifier = ClaimVerifier::default();
//! let result = verifier.verify("Yes, the earth orbits sun once a year", &[]);
//! assert_eq!(result.verdict, Verdict::Supported);
//! ```

pub mod error;
pub mod patterns;
pub mod types;
pub mod verifier;

pub use error::CoreError;
pub use patterns::PatternSet;
pub use types::{
    Confidence, EvidenceAssessment, EvidenceItem, Stance, Verdict, VerificationResult,
};
pub use verifier::{
    ClaimVerifier, MAX_TAGGED_EVIDENCE, MIN_OVERLAP, OverlapTally, REFUTE_KEYWORDS,
    SUPPORT_KEYWORDS, tag_evidence,
};
