//! Error types for the verification core.
//!
//! `ClaimVerifier::verify` is infallible; errors only arise while building
//! a [`PatternSet`](crate::PatternSet) from injected configuration.

use thiserror::Error;

/// Errors raised while validating pattern configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CoreError {
    /// A phrase was empty after trimming.
    #[error("empty phrase in '{list}' pattern list")]
    EmptyPattern {
        /// Name of the offending list (`supported` or `refuted`).
        list: &'static str,
    },

    /// The same phrase appears in both lists.
    #[error("phrase '{phrase}' appears in both supported and refuted lists")]
    OverlappingPattern {
        /// The normalized phrase.
        phrase: String,
    },
}
