//! Pattern configuration loading.
//!
//! A pattern file is a JSON object mapping verdict labels to phrase lists:
//!
//! ```json
//! {"supported": ["earth orbits sun"], "refuted": ["earth is flat"]}
//! ```
//!
//! A missing key yields an empty list. Validation (empty or overlapping
//! phrases) is done by `PatternSet` itself.

use crate::error::AppError;
use claimcheck_core::PatternSet;
use std::fs;
use std::path::Path;

/// Load the pattern set from `path`, or the built-in set when `None`.
pub fn load_patterns(path: Option<&Path>) -> Result<PatternSet, AppError> {
    let Some(path) = path else {
        tracing::debug!("using built-in pattern set");
        return Ok(PatternSet::builtin());
    };

    let raw = fs::read_to_string(path).map_err(|source| AppError::PatternFile {
        path: path.to_path_buf(),
        source,
    })?;

    let patterns: PatternSet =
        serde_json::from_str(&raw).map_err(|source| AppError::PatternParse {
            path: path.to_path_buf(),
            source,
        })?;

    tracing::info!(
        path = %path.display(),
        supported = patterns.supported().len(),
        refuted = patterns.refuted().len(),
        "loaded pattern set"
    );

    Ok(patterns)
}
