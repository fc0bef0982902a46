//! # CLI Module
//!
//! One-shot action dispatch.
//!
//! The process reads one JSON object from stdin and writes one JSON object
//! to stdout (or an error object to stderr). `run_action` implements the
//! whole contract over an in-memory reader so it can be tested without a
//! process; `main.rs` only wires stdin and the exit code.

use crate::config::load_patterns;
use crate::error::AppError;
use claimcheck_core::{ClaimVerifier, EvidenceItem};
use clap::Parser;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};
use std::io::{self, Read, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

/// Action name for the health/initialization check.
pub const TEST_ACTION: &str = "test";
/// Action name for claim verification.
pub const VERIFY_ACTION: &str = "verify";
/// Action name for the long-lived HTTP service.
pub const SERVE_ACTION: &str = "serve";

/// Name of the verification method reported by `test` and `/health`.
pub const METHOD: &str = "simple_patterns";

#[derive(Parser, Debug)]
#[command(name = "claimcheck", version, about = "Heuristic claim verification")]
pub struct Cli {
    /// Action to run: test, verify or serve
    pub action: Option<String>,

    /// JSON file with {"supported": [...], "refuted": [...]} phrase lists
    #[arg(long)]
    pub patterns: Option<PathBuf>,

    /// Address to listen on (serve only)
    #[arg(long, default_value = "127.0.0.1:8080")]
    pub bind: String,

    /// Require `Authorization: Bearer <key>` on /verify (serve only)
    #[arg(long)]
    pub api_key: Option<String>,

    /// Requests per second accepted on /verify, 0 disables (serve only)
    #[arg(long, default_value_t = 50)]
    pub rate_limit: u32,
}

// =============================================================================
// PAYLOADS
// =============================================================================

/// Body of a `verify` request.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct VerifyRequest {
    #[serde(default)]
    pub claim: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub evidence: Vec<EvidenceItem>,
}

fn null_as_empty<'de, D>(deserializer: D) -> Result<Vec<EvidenceItem>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    Ok(Option::<Vec<EvidenceItem>>::deserialize(deserializer)?.unwrap_or_default())
}

/// Reply to `test` and `GET /health`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusReport {
    pub status: String,
    pub method: String,
}

impl StatusReport {
    pub fn initialized() -> Self {
        Self {
            status: "initialized".to_string(),
            method: METHOD.to_string(),
        }
    }
}

// =============================================================================
// OUTCOME
// =============================================================================

/// Stream an outcome is written to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputTarget {
    Stdout,
    Stderr,
}

/// What one invocation writes, where, and how it exits.
#[derive(Debug, Clone, PartialEq)]
pub struct Outcome {
    pub target: OutputTarget,
    pub payload: Value,
    pub exit_code: u8,
}

impl Outcome {
    fn success(payload: Value) -> Self {
        Self {
            target: OutputTarget::Stdout,
            payload,
            exit_code: 0,
        }
    }

    /// Convert an error into the `{"error": ...}` shape.
    pub fn from_error(err: &AppError) -> Self {
        let payload = json!({ "error": err.to_string() });
        if err.is_fatal() {
            Self {
                target: OutputTarget::Stderr,
                payload,
                exit_code: 1,
            }
        } else {
            Self::success(payload)
        }
    }

    /// Write the payload as a single line and return the exit code.
    pub fn emit(&self) -> ExitCode {
        match self.target {
            OutputTarget::Stdout => self.write_to(&mut io::stdout().lock()),
            OutputTarget::Stderr => self.write_to(&mut io::stderr().lock()),
        }
    }

    /// Write the payload line to `out`.
    ///
    /// A failed write turns any outcome into `ExitCode::FAILURE`.
    pub fn write_to<W: Write>(&self, out: &mut W) -> ExitCode {
        match writeln!(out, "{}", self.payload).and_then(|()| out.flush()) {
            Ok(()) => ExitCode::from(self.exit_code),
            Err(_) => ExitCode::FAILURE,
        }
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Run a one-shot action against `input`.
///
/// This is the single error boundary: every failure becomes an error
/// payload, never a partial result.
pub fn run_action<R: Read>(action: Option<&str>, input: R, patterns: Option<&Path>) -> Outcome {
    match dispatch(action, input, patterns) {
        Ok(payload) => Outcome::success(payload),
        Err(err) => {
            tracing::debug!(error = %err, "action failed");
            Outcome::from_error(&err)
        }
    }
}

fn dispatch<R: Read>(
    action: Option<&str>,
    mut input: R,
    patterns: Option<&Path>,
) -> Result<Value, AppError> {
    let action = action.ok_or(AppError::MissingAction)?;

    // The payload is parsed before the action is checked, so malformed
    // input fails even for unknown actions.
    let mut raw = String::new();
    input.read_to_string(&mut raw)?;
    let payload: Value = serde_json::from_str(&raw)?;

    match action {
        TEST_ACTION => cmd_test(patterns),
        VERIFY_ACTION => cmd_verify(payload, patterns),
        other => Err(AppError::UnknownAction(other.to_string())),
    }
}

/// Initialization check; reports the method and logs the pattern counts.
pub fn cmd_test(patterns: Option<&Path>) -> Result<Value, AppError> {
    let patterns = load_patterns(patterns)?;
    tracing::info!(
        supported = patterns.supported().len(),
        refuted = patterns.refuted().len(),
        method = METHOD,
        "verifier initialized"
    );
    Ok(serde_json::to_value(StatusReport::initialized())?)
}

/// Verify the claim in `payload`.
pub fn cmd_verify(payload: Value, patterns: Option<&Path>) -> Result<Value, AppError> {
    if !payload.is_object() {
        return Err(AppError::NotAnObject);
    }
    let request: VerifyRequest = serde_json::from_value(payload)?;
    let verifier = ClaimVerifier::new(load_patterns(patterns)?);

    let result = verifier.verify(&request.claim, &request.evidence);
    tracing::info!(
        verdict = %result.verdict,
        confidence = %result.confidence,
        evidence = request.evidence.len(),
        "claim verified"
    );

    Ok(serde_json::to_value(result)?)
}

// =============================================================================
// TESTS
// =============================================================================
