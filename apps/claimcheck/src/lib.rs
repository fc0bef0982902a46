//! # claimcheck Library
//!
//! This library exposes the claimcheck modules for testing and integration.
//!
//! The main binary uses these modules through the `main.rs` entry point.

pub mod api;
pub mod cli;
pub mod config;
pub mod error;

// Re-export claimcheck_core for convenience
pub use claimcheck_core;
