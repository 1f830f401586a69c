//! errors.rs - Custom error types for the retag-core library.
//!
//! All configuration-time failures surface through [`RetagError`].
//! Rule evaluation itself never produces an error: missing fields,
//! missing patterns and non-matches are handled by pass-through paths
//! in the engine.

use thiserror::Error;

/// This enum represents all possible error types in the `retag-core` library.
///
/// By using `#[non_exhaustive]`, we signal to consumers of this library that
/// new variants may be added in future versions. This prevents them from
/// matching all variants exhaustively, thus avoiding breaking changes.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum RetagError {
    #[error("Failed to compile rewrite rule #{0} pattern '{1}': {2}")]
    RuleCompilationError(usize, String, regex::Error),

    #[error("Rewrite rule #{0}: pattern length ({1}) exceeds maximum allowed ({2})")]
    PatternLengthExceeded(usize, usize, usize),

    #[error("An unexpected I/O error occurred: {0}")]
    IoError(#[from] std::io::Error),

    #[error("A critical system error occurred: {0}")]
    AnyhowWrapper(#[from] anyhow::Error),

    #[error("A fatal error occurred: {0}")]
    Fatal(String),
}
