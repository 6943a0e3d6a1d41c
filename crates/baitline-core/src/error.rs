//! Error types for the core crate.

use thiserror::Error;

/// Result type alias using the crate's error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while building line grammars.
///
/// Reconciliation itself has no error conditions; absent data yields
/// empty fields rather than failures.
#[derive(Error, Debug)]
pub enum Error {
    /// The grammar compiled to an invalid regular expression.
    #[error("grammar error: {0}")]
    Grammar(#[from] regex::Error),

    /// Two captures in one grammar share a name.
    #[error("duplicate capture name '{0}' in line grammar")]
    DuplicateCapture(String),

    /// The grammar has no tokens.
    #[error("line grammar has no tokens")]
    EmptyGrammar,
}
