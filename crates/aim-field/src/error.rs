//! Error type shared across the AIM workspace.

/// Failures surfaced by field arithmetic, layer generation and evaluation.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum AimError {
    /// A length or shape precondition was violated by the caller.
    #[error("invalid input: {0}")]
    InvalidInput(String),
    /// An arithmetic operation has no result for the given operand.
    #[error("invalid operand: {0}")]
    InvalidOperand(&'static str),
}

/// Result alias used throughout the workspace.
pub type Result<T> = core::result::Result<T, AimError>;
