// ================================================================
// File: raffbot-common/src/error.rs
// ================================================================

use thiserror::Error;

/// Every expected, user-facing failure in the giveaway core. None of these
/// is fatal; the orchestrator turns each into a short chat reply.
#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid duration: {0} (expected <number><m|h|d>, e.g. 24h)")]
    InvalidDuration(String),

    #[error("A giveaway already exists in channel {0}; end it first")]
    AlreadyActive(String),

    #[error("No giveaway found in channel {0}")]
    NoActiveGiveaway(String),

    #[error("Not authorized")]
    NotAuthorized,

    #[error("Amount not representable: {0}")]
    Unrepresentable(String),

    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("Parse error: {0}")]
    Parse(String),
}

impl From<String> for Error {
    fn from(s: String) -> Self {
        Error::Parse(s)
    }
}

impl From<&str> for Error {
    fn from(s: &str) -> Self {
        Error::Parse(s.to_string())
    }
}
