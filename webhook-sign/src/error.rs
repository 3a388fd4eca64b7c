use thiserror::Error;

/// Errors produced while serializing or signing a webhook payload.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SignError {
    // ── Key material ──────────────────────────────────────────────────
    #[error("signing secret must not be empty")]
    InvalidKey,
    #[error("signing secret is not set (expected environment variable {0})")]
    MissingSecret(String),

    // ── Payload encoding ──────────────────────────────────────────────
    #[error("payload cannot be encoded as JSON: {0}")]
    Encoding(String),

    // ── Signature parsing ─────────────────────────────────────────────
    #[error("invalid signature: {0}")]
    InvalidSignature(String),
}

impl From<serde_json::Error> for SignError {
    fn from(e: serde_json::Error) -> Self {
        Self::Encoding(e.to_string())
    }
}

/// Type alias for results that may return a [`SignError`].
pub type SignResult<T> = std::result::Result<T, SignError>;
