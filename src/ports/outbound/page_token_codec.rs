use crate::image_analysis::domain::PageCursor;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// Wrong key, corrupt or tampered ciphertext, malformed payload or expired
    #[error("invalid page token: {reason}")]
    InvalidToken { reason: String },

    #[error("failed to encode page token: {reason}")]
    Encoding { reason: String },
}

impl TokenError {
    pub fn invalid(reason: impl Into<String>) -> Self {
        TokenError::InvalidToken {
            reason: reason.into(),
        }
    }
}

/// PageTokenCodec port for turning page cursors into opaque tokens
///
/// Tokens must be URL-safe and tamper-evident. Encoding may be randomized,
/// but a token produced by `encode` must always decode back to the same
/// cursor with the same key.
pub trait PageTokenCodec: Send + Sync {
    fn encode(&self, cursor: &PageCursor) -> Result<String, TokenError>;

    fn decode(&self, token: &str) -> Result<PageCursor, TokenError>;
}
