use crate::config::PaginationKey;
use crate::image_analysis::domain::PageCursor;
use crate::ports::outbound::{PageTokenCodec, TokenError};
use base64::{engine::general_purpose::URL_SAFE_NO_PAD, Engine as _};
use chacha20poly1305::aead::{Aead, AeadCore, KeyInit, OsRng};
use chacha20poly1305::{Key, XChaCha20Poly1305, XNonce};
use chrono::Utc;
use serde::{Deserialize, Serialize};
use std::time::Duration;

const NONCE_LEN: usize = 24;

/// Plaintext sealed inside a token.
#[derive(Debug, Serialize, Deserialize)]
struct TokenPayload {
    issued_at: i64,
    cursor: PageCursor,
}

/// XChaChaPageTokenCodec adapter sealing page cursors with XChaCha20-Poly1305
///
/// Token layout: URL-safe base64 (unpadded) of `nonce || ciphertext`. The
/// nonce is random, so two encodings of one cursor differ; authentication
/// makes any token sealed with another key, or altered, fail to decode.
pub struct XChaChaPageTokenCodec {
    cipher: XChaCha20Poly1305,
    max_age: Option<Duration>,
}

impl XChaChaPageTokenCodec {
    /// Creates a codec whose tokens never expire
    pub fn new(key: &PaginationKey) -> Self {
        Self {
            cipher: XChaCha20Poly1305::new(Key::from_slice(key.as_bytes())),
            max_age: None,
        }
    }

    /// Rejects tokens older than `max_age` on decode
    pub fn with_max_age(mut self, max_age: Option<Duration>) -> Self {
        self.max_age = max_age;
        self
    }

    fn check_age(&self, issued_at: i64) -> Result<(), TokenError> {
        let Some(max_age) = self.max_age else {
            return Ok(());
        };

        let max_age = i64::try_from(max_age.as_secs()).unwrap_or(i64::MAX);
        let age = Utc::now().timestamp().saturating_sub(issued_at);
        if age > max_age {
            return Err(TokenError::invalid(format!(
                "token expired {} seconds ago",
                age - max_age
            )));
        }
        Ok(())
    }
}

impl PageTokenCodec for XChaChaPageTokenCodec {
    fn encode(&self, cursor: &PageCursor) -> Result<String, TokenError> {
        let payload = TokenPayload {
            issued_at: Utc::now().timestamp(),
            cursor: *cursor,
        };
        let plaintext = serde_json::to_vec(&payload).map_err(|e| TokenError::Encoding {
            reason: e.to_string(),
        })?;

        let nonce = XChaCha20Poly1305::generate_nonce(&mut OsRng);
        let ciphertext =
            self.cipher
                .encrypt(&nonce, plaintext.as_ref())
                .map_err(|e| TokenError::Encoding {
                    reason: e.to_string(),
                })?;

        let mut sealed = Vec::with_capacity(NONCE_LEN + ciphertext.len());
        sealed.extend_from_slice(&nonce);
        sealed.extend_from_slice(&ciphertext);
        Ok(URL_SAFE_NO_PAD.encode(sealed))
    }

    fn decode(&self, token: &str) -> Result<PageCursor, TokenError> {
        let sealed = URL_SAFE_NO_PAD
            .decode(token)
            .map_err(|e| TokenError::invalid(format!("not URL-safe base64: {}", e)))?;

        if sealed.len() <= NONCE_LEN {
            return Err(TokenError::invalid("token is too short"));
        }

        let (nonce, ciphertext) = sealed.split_at(NONCE_LEN);
        let plaintext = self
            .cipher
            .decrypt(XNonce::from_slice(nonce), ciphertext)
            .map_err(|_| TokenError::invalid("authentication failed"))?;

        let payload: TokenPayload = serde_json::from_slice(&plaintext)
            .map_err(|e| TokenError::invalid(format!("malformed payload: {}", e)))?;

        self.check_age(payload.issued_at)?;
        Ok(payload.cursor)
    }
}
