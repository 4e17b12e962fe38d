//! Setup token records
//!
//! The server side of token handling. Tokens are random and stored hashed;
//! the plaintext exists only in the minting output and in the session file
//! on the machine that redeemed it.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use super::ids::TokenId;

/// One-time tokens are short-lived; they exist to be pasted promptly.
pub const ONE_TIME_TOKEN_TTL_MINUTES: i64 = 15;

/// Session tokens cover a full setup sitting.
pub const SESSION_TOKEN_TTL_HOURS: i64 = 24;

/// The two kinds of setup token
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TokenKind {
    /// Minted by `token create`, consumed by redemption
    OneTime,
    /// Returned by redemption, presented with every setup operation
    Session,
}

/// A hashed setup token record
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetupToken {
    pub id: TokenId,
    pub kind: TokenKind,
    /// Argon2 PHC string of the plaintext token
    pub token_hash: String,
    pub created_at: DateTime<Utc>,
}

impl SetupToken {
    /// Create a record for an already-hashed token
    pub fn new(kind: TokenKind, token_hash: String) -> Self {
        Self {
            id: TokenId::new(),
            kind,
            token_hash,
            created_at: Utc::now(),
        }
    }

    /// Whether this record has expired at the given instant
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        let ttl = match self.kind {
            TokenKind::OneTime => Duration::minutes(ONE_TIME_TOKEN_TTL_MINUTES),
            TokenKind::Session => Duration::hours(SESSION_TOKEN_TTL_HOURS),
        };
        now - self.created_at > ttl
    }

    /// Whether this record has expired now
    pub fn is_expired(&self) -> bool {
        self.is_expired_at(Utc::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_not_expired() {
        let token = SetupToken::new(TokenKind::OneTime, "$argon2id$stub".into());
        assert!(!token.is_expired());
    }

    #[test]
    fn test_one_time_expiry() {
        let token = SetupToken::new(TokenKind::OneTime, "$argon2id$stub".into());
        let later = token.created_at + Duration::minutes(ONE_TIME_TOKEN_TTL_MINUTES + 1);
        assert!(token.is_expired_at(later));
    }

    #[test]
    fn test_session_outlives_one_time() {
        let token = SetupToken::new(TokenKind::Session, "$argon2id$stub".into());
        let later = token.created_at + Duration::hours(1);
        assert!(!token.is_expired_at(later));

        let much_later = token.created_at + Duration::hours(SESSION_TOKEN_TTL_HOURS + 1);
        assert!(token.is_expired_at(much_later));
    }
}
