//! Setup token service
//!
//! Minting, redemption, and verification of setup tokens. Plaintext tokens
//! are random and only ever live in the minting output and the session file;
//! the server stores Argon2 hashes.

use argon2::password_hash::{
    rand_core::OsRng, PasswordHash, PasswordHasher, PasswordVerifier, SaltString,
};
use argon2::Argon2;
use uuid::Uuid;

use crate::audit::{AuditEntry, SetupAction};
use crate::config::SessionToken;
use crate::error::{SetupError, SetupResult};
use crate::models::{SetupToken, TokenKind};
use crate::storage::Storage;

/// Service for setup token management
pub struct TokenService<'a> {
    storage: &'a Storage,
}

impl<'a> TokenService<'a> {
    /// Create a new token service
    pub fn new(storage: &'a Storage) -> Self {
        Self { storage }
    }

    /// Mint a one-time setup token
    ///
    /// Returns the plaintext exactly once; only the hash is stored. Expired
    /// records are pruned on the way.
    pub fn mint_one_time(&self) -> SetupResult<String> {
        self.storage.tokens.prune_expired()?;

        let plaintext = random_token();
        let record = SetupToken::new(TokenKind::OneTime, hash_token(&plaintext)?);
        let record_id = record.id;

        self.storage.tokens.insert(record)?;
        self.storage.tokens.save()?;

        self.storage.log_action(&AuditEntry::action(
            SetupAction::TokenCreated,
            Some(record_id.to_string()),
        ))?;

        Ok(plaintext)
    }

    /// Exchange a one-time token for a session token
    ///
    /// The one-time record is consumed; redeeming the same token twice
    /// fails. Returns the session token to store on the redeeming machine.
    pub fn redeem(&self, one_time: &str) -> SetupResult<SessionToken> {
        let matched = self
            .storage
            .tokens
            .get_live(TokenKind::OneTime)?
            .into_iter()
            .find(|record| verify_token(one_time, &record.token_hash));

        let record = matched.ok_or_else(SetupError::token_rejected)?;
        self.storage.tokens.delete(record.id)?;

        let plaintext = random_token();
        let session = SetupToken::new(TokenKind::Session, hash_token(&plaintext)?);
        let session_id = session.id;

        self.storage.tokens.insert(session)?;
        self.storage.tokens.save()?;

        self.storage.log_action(&AuditEntry::action(
            SetupAction::TokenRedeemed,
            Some(format!("{} -> {}", record.id, session_id)),
        ))?;

        Ok(SessionToken::new(plaintext))
    }

    /// Check that a session token matches a live record
    pub fn verify_session(&self, token: &SessionToken) -> SetupResult<()> {
        let valid = self
            .storage
            .tokens
            .get_live(TokenKind::Session)?
            .iter()
            .any(|record| verify_token(token.as_str(), &record.token_hash));

        if valid {
            Ok(())
        } else {
            Err(SetupError::Token(
                "Setup session is not valid or has expired".into(),
            ))
        }
    }

    /// Whether a session token matches a live record
    pub fn session_is_valid(&self, token: &SessionToken) -> bool {
        self.verify_session(token).is_ok()
    }

    /// Revoke every outstanding setup token
    pub fn revoke_all(&self) -> SetupResult<usize> {
        let removed = self.storage.tokens.clear()?;
        self.storage.tokens.save()?;

        self.storage.log_action(&AuditEntry::action(
            SetupAction::TokensRevoked,
            Some(format!("{} token(s)", removed)),
        ))?;

        Ok(removed)
    }
}

/// Generate a fresh random token
fn random_token() -> String {
    // Two v4 UUIDs give 244 bits of randomness in plain hex.
    format!("{}{}", Uuid::new_v4().simple(), Uuid::new_v4().simple())
}

/// Hash a plaintext token into an Argon2 PHC string
fn hash_token(plaintext: &str) -> SetupResult<String> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(plaintext.as_bytes(), &salt)
        .map_err(|e| SetupError::Token(format!("Failed to hash token: {}", e)))?;
    Ok(hash.to_string())
}

/// Check a plaintext token against a stored PHC string
fn verify_token(plaintext: &str, phc: &str) -> bool {
    match PasswordHash::new(phc) {
        Ok(parsed) => Argon2::default()
            .verify_password(plaintext.as_bytes(), &parsed)
            .is_ok(),
        Err(_) => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::CaravelPaths;
    use tempfile::TempDir;

    fn test_storage() -> (Storage, TempDir) {
        let temp_dir = TempDir::new().unwrap();
        let paths = CaravelPaths::with_base_dir(temp_dir.path().to_path_buf());
        let storage = Storage::new(paths).unwrap();
        storage.load_all().unwrap();
        (storage, temp_dir)
    }

    #[test]
    fn test_mint_and_redeem() {
        let (storage, _temp) = test_storage();
        let service = TokenService::new(&storage);

        let one_time = service.mint_one_time().unwrap();
        let session = service.redeem(&one_time).unwrap();

        service.verify_session(&session).unwrap();
    }

    #[test]
    fn test_redeem_twice_fails() {
        let (storage, _temp) = test_storage();
        let service = TokenService::new(&storage);

        let one_time = service.mint_one_time().unwrap();
        service.redeem(&one_time).unwrap();

        let err = service.redeem(&one_time).unwrap_err();
        assert!(err.is_token());
    }

    #[test]
    fn test_redeem_garbage_fails() {
        let (storage, _temp) = test_storage();
        let service = TokenService::new(&storage);

        service.mint_one_time().unwrap();
        assert!(service.redeem("not-the-token").is_err());
    }

    #[test]
    fn test_session_invalid_after_revoke() {
        let (storage, _temp) = test_storage();
        let service = TokenService::new(&storage);

        let one_time = service.mint_one_time().unwrap();
        let session = service.redeem(&one_time).unwrap();
        assert!(service.session_is_valid(&session));

        service.revoke_all().unwrap();
        assert!(!service.session_is_valid(&session));
    }
}
