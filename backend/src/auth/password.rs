//! Password hashing using bcrypt
//!
//! Provides password hashing and verification for account endpoints.
//! Hashing is CPU-intensive, so async wrappers run it on the blocking
//! thread pool.

use anyhow::Result;
use bcrypt::{hash, verify, DEFAULT_COST};

/// Password hashing service
pub struct PasswordService;

impl PasswordService {
    /// Hash a password (blocking operation)
    pub fn hash(password: &str) -> Result<String> {
        hash(password, DEFAULT_COST).map_err(|e| anyhow::anyhow!("Failed to hash password: {}", e))
    }

    /// Hash a password asynchronously (non-blocking)
    pub async fn hash_async(password: String) -> Result<String> {
        tokio::task::spawn_blocking(move || Self::hash(&password))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }

    /// Verify a password against a hash (blocking operation)
    pub fn verify(password: &str, hashed: &str) -> Result<bool> {
        verify(password, hashed).map_err(|e| anyhow::anyhow!("Invalid hash format: {}", e))
    }

    /// Verify a password asynchronously (non-blocking)
    pub async fn verify_async(password: String, hashed: String) -> Result<bool> {
        tokio::task::spawn_blocking(move || Self::verify(&password, &hashed))
            .await
            .map_err(|e| anyhow::anyhow!("Task join error: {}", e))?
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hash_and_verify() {
        let password = "secure_password_123";
        let hashed = PasswordService::hash(password).unwrap();

        assert!(PasswordService::verify(password, &hashed).unwrap());
        assert!(!PasswordService::verify("wrong_password", &hashed).unwrap());
    }

    #[test]
    fn test_different_hashes_for_same_password() {
        let password = "test_password";
        let hash1 = PasswordService::hash(password).unwrap();
        let hash2 = PasswordService::hash(password).unwrap();

        // Hashes differ thanks to the random salt, but both verify
        assert_ne!(hash1, hash2);
        assert!(PasswordService::verify(password, &hash1).unwrap());
        assert!(PasswordService::verify(password, &hash2).unwrap());
    }

    #[tokio::test]
    async fn test_async_hash_and_verify() {
        let password = "async_test_password".to_string();
        let hashed = PasswordService::hash_async(password.clone()).await.unwrap();

        assert!(PasswordService::verify_async(password, hashed.clone())
            .await
            .unwrap());
        assert!(!PasswordService::verify_async("wrong".to_string(), hashed)
            .await
            .unwrap());
    }
}
