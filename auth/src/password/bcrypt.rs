use super::errors::PasswordError;

/// Salted, deliberately slow password hashing (bcrypt).
///
/// The salt and the work factor are embedded in the produced digest, so
/// verification only needs the digest itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PasswordHasher {
    cost: u32,
}

impl PasswordHasher {
    pub const MIN_COST: u32 = 4;
    pub const MAX_COST: u32 = 31;
    pub const DEFAULT_COST: u32 = 10;

    /// bcrypt only reads the first 72 bytes of its input.
    pub const MAX_PASSWORD_BYTES: usize = 72;

    /// Create a hasher with the given work factor.
    ///
    /// # Arguments
    /// * `cost` - bcrypt cost (log2 of the number of rounds)
    ///
    /// # Errors
    /// * `InvalidCost` - Cost is outside `MIN_COST..=MAX_COST`
    pub fn new(cost: u32) -> Result<Self, PasswordError> {
        if !(Self::MIN_COST..=Self::MAX_COST).contains(&cost) {
            return Err(PasswordError::InvalidCost {
                cost,
                min: Self::MIN_COST,
                max: Self::MAX_COST,
            });
        }

        Ok(Self { cost })
    }

    pub fn cost(&self) -> u32 {
        self.cost
    }

    /// Hash a plaintext password.
    ///
    /// # Returns
    /// Modular crypt string (`$2b$<cost>$<salt+hash>`)
    ///
    /// # Errors
    /// * `InputTooLong` - Password exceeds 72 bytes and would be truncated
    /// * `HashingFailed` - Underlying bcrypt operation failed
    pub fn hash(&self, password: &str) -> Result<String, PasswordError> {
        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Err(PasswordError::InputTooLong {
                max: Self::MAX_PASSWORD_BYTES,
                actual: password.len(),
            });
        }

        ::bcrypt::hash(password, self.cost).map_err(|e| PasswordError::HashingFailed(e.to_string()))
    }

    /// Verify a password against a stored digest.
    ///
    /// Passwords longer than the bcrypt input limit never match: no digest
    /// produced by [`PasswordHasher::hash`] can stand for them.
    ///
    /// # Errors
    /// * `VerificationFailed` - Stored digest is not a bcrypt digest
    pub fn verify(&self, password: &str, hash: &str) -> Result<bool, PasswordError> {
        if password.len() > Self::MAX_PASSWORD_BYTES {
            return Ok(false);
        }

        ::bcrypt::verify(password, hash)
            .map_err(|e| PasswordError::VerificationFailed(format!("Invalid password hash: {}", e)))
    }
}

impl Default for PasswordHasher {
    fn default() -> Self {
        Self {
            cost: Self::DEFAULT_COST,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fast_hasher() -> PasswordHasher {
        PasswordHasher::new(PasswordHasher::MIN_COST).expect("Failed to create hasher")
    }

    #[test]
    fn test_hash_and_verify() {
        let hasher = fast_hasher();
        let password = "my_secure_password";

        let hash = hasher.hash(password).expect("Failed to hash password");
        assert!(hash.starts_with("$2"));
        assert_ne!(hash, password);

        assert!(hasher
            .verify(password, &hash)
            .expect("Failed to verify password"));
        assert!(!hasher
            .verify("my_secure_passwordx", &hash)
            .expect("Failed to verify password"));
    }

    #[test]
    fn test_hash_is_salted() {
        let hasher = fast_hasher();

        let first = hasher.hash("same").unwrap();
        let second = hasher.hash("same").unwrap();

        assert_ne!(first, second);
        assert!(hasher.verify("same", &first).unwrap());
        assert!(hasher.verify("same", &second).unwrap());
    }

    #[test]
    fn test_cost_is_embedded_in_digest() {
        let hasher = PasswordHasher::new(5).unwrap();
        let hash = hasher.hash("password").unwrap();
        assert!(hash.contains("$05$"));

        // Verification reads the cost from the digest, not from the verifier.
        assert!(fast_hasher().verify("password", &hash).unwrap());
    }

    #[test]
    fn test_invalid_cost() {
        assert_eq!(
            PasswordHasher::new(3),
            Err(PasswordError::InvalidCost {
                cost: 3,
                min: 4,
                max: 31
            })
        );
        assert!(PasswordHasher::new(32).is_err());
    }

    #[test]
    fn test_password_at_limit() {
        let hasher = fast_hasher();
        let password = "a".repeat(PasswordHasher::MAX_PASSWORD_BYTES);

        let hash = hasher.hash(&password).expect("72 bytes must be accepted");
        assert!(hasher.verify(&password, &hash).unwrap());

        let longer = format!("{}x", password);
        assert!(!hasher.verify(&longer, &hash).unwrap());
    }

    #[test]
    fn test_password_too_long() {
        let hasher = fast_hasher();
        let password = "a".repeat(73);

        assert_eq!(
            hasher.hash(&password),
            Err(PasswordError::InputTooLong {
                max: 72,
                actual: 73
            })
        );
    }

    #[test]
    fn test_verify_invalid_hash() {
        let hasher = fast_hasher();
        let result = hasher.verify("password", "invalid_hash");
        assert!(matches!(result, Err(PasswordError::VerificationFailed(_))));
    }
}
