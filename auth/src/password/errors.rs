use thiserror::Error;

/// Error type for password operations.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum PasswordError {
    #[error("Work factor {cost} is outside the allowed range {min}..={max}")]
    InvalidCost { cost: u32, min: u32, max: u32 },

    #[error("Password is {actual} bytes long, the limit is {max} bytes")]
    InputTooLong { max: usize, actual: usize },

    #[error("Password hashing failed: {0}")]
    HashingFailed(String),

    #[error("Password verification failed: {0}")]
    VerificationFailed(String),
}
