//! Driven port for password hashing.

use crate::domain::Password;

use super::define_port_error;

define_port_error! {
    /// Errors raised by password hashers.
    pub enum PasswordHashError {
        /// Hashing failed.
        Hash { message: String } => "password hashing failed: {message}",
        /// A stored hash could not be decoded.
        Malformed { message: String } => "stored password hash is malformed: {message}",
    }
}

/// One-way password hashing.
#[cfg_attr(test, mockall::automock)]
pub trait PasswordHasher: Send + Sync {
    /// Hash a password with a fresh salt into a self-describing string.
    fn hash(&self, password: &Password) -> Result<String, PasswordHashError>;

    /// Check a password against a stored hash.
    fn verify(&self, password: &Password, encoded: &str) -> Result<bool, PasswordHashError>;
}
