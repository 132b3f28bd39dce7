//! Argon2 password hashing adapter.
//!
//! Stored hashes use the form `argon2d$<salt hex>$<digest hex>`. Each hash
//! gets a fresh 16-byte salt from the thread-local RNG.

use rand::Rng;
use zeroize::Zeroize;

use crate::domain::Password;
use crate::domain::ports::{PasswordHashError, PasswordHasher};

const SCHEME: &str = "argon2d";
const SALT_BYTES: usize = 16;

/// Hashes passwords with Argon2d via `argon2rs`.
#[derive(Debug, Default, Clone, Copy)]
pub struct Argon2PasswordHasher;

impl Argon2PasswordHasher {
    /// Create the hasher.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }

    fn digest_hex(password: &Password, salt_hex: &str) -> String {
        let mut digest = argon2rs::argon2d_simple(password.expose(), salt_hex);
        let encoded = hex::encode(digest);
        digest.zeroize();
        encoded
    }
}

fn ct_eq(left: &[u8], right: &[u8]) -> bool {
    left.len() == right.len()
        && left
            .iter()
            .zip(right)
            .fold(0_u8, |acc, (l, r)| acc | (l ^ r))
            == 0
}

impl PasswordHasher for Argon2PasswordHasher {
    fn hash(&self, password: &Password) -> Result<String, PasswordHashError> {
        let salt: [u8; SALT_BYTES] = rand::thread_rng().r#gen();
        let salt_hex = hex::encode(salt);
        let digest = Self::digest_hex(password, &salt_hex);
        Ok(format!("{SCHEME}${salt_hex}${digest}"))
    }

    fn verify(&self, password: &Password, encoded: &str) -> Result<bool, PasswordHashError> {
        let mut parts = encoded.split('$');
        let (Some(SCHEME), Some(salt_hex), Some(expected), None) =
            (parts.next(), parts.next(), parts.next(), parts.next())
        else {
            return Err(PasswordHashError::malformed("expected argon2d$<salt>$<digest>"));
        };
        if hex::decode(salt_hex).is_err() || hex::decode(expected).is_err() {
            return Err(PasswordHashError::malformed("salt or digest is not hex"));
        }
        let actual = Self::digest_hex(password, salt_hex);
        Ok(ct_eq(actual.as_bytes(), expected.as_bytes()))
    }
}
