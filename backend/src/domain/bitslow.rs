//! BitSlow display identifiers.
//!
//! A BitSlow is derived from a coin's three components and its value and is
//! recomputed on every read.

use sha2::{Digest, Sha256};

fn sha256_hex(input: &[u8]) -> String {
    hex::encode(Sha256::digest(input))
}

/// Derive the BitSlow identifier of a coin.
///
/// Each component's decimal text is hashed with SHA-256; the three hex
/// digests followed by the decimal value are hashed again. The result is 64
/// lowercase hex characters.
///
/// # Examples
/// ```
/// use bitslow::domain::encode_bitslow;
///
/// let id = encode_bitslow(3, 77, 42, 500);
/// assert_eq!(id.len(), 64);
/// assert_eq!(id, encode_bitslow(3, 77, 42, 500));
/// ```
#[must_use]
pub fn encode_bitslow(bit1: u8, bit2: u8, bit3: u8, value: i64) -> String {
    let mut concatenated = String::with_capacity(3 * 64 + 20);
    for bit in [bit1, bit2, bit3] {
        concatenated.push_str(&sha256_hex(bit.to_string().as_bytes()));
    }
    concatenated.push_str(&value.to_string());
    sha256_hex(concatenated.as_bytes())
}
