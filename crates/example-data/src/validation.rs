//! Constraints shared with the backend ledger.
//!
//! Keep these in sync with the `clients` and `coins` tables and with the
//! backend's registration rules so generated data always loads.
//!
//! # Rules
//!
//! - Coin components lie in [`BIT_MIN`]`..=`[`BIT_MAX`].
//! - Client names are non-blank, at most [`CLIENT_NAME_MAX`] characters and
//!   free of control characters.
//! - E-mail addresses are lower-case ASCII and unique per ledger.

/// Smallest coin component value.
pub const BIT_MIN: u8 = 1;

/// Largest coin component value.
pub const BIT_MAX: u8 = 100;

/// Maximum length of a client name in characters.
pub const CLIENT_NAME_MAX: usize = 64;

/// Domain used for generated e-mail addresses.
const EMAIL_DOMAIN: &str = "example.com";

/// Validates a client name.
///
/// # Examples
///
/// ```
/// use example_data::is_valid_client_name;
///
/// assert!(is_valid_client_name("Ada Lovelace"));
/// assert!(is_valid_client_name("O'Brien"));
/// assert!(!is_valid_client_name("   "));
/// assert!(!is_valid_client_name("tab\there"));
/// ```
#[must_use]
pub fn is_valid_client_name(name: &str) -> bool {
    if name.trim().is_empty() {
        return false;
    }
    if name.chars().count() > CLIENT_NAME_MAX {
        return false;
    }
    !name.chars().any(char::is_control)
}

/// Derives a unique e-mail address from a client name and its position.
///
/// Runs of characters other than ASCII letters and digits collapse into a
/// single dot. The position suffix keeps addresses unique when names repeat.
///
/// # Examples
///
/// ```
/// use example_data::derive_email;
///
/// assert_eq!(derive_email("Ada Lovelace", 0), "ada.lovelace.0@example.com");
/// assert_eq!(derive_email("Seán O'Brien", 7), "se.n.o.brien.7@example.com");
/// assert_eq!(derive_email("???", 2), "client.2@example.com");
/// ```
#[must_use]
pub fn derive_email(name: &str, index: usize) -> String {
    let mut local = String::with_capacity(name.len());
    let mut pending_dot = false;
    for c in name.chars() {
        if c.is_ascii_alphanumeric() {
            if pending_dot && !local.is_empty() {
                local.push('.');
            }
            pending_dot = false;
            local.push(c.to_ascii_lowercase());
        } else {
            pending_dot = true;
        }
    }
    if local.is_empty() {
        local.push_str("client");
    }
    format!("{local}.{index}@{EMAIL_DOMAIN}")
}
