//! Registration and login payloads.
//!
//! Inbound adapters hand raw strings to these constructors so handlers only
//! ever talk to services with validated values.

use std::fmt;

use zeroize::Zeroizing;

use super::{ClientName, ClientValidationError, EmailAddress};

/// Plain-text password held only for the duration of a request.
///
/// The buffer is wiped on drop. Whitespace is preserved; a password made up
/// solely of whitespace is rejected.
#[derive(Clone, PartialEq, Eq)]
pub struct Password(Zeroizing<String>);

impl Password {
    /// Validate a raw password.
    pub fn parse(raw: &str) -> Result<Self, ClientValidationError> {
        if raw.trim().is_empty() {
            return Err(ClientValidationError::EmptyPassword);
        }
        Ok(Self(Zeroizing::new(raw.to_owned())))
    }

    /// Borrow the secret.
    pub fn expose(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Debug for Password {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Password(..)")
    }
}

/// Validated login request.
///
/// # Examples
/// ```
/// use bitslow::domain::LoginCredentials;
///
/// let creds = LoginCredentials::try_from_parts("Ada@Example.com", "pw").expect("valid");
/// assert_eq!(creds.email().as_ref(), "ada@example.com");
/// assert_eq!(creds.password().expose(), "pw");
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoginCredentials {
    email: EmailAddress,
    password: Password,
}

impl LoginCredentials {
    /// Build credentials from raw inputs.
    pub fn try_from_parts(email: &str, password: &str) -> Result<Self, ClientValidationError> {
        Ok(Self {
            email: EmailAddress::parse(email)?,
            password: Password::parse(password)?,
        })
    }

    /// Normalised e-mail used for the lookup.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Supplied password.
    pub fn password(&self) -> &Password {
        &self.password
    }
}

/// Validated registration request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Registration {
    name: ClientName,
    email: EmailAddress,
    password: Password,
    phone: Option<String>,
    address: Option<String>,
}

/// Raw registration fields as received from a caller.
#[derive(Debug, Default, Clone, Copy)]
pub struct RegistrationParts<'a> {
    /// Display name.
    pub name: &'a str,
    /// E-mail address.
    pub email: &'a str,
    /// Plain-text password.
    pub password: &'a str,
    /// Optional phone number.
    pub phone: Option<&'a str>,
    /// Optional postal address.
    pub address: Option<&'a str>,
}

impl Registration {
    /// Validate raw registration fields.
    ///
    /// Blank optional fields are dropped.
    ///
    /// # Examples
    /// ```
    /// use bitslow::domain::{Registration, RegistrationParts};
    ///
    /// let registration = Registration::try_from_parts(RegistrationParts {
    ///     name: "Ada",
    ///     email: "ada@example.com",
    ///     password: "analytical",
    ///     phone: Some("  "),
    ///     address: None,
    /// })
    /// .expect("valid registration");
    /// assert!(registration.phone().is_none());
    /// ```
    pub fn try_from_parts(parts: RegistrationParts<'_>) -> Result<Self, ClientValidationError> {
        Ok(Self {
            name: ClientName::parse(parts.name)?,
            email: EmailAddress::parse(parts.email)?,
            password: Password::parse(parts.password)?,
            phone: non_blank(parts.phone),
            address: non_blank(parts.address),
        })
    }

    /// Display name.
    pub fn name(&self) -> &ClientName {
        &self.name
    }

    /// Normalised e-mail address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Plain-text password awaiting hashing.
    pub fn password(&self) -> &Password {
        &self.password
    }

    /// Phone number.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Postal address.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
}

/// Client row ready for insertion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewClient {
    /// Display name.
    pub name: ClientName,
    /// Normalised e-mail address.
    pub email: EmailAddress,
    /// Encoded password hash.
    pub password_hash: String,
    /// Phone number.
    pub phone: Option<String>,
    /// Postal address.
    pub address: Option<String>,
}
