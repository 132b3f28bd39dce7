//! Marketplace clients and their identifying attributes.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Maximum length of a client name in characters.
pub const CLIENT_NAME_MAX_CHARS: usize = 64;

/// Validation errors raised while building client values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ClientValidationError {
    /// The name was blank once trimmed.
    #[error("name must not be empty")]
    EmptyName,
    /// The name exceeded [`CLIENT_NAME_MAX_CHARS`].
    #[error("name must be at most {max} characters")]
    NameTooLong {
        /// Permitted maximum.
        max: usize,
    },
    /// The name contained control characters.
    #[error("name must not contain control characters")]
    NameControlCharacters,
    /// The e-mail address was blank once trimmed.
    #[error("email must not be empty")]
    EmptyEmail,
    /// The e-mail address was not of the form `local@domain.tld`.
    #[error("email must be a valid address")]
    InvalidEmail,
    /// The password was blank once trimmed.
    #[error("password must not be empty")]
    EmptyPassword,
}

impl ClientValidationError {
    /// Request field the error refers to.
    pub const fn field(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::NameTooLong { .. } | Self::NameControlCharacters => "name",
            Self::EmptyEmail | Self::InvalidEmail => "email",
            Self::EmptyPassword => "password",
        }
    }

    /// Stable machine-readable reason.
    pub const fn reason(&self) -> &'static str {
        match self {
            Self::EmptyName | Self::EmptyEmail | Self::EmptyPassword => "missing",
            Self::NameTooLong { .. } => "too_long",
            Self::NameControlCharacters => "invalid_characters",
            Self::InvalidEmail => "invalid_email",
        }
    }
}

/// Database identifier of a client.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClientId(i64);

impl ClientId {
    /// Wrap a raw identifier.
    #[must_use]
    pub const fn new(raw: i64) -> Self {
        Self(raw)
    }

    /// Raw identifier value.
    #[must_use]
    pub const fn get(self) -> i64 {
        self.0
    }
}

impl fmt::Display for ClientId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

/// Display name of a client.
///
/// ## Invariants
/// - Trimmed, non-empty, at most [`CLIENT_NAME_MAX_CHARS`] characters.
/// - Free of control characters.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ClientName(String);

impl ClientName {
    /// Validate and normalise a name.
    ///
    /// # Examples
    /// ```
    /// use bitslow::domain::ClientName;
    ///
    /// let name = ClientName::parse("  Ada Lovelace ").expect("valid name");
    /// assert_eq!(name.as_ref(), "Ada Lovelace");
    /// assert!(ClientName::parse(" ").is_err());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ClientValidationError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ClientValidationError::EmptyName);
        }
        if trimmed.chars().count() > CLIENT_NAME_MAX_CHARS {
            return Err(ClientValidationError::NameTooLong {
                max: CLIENT_NAME_MAX_CHARS,
            });
        }
        if trimmed.chars().any(char::is_control) {
            return Err(ClientValidationError::NameControlCharacters);
        }
        Ok(Self(trimmed.to_owned()))
    }
}

impl AsRef<str> for ClientName {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for ClientName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Normalised e-mail address.
///
/// Addresses are trimmed and lower-cased, so lookups and the unique index
/// compare canonical forms.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct EmailAddress(String);

impl EmailAddress {
    /// Validate and normalise an address.
    ///
    /// # Examples
    /// ```
    /// use bitslow::domain::EmailAddress;
    ///
    /// let email = EmailAddress::parse(" Ada@Example.COM ").expect("valid email");
    /// assert_eq!(email.as_ref(), "ada@example.com");
    /// assert!(EmailAddress::parse("ada.example.com").is_err());
    /// ```
    pub fn parse(raw: impl AsRef<str>) -> Result<Self, ClientValidationError> {
        let normalised = raw.as_ref().trim().to_lowercase();
        if normalised.is_empty() {
            return Err(ClientValidationError::EmptyEmail);
        }
        if !is_plausible_email(&normalised) {
            return Err(ClientValidationError::InvalidEmail);
        }
        Ok(Self(normalised))
    }
}

fn is_plausible_email(candidate: &str) -> bool {
    if candidate.chars().any(|c| c.is_whitespace() || c.is_control()) {
        return false;
    }
    let Some((local, domain)) = candidate.split_once('@') else {
        return false;
    };
    if local.is_empty() || domain.contains('@') {
        return false;
    }
    let Some((host, tld)) = domain.rsplit_once('.') else {
        return false;
    };
    !host.is_empty() && !tld.is_empty() && !domain.starts_with('.')
}

impl AsRef<str> for EmailAddress {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for EmailAddress {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Registered marketplace client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Client {
    id: ClientId,
    name: ClientName,
    email: EmailAddress,
    phone: Option<String>,
    address: Option<String>,
}

impl Client {
    /// Assemble a client from validated parts.
    pub fn new(id: ClientId, name: ClientName, email: EmailAddress) -> Self {
        Self {
            id,
            name,
            email,
            phone: None,
            address: None,
        }
    }

    /// Attach optional contact details.
    #[must_use]
    pub fn with_contact(mut self, phone: Option<String>, address: Option<String>) -> Self {
        self.phone = phone;
        self.address = address;
        self
    }

    /// Identifier.
    pub const fn id(&self) -> ClientId {
        self.id
    }

    /// Display name.
    pub fn name(&self) -> &ClientName {
        &self.name
    }

    /// Normalised e-mail address.
    pub fn email(&self) -> &EmailAddress {
        &self.email
    }

    /// Phone number, if given at registration.
    pub fn phone(&self) -> Option<&str> {
        self.phone.as_deref()
    }

    /// Postal address, if given at registration.
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }
}

/// Client row paired with its stored password hash, used during login.
#[derive(Debug, Clone)]
pub struct ClientCredentials {
    /// The client.
    pub client: Client,
    /// Encoded password hash.
    pub password_hash: String,
}
