//! Server settings loaded via OrthoConfig and session key resolution.

use std::net::{Ipv4Addr, SocketAddr, SocketAddrV4};
use std::path::{Path, PathBuf};

use actix_web::cookie::Key;
use ortho_config::OrthoConfig;
use serde::Deserialize;
use thiserror::Error;
use tracing::warn;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_DATABASE_PATH: &str = "bitslow.db";
const DEFAULT_POOL_SIZE: u32 = 8;
const DEFAULT_SESSION_KEY_FILE: &str = "/var/run/secrets/session_key";

/// Settings for the HTTP listener, database and session cookie.
///
/// Layered from CLI flags, `BITSLOW_*` environment variables and
/// configuration files.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "BITSLOW")]
pub struct ServerSettings {
    /// Socket address to listen on.
    pub bind_addr: Option<SocketAddr>,
    /// SQLite database file.
    pub database_path: Option<PathBuf>,
    /// Maximum number of pooled database connections.
    pub pool_size: Option<u32>,
    /// File holding the session signing key material.
    pub session_key_file: Option<PathBuf>,
    /// Mark the session cookie `Secure`.
    #[ortho_config(default = true)]
    pub cookie_secure: bool,
    /// Permit a generated session key when the key file is unreadable.
    #[ortho_config(default = false)]
    pub allow_ephemeral_key: bool,
}

impl ServerSettings {
    /// Listener address, defaulting to `0.0.0.0:3000`.
    #[must_use]
    pub fn bind_addr(&self) -> SocketAddr {
        self.bind_addr.unwrap_or(SocketAddr::V4(SocketAddrV4::new(
            Ipv4Addr::UNSPECIFIED,
            DEFAULT_PORT,
        )))
    }

    /// Database path as the connection string Diesel expects.
    #[must_use]
    pub fn database_url(&self) -> String {
        self.database_path.as_deref().map_or_else(
            || DEFAULT_DATABASE_PATH.to_owned(),
            |path| path.to_string_lossy().into_owned(),
        )
    }

    /// Pool size, defaulting to eight connections.
    #[must_use]
    pub fn pool_size(&self) -> u32 {
        self.pool_size.unwrap_or(DEFAULT_POOL_SIZE)
    }

    /// Session key file path.
    #[must_use]
    pub fn session_key_file(&self) -> &Path {
        self.session_key_file
            .as_deref()
            .unwrap_or_else(|| Path::new(DEFAULT_SESSION_KEY_FILE))
    }
}

/// Failure to obtain a session key.
#[derive(Debug, Error)]
#[error("failed to read session key at {path}: {source}")]
pub struct SessionKeyError {
    path: PathBuf,
    #[source]
    source: std::io::Error,
}

/// Read the session key from the configured file.
///
/// Falls back to a generated key in debug builds or when
/// `allow_ephemeral_key` is set. Sessions signed with a generated key do
/// not survive a restart.
///
/// # Errors
///
/// Returns [`SessionKeyError`] when the file cannot be read and no fallback
/// is permitted.
pub fn load_session_key(settings: &ServerSettings) -> Result<Key, SessionKeyError> {
    let path = settings.session_key_file();
    match std::fs::read(path) {
        Ok(bytes) => Ok(Key::derive_from(&bytes)),
        Err(error) => {
            if cfg!(debug_assertions) || settings.allow_ephemeral_key {
                warn!(path = %path.display(), %error, "using temporary session key (dev only)");
                Ok(Key::generate())
            } else {
                Err(SessionKeyError {
                    path: path.to_path_buf(),
                    source: error,
                })
            }
        }
    }
}
