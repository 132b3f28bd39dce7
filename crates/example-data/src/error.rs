//! Error types for the example-data crate.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised while parsing or querying a seed registry.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RegistryError {
    /// The registry file could not be read.
    #[error("failed to read registry file at '{path}': {message}")]
    IoError {
        /// Path to the registry file.
        path: PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// The registry JSON is malformed or missing required fields.
    #[error("invalid registry JSON: {message}")]
    ParseError {
        /// Description of the parse error.
        message: String,
    },

    /// The registry version is not supported.
    #[error("unsupported registry version: expected {expected}, found {actual}")]
    UnsupportedVersion {
        /// Expected version number.
        expected: u32,
        /// Actual version found in the registry.
        actual: u32,
    },

    /// The registry contains no seed definitions.
    #[error("registry contains no seed definitions")]
    EmptySeeds,

    /// Two seeds share a name.
    #[error("seed '{name}' is defined more than once")]
    DuplicateSeedName {
        /// The repeated seed name.
        name: String,
    },

    /// The requested seed name was not found in the registry.
    #[error("seed '{name}' not found in registry")]
    SeedNotFound {
        /// The seed name that was not found.
        name: String,
    },
}

/// Errors raised while generating a ledger from a seed definition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerationError {
    /// No valid client name was produced within the retry budget.
    #[error("failed to generate valid client name after {max_attempts} attempts")]
    ClientNameGenerationFailed {
        /// Number of attempts made before giving up.
        max_attempts: usize,
    },

    /// The seed asks for more coins than distinct triples can supply.
    #[error("cannot place {requested} coins in a space of {capacity} unique triples")]
    TripleSpaceExhausted {
        /// Number of coins requested.
        requested: usize,
        /// Number of distinct triples available.
        capacity: usize,
    },

    /// Transactions need coins to trade and two clients to trade between.
    #[error(
        "{transaction_count} transactions need at least one coin and two clients \
         (seed has {coin_count} coins and {client_count} clients)"
    )]
    NotEnoughParticipants {
        /// Requested transaction count.
        transaction_count: usize,
        /// Requested coin count.
        coin_count: usize,
        /// Requested client count.
        client_count: usize,
    },
}
