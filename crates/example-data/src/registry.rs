//! Seed registry types and JSON parsing.
//!
//! A registry holds named seed definitions. Each definition fixes the RNG
//! seed and the number of clients, coins and transactions to generate, so a
//! seed name alone is enough to reproduce a ledger.

use std::collections::HashSet;
use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::RegistryError;

/// Current supported registry version.
const SUPPORTED_VERSION: u32 = 1;

/// Registry bundled with the crate, used when no registry file is supplied.
pub const DEFAULT_REGISTRY_JSON: &str = include_str!("../data/seeds.json");

/// A seed registry containing named seed definitions.
///
/// # Example
///
/// ```
/// use example_data::SeedRegistry;
///
/// let registry = SeedRegistry::bundled().expect("bundled registry is valid");
/// assert!(registry.find_seed("mossy-owl").is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedRegistry {
    version: u32,
    seeds: Vec<SeedDefinition>,
}

impl SeedRegistry {
    /// Parses a seed registry from a JSON string.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the JSON is malformed, the version is
    /// unsupported, the seeds array is empty or a seed name repeats.
    pub fn from_json(json: &str) -> Result<Self, RegistryError> {
        let raw: RawSeedRegistry =
            serde_json::from_str(json).map_err(|e| RegistryError::ParseError {
                message: e.to_string(),
            })?;

        Self::from_raw(raw)
    }

    /// Loads a seed registry from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the file cannot be read or parsed.
    pub fn from_file(path: &Path) -> Result<Self, RegistryError> {
        let contents = fs::read_to_string(path).map_err(|e| RegistryError::IoError {
            path: path.to_path_buf(),
            message: e.to_string(),
        })?;

        Self::from_json(&contents)
    }

    /// Parses the registry bundled with the crate.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError`] if the bundled registry is invalid.
    pub fn bundled() -> Result<Self, RegistryError> {
        Self::from_json(DEFAULT_REGISTRY_JSON)
    }

    fn from_raw(raw: RawSeedRegistry) -> Result<Self, RegistryError> {
        if raw.version != SUPPORTED_VERSION {
            return Err(RegistryError::UnsupportedVersion {
                expected: SUPPORTED_VERSION,
                actual: raw.version,
            });
        }

        if raw.seeds.is_empty() {
            return Err(RegistryError::EmptySeeds);
        }

        let mut names = HashSet::new();
        let mut seeds = Vec::with_capacity(raw.seeds.len());
        for s in raw.seeds {
            if !names.insert(s.name.clone()) {
                return Err(RegistryError::DuplicateSeedName { name: s.name });
            }
            seeds.push(SeedDefinition::new(
                s.name,
                s.seed,
                s.client_count,
                s.coin_count,
                s.transaction_count,
            ));
        }

        Ok(Self {
            version: raw.version,
            seeds,
        })
    }

    /// Returns the registry version.
    #[must_use]
    pub const fn version(&self) -> u32 {
        self.version
    }

    /// Returns all seed definitions.
    #[must_use]
    pub fn seeds(&self) -> &[SeedDefinition] {
        &self.seeds
    }

    /// Finds a seed definition by name.
    ///
    /// # Errors
    ///
    /// Returns [`RegistryError::SeedNotFound`] if no seed with the given name
    /// exists.
    pub fn find_seed(&self, name: &str) -> Result<&SeedDefinition, RegistryError> {
        self.seeds
            .iter()
            .find(|s| s.name == name)
            .ok_or_else(|| RegistryError::SeedNotFound {
                name: name.to_owned(),
            })
    }
}

/// A named seed definition for deterministic ledger generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedDefinition {
    name: String,
    seed: u64,
    client_count: usize,
    coin_count: usize,
    transaction_count: usize,
}

impl SeedDefinition {
    /// Builds a definition directly, bypassing a registry.
    #[must_use]
    pub const fn new(
        name: String,
        seed: u64,
        client_count: usize,
        coin_count: usize,
        transaction_count: usize,
    ) -> Self {
        Self {
            name,
            seed,
            client_count,
            coin_count,
            transaction_count,
        }
    }

    /// Returns the seed name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the RNG seed value.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }

    /// Returns the number of clients to generate.
    #[must_use]
    pub const fn client_count(&self) -> usize {
        self.client_count
    }

    /// Returns the number of coins to generate.
    #[must_use]
    pub const fn coin_count(&self) -> usize {
        self.coin_count
    }

    /// Returns the number of purchases to generate.
    #[must_use]
    pub const fn transaction_count(&self) -> usize {
        self.transaction_count
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedRegistry {
    version: u32,
    seeds: Vec<RawSeedDefinition>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawSeedDefinition {
    name: String,
    seed: u64,
    client_count: usize,
    coin_count: usize,
    #[serde(default)]
    transaction_count: usize,
}
