//! Startup seeding orchestration.

use std::sync::Arc;

use example_data::{RegistryError, SeedRegistry};
use mockable::DefaultClock;
use thiserror::Error;
use tracing::info;

use crate::domain::example_data::{
    ExampleDataSeedOutcome, ExampleDataSeeder, ExampleDataSeedingError,
};
use crate::domain::ports::SeedingResult;
use crate::example_data::config::ExampleDataSettings;
use crate::outbound::persistence::{DbPool, DieselExampleDataSeedRepository};
use crate::outbound::security::Argon2PasswordHasher;

/// Errors returned while executing startup seeding.
#[derive(Debug, Error)]
pub enum StartupSeedingError {
    /// Registry loading or parsing failed.
    #[error("registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Seed generation or persistence failed.
    #[error("example data seeding error: {0}")]
    Seeding(#[from] ExampleDataSeedingError),
    /// Seed name must not be empty.
    #[error("seed name must not be empty")]
    EmptySeedName,
}

/// Apply example data on startup when enabled.
///
/// Returns `Ok(None)` when seeding is disabled.
///
/// # Errors
///
/// Returns [`StartupSeedingError`] when the registry cannot be loaded, the
/// seed is unknown, or generation or persistence fails.
pub async fn seed_example_data_on_startup(
    settings: &ExampleDataSettings,
    db_pool: &DbPool,
) -> Result<Option<ExampleDataSeedOutcome>, StartupSeedingError> {
    if !settings.is_enabled() {
        info!(reason = "disabled", "example data seeding skipped");
        return Ok(None);
    }

    let seed_name = settings.seed_name().trim();
    if seed_name.is_empty() {
        return Err(StartupSeedingError::EmptySeedName);
    }

    let registry = load_registry(settings)?;
    let seeder = ExampleDataSeeder::new(
        Arc::new(DieselExampleDataSeedRepository::new(db_pool.clone())),
        Arc::new(Argon2PasswordHasher::new()),
        Arc::new(DefaultClock),
    );
    let outcome = seeder.seed_from_registry(&registry, seed_name).await?;

    match outcome.result {
        SeedingResult::Applied => info!(
            seed_key = %outcome.seed_key,
            clients = outcome.client_count,
            coins = outcome.coin_count,
            transactions = outcome.transaction_count,
            "example data seeding applied"
        ),
        SeedingResult::AlreadySeeded => info!(
            seed_key = %outcome.seed_key,
            "example data seed already applied; skipping"
        ),
    }

    Ok(Some(outcome))
}

fn load_registry(settings: &ExampleDataSettings) -> Result<SeedRegistry, RegistryError> {
    match settings.registry_path() {
        Some(path) => SeedRegistry::from_file(path),
        None => SeedRegistry::bundled(),
    }
}
