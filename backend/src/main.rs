//! Backend entry-point: migrates the ledger database, optionally seeds
//! example data and serves the REST API.

mod server;

#[cfg(feature = "example-data")]
use std::ffi::OsString;

use actix_web::web;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(feature = "example-data")]
use bitslow::example_data::{ExampleDataSettings, seed_example_data_on_startup};
use bitslow::inbound::http::health::HealthState;
use bitslow::outbound::persistence::{DbPool, PoolConfig, run_migrations};
use ortho_config::OrthoConfig;

use server::{ServerConfig, ServerSettings, create_server, load_session_key};

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = ServerSettings::load_from_iter(std::env::args_os())
        .map_err(|e| std::io::Error::other(format!("invalid server settings: {e}")))?;
    let key = load_session_key(&settings).map_err(std::io::Error::other)?;

    let database_url = settings.database_url();
    run_migrations(&database_url)
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(database_url.as_str()).with_max_size(settings.pool_size()))
        .await
        .map_err(std::io::Error::other)?;

    #[cfg(feature = "example-data")]
    seed_example_data(&pool).await?;

    let config = ServerConfig::new(key, settings.bind_addr(), pool)
        .with_cookie_secure(settings.cookie_secure);
    info!(
        bind_addr = %config.bind_addr(),
        database = %database_url,
        "starting server"
    );

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    server.await
}

/// Seed example data when `EXAMPLE_DATA_ENABLED` is set.
///
/// Reads only environment and configuration files so server CLI flags are
/// not parsed twice.
#[cfg(feature = "example-data")]
async fn seed_example_data(pool: &DbPool) -> std::io::Result<()> {
    let settings = ExampleDataSettings::load_from_iter([OsString::from("bitslow")])
        .map_err(|e| std::io::Error::other(format!("invalid example data settings: {e}")))?;
    seed_example_data_on_startup(&settings, pool)
        .await
        .map_err(std::io::Error::other)?;
    Ok(())
}
