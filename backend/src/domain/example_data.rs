//! Example ledger seeding.
//!
//! Turns a deterministic `example-data` ledger into validated domain rows
//! and hands them to the seeding repository port in one request.

use std::sync::Arc;

use chrono::{DateTime, TimeDelta, Utc};
use example_data::{
    ClientSeed, CoinSeed, ExampleLedger, GenerationError, RegistryError, SeedRegistry,
    TransactionSeed, generate_ledger,
};
use mockable::Clock;
use thiserror::Error;

use crate::domain::ports::{
    ExampleDataSeedCoin, ExampleDataSeedRepository, ExampleDataSeedRepositoryError,
    ExampleDataSeedRequest, ExampleDataSeedTransaction, PasswordHashError, PasswordHasher,
    SeedingResult,
};
use crate::domain::{
    BitTriple, ClientName, ClientValidationError, CoinValidationError, CoinValue, EmailAddress,
    NewClient, Password,
};

/// Password shared by every seeded client.
pub const EXAMPLE_PASSWORD: &str = "bitslow-demo";

/// Result of attempting to apply example data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExampleDataSeedOutcome {
    /// Seed key used to record the run.
    pub seed_key: String,
    /// Clients generated.
    pub client_count: usize,
    /// Coins generated.
    pub coin_count: usize,
    /// Transactions generated.
    pub transaction_count: usize,
    /// Persistence outcome.
    pub result: SeedingResult,
}

/// Errors raised while preparing or applying example data.
#[derive(Debug, Error)]
pub enum ExampleDataSeedingError {
    /// Registry lookup failed.
    #[error("seed registry error: {0}")]
    Registry(#[from] RegistryError),
    /// Ledger generation failed.
    #[error("example data generation failed: {0}")]
    Generation(#[from] GenerationError),
    /// A generated client failed validation.
    #[error("generated client failed validation: {0}")]
    ClientInvalid(#[from] ClientValidationError),
    /// A generated coin failed validation.
    #[error("generated coin failed validation: {0}")]
    CoinInvalid(#[from] CoinValidationError),
    /// The seed does not fit the database column.
    #[error("seed value {seed} exceeds maximum representable value")]
    SeedOverflow {
        /// Offending seed.
        seed: u64,
    },
    /// The shared password could not be hashed.
    #[error("example password hashing failed: {0}")]
    PasswordHash(#[from] PasswordHashError),
    /// Persistence failed.
    #[error("example data persistence error: {0}")]
    Persistence(#[from] ExampleDataSeedRepositoryError),
}

/// Service that seeds example ledgers.
#[derive(Clone)]
pub struct ExampleDataSeeder<R, H> {
    repository: Arc<R>,
    hasher: Arc<H>,
    clock: Arc<dyn Clock>,
}

impl<R, H> ExampleDataSeeder<R, H> {
    /// Create a seeder.
    pub fn new(repository: Arc<R>, hasher: Arc<H>, clock: Arc<dyn Clock>) -> Self {
        Self {
            repository,
            hasher,
            clock,
        }
    }
}

impl<R, H> ExampleDataSeeder<R, H>
where
    R: ExampleDataSeedRepository,
    H: PasswordHasher,
{
    /// Generate and apply the named seed.
    ///
    /// The newest generated transaction is stamped with the current time and
    /// older ones are spaced back from it.
    ///
    /// # Errors
    ///
    /// Returns [`ExampleDataSeedingError`] if lookup, generation, validation,
    /// hashing or persistence fails.
    pub async fn seed_from_registry(
        &self,
        registry: &SeedRegistry,
        seed_name: &str,
    ) -> Result<ExampleDataSeedOutcome, ExampleDataSeedingError> {
        let seed_def = registry.find_seed(seed_name)?;
        let seed = i64::try_from(seed_def.seed()).map_err(|_| {
            ExampleDataSeedingError::SeedOverflow {
                seed: seed_def.seed(),
            }
        })?;
        let ledger = generate_ledger(seed_def)?;

        let password = Password::parse(EXAMPLE_PASSWORD)?;
        let password_hash = self.hasher.hash(&password)?;
        let now = self.clock.utc();
        let request = build_request(seed_def.name(), seed, &ledger, &password_hash, now)?;

        let result = self.repository.seed_example_data(request).await?;
        Ok(ExampleDataSeedOutcome {
            seed_key: seed_def.name().to_owned(),
            client_count: ledger.clients.len(),
            coin_count: ledger.coins.len(),
            transaction_count: ledger.transactions.len(),
            result,
        })
    }
}

fn build_request(
    seed_key: &str,
    seed: i64,
    ledger: &ExampleLedger,
    password_hash: &str,
    now: DateTime<Utc>,
) -> Result<ExampleDataSeedRequest, ExampleDataSeedingError> {
    let clients = ledger
        .clients
        .iter()
        .map(|client| convert_client(client, password_hash))
        .collect::<Result<Vec<_>, _>>()?;
    let coins = ledger
        .coins
        .iter()
        .map(convert_coin)
        .collect::<Result<Vec<_>, _>>()?;
    let start = now - TimeDelta::minutes(i64::from(ledger.span_minutes()));
    let transactions = ledger
        .transactions
        .iter()
        .map(|transaction| convert_transaction(transaction, start))
        .collect();

    Ok(ExampleDataSeedRequest {
        seed_key: seed_key.to_owned(),
        seed,
        applied_at: now,
        clients,
        coins,
        transactions,
    })
}

fn convert_client(seed: &ClientSeed, password_hash: &str) -> Result<NewClient, ClientValidationError> {
    Ok(NewClient {
        name: ClientName::parse(&seed.name)?,
        email: EmailAddress::parse(&seed.email)?,
        password_hash: password_hash.to_owned(),
        phone: seed.phone.clone(),
        address: seed.address.clone(),
    })
}

fn convert_coin(seed: &CoinSeed) -> Result<ExampleDataSeedCoin, CoinValidationError> {
    let (bit1, bit2, bit3) = seed.bits;
    Ok(ExampleDataSeedCoin {
        value: CoinValue::new(i64::from(seed.value))?,
        bits: BitTriple::new(i64::from(bit1), i64::from(bit2), i64::from(bit3))?,
        owner: seed.owner,
    })
}

fn convert_transaction(seed: &TransactionSeed, start: DateTime<Utc>) -> ExampleDataSeedTransaction {
    ExampleDataSeedTransaction {
        coin: seed.coin,
        seller: seed.seller,
        buyer: seed.buyer,
        amount: i64::from(seed.amount),
        transaction_date: start + TimeDelta::minutes(i64::from(seed.minutes_offset)),
    }
}

#[cfg(test)]
mod tests {
    //! Unit tests for example data seeding orchestration.

    use chrono::{Local, TimeZone};
    use rstest::{fixture, rstest};

    use super::*;
    use crate::domain::ports::{MockExampleDataSeedRepository, MockPasswordHasher};

    const REGISTRY_JSON: &str = r#"{
        "version": 1,
        "seeds": [
            {"name": "tiny", "seed": 42, "clientCount": 3, "coinCount": 4, "transactionCount": 6},
            {"name": "huge-seed", "seed": 18446744073709551615, "clientCount": 1, "coinCount": 1}
        ]
    }"#;

    struct FixtureClock(DateTime<Utc>);

    impl Clock for FixtureClock {
        fn local(&self) -> DateTime<Local> {
            self.0.with_timezone(&Local)
        }

        fn utc(&self) -> DateTime<Utc> {
            self.0
        }
    }

    #[fixture]
    fn registry() -> SeedRegistry {
        SeedRegistry::from_json(REGISTRY_JSON).expect("registry should parse")
    }

    #[fixture]
    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 1, 12, 0, 0)
            .single()
            .expect("valid timestamp")
    }

    fn hasher() -> MockPasswordHasher {
        let mut hasher = MockPasswordHasher::new();
        hasher
            .expect_hash()
            .withf(|password: &Password| password.expose() == EXAMPLE_PASSWORD)
            .times(1)
            .return_once(|_| Ok("shared-hash".to_owned()));
        hasher
    }

    fn seeder(
        repo: MockExampleDataSeedRepository,
        hasher: MockPasswordHasher,
        now: DateTime<Utc>,
    ) -> ExampleDataSeeder<MockExampleDataSeedRepository, MockPasswordHasher> {
        ExampleDataSeeder::new(Arc::new(repo), Arc::new(hasher), Arc::new(FixtureClock(now)))
    }

    #[rstest]
    #[tokio::test]
    async fn seed_applies_generated_ledger(registry: SeedRegistry, now: DateTime<Utc>) {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .withf(move |request| {
                request.seed_key == "tiny"
                    && request.seed == 42
                    && request.applied_at == now
                    && request.clients.len() == 3
                    && request.coins.len() == 4
                    && request.transactions.len() == 6
                    && request
                        .clients
                        .iter()
                        .all(|client| client.password_hash == "shared-hash")
            })
            .times(1)
            .return_once(|_| Ok(SeedingResult::Applied));

        let outcome = seeder(repo, hasher(), now)
            .seed_from_registry(&registry, "tiny")
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.result, SeedingResult::Applied);
        assert_eq!(outcome.seed_key, "tiny");
        assert_eq!(
            (outcome.client_count, outcome.coin_count, outcome.transaction_count),
            (3, 4, 6)
        );
    }

    #[rstest]
    #[tokio::test]
    async fn transactions_end_at_now_and_ascend(registry: SeedRegistry, now: DateTime<Utc>) {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .withf(move |request| {
                let dates: Vec<_> = request
                    .transactions
                    .iter()
                    .map(|t| t.transaction_date)
                    .collect();
                dates.windows(2).all(|pair| pair.first() < pair.get(1))
                    && dates.last() == Some(&now)
            })
            .times(1)
            .return_once(|_| Ok(SeedingResult::Applied));

        seeder(repo, hasher(), now)
            .seed_from_registry(&registry, "tiny")
            .await
            .expect("seed succeeds");
    }

    #[rstest]
    #[tokio::test]
    async fn already_seeded_is_reported(registry: SeedRegistry, now: DateTime<Utc>) {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .return_once(|_| Ok(SeedingResult::AlreadySeeded));

        let outcome = seeder(repo, hasher(), now)
            .seed_from_registry(&registry, "tiny")
            .await
            .expect("seed succeeds");

        assert_eq!(outcome.result, SeedingResult::AlreadySeeded);
    }

    #[rstest]
    #[tokio::test]
    async fn unknown_seed_fails_before_hashing(registry: SeedRegistry, now: DateTime<Utc>) {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data().never();
        let mut hasher = MockPasswordHasher::new();
        hasher.expect_hash().never();

        let err = seeder(repo, hasher, now)
            .seed_from_registry(&registry, "missing")
            .await
            .expect_err("unknown seed");

        assert!(matches!(err, ExampleDataSeedingError::Registry(_)));
    }

    #[rstest]
    #[tokio::test]
    async fn oversized_seed_is_rejected(registry: SeedRegistry, now: DateTime<Utc>) {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data().never();

        let err = seeder(repo, MockPasswordHasher::new(), now)
            .seed_from_registry(&registry, "huge-seed")
            .await
            .expect_err("seed overflow");

        assert!(matches!(
            err,
            ExampleDataSeedingError::SeedOverflow { seed: u64::MAX }
        ));
    }

    #[rstest]
    #[tokio::test]
    async fn persistence_errors_propagate(registry: SeedRegistry, now: DateTime<Utc>) {
        let mut repo = MockExampleDataSeedRepository::new();
        repo.expect_seed_example_data()
            .return_once(|_| Err(ExampleDataSeedRepositoryError::query("constraint failed")));

        let err = seeder(repo, hasher(), now)
            .seed_from_registry(&registry, "tiny")
            .await
            .expect_err("persistence failure");

        assert!(matches!(err, ExampleDataSeedingError::Persistence(_)));
    }
}
