//! Domain ports and supporting types for the hexagonal boundary.
//!
//! Driving ports (`*Command`, `*Query`) are called by inbound adapters and
//! implemented by domain services. Driven ports (repositories, hasher,
//! triple source) are implemented by outbound adapters.

mod macros;
pub(crate) use macros::define_port_error;

mod account_command;
mod account_query;
mod bit_triple_source;
mod client_repository;
mod example_data_seed_repository;
mod ledger_command;
mod ledger_query;
mod ledger_repository;
mod password_hasher;

pub use account_command::AccountCommand;
#[cfg(test)]
pub use account_command::MockAccountCommand;
pub use account_query::AccountQuery;
#[cfg(test)]
pub use account_query::MockAccountQuery;
pub use bit_triple_source::BitTripleSource;
#[cfg(test)]
pub use bit_triple_source::MockBitTripleSource;
#[cfg(test)]
pub use client_repository::MockClientRepository;
pub use client_repository::{ClientPersistenceError, ClientRepository};
#[cfg(test)]
pub use example_data_seed_repository::MockExampleDataSeedRepository;
pub use example_data_seed_repository::{
    ExampleDataSeedCoin, ExampleDataSeedRepository, ExampleDataSeedRepositoryError,
    ExampleDataSeedRequest, ExampleDataSeedTransaction, SeedingResult,
};
#[cfg(test)]
pub use ledger_command::MockLedgerCommand;
pub use ledger_command::LedgerCommand;
#[cfg(test)]
pub use ledger_query::MockLedgerQuery;
pub use ledger_query::LedgerQuery;
#[cfg(test)]
pub use ledger_repository::MockLedgerRepository;
pub use ledger_repository::{LedgerPersistenceError, LedgerRepository};
#[cfg(test)]
pub use password_hasher::MockPasswordHasher;
pub use password_hasher::{PasswordHashError, PasswordHasher};
