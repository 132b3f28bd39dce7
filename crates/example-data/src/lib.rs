//! Deterministic example ledger generation for BitSlow demonstrations.
//!
//! The crate turns a named seed into a believable marketplace ledger:
//! clients with names, derived e-mail addresses and optional contact
//! details; coins with unique `(bit1, bit2, bit3)` triples; and per-coin
//! chains of purchases that respect the ownership rules of the backend.
//! It is independent of backend domain types so the backend can depend on
//! it without cycles.
//!
//! # Example
//!
//! ```
//! use example_data::{SeedRegistry, generate_ledger};
//!
//! let json = r#"{
//!     "version": 1,
//!     "seeds": [{
//!         "name": "test-seed",
//!         "seed": 42,
//!         "clientCount": 4,
//!         "coinCount": 6,
//!         "transactionCount": 10
//!     }]
//! }"#;
//!
//! let registry = SeedRegistry::from_json(json).expect("valid registry");
//! let seed = registry.find_seed("test-seed").expect("seed exists");
//! let ledger = generate_ledger(seed).expect("generation succeeds");
//!
//! assert_eq!(ledger.clients.len(), 4);
//! assert_eq!(ledger.coins.len(), 6);
//! assert_eq!(ledger.transactions.len(), 10);
//! ```

mod error;
mod generator;
mod registry;
mod seed;
mod validation;

pub use error::{GenerationError, RegistryError};
pub use generator::generate_ledger;
pub use registry::{DEFAULT_REGISTRY_JSON, SeedDefinition, SeedRegistry};
pub use seed::{ClientSeed, CoinSeed, ExampleLedger, TransactionSeed};
pub use validation::{BIT_MAX, BIT_MIN, CLIENT_NAME_MAX, derive_email, is_valid_client_name};
