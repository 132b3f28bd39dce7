//! Outbound adapters implementing domain ports for external infrastructure.
//!
//! - **persistence**: SQLite-backed repositories using Diesel ORM
//! - **security**: Argon2 password hashing
//! - **random_triples**: thread-local RNG feeding coin generation
//!
//! Adapters translate between domain types and infrastructure
//! representations. They contain no business logic.

pub mod persistence;
pub mod random_triples;
pub mod security;
