//! Driven port supplying candidate coin components.

use crate::domain::BitTriple;

/// Source of uniformly distributed component triples.
#[cfg_attr(test, mockall::automock)]
pub trait BitTripleSource: Send + Sync {
    /// Draw one candidate triple.
    fn draw(&self) -> BitTriple;
}
