//! Thread-local RNG source for coin components.

use rand::Rng;

use crate::domain::ports::BitTripleSource;
use crate::domain::{BIT_MAX, BIT_MIN, BitTriple};

/// Draws each component uniformly from the allowed range.
#[derive(Debug, Default, Clone, Copy)]
pub struct ThreadRngTripleSource;

impl ThreadRngTripleSource {
    /// Create the source.
    #[must_use]
    pub const fn new() -> Self {
        Self
    }
}

impl BitTripleSource for ThreadRngTripleSource {
    fn draw(&self) -> BitTriple {
        let mut rng = rand::thread_rng();
        BitTriple::clamped(
            rng.gen_range(BIT_MIN..=BIT_MAX),
            rng.gen_range(BIT_MIN..=BIT_MAX),
            rng.gen_range(BIT_MIN..=BIT_MAX),
        )
    }
}

#[cfg(test)]
mod tests {
    use rstest::rstest;

    use super::*;

    #[rstest]
    fn draws_stay_in_range() {
        let source = ThreadRngTripleSource::new();
        for _ in 0..500 {
            let triple = source.draw();
            for bit in [triple.bit1(), triple.bit2(), triple.bit3()] {
                assert!((BIT_MIN..=BIT_MAX).contains(&bit), "{bit}");
            }
        }
    }
}
