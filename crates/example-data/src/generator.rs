//! Deterministic ledger generation from seed definitions.
//!
//! The same seed definition always produces an identical ledger. Purchases
//! are replayed against an in-memory ownership table while they are drawn, so
//! every generated transaction names the coin's previous owner as its seller
//! and each coin's final owner matches the buyer of its last purchase.

use std::collections::HashSet;

use fake::Fake;
use fake::faker::address::raw::{BuildingNumber, CityName, StreetName};
use fake::faker::name::raw::{FirstName, LastName};
use fake::faker::phone_number::raw::PhoneNumber;
use fake::locales::EN;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::error::GenerationError;
use crate::registry::SeedDefinition;
use crate::seed::{ClientSeed, CoinSeed, ExampleLedger, TransactionSeed};
use crate::validation::{BIT_MAX, BIT_MIN, derive_email, is_valid_client_name};

/// Maximum number of attempts to generate a valid client name.
const MAX_NAME_ATTEMPTS: usize = 100;

/// Maximum number of draws spent finding an unused triple for one coin.
const MAX_TRIPLE_ATTEMPTS: usize = 10_000;

/// Number of distinct `(bit1, bit2, bit3)` triples.
const TRIPLE_CAPACITY: usize = 1_000_000;

/// Smallest generated coin value.
const VALUE_MIN: u32 = 10;

/// Largest generated coin value.
const VALUE_MAX: u32 = 1_000;

/// Largest gap between consecutive purchases, in minutes.
const MAX_PURCHASE_GAP_MINUTES: u32 = 240;

/// Generates a ledger from a seed definition.
///
/// # Errors
///
/// Returns [`GenerationError`] if:
/// - the seed requests more coins than there are unique triples
/// - purchases are requested without a coin or without two clients
/// - name or triple generation exhausts its retry budget
///
/// # Example
///
/// ```
/// use example_data::{SeedDefinition, generate_ledger};
///
/// let seed = SeedDefinition::new("demo".to_owned(), 42, 3, 5, 8);
/// let first = generate_ledger(&seed).expect("generated");
/// let second = generate_ledger(&seed).expect("generated");
///
/// assert_eq!(first, second);
/// ```
pub fn generate_ledger(seed_def: &SeedDefinition) -> Result<ExampleLedger, GenerationError> {
    check_feasible(seed_def)?;

    let mut rng = ChaCha8Rng::seed_from_u64(seed_def.seed());

    let clients = (0..seed_def.client_count())
        .map(|index| generate_client(&mut rng, index))
        .collect::<Result<Vec<_>, _>>()?;

    let mut coins = generate_coins(&mut rng, seed_def.coin_count())?;
    let transactions = generate_purchases(
        &mut rng,
        &mut coins,
        clients.len(),
        seed_def.transaction_count(),
    );

    Ok(ExampleLedger {
        clients,
        coins,
        transactions,
    })
}

fn check_feasible(seed_def: &SeedDefinition) -> Result<(), GenerationError> {
    if seed_def.coin_count() > TRIPLE_CAPACITY {
        return Err(GenerationError::TripleSpaceExhausted {
            requested: seed_def.coin_count(),
            capacity: TRIPLE_CAPACITY,
        });
    }
    let can_trade = seed_def.coin_count() >= 1 && seed_def.client_count() >= 2;
    if seed_def.transaction_count() > 0 && !can_trade {
        return Err(GenerationError::NotEnoughParticipants {
            transaction_count: seed_def.transaction_count(),
            coin_count: seed_def.coin_count(),
            client_count: seed_def.client_count(),
        });
    }
    Ok(())
}

fn generate_client(rng: &mut ChaCha8Rng, index: usize) -> Result<ClientSeed, GenerationError> {
    let name = generate_client_name(rng)?;
    let email = derive_email(&name, index);

    let phone = rng
        .random_ratio(2, 3)
        .then(|| PhoneNumber(EN).fake_with_rng::<String, _>(rng));
    let address = rng.random_ratio(3, 4).then(|| {
        let number: String = BuildingNumber(EN).fake_with_rng(rng);
        let street: String = StreetName(EN).fake_with_rng(rng);
        let city: String = CityName(EN).fake_with_rng(rng);
        format!("{number} {street}, {city}")
    });

    Ok(ClientSeed {
        name,
        email,
        phone,
        address,
    })
}

fn generate_client_name(rng: &mut ChaCha8Rng) -> Result<String, GenerationError> {
    for _ in 0..MAX_NAME_ATTEMPTS {
        let first: String = FirstName(EN).fake_with_rng(rng);
        let last: String = LastName(EN).fake_with_rng(rng);
        let candidate = format!("{first} {last}");

        if is_valid_client_name(&candidate) {
            return Ok(candidate);
        }
    }

    Err(GenerationError::ClientNameGenerationFailed {
        max_attempts: MAX_NAME_ATTEMPTS,
    })
}

fn generate_coins(rng: &mut ChaCha8Rng, count: usize) -> Result<Vec<CoinSeed>, GenerationError> {
    let mut used = HashSet::with_capacity(count);
    let mut coins = Vec::with_capacity(count);

    for _ in 0..count {
        let bits = draw_unused_triple(rng, &mut used).ok_or(
            GenerationError::TripleSpaceExhausted {
                requested: count,
                capacity: TRIPLE_CAPACITY,
            },
        )?;
        coins.push(CoinSeed {
            value: rng.random_range(VALUE_MIN..=VALUE_MAX),
            bits,
            owner: None,
        });
    }

    Ok(coins)
}

fn draw_unused_triple(
    rng: &mut ChaCha8Rng,
    used: &mut HashSet<(u8, u8, u8)>,
) -> Option<(u8, u8, u8)> {
    for _ in 0..MAX_TRIPLE_ATTEMPTS {
        let triple = (
            rng.random_range(BIT_MIN..=BIT_MAX),
            rng.random_range(BIT_MIN..=BIT_MAX),
            rng.random_range(BIT_MIN..=BIT_MAX),
        );
        if used.insert(triple) {
            return Some(triple);
        }
    }
    None
}

/// Draws purchases and updates coin owners as it goes.
///
/// Callers guarantee at least one coin and two clients when `count > 0`.
fn generate_purchases(
    rng: &mut ChaCha8Rng,
    coins: &mut [CoinSeed],
    client_count: usize,
    count: usize,
) -> Vec<TransactionSeed> {
    let mut transactions = Vec::with_capacity(count);
    let mut minutes_offset = 0_u32;

    for _ in 0..count {
        let coin_index = rng.random_range(0..coins.len());
        let Some(coin) = coins.get_mut(coin_index) else {
            continue;
        };

        let seller = coin.owner;
        let buyer = draw_buyer(rng, client_count, seller);
        coin.owner = Some(buyer);

        minutes_offset =
            minutes_offset.saturating_add(rng.random_range(1..=MAX_PURCHASE_GAP_MINUTES));
        transactions.push(TransactionSeed {
            coin: coin_index,
            seller,
            buyer,
            amount: coin.value,
            minutes_offset,
        });
    }

    transactions
}

/// Picks a buyer other than the current owner.
fn draw_buyer(rng: &mut ChaCha8Rng, client_count: usize, owner: Option<usize>) -> usize {
    match owner {
        None => rng.random_range(0..client_count),
        Some(owner) => {
            // Draw from the other clients, skipping over the owner.
            let pick = rng.random_range(0..client_count - 1);
            if pick >= owner { pick + 1 } else { pick }
        }
    }
}
