//! Diesel table definitions for the SQLite schema.
//!
//! Keep these in step with `backend/migrations`. Identifiers are declared as
//! `BigInt` because SQLite rowids are 64-bit.

diesel::table! {
    /// Registered clients.
    clients (id) {
        /// Rowid primary key.
        id -> BigInt,
        /// Display name.
        name -> Text,
        /// Lower-cased e-mail, unique.
        email -> Text,
        /// Encoded argon2 hash.
        password -> Text,
        /// Optional phone number.
        phone -> Nullable<Text>,
        /// Optional postal address.
        address -> Nullable<Text>,
    }
}

diesel::table! {
    /// Minted coins; `(bit1, bit2, bit3)` is unique.
    coins (coin_id) {
        /// Rowid primary key.
        coin_id -> BigInt,
        /// Positive value.
        value -> BigInt,
        /// First component.
        bit1 -> Integer,
        /// Second component.
        bit2 -> Integer,
        /// Third component.
        bit3 -> Integer,
        /// Current owner.
        client_id -> Nullable<BigInt>,
    }
}

diesel::table! {
    /// Append-only purchase ledger.
    transactions (id) {
        /// Rowid primary key.
        id -> BigInt,
        /// Traded coin.
        coin_id -> BigInt,
        /// Price paid.
        amount -> BigInt,
        /// UTC sale time.
        transaction_date -> Timestamp,
        /// Previous owner; null for the original issuer.
        seller_id -> Nullable<BigInt>,
        /// New owner.
        buyer_id -> BigInt,
    }
}

diesel::table! {
    /// Applied example data seeds.
    example_data_runs (seed_key) {
        /// Seed name.
        seed_key -> Text,
        /// RNG seed.
        seed -> BigInt,
        /// Clients inserted.
        client_count -> Integer,
        /// Coins inserted.
        coin_count -> Integer,
        /// Transactions inserted.
        transaction_count -> Integer,
        /// UTC time the run was applied.
        applied_at -> Timestamp,
    }
}

diesel::joinable!(coins -> clients (client_id));
diesel::joinable!(transactions -> coins (coin_id));

diesel::allow_tables_to_appear_in_same_query!(clients, coins, transactions, example_data_runs);
