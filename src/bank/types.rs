//! Types and limits used throughout the ledger.

/// Money type, an amount in cents.
pub type Money = i64;

/// Number of cents in one major currency unit.
pub const CENTS_PER_UNIT: Money = 100;

/// Largest storable balance, 999999.99.
pub const MAX_BALANCE_CENTS: Money = 99_999_999;

/// Balance a fresh account starts with, 1000.00.
pub const DEFAULT_BALANCE_CENTS: Money = 100_000;
