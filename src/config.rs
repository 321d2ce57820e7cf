//! Command-line configuration.
use std::path::PathBuf;

use clap::Parser;
use thiserror::Error;

use crate::bank::{
    Account, AccountError, DEFAULT_BALANCE_CENTS, Money, amount::parse_amount_to_cents,
};

/// Single-account ledger. Without an operations file an interactive menu runs.
#[derive(Parser, Debug, Clone, PartialEq, Eq)]
#[command(name = "ledger", version)]
pub struct Config {
    /// CSV file of `type,amount` rows to replay against the account.
    #[arg(value_name = "OPERATIONS_CSV")]
    pub script: Option<PathBuf>,

    /// Balance the account starts with, e.g. 250.00.
    #[arg(
        long,
        value_name = "AMOUNT",
        default_value = "1000.00",
        allow_hyphen_values = true,
        value_parser = parse_opening_balance
    )]
    pub opening_balance: Money,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            script: None,
            opening_balance: DEFAULT_BALANCE_CENTS,
        }
    }
}

impl Config {
    /// Creates the account described by this configuration.
    pub fn account(&self) -> Result<Account, AccountError> {
        Account::with_balance(self.opening_balance)
    }
}

/// Parses a decimal opening balance and checks it is storable.
fn parse_opening_balance(value: &str) -> Result<Money, ConfigError> {
    let cents = parse_amount_to_cents(value)
        .ok_or_else(|| ConfigError::InvalidAmount(value.to_string()))?;
    Account::with_balance(cents)?;
    Ok(cents)
}

/// Errors raised while reading the command line.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Not a decimal amount: {0:?}")]
    InvalidAmount(String),
    #[error("Invalid opening balance: {0}")]
    OpeningBalance(#[from] AccountError),
}
