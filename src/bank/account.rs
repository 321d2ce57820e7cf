//! The account balance and the guarded operations that change it.
use std::fmt;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bank::{
    CENTS_PER_UNIT, DEFAULT_BALANCE_CENTS, MAX_BALANCE_CENTS, amount::format_balance,
    types::Money,
};

fn serialize_money<S>(money: &Money, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    format_balance(*money).serialize(serializer)
}

/// Direction of a balance change.
#[derive(Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Operation {
    Credit,
    Debit,
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Operation::Credit => f.write_str("Credit"),
            Operation::Debit => f.write_str("Debit"),
        }
    }
}

/// A single account holding one bounded balance.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Account {
    /// The balance in cents, always within `0..=MAX_BALANCE_CENTS`.
    #[serde(serialize_with = "serialize_money")]
    balance: Money,
}

impl Default for Account {
    fn default() -> Self {
        Account {
            balance: DEFAULT_BALANCE_CENTS,
        }
    }
}

impl Account {
    /// Creates an account with the default opening balance of 1000.00.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an account with the given opening balance.
    pub fn with_balance(cents: Money) -> Result<Self, AccountError> {
        let mut account = Account::new();
        account.write_balance(cents)?;
        Ok(account)
    }

    /// Returns the current balance in cents.
    pub fn read_balance(&self) -> Money {
        self.balance
    }

    /// Replaces the balance. Fails if `cents` is outside `0..=MAX_BALANCE_CENTS`.
    pub fn write_balance(&mut self, cents: Money) -> Result<(), AccountError> {
        if !(0..=MAX_BALANCE_CENTS).contains(&cents) {
            return Err(AccountError::OutOfRange);
        }
        self.balance = cents;
        Ok(())
    }

    /// Adds a positive amount and returns the new balance.
    pub fn credit_account(&mut self, amount: Money) -> Result<Money, AccountError> {
        if amount <= 0 {
            return Err(AccountError::InvalidAmount {
                operation: Operation::Credit,
            });
        }
        let new_balance = self
            .read_balance()
            .checked_add(amount)
            .filter(|balance| *balance <= MAX_BALANCE_CENTS)
            .ok_or(AccountError::ExceedsMaximum)?;
        self.write_balance(new_balance)?;
        Ok(new_balance)
    }

    /// Subtracts a positive amount and returns the new balance.
    /// Returns an error if the amount is larger than the current balance.
    pub fn debit_account(&mut self, amount: Money) -> Result<Money, AccountError> {
        if amount <= 0 {
            return Err(AccountError::InvalidAmount {
                operation: Operation::Debit,
            });
        }
        let current = self.read_balance();
        if amount > current {
            return Err(AccountError::InsufficientFunds);
        }
        let new_balance = current - amount;
        self.write_balance(new_balance)?;
        Ok(new_balance)
    }

    /// Applies a credit or a debit.
    pub fn apply(&mut self, operation: Operation, amount: Money) -> Result<Money, AccountError> {
        match operation {
            Operation::Credit => self.credit_account(amount),
            Operation::Debit => self.debit_account(amount),
        }
    }
}

/// Errors that can occur when changing the balance. None of them modify the account.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AccountError {
    #[error("{operation} amount must be positive integer cents")]
    InvalidAmount { operation: Operation },
    #[error(
        "Balance out of allowed range (0..{})",
        MAX_BALANCE_CENTS as f64 / CENTS_PER_UNIT as f64
    )]
    OutOfRange,
    #[error("Resulting balance exceeds maximum allowed")]
    ExceedsMaximum,
    #[error("Insufficient funds")]
    InsufficientFunds,
}

#[cfg(test)]
mod tests {
    use crate::bank::{Account, AccountError, MAX_BALANCE_CENTS, Operation};

    #[test]
    fn test_initial_balance() {
        let account = Account::new();
        assert_eq!(account.read_balance(), 100_000);
    }

    #[test]
    fn test_read_is_stable() {
        let account = Account::with_balance(4_321).unwrap();
        assert_eq!(account.read_balance(), account.read_balance());
        assert_eq!(account.read_balance(), 4_321);
    }

    #[test]
    fn test_write_bounds() {
        let mut account = Account::new();
        assert!(account.write_balance(0).is_ok());
        assert!(account.write_balance(MAX_BALANCE_CENTS).is_ok());
        assert_eq!(account.read_balance(), MAX_BALANCE_CENTS);
    }

    #[test]
    fn test_write_out_of_range() {
        let mut account = Account::new();
        assert_eq!(
            account.write_balance(100_000_000),
            Err(AccountError::OutOfRange)
        );
        assert_eq!(account.write_balance(-1), Err(AccountError::OutOfRange));
        assert_eq!(account.read_balance(), 100_000);
        assert!(matches!(
            Account::with_balance(-10),
            Err(AccountError::OutOfRange)
        ));
    }

    #[test]
    fn test_credit() {
        let mut account = Account::new();
        assert_eq!(account.credit_account(50_025), Ok(150_025));
        assert_eq!(account.read_balance(), 150_025);
    }

    #[test]
    fn test_credit_exceeds_maximum() {
        let mut account = Account::with_balance(99_990_000).unwrap();
        assert_eq!(
            account.credit_account(20_000),
            Err(AccountError::ExceedsMaximum)
        );
        assert_eq!(
            account.credit_account(i64::MAX),
            Err(AccountError::ExceedsMaximum)
        );
        assert_eq!(account.read_balance(), 99_990_000);
        assert_eq!(account.credit_account(9_999), Ok(MAX_BALANCE_CENTS));
    }

    #[test]
    fn test_debit() {
        let mut account = Account::with_balance(150_025).unwrap();
        assert_eq!(account.debit_account(20_025), Ok(130_000));
        assert_eq!(account.read_balance(), 130_000);
        assert_eq!(account.debit_account(130_000), Ok(0));
    }

    #[test]
    fn test_debit_insufficient_funds() {
        let mut account = Account::with_balance(10_000).unwrap();
        assert_eq!(
            account.debit_account(20_000),
            Err(AccountError::InsufficientFunds)
        );
        assert_eq!(account.read_balance(), 10_000);
    }

    #[test]
    fn test_non_positive_amounts() {
        let mut account = Account::new();
        assert_eq!(
            account.credit_account(0),
            Err(AccountError::InvalidAmount {
                operation: Operation::Credit
            })
        );
        assert_eq!(
            account.debit_account(-5),
            Err(AccountError::InvalidAmount {
                operation: Operation::Debit
            })
        );
        assert_eq!(account.read_balance(), 100_000);
    }

    #[test]
    fn test_error_messages() {
        assert_eq!(
            AccountError::OutOfRange.to_string(),
            "Balance out of allowed range (0..999999.99)"
        );
        assert_eq!(
            AccountError::InvalidAmount {
                operation: Operation::Debit
            }
            .to_string(),
            "Debit amount must be positive integer cents"
        );
        assert_eq!(AccountError::InsufficientFunds.to_string(), "Insufficient funds");
    }

    #[test]
    fn test_apply() {
        let mut account = Account::new();
        assert_eq!(account.apply(Operation::Credit, 500), Ok(100_500));
        assert_eq!(account.apply(Operation::Debit, 100_500), Ok(0));
    }

    #[test]
    fn test_serialize_report() {
        let mut writer = csv::Writer::from_writer(Vec::new());
        writer.serialize(Account::with_balance(150_025).unwrap()).unwrap();
        let report = String::from_utf8(writer.into_inner().unwrap()).unwrap();
        assert_eq!(report, "balance\n001500.25\n");
    }

    #[test]
    fn test_instances_are_independent() {
        let mut first = Account::new();
        let second = Account::new();
        first.debit_account(1).unwrap();
        assert_ne!(first.read_balance(), second.read_balance());
    }
}
