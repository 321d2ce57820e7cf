//! The `State` module owns the account and applies queued transactions to it.
use tokio::sync::mpsc;
use tracing::{debug, warn};

use crate::bank::{Account, AccountError, Money, Transaction, amount::format_balance};

/// Represents the running ledger: the account plus the queue feeding it.
pub struct State {
    /// The account every transaction is applied to.
    account: Account,
    /// A channel receiver for processing incoming transactions.
    receiver: mpsc::Receiver<Transaction>,
    /// Number of transactions rejected so far.
    rejected: usize,
}

impl State {
    /// Creates a new instance of `State` around the given account.
    pub fn new(account: Account, receiver: mpsc::Receiver<Transaction>) -> Self {
        State {
            account,
            receiver,
            rejected: 0,
        }
    }

    /// Returns the account.
    pub fn get_account(&self) -> &Account {
        &self.account
    }

    /// Returns how many transactions were rejected.
    pub fn get_rejected(&self) -> usize {
        self.rejected
    }

    /// Applies a transaction. A missing amount is treated as an invalid amount.
    fn process_transaction(&mut self, transaction: Transaction) -> Result<Money, AccountError> {
        let operation = transaction.get_operation();
        let amount = transaction
            .get_amount()
            .ok_or(AccountError::InvalidAmount { operation })?;
        self.account.apply(operation, amount)
    }

    /// Runs the processing loop until every sender has been dropped.
    pub async fn run(&mut self) {
        while let Some(transaction) = self.receiver.recv().await {
            let operation = transaction.get_operation();
            match self.process_transaction(transaction) {
                Ok(balance) => {
                    debug!(%operation, balance = %format_balance(balance), "transaction applied")
                }
                Err(err) => {
                    self.rejected += 1;
                    warn!(%operation, error = %err, "transaction rejected");
                }
            }
        }
    }
}
