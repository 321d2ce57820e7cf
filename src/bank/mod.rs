//! Ledger module: the account, amount conversion, transactions and state management.
mod account;
pub mod amount;
mod state;
mod transaction;
mod types;

pub use account::*;
pub use state::*;
pub use transaction::*;
pub use types::*;
