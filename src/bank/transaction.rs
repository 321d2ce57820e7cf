//! Credit and debit records replayed from an operations file.
use serde::{Deserialize, de};

use crate::bank::{Operation, amount::parse_amount_to_cents, types::Money};

/// Deserializes a decimal amount into cents, leaving unparsable text as `None`.
fn deserialize_money<'de, D>(deserializer: D) -> Result<Option<Money>, D::Error>
where
    D: de::Deserializer<'de>,
{
    let value: Option<String> = Option::deserialize(deserializer)?;
    Ok(value.and_then(|text| parse_amount_to_cents(text.as_str())))
}

/// A single operation to apply to the account.
#[derive(Deserialize, Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    /// Whether the amount is credited or debited.
    #[serde(rename = "type")]
    operation: Operation,

    /// The amount in cents, `None` when the input was not a decimal.
    #[serde(deserialize_with = "deserialize_money")]
    amount: Option<Money>,
}

impl Transaction {
    #[cfg(test)]
    pub fn new(operation: Operation, amount: Option<Money>) -> Self {
        Transaction { operation, amount }
    }

    pub fn get_operation(&self) -> Operation {
        self.operation
    }

    pub fn get_amount(&self) -> Option<Money> {
        self.amount
    }
}
