use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Canonical money-movement direction of a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TransactionType {
    Deposit,
    Withdraw,
    Transfer,
}

impl TransactionType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Deposit => "deposit",
            TransactionType::Withdraw => "withdraw",
            TransactionType::Transfer => "transfer",
        }
    }

    /// True when the movement adds to the account balance.
    pub fn is_incoming(&self) -> bool {
        matches!(self, TransactionType::Deposit)
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.as_str())
    }
}

/// Normalized output of the message parser (bank-agnostic)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParsedTransaction {
    /// Account identifier exactly as it appeared in the message, masking included.
    pub account_number: String,
    #[serde(rename = "type")]
    pub transaction_type: TransactionType,
    /// Always non-negative; direction lives in `transaction_type`.
    pub amount: Decimal,
    pub description: String,
    pub raw_message: String,
}
