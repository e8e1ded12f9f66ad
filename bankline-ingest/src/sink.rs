//! Collaborator seams: where parsed transactions go after the parser.
//!
//! Real adapters (database, push service, chat reply) live outside this crate;
//! `bankline-ledger` ships in-memory implementations.

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::SinkError;
use crate::types::ParsedTransaction;

/// Channel every transaction event is published on.
pub const TRANSACTIONS_CHANNEL: &str = "transactions";
/// Event name for a freshly recorded transaction.
pub const NEW_TRANSACTION_EVENT: &str = "new-transaction";

/// A transaction after the persistence sink accepted it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RecordedTransaction {
    pub id: u64,
    #[serde(flatten)]
    pub transaction: ParsedTransaction,
    pub recorded_at: DateTime<Utc>,
    /// Account balance once this transaction was applied.
    pub balance_after: Decimal,
}

/// Payload fanned out to real-time listeners.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionEvent {
    pub channel: String,
    pub event: String,
    pub transaction: RecordedTransaction,
    pub account_number: String,
}

impl TransactionEvent {
    pub fn new_transaction(transaction: RecordedTransaction) -> Self {
        let account_number = transaction.transaction.account_number.clone();
        Self {
            channel: TRANSACTIONS_CHANNEL.to_string(),
            event: NEW_TRANSACTION_EVENT.to_string(),
            transaction,
            account_number,
        }
    }
}

/// Persistence sink: upserts the account keyed by account number and records
/// the transaction. Balance arithmetic belongs here, not in the parser:
/// deposits add, withdrawals and transfers subtract.
pub trait TransactionSink {
    fn record(&mut self, transaction: &ParsedTransaction) -> Result<RecordedTransaction, SinkError>;
}

/// Notification sink for persisted transactions.
pub trait TransactionPublisher {
    fn publish(&mut self, event: &TransactionEvent) -> Result<(), SinkError>;
}

impl<T: TransactionSink + ?Sized> TransactionSink for &mut T {
    fn record(&mut self, transaction: &ParsedTransaction) -> Result<RecordedTransaction, SinkError> {
        (**self).record(transaction)
    }
}

impl<T: TransactionPublisher + ?Sized> TransactionPublisher for &mut T {
    fn publish(&mut self, event: &TransactionEvent) -> Result<(), SinkError> {
        (**self).publish(event)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::TransactionType;
    use chrono::TimeZone;

    fn recorded() -> RecordedTransaction {
        RecordedTransaction {
            id: 7,
            transaction: ParsedTransaction {
                account_number: "222-3-44444-5".to_string(),
                transaction_type: TransactionType::Deposit,
                amount: Decimal::new(300, 0),
                description: String::new(),
                raw_message: "SCB Account(222-3-44444-5) CR ฿300".to_string(),
            },
            recorded_at: Utc.with_ymd_and_hms(2026, 2, 19, 12, 0, 0).unwrap(),
            balance_after: Decimal::new(300, 0),
        }
    }

    #[test]
    fn test_new_transaction_event() {
        let event = TransactionEvent::new_transaction(recorded());
        assert_eq!(event.channel, "transactions");
        assert_eq!(event.event, "new-transaction");
        assert_eq!(event.account_number, "222-3-44444-5");
    }

    #[test]
    fn test_recorded_transaction_flattens_parsed_fields() {
        let json = serde_json::to_value(recorded()).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["accountNumber"], "222-3-44444-5");
        assert_eq!(json["type"], "deposit");
        assert_eq!(json["balanceAfter"], "300");
        assert!(json["recordedAt"].as_str().unwrap().starts_with("2026-02-19T12:00:00"));
    }
}
