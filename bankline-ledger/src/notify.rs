//! Notification side: buffered event fan-out and the chat acknowledgement
//! sent back to the message source.

use bankline_ingest::{RecordedTransaction, SinkError, TransactionEvent, TransactionPublisher, TransactionType};
use rust_decimal::{Decimal, RoundingStrategy};

/// Publisher that keeps events in arrival order until drained.
#[derive(Debug, Clone, Default)]
pub struct Outbox {
    events: Vec<TransactionEvent>,
}

impl Outbox {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<TransactionEvent> {
        std::mem::take(&mut self.events)
    }
}

impl TransactionPublisher for Outbox {
    fn publish(&mut self, event: &TransactionEvent) -> Result<(), SinkError> {
        self.events.push(event.clone());
        Ok(())
    }
}

/// Thai reply confirming a recorded transaction.
///
/// ```text
/// ✅ บันทึกธุรกรรมเรียบร้อย
/// 💰 จ่ายเงิน: ฿1,000
/// 🏦 บัญชี: xxx-x-12345-x
/// ```
pub fn acknowledgement(recorded: &RecordedTransaction) -> String {
    let txn = &recorded.transaction;
    let direction = match txn.transaction_type {
        TransactionType::Deposit => "รับเงิน",
        TransactionType::Withdraw | TransactionType::Transfer => "จ่ายเงิน",
    };

    format!(
        "✅ บันทึกธุรกรรมเรียบร้อย\n💰 {}: ฿{}\n🏦 บัญชี: {}",
        direction,
        format_baht(txn.amount),
        txn.account_number
    )
}

/// Group thousands and drop trailing zero fractions, at most 3 decimals with
/// halves rounded away from zero: `1000.00` -> `1,000`, `2500.50` -> `2,500.5`.
pub fn format_baht(amount: Decimal) -> String {
    let plain = amount
        .round_dp_with_strategy(3, RoundingStrategy::MidpointAwayFromZero)
        .normalize().to_string();
    let (sign, digits) = match plain.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", plain.as_str()),
    };
    let (int_part, frac_part) = match digits.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (digits, None),
    };

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    match frac_part {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}
