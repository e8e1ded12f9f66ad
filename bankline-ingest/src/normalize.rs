//! Direction-token and amount normalization.

use rust_decimal::Decimal;
use std::str::FromStr;

use crate::types::TransactionType;

/// Credit-like / incoming vocabulary. Checked before `WITHDRAW_VOCABULARY`.
pub const DEPOSIT_VOCABULARY: &[&str] = &["ฝาก", "รับเงิน", "in", "deposit", "credit", "cr"];

/// Debit-like / outgoing vocabulary.
pub const WITHDRAW_VOCABULARY: &[&str] = &["ถอน", "จ่ายเงิน", "out", "withdraw", "debit", "dr"];

/// Classify a captured direction token.
///
/// Case-insensitive containment test; a token hitting both vocabularies is a
/// deposit, a token hitting neither is a transfer.
pub fn normalize_transaction_type(token: &str) -> TransactionType {
    let lower = token.to_lowercase();

    if DEPOSIT_VOCABULARY.iter().any(|w| lower.contains(w)) {
        return TransactionType::Deposit;
    }
    if WITHDRAW_VOCABULARY.iter().any(|w| lower.contains(w)) {
        return TransactionType::Withdraw;
    }

    TransactionType::Transfer
}

/// Parse a localized amount literal such as `12,345.67` or `฿12,345.67`.
///
/// The currency sign and thousands separators are dropped, as is a single
/// sentence-ending period.
/// Returns `None` for anything that is not a non-negative decimal.
pub fn parse_amount(literal: &str) -> Option<Decimal> {
    let cleaned = literal.trim_start_matches('฿').replace(',', "");
    let cleaned = cleaned.strip_suffix('.').unwrap_or(&cleaned);
    if cleaned.is_empty() {
        return None;
    }

    let amount = Decimal::from_str(cleaned).ok()?;
    if amount.is_sign_negative() && !amount.is_zero() {
        return None;
    }
    Some(amount)
}
