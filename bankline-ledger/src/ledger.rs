//! In-memory persistence sink: accounts keyed by account number, plus the
//! append-only list of recorded transactions.

use bankline_ingest::{
    ParsedTransaction, RecordedTransaction, SinkError, TransactionSink, TransactionType,
};
use chrono::{DateTime, Utc};
use log::info;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Defaults applied to accounts first seen in a notification.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerSettings {
    pub default_bank_name: String,
    /// New accounts are named "<prefix> <account number>".
    pub account_name_prefix: String,
}

impl Default for LedgerSettings {
    fn default() -> Self {
        Self {
            default_bank_name: "Unknown Bank".to_string(),
            account_name_prefix: "Account".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Account {
    pub account_number: String,
    pub account_name: String,
    pub bank_name: String,
    pub balance: Decimal,
    pub is_active: bool,
    pub created_at: DateTime<Utc>,
}

impl Account {
    /// Deposits add; withdrawals and transfers subtract.
    fn apply(&mut self, kind: TransactionType, amount: Decimal) -> Result<Decimal, String> {
        let next = if kind.is_incoming() {
            self.balance.checked_add(amount)
        } else {
            self.balance.checked_sub(amount)
        };
        self.balance = next.ok_or_else(|| format!("balance overflow applying {kind} {amount}"))?;
        Ok(self.balance)
    }
}

/// Totals over every recorded transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LedgerStats {
    /// Sum of deposits.
    pub total_income: Decimal,
    /// Sum of withdrawals. Transfers count toward neither side.
    pub total_expense: Decimal,
    pub net_balance: Decimal,
    pub transaction_count: usize,
}

#[derive(Debug, Clone, Default)]
pub struct Ledger {
    settings: LedgerSettings,
    accounts: BTreeMap<String, Account>,
    transactions: Vec<RecordedTransaction>,
}

impl Ledger {
    pub fn new(settings: LedgerSettings) -> Self {
        Self {
            settings,
            ..Self::default()
        }
    }

    pub fn accounts(&self) -> impl Iterator<Item = &Account> {
        self.accounts.values()
    }

    pub fn account(&self, account_number: &str) -> Option<&Account> {
        self.accounts.get(account_number)
    }

    pub fn transactions(&self) -> &[RecordedTransaction] {
        &self.transactions
    }

    pub fn stats(&self) -> LedgerStats {
        let mut stats = LedgerStats {
            transaction_count: self.transactions.len(),
            ..LedgerStats::default()
        };

        for t in &self.transactions {
            match t.transaction.transaction_type {
                TransactionType::Deposit => stats.total_income += t.transaction.amount,
                TransactionType::Withdraw => stats.total_expense += t.transaction.amount,
                TransactionType::Transfer => {}
            }
        }
        stats.net_balance = stats.total_income - stats.total_expense;
        stats
    }

    fn upsert_account(&mut self, account_number: &str, now: DateTime<Utc>) -> &mut Account {
        let settings = &self.settings;
        self.accounts
            .entry(account_number.to_string())
            .or_insert_with(|| {
                info!("creating account {account_number}");
                Account {
                    account_number: account_number.to_string(),
                    account_name: format!("{} {}", settings.account_name_prefix, account_number),
                    bank_name: settings.default_bank_name.clone(),
                    balance: Decimal::ZERO,
                    is_active: true,
                    created_at: now,
                }
            })
    }
}

impl TransactionSink for Ledger {
    fn record(&mut self, transaction: &ParsedTransaction) -> Result<RecordedTransaction, SinkError> {
        let now = Utc::now();
        let id = self.transactions.len() as u64 + 1;

        let account = self.upsert_account(&transaction.account_number, now);
        let balance_after = account
            .apply(transaction.transaction_type, transaction.amount)
            .map_err(|message| SinkError::Record {
                account: transaction.account_number.clone(),
                message,
            })?;

        let recorded = RecordedTransaction {
            id,
            transaction: transaction.clone(),
            recorded_at: now,
            balance_after,
        };
        self.transactions.push(recorded.clone());
        Ok(recorded)
    }
}
