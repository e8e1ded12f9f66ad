//! bankline-ledger: in-memory account ledger, event outbox and chat acknowledgements

pub mod ledger;
pub mod notify;

pub use ledger::{Account, Ledger, LedgerSettings, LedgerStats};
pub use notify::{Outbox, acknowledgement, format_baht};
