use bankline_ingest::{MessageParser, Outcome, ParseError, Pipeline, PipelineError, TransactionType};
use bankline_ledger::{Ledger, Outbox, acknowledgement};
use rust_decimal::Decimal;
use std::str::FromStr;

const INBOX: &[&str] = &[
    "Main Account(xxx-x-12345-x) withdraw ฿1,000.00 (Transfer Withdrawal)",
    "Hello, how are you?",
    "บัญชีออมทรัพย์(111-2-33333-4) ฝาก ฿2,500.50",
    "SCB Account(222-3-44444-5) CR ฿--",
    "SCB Account(222-3-44444-5) CR ฿300",
    "บัญชีออมทรัพย์(111-2-33333-4) โอน ฿500\nรายการ: ค่าเช่าห้อง",
];

/// Drive a day's worth of chat messages through parser -> ledger -> outbox.
#[test]
fn test_inbox_replay() {
    let mut pipeline = Pipeline::new(MessageParser::default(), Ledger::default(), Outbox::new());

    let mut recorded = Vec::new();
    let mut ignored = 0;
    let mut malformed = 0;
    for msg in INBOX {
        match pipeline.handle(msg) {
            Ok(Outcome::Recorded(r)) => recorded.push(r),
            Ok(Outcome::Ignored) => ignored += 1,
            Err(PipelineError::Parse(ParseError::MalformedAmount { .. })) => malformed += 1,
            Err(e) => panic!("unexpected error: {e}"),
        }
    }

    assert_eq!(recorded.len(), 4);
    assert_eq!(ignored, 1);
    assert_eq!(malformed, 1);

    let (ledger, mut outbox) = pipeline.into_parts();
    assert_eq!(outbox.drain().len(), 4);

    let savings = ledger.account("111-2-33333-4").unwrap();
    assert_eq!(savings.balance, Decimal::from_str("2000.50").unwrap());

    let main = ledger.account("xxx-x-12345-x").unwrap();
    assert_eq!(main.balance, Decimal::from_str("-1000.00").unwrap());

    let stats = ledger.stats();
    assert_eq!(stats.transaction_count, 4);
    assert_eq!(stats.total_income, Decimal::from_str("2800.50").unwrap());
    assert_eq!(stats.total_expense, Decimal::from_str("1000.00").unwrap());

    let transfer = &ledger.transactions()[3];
    assert_eq!(transfer.transaction.transaction_type, TransactionType::Transfer);
    assert_eq!(transfer.transaction.description, "ค่าเช่าห้อง");
    assert!(acknowledgement(transfer).contains("฿500"));
}

#[test]
fn test_ids_are_sequential_per_ledger() {
    let mut pipeline = Pipeline::new(MessageParser::default(), Ledger::default(), Outbox::new());
    for amount in ["1", "2", "3"] {
        pipeline.handle(&format!("TTB Account(t) IN ฿{amount}")).unwrap();
    }
    let ids: Vec<u64> = pipeline.sink().transactions().iter().map(|t| t.id).collect();
    assert_eq!(ids, vec![1, 2, 3]);
    assert_eq!(pipeline.publisher().len(), 3);
}
