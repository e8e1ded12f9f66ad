//! Per-bank notification rules.
//!
//! Each rule pairs a bank label with a detector that captures, in order:
//!   1. the account identifier inside parentheses (possibly masked)
//!   2. the direction token
//!   3. the amount literal: a `฿`-prefixed run, or a run starting with a digit.
//!      Bare punctuation after the direction token is not an amount.
//!
//! Example headers:
//!   Main Account(xxx-x-12345-x) withdraw ฿1,000.00 (Transfer Withdrawal)
//!   บัญชีออมทรัพย์(111-2-33333-4) ฝาก ฿2,500.50
//!   SCB Account(222-3-44444-5) CR ฿300

use regex::{Captures, Regex};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::ParseError;

/// Institution a rule targets. Diagnostic only, never consulted while matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Bank {
    /// Bangkok Bank
    Bbl,
    Kasikorn,
    /// Siam Commercial Bank
    Scb,
    /// Bank of Ayudhya (Krungsri)
    Bay,
    /// TMBThanachart
    Ttb,
    /// Any other bank using the `Account(..) credit|debit` shape
    Generic,
}

impl Bank {
    pub fn label(&self) -> &'static str {
        match self {
            Bank::Bbl => "BBL",
            Bank::Kasikorn => "KASIKORN",
            Bank::Scb => "SCB",
            Bank::Bay => "BAY",
            Bank::Ttb => "TTB",
            Bank::Generic => "GENERIC",
        }
    }
}

impl fmt::Display for Bank {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.label())
    }
}

/// Built-in rule table, highest priority first.
const BUILTIN_RULES: &[(Bank, &str)] = &[
    (
        Bank::Bbl,
        r"(?i)Main Account\(([^)]+)\)\s+(withdraw|deposit|transfer)\s*(฿[-0-9.,]+|[0-9][-0-9.,]*)",
    ),
    (
        Bank::Kasikorn,
        r"(?i)บัญชี[^(]*\(([^)]+)\)\s+(ฝาก|ถอน|โอน)\s*(฿[-0-9.,]+|[0-9][-0-9.,]*)",
    ),
    (
        Bank::Scb,
        r"(?i)SCB Account\s*\(([^)]+)\)\s+(CR|DR)\s*(฿[-0-9.,]+|[0-9][-0-9.,]*)",
    ),
    (
        Bank::Bay,
        r"(?i)BAY Account\s*\(([^)]+)\)\s+(รับเงิน|จ่ายเงิน)\s*(฿[-0-9.,]+|[0-9][-0-9.,]*)",
    ),
    (
        Bank::Ttb,
        r"(?i)TTB Account\s*\(([^)]+)\)\s+(IN|OUT)\s*(฿[-0-9.,]+|[0-9][-0-9.,]*)",
    ),
    (
        Bank::Generic,
        r"(?i)\bAccount\s*\(([^)]+)\)\s+(credit|debit)\s*(฿[-0-9.,]+|[0-9][-0-9.,]*)",
    ),
];

/// The three groups a detector pulls out of a message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Header<'a> {
    pub account: &'a str,
    pub direction: &'a str,
    pub amount: &'a str,
}

/// An immutable (detector, bank) pair.
#[derive(Debug, Clone)]
pub struct Rule {
    bank: Bank,
    detector: Regex,
}

impl Rule {
    /// Compile a rule, rejecting detectors that do not capture exactly three
    /// groups or that would match an empty message.
    pub fn new(bank: Bank, pattern: &str) -> Result<Self, ParseError> {
        let detector = Regex::new(pattern).map_err(|e| ParseError::InvalidRule {
            bank,
            reason: e.to_string(),
        })?;

        // captures_len counts the implicit whole-match group
        let groups = detector.captures_len() - 1;
        if groups != 3 {
            return Err(ParseError::InvalidRule {
                bank,
                reason: format!("expected 3 capture groups, found {groups}"),
            });
        }

        if detector.is_match("") {
            return Err(ParseError::InvalidRule {
                bank,
                reason: "detector matches the empty string".to_string(),
            });
        }

        Ok(Self { bank, detector })
    }

    pub fn bank(&self) -> Bank {
        self.bank
    }

    pub fn pattern(&self) -> &str {
        self.detector.as_str()
    }

    /// Structural match: all three groups must participate.
    pub fn detect<'a>(&self, message: &'a str) -> Option<Header<'a>> {
        let caps: Captures<'a> = self.detector.captures(message)?;
        Some(Header {
            account: caps.get(1)?.as_str(),
            direction: caps.get(2)?.as_str(),
            amount: caps.get(3)?.as_str().trim_start_matches('฿'),
        })
    }
}

/// Compile the built-in rule table in priority order.
pub fn default_rules() -> Result<Vec<Rule>, ParseError> {
    BUILTIN_RULES
        .iter()
        .map(|(bank, pattern)| Rule::new(*bank, pattern))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_rules_compile_in_priority_order() {
        let rules = default_rules().unwrap();
        let banks: Vec<Bank> = rules.iter().map(Rule::bank).collect();
        assert_eq!(
            banks,
            vec![
                Bank::Bbl,
                Bank::Kasikorn,
                Bank::Scb,
                Bank::Bay,
                Bank::Ttb,
                Bank::Generic
            ]
        );
    }

    #[test]
    fn test_no_builtin_rule_matches_empty_input() {
        for rule in default_rules().unwrap() {
            assert!(rule.detect("").is_none(), "{} matched empty input", rule.bank());
        }
    }

    #[test]
    fn test_rejects_wrong_group_count() {
        let err = Rule::new(Bank::Generic, r"Account\(([^)]+)\)").unwrap_err();
        assert_eq!(
            err,
            ParseError::InvalidRule {
                bank: Bank::Generic,
                reason: "expected 3 capture groups, found 1".to_string(),
            }
        );
    }

    #[test]
    fn test_rejects_detector_matching_empty_string() {
        let err = Rule::new(Bank::Generic, r"(a*)(b*)(c*)").unwrap_err();
        assert!(matches!(err, ParseError::InvalidRule { .. }));
        assert!(err.to_string().contains("empty string"));
    }

    #[test]
    fn test_rejects_bad_regex() {
        assert!(Rule::new(Bank::Ttb, r"TTB Account\((").is_err());
    }

    #[test]
    fn test_detect_extracts_three_groups() {
        let rules = default_rules().unwrap();
        let scb = &rules[2];
        let header = scb.detect("SCB Account (222-3-44444-5) DR ฿1,250.75").unwrap();
        assert_eq!(header.account, "222-3-44444-5");
        assert_eq!(header.direction, "DR");
        assert_eq!(header.amount, "1,250.75");
    }

    #[test]
    fn test_detect_strips_currency_sign() {
        let rules = default_rules().unwrap();
        let header = rules[4].detect("TTB Account(1) OUT ฿--").unwrap();
        assert_eq!(header.amount, "--");
        let header = rules[4].detect("TTB Account(1) OUT 45").unwrap();
        assert_eq!(header.amount, "45");
    }

    #[test]
    fn test_punctuation_after_direction_is_not_an_amount() {
        let rules = default_rules().unwrap();
        assert!(rules[2].detect("SCB Account(222-3-44444-5) CR, please call us").is_none());
        assert!(rules[0].detect("Main Account(savings) transfer - see below").is_none());
        assert!(rules[4].detect("TTB Account(1) OUT. bye").is_none());
    }

    #[test]
    fn test_bank_specific_sentinels_do_not_cross_match() {
        let rules = default_rules().unwrap();
        let bay = &rules[3];
        let ttb = &rules[4];
        assert!(bay.detect("TTB Account(123) IN ฿10").is_none());
        assert!(ttb.detect("BAY Account(123) รับเงิน ฿10").is_none());
    }
}
