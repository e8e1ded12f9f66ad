//! The bank-message parser: ordered rule table, first structural match wins.

use log::{debug, trace};
use std::sync::LazyLock;

use crate::describe::extract_description;
use crate::error::ParseError;
use crate::normalize::{normalize_transaction_type, parse_amount};
use crate::rules::{Rule, default_rules};
use crate::types::ParsedTransaction;

static DEFAULT_PARSER: LazyLock<MessageParser> = LazyLock::new(|| {
    MessageParser::new(default_rules().expect("built-in rules are valid"))
});

/// Stateless rule engine over an immutable rule table.
#[derive(Debug, Clone)]
pub struct MessageParser {
    rules: Vec<Rule>,
}

impl MessageParser {
    pub fn new(rules: Vec<Rule>) -> Self {
        Self { rules }
    }

    /// Parser over the built-in Thai bank rules, shared process-wide.
    pub fn builtin() -> &'static MessageParser {
        &DEFAULT_PARSER
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    /// Parse one notification.
    ///
    /// `Ok(None)` means no rule recognised the message. Once a rule's header
    /// matches, that rule owns the message: an unparseable amount is reported
    /// as `MalformedAmount` rather than handed to lower-priority rules.
    pub fn parse(&self, message: &str) -> Result<Option<ParsedTransaction>, ParseError> {
        for rule in &self.rules {
            let Some(header) = rule.detect(message) else {
                trace!("{} rule did not match", rule.bank());
                continue;
            };

            let amount = parse_amount(header.amount).ok_or_else(|| ParseError::MalformedAmount {
                bank: rule.bank(),
                literal: header.amount.to_string(),
            })?;

            let transaction_type = normalize_transaction_type(header.direction);
            debug!(
                "{} rule matched account {} ({} {})",
                rule.bank(),
                header.account,
                transaction_type,
                amount
            );

            return Ok(Some(ParsedTransaction {
                account_number: header.account.to_string(),
                transaction_type,
                amount,
                description: extract_description(message),
                raw_message: message.to_string(),
            }));
        }

        Ok(None)
    }
}

impl Default for MessageParser {
    fn default() -> Self {
        DEFAULT_PARSER.clone()
    }
}

/// Parse with the built-in rule table.
pub fn parse_message(message: &str) -> Result<Option<ParsedTransaction>, ParseError> {
    MessageParser::builtin().parse(message)
}
