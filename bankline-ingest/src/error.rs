//! Error types for message parsing and the collaborator seams.

use thiserror::Error;

use crate::rules::Bank;

/// Failures the parser reports for a single message or rule.
///
/// A message that matches no rule is not an error; `MessageParser::parse`
/// returns `Ok(None)` for it.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    /// A rule's header matched but its amount literal is not a non-negative number.
    #[error("malformed amount '{literal}' in {bank} message")]
    MalformedAmount { bank: Bank, literal: String },

    /// A detector cannot be used as a rule.
    #[error("invalid {bank} rule: {reason}")]
    InvalidRule { bank: Bank, reason: String },
}

/// Failures raised by persistence or notification collaborators.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SinkError {
    #[error("failed to record transaction for account {account}: {message}")]
    Record { account: String, message: String },

    #[error("failed to publish {event}: {message}")]
    Publish { event: String, message: String },
}

/// Anything that can go wrong while pushing one message through a pipeline.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum PipelineError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Sink(#[from] SinkError),
}
