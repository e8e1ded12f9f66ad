//! Inbound message handling: parse, record, publish.

use log::{debug, info};

use crate::error::PipelineError;
use crate::parser::MessageParser;
use crate::sink::{RecordedTransaction, TransactionEvent, TransactionPublisher, TransactionSink};

/// What happened to one inbound message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    Recorded(RecordedTransaction),
    /// Not a bank notification; nothing was recorded.
    Ignored,
}

/// Ties the parser to its persistence and notification collaborators.
#[derive(Debug)]
pub struct Pipeline<S: TransactionSink, P: TransactionPublisher> {
    parser: MessageParser,
    sink: S,
    publisher: P,
}

impl<S: TransactionSink, P: TransactionPublisher> Pipeline<S, P> {
    pub fn new(parser: MessageParser, sink: S, publisher: P) -> Self {
        Self {
            parser,
            sink,
            publisher,
        }
    }

    /// Handle one message.
    ///
    /// `MalformedAmount` and collaborator failures are returned to the caller,
    /// which is expected to log and move on to the next message.
    pub fn handle(&mut self, message: &str) -> Result<Outcome, PipelineError> {
        let Some(parsed) = self.parser.parse(message)? else {
            debug!("ignoring message without a known bank header");
            return Ok(Outcome::Ignored);
        };

        let recorded = self.sink.record(&parsed)?;
        info!(
            "recorded #{} {} {} for account {}",
            recorded.id,
            parsed.transaction_type,
            parsed.amount,
            parsed.account_number
        );

        self.publisher
            .publish(&TransactionEvent::new_transaction(recorded.clone()))?;

        Ok(Outcome::Recorded(recorded))
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn publisher(&self) -> &P {
        &self.publisher
    }

    pub fn publisher_mut(&mut self) -> &mut P {
        &mut self.publisher
    }

    pub fn into_parts(self) -> (S, P) {
        (self.sink, self.publisher)
    }
}
