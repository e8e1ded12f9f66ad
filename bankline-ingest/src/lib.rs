//! bankline-ingest: bank notification parsing and the collaborator seams around it.

pub mod describe;
pub mod error;
pub mod normalize;
pub mod parser;
pub mod pipeline;
pub mod rules;
pub mod sink;
pub mod types;

pub use error::{ParseError, PipelineError, SinkError};
pub use parser::{MessageParser, parse_message};
pub use pipeline::{Outcome, Pipeline};
pub use rules::{Bank, Rule, default_rules};
pub use sink::{RecordedTransaction, TransactionEvent, TransactionPublisher, TransactionSink};
pub use types::{ParsedTransaction, TransactionType};
