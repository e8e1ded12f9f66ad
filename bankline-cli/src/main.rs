//! bankline CLI
//!
//! Logs go to stderr via env_logger at `warn` by default, which reports skipped
//! malformed notifications. `RUST_LOG=debug` also shows which rule claimed
//! each message.

use anyhow::{Context, Result};
use bankline_ingest::{MessageParser, Outcome, ParsedTransaction, Pipeline, parse_message};
use bankline_ledger::{Ledger, LedgerStats, Outbox, acknowledgement, format_baht};
use clap::{Parser, Subcommand};
use log::{debug, warn};
use serde_json::json;
use std::io::BufRead;
use std::path::PathBuf;

mod config;
mod state;

use config::{Config, OutputFormat};

const VERSION: &str = concat!(env!("CARGO_PKG_VERSION"), " (", env!("BANKLINE_BUILD_SHA"), ")");

#[derive(Parser, Debug)]
#[command(name = "bankline", version = VERSION, about = "Turn bank notification messages into transactions")]
struct Cli {
    /// Config file (default: ~/.bankline/config.toml)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Override the configured output format
    #[arg(long, global = true, value_enum)]
    format: Option<OutputFormat>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Parse a single notification and print the result
    Parse {
        /// Raw message text
        message: String,
    },

    /// Record a stream of notifications (one per line) into an in-memory ledger
    Ingest {
        /// Inbox file (defaults to stdin)
        #[arg(long)]
        file: Option<PathBuf>,
    },

    /// List the built-in rules in priority order
    Rules,

    /// Configuration file helpers
    Config {
        #[command(subcommand)]
        command: ConfigCommand,
    },
}

#[derive(Subcommand, Debug)]
enum ConfigCommand {
    /// Write the default config if none exists
    Init,
    /// Print the effective config
    Show,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let cli = Cli::parse();

    match cli.command {
        Command::Parse { message } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let format = cli.format.unwrap_or(cfg.output.format);
            run_parse(&message, format)?;
        }

        Command::Ingest { file } => {
            let cfg = config::load_config(cli.config.as_deref())?;
            let format = cli.format.unwrap_or(cfg.output.format);
            run_ingest(file, &cfg, format)?;
        }

        Command::Rules => {
            for (i, rule) in MessageParser::builtin().rules().iter().enumerate() {
                println!("{}. {:<9} {}", i + 1, rule.bank(), rule.pattern());
            }
        }

        Command::Config { command } => match command {
            ConfigCommand::Init => config::init_config(cli.config.as_deref())?,
            ConfigCommand::Show => {
                let cfg = config::load_config(cli.config.as_deref())?;
                print!("{}", toml::to_string_pretty(&cfg).context("serialize config")?);
            }
        },
    }

    Ok(())
}

fn run_parse(message: &str, format: OutputFormat) -> Result<()> {
    let parsed = parse_message(message).context("parsing message")?;

    match (parsed, format) {
        (None, OutputFormat::Json) => println!("null"),
        (None, OutputFormat::Text) => println!("no match"),
        (Some(t), OutputFormat::Json) => println!("{}", serde_json::to_string_pretty(&t)?),
        (Some(t), OutputFormat::Text) => print_transaction(&t),
    }
    Ok(())
}

fn print_transaction(t: &ParsedTransaction) {
    println!("account:     {}", t.account_number);
    println!("type:        {}", t.transaction_type);
    println!("amount:      {}", t.amount);
    println!("description: {}", t.description);
}

fn run_ingest(file: Option<PathBuf>, cfg: &Config, format: OutputFormat) -> Result<()> {
    let inbox = state::open_inbox(file.as_deref())?;
    let mut pipeline = Pipeline::new(
        MessageParser::default(),
        Ledger::new(cfg.ledger.clone()),
        Outbox::new(),
    );

    let mut skipped = 0usize;
    for (n, line) in inbox.lines().enumerate() {
        let line = line.with_context(|| format!("reading line {}", n + 1))?;
        let message = state::unescape_message(&line);
        if message.trim().is_empty() {
            continue;
        }

        match pipeline.handle(&message) {
            Ok(Outcome::Recorded(recorded)) => {
                for event in pipeline.publisher_mut().drain() {
                    if format == OutputFormat::Json {
                        println!("{}", serde_json::to_string(&event)?);
                    }
                }
                if cfg.output.acknowledge && format == OutputFormat::Text {
                    println!("{}\n", acknowledgement(&recorded));
                }
            }
            Ok(Outcome::Ignored) => debug!("line {}: not a bank notification", n + 1),
            Err(e) => {
                skipped += 1;
                warn!("line {}: skipped: {}", n + 1, e);
            }
        }
    }

    let ledger = pipeline.sink();
    let stats = ledger.stats();
    match format {
        OutputFormat::Json => {
            let accounts: Vec<_> = ledger.accounts().collect();
            let summary = json!({ "accounts": accounts, "stats": stats, "skipped": skipped });
            println!("{}", serde_json::to_string_pretty(&summary)?);
        }
        OutputFormat::Text => print_summary(ledger, &stats, skipped),
    }
    Ok(())
}

fn print_summary(ledger: &Ledger, stats: &LedgerStats, skipped: usize) {
    println!("## Accounts\n");
    for a in ledger.accounts() {
        println!(
            "- {} | {} | {} | balance=฿{}",
            a.account_number,
            a.account_name,
            a.bank_name,
            format_baht(a.balance)
        );
    }

    println!("\n## Stats\n");
    println!("income:       ฿{}", format_baht(stats.total_income));
    println!("expense:      ฿{}", format_baht(stats.total_expense));
    println!("net:          ฿{}", format_baht(stats.net_balance));
    println!("transactions: {}", stats.transaction_count);
    if skipped > 0 {
        println!("skipped:      {} (see warnings)", skipped);
    }
}
