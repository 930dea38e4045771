//! SheetLog CLI Client
//!
//! Command-line interface for interacting with SheetLog.

use clap::{Parser, Subcommand};
use serde_json::Value;
use sheetlog::protocol::{Entry, Response};
use sheetlog::Client;

/// SheetLog CLI
#[derive(Parser, Debug)]
#[command(name = "sheetlog-cli")]
#[command(about = "CLI for the SheetLog service")]
struct Args {
    /// Server address
    #[arg(short, long, default_value = "127.0.0.1:5555")]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Append an entry
    Create {
        /// Entry timestamp (its identifier)
        timestamp: String,

        /// Amount (number if it parses as one)
        amount: String,

        /// Unit of the amount
        unit: String,
    },

    /// List every entry
    Read,

    /// Change amount and unit of an entry
    Update {
        /// Timestamp of the entry to change
        timestamp: String,

        /// New amount
        amount: String,

        /// New unit
        unit: String,
    },

    /// Delete an entry
    Delete {
        /// Timestamp of the entry to delete
        timestamp: String,
    },

    /// Delete every entry
    Reset,

    /// Remove the most recently appended row
    Undo,
}

fn main() {
    let args = Args::parse();

    let mut client = match Client::connect(&args.server) {
        Ok(client) => client,
        Err(e) => {
            eprintln!("Failed to connect to {}: {}", args.server, e);
            std::process::exit(1);
        }
    };

    let result = match args.command {
        Commands::Create {
            timestamp,
            amount,
            unit,
        } => client.create(Entry::new(timestamp, parse_amount(&amount), unit)),
        Commands::Read => client.read(),
        Commands::Update {
            timestamp,
            amount,
            unit,
        } => client.update(Entry::new(timestamp, parse_amount(&amount), unit)),
        Commands::Delete { timestamp } => client.delete(timestamp),
        Commands::Reset => client.reset(),
        Commands::Undo => client.undo(),
    };

    match result {
        Ok(response) => print_response(&response),
        Err(e) => {
            eprintln!("Request failed: {}", e);
            std::process::exit(1);
        }
    }
}

/// Numbers stay numbers, anything else is sent as text
fn parse_amount(raw: &str) -> Value {
    match serde_json::from_str::<Value>(raw) {
        Ok(number @ Value::Number(_)) => number,
        _ => Value::String(raw.to_string()),
    }
}

fn print_response(response: &Response) {
    match serde_json::to_string_pretty(response) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("Failed to render response: {}", e),
    }
    if !response.is_success() {
        std::process::exit(2);
    }
}
