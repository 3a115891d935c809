//! CLI tool for evalue wire buffers.
//!
//! Provides commands for:
//! - encode: Build a value and print its encoding
//! - explain: Decode a buffer and describe the value(s) in it

mod commands;

use clap::{ArgAction, Parser, Subcommand};
use commands::{encode, explain};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "evalue")]
#[command(about = "Encode and inspect runtime value buffers", long_about = None)]
#[command(version)]
struct Cli {
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a value
    Encode(encode::EncodeArgs),
    /// Decode a value buffer
    Explain(explain::ExplainArgs),
}

fn init_tracing(verbose: u8) {
    let default = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Encode(args) => encode::run(args),
        Commands::Explain(args) => explain::run(args),
    };

    if let Err(e) = result {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
