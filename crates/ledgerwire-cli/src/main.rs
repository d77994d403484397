//! ledgerwire CLI - encode, decode and frame ledger transactions for signing.

use clap::{Parser, Subcommand};

mod commands;
mod error;
mod input;
mod logging;
mod output;

use commands::{decode, encode, field, hash, signing};

#[derive(Parser)]
#[command(name = "ledgerwire")]
#[command(about = "Canonical binary codec for ledger transactions")]
struct Cli {
    /// Log codec activity to stderr
    #[arg(short, long, global = true)]
    verbose: bool,
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Encode a JSON document to hex
    Encode {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Decode hex to a JSON document
    Decode {
        /// Input hex file (or stdin if not provided)
        input: Option<String>,
        /// Print JSON on a single line
        #[arg(long)]
        compact: bool,
    },
    /// Show the bytes a single signer signs
    EncodeForSigning {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Show the bytes one of several signers signs
    EncodeForMultisigning {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Address of the signing account
        #[arg(long)]
        signer: String,
    },
    /// Show the bytes a payment channel claim signs
    EncodeForClaim {
        /// Input JSON file with Channel and Amount (or stdin if not provided)
        input: Option<String>,
    },
    /// Show the bytes signed to approve a batch of inner transactions
    EncodeForBatch {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
        /// Address of the signing account, for multi-signed batches
        #[arg(long)]
        signer: Option<String>,
    },
    /// Compute a transaction's id
    Hash {
        /// Input JSON file (or stdin if not provided)
        input: Option<String>,
    },
    /// Look up a field definition by name
    Field {
        /// Field name, e.g. Fee
        name: String,
        /// Output as JSON
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    let cli = Cli::parse();
    logging::init_logging(cli.verbose);

    let result = match cli.command {
        Commands::Encode { input } => encode::run(input),
        Commands::Decode { input, compact } => decode::run(input, compact),
        Commands::EncodeForSigning { input } => signing::single(input),
        Commands::EncodeForMultisigning { input, signer } => signing::multi(input, signer),
        Commands::EncodeForClaim { input } => signing::claim(input),
        Commands::EncodeForBatch { input, signer } => signing::batch(input, signer),
        Commands::Hash { input } => hash::run(input),
        Commands::Field { name, json } => field::run(name, json),
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
