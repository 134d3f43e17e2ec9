use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod commands;
mod config;
mod error;

use error::CliResult;

#[derive(Parser)]
#[command(name = "airdrop-protocol")]
#[command(about = "Airdrop Protocol CLI - Merkle-proof token distribution rounds")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate deterministic entries for testing and benchmarking
    GenerateFixtures {
        /// Number of claimants to generate
        #[arg(short, long)]
        count: u64,

        /// Seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Output entries CSV
        #[arg(short, long, default_value = "entries.csv")]
        output: PathBuf,

        /// Amount distribution: uniform, realistic or exponential
        #[arg(short, long, default_value = "uniform")]
        distribution: String,

        /// Minimum amount per claimant
        #[arg(long, default_value = "1")]
        min_amount: u64,

        /// Maximum amount per claimant
        #[arg(long, default_value = "1000")]
        max_amount: u64,
    },

    /// Build the merkle tree for an entries CSV and export proofs
    BuildTree {
        /// Entries CSV (claimant,amount)
        #[arg(short, long)]
        entries: PathBuf,

        /// Output directory for proofs.csv and distribution.json
        #[arg(short, long, default_value = "output")]
        output_dir: PathBuf,
    },

    /// Verify a proof, or every row of a proofs CSV, against a root
    VerifyProof {
        /// Merkle root (0x-prefixed hex)
        #[arg(short, long)]
        root: String,

        /// Claimant address
        #[arg(long, required_unless_present = "proofs_csv")]
        claimant: Option<String>,

        /// Claim amount (decimal)
        #[arg(long, required_unless_present = "proofs_csv")]
        amount: Option<String>,

        /// Proof hashes joined by ':' (empty for a single-leaf tree)
        #[arg(long, default_value = "")]
        proof: String,

        /// Verify every row of this proofs CSV instead
        #[arg(long, conflicts_with_all = ["claimant", "amount"])]
        proofs_csv: Option<PathBuf>,
    },

    /// Create a round from a YAML configuration
    InitRound {
        /// Round configuration file
        #[arg(short, long)]
        config: PathBuf,

        /// Round database (created if missing)
        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Mint tokens into a round's distributor account
    FundRound {
        round_id: String,

        /// Amount to mint (decimal)
        amount: String,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Publish a merkle root (defaults to the root of the stored distribution)
    SetRoot {
        round_id: String,

        /// Administrator address
        #[arg(long)]
        caller: String,

        /// Root to publish instead of the stored distribution's root
        #[arg(long)]
        root: Option<String>,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Change the per-claim ceiling
    SetMaxClaimAmount {
        round_id: String,

        /// New ceiling (decimal)
        amount: String,

        /// Administrator address
        #[arg(long)]
        caller: String,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Claim an allocation
    Claim {
        round_id: String,

        /// Claimant address
        claimant: String,

        /// Amount to claim (defaults to the stored distribution entry)
        #[arg(long)]
        amount: Option<String>,

        /// Proof hashes joined by ':' (defaults to the stored distribution entry)
        #[arg(long)]
        proof: Option<String>,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Withdraw the entire held balance to the administrator
    Withdraw {
        round_id: String,

        /// Administrator address
        #[arg(long)]
        caller: String,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Retire a round and sweep its remaining balance
    RetireRound {
        round_id: String,

        /// Administrator address
        #[arg(long)]
        caller: String,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Show one round in detail, or list every round
    RoundStatus {
        round_id: Option<String>,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Check which rounds a claimant is eligible for
    CheckEligibility {
        /// Claimant address
        claimant: String,

        #[arg(long, default_value = "rounds.db")]
        db: PathBuf,
    },

    /// Run a concurrent in-memory claim simulation through the round service
    Simulate {
        /// Number of claimants
        #[arg(short, long, default_value = "1000")]
        count: u64,

        /// Seed for deterministic generation
        #[arg(short, long, default_value = "42")]
        seed: u64,

        /// Maximum claims in flight at once
        #[arg(short, long, default_value = "16")]
        parallel: usize,

        /// Claim key scheme: global or per_root
        #[arg(long, default_value = "global")]
        scheme: String,

        /// Print every failed claim
        #[arg(short, long)]
        verbose: bool,
    },
}

fn main() -> CliResult<()> {
    let cli = Cli::parse();

    match cli.command {
        Commands::GenerateFixtures {
            count,
            seed,
            output,
            distribution,
            min_amount,
            max_amount,
        } => commands::generate_fixtures::execute(
            count,
            seed,
            output,
            distribution,
            min_amount,
            max_amount,
        ),

        Commands::BuildTree {
            entries,
            output_dir,
        } => commands::build_tree::execute(entries, output_dir),

        Commands::VerifyProof {
            root,
            claimant,
            amount,
            proof,
            proofs_csv,
        } => commands::verify_proof::execute(root, claimant, amount, proof, proofs_csv),

        Commands::InitRound { config, db } => commands::init_round::execute(config, db),

        Commands::FundRound {
            round_id,
            amount,
            db,
        } => commands::fund_round::execute(db, round_id, amount),

        Commands::SetRoot {
            round_id,
            caller,
            root,
            db,
        } => commands::set_root::execute(db, round_id, caller, root),

        Commands::SetMaxClaimAmount {
            round_id,
            amount,
            caller,
            db,
        } => commands::set_max_claim_amount::execute(db, round_id, caller, amount),

        Commands::Claim {
            round_id,
            claimant,
            amount,
            proof,
            db,
        } => commands::claim::execute(db, round_id, claimant, amount, proof),

        Commands::Withdraw {
            round_id,
            caller,
            db,
        } => commands::withdraw::execute(db, round_id, caller),

        Commands::RetireRound {
            round_id,
            caller,
            db,
        } => commands::retire_round::execute(db, round_id, caller),

        Commands::RoundStatus { round_id, db } => commands::round_status::execute(db, round_id),

        Commands::CheckEligibility { claimant, db } => {
            commands::check_eligibility::execute(db, claimant)
        }

        Commands::Simulate {
            count,
            seed,
            parallel,
            scheme,
            verbose,
        } => commands::simulate::execute(count, seed, parallel, scheme, verbose),
    }
}
