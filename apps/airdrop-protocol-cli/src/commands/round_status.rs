use super::{format_timestamp, LoadedRound};
use crate::error::CliResult;
use airdrop_protocol::{format_hash, U256};
use airdrop_protocol_db::RoundDatabase;
use std::path::PathBuf;

/// Show one round in detail, or list every round in the database
pub fn execute(db_path: PathBuf, round_id: Option<String>) -> CliResult<()> {
    match round_id {
        Some(round_id) => show_round(db_path, &round_id),
        None => list_rounds(db_path),
    }
}

fn list_rounds(db_path: PathBuf) -> CliResult<()> {
    let db = RoundDatabase::open(&db_path)?;
    let rounds = db.list_rounds()?;

    if rounds.is_empty() {
        println!("No rounds in {}", db_path.display());
        return Ok(());
    }

    println!("📊 {} round(s) in {}:\n", rounds.len(), db_path.display());
    for info in rounds {
        println!(
            "  {}  {}  claims: {}  root: {}",
            info.round_id,
            info.state.status,
            info.state.claims.len(),
            info.state
                .merkle_root
                .as_ref()
                .map(format_hash)
                .unwrap_or_else(|| "-".to_string())
        );
    }
    Ok(())
}

fn show_round(db_path: PathBuf, round_id: &str) -> CliResult<()> {
    let round = LoadedRound::open(&db_path, round_id)?;
    let info = &round.info;
    let state = round.verifier.state();

    println!("📊 Round: {}", info.round_id);
    println!("   Status: {}", state.status);
    println!(
        "   Merkle root: {}",
        state
            .merkle_root
            .as_ref()
            .map(format_hash)
            .unwrap_or_else(|| "(none published)".to_string())
    );
    println!("   Max claim amount: {}", state.max_claim_amount);
    println!("   Claim key scheme: {}", state.claims.scheme());
    println!("   Distributor: {}", info.distributor);
    println!("   Administrator: {}", info.administrator);
    println!("   Held balance: {}", round.verifier.held_balance());
    println!("   Created: {}", format_timestamp(&info.created_at));
    println!("   Updated: {}", format_timestamp(&info.updated_at));

    let distribution = round.db.read_distribution(round_id)?;
    if distribution.is_empty() {
        println!("   Claim records: {}", state.claims.len());
        return Ok(());
    }

    let mut claimed_count = 0usize;
    let mut claimed_amount = U256::ZERO;
    let mut total_amount = U256::ZERO;
    for entry in &distribution {
        total_amount = total_amount.saturating_add(entry.leaf.amount);
        if state.has_claimed(&entry.leaf.claimant) {
            claimed_count += 1;
            claimed_amount = claimed_amount.saturating_add(entry.leaf.amount);
        }
    }

    println!("\n📋 Distribution:");
    println!("   Leaves: {}", distribution.len());
    println!("   Claimed: {} / {}", claimed_count, distribution.len());
    println!("   Amount claimed: {} / {}", claimed_amount, total_amount);
    println!("   Claim records: {}", state.claims.len());
    Ok(())
}
