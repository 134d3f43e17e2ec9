use super::{format_timestamp, parse_address_arg, status_icon};
use crate::error::CliResult;
use airdrop_protocol::{format_hash, RoundStatus, U256};
use airdrop_protocol_db::RoundDatabase;
use std::path::PathBuf;

pub fn execute(db_path: PathBuf, claimant: String) -> CliResult<()> {
    let claimant = parse_address_arg("claimant", &claimant)?;
    println!("🔍 Checking eligibility for claimant: {}", claimant);

    let db = RoundDatabase::open(&db_path)?;
    let eligibility = db.read_claimant_eligibility(&claimant)?;

    if eligibility.is_empty() {
        println!("❌ No eligibility found for claimant {}", claimant);
        println!("   This claimant is not part of any stored distribution.");
        return Ok(());
    }

    println!("✅ Found eligibility in {} round(s):\n", eligibility.len());

    let mut total_claimable = U256::ZERO;
    let mut total_claimed = U256::ZERO;
    let mut stale_proofs = 0;

    for (i, entry) in eligibility.iter().enumerate() {
        println!("{}. Round: {} (leaf {})", i + 1, entry.round_id, entry.leaf_index);
        println!("   Amount: {} tokens", entry.amount);
        println!("   Round status: {}", entry.status);
        println!("   Status: {}", status_icon(entry.db_claimed));

        if let Some(claimed_at) = &entry.db_claimed_at {
            println!("   Claimed at: {}", format_timestamp(claimed_at));
        }

        if entry.db_claimed {
            total_claimed = total_claimed.saturating_add(entry.amount);
        } else if entry.status == RoundStatus::RootActive && entry.proof_matches_root {
            total_claimable = total_claimable.saturating_add(entry.amount);
            println!("   Merkle proof ({} hashes):", entry.merkle_proof.len());
            for hash in entry.merkle_proof.as_slice() {
                println!("     {}", format_hash(hash));
            }
        }

        if !entry.proof_matches_root {
            stale_proofs += 1;
            match entry.round_root {
                Some(root) => println!(
                    "   ⚠️  Stored proof does not match the published root {}",
                    format_hash(&root)
                ),
                None => println!("   ⚠️  No root has been published for this round"),
            }
        }
        println!();
    }

    println!("📊 Summary:");
    println!("   Claimable now: {} tokens", total_claimable);
    println!("   Already claimed: {} tokens", total_claimed);
    if stale_proofs > 0 {
        println!("   ⚠️  {} entr(ies) cannot be claimed with the stored proof", stale_proofs);
    }
    Ok(())
}
