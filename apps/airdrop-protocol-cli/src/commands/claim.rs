use super::{parse_address_arg, parse_proof_arg, LoadedRound};
use crate::error::{CliError, CliResult};
use airdrop_protocol::{format_hash, parse_amount};
use std::path::PathBuf;

/// Claim an allocation, defaulting amount and proof to the stored distribution
pub fn execute(
    db_path: PathBuf,
    round_id: String,
    claimant: String,
    amount: Option<String>,
    proof: Option<String>,
) -> CliResult<()> {
    let claimant = parse_address_arg("claimant", &claimant)?;
    let mut round = LoadedRound::open(&db_path, &round_id)?;

    let stored = round
        .db
        .read_distribution(&round_id)?
        .into_iter()
        .find(|entry| entry.leaf.claimant == claimant);

    let amount = match (amount, &stored) {
        (Some(amount), _) => parse_amount(&amount)?,
        (None, Some(entry)) => entry.leaf.amount,
        (None, None) => {
            return Err(CliError::InvalidConfig(format!(
                "{} is not in the stored distribution; pass --amount and --proof",
                claimant
            )))
        }
    };
    let proof = match (proof, stored) {
        (Some(proof), _) => parse_proof_arg(&proof)?,
        (None, Some(entry)) => entry.proof,
        (None, None) => {
            return Err(CliError::InvalidConfig(format!(
                "{} is not in the stored distribution; pass --proof",
                claimant
            )))
        }
    };

    println!("🎯 Claiming {} for {} in round '{}'", amount, claimant, round_id);

    let prepared = round.verifier.prepare_claim(&claimant, amount)?;
    let root = prepared.root();
    let verified = prepared.verify(&proof)?;

    let key = round.verifier.state().claims.key_for(&root, &claimant);

    // The ledger lives in the same database, so the payout is only real once
    // it is saved. Claim record and balances go to disk in one transaction.
    round.verifier.commit_claim(verified)?;
    round.db.save_claim_and_ledger(
        &round_id,
        round.verifier.state(),
        &key,
        round.verifier.ledger(),
    )?;

    let claimed_at = round.db.claimed_at(&round_id, &key)?;

    println!("✅ Claimed {} tokens", amount);
    println!("   Root: {}", format_hash(&root));
    if let Some(claimed_at) = claimed_at {
        println!("   Claimed at: {}", claimed_at);
    }
    println!("   Remaining round balance: {}", round.verifier.held_balance());
    Ok(())
}
