use super::{parse_proof_arg, parse_root_arg};
use crate::error::{CliError, CliResult};
use airdrop_protocol::{format_hash, ClaimLeaf, Hash};
use airdrop_protocol_csvs::read_proofs_csv;
use airdrop_protocol_merkle::{batch_verify_proofs, extract_root_from_proof, verify_claim_proof};
use std::path::PathBuf;

pub fn execute(
    root: String,
    claimant: Option<String>,
    amount: Option<String>,
    proof: String,
    proofs_csv: Option<PathBuf>,
) -> CliResult<()> {
    let root = parse_root_arg(&root)?;

    if let Some(proofs_csv) = proofs_csv {
        return verify_proofs_file(&root, proofs_csv);
    }

    let (claimant, amount) = match (claimant, amount) {
        (Some(claimant), Some(amount)) => (claimant, amount),
        _ => {
            return Err(CliError::InvalidConfig(
                "--claimant and --amount are required without --proofs-csv".to_string(),
            ))
        }
    };

    let leaf = ClaimLeaf::parse(&claimant, &amount)?;
    let proof = parse_proof_arg(&proof)?;

    println!("🔍 Verifying proof for {} ({})", leaf.claimant, leaf.amount);
    println!("   Leaf: {}", format_hash(&leaf.to_hash()));
    println!("   Proof length: {}", proof.len());

    if verify_claim_proof(&proof, &root, &leaf) {
        println!("✅ Proof is valid for root {}", format_hash(&root));
        Ok(())
    } else {
        let computed = extract_root_from_proof(&proof, &leaf);
        println!("❌ Proof is NOT valid");
        println!("   Expected root: {}", format_hash(&root));
        println!("   Computed root: {}", format_hash(&computed));
        Err(CliError::CommandExecution("proof verification failed".to_string()))
    }
}

fn verify_proofs_file(root: &Hash, proofs_csv: PathBuf) -> CliResult<()> {
    println!("🔍 Verifying proofs from: {}", proofs_csv.display());

    let rows = read_proofs_csv(&proofs_csv)?;
    let leaves: Vec<ClaimLeaf> = rows.iter().map(|row| row.to_leaf()).collect();
    let pairs: Vec<_> = rows
        .iter()
        .zip(&leaves)
        .map(|(row, leaf)| (&row.proof, leaf))
        .collect();

    let results = batch_verify_proofs(&pairs, root);
    let failed: Vec<usize> = results
        .iter()
        .enumerate()
        .filter(|(_, valid)| !**valid)
        .map(|(index, _)| index)
        .collect();

    if failed.is_empty() {
        println!("✅ All {} proofs are valid for root {}", rows.len(), format_hash(root));
        return Ok(());
    }

    println!("❌ {} of {} proofs failed:", failed.len(), rows.len());
    for index in failed.iter().take(20) {
        println!("   leaf {}: {} ({})", index, rows[*index].claimant, rows[*index].amount);
    }
    if failed.len() > 20 {
        println!("   ... and {} more", failed.len() - 20);
    }

    Err(CliError::CommandExecution(format!(
        "{} proofs failed verification",
        failed.len()
    )))
}
