use crate::config::{ClaimOutput, DistributionOutput};
use crate::error::{CliError, CliResult};
use airdrop_protocol::{format_hash, ClaimLeaf};
use airdrop_protocol_csvs::{
    read_entries_csv, read_proofs_csv, validate_proofs_against_entries, write_proofs_csv,
    ProofsCsvRow,
};
use airdrop_protocol_merkle::ClaimTree;
use std::fs;
use std::path::PathBuf;

/// Build the merkle tree for an entries CSV and export proofs
pub fn execute(entries_csv_in: PathBuf, output_dir: PathBuf) -> CliResult<()> {
    println!("🌳 Building claim tree from: {}", entries_csv_in.display());

    let entries = read_entries_csv(&entries_csv_in)?;
    println!("✅ Read {} entries", entries.len());

    let leaves: Vec<ClaimLeaf> = entries.iter().map(|row| row.to_leaf()).collect();
    let tree = ClaimTree::from_leaves(leaves)?;

    if !tree.duplicate_claimants().is_empty() {
        println!(
            "⚠️  {} claimant(s) appear more than once; each occurrence is a separate leaf",
            tree.duplicate_claimants().len()
        );
    }

    let total_amount = tree.total_amount().ok_or_else(|| {
        CliError::CommandExecution("Total distribution amount overflows uint256".to_string())
    })?;

    let rows = proof_rows(&tree)?;

    fs::create_dir_all(&output_dir)?;
    let proofs_csv_out = output_dir.join("proofs.csv");
    let distribution_json_out = output_dir.join("distribution.json");

    write_proofs_csv(&proofs_csv_out, &rows)?;

    // Read the file back so a bad export never leaves this command
    let written = read_proofs_csv(&proofs_csv_out)?;
    validate_proofs_against_entries(&entries, &written)?;
    println!("✅ Wrote proofs: {}", proofs_csv_out.display());

    let output = DistributionOutput {
        merkle_root: format_hash(&tree.root()),
        depth: tree.depth(),
        leaf_count: tree.leaf_count(),
        total_amount: total_amount.to_string(),
        claims: rows
            .iter()
            .map(|row| ClaimOutput {
                leaf_index: row.leaf_index,
                claimant: row.claimant.to_string(),
                amount: row.amount.to_string(),
                leaf: format_hash(&row.leaf),
                merkle_proof: row.proof.to_hex(),
            })
            .collect(),
    };
    fs::write(&distribution_json_out, serde_json::to_string_pretty(&output)?)?;
    println!("✅ Wrote distribution: {}", distribution_json_out.display());

    println!("\n🎉 Tree built!");
    println!("📊 Summary:");
    println!("  - Merkle root: {}", output.merkle_root);
    println!("  - Leaves: {}", output.leaf_count);
    println!("  - Depth: {}", output.depth);
    println!("  - Total amount: {}", output.total_amount);

    Ok(())
}

pub fn proof_rows(tree: &ClaimTree) -> CliResult<Vec<ProofsCsvRow>> {
    tree.leaves
        .iter()
        .enumerate()
        .map(|(leaf_index, leaf)| {
            Ok(ProofsCsvRow {
                leaf_index,
                claimant: leaf.claimant,
                amount: leaf.amount,
                leaf: tree.leaf_hash(leaf_index)?,
                proof: tree.proof_for_index(leaf_index)?,
            })
        })
        .collect()
}
