use super::{parse_address_arg, parse_root_arg, LoadedRound};
use crate::error::{CliError, CliResult};
use airdrop_protocol::{format_hash, ClaimLeaf};
use airdrop_protocol_merkle::ClaimTree;
use std::path::PathBuf;

/// Publish a merkle root. Without `--root`, the stored distribution's root is used.
pub fn execute(
    db_path: PathBuf,
    round_id: String,
    caller: String,
    root: Option<String>,
) -> CliResult<()> {
    let caller = parse_address_arg("caller", &caller)?;
    let mut round = LoadedRound::open(&db_path, &round_id)?;

    let root = match root {
        Some(root) => parse_root_arg(&root)?,
        None => {
            let distribution = round.db.read_distribution(&round_id)?;
            if distribution.is_empty() {
                return Err(CliError::InvalidConfig(format!(
                    "Round '{}' has no stored distribution; pass --root",
                    round_id
                )));
            }
            let leaves: Vec<ClaimLeaf> = distribution.into_iter().map(|entry| entry.leaf).collect();
            ClaimTree::from_leaves(leaves)?.root()
        }
    };

    let previous = round.verifier.current_root();
    round.verifier.set_root(&caller, root)?;
    round.save()?;

    println!("✅ Published root {} for round '{}'", format_hash(&root), round_id);
    if let Some(previous) = previous {
        println!("   Replaced: {}", format_hash(&previous));
    }
    Ok(())
}
