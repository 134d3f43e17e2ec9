use super::build_tree::proof_rows;
use super::parse_address_arg;
use crate::config::RoundConfig;
use crate::error::CliResult;
use airdrop_protocol::{format_hash, parse_amount, ClaimLeaf, ClaimVerifier, SingleAdministrator};
use airdrop_protocol_csvs::read_entries_csv;
use airdrop_protocol_db::{DistributionEntry, RoundDatabase};
use airdrop_protocol_merkle::ClaimTree;
use std::path::PathBuf;

/// Create a round from a YAML configuration
pub fn execute(config_path: PathBuf, db_path: PathBuf) -> CliResult<()> {
    println!("📋 Loading round config: {}", config_path.display());
    let config = RoundConfig::from_file(&config_path)?;

    let distributor = parse_address_arg("distributor", &config.distributor)?;
    let administrator = parse_address_arg("administrator", &config.administrator)?;
    let max_claim_amount = parse_amount(&config.max_claim_amount)?;

    let mut db = if db_path.exists() {
        RoundDatabase::open(&db_path)?
    } else {
        println!("🗄️  Creating database: {}", db_path.display());
        RoundDatabase::create_file(&db_path, false)?
    };

    let mut ledger = db.load_ledger()?;
    if let Some(funding) = &config.initial_funding {
        let funding = parse_amount(funding)?;
        ledger.mint(&distributor, funding)?;
        println!("💰 Minted {} to distributor {}", funding, distributor);
    }

    let tree = match config.entries_path(&config_path) {
        Some(entries_path) => {
            println!("🌳 Building claim tree from: {}", entries_path.display());
            let rows = read_entries_csv(&entries_path)?;
            let leaves: Vec<ClaimLeaf> = rows.iter().map(|row| row.to_leaf()).collect();
            Some(ClaimTree::from_leaves(leaves)?)
        }
        None => None,
    };

    let mut verifier = ClaimVerifier::new(
        distributor,
        SingleAdministrator(administrator),
        ledger,
        max_claim_amount,
        config.claim_key_scheme,
    );

    if config.publish_root {
        if let Some(tree) = &tree {
            verifier.set_root(&administrator, tree.root())?;
        }
    }

    db.insert_round(
        &config.round_id,
        &distributor,
        &administrator,
        verifier.state(),
    )?;

    if let Some(tree) = &tree {
        let entries: Vec<DistributionEntry> = proof_rows(tree)?
            .into_iter()
            .map(|row| DistributionEntry {
                leaf_index: row.leaf_index,
                leaf: row.to_leaf(),
                proof: row.proof,
            })
            .collect();
        db.store_distribution(&config.round_id, &entries)?;
        println!("✅ Stored distribution of {} leaves", entries.len());
    }

    db.save_ledger(verifier.ledger())?;

    println!("\n🎉 Round '{}' created!", config.round_id);
    println!("📊 Summary:");
    println!("  - Distributor: {}", distributor);
    println!("  - Administrator: {}", administrator);
    println!("  - Max claim amount: {}", max_claim_amount);
    println!("  - Claim key scheme: {}", config.claim_key_scheme);
    println!("  - Status: {}", verifier.status());
    if let Some(root) = verifier.current_root() {
        println!("  - Merkle root: {}", format_hash(&root));
    } else if let Some(tree) = &tree {
        println!(
            "  - Merkle root (not yet published): {}",
            format_hash(&tree.root())
        );
    }
    println!("  - Held balance: {}", verifier.held_balance());

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{claim, fund_round, retire_round, round_status, LoadedRound};
    use airdrop_protocol::test_utils::sample_entries;
    use airdrop_protocol::{RoundStatus, TokenLedger, U256};
    use airdrop_protocol_csvs::{write_entries_csv, EntriesCsvRow};
    use std::fs;
    use tempfile::TempDir;

    const ROUND_ID: &str = "spring-drop";
    const ADMIN: &str = "0x00000000000000000000000000000000000000a1";
    const DISTRIBUTOR: &str = "0x00000000000000000000000000000000000000d1";

    fn write_round(dir: &TempDir, publish_root: bool) -> (PathBuf, PathBuf) {
        let rows: Vec<EntriesCsvRow> = sample_entries().iter().map(EntriesCsvRow::from).collect();
        write_entries_csv(dir.path().join("entries.csv"), &rows).unwrap();

        let config_path = dir.path().join("round.yaml");
        fs::write(
            &config_path,
            format!(
                "round_id: {}\ndistributor: \"{}\"\nadministrator: \"{}\"\nmax_claim_amount: \"1000\"\nentries_file: entries.csv\ninitial_funding: \"5000\"\npublish_root: {}\n",
                ROUND_ID, DISTRIBUTOR, ADMIN, publish_root
            ),
        )
        .unwrap();

        let db_path = dir.path().join("rounds.db");
        execute(config_path.clone(), db_path.clone()).unwrap();
        (config_path, db_path)
    }

    /// Full round lifecycle through the command layer.
    ///
    /// **Test flow:**
    /// 1. Create a funded round with a published root from YAML
    /// 2. Claim using the stored distribution entry
    /// 3. A second claim fails with AlreadyClaimed
    /// 4. Retire the round; the remainder goes to the administrator
    #[test]
    fn test_round_lifecycle() {
        let dir = TempDir::new().unwrap();
        let (_, db_path) = write_round(&dir, true);
        let claimant = sample_entries()[1].claimant.to_string();

        let round = LoadedRound::open(&db_path, ROUND_ID).unwrap();
        assert_eq!(round.info.state.status, RoundStatus::RootActive);
        assert_eq!(round.verifier.held_balance(), U256::from(5000u64));
        drop(round);

        claim::execute(db_path.clone(), ROUND_ID.to_string(), claimant.clone(), None, None)
            .unwrap();
        assert!(
            claim::execute(db_path.clone(), ROUND_ID.to_string(), claimant, None, None).is_err()
        );

        let round = LoadedRound::open(&db_path, ROUND_ID).unwrap();
        assert_eq!(round.verifier.held_balance(), U256::from(4800u64));
        assert!(round.verifier.has_claimed(&sample_entries()[1].claimant));
        drop(round);

        round_status::execute(db_path.clone(), Some(ROUND_ID.to_string())).unwrap();

        retire_round::execute(db_path.clone(), ROUND_ID.to_string(), ADMIN.to_string()).unwrap();
        let round = LoadedRound::open(&db_path, ROUND_ID).unwrap();
        assert_eq!(round.info.state.status, RoundStatus::Retired);
        assert_eq!(round.verifier.held_balance(), U256::ZERO);
        let admin = parse_address_arg("admin", ADMIN).unwrap();
        assert_eq!(round.verifier.ledger().balance_of(&admin), U256::from(4800u64));
    }

    #[test]
    fn test_unpublished_round_rejects_claims() {
        let dir = TempDir::new().unwrap();
        let (_, db_path) = write_round(&dir, false);

        let round = LoadedRound::open(&db_path, ROUND_ID).unwrap();
        assert_eq!(round.info.state.status, RoundStatus::NoRootPublished);
        drop(round);

        fund_round::execute(db_path.clone(), ROUND_ID.to_string(), "100".to_string()).unwrap();
        let claimant = sample_entries()[0].claimant.to_string();
        assert!(claim::execute(db_path, ROUND_ID.to_string(), claimant, None, None).is_err());
    }

    #[test]
    fn test_duplicate_round_rejected() {
        let dir = TempDir::new().unwrap();
        let (config_path, db_path) = write_round(&dir, true);
        assert!(execute(config_path, db_path).is_err());
    }
}
