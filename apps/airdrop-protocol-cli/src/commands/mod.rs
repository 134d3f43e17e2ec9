pub mod build_tree;
pub mod check_eligibility;
pub mod claim;
pub mod fund_round;
pub mod generate_fixtures;
pub mod init_round;
pub mod retire_round;
pub mod round_status;
pub mod set_max_claim_amount;
pub mod set_root;
pub mod simulate;
pub mod verify_proof;
pub mod withdraw;

use airdrop_protocol::{
    parse_address, parse_hash, Address, ClaimProof, ClaimVerifier, Hash, InMemoryLedger,
    SingleAdministrator,
};
use airdrop_protocol_csvs::PROOF_SEPARATOR;
use airdrop_protocol_db::{RoundDatabase, RoundInfo};
use std::path::Path;

use crate::error::{CliError, CliResult};

pub type DbVerifier = ClaimVerifier<SingleAdministrator, InMemoryLedger>;

/// A round loaded from the database, ready to run one operation
pub struct LoadedRound {
    pub db: RoundDatabase,
    pub info: RoundInfo,
    pub verifier: DbVerifier,
}

impl LoadedRound {
    pub fn open(db_path: &Path, round_id: &str) -> CliResult<Self> {
        let db = RoundDatabase::open(db_path)?;
        let info = db.read_round(round_id)?.ok_or_else(|| {
            CliError::InvalidConfig(format!(
                "Round '{}' not found in {}",
                round_id,
                db_path.display()
            ))
        })?;

        let ledger = db.load_ledger()?;
        let verifier = ClaimVerifier::from_state(
            info.distributor,
            SingleAdministrator(info.administrator),
            ledger,
            info.state.clone(),
        );

        Ok(Self { db, info, verifier })
    }

    pub fn round_id(&self) -> &str {
        &self.info.round_id
    }

    /// Persist the round state and ledger balances in one transaction
    pub fn save(&mut self) -> CliResult<()> {
        self.db.save_round_and_ledger(
            &self.info.round_id,
            self.verifier.state(),
            self.verifier.ledger(),
        )?;
        Ok(())
    }
}

pub fn parse_address_arg(label: &str, value: &str) -> CliResult<Address> {
    parse_address(value)
        .map_err(|e| CliError::InvalidConfig(format!("Invalid {} '{}': {}", label, value, e)))
}

pub fn parse_root_arg(value: &str) -> CliResult<Hash> {
    parse_hash(value).map_err(|e| CliError::InvalidHex(format!("root '{}': {}", value, e)))
}

/// Parse proof hashes joined by ':'. An empty string is the empty proof.
pub fn parse_proof_arg(value: &str) -> CliResult<ClaimProof> {
    let elements: Vec<&str> = value
        .split(PROOF_SEPARATOR)
        .map(str::trim)
        .filter(|element| !element.is_empty())
        .collect();
    ClaimProof::from_hex(&elements).map_err(|e| CliError::InvalidHex(e.to_string()))
}

/// Render an RFC 3339 timestamp from the database for display
pub fn format_timestamp(timestamp: &str) -> String {
    chrono::DateTime::parse_from_rfc3339(timestamp)
        .map(|dt| {
            dt.with_timezone(&chrono::Utc)
                .format("%Y-%m-%d %H:%M:%S UTC")
                .to_string()
        })
        .unwrap_or_else(|_| "Invalid timestamp".to_string())
}

pub fn status_icon(claimed: bool) -> &'static str {
    if claimed {
        "✅ CLAIMED"
    } else {
        "⏳ CLAIMABLE"
    }
}
