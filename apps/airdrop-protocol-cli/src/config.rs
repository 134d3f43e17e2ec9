use airdrop_protocol::ClaimKeyScheme;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::{CliError, CliResult};

/// Round configuration file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RoundConfig {
    /// Unique round identifier (database key)
    pub round_id: String,

    /// Account the round pays claims out of
    pub distributor: String,

    /// Account allowed to publish roots, withdraw and retire the round
    pub administrator: String,

    /// Per-claim ceiling, decimal base units
    pub max_claim_amount: String,

    #[serde(default)]
    pub claim_key_scheme: ClaimKeyScheme,

    /// Optional entries CSV (`claimant,amount`), relative to the config file
    pub entries_file: Option<PathBuf>,

    /// Optional amount minted to the distributor when the round is created
    pub initial_funding: Option<String>,

    /// Publish the root of `entries_file` right away
    #[serde(default)]
    pub publish_root: bool,
}

impl RoundConfig {
    pub fn from_file(path: &Path) -> CliResult<Self> {
        let contents = fs::read_to_string(path)?;
        let config: RoundConfig = serde_yaml::from_str(&contents)?;

        if config.round_id.trim().is_empty() {
            return Err(CliError::InvalidConfig("round_id must not be empty".to_string()));
        }
        if config.publish_root && config.entries_file.is_none() {
            return Err(CliError::InvalidConfig(
                "publish_root requires entries_file".to_string(),
            ));
        }

        Ok(config)
    }

    /// Entries file resolved against the directory holding the config file
    pub fn entries_path(&self, config_path: &Path) -> Option<PathBuf> {
        self.entries_file.as_ref().map(|entries| {
            if entries.is_absolute() {
                entries.clone()
            } else {
                config_path
                    .parent()
                    .unwrap_or_else(|| Path::new("."))
                    .join(entries)
            }
        })
    }
}

/// Compiled distribution output (`distribution.json`), for frontends and claim tooling
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DistributionOutput {
    pub merkle_root: String,
    pub depth: usize,
    pub leaf_count: usize,
    pub total_amount: String,
    pub claims: Vec<ClaimOutput>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClaimOutput {
    pub leaf_index: usize,
    pub claimant: String,
    pub amount: String,
    pub leaf: String,
    pub merkle_proof: Vec<String>,
}
