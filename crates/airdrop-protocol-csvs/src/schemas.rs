/*!
# CSV Schema Definitions

Row types for `entries.csv` and `proofs.csv`. Addresses and hashes are
written as `0x`-prefixed lowercase hex, amounts as plain decimal so values
above `u64` survive spreadsheets and `jq` alike.
*/

use airdrop_protocol::{
    format_hash, parse_address, parse_amount, parse_hash, Address, ClaimLeaf, ClaimProof, Hash,
    U256,
};
use serde::{Deserialize, Serialize};

/// Current schema version for all CSV formats
pub const CURRENT_SCHEMA_VERSION: &str = "1.0";

/// Separator between proof hashes inside the `proof` column
pub const PROOF_SEPARATOR: char = ':';

// ================================================================================================
// Entries CSV Schema
// ================================================================================================

/// Expected headers for entries.csv in exact order
pub const ENTRIES_CSV_HEADERS: &[&str] = &["claimant", "amount"];

/// Row structure for entries.csv
///
/// **File**: `entries.csv`
/// **Purpose**: The distribution, one entry per leaf, in tree order
/// **Producer**: `generate-fixtures` command, or hand-written
/// **Consumers**: `build-tree` command
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct EntriesCsvRow {
    /// Recipient address
    #[serde(
        deserialize_with = "deserialize_address",
        serialize_with = "serialize_address"
    )]
    pub claimant: Address,

    /// Amount in base units
    #[serde(
        deserialize_with = "deserialize_amount",
        serialize_with = "serialize_amount"
    )]
    pub amount: U256,
}

impl EntriesCsvRow {
    pub fn to_leaf(&self) -> ClaimLeaf {
        ClaimLeaf::new(self.claimant, self.amount)
    }
}

impl From<&ClaimLeaf> for EntriesCsvRow {
    fn from(leaf: &ClaimLeaf) -> Self {
        Self {
            claimant: leaf.claimant,
            amount: leaf.amount,
        }
    }
}

// ================================================================================================
// Proofs CSV Schema
// ================================================================================================

/// Expected headers for proofs.csv in exact order
pub const PROOFS_CSV_HEADERS: &[&str] = &["leaf_index", "claimant", "amount", "leaf", "proof"];

/// Row structure for proofs.csv
///
/// **File**: `proofs.csv`
/// **Purpose**: Per-recipient proofs handed out after a tree is built
/// **Producer**: `build-tree` command
/// **Consumers**: `claim`, `check-eligibility` and `verify-proof` commands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ProofsCsvRow {
    /// Index of the entry in entries.csv
    pub leaf_index: usize,

    #[serde(
        deserialize_with = "deserialize_address",
        serialize_with = "serialize_address"
    )]
    pub claimant: Address,

    #[serde(
        deserialize_with = "deserialize_amount",
        serialize_with = "serialize_amount"
    )]
    pub amount: U256,

    /// Leaf hash, `0x`-prefixed
    #[serde(deserialize_with = "deserialize_hash", serialize_with = "serialize_hash")]
    pub leaf: Hash,

    /// Sibling hashes joined by [`PROOF_SEPARATOR`]
    #[serde(deserialize_with = "deserialize_proof", serialize_with = "serialize_proof")]
    pub proof: ClaimProof,
}

impl ProofsCsvRow {
    pub fn to_leaf(&self) -> ClaimLeaf {
        ClaimLeaf::new(self.claimant, self.amount)
    }
}

// ================================================================================================
// Custom Serde Functions
// ================================================================================================

fn deserialize_address<'de, D>(deserializer: D) -> Result<Address, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_address(&s).map_err(serde::de::Error::custom)
}

fn serialize_address<S>(address: &Address, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format!("0x{}", hex::encode(address.as_slice())))
}

fn deserialize_amount<'de, D>(deserializer: D) -> Result<U256, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_amount(&s).map_err(serde::de::Error::custom)
}

fn serialize_amount<S>(amount: &U256, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&amount.to_string())
}

fn deserialize_hash<'de, D>(deserializer: D) -> Result<Hash, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    parse_hash(&s).map_err(serde::de::Error::custom)
}

fn serialize_hash<S>(hash: &Hash, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&format_hash(hash))
}

fn deserialize_proof<'de, D>(deserializer: D) -> Result<ClaimProof, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let s = String::deserialize(deserializer)?;
    if s.trim().is_empty() {
        return Ok(ClaimProof::default());
    }
    let elements: Vec<&str> = s.split(PROOF_SEPARATOR).collect();
    ClaimProof::from_hex(&elements).map_err(serde::de::Error::custom)
}

fn serialize_proof<S>(proof: &ClaimProof, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    serializer.serialize_str(&proof.to_hex().join(&PROOF_SEPARATOR.to_string()))
}

// ================================================================================================
// Tests
// ================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_protocol::test_utils::sample_entries;

    #[test]
    fn test_entries_csv_row_serialization() {
        let row = EntriesCsvRow::from(&sample_entries()[0]);

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&row).unwrap();
        let csv_data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();

        assert_eq!(
            csv_data,
            format!("claimant,amount\n0x{},100\n", "aa".repeat(20))
        );

        let mut rdr = csv::Reader::from_reader(csv_data.as_bytes());
        let deserialized: EntriesCsvRow = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(row, deserialized);
    }

    #[test]
    fn test_amount_above_u64() {
        let data = format!(
            "claimant,amount\n0x{},1000000000000000000000\n",
            "ab".repeat(20)
        );
        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let row: EntriesCsvRow = rdr.deserialize().next().unwrap().unwrap();

        assert_eq!(
            row.amount,
            U256::from(1_000_000_000_000_000_000_000u128)
        );
    }

    #[test]
    fn test_invalid_rows_rejected() {
        for bad in [
            format!("claimant,amount\n0x{},1\n", "00".repeat(20)), // null address
            format!("claimant,amount\n0x{},1\n", "aa".repeat(19)), // short address
            format!("claimant,amount\n0x{},1.5\n", "aa".repeat(20)), // fractional amount
            format!("claimant,amount\n0x{},-1\n", "aa".repeat(20)),
        ] {
            let mut rdr = csv::Reader::from_reader(bad.as_bytes());
            let result: Option<Result<EntriesCsvRow, csv::Error>> = rdr.deserialize().next();
            assert!(result.unwrap().is_err(), "accepted: {}", bad);
        }
    }

    #[test]
    fn test_proofs_csv_row_serialization() {
        let leaf = sample_entries()[2];
        let row = ProofsCsvRow {
            leaf_index: 2,
            claimant: leaf.claimant,
            amount: leaf.amount,
            leaf: leaf.to_hash(),
            proof: ClaimProof::new(vec![[1; 32], [2; 32]]),
        };

        let mut wtr = csv::Writer::from_writer(vec![]);
        wtr.serialize(&row).unwrap();
        let csv_data = String::from_utf8(wtr.into_inner().unwrap()).unwrap();
        assert!(csv_data.contains(&format!(
            "0x{}:0x{}",
            "01".repeat(32),
            "02".repeat(32)
        )));

        let mut rdr = csv::Reader::from_reader(csv_data.as_bytes());
        let deserialized: ProofsCsvRow = rdr.deserialize().next().unwrap().unwrap();
        assert_eq!(row, deserialized);
    }

    #[test]
    fn test_empty_proof_column() {
        let leaf = sample_entries()[0];
        let data = format!(
            "leaf_index,claimant,amount,leaf,proof\n0,0x{},100,{},\n",
            "aa".repeat(20),
            format_hash(&leaf.to_hash())
        );

        let mut rdr = csv::Reader::from_reader(data.as_bytes());
        let row: ProofsCsvRow = rdr.deserialize().next().unwrap().unwrap();
        assert!(row.proof.is_empty());
        assert_eq!(row.to_leaf(), leaf);
    }
}
