/*!
# Database Operations

Unified database interface for round operations. Addresses and hashes are
stored as `0x`-hex text, amounts as decimal text (they do not fit SQLite's
64-bit integers).
*/

use crate::{
    schema::{check_schema, initialize_database},
    DbError, DbResult,
};
use airdrop_protocol::{
    format_hash, parse_hash, Address, ClaimKey, ClaimKeyScheme, ClaimLeaf, ClaimProof,
    ClaimRecords, Hash, InMemoryLedger, RoundState, RoundStatus, RoundStore, StoreError, U256,
};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};
use std::collections::BTreeSet;
use std::path::Path;
use tracing::debug;

/// Round configuration plus its persisted state
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundInfo {
    pub round_id: String,
    pub distributor: Address,
    pub administrator: Address,
    pub created_at: String,
    pub updated_at: String,
    pub state: RoundState,
}

/// One compiled leaf of a round's distribution
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DistributionEntry {
    pub leaf_index: usize,
    pub leaf: ClaimLeaf,
    pub proof: ClaimProof,
}

/// Claimant eligibility information combining database and calculated data
#[derive(Debug, Clone)]
pub struct EligibilityInfo {
    pub round_id: String,
    pub leaf_index: usize,
    pub amount: U256,
    pub merkle_proof: ClaimProof,
    pub round_root: Option<Hash>,
    pub status: RoundStatus,
    /// Whether the stored proof folds to the round's current root
    pub proof_matches_root: bool,
    // Database state
    pub db_claimed: bool,
    pub db_claimed_at: Option<String>,
}

/// Unified database interface for round operations
pub struct RoundDatabase {
    conn: Connection,
}

impl RoundDatabase {
    /// Open an existing database file
    pub fn open(path: &Path) -> DbResult<Self> {
        if !path.exists() {
            return Err(DbError::InvalidConfig(format!(
                "Database file does not exist: {}",
                path.display()
            )));
        }

        let conn = Connection::open(path)
            .map_err(|e| DbError::Connection(format!("Failed to open database: {}", e)))?;

        // Verify it has the expected schema
        let db = Self { conn };
        if !db.verify_schema()? {
            return Err(DbError::InvalidConfig(format!(
                "Database file has invalid schema: {}",
                path.display()
            )));
        }

        Ok(db)
    }

    /// Create a new in-memory database with initialized schema
    /// Use save_to_file() to persist when ready
    pub fn create_in_memory() -> DbResult<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            DbError::Connection(format!("Failed to create in-memory database: {}", e))
        })?;

        initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Create a new database file, overwriting if it exists
    pub fn create_file(path: &Path, overwrite: bool) -> DbResult<Self> {
        if path.exists() && !overwrite {
            return Err(DbError::InvalidConfig(format!(
                "Database file already exists (use overwrite=true to replace): {}",
                path.display()
            )));
        }

        if path.exists() && overwrite {
            std::fs::remove_file(path).map_err(|e| {
                DbError::Connection(format!("Failed to remove existing file: {}", e))
            })?;
        }

        let conn = Connection::open(path)
            .map_err(|e| DbError::Connection(format!("Failed to create database file: {}", e)))?;

        initialize_database(&conn)?;

        Ok(Self { conn })
    }

    /// Save database to a file using the SQLite backup API
    pub fn save_to_file(&self, path: &Path, overwrite: bool) -> DbResult<()> {
        if path.exists() && !overwrite {
            return Err(DbError::InvalidConfig(format!(
                "File already exists (use overwrite=true to replace): {}",
                path.display()
            )));
        }

        if path.exists() && overwrite {
            std::fs::remove_file(path).map_err(|e| {
                DbError::Connection(format!("Failed to remove existing file: {}", e))
            })?;
        }

        let mut file_conn = Connection::open(path)
            .map_err(|e| DbError::Connection(format!("Failed to create output file: {}", e)))?;

        let backup = rusqlite::backup::Backup::new(&self.conn, &mut file_conn)
            .map_err(|e| DbError::Connection(format!("Failed to create backup: {}", e)))?;

        backup
            .run_to_completion(5, std::time::Duration::from_millis(250), None)
            .map_err(|e| DbError::Connection(format!("Failed to save database: {}", e)))?;

        Ok(())
    }

    /// Check if database has proper schema
    pub fn verify_schema(&self) -> DbResult<bool> {
        check_schema(&self.conn)
    }

    /// Get underlying connection for advanced operations
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    // ============================================================================================
    // Rounds
    // ============================================================================================

    /// Register a new round with its initial state
    pub fn insert_round(
        &mut self,
        round_id: &str,
        distributor: &Address,
        administrator: &Address,
        state: &RoundState,
    ) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        if round_exists(&tx, round_id)? {
            return Err(DbError::RoundAlreadyExists(round_id.to_string()));
        }

        let now = Utc::now().to_rfc3339();
        tx.execute(
            "INSERT INTO rounds (round_id, distributor, administrator, merkle_root, max_claim_amount,
                                 status, claim_key_scheme, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?)",
            params![
                round_id,
                encode_address(distributor),
                encode_address(administrator),
                state.merkle_root.as_ref().map(format_hash),
                state.max_claim_amount.to_string(),
                state.status.as_str(),
                state.claims.scheme().as_str(),
                now,
                now,
            ],
        )
        .map_err(DbError::Database)?;

        sync_claims(&tx, round_id, &state.claims)?;

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        debug!(round_id, "Inserted round");
        Ok(())
    }

    /// Overwrite a round's state: root, ceiling, status and claim records.
    ///
    /// Claim records missing from `state` are deleted, so a rolled back claim
    /// disappears from disk too. Surviving records keep their original
    /// `claimed_at`.
    pub fn save_round_state(&mut self, round_id: &str, state: &RoundState) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        write_round_row(&tx, round_id, state)?;
        sync_claims(&tx, round_id, &state.claims)?;

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    /// Persist one claim change: the round row plus the single `key`.
    ///
    /// The row for `key` is inserted when `state` holds it and deleted when it
    /// does not. Other claim rows are left alone, so each claim costs one
    /// statement regardless of how many claims the round already has.
    pub fn save_claim(
        &mut self,
        round_id: &str,
        state: &RoundState,
        key: &ClaimKey,
    ) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        write_round_row(&tx, round_id, state)?;
        write_claim(&tx, round_id, key, state.claims.contains(key))?;

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    /// Persist round state and ledger balances in a single transaction.
    ///
    /// Either both land on disk or neither does.
    pub fn save_round_and_ledger(
        &mut self,
        round_id: &str,
        state: &RoundState,
        ledger: &InMemoryLedger,
    ) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        write_round_row(&tx, round_id, state)?;
        sync_claims(&tx, round_id, &state.claims)?;
        write_balances(&tx, ledger)?;

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        debug!(round_id, "Saved round state and ledger");
        Ok(())
    }

    /// [`Self::save_claim`] plus the ledger balances, in one transaction.
    pub fn save_claim_and_ledger(
        &mut self,
        round_id: &str,
        state: &RoundState,
        key: &ClaimKey,
        ledger: &InMemoryLedger,
    ) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        write_round_row(&tx, round_id, state)?;
        write_claim(&tx, round_id, key, state.claims.contains(key))?;
        write_balances(&tx, ledger)?;

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    /// Load a round's state, `None` if the round does not exist
    pub fn load_round_state(&self, round_id: &str) -> DbResult<Option<RoundState>> {
        Ok(self.read_round(round_id)?.map(|info| info.state))
    }

    /// Read round configuration and state
    pub fn read_round(&self, round_id: &str) -> DbResult<Option<RoundInfo>> {
        let row = self
            .conn
            .query_row(
                "SELECT round_id, distributor, administrator, merkle_root, max_claim_amount,
                        status, claim_key_scheme, created_at, updated_at
                 FROM rounds WHERE round_id = ?",
                [round_id],
                read_round_row,
            )
            .optional()
            .map_err(DbError::Database)?;

        match row {
            Some(row) => Ok(Some(self.decode_round(row)?)),
            None => Ok(None),
        }
    }

    /// All rounds, ordered by id
    pub fn list_rounds(&self) -> DbResult<Vec<RoundInfo>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT round_id, distributor, administrator, merkle_root, max_claim_amount,
                        status, claim_key_scheme, created_at, updated_at
                 FROM rounds ORDER BY round_id",
            )
            .map_err(DbError::Database)?;

        let rows = stmt
            .query_map([], read_round_row)
            .map_err(DbError::Database)?
            .collect::<Result<Vec<_>, _>>()
            .map_err(DbError::Database)?;

        rows.into_iter().map(|row| self.decode_round(row)).collect()
    }

    /// When a claim record was first written
    pub fn claimed_at(&self, round_id: &str, key: &ClaimKey) -> DbResult<Option<String>> {
        self.conn
            .query_row(
                "SELECT claimed_at FROM claims
                 WHERE round_id = ? AND claim_root = ? AND claimant = ?",
                params![
                    round_id,
                    encode_claim_root(&key.root),
                    encode_address(&key.claimant)
                ],
                |row| row.get(0),
            )
            .optional()
            .map_err(DbError::Database)
    }

    fn decode_round(&self, row: RoundRow) -> DbResult<RoundInfo> {
        let scheme: ClaimKeyScheme = row.claim_key_scheme.parse().map_err(DbError::Serialization)?;
        let status: RoundStatus = row.status.parse().map_err(DbError::Serialization)?;
        let merkle_root = row
            .merkle_root
            .as_deref()
            .map(parse_hash)
            .transpose()
            .map_err(|e| DbError::Serialization(format!("Invalid merkle root: {}", e)))?;

        let keys = self.read_claim_keys(&row.round_id)?;

        Ok(RoundInfo {
            distributor: decode_address(&row.distributor)?,
            administrator: decode_address(&row.administrator)?,
            created_at: row.created_at,
            updated_at: row.updated_at,
            state: RoundState {
                merkle_root,
                max_claim_amount: decode_amount(&row.max_claim_amount)?,
                status,
                claims: ClaimRecords::from_keys(scheme, keys),
            },
            round_id: row.round_id,
        })
    }

    fn read_claim_keys(&self, round_id: &str) -> DbResult<Vec<ClaimKey>> {
        stored_claim_keys(&self.conn, round_id)?
            .into_iter()
            .map(|(root, claimant)| {
                Ok(ClaimKey {
                    root: decode_claim_root(&root)?,
                    claimant: decode_address(&claimant)?,
                })
            })
            .collect()
    }

    // ============================================================================================
    // Ledger
    // ============================================================================================

    /// Load the shared token ledger
    pub fn load_ledger(&self) -> DbResult<InMemoryLedger> {
        let mut stmt = self
            .conn
            .prepare("SELECT holder, amount FROM balances")
            .map_err(DbError::Database)?;

        let rows = stmt
            .query_map([], |row| {
                let holder: String = row.get(0)?;
                let amount: String = row.get(1)?;
                Ok((holder, amount))
            })
            .map_err(DbError::Database)?;

        let mut balances = Vec::new();
        for row in rows {
            let (holder, amount) = row.map_err(DbError::Database)?;
            balances.push((decode_address(&holder)?, decode_amount(&amount)?));
        }

        Ok(InMemoryLedger::from_balances(balances))
    }

    /// Replace the stored ledger with `ledger`
    pub fn save_ledger(&mut self, ledger: &InMemoryLedger) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        write_balances(&tx, ledger)?;

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        Ok(())
    }

    // ============================================================================================
    // Distributions
    // ============================================================================================

    /// Store the compiled distribution of a round, replacing any previous one
    pub fn store_distribution(
        &mut self,
        round_id: &str,
        entries: &[DistributionEntry],
    ) -> DbResult<()> {
        let tx = self
            .conn
            .transaction()
            .map_err(|e| DbError::Transaction(format!("Failed to start transaction: {}", e)))?;

        if !round_exists(&tx, round_id)? {
            return Err(DbError::RoundNotFound(round_id.to_string()));
        }

        tx.execute(
            "DELETE FROM distribution_entries WHERE round_id = ?",
            [round_id],
        )
        .map_err(DbError::Database)?;

        for entry in entries {
            tx.execute(
                "INSERT INTO distribution_entries (round_id, leaf_index, claimant, amount, merkle_proof)
                 VALUES (?, ?, ?, ?, ?)",
                params![
                    round_id,
                    entry.leaf_index as i64,
                    encode_address(&entry.leaf.claimant),
                    entry.leaf.amount.to_string(),
                    encode_proof(&entry.proof),
                ],
            )
            .map_err(DbError::Database)?;
        }

        tx.commit()
            .map_err(|e| DbError::Transaction(format!("Failed to commit transaction: {}", e)))?;

        debug!(round_id, entries = entries.len(), "Stored distribution");
        Ok(())
    }

    /// Read a round's compiled distribution, ordered by leaf index
    pub fn read_distribution(&self, round_id: &str) -> DbResult<Vec<DistributionEntry>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT leaf_index, claimant, amount, merkle_proof
                 FROM distribution_entries WHERE round_id = ? ORDER BY leaf_index",
            )
            .map_err(DbError::Database)?;

        let rows = stmt
            .query_map([round_id], read_distribution_row)
            .map_err(DbError::Database)?;

        let mut entries = Vec::new();
        for row in rows {
            let (leaf_index, claimant, amount, proof) = row.map_err(DbError::Database)?;
            entries.push(decode_distribution_entry(leaf_index, &claimant, &amount, &proof)?);
        }

        Ok(entries)
    }

    /// Every round `claimant` appears in, with claim status
    pub fn read_claimant_eligibility(&self, claimant: &Address) -> DbResult<Vec<EligibilityInfo>> {
        let mut stmt = self
            .conn
            .prepare(
                "SELECT round_id, leaf_index, claimant, amount, merkle_proof
                 FROM distribution_entries
                 WHERE claimant = ?
                 ORDER BY round_id, leaf_index",
            )
            .map_err(DbError::Database)?;

        let rows = stmt
            .query_map([encode_address(claimant)], |row| {
                let round_id: String = row.get(0)?;
                let (leaf_index, claimant, amount, proof) = read_distribution_row_at(row, 1)?;
                Ok((round_id, leaf_index, claimant, amount, proof))
            })
            .map_err(DbError::Database)?;

        let mut eligibility = Vec::new();
        for row in rows {
            let (round_id, leaf_index, claimant_hex, amount, proof) =
                row.map_err(DbError::Database)?;
            let entry = decode_distribution_entry(leaf_index, &claimant_hex, &amount, &proof)?;

            let state = self
                .load_round_state(&round_id)?
                .ok_or_else(|| DbError::RoundNotFound(round_id.clone()))?;

            let proof_matches_root = state
                .merkle_root
                .map(|root| entry.proof.verify(&root, &entry.leaf))
                .unwrap_or(false);
            let db_claimed = state.has_claimed(claimant);
            let db_claimed_at = match state.merkle_root {
                Some(root) if db_claimed => {
                    self.claimed_at(&round_id, &state.claims.key_for(&root, claimant))?
                }
                _ => None,
            };

            eligibility.push(EligibilityInfo {
                round_id,
                leaf_index: entry.leaf_index,
                amount: entry.leaf.amount,
                merkle_proof: entry.proof,
                round_root: state.merkle_root,
                status: state.status,
                proof_matches_root,
                db_claimed,
                db_claimed_at,
            });
        }

        Ok(eligibility)
    }
}

impl RoundStore for RoundDatabase {
    fn save_round(&mut self, round_id: &str, state: &RoundState) -> Result<(), StoreError> {
        self.save_round_state(round_id, state).map_err(store_error)
    }

    fn save_claim(
        &mut self,
        round_id: &str,
        state: &RoundState,
        key: &ClaimKey,
    ) -> Result<(), StoreError> {
        RoundDatabase::save_claim(self, round_id, state, key).map_err(store_error)
    }

    fn load_round(&self, round_id: &str) -> Result<Option<RoundState>, StoreError> {
        self.load_round_state(round_id)
            .map_err(|e| StoreError::Backend(e.to_string()))
    }
}

fn store_error(e: DbError) -> StoreError {
    match e {
        DbError::RoundNotFound(id) => StoreError::RoundNotFound(id),
        other => StoreError::Backend(other.to_string()),
    }
}

// ================================================================================================
// Row helpers
// ================================================================================================

struct RoundRow {
    round_id: String,
    distributor: String,
    administrator: String,
    merkle_root: Option<String>,
    max_claim_amount: String,
    status: String,
    claim_key_scheme: String,
    created_at: String,
    updated_at: String,
}

fn read_round_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RoundRow> {
    Ok(RoundRow {
        round_id: row.get(0)?,
        distributor: row.get(1)?,
        administrator: row.get(2)?,
        merkle_root: row.get(3)?,
        max_claim_amount: row.get(4)?,
        status: row.get(5)?,
        claim_key_scheme: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

type DistributionRow = (i64, String, String, String);

fn read_distribution_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<DistributionRow> {
    read_distribution_row_at(row, 0)
}

fn read_distribution_row_at(
    row: &rusqlite::Row<'_>,
    offset: usize,
) -> rusqlite::Result<DistributionRow> {
    Ok((
        row.get(offset)?,
        row.get(offset + 1)?,
        row.get(offset + 2)?,
        row.get(offset + 3)?,
    ))
}

fn decode_distribution_entry(
    leaf_index: i64,
    claimant: &str,
    amount: &str,
    proof: &str,
) -> DbResult<DistributionEntry> {
    Ok(DistributionEntry {
        leaf_index: usize::try_from(leaf_index)
            .map_err(|_| DbError::Serialization(format!("Invalid leaf index {}", leaf_index)))?,
        leaf: ClaimLeaf::new(decode_address(claimant)?, decode_amount(amount)?),
        proof: decode_proof(proof)?,
    })
}

fn round_exists(conn: &Connection, round_id: &str) -> DbResult<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT round_id FROM rounds WHERE round_id = ?",
            [round_id],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::Database)?;
    Ok(found.is_some())
}

fn stored_claim_keys(conn: &Connection, round_id: &str) -> DbResult<BTreeSet<(String, String)>> {
    let mut stmt = conn
        .prepare("SELECT claim_root, claimant FROM claims WHERE round_id = ?")
        .map_err(DbError::Database)?;

    let keys = stmt
        .query_map([round_id], |row| Ok((row.get(0)?, row.get(1)?)))
        .map_err(DbError::Database)?
        .collect::<Result<BTreeSet<(String, String)>, _>>()
        .map_err(DbError::Database)?;

    Ok(keys)
}

fn write_round_row(conn: &Connection, round_id: &str, state: &RoundState) -> DbResult<()> {
    let updated = conn
        .execute(
            "UPDATE rounds
             SET merkle_root = ?, max_claim_amount = ?, status = ?, claim_key_scheme = ?,
                 updated_at = ?
             WHERE round_id = ?",
            params![
                state.merkle_root.as_ref().map(format_hash),
                state.max_claim_amount.to_string(),
                state.status.as_str(),
                state.claims.scheme().as_str(),
                Utc::now().to_rfc3339(),
                round_id,
            ],
        )
        .map_err(DbError::Database)?;

    if updated == 0 {
        return Err(DbError::RoundNotFound(round_id.to_string()));
    }
    Ok(())
}

/// Insert or delete the row of one claim key. An existing row keeps its
/// `claimed_at`.
fn write_claim(conn: &Connection, round_id: &str, key: &ClaimKey, claimed: bool) -> DbResult<()> {
    let root = encode_claim_root(&key.root);
    let claimant = encode_address(&key.claimant);

    let written = if claimed {
        conn.execute(
            "INSERT OR IGNORE INTO claims (round_id, claim_root, claimant, claimed_at)
             VALUES (?, ?, ?, ?)",
            params![round_id, root, claimant, Utc::now().to_rfc3339()],
        )
    } else {
        conn.execute(
            "DELETE FROM claims WHERE round_id = ? AND claim_root = ? AND claimant = ?",
            params![round_id, root, claimant],
        )
    };
    written.map_err(DbError::Database)?;

    Ok(())
}

fn write_balances(conn: &Connection, ledger: &InMemoryLedger) -> DbResult<()> {
    conn.execute("DELETE FROM balances", [])
        .map_err(DbError::Database)?;

    for (holder, amount) in ledger.balances() {
        conn.execute(
            "INSERT INTO balances (holder, amount) VALUES (?, ?)",
            params![encode_address(&holder), amount.to_string()],
        )
        .map_err(DbError::Database)?;
    }
    Ok(())
}

/// Make the `claims` rows of `round_id` match `records`.
///
/// Reads every stored key, so it is meant for whole-state saves. The claim
/// path goes through [`write_claim`].
fn sync_claims(conn: &Connection, round_id: &str, records: &ClaimRecords) -> DbResult<()> {
    let stored = stored_claim_keys(conn, round_id)?;
    let wanted: BTreeSet<(String, String)> = records
        .iter()
        .map(|key| (encode_claim_root(&key.root), encode_address(&key.claimant)))
        .collect();

    for (root, claimant) in stored.difference(&wanted) {
        conn.execute(
            "DELETE FROM claims WHERE round_id = ? AND claim_root = ? AND claimant = ?",
            params![round_id, root, claimant],
        )
        .map_err(DbError::Database)?;
    }

    let now = Utc::now().to_rfc3339();
    for (root, claimant) in wanted.difference(&stored) {
        conn.execute(
            "INSERT INTO claims (round_id, claim_root, claimant, claimed_at) VALUES (?, ?, ?, ?)",
            params![round_id, root, claimant, now],
        )
        .map_err(DbError::Database)?;
    }

    Ok(())
}

// ================================================================================================
// Text encodings
// ================================================================================================

fn encode_address(address: &Address) -> String {
    format!("0x{}", hex::encode(address.as_slice()))
}

fn decode_address(s: &str) -> DbResult<Address> {
    let digits = s.strip_prefix("0x").unwrap_or(s);
    let bytes = hex::decode(digits)
        .map_err(|e| DbError::Serialization(format!("Invalid address hex '{}': {}", s, e)))?;
    if bytes.len() != 20 {
        return Err(DbError::Serialization(format!(
            "Address must be 20 bytes, got {}",
            bytes.len()
        )));
    }
    Ok(Address::from_slice(&bytes))
}

fn decode_amount(s: &str) -> DbResult<U256> {
    U256::from_str_radix(s, 10)
        .map_err(|e| DbError::Serialization(format!("Invalid amount '{}': {}", s, e)))
}

fn encode_claim_root(root: &Option<Hash>) -> String {
    root.as_ref().map(format_hash).unwrap_or_default()
}

fn decode_claim_root(s: &str) -> DbResult<Option<Hash>> {
    if s.is_empty() {
        return Ok(None);
    }
    parse_hash(s)
        .map(Some)
        .map_err(|e| DbError::Serialization(format!("Invalid claim root: {}", e)))
}

fn encode_proof(proof: &ClaimProof) -> String {
    proof.to_hex().join(":")
}

fn decode_proof(s: &str) -> DbResult<ClaimProof> {
    if s.is_empty() {
        return Ok(ClaimProof::default());
    }
    let elements: Vec<&str> = s.split(':').collect();
    ClaimProof::from_hex(&elements).map_err(|e| DbError::Serialization(e.to_string()))
}

// ================================================================================================
// Tests
// ================================================================================================
