/*!
# Database Schema Management

Complete schema for airdrop rounds, plus initialization and version checks.
*/

use crate::{DbError, DbResult};
use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

/// Current database schema version
pub const SCHEMA_VERSION: i32 = 1;

/// Initialize database with complete schema
pub fn initialize_database(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        r#"
        -- Round configuration and live state
        CREATE TABLE rounds (
            round_id TEXT PRIMARY KEY,
            distributor TEXT NOT NULL,      -- address holding the round's pool
            administrator TEXT NOT NULL,
            merkle_root TEXT,               -- 0x-hex, NULL until published
            max_claim_amount TEXT NOT NULL, -- decimal base units
            status TEXT NOT NULL,
            claim_key_scheme TEXT NOT NULL,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        );

        -- Claim records
        CREATE TABLE claims (
            round_id TEXT NOT NULL,
            claim_root TEXT NOT NULL,       -- '' under the global key scheme
            claimant TEXT NOT NULL,
            claimed_at TEXT NOT NULL,
            PRIMARY KEY (round_id, claim_root, claimant),
            FOREIGN KEY (round_id) REFERENCES rounds(round_id)
        );

        -- Token ledger shared by all rounds
        CREATE TABLE balances (
            holder TEXT PRIMARY KEY,
            amount TEXT NOT NULL            -- decimal base units
        );

        -- Compiled distributions
        CREATE TABLE distribution_entries (
            round_id TEXT NOT NULL,
            leaf_index INTEGER NOT NULL,
            claimant TEXT NOT NULL,
            amount TEXT NOT NULL,
            merkle_proof TEXT NOT NULL,     -- 0x-hex hashes joined by ':'
            PRIMARY KEY (round_id, leaf_index),
            FOREIGN KEY (round_id) REFERENCES rounds(round_id)
        );

        -- Indexes for efficient lookups
        CREATE INDEX idx_claims_round ON claims(round_id);
        CREATE INDEX idx_distribution_claimant ON distribution_entries(claimant);

        -- Schema version tracking
        CREATE TABLE schema_version (
            version INTEGER PRIMARY KEY,
            applied_at TEXT NOT NULL
        );
        "#,
    )
    .map_err(DbError::Database)?;

    conn.execute(
        "INSERT INTO schema_version (version, applied_at) VALUES (?, ?)",
        params![SCHEMA_VERSION, Utc::now().to_rfc3339()],
    )
    .map_err(DbError::Database)?;

    Ok(())
}

/// Check if database is properly initialized
pub fn check_schema(conn: &Connection) -> DbResult<bool> {
    let found: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='rounds'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::Database)?;

    if found.is_none() {
        return Ok(false);
    }

    Ok(get_schema_version(conn)? == Some(SCHEMA_VERSION))
}

/// Get current schema version from database
pub fn get_schema_version(conn: &Connection) -> DbResult<Option<i32>> {
    let table_exists: Option<String> = conn
        .query_row(
            "SELECT name FROM sqlite_master WHERE type='table' AND name='schema_version'",
            [],
            |row| row.get(0),
        )
        .optional()
        .map_err(DbError::Database)?;

    if table_exists.is_none() {
        return Ok(None);
    }

    conn.query_row(
        "SELECT version FROM schema_version ORDER BY version DESC LIMIT 1",
        [],
        |row| row.get(0),
    )
    .optional()
    .map_err(DbError::Database)
}
