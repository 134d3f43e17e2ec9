/*!
# Airdrop Distribution CSV Schema Definitions

This crate provides the **authoritative CSV schemas** for airdrop distributions.

## Purpose

This crate is the **single source of truth** for CSV data contracts between:

- **`generate-fixtures`** (producer) → Creates `entries.csv`
- **`build-tree`** (consumer, producer) → Reads `entries.csv`, writes `proofs.csv`
- **`claim` / `check-eligibility`** (consumers) → Look up proofs

## Schema Files

### Entries CSV (`entries.csv`)
One row per distribution entry, in tree order:
- `claimant`: 20-byte address, `0x`-prefixed hex
- `amount`: base units, plain decimal (up to 2^256 - 1)

### Proofs CSV (`proofs.csv`)
One row per leaf of a built tree:
- `leaf_index`: position of the entry in `entries.csv`
- `claimant`, `amount`: as above
- `leaf`: `0x`-hex leaf hash
- `proof`: `0x`-hex sibling hashes, bottom-up, joined by `:` (empty for a
  single-entry tree)

## Usage

```rust,no_run
use airdrop_protocol_csvs::{read_entries_csv, read_proofs_csv, validate_proofs_against_entries, CsvResult};

fn example() -> CsvResult<()> {
    let entries = read_entries_csv("entries.csv")?;
    let proofs = read_proofs_csv("proofs.csv")?;

    validate_proofs_against_entries(&entries, &proofs)?;
    Ok(())
}
```
*/

pub mod errors;
pub mod schemas;
pub mod validation;

// Re-export main types for convenience
pub use errors::{CsvError, CsvResult};
pub use schemas::{
    EntriesCsvRow, ProofsCsvRow, CURRENT_SCHEMA_VERSION, ENTRIES_CSV_HEADERS, PROOFS_CSV_HEADERS,
    PROOF_SEPARATOR,
};
pub use validation::{
    read_entries_csv, read_proofs_csv, validate_proofs_against_entries, write_entries_csv,
    write_proofs_csv,
};
