/*!
# CSV Validation & I/O

Reading, writing and cross-checking the files exchanged between
`generate-fixtures`, `build-tree` and the claim commands.
*/

use crate::{
    errors::{CsvError, CsvResult},
    schemas::{EntriesCsvRow, ProofsCsvRow, ENTRIES_CSV_HEADERS, PROOFS_CSV_HEADERS},
};
use csv::{Reader, Writer};
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs::File;
use std::path::Path;

// ================================================================================================
// CSV Reading with Validation
// ================================================================================================

/// Read and validate an entries CSV file
pub fn read_entries_csv<P: AsRef<Path>>(path: P) -> CsvResult<Vec<EntriesCsvRow>> {
    read_rows(path, ENTRIES_CSV_HEADERS, "entries.csv")
}

/// Read and validate a proofs CSV file
pub fn read_proofs_csv<P: AsRef<Path>>(path: P) -> CsvResult<Vec<ProofsCsvRow>> {
    let rows: Vec<ProofsCsvRow> = read_rows(path, PROOFS_CSV_HEADERS, "proofs.csv")?;

    for (position, row) in rows.iter().enumerate() {
        if row.leaf_index != position {
            return Err(CsvError::LeafIndexOutOfOrder {
                row: position + 1,
                leaf_index: row.leaf_index,
            });
        }
    }

    Ok(rows)
}

fn read_rows<P, T>(path: P, expected_headers: &[&str], file_type: &str) -> CsvResult<Vec<T>>
where
    P: AsRef<Path>,
    T: DeserializeOwned,
{
    let file = File::open(path)?;
    let mut rdr = Reader::from_reader(file);

    // Validate headers
    let headers = rdr.headers()?;
    validate_headers(headers.iter(), expected_headers, file_type)?;

    // Read and deserialize rows
    let mut rows = Vec::new();
    for result in rdr.deserialize() {
        let row: T = result?;
        rows.push(row);
    }

    if rows.is_empty() {
        return Err(CsvError::EmptyFile(file_type.to_string()));
    }

    Ok(rows)
}

// ================================================================================================
// CSV Writing
// ================================================================================================

/// Write entries CSV with proper headers
pub fn write_entries_csv<P: AsRef<Path>>(path: P, rows: &[EntriesCsvRow]) -> CsvResult<()> {
    write_rows(path, rows)
}

/// Write proofs CSV with proper headers
pub fn write_proofs_csv<P: AsRef<Path>>(path: P, rows: &[ProofsCsvRow]) -> CsvResult<()> {
    write_rows(path, rows)
}

fn write_rows<P: AsRef<Path>, T: Serialize>(path: P, rows: &[T]) -> CsvResult<()> {
    let file = File::create(path)?;
    let mut wtr = Writer::from_writer(file);

    // csv writes the header row from the first record
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

// ================================================================================================
// Cross-CSV Validation
// ================================================================================================

/// Validate that a proofs file was built from an entries file
///
/// Ensures:
/// - Both files have the same number of rows
/// - Each proof row repeats the claimant and amount of its entry
/// - Each `leaf` column is the hash of that claimant and amount
pub fn validate_proofs_against_entries(
    entries: &[EntriesCsvRow],
    proofs: &[ProofsCsvRow],
) -> CsvResult<()> {
    if entries.len() != proofs.len() {
        return Err(CsvError::DataInconsistency(format!(
            "entries.csv has {} rows but proofs.csv has {}",
            entries.len(),
            proofs.len()
        )));
    }

    for (entry, proof) in entries.iter().zip(proofs) {
        if entry.claimant != proof.claimant || entry.amount != proof.amount {
            return Err(CsvError::DataInconsistency(format!(
                "leaf {} is ({}, {}) in entries.csv but ({}, {}) in proofs.csv",
                proof.leaf_index, entry.claimant, entry.amount, proof.claimant, proof.amount
            )));
        }
        if proof.to_leaf().to_hash() != proof.leaf {
            return Err(CsvError::LeafHashMismatch(proof.leaf_index));
        }
    }

    Ok(())
}

// ================================================================================================
// Header Validation
// ================================================================================================

fn validate_headers<'a, I>(actual: I, expected: &[&str], file_type: &str) -> CsvResult<()>
where
    I: Iterator<Item = &'a str>,
{
    let actual_headers: Vec<&str> = actual.collect();

    if actual_headers.len() != expected.len() {
        return Err(CsvError::HeaderMismatch {
            file: file_type.to_string(),
            reason: format!(
                "expected {} headers, found {}",
                expected.len(),
                actual_headers.len()
            ),
        });
    }

    for (i, (actual, expected)) in actual_headers.iter().zip(expected.iter()).enumerate() {
        if actual != expected {
            return Err(CsvError::HeaderMismatch {
                file: file_type.to_string(),
                reason: format!("header {} should be '{}', found '{}'", i + 1, expected, actual),
            });
        }
    }

    Ok(())
}

// ================================================================================================
// Tests
// ================================================================================================
