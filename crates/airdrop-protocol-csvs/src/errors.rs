use thiserror::Error;

pub type CsvResult<T> = Result<T, CsvError>;

#[derive(Error, Debug)]
pub enum CsvError {
    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("{file}: {reason}")]
    HeaderMismatch { file: String, reason: String },

    #[error("{0} file is empty")]
    EmptyFile(String),

    #[error("proofs.csv: row {row} has leaf_index {leaf_index}")]
    LeafIndexOutOfOrder { row: usize, leaf_index: usize },

    #[error("Inconsistent data between CSV files: {0}")]
    DataInconsistency(String),

    #[error("leaf {0} hash does not match its claimant and amount")]
    LeafHashMismatch(usize),
}
