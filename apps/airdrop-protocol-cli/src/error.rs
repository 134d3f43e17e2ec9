use airdrop_protocol::{ErrorCode, LedgerError};
use airdrop_protocol_csvs::CsvError;
use airdrop_protocol_db::DbError;
use airdrop_protocol_merkle::ClaimTreeError;
use airdrop_protocol_service::ServiceError;
use thiserror::Error;

pub type CliResult<T> = Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] CsvError),

    #[error("YAML parsing error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Database error: {0}")]
    Database(#[from] DbError),

    #[error("Merkle tree error: {0}")]
    Tree(#[from] ClaimTreeError),

    #[error("Protocol error: {0}")]
    Protocol(#[from] ErrorCode),

    #[error("Ledger error: {0}")]
    Ledger(#[from] LedgerError),

    #[error("Round service error: {0}")]
    Service(#[from] ServiceError),

    #[error("Invalid hex string: {0}")]
    InvalidHex(String),

    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("Command execution failed: {0}")]
    CommandExecution(String),
}
