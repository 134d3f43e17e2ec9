use airdrop_protocol::Address;
use thiserror::Error;

pub type ClaimTreeResult<T> = Result<T, ClaimTreeError>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ClaimTreeError {
    #[error("Invalid entry at index {index}: {reason}")]
    InvalidEntry { index: usize, reason: String },

    #[error("Cannot build a claim tree without entries")]
    NoEntries,

    #[error("Claimant {0} not found in tree")]
    ClaimantNotFound(Address),

    #[error("Leaf index {index} out of bounds for {leaf_count} leaves")]
    LeafIndexOutOfBounds { index: usize, leaf_count: usize },

    #[error("Missing merkle root")]
    MissingRoot,
}
