use alloy_primitives::{Address, U256};
use thiserror::Error;

use crate::ledger::LedgerError;

pub type ProtocolResult<T> = Result<T, ErrorCode>;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ErrorCode {
    #[error("Invalid entry: {0}")]
    InvalidEntry(String),

    #[error("Unauthorized access or mismatched authority: {0}")]
    Unauthorized(Address),

    #[error("Claim amount {amount} exceeds the per-claim ceiling of {max_claim_amount}.")]
    AmountTooHigh { amount: U256, max_claim_amount: U256 },

    #[error("Tokens for {0} have already been claimed.")]
    AlreadyClaimed(Address),

    #[error("Invalid Merkle proof provided.")]
    InvalidProof,

    #[error("Nothing to withdraw: the distributor balance is zero.")]
    InsufficientBalance,

    #[error("Token transfer failed: {0}")]
    TransferFailed(#[source] LedgerError),

    #[error("No merkle root has been published for this round.")]
    NoRootPublished,

    #[error("The round has been retired.")]
    RoundRetired,

    #[error("Failed to persist round state: {0}")]
    StateWriteFailed(String),
}
