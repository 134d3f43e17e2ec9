pub mod access;
pub mod claim_leaf;
pub mod constants;
pub mod error;
pub mod events;
pub mod hashing;
pub mod instructions;
pub mod ledger;
pub mod proofs;
pub mod state;
pub mod store;
pub mod test_utils;
pub mod verifier;

pub use access::{AccessControl, AdministratorSet, SingleAdministrator};
pub use claim_leaf::*;
pub use constants::{default_max_claim_amount, NULL_ADDRESS};
pub use error::{ErrorCode, ProtocolResult};
pub use events::AirdropEvent;
pub use hashing::{format_hash, hash_sorted_pair, keccak256, parse_hash, Hash};
pub use ledger::{InMemoryLedger, LedgerError, TokenLedger};
pub use proofs::ClaimProof;
pub use state::*;
pub use store::{MemoryRoundStore, RoundStore, StoreError};
pub use verifier::{ClaimVerifier, PreparedClaim, VerifiedClaim};

pub use alloy_primitives::{Address, U256};
