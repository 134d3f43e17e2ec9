use alloy_primitives::{Address, U256};

/// Width of an encoded claimant address inside a leaf.
pub const ADDRESS_BYTES: usize = 20;

/// Width of an encoded amount inside a leaf (big-endian uint256).
pub const AMOUNT_BYTES: usize = 32;

/// Total width of the packed leaf preimage: `address ‖ amount`.
pub const LEAF_DATA_BYTES: usize = ADDRESS_BYTES + AMOUNT_BYTES;

/// Width of every node hash in the claim tree.
pub const HASH_BYTES: usize = 32;

/// The null identity. It can never claim and can never appear in a tree.
pub const NULL_ADDRESS: Address = Address::ZERO;

/// Base units per whole token (18 decimals).
pub const TOKEN_BASE_UNITS: u128 = 1_000_000_000_000_000_000;

/// Whole tokens payable in a single claim unless the administrator changes it.
pub const DEFAULT_MAX_CLAIM_TOKENS: u128 = 1_000;

/// Default per-claim ceiling: 1000 tokens at 18 decimals.
pub fn default_max_claim_amount() -> U256 {
    U256::from(DEFAULT_MAX_CLAIM_TOKENS * TOKEN_BASE_UNITS)
}
