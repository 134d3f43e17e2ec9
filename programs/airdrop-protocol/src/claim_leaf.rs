use alloy_primitives::{Address, U256};
use std::str::FromStr;

use crate::constants::{ADDRESS_BYTES, AMOUNT_BYTES, LEAF_DATA_BYTES, NULL_ADDRESS};
use crate::error::{ErrorCode, ProtocolResult};
use crate::hashing::{keccak256, Hash};

/// Represents the data that is hashed to form a leaf in the Merkle tree.
///
/// ## Packed Encoding Stability
///
/// The preimage is `address ‖ amount` with no separators and no prefix:
///
/// ```text
/// offset  0..20   claimant address (raw 20 bytes)
/// offset 20..52   amount (uint256, big-endian, zero-padded)
/// ```
///
/// This matches Solidity `abi.encodePacked(address, uint256)`. Changing it
/// invalidates every root and proof already handed out.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ClaimLeaf {
    /// The recipient allowed to claim.
    pub claimant: Address,
    /// Amount of base units the recipient may claim.
    pub amount: U256,
}

impl ClaimLeaf {
    pub fn new(claimant: Address, amount: U256) -> Self {
        Self { claimant, amount }
    }

    /// Parse a leaf from textual input, rejecting anything that is not in
    /// canonical fixed-width form.
    pub fn parse(claimant: &str, amount: &str) -> ProtocolResult<Self> {
        Ok(Self {
            claimant: parse_address(claimant)?,
            amount: parse_amount(amount)?,
        })
    }

    pub fn to_bytes(&self) -> [u8; LEAF_DATA_BYTES] {
        let mut data = [0u8; LEAF_DATA_BYTES];
        data[..ADDRESS_BYTES].copy_from_slice(self.claimant.as_slice());
        data[ADDRESS_BYTES..].copy_from_slice(&self.amount.to_be_bytes::<AMOUNT_BYTES>());
        data
    }

    pub fn to_hash(&self) -> Hash {
        keccak256(&self.to_bytes())
    }
}

/// Parse a 20-byte hex address with an optional `0x` prefix.
///
/// Mixed-case input is accepted without checksum validation. The null address
/// is rejected because it can never claim.
pub fn parse_address(s: &str) -> ProtocolResult<Address> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    if digits.len() != ADDRESS_BYTES * 2 {
        return Err(ErrorCode::InvalidEntry(format!(
            "address '{}' must be {} hex characters, got {}",
            trimmed,
            ADDRESS_BYTES * 2,
            digits.len()
        )));
    }

    let mut bytes = [0u8; ADDRESS_BYTES];
    hex::decode_to_slice(digits, &mut bytes).map_err(|e| {
        ErrorCode::InvalidEntry(format!("address '{}' is not valid hex: {}", trimmed, e))
    })?;

    let address = Address::new(bytes);
    if address == NULL_ADDRESS {
        return Err(ErrorCode::InvalidEntry(
            "the null address cannot receive a claim".to_string(),
        ));
    }
    Ok(address)
}

/// Parse a base-10 amount that must fit in 256 bits.
pub fn parse_amount(s: &str) -> ProtocolResult<U256> {
    let trimmed = s.trim();
    if trimmed.is_empty() || !trimmed.bytes().all(|b| b.is_ascii_digit()) {
        return Err(ErrorCode::InvalidEntry(format!(
            "amount '{}' must be a non-negative decimal integer",
            trimmed
        )));
    }
    U256::from_str(trimmed).map_err(|e| {
        ErrorCode::InvalidEntry(format!("amount '{}' does not fit in uint256: {}", trimmed, e))
    })
}
