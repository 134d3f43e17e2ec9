//! Hashing rules shared by the tree builder and the claim verifier.
//!
//! Every rule that decides whether a proof is accepted lives here:
//!
//! - **Hash function**: Keccak-256.
//! - **Leaf**: `keccak256(address[20] ‖ amount_be[32])`, see [`crate::ClaimLeaf`].
//! - **Internal node**: `keccak256(min(a, b) ‖ max(a, b))`, hashes compared as
//!   big-endian byte strings.
//! - **Odd node**: carried up to the next layer unchanged.
//!
//! No prefix bytes are mixed in, so roots and proofs are interchangeable with
//! `merkletreejs` (`sortPairs: true`) and OpenZeppelin's `MerkleProof`.

use sha3::{Digest, Keccak256};

use crate::constants::HASH_BYTES;

pub type Hash = [u8; HASH_BYTES];

pub fn keccak256(data: &[u8]) -> Hash {
    Keccak256::digest(data).into()
}

/// Hash two sibling nodes. The result does not depend on argument order.
pub fn hash_sorted_pair(a: &Hash, b: &Hash) -> Hash {
    let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
    Keccak256::new()
        .chain_update(lo)
        .chain_update(hi)
        .finalize()
        .into()
}

/// Fold a bottom-up sibling path onto a leaf and return the implied root.
pub fn fold_proof(leaf: Hash, proof: &[Hash]) -> Hash {
    proof
        .iter()
        .fold(leaf, |acc, sibling| hash_sorted_pair(&acc, sibling))
}

/// Parse a 32-byte hash from hex, with or without a `0x` prefix.
pub fn parse_hash(s: &str) -> Result<Hash, String> {
    let trimmed = s.trim();
    let digits = trimmed.strip_prefix("0x").unwrap_or(trimmed);
    let bytes = hex::decode(digits).map_err(|e| format!("invalid hex '{}': {}", trimmed, e))?;
    bytes
        .try_into()
        .map_err(|b: Vec<u8>| format!("expected {} bytes, got {}", HASH_BYTES, b.len()))
}

/// `0x`-prefixed lowercase hex.
pub fn format_hash(hash: &Hash) -> String {
    format!("0x{}", hex::encode(hash))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn h(s: &str) -> Hash {
        parse_hash(s).unwrap()
    }

    #[test]
    fn test_keccak256_known_vectors() {
        assert_eq!(
            keccak256(b""),
            h("c5d2460186f7233c927e7db2dcc703c0e500b653ca82273b7bfad8045d85a470")
        );
        assert_eq!(
            keccak256(b"abc"),
            h("4e03657aea45a94fc7d47ba826c8d667c0d1e6e33a64a036ec44f58fa12d6c45")
        );
    }

    #[test]
    fn test_hash_sorted_pair_is_order_independent() {
        let a = [1u8; 32];
        let b = [2u8; 32];

        assert_eq!(hash_sorted_pair(&a, &b), hash_sorted_pair(&b, &a));

        let mut concatenated = Vec::with_capacity(64);
        concatenated.extend_from_slice(&a);
        concatenated.extend_from_slice(&b);
        assert_eq!(hash_sorted_pair(&b, &a), keccak256(&concatenated));
    }

    #[test]
    fn test_hash_sorted_pair_vector() {
        let left = h("1e95027f46eef0cc2297e2eb36304b1c740b3a1b5cfa702b1463e3742c3ce039");
        let right = h("c2029010779b44ac592194c9f76acb4365231b30f0f0f7d97ba2b5babdb2a369");

        assert_eq!(
            hash_sorted_pair(&right, &left),
            h("2c5db01f3853db37b7b03d6a9751a498cfa6c878198e397c158704ce637fd28c")
        );
    }

    #[test]
    fn test_fold_empty_proof_returns_leaf() {
        let leaf = [7u8; 32];
        assert_eq!(fold_proof(leaf, &[]), leaf);
    }

    #[test]
    fn test_parse_hash() {
        let hash = [0xabu8; 32];
        let encoded = format_hash(&hash);
        assert!(encoded.starts_with("0x"));
        assert_eq!(parse_hash(&encoded).unwrap(), hash);
        assert_eq!(parse_hash(&encoded[2..]).unwrap(), hash);

        assert!(parse_hash("0x1234").is_err());
        assert!(parse_hash("not hex").is_err());
    }
}
