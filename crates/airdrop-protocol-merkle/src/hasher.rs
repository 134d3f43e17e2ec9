use airdrop_protocol::{hash_sorted_pair, keccak256, Hash};
use rs_merkle::Hasher;

/// `rs_merkle` hasher that follows the claim verifier's hashing rules exactly.
///
/// ## Hashing Scheme
///
/// - **Leaf nodes**: `keccak256(leaf_data)` where `leaf_data` is the 52-byte
///   packed `address ‖ amount` encoding
/// - **Internal nodes**: `keccak256(min(a, b) ‖ max(a, b))`
/// - **Odd nodes**: a node without a right sibling is promoted unchanged
///
/// There is no leaf/internal prefix. Leaves are always 52 bytes and internal
/// preimages 64, so the two cannot be confused, and dropping the prefix keeps
/// roots compatible with Solidity verifiers.
#[derive(Clone)]
pub struct AirdropHasher;

impl Hasher for AirdropHasher {
    type Hash = Hash;

    fn hash(data: &[u8]) -> Hash {
        keccak256(data)
    }

    fn concat_and_hash(left: &Self::Hash, right: Option<&Self::Hash>) -> Self::Hash {
        match right {
            Some(right_hash) => hash_sorted_pair(left, right_hash),
            None => *left,
        }
    }
}
