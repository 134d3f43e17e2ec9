use crate::claim_leaf::ClaimLeaf;
use crate::error::{ErrorCode, ProtocolResult};
use crate::hashing::{fold_proof, format_hash, parse_hash, Hash};

/// Binary merkle proof: sibling hashes from the leaf up to the root.
///
/// There are no left/right flags. Each step hashes the running value with its
/// sibling as a sorted pair, so position is implied by the sort.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ClaimProof(pub Vec<Hash>);

impl ClaimProof {
    pub fn new(proof: Vec<Hash>) -> Self {
        Self(proof)
    }

    /// Parse proof elements from hex strings (each with or without `0x`).
    pub fn from_hex<S: AsRef<str>>(elements: &[S]) -> ProtocolResult<Self> {
        elements
            .iter()
            .map(|s| parse_hash(s.as_ref()).map_err(ErrorCode::InvalidEntry))
            .collect::<ProtocolResult<Vec<Hash>>>()
            .map(Self)
    }

    pub fn to_hex(&self) -> Vec<String> {
        self.0.iter().map(format_hash).collect()
    }

    pub fn as_slice(&self) -> &[Hash] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn into_inner(self) -> Vec<Hash> {
        self.0
    }

    /// The root implied by this proof for `leaf`.
    pub fn compute_root(&self, leaf: &ClaimLeaf) -> Hash {
        fold_proof(leaf.to_hash(), &self.0)
    }

    pub fn verify(&self, root: &Hash, leaf: &ClaimLeaf) -> bool {
        self.compute_root(leaf) == *root
    }
}

impl From<Vec<Hash>> for ClaimProof {
    fn from(proof: Vec<Hash>) -> Self {
        Self::new(proof)
    }
}
