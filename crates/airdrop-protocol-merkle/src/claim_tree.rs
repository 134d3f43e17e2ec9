use airdrop_protocol::{
    format_hash, Address, ClaimLeaf, ClaimProof, ErrorCode, Hash, NULL_ADDRESS, U256,
};
use rs_merkle::MerkleTree;
use std::collections::HashMap;
use std::fmt;
use tracing::{debug, warn};

use crate::{AirdropHasher, ClaimTreeError, ClaimTreeResult};

/// Build a claim tree from `(claimant, amount)` pairs, in input order.
///
/// Leaf order is significant: the same entries in a different order produce a
/// different root. The null address is rejected because it can never claim.
pub fn create_claim_tree(entries: &[(Address, U256)]) -> ClaimTreeResult<ClaimTree> {
    let leaves = entries
        .iter()
        .enumerate()
        .map(|(index, (claimant, amount))| {
            if *claimant == NULL_ADDRESS {
                return Err(ClaimTreeError::InvalidEntry {
                    index,
                    reason: "the null address cannot receive a claim".to_string(),
                });
            }
            Ok(ClaimLeaf::new(*claimant, *amount))
        })
        .collect::<ClaimTreeResult<Vec<_>>>()?;

    ClaimTree::from_leaves(leaves)
}

/// Build a claim tree from textual rows, e.g. straight out of a CSV file.
///
/// Addresses must be exactly 20 bytes of hex (optional `0x`), amounts plain
/// decimal that fits in 256 bits.
pub fn create_claim_tree_from_rows<A, B>(rows: &[(A, B)]) -> ClaimTreeResult<ClaimTree>
where
    A: AsRef<str>,
    B: AsRef<str>,
{
    let leaves = rows
        .iter()
        .enumerate()
        .map(|(index, (claimant, amount))| {
            ClaimLeaf::parse(claimant.as_ref(), amount.as_ref()).map_err(|e| {
                ClaimTreeError::InvalidEntry {
                    index,
                    reason: match e {
                        ErrorCode::InvalidEntry(reason) => reason,
                        other => other.to_string(),
                    },
                }
            })
        })
        .collect::<ClaimTreeResult<Vec<_>>>()?;

    ClaimTree::from_leaves(leaves)
}

/// Layers above `leaf_count` leaves. Each layer halves the node count,
/// rounding up for the carried odd node, so a lone leaf is its own root.
fn depth_for(leaf_count: usize) -> usize {
    match leaf_count {
        0 | 1 => 0,
        n => (usize::BITS - (n - 1).leading_zeros()) as usize,
    }
}

/// Result of building a merkle tree from claim leaves
#[derive(Clone)]
pub struct ClaimTree {
    /// The underlying merkle tree
    pub tree: MerkleTree<AirdropHasher>,
    /// The original leaves, in input order
    pub leaves: Vec<ClaimLeaf>,
    /// Mapping from claimant to the index of their first leaf
    pub claimant_leaf_index: HashMap<Address, usize>,
    root: Hash,
    duplicates: Vec<Address>,
}

impl fmt::Debug for ClaimTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClaimTree")
            .field("root", &format_hash(&self.root))
            .field("leaf_count", &self.leaves.len())
            .field("depth", &self.depth())
            .field("duplicates", &self.duplicates)
            .finish_non_exhaustive()
    }
}

impl ClaimTree {
    /// Build a merkle tree from a list of claim leaves
    ///
    /// Duplicate claimants are kept as distinct leaves. Lookups by claimant
    /// resolve to the first occurrence; later ones stay reachable by index.
    pub fn from_leaves(leaves: Vec<ClaimLeaf>) -> ClaimTreeResult<Self> {
        if leaves.is_empty() {
            return Err(ClaimTreeError::NoEntries);
        }

        let mut claimant_leaf_index: HashMap<Address, usize> = HashMap::new();
        let mut duplicates = Vec::new();
        for (index, leaf) in leaves.iter().enumerate() {
            if let Some(&first_index) = claimant_leaf_index.get(&leaf.claimant) {
                warn!(
                    claimant = %leaf.claimant,
                    first_index,
                    duplicate_index = index,
                    "Duplicate claimant in distribution; only the first entry is reachable by address"
                );
                if !duplicates.contains(&leaf.claimant) {
                    duplicates.push(leaf.claimant);
                }
                continue;
            }
            claimant_leaf_index.insert(leaf.claimant, index);
        }

        let leaf_hashes: Vec<Hash> = leaves.iter().map(ClaimLeaf::to_hash).collect();
        let tree = MerkleTree::<AirdropHasher>::from_leaves(&leaf_hashes);
        let root = tree.root().ok_or(ClaimTreeError::MissingRoot)?;

        debug!(
            leaves = leaves.len(),
            depth = depth_for(leaves.len()),
            root = %format_hash(&root),
            "Built claim tree"
        );

        Ok(ClaimTree {
            tree,
            leaves,
            claimant_leaf_index,
            root,
            duplicates,
        })
    }

    pub fn root(&self) -> Hash {
        self.root
    }

    /// Number of layers between the leaves and the root, `ceil(log2(n))`.
    /// Upper bound on the length of any proof.
    pub fn depth(&self) -> usize {
        depth_for(self.leaves.len())
    }

    pub fn leaf_count(&self) -> usize {
        self.leaves.len()
    }

    pub fn leaf_hash(&self, index: usize) -> ClaimTreeResult<Hash> {
        self.leaf_at(index).map(ClaimLeaf::to_hash)
    }

    pub fn proof_for_index(&self, index: usize) -> ClaimTreeResult<ClaimProof> {
        self.leaf_at(index)?;
        let proof = self.tree.proof(&[index]);
        Ok(ClaimProof::new(proof.proof_hashes().to_vec()))
    }

    /// Proof for the first leaf belonging to `claimant`.
    pub fn proof_for_claimant(&self, claimant: &Address) -> ClaimTreeResult<ClaimProof> {
        self.proof_for_index(self.index_of(claimant)?)
    }

    /// One proof per leaf, aligned with [`Self::leaves`].
    pub fn proofs(&self) -> Vec<ClaimProof> {
        (0..self.leaves.len())
            .map(|index| ClaimProof::new(self.tree.proof(&[index]).proof_hashes().to_vec()))
            .collect()
    }

    pub fn leaf_for_claimant(&self, claimant: &Address) -> ClaimTreeResult<&ClaimLeaf> {
        self.leaf_at(self.index_of(claimant)?)
    }

    pub fn index_of(&self, claimant: &Address) -> ClaimTreeResult<usize> {
        self.claimant_leaf_index
            .get(claimant)
            .copied()
            .ok_or(ClaimTreeError::ClaimantNotFound(*claimant))
    }

    /// Verify a proof for the first leaf belonging to `claimant`.
    pub fn verify_proof(&self, claimant: &Address, proof: &ClaimProof) -> ClaimTreeResult<bool> {
        let leaf = self.leaf_for_claimant(claimant)?;
        Ok(proof.verify(&self.root, leaf))
    }

    /// Claimants that appear more than once, in order of first duplication.
    pub fn duplicate_claimants(&self) -> &[Address] {
        &self.duplicates
    }

    /// Sum of all leaf amounts, or `None` if it does not fit in 256 bits.
    pub fn total_amount(&self) -> Option<U256> {
        self.leaves
            .iter()
            .try_fold(U256::ZERO, |acc, leaf| acc.checked_add(leaf.amount))
    }

    fn leaf_at(&self, index: usize) -> ClaimTreeResult<&ClaimLeaf> {
        self.leaves
            .get(index)
            .ok_or(ClaimTreeError::LeafIndexOutOfBounds {
                index,
                leaf_count: self.leaves.len(),
            })
    }
}
