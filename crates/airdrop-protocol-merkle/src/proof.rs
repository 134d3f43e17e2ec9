use airdrop_protocol::{ClaimLeaf, ClaimProof, Hash};
use rs_merkle::MerkleTree;

use crate::{AirdropHasher, ClaimTreeError, ClaimTreeResult};

/// Verify a merkle proof against a root and leaf data.
///
/// Uses the exact fold the claim verifier runs, so a proof accepted here is
/// accepted at claim time (as long as the root has not been replaced).
pub fn verify_claim_proof(proof: &ClaimProof, root: &Hash, leaf: &ClaimLeaf) -> bool {
    proof.verify(root, leaf)
}

/// Generate a proof for a specific leaf in a list of leaves.
///
/// Builds the whole tree, so prefer [`crate::ClaimTree`] when generating more
/// than a handful of proofs. Matches the first leaf equal to `target_leaf`.
pub fn generate_proof_for_leaf(
    leaves: &[ClaimLeaf],
    target_leaf: &ClaimLeaf,
) -> ClaimTreeResult<ClaimProof> {
    let leaf_index = leaves
        .iter()
        .position(|leaf| leaf == target_leaf)
        .ok_or(ClaimTreeError::ClaimantNotFound(target_leaf.claimant))?;

    let leaf_hashes: Vec<Hash> = leaves.iter().map(ClaimLeaf::to_hash).collect();
    let tree = MerkleTree::<AirdropHasher>::from_leaves(&leaf_hashes);
    let proof = tree.proof(&[leaf_index]);

    Ok(ClaimProof::new(proof.proof_hashes().to_vec()))
}

/// Batch verify multiple proofs against the same root
pub fn batch_verify_proofs(proofs: &[(&ClaimProof, &ClaimLeaf)], root: &Hash) -> Vec<bool> {
    proofs
        .iter()
        .map(|(proof, leaf)| verify_claim_proof(proof, root, leaf))
        .collect()
}

/// The root a proof and leaf imply. Handy for checking which published root a
/// recipient's proof belongs to.
pub fn extract_root_from_proof(proof: &ClaimProof, leaf: &ClaimLeaf) -> Hash {
    proof.compute_root(leaf)
}

#[cfg(test)]
mod tests {
    use super::*;
    use airdrop_protocol::test_utils::{deterministic_address, sample_entries};
    use airdrop_protocol::U256;

    fn tree_root(leaves: &[ClaimLeaf]) -> Hash {
        let leaf_hashes: Vec<Hash> = leaves.iter().map(ClaimLeaf::to_hash).collect();
        MerkleTree::<AirdropHasher>::from_leaves(&leaf_hashes)
            .root()
            .unwrap()
    }

    #[test]
    fn test_generate_and_verify_proof() {
        let leaves = sample_entries();
        let target_leaf = &leaves[1];

        let proof = generate_proof_for_leaf(&leaves, target_leaf).unwrap();
        let root = tree_root(&leaves);

        assert!(verify_claim_proof(&proof, &root, target_leaf));
        assert!(!verify_claim_proof(&proof, &root, &leaves[0]));
    }

    #[test]
    fn test_extract_root_from_proof() {
        let leaves = sample_entries();
        let proof = generate_proof_for_leaf(&leaves, &leaves[2]).unwrap();

        assert_eq!(extract_root_from_proof(&proof, &leaves[2]), tree_root(&leaves));
    }

    #[test]
    fn test_batch_verify_proofs() {
        let leaves = sample_entries();
        let root = tree_root(&leaves);
        let proofs: Vec<ClaimProof> = leaves
            .iter()
            .map(|leaf| generate_proof_for_leaf(&leaves, leaf).unwrap())
            .collect();

        let mut batch: Vec<(&ClaimProof, &ClaimLeaf)> = proofs.iter().zip(leaves.iter()).collect();
        assert_eq!(batch_verify_proofs(&batch, &root), vec![true, true, true]);

        batch.swap(0, 1);
        batch[0].1 = &leaves[0];
        assert_eq!(batch_verify_proofs(&batch, &root), vec![false, true, true]);
    }

    #[test]
    fn test_leaf_not_found_error() {
        let leaves = sample_entries();
        let stranger = ClaimLeaf::new(deterministic_address("stranger"), U256::from(999u64));

        assert_eq!(
            generate_proof_for_leaf(&leaves, &stranger),
            Err(ClaimTreeError::ClaimantNotFound(stranger.claimant))
        );
    }
}
