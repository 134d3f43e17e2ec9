use airdrop_protocol::test_utils::{generate_test_entries, reference_tree};
use airdrop_protocol::{ClaimLeaf, ClaimProof, Hash};
use airdrop_protocol_merkle::{verify_claim_proof, ClaimTree};

/// Test the rs_merkle backed builder against the layer-by-layer reference
///
/// **Test flow:**
/// 1. For every size from 1 to 33, build both trees from the same entries
/// 2. Roots and every proof must match exactly
/// 3. Every proof folds back to the root
/// 4. Proof length never exceeds depth, and the longest proof equals depth
#[test]
fn test_tree_matches_reference_for_small_sizes() {
    for size in 1..=33usize {
        let entries = generate_test_entries(size);
        let leaf_hashes: Vec<Hash> = entries.iter().map(ClaimLeaf::to_hash).collect();
        let (expected_root, expected_proofs) = reference_tree(&leaf_hashes);

        let tree = ClaimTree::from_leaves(entries.clone()).unwrap();
        assert_eq!(tree.root(), expected_root, "root mismatch for {} leaves", size);

        let expected_depth = if size == 1 {
            0
        } else {
            (usize::BITS - (size - 1).leading_zeros()) as usize
        };
        assert_eq!(tree.depth(), expected_depth, "depth for {} leaves", size);

        let proofs = tree.proofs();
        assert_eq!(proofs.len(), size);

        let mut longest = 0;
        for (i, proof) in proofs.iter().enumerate() {
            assert_eq!(
                proof,
                &ClaimProof::new(expected_proofs[i].clone()),
                "proof mismatch for leaf {} of {}",
                i,
                size
            );
            assert!(verify_claim_proof(proof, &tree.root(), &entries[i]));
            assert!(proof.len() <= tree.depth());
            longest = longest.max(proof.len());
        }
        assert_eq!(longest, tree.depth(), "longest proof for {} leaves", size);
    }
}

#[test]
fn test_large_tree_proofs_verify() {
    let entries = generate_test_entries(500);
    let tree = ClaimTree::from_leaves(entries.clone()).unwrap();

    for &i in &[0usize, 1, 7, 8, 255, 256, 498, 499] {
        let proof = tree.proof_for_claimant(&entries[i].claimant).unwrap();
        assert!(
            tree.verify_proof(&entries[i].claimant, &proof).unwrap(),
            "proof should verify for leaf {} in 500-leaf tree",
            i
        );
    }
    assert_eq!(tree.depth(), 9);
}

#[test]
fn test_proof_for_wrong_root_fails() {
    let tree_a = ClaimTree::from_leaves(generate_test_entries(6)).unwrap();
    let tree_b = ClaimTree::from_leaves(generate_test_entries(7)).unwrap();

    let leaf = tree_a.leaves[3];
    let proof = tree_a.proof_for_index(3).unwrap();
    assert!(verify_claim_proof(&proof, &tree_a.root(), &leaf));
    assert!(!verify_claim_proof(&proof, &tree_b.root(), &leaf));
}
