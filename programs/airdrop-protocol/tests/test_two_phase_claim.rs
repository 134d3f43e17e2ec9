use airdrop_protocol::test_utils::{generate_test_entries, reference_tree, TestFixture};
use airdrop_protocol::{ClaimLeaf, ErrorCode, Hash, U256};

/// Test the split prepare / verify / commit flow
///
/// **Test flow:**
/// 1. Prepare snapshots the active root and the claim leaf
/// 2. Verify folds the proof without touching the verifier
/// 3. Commit records the claim and pays out
#[test]
fn test_prepare_verify_commit() {
    let mut test = TestFixture::new();
    test.publish_root();
    let entry = test.entries[2];

    let prepared = test
        .verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap();
    assert_eq!(prepared.root(), test.root);
    assert_eq!(*prepared.leaf(), entry);

    let verified = prepared.verify(&test.proofs[2]).unwrap();
    assert_eq!(verified.root(), test.root);
    assert!(!test.verifier.has_claimed(&entry.claimant));

    test.verifier.commit_claim(verified).unwrap();
    assert!(test.verifier.has_claimed(&entry.claimant));
    assert_eq!(test.balance_of(&entry.claimant), U256::from(500u64));
}

#[test]
fn test_verify_rejects_bad_proof() {
    let mut test = TestFixture::new();
    test.publish_root();
    let entry = test.entries[0];

    let prepared = test
        .verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap();
    assert_eq!(
        prepared.verify(&test.proofs[1]),
        Err(ErrorCode::InvalidProof)
    );
}

/// A root rotation between verify and commit turns the verified claim into
/// InvalidProof, even though the proof was valid for the snapshot.
#[test]
fn test_root_rotation_between_verify_and_commit() {
    let mut test = TestFixture::new();
    test.publish_root();
    let entry = test.entries[0];

    let verified = test
        .verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap()
        .verify(&test.proofs[0])
        .unwrap();

    let leaves: Vec<Hash> = generate_test_entries(2)
        .iter()
        .map(ClaimLeaf::to_hash)
        .collect();
    let (root2, _) = reference_tree(&leaves);
    let admin = test.admin;
    test.verifier.set_root(&admin, root2).unwrap();

    assert_eq!(
        test.verifier.commit_claim(verified),
        Err(ErrorCode::InvalidProof)
    );
    assert!(!test.verifier.has_claimed(&entry.claimant));
}

/// Two claims for the same identity that both pass verification: only the
/// first commit wins.
#[test]
fn test_double_commit_for_same_identity() {
    let mut test = TestFixture::new();
    test.publish_root();
    let entry = test.entries[1];

    let first = test
        .verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap()
        .verify(&test.proofs[1])
        .unwrap();
    let second = first.clone();

    test.verifier.commit_claim(first).unwrap();
    assert_eq!(
        test.verifier.commit_claim(second),
        Err(ErrorCode::AlreadyClaimed(entry.claimant))
    );
    assert_eq!(test.balance_of(&entry.claimant), U256::from(200u64));
}

#[test]
fn test_ceiling_lowered_between_prepare_and_commit() {
    let mut test = TestFixture::new();
    test.publish_root();
    let entry = test.entries[2];

    let verified = test
        .verifier
        .prepare_claim(&entry.claimant, entry.amount)
        .unwrap()
        .verify(&test.proofs[2])
        .unwrap();

    let admin = test.admin;
    test.verifier
        .set_max_claim_amount(&admin, U256::from(499u64))
        .unwrap();

    assert!(matches!(
        test.verifier.commit_claim(verified),
        Err(ErrorCode::AmountTooHigh { .. })
    ));
}
