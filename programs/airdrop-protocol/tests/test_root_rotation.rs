use airdrop_protocol::test_utils::{generate_test_entries, reference_tree, TestFixture};
use airdrop_protocol::{AirdropEvent, ClaimKeyScheme, ClaimLeaf, ClaimProof, ErrorCode, Hash};

fn disjoint_tree() -> (Vec<ClaimLeaf>, Hash, Vec<ClaimProof>) {
    let entries = generate_test_entries(4);
    let leaves: Vec<Hash> = entries.iter().map(ClaimLeaf::to_hash).collect();
    let (root, proofs) = reference_tree(&leaves);
    (
        entries,
        root,
        proofs.into_iter().map(ClaimProof::new).collect(),
    )
}

/// Test that replacing the root invalidates proofs against the old root
///
/// **Test flow:**
/// 1. Publish R built from the sample entries
/// 2. Publish R2 built from a disjoint entry set
/// 3. A never-used proof against R now fails with InvalidProof
/// 4. Entries of R2 can claim
#[test]
fn test_root_rotation_invalidates_old_proofs() {
    let mut test = TestFixture::new();
    test.publish_root();

    let (entries2, root2, proofs2) = disjoint_tree();
    let admin = test.admin;
    test.verifier.set_root(&admin, root2).unwrap();

    assert_eq!(test.verifier.current_root(), Some(root2));
    assert_eq!(
        test.verifier.events().last(),
        Some(&AirdropEvent::RootUpdated {
            previous: Some(test.root),
            root: root2,
        })
    );

    assert_eq!(test.claim(0), Err(ErrorCode::InvalidProof));
    assert!(!test.verifier.has_claimed(&test.entries[0].claimant));

    test.verifier
        .claim(&entries2[2].claimant, entries2[2].amount, &proofs2[2])
        .unwrap();
}

/// Under the global scheme, claiming under R blocks the same identity under
/// any later root.
#[test]
fn test_global_scheme_claim_survives_rotation() {
    let mut test = TestFixture::new();
    test.publish_root();
    test.claim(0).unwrap();

    // New tree that contains the same claimant again
    let mut entries2 = generate_test_entries(3);
    entries2[1] = test.entries[0];
    let leaves: Vec<Hash> = entries2.iter().map(ClaimLeaf::to_hash).collect();
    let (root2, proofs2) = reference_tree(&leaves);

    let admin = test.admin;
    test.verifier.set_root(&admin, root2).unwrap();

    let claimant = test.entries[0].claimant;
    assert!(test.verifier.has_claimed(&claimant));
    assert_eq!(
        test.verifier.claim(
            &claimant,
            entries2[1].amount,
            &ClaimProof::new(proofs2[1].clone())
        ),
        Err(ErrorCode::AlreadyClaimed(claimant))
    );
}

/// Under the per-root scheme each root has its own claim namespace.
///
/// **Test flow:**
/// 1. Claim under R
/// 2. Rotate to R2 that contains the same claimant; claiming again succeeds
/// 3. Rotate back to R; the original claim still blocks a replay
#[test]
fn test_per_root_scheme_isolates_rounds() {
    let mut test = TestFixture::with_entries(
        airdrop_protocol::test_utils::sample_entries(),
        ClaimKeyScheme::PerRoot,
    );
    test.publish_root();
    test.claim(0).unwrap();

    let claimant = test.entries[0].claimant;
    let mut entries2 = generate_test_entries(3);
    entries2[1] = test.entries[0];
    let leaves: Vec<Hash> = entries2.iter().map(ClaimLeaf::to_hash).collect();
    let (root2, proofs2) = reference_tree(&leaves);

    let admin = test.admin;
    test.verifier.set_root(&admin, root2).unwrap();
    assert!(!test.verifier.has_claimed(&claimant));

    test.verifier
        .claim(
            &claimant,
            entries2[1].amount,
            &ClaimProof::new(proofs2[1].clone()),
        )
        .unwrap();
    assert!(test.verifier.has_claimed(&claimant));

    let root1 = test.root;
    test.verifier.set_root(&admin, root1).unwrap();
    assert!(test.verifier.has_claimed(&claimant));
    assert_eq!(test.claim(0), Err(ErrorCode::AlreadyClaimed(claimant)));

    assert_eq!(test.verifier.state().claims.len(), 2);
}

#[test]
fn test_set_root_keeps_claim_records() {
    let mut test = TestFixture::new();
    test.publish_root();
    test.claim(2).unwrap();

    let (_, root2, _) = disjoint_tree();
    let admin = test.admin;
    test.verifier.set_root(&admin, root2).unwrap();

    assert_eq!(test.verifier.state().claims.len(), 1);
}
