use airdrop_protocol::test_utils::{TestFixture, TEST_MAX_CLAIM_AMOUNT};
use airdrop_protocol::{ClaimKeyScheme, ClaimLeaf, ClaimProof, ErrorCode, NULL_ADDRESS, U256};

#[test]
fn test_claim_before_root_published() {
    let mut test = TestFixture::new();

    assert_eq!(test.claim(0), Err(ErrorCode::NoRootPublished));
    assert!(!test.verifier.has_claimed(&test.entries[0].claimant));
}

#[test]
fn test_claim_from_null_identity() {
    let mut test = TestFixture::new();
    test.publish_root();

    let proof = test.proofs[0].clone();
    assert_eq!(
        test.verifier
            .claim(&NULL_ADDRESS, U256::from(100u64), &proof),
        Err(ErrorCode::Unauthorized(NULL_ADDRESS))
    );

    // Rejected even before a root exists
    let mut fresh = TestFixture::new();
    assert_eq!(
        fresh
            .verifier
            .claim(&NULL_ADDRESS, U256::from(1u64), &ClaimProof::default()),
        Err(ErrorCode::Unauthorized(NULL_ADDRESS))
    );
}

/// A proof that is valid for an amount above the ceiling still fails with
/// AmountTooHigh.
#[test]
fn test_claim_amount_exceeds_ceiling() {
    let mut entries = airdrop_protocol::test_utils::sample_entries();
    entries[1].amount = U256::from(TEST_MAX_CLAIM_AMOUNT + 1);
    let mut test = TestFixture::with_entries(entries, ClaimKeyScheme::Global);
    test.publish_root();

    let claimant = test.entries[1].claimant;
    assert_eq!(
        test.claim(1),
        Err(ErrorCode::AmountTooHigh {
            amount: U256::from(TEST_MAX_CLAIM_AMOUNT + 1),
            max_claim_amount: U256::from(TEST_MAX_CLAIM_AMOUNT),
        })
    );
    assert!(!test.verifier.has_claimed(&claimant));

    // Raising the ceiling makes the same proof acceptable
    let admin = test.admin;
    test.verifier
        .set_max_claim_amount(&admin, U256::from(TEST_MAX_CLAIM_AMOUNT + 1))
        .unwrap();
    test.claim(1).unwrap();
    assert!(test.verifier.has_claimed(&claimant));
}

#[test]
fn test_claim_amount_at_ceiling_is_allowed() {
    let mut entries = airdrop_protocol::test_utils::sample_entries();
    entries[0].amount = U256::from(TEST_MAX_CLAIM_AMOUNT);
    let mut test = TestFixture::with_entries(entries, ClaimKeyScheme::Global);
    test.publish_root();

    test.claim(0).unwrap();
}

#[test]
fn test_claim_wrong_amount() {
    let mut test = TestFixture::new();
    test.publish_root();

    let entry = test.entries[0];
    let proof = test.proofs[0].clone();
    assert_eq!(
        test.verifier
            .claim(&entry.claimant, U256::from(101u64), &proof),
        Err(ErrorCode::InvalidProof)
    );
    assert!(!test.verifier.has_claimed(&entry.claimant));
}

#[test]
fn test_claim_with_another_claimants_proof() {
    let mut test = TestFixture::new();
    test.publish_root();

    let entry = test.entries[0];
    let proof = test.proofs[1].clone();
    assert_eq!(
        test.verifier.claim(&entry.claimant, entry.amount, &proof),
        Err(ErrorCode::InvalidProof)
    );
}

#[test]
fn test_claim_invalid_merkle_proof_byte_mutations() {
    let mut test = TestFixture::new();
    test.publish_root();

    let ClaimLeaf { claimant, amount } = test.entries[0];
    let original = test.proofs[0].clone();

    for node in 0..original.len() {
        for byte in 0..32 {
            let mut hashes = original.clone().into_inner();
            hashes[node][byte] ^= 0x01;
            let mutated = ClaimProof::new(hashes);

            assert_eq!(
                test.verifier.claim(&claimant, amount, &mutated),
                Err(ErrorCode::InvalidProof),
                "mutation at node {} byte {} was accepted",
                node,
                byte
            );
        }
    }

    // Truncated and extended proofs
    let mut truncated = original.clone().into_inner();
    truncated.pop();
    assert_eq!(
        test.verifier
            .claim(&claimant, amount, &ClaimProof::new(truncated)),
        Err(ErrorCode::InvalidProof)
    );
    let mut extended = original.clone().into_inner();
    extended.push([0u8; 32]);
    assert_eq!(
        test.verifier
            .claim(&claimant, amount, &ClaimProof::new(extended)),
        Err(ErrorCode::InvalidProof)
    );

    assert!(!test.verifier.has_claimed(&claimant));
    test.claim(0).unwrap();
}

/// Ceiling is checked before the claim record, so a replay above the ceiling
/// reports AmountTooHigh.
#[test]
fn test_check_order() {
    let mut test = TestFixture::new();
    test.publish_root();
    test.claim(0).unwrap();

    let claimant = test.entries[0].claimant;
    let proof = test.proofs[0].clone();
    assert!(matches!(
        test.verifier
            .claim(&claimant, U256::from(TEST_MAX_CLAIM_AMOUNT + 1), &proof),
        Err(ErrorCode::AmountTooHigh { .. })
    ));
    assert_eq!(
        test.verifier
            .claim(&claimant, U256::from(1u64), &ClaimProof::default()),
        Err(ErrorCode::AlreadyClaimed(claimant))
    );
}
