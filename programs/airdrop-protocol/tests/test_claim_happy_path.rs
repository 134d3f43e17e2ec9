use airdrop_protocol::test_utils::{TestFixture, TEST_POOL_FUNDING};
use airdrop_protocol::{
    parse_hash, AirdropEvent, ClaimLeaf, ClaimProof, ErrorCode, RoundStatus, U256,
};

/// Test the three-entry sample distribution end to end
///
/// **Test flow:**
/// 1. Build the sample tree and check its root against the known vector
/// 2. Publish the root
/// 3. Claim for 0xaa.. with amount 100 and its proof
/// 4. Verify balances, claim record and emitted events
/// 5. Repeat the identical call and expect AlreadyClaimed
#[test]
fn test_claim_tokens_happy_path() {
    let mut test = TestFixture::new();

    // 1. Known root for the sample entries
    assert_eq!(
        test.root,
        parse_hash("0x2f47b66456eba143cfc2b9f454da0121fbc0428141d31ecf46cb5aebf8de7b03").unwrap()
    );

    // 2. Publish
    test.publish_root();
    assert_eq!(test.verifier.current_root(), Some(test.root));
    assert_eq!(test.verifier.status(), RoundStatus::RootActive);

    // 3. Claim
    let claimant = test.entries[0].claimant;
    assert!(!test.verifier.has_claimed(&claimant));
    test.claim(0).expect("first claim should succeed");

    // 4. Effects
    assert!(test.verifier.has_claimed(&claimant));
    assert_eq!(test.balance_of(&claimant), U256::from(100u64));
    assert_eq!(
        test.verifier.held_balance(),
        U256::from(TEST_POOL_FUNDING - 100)
    );

    let events = test.verifier.drain_events();
    assert_eq!(
        events,
        vec![
            AirdropEvent::RootUpdated {
                previous: None,
                root: test.root,
            },
            AirdropEvent::Claimed {
                claimant,
                amount: U256::from(100u64),
                root: test.root,
            },
        ]
    );
    assert!(test.verifier.events().is_empty());

    // 5. Replay
    assert_eq!(test.claim(0), Err(ErrorCode::AlreadyClaimed(claimant)));
    assert_eq!(test.balance_of(&claimant), U256::from(100u64));
    assert!(test.verifier.drain_events().is_empty());
}

#[test]
fn test_every_sample_entry_can_claim_once() {
    let mut test = TestFixture::new();
    test.publish_root();

    for i in 0..test.entries.len() {
        test.claim(i).unwrap();
    }

    for entry in test.entries.clone() {
        assert!(test.verifier.has_claimed(&entry.claimant));
        assert_eq!(test.balance_of(&entry.claimant), entry.amount);
    }
    assert_eq!(
        test.verifier.held_balance(),
        U256::from(TEST_POOL_FUNDING - 800)
    );
    assert_eq!(test.verifier.state().claims.len(), 3);
}

#[test]
fn test_claim_with_proof_from_external_hex() {
    let mut test = TestFixture::new();
    test.publish_root();

    // 0xcc.. sits alone at the first layer, so its proof is one hash deep
    let proof = ClaimProof::from_hex(&[
        "0x2c5db01f3853db37b7b03d6a9751a498cfa6c878198e397c158704ce637fd28c",
    ])
    .unwrap();
    let leaf = ClaimLeaf::parse(&"cc".repeat(20), "500").unwrap();

    test.verifier
        .claim(&leaf.claimant, leaf.amount, &proof)
        .unwrap();
    assert_eq!(test.balance_of(&leaf.claimant), U256::from(500u64));
}
