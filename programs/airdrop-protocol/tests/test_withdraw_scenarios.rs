use airdrop_protocol::test_utils::{sample_entries, TestFixture, TEST_POOL_FUNDING};
use airdrop_protocol::{AirdropEvent, ClaimKeyScheme, ErrorCode, RoundStatus, U256};

/// Test that a fully claimed pool cannot be withdrawn from
///
/// **Test flow:**
/// 1. Fund the verifier with exactly the sum of all entries
/// 2. Claim every entry
/// 3. Verify the held balance is zero and Withdraw fails with InsufficientBalance
#[test]
fn test_withdraw_after_all_entries_claimed() {
    let mut test =
        TestFixture::with_funding(sample_entries(), ClaimKeyScheme::Global, U256::from(800u64));
    test.publish_root();

    for i in 0..test.entries.len() {
        test.claim(i).unwrap();
    }
    assert_eq!(test.verifier.held_balance(), U256::ZERO);

    let admin = test.admin;
    assert_eq!(
        test.verifier.withdraw(&admin),
        Err(ErrorCode::InsufficientBalance)
    );
}

#[test]
fn test_withdraw_sends_everything_to_admin() {
    let mut test = TestFixture::new();
    test.publish_root();
    test.claim(0).unwrap();

    let admin = test.admin;
    let withdrawn = test.verifier.withdraw(&admin).unwrap();

    assert_eq!(withdrawn, U256::from(TEST_POOL_FUNDING - 100));
    assert_eq!(test.balance_of(&admin), withdrawn);
    assert_eq!(test.verifier.held_balance(), U256::ZERO);

    // Claim records are untouched
    assert!(test.verifier.has_claimed(&test.entries[0].claimant));
    assert!(!test.verifier.has_claimed(&test.entries[1].claimant));
    assert_eq!(
        test.verifier.events().last(),
        Some(&AirdropEvent::Withdrawn {
            to: admin,
            amount: withdrawn,
        })
    );

    // Nothing left to pay the remaining claimants with
    assert!(matches!(test.claim(1), Err(ErrorCode::TransferFailed(_))));
    assert!(!test.verifier.has_claimed(&test.entries[1].claimant));
}

#[test]
fn test_withdraw_before_root_published() {
    let mut test = TestFixture::new();
    let admin = test.admin;

    assert_eq!(test.verifier.status(), RoundStatus::NoRootPublished);
    assert_eq!(
        test.verifier.withdraw(&admin).unwrap(),
        U256::from(TEST_POOL_FUNDING)
    );
}

#[test]
fn test_withdraw_with_nothing_funded() {
    let mut test = TestFixture::with_funding(sample_entries(), ClaimKeyScheme::Global, U256::ZERO);
    let admin = test.admin;

    assert_eq!(
        test.verifier.withdraw(&admin),
        Err(ErrorCode::InsufficientBalance)
    );
    assert!(test.verifier.events().is_empty());
}
