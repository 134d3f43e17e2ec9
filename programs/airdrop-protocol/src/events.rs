use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};

use crate::hashing::Hash;

/// Emitted by every successful state change of a [`crate::ClaimVerifier`].
///
/// Serializes as an internally tagged object, e.g.
/// `{"event":"withdrawn","to":"0x..","amount":"0x3e8"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum AirdropEvent {
    RootUpdated {
        previous: Option<Hash>,
        root: Hash,
    },
    MaxClaimAmountUpdated {
        previous: U256,
        max_claim_amount: U256,
    },
    Claimed {
        claimant: Address,
        amount: U256,
        root: Hash,
    },
    Withdrawn {
        to: Address,
        amount: U256,
    },
    RoundRetired {
        swept_to: Address,
        swept: U256,
    },
}
