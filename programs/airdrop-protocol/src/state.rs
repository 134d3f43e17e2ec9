use alloy_primitives::{Address, U256};
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

use crate::constants::default_max_claim_amount;
use crate::hashing::Hash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundStatus {
    #[default]
    NoRootPublished, // Deployed, waiting for the administrator to publish a root
    RootActive,      // Accepting claims against the published root
    Retired,         // Final sweep done, no further claims or root changes
}

impl RoundStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            RoundStatus::NoRootPublished => "no_root_published",
            RoundStatus::RootActive => "root_active",
            RoundStatus::Retired => "retired",
        }
    }
}

impl fmt::Display for RoundStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoundStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "no_root_published" => Ok(RoundStatus::NoRootPublished),
            "root_active" => Ok(RoundStatus::RootActive),
            "retired" => Ok(RoundStatus::Retired),
            other => Err(format!("unknown round status '{}'", other)),
        }
    }
}

/// How claim records are keyed.
///
/// `Global` is the original behavior: one flag per identity for the lifetime
/// of the round. Replacing the root therefore leaves anyone who claimed under
/// the old root unable to claim under the new one.
///
/// `PerRoot` keys records by `(root, identity)`, so each published root has
/// its own claim namespace.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ClaimKeyScheme {
    #[default]
    Global,
    PerRoot,
}

impl ClaimKeyScheme {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClaimKeyScheme::Global => "global",
            ClaimKeyScheme::PerRoot => "per_root",
        }
    }
}

impl fmt::Display for ClaimKeyScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ClaimKeyScheme {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "global" => Ok(ClaimKeyScheme::Global),
            "per_root" => Ok(ClaimKeyScheme::PerRoot),
            other => Err(format!("unknown claim key scheme '{}'", other)),
        }
    }
}

/// A single claim record. `root` is `None` under [`ClaimKeyScheme::Global`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ClaimKey {
    pub root: Option<Hash>,
    pub claimant: Address,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ClaimRecords {
    scheme: ClaimKeyScheme,
    claimed: BTreeSet<ClaimKey>,
}

impl ClaimRecords {
    pub fn new(scheme: ClaimKeyScheme) -> Self {
        Self {
            scheme,
            claimed: BTreeSet::new(),
        }
    }

    pub fn from_keys(scheme: ClaimKeyScheme, keys: impl IntoIterator<Item = ClaimKey>) -> Self {
        Self {
            scheme,
            claimed: keys.into_iter().collect(),
        }
    }

    pub fn scheme(&self) -> ClaimKeyScheme {
        self.scheme
    }

    pub fn key_for(&self, root: &Hash, claimant: &Address) -> ClaimKey {
        ClaimKey {
            root: match self.scheme {
                ClaimKeyScheme::Global => None,
                ClaimKeyScheme::PerRoot => Some(*root),
            },
            claimant: *claimant,
        }
    }

    pub fn contains(&self, key: &ClaimKey) -> bool {
        self.claimed.contains(key)
    }

    /// Returns false if the key was already present.
    pub(crate) fn insert(&mut self, key: ClaimKey) -> bool {
        self.claimed.insert(key)
    }

    pub(crate) fn remove(&mut self, key: &ClaimKey) -> bool {
        self.claimed.remove(key)
    }

    pub fn len(&self) -> usize {
        self.claimed.len()
    }

    pub fn is_empty(&self) -> bool {
        self.claimed.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ClaimKey> {
        self.claimed.iter()
    }
}

/// Everything the verifier needs to survive a restart.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundState {
    /// The published root, if any.
    pub merkle_root: Option<Hash>,

    /// Maximum amount payable in a single claim.
    pub max_claim_amount: U256,

    pub status: RoundStatus,

    pub claims: ClaimRecords,
}

impl RoundState {
    pub fn new(max_claim_amount: U256, scheme: ClaimKeyScheme) -> Self {
        Self {
            merkle_root: None,
            max_claim_amount,
            status: RoundStatus::NoRootPublished,
            claims: ClaimRecords::new(scheme),
        }
    }

    /// Whether `claimant` holds a claim record for the active root.
    pub fn has_claimed(&self, claimant: &Address) -> bool {
        match (self.claims.scheme(), self.merkle_root) {
            (ClaimKeyScheme::Global, _) => self.claims.contains(&ClaimKey {
                root: None,
                claimant: *claimant,
            }),
            (ClaimKeyScheme::PerRoot, Some(root)) => {
                self.claims.contains(&self.claims.key_for(&root, claimant))
            }
            (ClaimKeyScheme::PerRoot, None) => false,
        }
    }
}

impl Default for RoundState {
    fn default() -> Self {
        Self::new(default_max_claim_amount(), ClaimKeyScheme::default())
    }
}
