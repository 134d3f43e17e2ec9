//! Administrator capability checks, injected into the verifier.

use alloy_primitives::Address;
use std::collections::BTreeSet;

use crate::constants::NULL_ADDRESS;

pub trait AccessControl {
    fn is_administrator(&self, identity: &Address) -> bool;
}

/// Exactly one administrator, the original "owner" model.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SingleAdministrator(pub Address);

impl AccessControl for SingleAdministrator {
    fn is_administrator(&self, identity: &Address) -> bool {
        *identity != NULL_ADDRESS && *identity == self.0
    }
}

/// Any member of a fixed set may administer the round.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AdministratorSet(BTreeSet<Address>);

impl AdministratorSet {
    pub fn new(administrators: impl IntoIterator<Item = Address>) -> Self {
        Self(
            administrators
                .into_iter()
                .filter(|a| *a != NULL_ADDRESS)
                .collect(),
        )
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl AccessControl for AdministratorSet {
    fn is_administrator(&self, identity: &Address) -> bool {
        self.0.contains(identity)
    }
}

impl<F> AccessControl for F
where
    F: Fn(&Address) -> bool,
{
    fn is_administrator(&self, identity: &Address) -> bool {
        self(identity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_single_administrator() {
        let admin = Address::new([1; 20]);
        let policy = SingleAdministrator(admin);

        assert!(policy.is_administrator(&admin));
        assert!(!policy.is_administrator(&Address::new([2; 20])));
        assert!(!SingleAdministrator(NULL_ADDRESS).is_administrator(&NULL_ADDRESS));
    }

    #[test]
    fn test_administrator_set_drops_null_identity() {
        let policy = AdministratorSet::new([Address::new([1; 20]), NULL_ADDRESS]);

        assert_eq!(policy.len(), 1);
        assert!(policy.is_administrator(&Address::new([1; 20])));
        assert!(!policy.is_administrator(&NULL_ADDRESS));
    }

    #[test]
    fn test_closure_policy() {
        let policy = |identity: &Address| identity.as_slice()[0] == 0x42;

        assert!(policy.is_administrator(&Address::new([0x42; 20])));
        assert!(!policy.is_administrator(&Address::new([0x41; 20])));
    }
}
