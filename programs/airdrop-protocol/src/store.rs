//! Durable round storage, keyed by round id.

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::state::{ClaimKey, RoundState};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StoreError {
    #[error("Round '{0}' not found")]
    RoundNotFound(String),

    #[error("Storage backend error: {0}")]
    Backend(String),
}

pub trait RoundStore {
    fn save_round(&mut self, round_id: &str, state: &RoundState) -> Result<(), StoreError>;

    /// Persist `state` after a claim touched only `key`, either recording it
    /// or rolling it back. Backends that can write one claim row override
    /// this; the default saves the whole state.
    fn save_claim(
        &mut self,
        round_id: &str,
        state: &RoundState,
        _key: &ClaimKey,
    ) -> Result<(), StoreError> {
        self.save_round(round_id, state)
    }

    fn load_round(&self, round_id: &str) -> Result<Option<RoundState>, StoreError>;
}

/// Store that lives as long as the process. Useful for tests and simulations.
#[derive(Debug, Clone, Default)]
pub struct MemoryRoundStore {
    rounds: HashMap<String, RoundState>,
}

impl MemoryRoundStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn round_ids(&self) -> Vec<String> {
        let mut ids: Vec<String> = self.rounds.keys().cloned().collect();
        ids.sort();
        ids
    }
}

impl RoundStore for MemoryRoundStore {
    fn save_round(&mut self, round_id: &str, state: &RoundState) -> Result<(), StoreError> {
        self.rounds.insert(round_id.to_string(), state.clone());
        Ok(())
    }

    fn load_round(&self, round_id: &str) -> Result<Option<RoundState>, StoreError> {
        Ok(self.rounds.get(round_id).cloned())
    }
}

impl<S: RoundStore> RoundStore for Arc<Mutex<S>> {
    fn save_round(&mut self, round_id: &str, state: &RoundState) -> Result<(), StoreError> {
        let mut store = self
            .lock()
            .map_err(|_| StoreError::Backend("round store lock poisoned".to_string()))?;
        store.save_round(round_id, state)
    }

    fn save_claim(
        &mut self,
        round_id: &str,
        state: &RoundState,
        key: &ClaimKey,
    ) -> Result<(), StoreError> {
        let mut store = self
            .lock()
            .map_err(|_| StoreError::Backend("round store lock poisoned".to_string()))?;
        store.save_claim(round_id, state, key)
    }

    fn load_round(&self, round_id: &str) -> Result<Option<RoundState>, StoreError> {
        let store = self
            .lock()
            .map_err(|_| StoreError::Backend("round store lock poisoned".to_string()))?;
        store.load_round(round_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::state::{ClaimKeyScheme, RoundStatus};
    use alloy_primitives::U256;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryRoundStore::new();
        let mut state = RoundState::new(U256::from(5u64), ClaimKeyScheme::PerRoot);
        state.merkle_root = Some([9; 32]);
        state.status = RoundStatus::RootActive;

        store.save_round("round-1", &state).unwrap();

        assert_eq!(store.load_round("round-1").unwrap(), Some(state));
        assert_eq!(store.load_round("round-2").unwrap(), None);
        assert_eq!(store.round_ids(), vec!["round-1".to_string()]);
    }
}
