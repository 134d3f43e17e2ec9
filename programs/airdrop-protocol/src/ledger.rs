//! The external fungible-asset ledger the verifier pays out of.

use alloy_primitives::{Address, U256};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use thiserror::Error;

use crate::constants::NULL_ADDRESS;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum LedgerError {
    #[error("Insufficient funds in {holder}: need {required}, have {available}")]
    InsufficientFunds {
        holder: Address,
        required: U256,
        available: U256,
    },

    #[error("Transfers to the null address are not allowed")]
    NullRecipient,

    #[error("Balance of {0} would overflow")]
    Overflow(Address),

    #[error("Transfer rejected: {0}")]
    Rejected(String),
}

/// Minimal view of a token contract: `balanceOf` and `transfer`.
pub trait TokenLedger {
    fn balance_of(&self, holder: &Address) -> U256;

    /// Move `amount` from `from` to `to`. Must either fully apply or leave
    /// both balances untouched.
    fn transfer(&mut self, from: &Address, to: &Address, amount: U256)
        -> Result<(), LedgerError>;
}

/// Balance table kept in memory. Used by tests, simulations and the CLI
/// (which loads and stores it through the database crate).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InMemoryLedger {
    balances: HashMap<Address, U256>,
}

impl InMemoryLedger {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_balances(balances: impl IntoIterator<Item = (Address, U256)>) -> Self {
        Self {
            balances: balances.into_iter().collect(),
        }
    }

    /// Create `amount` new units for `holder`.
    pub fn mint(&mut self, holder: &Address, amount: U256) -> Result<(), LedgerError> {
        let balance = self.balances.entry(*holder).or_default();
        *balance = balance
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(*holder))?;
        Ok(())
    }

    /// Non-zero balances, sorted by holder.
    pub fn balances(&self) -> Vec<(Address, U256)> {
        let mut balances: Vec<(Address, U256)> = self
            .balances
            .iter()
            .filter(|(_, amount)| !amount.is_zero())
            .map(|(holder, amount)| (*holder, *amount))
            .collect();
        balances.sort_by_key(|(holder, _)| *holder);
        balances
    }

    pub fn total_supply(&self) -> U256 {
        self.balances
            .values()
            .fold(U256::ZERO, |acc, amount| acc.saturating_add(*amount))
    }
}

impl TokenLedger for InMemoryLedger {
    fn balance_of(&self, holder: &Address) -> U256 {
        self.balances.get(holder).copied().unwrap_or_default()
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        if *to == NULL_ADDRESS {
            return Err(LedgerError::NullRecipient);
        }

        let available = self.balance_of(from);
        let remaining = available
            .checked_sub(amount)
            .ok_or(LedgerError::InsufficientFunds {
                holder: *from,
                required: amount,
                available,
            })?;

        if from == to {
            return Ok(());
        }

        let credited = self
            .balance_of(to)
            .checked_add(amount)
            .ok_or(LedgerError::Overflow(*to))?;

        self.balances.insert(*from, remaining);
        self.balances.insert(*to, credited);
        Ok(())
    }
}

/// A ledger shared between several rounds. The lock is only held for the
/// duration of a single balance query or transfer.
impl<L: TokenLedger> TokenLedger for Arc<Mutex<L>> {
    fn balance_of(&self, holder: &Address) -> U256 {
        match self.lock() {
            Ok(ledger) => ledger.balance_of(holder),
            Err(poisoned) => poisoned.into_inner().balance_of(holder),
        }
    }

    fn transfer(
        &mut self,
        from: &Address,
        to: &Address,
        amount: U256,
    ) -> Result<(), LedgerError> {
        let mut ledger = self
            .lock()
            .map_err(|_| LedgerError::Rejected("ledger lock poisoned".to_string()))?;
        ledger.transfer(from, to, amount)
    }
}
