//! # In-Memory State Pool
//!
//! Lock-protected keyed ledger store implementing `StateLookup` and
//! `StateCommit`. A production node would back these ports with its
//! persistent store; this adapter serves tests, tools and single-process
//! execution.
//!
//! ## Commit Atomicity
//!
//! A commit is checked in full before the first write and applied under a
//! single write lock, so readers observe either every entry of a commit or
//! none of them.

use crate::domain::{
    state_key_account, state_key_balance, AccountKeys, State, StateValue, StoreError,
};
use crate::ports::outbound::{StateCommit, StateLookup};
use shared_types::{Address, Amount, Hash};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{PoisonError, RwLock};
use tracing::debug;

/// In-memory keyed ledger.
#[derive(Debug, Default)]
pub struct InMemoryStatePool {
    states: RwLock<HashMap<String, State>>,
    /// When set, every commit is refused.
    fail_commits: AtomicBool,
    /// Number of successful commits.
    commits: AtomicU64,
}

impl InMemoryStatePool {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder: registers an account with its keys and balance.
    #[must_use]
    pub fn with_account(mut self, address: Address, keys: AccountKeys, balance: Amount) -> Self {
        let states = self
            .states
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner);
        for state in account_states(&address, keys, balance) {
            states.insert(state.key().to_string(), state);
        }
        self
    }

    /// Builder: stores a raw entry.
    #[must_use]
    pub fn with_state(mut self, state: State) -> Self {
        self.states
            .get_mut()
            .unwrap_or_else(PoisonError::into_inner)
            .insert(state.key().to_string(), state);
        self
    }

    /// Stores an entry outside of any commit.
    pub fn insert(&self, state: State) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::LockPoisoned)?;
        states.insert(state.key().to_string(), state);
        Ok(())
    }

    /// Registers an account outside of any commit.
    pub fn create_account(
        &self,
        address: Address,
        keys: AccountKeys,
        balance: Amount,
    ) -> Result<(), StoreError> {
        let mut states = self.states.write().map_err(|_| StoreError::LockPoisoned)?;
        for state in account_states(&address, keys, balance) {
            states.insert(state.key().to_string(), state);
        }
        Ok(())
    }

    /// Current balance of `address`, if it has a balance record.
    pub fn balance(&self, address: &Address) -> Result<Option<Amount>, StoreError> {
        Ok(self
            .get_state(&state_key_balance(address))?
            .and_then(|state| state.value().as_balance()))
    }

    /// Sum of every balance record.
    pub fn total_balance(&self) -> Result<Amount, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::LockPoisoned)?;
        Amount::checked_sum(states.values().filter_map(|s| s.value().as_balance())).map_err(
            |err| StoreError::Lookup {
                key: "*:balance".to_string(),
                reason: err.to_string(),
            },
        )
    }

    pub fn len(&self) -> usize {
        self.states.read().map(|s| s.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn commit_count(&self) -> u64 {
        self.commits.load(Ordering::SeqCst)
    }

    /// Makes every following commit fail until reset.
    pub fn set_fail_commits(&self, fail: bool) {
        self.fail_commits.store(fail, Ordering::SeqCst);
    }
}

impl StateLookup for InMemoryStatePool {
    fn get_state(&self, key: &str) -> Result<Option<State>, StoreError> {
        let states = self.states.read().map_err(|_| StoreError::LockPoisoned)?;
        Ok(states.get(key).cloned())
    }
}

impl StateCommit for InMemoryStatePool {
    fn commit(&self, fact_hash: &Hash, states: Vec<State>) -> Result<(), StoreError> {
        if self.fail_commits.load(Ordering::SeqCst) {
            return Err(StoreError::Commit {
                fact_hash: *fact_hash,
                reason: "store refused commit".to_string(),
            });
        }

        if states.is_empty() {
            return Err(StoreError::Commit {
                fact_hash: *fact_hash,
                reason: "empty state set".to_string(),
            });
        }

        let mut keys = HashSet::with_capacity(states.len());
        for state in &states {
            if !keys.insert(state.key()) {
                return Err(StoreError::Commit {
                    fact_hash: *fact_hash,
                    reason: format!("duplicated state key {}", state.key()),
                });
            }
        }

        let mut pool = self.states.write().map_err(|_| StoreError::LockPoisoned)?;
        let count = states.len();
        for state in states {
            pool.insert(state.key().to_string(), state.record_operation(*fact_hash));
        }
        drop(pool);

        self.commits.fetch_add(1, Ordering::SeqCst);
        debug!(fact_hash = %fact_hash, states = count, "State commit applied");
        Ok(())
    }
}

fn account_states(address: &Address, keys: AccountKeys, balance: Amount) -> [State; 2] {
    [
        State::new(state_key_account(address), StateValue::Keys(keys)),
        State::new(state_key_balance(address), StateValue::Balance(balance)),
    ]
}
