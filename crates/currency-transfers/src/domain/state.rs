//! # Ledger State Entries
//!
//! Account-existence and balance records as seen through the state store.
//!
//! ## Key Layout
//!
//! | Record | Key |
//! |--------|-----|
//! | Account keys | `<address hex>:account` |
//! | Balance | `<address hex>:balance` |
//!
//! Processors only depend on the key functions below, never on the string
//! layout itself.

use super::errors::{OperationError, RejectionError};
use super::keys::AccountKeys;
use crate::ports::outbound::StateLookup;
use serde::{Deserialize, Serialize};
use shared_types::{Address, Amount, Hash};

pub const STATE_KEY_ACCOUNT_SUFFIX: &str = ":account";
pub const STATE_KEY_BALANCE_SUFFIX: &str = ":balance";

/// Key of the account-existence record (holds the account's keys).
pub fn state_key_account(address: &Address) -> String {
    format!("{address}{STATE_KEY_ACCOUNT_SUFFIX}")
}

/// Key of the balance record.
pub fn state_key_balance(address: &Address) -> String {
    format!("{address}{STATE_KEY_BALANCE_SUFFIX}")
}

pub fn is_state_account_key(key: &str) -> bool {
    key.ends_with(STATE_KEY_ACCOUNT_SUFFIX)
}

pub fn is_state_balance_key(key: &str) -> bool {
    key.ends_with(STATE_KEY_BALANCE_SUFFIX)
}

/// Value held by a state entry.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum StateValue {
    Keys(AccountKeys),
    Balance(Amount),
}

impl StateValue {
    pub fn as_balance(&self) -> Option<Amount> {
        match self {
            Self::Balance(amount) => Some(*amount),
            Self::Keys(_) => None,
        }
    }

    pub fn as_keys(&self) -> Option<&AccountKeys> {
        match self {
            Self::Keys(keys) => Some(keys),
            Self::Balance(_) => None,
        }
    }
}

/// A keyed ledger entry.
///
/// `operations` lists the fact hashes of the commits that wrote this entry,
/// oldest first.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct State {
    key: String,
    value: StateValue,
    #[serde(default)]
    operations: Vec<Hash>,
}

impl State {
    pub fn new(key: impl Into<String>, value: StateValue) -> Self {
        Self {
            key: key.into(),
            value,
            operations: Vec::new(),
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn value(&self) -> &StateValue {
        &self.value
    }

    pub fn operations(&self) -> &[Hash] {
        &self.operations
    }

    /// Copy of this entry carrying a new value.
    pub fn with_value(&self, value: StateValue) -> Self {
        Self {
            key: self.key.clone(),
            value,
            operations: self.operations.clone(),
        }
    }

    /// Records that the commit of `fact_hash` wrote this entry.
    pub fn record_operation(mut self, fact_hash: Hash) -> Self {
        self.operations.push(fact_hash);
        self
    }
}

/// Reads `key`, turning a missing entry into the rejection built by `missing`.
///
/// Store failures are fatal; absence is a recoverable rejection.
pub fn exists_state(
    lookup: &dyn StateLookup,
    key: &str,
    missing: impl FnOnce() -> RejectionError,
) -> Result<State, OperationError> {
    match lookup.get_state(key)? {
        Some(state) => Ok(state),
        None => Err(missing().into()),
    }
}
