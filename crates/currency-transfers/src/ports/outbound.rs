//! Outbound (Driven) ports for the transfers subsystem.
//!
//! These traits define the external systems the processors depend on: the
//! keyed ledger store, the fee policy and signature authorization.

use crate::domain::{AuthorizationError, FactSign, FeeError, State, StoreError};
use shared_types::{Address, Amount, Hash};

/// Point reads of keyed ledger entries.
///
/// Reads must be strongly consistent within one pre-process call.
pub trait StateLookup: Send + Sync {
    /// Returns the entry stored under `key`, or `None` when absent.
    fn get_state(&self, key: &str) -> Result<Option<State>, StoreError>;
}

/// Atomic multi-entry writes.
pub trait StateCommit: Send + Sync {
    /// Writes every entry in `states` on behalf of `fact_hash`.
    ///
    /// All-or-nothing: on error, no entry may have been written.
    fn commit(&self, fact_hash: &Hash, states: Vec<State>) -> Result<(), StoreError>;
}

/// A store offering both halves of the protocol.
pub trait StateStore: StateLookup + StateCommit {
    fn as_lookup(&self) -> &dyn StateLookup;

    fn as_commit(&self) -> &dyn StateCommit;
}

impl<T: StateLookup + StateCommit> StateStore for T {
    fn as_lookup(&self) -> &dyn StateLookup {
        self
    }

    fn as_commit(&self) -> &dyn StateCommit {
        self
    }
}

/// Pluggable fee policy, applied once per transfer item.
pub trait FeeSchedule: Send + Sync {
    /// Fee charged for moving `amount`.
    fn fee(&self, amount: Amount) -> Result<Amount, FeeError>;

    /// Policy label for logs.
    fn name(&self) -> &'static str;
}

/// Checks that a signature set authorizes an account.
pub trait SignatureAuthorizer: Send + Sync {
    fn authorize(
        &self,
        sender: &Address,
        signs: &[FactSign],
        lookup: &dyn StateLookup,
    ) -> Result<(), AuthorizationError>;
}

/// Authorizer accepting every signature set.
#[cfg(test)]
pub struct AllowAllAuthorizer;

#[cfg(test)]
impl SignatureAuthorizer for AllowAllAuthorizer {
    fn authorize(
        &self,
        _sender: &Address,
        _signs: &[FactSign],
        _lookup: &dyn StateLookup,
    ) -> Result<(), AuthorizationError> {
        Ok(())
    }
}

/// Lookup that fails on every read.
#[cfg(test)]
pub struct FailingLookup;

#[cfg(test)]
impl StateLookup for FailingLookup {
    fn get_state(&self, key: &str) -> Result<Option<State>, StoreError> {
        Err(StoreError::Lookup {
            key: key.to_string(),
            reason: "disk unavailable".to_string(),
        })
    }
}

/// Fee policy that always fails.
#[cfg(test)]
pub struct FailingFee;

#[cfg(test)]
impl FeeSchedule for FailingFee {
    fn fee(&self, _amount: Amount) -> Result<Amount, FeeError> {
        Err(FeeError::InvalidPolicy("unavailable".to_string()))
    }

    fn name(&self) -> &'static str {
        "failing"
    }
}
