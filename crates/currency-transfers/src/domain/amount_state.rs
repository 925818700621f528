//! # Amount State
//!
//! A looked-up balance entry plus pure arithmetic transforms. Every
//! transform returns a new `AmountState`; the entry it was read from is
//! never touched, so nothing changes on the ledger until the single commit.

use super::errors::RejectionError;
use super::state::{State, StateValue};
use shared_types::{Amount, AmountError};

/// Balance entry in transition.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AmountState {
    /// Entry as read from the store.
    state: State,
    /// Balance after the transforms applied so far.
    amount: Amount,
    /// Fee charged in this transition.
    fee: Amount,
}

impl AmountState {
    /// Wraps a balance entry. Entries holding anything else are rejected.
    pub fn new(state: State) -> Result<Self, RejectionError> {
        let amount = state
            .value()
            .as_balance()
            .ok_or_else(|| RejectionError::InvalidBalanceState {
                key: state.key().to_string(),
            })?;

        Ok(Self {
            state,
            amount,
            fee: Amount::ZERO,
        })
    }

    pub fn key(&self) -> &str {
        self.state.key()
    }

    /// Current balance of this transition.
    pub fn amount(&self) -> Amount {
        self.amount
    }

    /// Balance recorded in the entry before any transform.
    pub fn previous_amount(&self) -> Amount {
        self.state.value().as_balance().unwrap_or(Amount::ZERO)
    }

    pub fn fee(&self) -> Amount {
        self.fee
    }

    /// Whether a fee was charged in this transition.
    pub fn charged_fee(&self) -> bool {
        !self.fee.is_zero()
    }

    pub fn add(&self, amount: Amount) -> Result<Self, AmountError> {
        Ok(Self {
            amount: self.amount.checked_add(amount)?,
            ..self.clone()
        })
    }

    pub fn sub(&self, amount: Amount) -> Result<Self, AmountError> {
        Ok(Self {
            amount: self.amount.checked_sub(amount)?,
            ..self.clone()
        })
    }

    /// Records `fee` as charged. The balance itself is unchanged; callers
    /// subtract the fee together with the principal.
    pub fn add_fee(&self, fee: Amount) -> Result<Self, AmountError> {
        Ok(Self {
            fee: self.fee.checked_add(fee)?,
            ..self.clone()
        })
    }

    /// The entry to commit, carrying the new balance.
    pub fn to_state(&self) -> State {
        self.state.with_value(StateValue::Balance(self.amount))
    }
}
