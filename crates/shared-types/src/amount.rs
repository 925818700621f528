//! # Amount
//!
//! Non-negative ledger value with checked arithmetic.
//!
//! ## Type Decisions
//!
//! - `u128` backing value. Every operation that could leave the range
//!   returns `AmountError` instead of wrapping or saturating.
//! - Canonical bytes are the 16-byte big-endian encoding, so two replicas
//!   always hash the same amount identically.
//! - Serialized as a decimal string. JSON numbers lose precision past 2^53
//!   and buffered serde representations have no `u128` support.

use crate::errors::AmountError;
use serde::{Deserialize, Serialize};
use serde_with::{serde_as, DisplayFromStr};
use std::fmt;

/// A non-negative amount of the ledger's currency in base units.
#[serde_as]
#[derive(
    Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Amount(#[serde_as(as = "DisplayFromStr")] u128);

impl Amount {
    pub const ZERO: Self = Self(0);

    pub const fn new(value: u128) -> Self {
        Self(value)
    }

    pub const fn value(&self) -> u128 {
        self.0
    }

    pub const fn is_zero(&self) -> bool {
        self.0 == 0
    }

    pub fn checked_add(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_add(other.0)
            .map(Amount)
            .ok_or(AmountError::Overflow {
                lhs: self.0,
                op: '+',
                rhs: other.0,
            })
    }

    pub fn checked_sub(self, other: Amount) -> Result<Amount, AmountError> {
        self.0
            .checked_sub(other.0)
            .map(Amount)
            .ok_or(AmountError::Underflow {
                lhs: self.0,
                rhs: other.0,
            })
    }

    /// Computes `self * numerator / denominator`, rounding down.
    ///
    /// Used by proportional fee policies.
    pub fn mul_ratio(self, numerator: u128, denominator: u128) -> Result<Amount, AmountError> {
        if denominator == 0 {
            return Err(AmountError::DivisionByZero);
        }
        let product = self.0.checked_mul(numerator).ok_or(AmountError::Overflow {
            lhs: self.0,
            op: '*',
            rhs: numerator,
        })?;
        Ok(Amount(product / denominator))
    }

    /// Sums amounts, failing on the first overflow.
    pub fn checked_sum<I>(amounts: I) -> Result<Amount, AmountError>
    where
        I: IntoIterator<Item = Amount>,
    {
        amounts
            .into_iter()
            .try_fold(Amount::ZERO, |acc, amount| acc.checked_add(amount))
    }

    /// Canonical 16-byte big-endian encoding.
    pub fn to_bytes(&self) -> [u8; 16] {
        self.0.to_be_bytes()
    }
}

impl From<u128> for Amount {
    fn from(value: u128) -> Self {
        Self(value)
    }
}

impl From<u64> for Amount {
    fn from(value: u64) -> Self {
        Self(u128::from(value))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
