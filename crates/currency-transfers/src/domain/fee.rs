//! Fee policies.
//!
//! Each policy is applied per transfer item; the processor sums the results.

use super::errors::FeeError;
use crate::ports::outbound::FeeSchedule;
use shared_types::Amount;

/// No fee.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct NilFee;

impl FeeSchedule for NilFee {
    fn fee(&self, _amount: Amount) -> Result<Amount, FeeError> {
        Ok(Amount::ZERO)
    }

    fn name(&self) -> &'static str {
        "nil"
    }
}

/// The same fee for every item, whatever the amount.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedFee {
    amount: Amount,
}

impl FixedFee {
    pub fn new(amount: Amount) -> Self {
        Self { amount }
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }
}

impl FeeSchedule for FixedFee {
    fn fee(&self, _amount: Amount) -> Result<Amount, FeeError> {
        Ok(self.amount)
    }

    fn name(&self) -> &'static str {
        "fixed"
    }
}

/// Proportional fee with a floor: `max(amount * numerator / denominator, minimum)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct RatioFee {
    numerator: u128,
    denominator: u128,
    minimum: Amount,
}

impl RatioFee {
    pub fn new(numerator: u128, denominator: u128, minimum: Amount) -> Result<Self, FeeError> {
        if denominator == 0 {
            return Err(FeeError::InvalidPolicy(
                "ratio denominator must be over zero".to_string(),
            ));
        }
        Ok(Self {
            numerator,
            denominator,
            minimum,
        })
    }
}

impl FeeSchedule for RatioFee {
    fn fee(&self, amount: Amount) -> Result<Amount, FeeError> {
        let fee = amount.mul_ratio(self.numerator, self.denominator)?;
        Ok(fee.max(self.minimum))
    }

    fn name(&self) -> &'static str {
        "ratio"
    }
}
