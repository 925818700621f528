//! Transfers configuration with validation.
//!
//! Loaded from JSON or from `CC_*` environment variables. Bounds that used
//! to be process-wide constants are injected through `OperationLimits`.

use crate::domain::{
    FeeError, FixedFee, NilFee, OperationLimits, RatioFee, DEFAULT_MAX_MEMO_SIZE,
    DEFAULT_MAX_TRANSFER_ITEMS,
};
use crate::ports::outbound::FeeSchedule;
use serde::{Deserialize, Serialize};
use shared_types::Amount;
use std::env;
use std::str::FromStr;
use std::sync::Arc;

/// Transfers subsystem configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TransfersConfig {
    /// Upper bound on items per transfers fact
    pub max_transfer_items: usize,
    /// Upper bound on memo length in bytes
    pub max_memo_size: usize,
    /// Fee policy
    pub fee: FeeConfig,
}

impl Default for TransfersConfig {
    fn default() -> Self {
        Self {
            max_transfer_items: DEFAULT_MAX_TRANSFER_ITEMS,
            max_memo_size: DEFAULT_MAX_MEMO_SIZE,
            fee: FeeConfig::default(),
        }
    }
}

/// Fee policy selection.
///
/// Only the fields of the selected `mode` are read.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct FeeConfig {
    pub mode: FeeMode,
    /// Fixed fee per item
    pub amount: Amount,
    pub numerator: u128,
    pub denominator: u128,
    /// Floor of the ratio fee
    pub minimum: Amount,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            mode: FeeMode::Nil,
            amount: Amount::ZERO,
            numerator: 0,
            denominator: 1,
            minimum: Amount::ZERO,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeeMode {
    Nil,
    Fixed,
    Ratio,
}

impl FromStr for FeeMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "nil" | "none" => Ok(Self::Nil),
            "fixed" => Ok(Self::Fixed),
            "ratio" => Ok(Self::Ratio),
            other => Err(ConfigError::InvalidFee(format!("unknown fee mode {other}"))),
        }
    }
}

impl FeeConfig {
    pub fn nil() -> Self {
        Self::default()
    }

    pub fn fixed(amount: Amount) -> Self {
        Self {
            mode: FeeMode::Fixed,
            amount,
            ..Self::default()
        }
    }

    pub fn ratio(numerator: u128, denominator: u128, minimum: Amount) -> Self {
        Self {
            mode: FeeMode::Ratio,
            numerator,
            denominator,
            minimum,
            ..Self::default()
        }
    }

    /// Builds the configured policy.
    pub fn build(&self) -> Result<Arc<dyn FeeSchedule>, ConfigError> {
        let schedule: Arc<dyn FeeSchedule> = match self.mode {
            FeeMode::Nil => Arc::new(NilFee),
            FeeMode::Fixed => Arc::new(FixedFee::new(self.amount)),
            FeeMode::Ratio => Arc::new(RatioFee::new(
                self.numerator,
                self.denominator,
                self.minimum,
            )?),
        };
        Ok(schedule)
    }
}

impl TransfersConfig {
    /// Parse configuration from a JSON document. Missing fields keep their
    /// defaults.
    pub fn from_json(json: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| ConfigError::Parse(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `CC_MAX_TRANSFER_ITEMS`: Items per fact (default: 10)
    /// - `CC_MAX_MEMO_SIZE`: Memo bytes (default: 180)
    /// - `CC_FEE_MODE`: nil, fixed or ratio (default: nil)
    /// - `CC_FEE_AMOUNT`: Fixed fee per item
    /// - `CC_FEE_NUMERATOR`, `CC_FEE_DENOMINATOR`, `CC_FEE_MINIMUM`: Ratio fee
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_vars(|name| env::var(name).ok())
    }

    fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let defaults = Self::default();
        let fee_defaults = FeeConfig::default();

        let config = Self {
            max_transfer_items: parse_var(&var, "CC_MAX_TRANSFER_ITEMS")?
                .unwrap_or(defaults.max_transfer_items),
            max_memo_size: parse_var(&var, "CC_MAX_MEMO_SIZE")?.unwrap_or(defaults.max_memo_size),
            fee: FeeConfig {
                mode: parse_var(&var, "CC_FEE_MODE")?.unwrap_or(fee_defaults.mode),
                amount: parse_var::<u128>(&var, "CC_FEE_AMOUNT")?
                    .map_or(fee_defaults.amount, Amount::new),
                numerator: parse_var(&var, "CC_FEE_NUMERATOR")?.unwrap_or(fee_defaults.numerator),
                denominator: parse_var(&var, "CC_FEE_DENOMINATOR")?
                    .unwrap_or(fee_defaults.denominator),
                minimum: parse_var::<u128>(&var, "CC_FEE_MINIMUM")?
                    .map_or(fee_defaults.minimum, Amount::new),
            },
        };
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.max_transfer_items == 0 {
            return Err(ConfigError::InvalidLimit(
                "max_transfer_items cannot be 0".into(),
            ));
        }

        if self.fee.mode == FeeMode::Ratio && self.fee.denominator == 0 {
            return Err(ConfigError::InvalidFee(
                "ratio denominator cannot be 0".into(),
            ));
        }

        Ok(())
    }

    /// Validation bounds for operations.
    pub fn limits(&self) -> OperationLimits {
        OperationLimits {
            max_transfer_items: self.max_transfer_items,
            max_memo_size: self.max_memo_size,
        }
    }
}

fn parse_var<T>(var: &impl Fn(&str) -> Option<String>, name: &str) -> Result<Option<T>, ConfigError>
where
    T: FromStr,
{
    match var(name) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| ConfigError::InvalidVar {
                name: name.to_string(),
                value: raw,
            }),
    }
}

/// Configuration errors
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid limit: {0}")]
    InvalidLimit(String),

    #[error("invalid fee policy: {0}")]
    InvalidFee(String),

    #[error("invalid value {value:?} for {name}")]
    InvalidVar { name: String, value: String },

    #[error("failed to parse configuration: {0}")]
    Parse(String),
}

impl From<FeeError> for ConfigError {
    fn from(err: FeeError) -> Self {
        Self::InvalidFee(err.to_string())
    }
}
