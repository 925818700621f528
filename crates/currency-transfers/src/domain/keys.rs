//! # Account Keys
//!
//! Weighted multi-key ownership of an account. An operation is authorized
//! when the summed weight of its signers reaches the account's threshold.

use super::errors::{AuthorizationError, ValidationError};
use serde::{Deserialize, Serialize};
use shared_types::PublicKey;
use std::collections::HashSet;

pub const MAX_KEY_WEIGHT: u32 = 100;
pub const MAX_THRESHOLD: u32 = 100;

/// One registered key and its voting weight.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKey {
    pub key: PublicKey,
    pub weight: u32,
}

impl AccountKey {
    pub fn new(key: PublicKey, weight: u32) -> Self {
        Self { key, weight }
    }
}

/// The keys registered for an account.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccountKeys {
    keys: Vec<AccountKey>,
    threshold: u32,
}

impl AccountKeys {
    pub fn new(keys: Vec<AccountKey>, threshold: u32) -> Result<Self, ValidationError> {
        let keys = Self { keys, threshold };
        keys.is_valid()?;
        Ok(keys)
    }

    /// A single key holding the full threshold.
    pub fn single(key: PublicKey) -> Self {
        Self {
            keys: vec![AccountKey::new(key, MAX_KEY_WEIGHT)],
            threshold: MAX_THRESHOLD,
        }
    }

    pub fn keys(&self) -> &[AccountKey] {
        &self.keys
    }

    pub fn threshold(&self) -> u32 {
        self.threshold
    }

    pub fn key(&self, public_key: &PublicKey) -> Option<&AccountKey> {
        self.keys.iter().find(|k| &k.key == public_key)
    }

    pub fn is_valid(&self) -> Result<(), ValidationError> {
        if self.keys.is_empty() {
            return Err(ValidationError::InvalidKeys("empty keys".to_string()));
        }
        if self.threshold == 0 || self.threshold > MAX_THRESHOLD {
            return Err(ValidationError::InvalidKeys(format!(
                "threshold {} out of range 1..={MAX_THRESHOLD}",
                self.threshold
            )));
        }

        let mut seen = HashSet::with_capacity(self.keys.len());
        let mut total = 0u32;
        for key in &self.keys {
            if key.weight == 0 || key.weight > MAX_KEY_WEIGHT {
                return Err(ValidationError::InvalidKeys(format!(
                    "weight {} of {} out of range 1..={MAX_KEY_WEIGHT}",
                    key.weight, key.key
                )));
            }
            if !seen.insert(key.key) {
                return Err(ValidationError::InvalidKeys(format!(
                    "duplicated key {}",
                    key.key
                )));
            }
            total = total.saturating_add(key.weight);
        }

        if total < self.threshold {
            return Err(ValidationError::InvalidKeys(format!(
                "sum of weights {total} under threshold {}",
                self.threshold
            )));
        }

        Ok(())
    }

    /// Every signer must be a registered key and their weights must reach
    /// the threshold.
    pub fn check_signers<'a, I>(&self, signers: I) -> Result<(), AuthorizationError>
    where
        I: IntoIterator<Item = &'a PublicKey>,
    {
        let mut counted = HashSet::new();
        let mut weight = 0u32;
        for signer in signers {
            let key = self
                .key(signer)
                .ok_or(AuthorizationError::UnknownKey(*signer))?;
            if counted.insert(key.key) {
                weight = weight.saturating_add(key.weight);
            }
        }

        if weight < self.threshold {
            return Err(AuthorizationError::ThresholdNotPassed {
                weight,
                threshold: self.threshold,
            });
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn pk(b: u8) -> PublicKey {
        PublicKey([b; 32])
    }

    #[test]
    fn test_valid_keys() {
        let keys = AccountKeys::new(
            vec![AccountKey::new(pk(1), 50), AccountKey::new(pk(2), 50)],
            100,
        )
        .unwrap();
        assert_eq!(keys.threshold(), 100);
        assert_eq!(keys.key(&pk(2)).map(|k| k.weight), Some(50));
    }

    #[test]
    fn test_invalid_keys() {
        assert!(AccountKeys::new(vec![], 1).is_err());
        assert!(AccountKeys::new(vec![AccountKey::new(pk(1), 100)], 0).is_err());
        assert!(AccountKeys::new(vec![AccountKey::new(pk(1), 101)], 100).is_err());
        assert!(AccountKeys::new(vec![AccountKey::new(pk(1), 40)], 50).is_err());
        assert!(AccountKeys::new(
            vec![AccountKey::new(pk(1), 50), AccountKey::new(pk(1), 50)],
            100
        )
        .is_err());
    }

    #[test]
    fn test_threshold_passed() {
        let keys = AccountKeys::new(
            vec![
                AccountKey::new(pk(1), 50),
                AccountKey::new(pk(2), 30),
                AccountKey::new(pk(3), 30),
            ],
            60,
        )
        .unwrap();

        assert!(keys.check_signers([&pk(1), &pk(2)]).is_ok());
        assert_eq!(
            keys.check_signers([&pk(1)]),
            Err(AuthorizationError::ThresholdNotPassed {
                weight: 50,
                threshold: 60
            })
        );
    }

    #[test]
    fn test_repeated_signer_counted_once() {
        let keys = AccountKeys::new(
            vec![AccountKey::new(pk(1), 50), AccountKey::new(pk(2), 50)],
            100,
        )
        .unwrap();
        assert!(keys.check_signers([&pk(1), &pk(1)]).is_err());
    }

    #[test]
    fn test_unknown_signer() {
        let keys = AccountKeys::single(pk(1));
        assert_eq!(
            keys.check_signers([&pk(1), &pk(9)]),
            Err(AuthorizationError::UnknownKey(pk(9)))
        );
    }
}
