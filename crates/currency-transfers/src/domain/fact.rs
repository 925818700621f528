//! # Transfers Fact
//!
//! The immutable, hash-identified payload of a transfers operation.
//!
//! ## Construction vs Validation
//!
//! `TransfersFact::new` only stores the fields and computes the hash. All
//! rules are checked by `is_valid`, so a fact can travel through
//! serialization first and still have its stored hash re-verified.
//!
//! ## Hash Layout
//!
//! ```text
//! SHA-256( token ‖ sender(20) ‖ receiver_0(20) ‖ amount_0(16) ‖ … )
//! ```

use super::errors::ValidationError;
use super::operation::{Hint, TRANSFERS_FACT_HINT};
use super::state::state_key_balance;
use serde::{Deserialize, Serialize};
use shared_crypto::Sha256Hasher;
use shared_types::{Address, Amount, AmountError, Hash};
use std::collections::HashSet;

/// Default upper bound on items per fact.
pub const DEFAULT_MAX_TRANSFER_ITEMS: usize = 10;

/// One receiver and the amount credited to it.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransferItem {
    receiver: Address,
    amount: Amount,
}

impl TransferItem {
    pub fn new(receiver: Address, amount: Amount) -> Self {
        Self { receiver, amount }
    }

    pub fn receiver(&self) -> &Address {
        &self.receiver
    }

    pub fn amount(&self) -> Amount {
        self.amount
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(36);
        bytes.extend_from_slice(self.receiver.as_bytes());
        bytes.extend_from_slice(&self.amount.to_bytes());
        bytes
    }

    pub fn is_valid(&self) -> Result<(), ValidationError> {
        self.receiver
            .is_valid()
            .map_err(ValidationError::InvalidReceiver)?;

        if self.amount.is_zero() {
            return Err(ValidationError::ZeroAmount {
                receiver: self.receiver,
            });
        }

        Ok(())
    }
}

/// Token, sender and ordered transfer items, identified by their hash.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransfersFact {
    hash: Hash,
    token: Vec<u8>,
    sender: Address,
    items: Vec<TransferItem>,
}

impl TransfersFact {
    pub fn new(token: impl Into<Vec<u8>>, sender: Address, items: Vec<TransferItem>) -> Self {
        let mut fact = Self {
            hash: Hash::ZERO,
            token: token.into(),
            sender,
            items,
        };
        fact.hash = fact.generate_hash();
        fact
    }

    pub fn hint(&self) -> Hint {
        TRANSFERS_FACT_HINT
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn token(&self) -> &[u8] {
        &self.token
    }

    pub fn sender(&self) -> &Address {
        &self.sender
    }

    pub fn items(&self) -> &[TransferItem] {
        &self.items
    }

    pub fn generate_hash(&self) -> Hash {
        let mut hasher = Sha256Hasher::new();
        hasher.update(&self.token).update(self.sender.as_bytes());
        for item in &self.items {
            hasher.update(item.bytes());
        }
        hasher.finalize()
    }

    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(self.token.len() + 20 + self.items.len() * 36);
        bytes.extend_from_slice(&self.token);
        bytes.extend_from_slice(self.sender.as_bytes());
        for item in &self.items {
            bytes.extend(item.bytes());
        }
        bytes
    }

    /// Checks every structural rule, failing on the first violation.
    ///
    /// Does not touch ledger state.
    pub fn is_valid(&self, max_items: usize) -> Result<(), ValidationError> {
        if self.token.is_empty() {
            return Err(ValidationError::EmptyToken);
        }

        match self.items.len() {
            0 => return Err(ValidationError::EmptyItems),
            n if n > max_items => {
                return Err(ValidationError::TooManyItems {
                    count: n,
                    max: max_items,
                })
            }
            _ => {}
        }

        self.hash
            .is_valid()
            .map_err(ValidationError::InvalidFactHash)?;
        self.sender
            .is_valid()
            .map_err(ValidationError::InvalidSender)?;

        let mut receivers = HashSet::with_capacity(self.items.len());
        for item in &self.items {
            item.is_valid()?;

            if !receivers.insert(state_key_balance(item.receiver())) {
                return Err(ValidationError::DuplicateReceiver(*item.receiver()));
            }
            if item.receiver() == &self.sender {
                return Err(ValidationError::ReceiverIsSender(self.sender));
            }
        }

        let generated = self.generate_hash();
        if self.hash != generated {
            return Err(ValidationError::FactHashMismatch {
                stored: self.hash,
                generated,
            });
        }

        Ok(())
    }

    /// Principal moved by this fact, fee excluded.
    pub fn amount(&self) -> Result<Amount, AmountError> {
        Amount::checked_sum(self.items.iter().map(TransferItem::amount))
    }

    /// Every receiver followed by the sender.
    ///
    /// Unfiltered: this is the touched-address set for schedulers, not a
    /// validity check.
    pub fn addresses(&self) -> Vec<Address> {
        self.items
            .iter()
            .map(|item| item.receiver)
            .chain(std::iter::once(self.sender))
            .collect()
    }
}
