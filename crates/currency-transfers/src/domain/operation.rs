//! # Operation Envelopes
//!
//! `Transfers` wraps a `TransfersFact` with its signatures and a memo.
//! `Operation` is the tagged union the executor dispatches on.
//!
//! ## Hash Layout
//!
//! ```text
//! SHA-256( fact_hash ‖ sign_0 ‖ … ‖ sign_n ‖ memo )
//! ```
//!
//! Signatures are hashed in attachment order, so the envelope hash is
//! recomputed every time signatures are added.

use super::errors::ValidationError;
use super::fact::{TransfersFact, DEFAULT_MAX_TRANSFER_ITEMS};
use super::fact_sign::FactSign;
use serde::{Deserialize, Serialize};
use shared_crypto::Sha256Hasher;
use shared_types::{Address, Hash, NetworkId};
use std::collections::HashSet;
use std::fmt;

/// Default memo bound in bytes.
pub const DEFAULT_MAX_MEMO_SIZE: usize = 180;

/// Type tag of a fact or operation kind.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct Hint {
    pub type_code: [u8; 2],
    pub name: &'static str,
    pub version: &'static str,
}

impl fmt::Display for Hint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-v{} ({:02x}{:02x})",
            self.name, self.version, self.type_code[0], self.type_code[1]
        )
    }
}

pub const TRANSFERS_FACT_HINT: Hint = Hint {
    type_code: [0xa0, 0x01],
    name: "currency-transfers-operation-fact",
    version: "0.0.1",
};

pub const TRANSFERS_HINT: Hint = Hint {
    type_code: [0xa0, 0x02],
    name: "currency-transfers-operation",
    version: "0.0.1",
};

/// Bounds applied by structural validation.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OperationLimits {
    pub max_transfer_items: usize,
    pub max_memo_size: usize,
}

impl Default for OperationLimits {
    fn default() -> Self {
        Self {
            max_transfer_items: DEFAULT_MAX_TRANSFER_ITEMS,
            max_memo_size: DEFAULT_MAX_MEMO_SIZE,
        }
    }
}

pub fn is_valid_memo(memo: &str, max_memo_size: usize) -> Result<(), ValidationError> {
    if memo.len() > max_memo_size {
        return Err(ValidationError::MemoTooLong {
            size: memo.len(),
            max: max_memo_size,
        });
    }
    Ok(())
}

// =============================================================================
// TRANSFERS ENVELOPE
// =============================================================================

/// Signed transfers operation.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transfers {
    fact: TransfersFact,
    signs: Vec<FactSign>,
    memo: String,
    hash: Hash,
}

impl Transfers {
    pub fn new(fact: TransfersFact, signs: Vec<FactSign>, memo: impl Into<String>) -> Self {
        let mut op = Self {
            fact,
            signs,
            memo: memo.into(),
            hash: Hash::ZERO,
        };
        op.hash = op.generate_hash();
        op
    }

    pub fn hint(&self) -> Hint {
        TRANSFERS_HINT
    }

    pub fn fact(&self) -> &TransfersFact {
        &self.fact
    }

    pub fn signs(&self) -> &[FactSign] {
        &self.signs
    }

    pub fn memo(&self) -> &str {
        &self.memo
    }

    pub fn hash(&self) -> Hash {
        self.hash
    }

    pub fn generate_hash(&self) -> Hash {
        let mut hasher = Sha256Hasher::new();
        hasher.update(self.fact.hash().as_bytes());
        for sign in &self.signs {
            hasher.update(sign.bytes());
        }
        hasher.update(self.memo.as_bytes());
        hasher.finalize()
    }

    /// New envelope with `signs` appended after the existing ones.
    ///
    /// A signer may sign only once.
    pub fn add_fact_signs(&self, signs: &[FactSign]) -> Result<Self, ValidationError> {
        let mut signers: HashSet<_> = self.signs.iter().map(|s| s.signer).collect();
        for sign in signs {
            if !signers.insert(sign.signer) {
                return Err(ValidationError::DuplicateSigner(sign.signer));
            }
        }

        let mut all = self.signs.clone();
        all.extend_from_slice(signs);
        Ok(Self::new(self.fact.clone(), all, self.memo.clone()))
    }

    pub fn is_valid(
        &self,
        network_id: &NetworkId,
        limits: &OperationLimits,
    ) -> Result<(), ValidationError> {
        is_valid_memo(&self.memo, limits.max_memo_size)?;
        self.is_valid_operation(network_id, limits)
    }

    /// Fact validity, signature set, then envelope hash.
    fn is_valid_operation(
        &self,
        network_id: &NetworkId,
        limits: &OperationLimits,
    ) -> Result<(), ValidationError> {
        self.fact.is_valid(limits.max_transfer_items)?;

        if self.signs.is_empty() {
            return Err(ValidationError::EmptyFactSigns);
        }

        let fact_hash = self.fact.hash();
        let mut signers = HashSet::with_capacity(self.signs.len());
        for sign in &self.signs {
            if !signers.insert(sign.signer) {
                return Err(ValidationError::DuplicateSigner(sign.signer));
            }
            sign.verify(&fact_hash, network_id)
                .map_err(|source| ValidationError::InvalidFactSign {
                    signer: sign.signer,
                    source,
                })?;
        }

        let generated = self.generate_hash();
        if self.hash != generated {
            return Err(ValidationError::OperationHashMismatch {
                stored: self.hash,
                generated,
            });
        }

        Ok(())
    }
}

// =============================================================================
// OPERATION DISPATCH
// =============================================================================

/// Every operation kind the executor understands, selected by tag.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[non_exhaustive]
pub enum Operation {
    Transfers(Transfers),
}

impl Operation {
    pub fn hint(&self) -> Hint {
        match self {
            Self::Transfers(op) => op.hint(),
        }
    }

    /// Short kind label used for logs and metrics.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::Transfers(_) => "transfers",
        }
    }

    pub fn hash(&self) -> Hash {
        match self {
            Self::Transfers(op) => op.hash(),
        }
    }

    pub fn fact_hash(&self) -> Hash {
        match self {
            Self::Transfers(op) => op.fact().hash(),
        }
    }

    /// Accounts this operation reads or writes.
    pub fn addresses(&self) -> Vec<Address> {
        match self {
            Self::Transfers(op) => op.fact().addresses(),
        }
    }

    pub fn is_valid(
        &self,
        network_id: &NetworkId,
        limits: &OperationLimits,
    ) -> Result<(), ValidationError> {
        match self {
            Self::Transfers(op) => op.is_valid(network_id, limits),
        }
    }
}

impl From<Transfers> for Operation {
    fn from(op: Transfers) -> Self {
        Self::Transfers(op)
    }
}
