//! Transfer error types.
//!
//! Three classes, kept apart so the executor can decide what to do with a
//! failed operation:
//!
//! | Class | Type | Engine reaction |
//! |-------|------|-----------------|
//! | Structural | `ValidationError` | Surface to caller, never retry |
//! | Recoverable | `RejectionError` | Drop the operation, keep processing the batch |
//! | Fatal | `StoreError` | Abort the batch |

use shared_crypto::CryptoError;
use shared_types::{Address, Amount, AmountError, FormatError, Hash, PublicKey};
use thiserror::Error;

/// Structural validity failures, detected before any ledger state is read.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Empty token for TransfersFact")]
    EmptyToken,

    #[error("Empty items")]
    EmptyItems,

    #[error("Items, {count} over max, {max}")]
    TooManyItems { count: usize, max: usize },

    #[error("Invalid fact hash: {0}")]
    InvalidFactHash(FormatError),

    #[error("Invalid sender address: {0}")]
    InvalidSender(FormatError),

    #[error("Invalid receiver address: {0}")]
    InvalidReceiver(FormatError),

    #[error("Amount should be over zero, receiver {receiver}")]
    ZeroAmount { receiver: Address },

    #[error("Duplicated receiver found, {0}")]
    DuplicateReceiver(Address),

    #[error("Receiver is same with sender, {0}")]
    ReceiverIsSender(Address),

    #[error("Wrong fact hash: stored {stored}, generated {generated}")]
    FactHashMismatch { stored: Hash, generated: Hash },

    #[error("Wrong operation hash: stored {stored}, generated {generated}")]
    OperationHashMismatch { stored: Hash, generated: Hash },

    #[error("Memo too long: {size} bytes, max {max}")]
    MemoTooLong { size: usize, max: usize },

    #[error("Empty fact signs")]
    EmptyFactSigns,

    #[error("Duplicated signer found, {0}")]
    DuplicateSigner(PublicKey),

    #[error("Invalid fact sign by {signer}: {source}")]
    InvalidFactSign {
        signer: PublicKey,
        source: CryptoError,
    },

    #[error("Invalid account keys: {0}")]
    InvalidKeys(String),
}

/// Fee policy failures.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum FeeError {
    #[error("Fee arithmetic failed: {0}")]
    Amount(#[from] AmountError),

    #[error("Invalid fee policy: {0}")]
    InvalidPolicy(String),
}

/// State store failures. Always fatal for the operation being applied.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum StoreError {
    #[error("State lookup failed for {key}: {reason}")]
    Lookup { key: String, reason: String },

    #[error("Commit rejected for fact {fact_hash}: {reason}")]
    Commit { fact_hash: Hash, reason: String },

    #[error("State store lock poisoned")]
    LockPoisoned,
}

/// Signature authorization failures against the sender's registered keys.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum AuthorizationError {
    #[error("Keys of account {0} not found")]
    KeysNotFound(Address),

    #[error("Unknown key found, {0}")]
    UnknownKey(PublicKey),

    #[error("Not passed threshold: sum of weights {weight} < threshold {threshold}")]
    ThresholdNotPassed { weight: u32, threshold: u32 },

    #[error("Invalid keys state {key}")]
    InvalidKeysState { key: String },

    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Recoverable rejections raised while pre-processing against ledger state.
///
/// The operation is excluded from the current batch; independent operations
/// keep going.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum RejectionError {
    #[error("Sender account does not exist, {0}")]
    SenderAccountNotFound(Address),

    #[error("Sender balance not found, {0}")]
    SenderBalanceNotFound(Address),

    #[error("Receiver account not found, {0}")]
    ReceiverAccountNotFound(Address),

    #[error("Receiver balance not found, {0}")]
    ReceiverBalanceNotFound(Address),

    #[error("Insufficient balance of sender {sender}: required {required}, available {available}")]
    InsufficientBalance {
        sender: Address,
        required: Amount,
        available: Amount,
    },

    #[error("Failed to calculate fee: {0}")]
    Fee(#[from] FeeError),

    #[error("Invalid signing: {0}")]
    InvalidSigning(AuthorizationError),

    #[error("Invalid balance state {key}")]
    InvalidBalanceState { key: String },

    #[error("Balance arithmetic failed: {0}")]
    Amount(#[from] AmountError),
}

/// Error returned by operation validation and processing.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum OperationError {
    #[error("Invalid operation: {0}")]
    Invalid(#[from] ValidationError),

    #[error("Operation rejected: {0}")]
    Rejected(#[from] RejectionError),

    #[error("Fatal store error: {0}")]
    Fatal(#[from] StoreError),
}

impl OperationError {
    /// Recoverable rejection: drop this operation, continue with the batch.
    pub fn is_ignorable(&self) -> bool {
        matches!(self, Self::Rejected(_))
    }

    /// Store-level fault: the batch must stop.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::Fatal(_))
    }

    /// Short class label used for metrics.
    pub fn class(&self) -> &'static str {
        match self {
            Self::Invalid(_) => "invalid",
            Self::Rejected(_) => "rejected",
            Self::Fatal(_) => "fatal",
        }
    }
}

impl From<AuthorizationError> for OperationError {
    fn from(err: AuthorizationError) -> Self {
        match err {
            AuthorizationError::Store(store) => Self::Fatal(store),
            other => Self::Rejected(RejectionError::InvalidSigning(other)),
        }
    }
}
