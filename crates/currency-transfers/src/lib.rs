//! # Currency Transfers
//!
//! Multi-recipient value transfers for the Currency-Chain ledger: fact
//! construction and structural validation, fee computation, and a two-phase
//! pre-process/commit protocol producing one atomic set of balance changes
//! per operation.
//!
//! ## Domain Invariants
//!
//! | Invariant | Enforcement Location |
//! |-----------|---------------------|
//! | 1 ≤ items ≤ `max_transfer_items` | `domain/fact.rs` - `TransfersFact::is_valid()` |
//! | No duplicate receiver, sender never receives | `domain/fact.rs` - `TransfersFact::is_valid()` |
//! | Stored hash equals recomputed hash | `domain/fact.rs`, `domain/operation.rs` |
//! | No negative balance, no overflow | `shared-types` - `Amount` checked arithmetic |
//! | No write before pre-process succeeds | `domain/processor.rs` - type-state |
//! | One commit per operation | `domain/processor.rs` - `TransfersProcessor::process()` |
//!
//! ## Error Classes
//!
//! | Class | Variant | Batch reaction |
//! |-------|---------|----------------|
//! | Structural | `OperationError::Invalid` | Skip operation |
//! | Recoverable | `OperationError::Rejected` | Skip operation (`is_ignorable()`) |
//! | Fatal | `OperationError::Fatal` | Abort batch |
//!
//! ## Module Structure (Hexagonal Architecture)
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      OUTER LAYER                                │
//! │  adapters/memory_state.rs    - InMemoryStatePool               │
//! │  adapters/keys_authorizer.rs - StateKeysAuthorizer             │
//! │  service.rs                  - TransfersService (batch waves)  │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ implements ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      MIDDLE LAYER                               │
//! │  ports/inbound.rs  - TransfersApi trait                        │
//! │  ports/outbound.rs - StateLookup, StateCommit, FeeSchedule,    │
//! │                      SignatureAuthorizer                       │
//! └─────────────────────────────────────────────────────────────────┘
//!                          ↑ uses ↑
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      INNER LAYER                                │
//! │  domain/fact.rs         - TransferItem, TransfersFact          │
//! │  domain/operation.rs    - Transfers envelope, Operation enum   │
//! │  domain/processor.rs    - Type-state processors                │
//! │  domain/amount_state.rs - Pure balance transforms              │
//! │  domain/fee.rs          - NilFee, FixedFee, RatioFee           │
//! │  domain/conflicts.rs    - Conflict-free wave planning          │
//! │  domain/errors.rs       - Error classes                        │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,ignore
//! use currency_transfers::prelude::*;
//!
//! let service = TransfersService::new(TransfersConfig::from_env()?, NetworkId::from("testnet"))?;
//! let report = service.execute_batch(&operations, &store)?;
//! ```

pub mod adapters;
pub mod config;
pub mod domain;
pub mod ports;
pub mod service;

pub use adapters::*;
pub use config::{ConfigError, FeeConfig, FeeMode, TransfersConfig};
pub use domain::*;
pub use ports::*;
pub use service::TransfersService;

/// Common imports for callers of the transfers API.
pub mod prelude {
    pub use crate::adapters::{InMemoryStatePool, StateKeysAuthorizer};
    pub use crate::config::{FeeConfig, TransfersConfig};
    pub use crate::domain::{
        AccountKeys, CommitReceipt, FactSign, Operation, OperationError, TransferItem, Transfers,
        TransfersFact,
    };
    pub use crate::ports::{BatchReport, TransfersApi};
    pub use crate::service::TransfersService;
    pub use shared_types::{Address, Amount, Hash, NetworkId};
}
