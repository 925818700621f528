//! # Shared Types Crate
//!
//! Ledger primitives used across the Currency-Chain workspace.
//!
//! ## Design Principles
//!
//! - **Single Source of Truth**: `Hash`, `Address`, `PublicKey`, `Signature`
//!   and `Amount` are defined once and re-used by every crate.
//! - **Checked Arithmetic**: `Amount` never wraps; overflow and underflow
//!   surface as `AmountError`.
//! - **Canonical Bytes**: every primitive exposes the fixed-width byte
//!   encoding used for fact and operation hashing.

pub mod amount;
pub mod entities;
pub mod errors;

pub use amount::Amount;
pub use entities::*;
pub use errors::*;
