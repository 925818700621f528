//! Ports layer: the API the subsystem offers and the systems it drives.

pub mod inbound;
pub mod outbound;

pub use inbound::{BatchReport, SkippedOperation, TransfersApi};
pub use outbound::{FeeSchedule, SignatureAuthorizer, StateCommit, StateLookup, StateStore};
