//! # Integration Tests
//!
//! End-to-end flows: signed operations executed through `TransfersService`
//! against the in-memory state pool.

pub mod conservation;
pub mod flows;
pub mod wire;
