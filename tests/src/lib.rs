//! # Currency-Chain Test Suite
//!
//! Unified test crate containing:
//!
//! ## Structure
//!
//! ```text
//! tests/
//! ├── benches/
//! │   └── transfers_benchmarks.rs  # Criterion benchmarks
//! └── src/
//!     ├── fixtures.rs              # Deterministic ledgers and signed transfers
//!     └── integration/             # End-to-end flows through TransfersService
//!         ├── flows.rs
//!         ├── conservation.rs
//!         └── wire.rs
//! ```
//!
//! ## Running Tests
//!
//! ```bash
//! # All tests
//! cargo test -p currency-tests
//!
//! # By category
//! cargo test -p currency-tests integration::conservation::
//!
//! # Benchmarks
//! cargo bench -p currency-tests
//! ```

pub mod fixtures;
pub mod integration;
