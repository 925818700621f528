//! # Shared Crypto - Hashing and Signature Primitives
//!
//! ## Components
//!
//! | Module | Algorithm | Use Case |
//! |--------|-----------|----------|
//! | `hashing` | SHA-256 | Fact and operation hashes |
//! | `signatures` | Ed25519 | Fact signing and verification |
//!
//! ## Security Properties
//!
//! - **Ed25519**: Deterministic nonces, no RNG dependency when signing
//! - **SHA-256**: Streaming hasher so concatenated encodings never need an
//!   intermediate buffer

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod errors;
pub mod hashing;
pub mod signatures;

// Re-exports
pub use errors::CryptoError;
pub use hashing::{sha256, sha256_many, Sha256Hasher};
pub use signatures::{verify, Ed25519KeyPair};

/// Crate version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
