//! Adapters layer for the transfers subsystem.
//!
//! Concrete implementations of the outbound ports.

pub mod keys_authorizer;
pub mod memory_state;

pub use keys_authorizer::StateKeysAuthorizer;
pub use memory_state::InMemoryStatePool;
