//! Fact signatures.
//!
//! A signer signs `fact_hash ‖ network_id`, so a signature collected for one
//! network never authorizes the same fact on another.

use serde::{Deserialize, Serialize};
use shared_crypto::{CryptoError, Ed25519KeyPair};
use shared_types::{Hash, NetworkId, PublicKey, Signature, Timestamp};

/// One signature over a fact hash.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct FactSign {
    pub signer: PublicKey,
    pub signature: Signature,
    pub signed_at: Timestamp,
}

impl FactSign {
    pub fn new(signer: PublicKey, signature: Signature, signed_at: Timestamp) -> Self {
        Self {
            signer,
            signature,
            signed_at,
        }
    }

    /// Signs `fact_hash` for `network_id`.
    pub fn sign(
        keypair: &Ed25519KeyPair,
        fact_hash: &Hash,
        network_id: &NetworkId,
        signed_at: Timestamp,
    ) -> Self {
        let message = signing_message(fact_hash, network_id);
        Self::new(keypair.public_key(), keypair.sign(&message), signed_at)
    }

    pub fn verify(&self, fact_hash: &Hash, network_id: &NetworkId) -> Result<(), CryptoError> {
        shared_crypto::verify(
            &self.signer,
            &signing_message(fact_hash, network_id),
            &self.signature,
        )
    }

    /// `signer(32) ‖ signature(64) ‖ signed_at(8, big-endian)`
    pub fn bytes(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(104);
        bytes.extend_from_slice(self.signer.as_bytes());
        bytes.extend_from_slice(self.signature.as_bytes());
        bytes.extend_from_slice(&self.signed_at.to_be_bytes());
        bytes
    }
}

fn signing_message(fact_hash: &Hash, network_id: &NetworkId) -> Vec<u8> {
    let mut message = Vec::with_capacity(32 + network_id.as_bytes().len());
    message.extend_from_slice(fact_hash.as_bytes());
    message.extend_from_slice(network_id.as_bytes());
    message
}
