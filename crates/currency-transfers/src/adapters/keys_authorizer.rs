//! Signature authorization against the keys stored in the sender's account
//! record.

use crate::domain::{state_key_account, AuthorizationError, FactSign};
use crate::ports::outbound::{SignatureAuthorizer, StateLookup};
use shared_types::Address;

/// Reads `<sender>:account` and checks the signers against its weighted
/// keys and threshold.
///
/// Signature validity itself is checked during structural validation; this
/// only decides whether the signers may act for the account.
#[derive(Clone, Copy, Debug, Default)]
pub struct StateKeysAuthorizer;

impl SignatureAuthorizer for StateKeysAuthorizer {
    fn authorize(
        &self,
        sender: &Address,
        signs: &[FactSign],
        lookup: &dyn StateLookup,
    ) -> Result<(), AuthorizationError> {
        let key = state_key_account(sender);
        let state = lookup
            .get_state(&key)?
            .ok_or(AuthorizationError::KeysNotFound(*sender))?;
        let keys = state
            .value()
            .as_keys()
            .ok_or(AuthorizationError::InvalidKeysState { key })?;

        keys.check_signers(signs.iter().map(|sign| &sign.signer))
    }
}
