//! Shared ledger fixtures for integration tests and benchmarks.

use currency_transfers::prelude::*;
use shared_crypto::Ed25519KeyPair;

/// Network every fixture signs for.
pub const NETWORK: &str = "testnet";

/// Accounts with deterministic keys, registered in an in-memory pool.
pub struct Ledger {
    pub pool: InMemoryStatePool,
    keypairs: Vec<Ed25519KeyPair>,
}

impl Ledger {
    /// `accounts` single-key accounts, each holding `balance`.
    pub fn new(accounts: usize, balance: u128) -> Self {
        let keypairs: Vec<_> = (0..accounts).map(keypair).collect();
        let pool = keypairs
            .iter()
            .enumerate()
            .fold(InMemoryStatePool::new(), |pool, (index, keypair)| {
                pool.with_account(
                    address(index),
                    AccountKeys::single(keypair.public_key()),
                    Amount::new(balance),
                )
            });

        Self { pool, keypairs }
    }

    pub fn len(&self) -> usize {
        self.keypairs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.keypairs.is_empty()
    }

    pub fn address(&self, index: usize) -> Address {
        address(index)
    }

    pub fn balance(&self, index: usize) -> u128 {
        self.pool
            .balance(&address(index))
            .ok()
            .flatten()
            .map_or(0, |amount| amount.value())
    }

    pub fn total(&self) -> u128 {
        (0..self.len()).map(|index| self.balance(index)).sum()
    }

    /// Transfer from account `sender`, signed by its own key.
    pub fn transfer(&self, sender: usize, items: &[(usize, u128)], token: &str) -> Operation {
        self.transfer_with_memo(sender, items, token, "")
    }

    pub fn transfer_with_memo(
        &self,
        sender: usize,
        items: &[(usize, u128)],
        token: &str,
        memo: &str,
    ) -> Operation {
        self.build(sender, sender, items, token, memo)
    }

    /// Transfer from account `sender`, signed by the key of account `signer`.
    pub fn transfer_signed_by(
        &self,
        sender: usize,
        signer: usize,
        items: &[(usize, u128)],
        token: &str,
    ) -> Operation {
        self.build(sender, signer, items, token, "")
    }

    fn build(
        &self,
        sender: usize,
        signer: usize,
        items: &[(usize, u128)],
        token: &str,
        memo: &str,
    ) -> Operation {
        let items = items
            .iter()
            .map(|(receiver, amount)| TransferItem::new(address(*receiver), Amount::new(*amount)))
            .collect();
        let fact = TransfersFact::new(token.as_bytes().to_vec(), address(sender), items);
        let sign = FactSign::sign(
            &self.keypairs[signer],
            &fact.hash(),
            &NetworkId::from(NETWORK),
            1_700_000_000_000,
        );
        Transfers::new(fact, vec![sign], memo).into()
    }
}

/// Address of fixture account `index`.
pub fn address(index: usize) -> Address {
    let mut bytes = [0x11; 20];
    bytes[..8].copy_from_slice(&(index as u64 + 1).to_be_bytes());
    Address(bytes)
}

fn keypair(index: usize) -> Ed25519KeyPair {
    let mut seed = [0x5e; 32];
    seed[..8].copy_from_slice(&(index as u64).to_be_bytes());
    Ed25519KeyPair::from_seed(seed)
}

/// Service for the fixture network.
pub fn service(fee: FeeConfig) -> TransfersService {
    let config = TransfersConfig {
        fee,
        ..TransfersConfig::default()
    };
    match TransfersService::new(config, NetworkId::from(NETWORK)) {
        Ok(service) => service,
        Err(err) => panic!("fixture config rejected: {err}"),
    }
}
