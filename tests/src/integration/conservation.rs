//! # Randomized Conservation Tests
//!
//! Seeded random batches over a small set of accounts, so most operations
//! conflict with each other and many are rejected for insufficient balance.

#[cfg(test)]
mod tests {
    use crate::fixtures::{service, Ledger};
    use currency_transfers::prelude::*;
    use rand::rngs::StdRng;
    use rand::seq::SliceRandom;
    use rand::{Rng, SeedableRng};

    const ACCOUNTS: usize = 8;

    fn random_batch(ledger: &Ledger, rng: &mut StdRng, count: usize) -> Vec<Operation> {
        (0..count)
            .map(|n| {
                let sender = rng.gen_range(0..ACCOUNTS);
                let mut receivers: Vec<usize> = (0..ACCOUNTS).filter(|r| *r != sender).collect();
                receivers.shuffle(rng);
                let width = rng.gen_range(1..=3);
                let items: Vec<_> = receivers[..width]
                    .iter()
                    .map(|r| (*r, rng.gen_range(1..=60)))
                    .collect();
                ledger.transfer(sender, &items, &format!("op-{n}"))
            })
            .collect()
    }

    #[test]
    fn test_value_is_conserved_across_random_batches() {
        for seed in [1u64, 7, 42, 1_000] {
            let mut rng = StdRng::seed_from_u64(seed);
            let ledger = Ledger::new(ACCOUNTS, 100);
            let service = service(FeeConfig::fixed(Amount::new(1)));
            let before = ledger.total();

            let ops = random_batch(&ledger, &mut rng, 60);
            let report = service.execute_batch(&ops, &ledger.pool).unwrap();

            let fees: u128 = report.committed.iter().map(|r| r.fee.value()).sum();
            assert_eq!(ledger.total() + fees, before, "seed {seed}");
            assert_eq!(
                report.committed_count() + report.skipped_count(),
                ops.len(),
                "seed {seed}"
            );
            assert!(report.skipped.iter().all(|s| s.error.is_ignorable()));
        }
    }

    #[test]
    fn test_each_receipt_balances() {
        let mut rng = StdRng::seed_from_u64(99);
        let ledger = Ledger::new(ACCOUNTS, 500);
        let service = service(FeeConfig::ratio(1, 20, Amount::new(1)));

        let ops = random_batch(&ledger, &mut rng, 40);
        let report = service.execute_batch(&ops, &ledger.pool).unwrap();
        assert!(report.committed_count() > 0);

        for receipt in &report.committed {
            let sender = receipt.sender().unwrap();
            let credits: u128 = receipt
                .receivers()
                .iter()
                .map(|r| r.amount().value() - r.previous_amount().value())
                .sum();
            assert_eq!(
                sender.previous_amount().value(),
                credits + sender.amount().value() + receipt.fee.value()
            );
        }
    }

    #[test]
    fn test_batch_matches_sequential_execution() {
        let mut rng = StdRng::seed_from_u64(2024);
        let batched = Ledger::new(ACCOUNTS, 80);
        let sequential = Ledger::new(ACCOUNTS, 80);
        let service = service(FeeConfig::fixed(Amount::new(2)));

        let ops = random_batch(&batched, &mut rng, 50);

        let report = service.execute_batch(&ops, &batched.pool).unwrap();
        let mut committed = 0;
        for op in &ops {
            match service.execute(op, &sequential.pool) {
                Ok(_) => committed += 1,
                Err(err) => assert!(err.is_ignorable()),
            }
        }

        assert_eq!(report.committed_count(), committed);
        for account in 0..ACCOUNTS {
            assert_eq!(batched.balance(account), sequential.balance(account));
        }
    }
}
