//! # Integration Test Flows
//!
//! Single and batch execution through `TransfersApi`.
//!
//! ## Flows Tested:
//!
//! 1. **Single transfer**: validate, pre-process, one commit
//! 2. **Batch with rejections**: invalid and rejected operations are skipped
//! 3. **Dependent operations**: later waves see earlier commits
//! 4. **Fatal store failure**: the batch aborts
//! 5. **Telemetry**: committed operations show up in the metrics registry

#[cfg(test)]
mod tests {
    use crate::fixtures::{service, Ledger};
    use currency_transfers::prelude::*;
    use currency_transfers::{RejectionError, ValidationError};

    // =============================================================================
    // SINGLE OPERATION
    // =============================================================================

    #[test]
    fn test_flat_fee_transfer() {
        let ledger = Ledger::new(3, 100);
        let service = service(FeeConfig::fixed(Amount::new(1)));
        let op = ledger.transfer(0, &[(1, 30), (2, 20)], "t-1");

        let receipt = service.execute(&op, &ledger.pool).unwrap();

        assert_eq!(ledger.balance(0), 48);
        assert_eq!(ledger.balance(1), 130);
        assert_eq!(ledger.balance(2), 120);
        assert_eq!(receipt.fee, Amount::new(2));
        assert_eq!(receipt.states.len(), 3);
        assert_eq!(ledger.pool.commit_count(), 1);
    }

    #[test]
    fn test_insufficient_balance_leaves_ledger_untouched() {
        let ledger = Ledger::new(2, 10);
        let service = service(FeeConfig::nil());
        let before = ledger.total();

        let err = service
            .execute(&ledger.transfer(0, &[(1, 20)], "t-1"), &ledger.pool)
            .unwrap_err();

        assert!(err.is_ignorable());
        assert!(err.to_string().contains("required 20"));
        assert_eq!(ledger.balance(0), 10);
        assert_eq!(ledger.total(), before);
        assert_eq!(ledger.pool.commit_count(), 0);
    }

    #[test]
    fn test_duplicate_receiver_rejected_before_lookup() {
        let ledger = Ledger::new(2, 100);
        let service = service(FeeConfig::nil());
        let op = ledger.transfer(0, &[(1, 5), (1, 5)], "t-1");

        assert_eq!(
            service.validate(&op),
            Err(OperationError::Invalid(ValidationError::DuplicateReceiver(
                ledger.address(1)
            )))
        );
    }

    #[test]
    fn test_signature_from_other_account_rejected() {
        let ledger = Ledger::new(3, 100);
        let service = service(FeeConfig::nil());

        // Valid signature, but by account 2's key on account 0's transfer.
        let op = ledger.transfer_signed_by(0, 2, &[(1, 5)], "t-1");
        assert!(service.validate(&op).is_ok());

        let err = service.execute(&op, &ledger.pool).unwrap_err();

        assert!(matches!(
            err,
            OperationError::Rejected(RejectionError::InvalidSigning(_))
        ));
        assert_eq!(ledger.balance(0), 100);
        assert_eq!(ledger.pool.commit_count(), 0);
    }

    // =============================================================================
    // BATCHES
    // =============================================================================

    #[test]
    fn test_batch_skips_and_continues() {
        let ledger = Ledger::new(6, 100);
        let service = service(FeeConfig::fixed(Amount::new(1)));
        let ops = vec![
            ledger.transfer(0, &[(1, 10)], "a"),
            ledger.transfer(2, &[(3, 1_000)], "b"),
            ledger.transfer(4, &[(4, 1)], "c"),
            ledger.transfer(5, &[(3, 7)], "d"),
        ];

        let report = service.execute_batch(&ops, &ledger.pool).unwrap();

        assert_eq!(report.committed_count(), 2);
        let skipped: Vec<_> = report.skipped.iter().map(|s| s.index).collect();
        assert_eq!(skipped, vec![1, 2]);
        assert!(report.skipped[0].error.is_ignorable());
        assert!(matches!(
            report.skipped[1].error,
            OperationError::Invalid(ValidationError::ReceiverIsSender(_))
        ));

        assert_eq!(ledger.balance(0), 89);
        assert_eq!(ledger.balance(1), 110);
        assert_eq!(ledger.balance(3), 107);
        assert_eq!(ledger.balance(5), 92);
    }

    #[test]
    fn test_batch_dependent_operations_see_earlier_commits() {
        let ledger = Ledger::new(3, 10);
        let service = service(FeeConfig::nil());
        let ops = vec![
            ledger.transfer(0, &[(1, 10)], "a"),
            ledger.transfer(1, &[(2, 20)], "b"),
            ledger.transfer(2, &[(0, 30)], "c"),
        ];

        let report = service.execute_batch(&ops, &ledger.pool).unwrap();

        assert_eq!(report.committed_count(), 3);
        assert_eq!(ledger.balance(0), 30);
        assert_eq!(ledger.balance(1), 0);
        assert_eq!(ledger.balance(2), 0);
    }

    #[test]
    fn test_batch_aborts_on_commit_failure() {
        let ledger = Ledger::new(4, 100);
        let service = service(FeeConfig::nil());
        ledger.pool.set_fail_commits(true);

        let err = service
            .execute_batch(
                &[
                    ledger.transfer(0, &[(1, 10)], "a"),
                    ledger.transfer(2, &[(3, 10)], "b"),
                ],
                &ledger.pool,
            )
            .unwrap_err();

        assert!(err.is_fatal());
        assert_eq!(ledger.total(), 400);
    }

    // =============================================================================
    // TELEMETRY
    // =============================================================================

    #[test]
    fn test_committed_operations_are_counted() {
        ledger_telemetry::register_metrics().unwrap();
        let before = ledger_telemetry::OPERATIONS_COMMITTED
            .with_label_values(&["transfers"])
            .get();

        let ledger = Ledger::new(2, 100);
        service(FeeConfig::nil())
            .execute(&ledger.transfer(0, &[(1, 1)], "m"), &ledger.pool)
            .unwrap();

        let after = ledger_telemetry::OPERATIONS_COMMITTED
            .with_label_values(&["transfers"])
            .get();
        assert!(after >= before + 1.0);
        assert!(ledger_telemetry::encode_metrics()
            .unwrap()
            .contains("cc_operations_committed_total"));
    }
}
