//! # Wire Round-Trip Tests
//!
//! Operations travel as JSON between the seal layer and the executor; the
//! stored hashes must catch any change made in transit.

#[cfg(test)]
mod tests {
    use crate::fixtures::{service, Ledger};
    use currency_transfers::prelude::*;
    use currency_transfers::ValidationError;
    use serde_json::json;

    #[test]
    fn test_round_trip_executes() {
        let ledger = Ledger::new(2, 100);
        let op = ledger.transfer_with_memo(0, &[(1, 25)], "wire", "invoice 7");

        let json = serde_json::to_string(&op).unwrap();
        let decoded: Operation = serde_json::from_str(&json).unwrap();

        assert_eq!(decoded, op);
        service(FeeConfig::nil())
            .execute(&decoded, &ledger.pool)
            .unwrap();
        assert_eq!(ledger.balance(1), 125);
    }

    #[test]
    fn test_amount_changed_in_transit() {
        let ledger = Ledger::new(2, 100);
        let op = ledger.transfer(0, &[(1, 25)], "wire");

        let mut value = serde_json::to_value(&op).unwrap();
        value["fact"]["items"][0]["amount"] = json!("99");
        let tampered: Operation = serde_json::from_value(value).unwrap();

        assert!(matches!(
            service(FeeConfig::nil()).execute(&tampered, &ledger.pool),
            Err(OperationError::Invalid(
                ValidationError::FactHashMismatch { .. }
            ))
        ));
        assert_eq!(ledger.balance(0), 100);
    }

    #[test]
    fn test_memo_changed_in_transit() {
        let ledger = Ledger::new(2, 100);
        let op = ledger.transfer_with_memo(0, &[(1, 25)], "wire", "invoice 7");

        let mut value = serde_json::to_value(&op).unwrap();
        value["memo"] = json!("invoice 8");
        let tampered: Operation = serde_json::from_value(value).unwrap();

        assert!(matches!(
            service(FeeConfig::nil()).validate(&tampered),
            Err(OperationError::Invalid(
                ValidationError::OperationHashMismatch { .. }
            ))
        ));
    }

    #[test]
    fn test_memo_over_limit() {
        let ledger = Ledger::new(2, 100);
        let op = ledger.transfer_with_memo(0, &[(1, 1)], "wire", &"m".repeat(181));

        assert!(matches!(
            service(FeeConfig::nil()).validate(&op),
            Err(OperationError::Invalid(ValidationError::MemoTooLong {
                size: 181,
                max: 180
            }))
        ));
    }
}
