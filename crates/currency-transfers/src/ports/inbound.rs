//! # Inbound Port - TransfersApi
//!
//! Primary driving port used by the execution engine.
//!
//! | Method | Effect |
//! |--------|--------|
//! | `validate` | Structural checks only, no ledger access |
//! | `execute` | Validate, pre-process, commit one operation |
//! | `execute_batch` | Execute a batch in conflict-free waves |

use crate::domain::{CommitReceipt, Operation, OperationError};
use crate::ports::outbound::StateStore;
use shared_types::Hash;

/// Operation left out of a batch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkippedOperation {
    pub index: usize,
    pub hash: Hash,
    pub error: OperationError,
}

/// Outcome of a batch that was not aborted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    /// Receipts in input order.
    pub committed: Vec<CommitReceipt>,
    /// Invalid or rejected operations, in input order.
    pub skipped: Vec<SkippedOperation>,
}

impl BatchReport {
    pub fn committed_count(&self) -> usize {
        self.committed.len()
    }

    pub fn skipped_count(&self) -> usize {
        self.skipped.len()
    }
}

/// Primary API of the transfers subsystem.
///
/// # Example
///
/// ```rust,ignore
/// use currency_transfers::ports::TransfersApi;
///
/// fn apply(api: &impl TransfersApi, ops: &[Operation], store: &dyn StateStore) {
///     let report = api.execute_batch(ops, store)?;
///     for skipped in &report.skipped {
///         println!("{} skipped: {}", skipped.hash, skipped.error);
///     }
/// }
/// ```
pub trait TransfersApi: Send + Sync {
    /// Structural validity. Never reads ledger state.
    ///
    /// # Errors
    /// - `Invalid`: the operation is malformed
    fn validate(&self, operation: &Operation) -> Result<(), OperationError>;

    /// Validates, pre-processes and commits one operation.
    ///
    /// # Errors
    /// - `Invalid`: structural failure
    /// - `Rejected`: ledger preconditions not met, nothing written
    /// - `Fatal`: the store failed
    fn execute(
        &self,
        operation: &Operation,
        store: &dyn StateStore,
    ) -> Result<CommitReceipt, OperationError>;

    /// Executes every operation, skipping invalid and rejected ones.
    ///
    /// # Errors
    /// - `Fatal`: the first store failure aborts the batch; operations
    ///   committed before it stay committed
    fn execute_batch(
        &self,
        operations: &[Operation],
        store: &dyn StateStore,
    ) -> Result<BatchReport, OperationError>;
}
