//! # Transfers Service
//!
//! Implements `TransfersApi` on top of the domain processors.
//!
//! ## Batch Execution
//!
//! ```text
//! operations ──plan_waves──→ [wave 0] [wave 1] ...
//!                               │
//!                               ├── validate + pre_process   (parallel, read-only)
//!                               └── process + commit          (sequential, input order)
//! ```
//!
//! Operations inside one wave touch disjoint accounts, so their pre-process
//! reads cannot be invalidated by each other's commits. Later waves see the
//! commits of earlier ones.
//!
//! | Outcome | Batch reaction |
//! |---------|----------------|
//! | `Invalid` | Recorded in `skipped`, batch continues |
//! | `Rejected` | Recorded in `skipped`, batch continues |
//! | `Fatal` | Batch aborted, error returned |

use crate::adapters::StateKeysAuthorizer;
use crate::config::{ConfigError, TransfersConfig};
use crate::domain::{
    plan_waves, CommitReceipt, Operation, OperationError, OperationLimits, OperationProcessor,
    PreProcessed,
};
use crate::ports::inbound::{BatchReport, SkippedOperation, TransfersApi};
use crate::ports::outbound::{FeeSchedule, SignatureAuthorizer, StateCommit, StateLookup, StateStore};
use ledger_telemetry::{
    log_operation_event, time_histogram, COMMIT_FAILURES, FEES_COLLECTED, OPERATIONS_COMMITTED,
    OPERATIONS_RECEIVED, OPERATIONS_REJECTED, OPERATION_PROCESS_DURATION,
};
use rayon::prelude::*;
use shared_types::NetworkId;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, instrument, warn};

/// Executes transfer operations against a state store.
pub struct TransfersService {
    config: TransfersConfig,
    limits: OperationLimits,
    network_id: NetworkId,
    fee_schedule: Arc<dyn FeeSchedule>,
    authorizer: Arc<dyn SignatureAuthorizer>,
}

impl TransfersService {
    /// Builds the service with the configured fee policy and the
    /// state-backed keys authorizer.
    pub fn new(config: TransfersConfig, network_id: NetworkId) -> Result<Self, ConfigError> {
        config.validate()?;
        let fee_schedule = config.fee.build()?;

        Ok(Self {
            limits: config.limits(),
            config,
            network_id,
            fee_schedule,
            authorizer: Arc::new(StateKeysAuthorizer),
        })
    }

    pub fn with_fee_schedule(mut self, fee_schedule: Arc<dyn FeeSchedule>) -> Self {
        self.fee_schedule = fee_schedule;
        self
    }

    pub fn with_authorizer(mut self, authorizer: Arc<dyn SignatureAuthorizer>) -> Self {
        self.authorizer = authorizer;
        self
    }

    pub fn config(&self) -> &TransfersConfig {
        &self.config
    }

    pub fn network_id(&self) -> &NetworkId {
        &self.network_id
    }

    /// Structural validation followed by the read-only pre-process.
    fn prepare<'a>(
        &'a self,
        operation: &'a Operation,
        lookup: &dyn StateLookup,
    ) -> Result<OperationProcessor<'a, PreProcessed>, OperationError> {
        OPERATIONS_RECEIVED
            .with_label_values(&[operation.kind()])
            .inc();

        self.validate(operation)?;
        operation
            .processor(self.fee_schedule.as_ref(), self.authorizer.as_ref())
            .pre_process(lookup)
    }

    fn commit(
        &self,
        operation: &Operation,
        processor: OperationProcessor<'_, PreProcessed>,
        commit: &dyn StateCommit,
    ) -> Result<CommitReceipt, OperationError> {
        let receipt = processor.process(commit)?;

        OPERATIONS_COMMITTED
            .with_label_values(&[operation.kind()])
            .inc();
        FEES_COLLECTED.inc_by(receipt.fee.value() as f64);
        log_operation_event!(
            debug,
            "Operation committed",
            receipt.operation_hash,
            fact_hash = %receipt.fact_hash,
            fee = %receipt.fee,
            states = receipt.states.len()
        );

        Ok(receipt)
    }

    fn record_failure(&self, operation: &Operation, err: &OperationError) {
        if err.is_fatal() {
            COMMIT_FAILURES.inc();
            log_operation_event!(warn, "Fatal store error", operation.hash(), error = %err);
            return;
        }

        OPERATIONS_REJECTED
            .with_label_values(&[operation.kind(), err.class()])
            .inc();
        log_operation_event!(
            debug,
            "Operation not applied",
            operation.hash(),
            class = err.class(),
            reason = %err
        );
    }
}

impl TransfersApi for TransfersService {
    fn validate(&self, operation: &Operation) -> Result<(), OperationError> {
        operation
            .is_valid(&self.network_id, &self.limits)
            .map_err(OperationError::from)
    }

    #[instrument(skip(self, operation, store), fields(op_hash = %operation.hash(), kind = operation.kind()))]
    fn execute(
        &self,
        operation: &Operation,
        store: &dyn StateStore,
    ) -> Result<CommitReceipt, OperationError> {
        let _timer = time_histogram!(OPERATION_PROCESS_DURATION);

        self.prepare(operation, store.as_lookup())
            .and_then(|processor| self.commit(operation, processor, store.as_commit()))
            .inspect_err(|err| self.record_failure(operation, err))
    }

    #[instrument(skip(self, operations, store), fields(count = operations.len()))]
    fn execute_batch(
        &self,
        operations: &[Operation],
        store: &dyn StateStore,
    ) -> Result<BatchReport, OperationError> {
        let waves = plan_waves(operations);
        debug!(waves = waves.len(), "Batch planned");

        let lookup = store.as_lookup();
        let mut report = BatchReport::default();

        for wave in waves {
            let prepared: Vec<_> = wave
                .par_iter()
                .map(|&index| {
                    let started = Instant::now();
                    let result = self.prepare(&operations[index], lookup);
                    (index, result, started.elapsed())
                })
                .collect();

            for (index, result, prepare_time) in prepared {
                let operation = &operations[index];
                let started = Instant::now();
                let result = result.and_then(|p| self.commit(operation, p, store.as_commit()));
                OPERATION_PROCESS_DURATION
                    .observe((prepare_time + started.elapsed()).as_secs_f64());

                match result {
                    Ok(receipt) => report.committed.push(receipt),
                    Err(err) => {
                        self.record_failure(operation, &err);
                        if err.is_fatal() {
                            warn!(index, "Batch aborted");
                            return Err(err);
                        }
                        report.skipped.push(SkippedOperation {
                            index,
                            hash: operation.hash(),
                            error: err,
                        });
                    }
                }
            }
        }

        report.skipped.sort_by_key(|skipped| skipped.index);
        info!(
            committed = report.committed_count(),
            skipped = report.skipped_count(),
            "Batch executed"
        );
        Ok(report)
    }
}
