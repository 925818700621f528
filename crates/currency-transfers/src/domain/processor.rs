//! # Transfer Processors (Type-State)
//!
//! Two-phase execution of a `Transfers` operation against the ledger store.
//! Each phase consumes the processor and returns the next state, so a
//! processor can never be committed without a successful pre-process, nor
//! committed twice.
//!
//! ```text
//! TransferProcessor:  [Unresolved] ──pre_process──→ [Resolved] ──process──→ credited AmountState
//!
//! TransfersProcessor: [Created] ──pre_process──→ [PreProcessed] ──process──→ [Committed]
//!                         │
//!                         └── Err(Rejected | Fatal)   (processor consumed)
//! ```
//!
//! ## Pre-process (read-only)
//!
//! | Step | Check | Failure |
//! |------|-------|---------|
//! | 0 | Fact is well formed | `Invalid` |
//! | 1 | Sender account record | `SenderAccountNotFound` |
//! | 2 | Sender balance record | `SenderBalanceNotFound` |
//! | 3 | Total fee | `Fee` |
//! | 4 | `balance >= principal + fee` | `InsufficientBalance` |
//! | 5 | Every receiver resolves | `ReceiverAccountNotFound` / `ReceiverBalanceNotFound` |
//! | 6 | Signers authorize the sender | `InvalidSigning` |
//!
//! Steps 1 to 6 fail with a `Rejected` error. Store read failures are
//! `Fatal`. Step 0 keeps a self-transfer or a repeated receiver from
//! reaching `commit` with duplicated state keys; the item limit is left to
//! the caller.
//!
//! ## Process
//!
//! Receiver credits and the sender debit are computed as new `AmountState`
//! snapshots, then written through exactly one `commit` call.

use super::amount_state::AmountState;
use super::errors::{FeeError, OperationError, RejectionError};
use super::fact::TransferItem;
use super::operation::{Operation, Transfers};
use super::state::{exists_state, state_key_account, state_key_balance};
use crate::ports::outbound::{FeeSchedule, SignatureAuthorizer, StateCommit, StateLookup};
use shared_types::{Amount, Hash};
use std::fmt;

// =============================================================================
// PER-ITEM PROCESSOR
// =============================================================================

/// Marker: receiver state not yet looked up.
#[derive(Debug, Clone, Copy)]
pub struct Unresolved;

/// Receiver balance as read during pre-process.
#[derive(Debug, Clone)]
pub struct Resolved {
    balance: AmountState,
}

/// Resolves and credits one transfer item.
#[derive(Debug, Clone)]
pub struct TransferProcessor<S> {
    operation_hash: Hash,
    item: TransferItem,
    state: S,
}

impl<S> TransferProcessor<S> {
    pub fn operation_hash(&self) -> Hash {
        self.operation_hash
    }

    pub fn item(&self) -> &TransferItem {
        &self.item
    }
}

impl TransferProcessor<Unresolved> {
    pub fn new(operation_hash: Hash, item: TransferItem) -> Self {
        Self {
            operation_hash,
            item,
            state: Unresolved,
        }
    }

    /// Requires the receiver's account and balance records.
    pub fn pre_process(
        self,
        lookup: &dyn StateLookup,
    ) -> Result<TransferProcessor<Resolved>, OperationError> {
        let receiver = *self.item.receiver();

        exists_state(lookup, &state_key_account(&receiver), || {
            RejectionError::ReceiverAccountNotFound(receiver)
        })?;
        let balance = exists_state(lookup, &state_key_balance(&receiver), || {
            RejectionError::ReceiverBalanceNotFound(receiver)
        })?;

        Ok(TransferProcessor {
            operation_hash: self.operation_hash,
            item: self.item,
            state: Resolved {
                balance: AmountState::new(balance)?,
            },
        })
    }
}

impl TransferProcessor<Resolved> {
    /// Receiver balance before the credit.
    pub fn balance(&self) -> &AmountState {
        &self.state.balance
    }

    /// Credited balance. Nothing is written.
    pub fn process(&self) -> Result<AmountState, OperationError> {
        self.state
            .balance
            .add(self.item.amount())
            .map_err(|err| RejectionError::from(err).into())
    }
}

// =============================================================================
// WHOLE-OPERATION PROCESSOR
// =============================================================================

/// Marker: nothing looked up yet.
#[derive(Debug, Clone, Copy)]
pub struct Created;

/// Everything `process` needs, resolved by `pre_process`.
#[derive(Debug, Clone)]
pub struct PreProcessed {
    sender: AmountState,
    principal: Amount,
    fee: Amount,
    items: Vec<TransferProcessor<Resolved>>,
}

/// Terminal state, holding what was written.
#[derive(Debug, Clone)]
pub struct Committed {
    receipt: CommitReceipt,
}

/// Outcome of a committed operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitReceipt {
    pub fact_hash: Hash,
    pub operation_hash: Hash,
    /// Receiver balances in item order, then the sender balance.
    pub states: Vec<AmountState>,
    pub fee: Amount,
}

impl CommitReceipt {
    pub fn sender(&self) -> Option<&AmountState> {
        self.states.last()
    }

    pub fn receivers(&self) -> &[AmountState] {
        match self.states.split_last() {
            Some((_, receivers)) => receivers,
            None => &[],
        }
    }
}

/// Orchestrates one `Transfers` operation.
pub struct TransfersProcessor<'a, S> {
    operation: &'a Transfers,
    fee_schedule: &'a dyn FeeSchedule,
    authorizer: &'a dyn SignatureAuthorizer,
    state: S,
}

impl<S: fmt::Debug> fmt::Debug for TransfersProcessor<'_, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TransfersProcessor")
            .field("operation", &self.operation.hash())
            .field("fee_schedule", &self.fee_schedule.name())
            .field("state", &self.state)
            .finish()
    }
}

impl<'a, S> TransfersProcessor<'a, S> {
    pub fn operation(&self) -> &'a Transfers {
        self.operation
    }

    /// Σ fee over every item.
    pub fn calculate_fee(&self) -> Result<Amount, FeeError> {
        self.operation
            .fact()
            .items()
            .iter()
            .try_fold(Amount::ZERO, |total, item| {
                let fee = self.fee_schedule.fee(item.amount())?;
                Ok(total.checked_add(fee)?)
            })
    }
}

impl<'a> TransfersProcessor<'a, Created> {
    pub fn new(
        operation: &'a Transfers,
        fee_schedule: &'a dyn FeeSchedule,
        authorizer: &'a dyn SignatureAuthorizer,
    ) -> Self {
        Self {
            operation,
            fee_schedule,
            authorizer,
            state: Created,
        }
    }

    /// Read-only checks against the ledger. Consumes the processor.
    pub fn pre_process(
        self,
        lookup: &dyn StateLookup,
    ) -> Result<TransfersProcessor<'a, PreProcessed>, OperationError> {
        let fact = self.operation.fact();
        fact.is_valid(usize::MAX)?;
        let sender = *fact.sender();

        exists_state(lookup, &state_key_account(&sender), || {
            RejectionError::SenderAccountNotFound(sender)
        })?;
        let balance = exists_state(lookup, &state_key_balance(&sender), || {
            RejectionError::SenderBalanceNotFound(sender)
        })?;
        let balance = AmountState::new(balance)?;

        let fee = self.calculate_fee().map_err(RejectionError::Fee)?;

        let principal = fact.amount().map_err(RejectionError::Amount)?;
        let required = principal
            .checked_add(fee)
            .map_err(RejectionError::Amount)?;
        if balance.amount() < required {
            return Err(RejectionError::InsufficientBalance {
                sender,
                required,
                available: balance.amount(),
            }
            .into());
        }

        let items = fact
            .items()
            .iter()
            .map(|item| TransferProcessor::new(self.operation.hash(), *item).pre_process(lookup))
            .collect::<Result<Vec<_>, _>>()?;

        self.authorizer
            .authorize(&sender, self.operation.signs(), lookup)?;

        Ok(TransfersProcessor {
            operation: self.operation,
            fee_schedule: self.fee_schedule,
            authorizer: self.authorizer,
            state: PreProcessed {
                sender: balance,
                principal,
                fee,
                items,
            },
        })
    }
}

impl<'a> TransfersProcessor<'a, PreProcessed> {
    pub fn fee(&self) -> Amount {
        self.state.fee
    }

    pub fn principal(&self) -> Amount {
        self.state.principal
    }

    /// Sender balance as read during pre-process.
    pub fn sender_balance(&self) -> &AmountState {
        &self.state.sender
    }

    /// Computes every new balance and writes them in a single commit.
    ///
    /// A refused commit is `Fatal`.
    pub fn process(
        self,
        commit: &dyn StateCommit,
    ) -> Result<TransfersProcessor<'a, Committed>, OperationError> {
        let PreProcessed {
            sender,
            principal,
            fee,
            items,
        } = self.state;

        let mut states = items
            .iter()
            .map(|item| item.process())
            .collect::<Result<Vec<_>, _>>()?;

        let debit = principal.checked_add(fee).map_err(RejectionError::Amount)?;
        let sender = sender
            .sub(debit)
            .and_then(|state| state.add_fee(fee))
            .map_err(RejectionError::Amount)?;
        states.push(sender);

        let fact_hash = self.operation.fact().hash();
        commit.commit(
            &fact_hash,
            states.iter().map(AmountState::to_state).collect(),
        )?;

        Ok(TransfersProcessor {
            operation: self.operation,
            fee_schedule: self.fee_schedule,
            authorizer: self.authorizer,
            state: Committed {
                receipt: CommitReceipt {
                    fact_hash,
                    operation_hash: self.operation.hash(),
                    states,
                    fee,
                },
            },
        })
    }
}

impl TransfersProcessor<'_, Committed> {
    pub fn receipt(&self) -> &CommitReceipt {
        &self.state.receipt
    }

    pub fn into_receipt(self) -> CommitReceipt {
        self.state.receipt
    }
}

// =============================================================================
// DISPATCH
// =============================================================================

/// Processor selected by operation kind.
#[derive(Debug)]
pub enum OperationProcessor<'a, S> {
    Transfers(TransfersProcessor<'a, S>),
}

impl Operation {
    /// Processor for this operation's kind.
    pub fn processor<'a>(
        &'a self,
        fee_schedule: &'a dyn FeeSchedule,
        authorizer: &'a dyn SignatureAuthorizer,
    ) -> OperationProcessor<'a, Created> {
        match self {
            Operation::Transfers(op) => OperationProcessor::Transfers(TransfersProcessor::new(
                op,
                fee_schedule,
                authorizer,
            )),
        }
    }
}

impl<'a> OperationProcessor<'a, Created> {
    pub fn pre_process(
        self,
        lookup: &dyn StateLookup,
    ) -> Result<OperationProcessor<'a, PreProcessed>, OperationError> {
        match self {
            Self::Transfers(p) => p.pre_process(lookup).map(OperationProcessor::Transfers),
        }
    }
}

impl<'a> OperationProcessor<'a, PreProcessed> {
    pub fn fee(&self) -> Amount {
        match self {
            Self::Transfers(p) => p.fee(),
        }
    }

    pub fn process(self, commit: &dyn StateCommit) -> Result<CommitReceipt, OperationError> {
        match self {
            Self::Transfers(p) => p.process(commit).map(|committed| committed.into_receipt()),
        }
    }
}
