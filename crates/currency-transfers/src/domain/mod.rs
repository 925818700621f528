//! Domain layer for the transfers subsystem.
//!
//! Contains pure business logic with no I/O dependencies.

pub mod amount_state;
pub mod conflicts;
pub mod errors;
pub mod fact;
pub mod fact_sign;
pub mod fee;
pub mod keys;
pub mod operation;
pub mod processor;
pub mod state;

pub use amount_state::AmountState;
pub use conflicts::plan_waves;
pub use errors::*;
pub use fact::{TransferItem, TransfersFact, DEFAULT_MAX_TRANSFER_ITEMS};
pub use fact_sign::FactSign;
pub use fee::{FixedFee, NilFee, RatioFee};
pub use keys::{AccountKey, AccountKeys, MAX_KEY_WEIGHT, MAX_THRESHOLD};
pub use operation::{
    is_valid_memo, Hint, Operation, OperationLimits, Transfers, DEFAULT_MAX_MEMO_SIZE,
    TRANSFERS_FACT_HINT, TRANSFERS_HINT,
};
pub use processor::{
    CommitReceipt, Committed, Created, OperationProcessor, PreProcessed, Resolved,
    TransferProcessor, TransfersProcessor, Unresolved,
};
pub use state::{
    exists_state, is_state_account_key, is_state_balance_key, state_key_account,
    state_key_balance, State, StateValue,
};
