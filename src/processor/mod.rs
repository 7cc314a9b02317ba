use thiserror::Error;

use crate::{
    account::AccountError,
    command::{CommandError, LedgerCommand},
    store::StoreError,
};

pub mod in_memory_processor;

#[derive(Debug, Error)]
pub enum ProcessError {
    #[error(transparent)]
    CommandErr(#[from] CommandError),
    #[error(transparent)]
    AccountErr(#[from] AccountError),
    #[error(transparent)]
    StoreErr(#[from] StoreError),
    #[error("Account `{0}` is not open")]
    UnknownAccount(String),
}

/// Executes ledger commands against a working set of accounts.
pub trait LedgerProcessor {
    fn process(&mut self, command: LedgerCommand) -> Result<(), ProcessError>;
}
