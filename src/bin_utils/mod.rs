//! Wiring used by the `flat-ledger` binary: read an operation script,
//! run it through [`InMemoryLedgerProcessor`], print the resulting accounts.
//! Kept in the library so integration tests can drive it directly.

use std::io::{Read, Write};

use anyhow::Result;
use thiserror::Error;

use crate::{
    processor::{LedgerProcessor, ProcessError, in_memory_processor::InMemoryLedgerProcessor},
    store::RecordStore,
};
use csv_parser::CsvOperationParser;
use csv_printer::{AccountRow, print_accounts};
pub mod csv_parser;
pub mod csv_printer;

#[derive(Debug, Error)]
pub enum RowError {
    #[error("Malformed row: {0}")]
    Malformed(#[from] csv::Error),
    #[error(transparent)]
    Process(#[from] ProcessError),
}

pub struct Service<'w, R, W: 'w, S> {
    pub input: R,
    pub output: &'w mut W,
    pub store: S,
    pub error_printer: Box<dyn FnMut(u64, RowError)>,
}

impl<'w, R, W, S> Service<'w, R, W, S>
where
    R: Read,
    W: Write + 'w,
    S: RecordStore,
{
    pub fn run(mut self) -> Result<()> {
        let parser = CsvOperationParser::new(self.input);

        let mut processor = InMemoryLedgerProcessor::new(self.store);

        for (line, row) in parser {
            let result = row
                .map_err(RowError::from)
                .and_then(|row| {
                    row.into_command()
                        .map_err(|err| RowError::from(ProcessError::from(err)))
                })
                .and_then(|cmd| processor.process(cmd).map_err(RowError::from));
            if let Err(err) = result {
                (self.error_printer)(line, err);
            }
        }

        print_accounts(
            self.output,
            processor.accounts.values().map(|acc| AccountRow {
                account: acc.account_number(),
                name: acc.holder_name(),
                account_type: acc.account_type(),
                balance: acc.balance(),
            }),
        )
    }
}
