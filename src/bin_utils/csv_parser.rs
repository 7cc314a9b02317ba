use std::io::Read;

use csv::{DeserializeRecordsIntoIter, Trim};
use rust_decimal::Decimal;
use serde::Deserialize;

use crate::{
    account::AccountType,
    command::{CommandError, LedgerCommand, OperationKind},
};

/// One line of an operation script: `op,account,target,amount,name,type`.
#[derive(Debug, Deserialize)]
pub struct OperationRow {
    pub op: OperationKind,
    pub account: String,
    pub target: Option<String>,
    pub amount: Option<Decimal>,
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub account_type: Option<AccountType>,
}

impl OperationRow {
    pub fn into_command(self) -> Result<LedgerCommand, CommandError> {
        LedgerCommand::parse(
            self.op,
            self.account,
            self.target,
            self.amount,
            self.name,
            self.account_type,
        )
    }
}

/// Parses an operation script in CSV format, yielding each row together
/// with the line it started on.
pub struct CsvOperationParser<R> {
    iter: DeserializeRecordsIntoIter<R, OperationRow>,
}

impl<R> CsvOperationParser<R>
where
    R: Read,
{
    pub fn new(source: R) -> Self {
        let reader = csv::ReaderBuilder::new()
            .trim(Trim::All)
            .flexible(true)
            .from_reader(source);

        Self {
            iter: reader.into_deserialize(),
        }
    }
}

impl<R> Iterator for CsvOperationParser<R>
where
    R: Read,
{
    type Item = (u64, Result<OperationRow, csv::Error>);

    fn next(&mut self) -> Option<Self::Item> {
        let curr_line = self.iter.reader().position().line();
        self.iter.next().map(|row| (curr_line, row))
    }
}
