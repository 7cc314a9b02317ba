use std::io::Write;

use csv::Writer;
use rust_decimal::Decimal;
use serde::Serialize;

use crate::account::AccountType;

#[derive(Debug, Serialize)]
pub struct AccountRow<'a> {
    pub account: &'a str,
    pub name: &'a str,
    #[serde(rename = "type")]
    pub account_type: AccountType,
    pub balance: Decimal,
}

pub fn print_accounts<'a, W>(
    output: &mut W,
    accounts: impl Iterator<Item = AccountRow<'a>>,
) -> anyhow::Result<()>
where
    W: Write,
{
    let mut writer = Writer::from_writer(output);
    for acc in accounts {
        if let Err(err) = writer.serialize(acc) {
            anyhow::bail!("Failed to write to CSV: {err}")
        }
    }
    // Ensure all data is flushed to the output
    if let Err(err) = writer.flush() {
        anyhow::bail!("Failed to flush CSV writer: {err}")
    }
    Ok(())
}
