use std::fs::File;

use anyhow::{Context, Result};
use flat_ledger::{
    bin_utils::{RowError, Service},
    store::file_store::FileRecordStore,
};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let mut args = std::env::args().skip(1);
    let filename = args
        .next()
        .context("Expected an operation script as the first argument")?;
    let store_dir = args.next().unwrap_or_else(|| ".".to_string());
    let file = File::open(&filename).with_context(|| format!("Failed to open `{filename}`"))?;

    let service = Service {
        input: file,
        output: &mut std::io::stdout(),
        store: FileRecordStore::new(store_dir),
        error_printer: Box::new(|line, err| match err {
            RowError::Process(flat_ledger::processor::ProcessError::AccountErr(err)) => {
                // expected business outcome, not a broken script
                eprintln!("Line {line}: {err}")
            }
            err => eprintln!("Error at line {line}: {err}"),
        }),
    };
    service.run()
}
