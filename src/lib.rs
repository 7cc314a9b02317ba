/// In-memory account record: identity, balance and the checked
/// deposit/withdraw/transfer operations.
/// Balance changes are validated into events before they are applied.
pub mod account;

/// Typed ledger operations, validated from raw script rows.
pub mod command;

/// Ledger processor interface, plus "in memory" implementation that keeps a
/// working set of accounts and persists them through a [`store::RecordStore`].
pub mod processor;

/// Persistence of single accounts, keyed by account number, using a
/// versioned binary snapshot.
pub mod store;

/// Bootstraps the library for the binary: CSV script in, CSV accounts out.
/// Lives here so integration tests can use it too.
pub mod bin_utils;
