use std::io;

use thiserror::Error;

use crate::account::Account;

pub mod file_store;
pub mod in_memory_store;
pub mod snapshot;

use snapshot::SnapshotError;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("Storage for account `{key}` is unavailable: {source}")]
    StorageUnavailable {
        key: String,
        #[source]
        source: io::Error,
    },
    #[error("Stored snapshot for account `{key}` is corrupt: {source}")]
    CorruptSnapshot {
        key: String,
        #[source]
        source: SnapshotError,
    },
    #[error("Snapshot stored under `{key}` belongs to account `{found}`")]
    KeyMismatch { key: String, found: String },
    #[error("Account `{key}` cannot be encoded: {source}")]
    Unencodable {
        key: String,
        #[source]
        source: io::Error,
    },
}

impl StoreError {
    pub fn unavailable(key: &str, source: io::Error) -> Self {
        Self::StorageUnavailable {
            key: key.to_string(),
            source,
        }
    }
}

pub(crate) fn encode_account(account: &Account) -> Result<Vec<u8>, StoreError> {
    snapshot::to_bytes(&account.to_snapshot()).map_err(|source| StoreError::Unencodable {
        key: account.account_number().to_string(),
        source,
    })
}

/// Decodes the snapshot stored under `key`, refusing one whose own account
/// number differs from the key it was found at.
pub(crate) fn decode_account(key: &str, bytes: &[u8]) -> Result<Account, StoreError> {
    let snapshot = snapshot::decode(bytes).map_err(|source| StoreError::CorruptSnapshot {
        key: key.to_string(),
        source,
    })?;
    if snapshot.account_number != key {
        return Err(StoreError::KeyMismatch {
            key: key.to_string(),
            found: snapshot.account_number,
        });
    }
    Ok(Account::from(snapshot))
}

/// Persists one snapshot per account number.
///
/// Saving an account number that is already stored overwrites the previous
/// snapshot. Loading always returns a fresh [`Account`], independent from
/// whatever record was saved.
pub trait RecordStore {
    fn save(&mut self, account: &Account) -> Result<(), StoreError>;

    fn load(&self, account_number: &str) -> Result<Account, StoreError>;

    /// Same as [`RecordStore::load`], but any failure is logged and replaced
    /// with a zero-valued account. A missing snapshot and a stored empty
    /// account become indistinguishable, so only use this when that is fine.
    fn load_or_default(&self, account_number: &str) -> Account {
        match self.load(account_number) {
            Ok(account) => account,
            Err(err) => {
                tracing::warn!(account_number, error = %err, "Falling back to an empty account");
                Account::default()
            }
        }
    }
}
