use std::{collections::HashMap, io};

use crate::account::Account;

use super::{RecordStore, StoreError, decode_account, encode_account};

/// Keeps encoded snapshots in a map instead of files.
#[derive(Debug, Default)]
pub struct InMemoryRecordStore {
    snapshots: HashMap<String, Vec<u8>>,
}

impl InMemoryRecordStore {
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }
}

impl RecordStore for InMemoryRecordStore {
    fn save(&mut self, account: &Account) -> Result<(), StoreError> {
        let bytes = encode_account(account)?;
        self.snapshots
            .insert(account.account_number().to_string(), bytes);
        Ok(())
    }

    fn load(&self, account_number: &str) -> Result<Account, StoreError> {
        let bytes = self.snapshots.get(account_number).ok_or_else(|| {
            StoreError::unavailable(
                account_number,
                io::Error::new(io::ErrorKind::NotFound, "no snapshot stored"),
            )
        })?;
        decode_account(account_number, bytes)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::*;

    #[test]
    fn save_then_load() {
        let mut store = InMemoryRecordStore::default();
        let mut acc = Account::new("Razali Ahmad", "123456", 1, Decimal::new(9000, 1));
        store.save(&acc).unwrap();
        assert_eq!(store.len(), 1);

        // later mutation does not leak into the stored copy
        acc.deposit(Decimal::ONE).unwrap();
        let loaded = store.load("123456").unwrap();
        assert_eq!(loaded.balance(), Decimal::new(9000, 1));
        assert_eq!(loaded.holder_name(), "Razali Ahmad");
    }

    #[test]
    fn last_save_wins() {
        let mut store = InMemoryRecordStore::default();
        store.save(&Account::new("first", "7", 1, Decimal::ONE)).unwrap();
        store.save(&Account::new("second", "7", 2, Decimal::TWO)).unwrap();
        assert_eq!(store.len(), 1);
        assert_eq!(store.load("7").unwrap().holder_name(), "second");
    }

    #[test]
    fn missing_key_is_unavailable() {
        let store = InMemoryRecordStore::default();
        let err = store.load("nope").unwrap_err();
        assert!(matches!(err, StoreError::StorageUnavailable { ref key, .. } if key == "nope"));
        assert_eq!(store.load_or_default("nope"), Account::default());
    }

    #[test]
    fn snapshot_under_wrong_key_is_refused() {
        let mut store = InMemoryRecordStore::default();
        store.save(&Account::new("B", "2", 1, Decimal::ONE)).unwrap();
        let bytes = store.snapshots["2"].clone();
        store.snapshots.insert("1".to_string(), bytes);

        let err = store.load("1").unwrap_err();
        assert!(matches!(
            err,
            StoreError::KeyMismatch { ref key, ref found } if key == "1" && found == "2"
        ));
    }

    #[test]
    fn corrupt_snapshot_is_reported() {
        let mut store = InMemoryRecordStore::default();
        store.snapshots.insert("1".to_string(), vec![1, 2, 3]);
        let err = store.load("1").unwrap_err();
        assert!(matches!(err, StoreError::CorruptSnapshot { .. }));
    }
}
