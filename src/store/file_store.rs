use std::{
    fs, io,
    path::{Path, PathBuf},
};

use crate::account::Account;

use super::{RecordStore, StoreError, decode_account, encode_account};

pub const DEFAULT_EXTENSION: &str = ".bin";

/// One file per account, named `<account number><extension>` inside `dir`.
#[derive(Debug, Clone)]
pub struct FileRecordStore {
    dir: PathBuf,
    extension: String,
}

impl Default for FileRecordStore {
    fn default() -> Self {
        Self::new(".")
    }
}

impl FileRecordStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self {
            dir: dir.into(),
            extension: DEFAULT_EXTENSION.to_string(),
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = extension.into();
        self
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Resolves the file an account number is stored in.
    ///
    /// The account number is used verbatim, so anything that would escape
    /// `dir` or is not a plain file name is refused.
    pub fn path_for(&self, account_number: &str) -> Result<PathBuf, StoreError> {
        let invalid = account_number.is_empty()
            || account_number == "."
            || account_number == ".."
            || account_number.contains(['/', '\\', '\0']);
        if invalid {
            return Err(StoreError::unavailable(
                account_number,
                io::Error::new(
                    io::ErrorKind::InvalidInput,
                    "account number is not usable as a file name",
                ),
            ));
        }
        Ok(self
            .dir
            .join(format!("{account_number}{}", self.extension)))
    }
}

impl RecordStore for FileRecordStore {
    fn save(&mut self, account: &Account) -> Result<(), StoreError> {
        let key = account.account_number();
        let path = self.path_for(key)?;
        let bytes = encode_account(account)?;
        fs::write(&path, &bytes).map_err(|err| StoreError::unavailable(key, err))?;
        tracing::debug!(account_number = key, path = %path.display(), "Saved account snapshot");
        Ok(())
    }

    fn load(&self, account_number: &str) -> Result<Account, StoreError> {
        let path = self.path_for(account_number)?;
        let bytes = fs::read(&path).map_err(|err| StoreError::unavailable(account_number, err))?;
        let account = decode_account(account_number, &bytes)?;
        tracing::debug!(account_number, path = %path.display(), "Loaded account snapshot");
        Ok(account)
    }
}
