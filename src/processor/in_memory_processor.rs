use std::collections::BTreeMap;

use rust_decimal::Decimal;

use crate::{
    account::Account,
    command::{CommandError, LedgerCommand},
    store::RecordStore,
};

use super::{LedgerProcessor, ProcessError};

pub struct InMemoryLedgerProcessor<S> {
    pub accounts: BTreeMap<String, Account>,
    pub store: S,
}

impl<S: RecordStore> InMemoryLedgerProcessor<S> {
    pub fn new(store: S) -> Self {
        Self {
            accounts: BTreeMap::new(),
            store,
        }
    }

    fn account_mut(&mut self, account_number: &str) -> Result<&mut Account, ProcessError> {
        self.accounts
            .get_mut(account_number)
            .ok_or_else(|| ProcessError::UnknownAccount(account_number.to_string()))
    }

    fn transfer(&mut self, from: &str, to: &str, amount: Decimal) -> Result<(), ProcessError> {
        if from == to {
            return Err(CommandError::SameAccount(from.to_string()).into());
        }
        // take the source out so both accounts can be borrowed mutably
        let mut source = self
            .accounts
            .remove(from)
            .ok_or_else(|| ProcessError::UnknownAccount(from.to_string()))?;
        let result = match self.accounts.get_mut(to) {
            Some(target) => source.transfer(target, amount).map_err(ProcessError::from),
            None => Err(ProcessError::UnknownAccount(to.to_string())),
        };
        self.accounts.insert(from.to_string(), source);
        result
    }
}

impl<S: RecordStore> LedgerProcessor for InMemoryLedgerProcessor<S> {
    fn process(&mut self, command: LedgerCommand) -> Result<(), ProcessError> {
        tracing::debug!(?command, "Processing ledger command");
        match command {
            LedgerCommand::Open {
                account_number,
                holder_name,
                account_type,
                balance,
            } => {
                let acc = Account::new(holder_name, account_number.clone(), account_type, balance);
                self.accounts.insert(account_number, acc);
            }
            LedgerCommand::Deposit {
                account_number,
                amount,
            } => self.account_mut(&account_number)?.deposit(amount)?,
            LedgerCommand::Withdraw {
                account_number,
                amount,
            } => self.account_mut(&account_number)?.withdraw(amount)?,
            LedgerCommand::Transfer { from, to, amount } => self.transfer(&from, &to, amount)?,
            LedgerCommand::Save { account_number } => {
                let acc = self
                    .accounts
                    .get(&account_number)
                    .ok_or_else(|| ProcessError::UnknownAccount(account_number.clone()))?;
                self.store.save(acc)?;
            }
            LedgerCommand::Load { account_number } => {
                let acc = self.store.load(&account_number)?;
                // insert only when load succeeded
                self.accounts.insert(account_number, acc);
            }
        };
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::prelude::FromPrimitive;

    use crate::{
        account::AccountError,
        store::{StoreError, in_memory_store::InMemoryRecordStore},
    };

    use super::*;

    fn open(number: &str, balance: u32) -> LedgerCommand {
        LedgerCommand::Open {
            account_number: number.to_string(),
            holder_name: format!("holder {number}"),
            account_type: 1,
            balance: Decimal::from_u32(balance).unwrap(),
        }
    }

    #[test]
    fn process_some_commands() {
        let mut processor = InMemoryLedgerProcessor::new(InMemoryRecordStore::default());
        processor.process(open("1", 1000)).unwrap();
        processor.process(open("2", 200)).unwrap();
        processor
            .process(LedgerCommand::Transfer {
                from: "1".into(),
                to: "2".into(),
                amount: Decimal::from_u32(100).unwrap(),
            })
            .unwrap();
        assert_eq!(processor.accounts.len(), 2);
        assert_eq!(processor.accounts["1"].balance(), Decimal::from_u32(900).unwrap());
        assert_eq!(processor.accounts["2"].balance(), Decimal::from_u32(300).unwrap());

        let err = processor
            .process(LedgerCommand::Withdraw {
                account_number: "2".into(),
                amount: Decimal::from_u32(301).unwrap(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::AccountErr(AccountError::InsufficientFunds { .. })
        ));
        assert_eq!(processor.accounts["2"].balance(), Decimal::from_u32(300).unwrap());
    }

    #[test]
    fn transfer_with_unknown_side_changes_nothing() {
        let mut processor = InMemoryLedgerProcessor::new(InMemoryRecordStore::default());
        processor.process(open("1", 10)).unwrap();

        let err = processor
            .process(LedgerCommand::Transfer {
                from: "1".into(),
                to: "9".into(),
                amount: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(err, ProcessError::UnknownAccount(ref n) if n == "9"));
        assert_eq!(processor.accounts["1"].balance(), Decimal::TEN);

        let err = processor
            .process(LedgerCommand::Transfer {
                from: "9".into(),
                to: "1".into(),
                amount: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(err, ProcessError::UnknownAccount(ref n) if n == "9"));
        assert_eq!(processor.accounts.len(), 1);
    }

    #[test]
    fn transfer_to_itself_is_refused() {
        let mut processor = InMemoryLedgerProcessor::new(InMemoryRecordStore::default());
        processor.process(open("1", 10)).unwrap();

        let err = processor
            .process(LedgerCommand::Transfer {
                from: "1".into(),
                to: "1".into(),
                amount: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::CommandErr(CommandError::SameAccount(ref n)) if n == "1"
        ));
        assert_eq!(processor.accounts["1"].balance(), Decimal::TEN);
    }

    #[test]
    fn overflowing_credit_keeps_both_accounts() {
        let mut processor = InMemoryLedgerProcessor::new(InMemoryRecordStore::default());
        processor.process(open("1", 10)).unwrap();
        processor
            .process(LedgerCommand::Open {
                account_number: "2".into(),
                holder_name: "full".into(),
                account_type: 1,
                balance: Decimal::MAX,
            })
            .unwrap();

        let err = processor
            .process(LedgerCommand::Deposit {
                account_number: "2".into(),
                amount: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::AccountErr(AccountError::BalanceOverflow { .. })
        ));

        let err = processor
            .process(LedgerCommand::Transfer {
                from: "1".into(),
                to: "2".into(),
                amount: Decimal::ONE,
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::AccountErr(AccountError::BalanceOverflow { .. })
        ));
        assert_eq!(processor.accounts.len(), 2);
        assert_eq!(processor.accounts["1"].balance(), Decimal::TEN);
        assert_eq!(processor.accounts["2"].balance(), Decimal::MAX);
    }

    #[test]
    fn save_and_load_replace_working_copy() {
        let mut processor = InMemoryLedgerProcessor::new(InMemoryRecordStore::default());
        processor.process(open("1", 10)).unwrap();
        processor
            .process(LedgerCommand::Save {
                account_number: "1".into(),
            })
            .unwrap();
        processor
            .process(LedgerCommand::Deposit {
                account_number: "1".into(),
                amount: Decimal::TEN,
            })
            .unwrap();
        assert_eq!(processor.accounts["1"].balance(), Decimal::from_u32(20).unwrap());

        processor
            .process(LedgerCommand::Load {
                account_number: "1".into(),
            })
            .unwrap();
        assert_eq!(processor.accounts["1"].balance(), Decimal::TEN);
        assert_eq!(processor.accounts["1"].holder_name(), "holder 1");

        let err = processor
            .process(LedgerCommand::Load {
                account_number: "2".into(),
            })
            .unwrap_err();
        assert!(matches!(
            err,
            ProcessError::StoreErr(StoreError::StorageUnavailable { .. })
        ));
        assert!(!processor.accounts.contains_key("2"));

        let err = processor
            .process(LedgerCommand::Save {
                account_number: "2".into(),
            })
            .unwrap_err();
        assert!(matches!(err, ProcessError::UnknownAccount(_)));
        assert_eq!(processor.store.len(), 1);
    }
}
