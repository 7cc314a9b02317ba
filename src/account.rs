use std::fmt;

use rust_decimal::{Decimal, prelude::Zero};
use thiserror::Error;

/// Caller-defined classification code, opaque to the ledger.
pub type AccountType = i32;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AccountEventKind {
    Deposited,
    Withdrawn,
}

/// Validated balance change. Only produced by the `handle_*` methods, so
/// applying one never breaks the non-negative balance invariant.
/// Carries the already checked resulting balance.
#[derive(Debug)]
pub struct AccountEvent {
    amount: Decimal,
    balance: Decimal,
    kind: AccountEventKind,
}

impl AccountEvent {
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn kind(&self) -> AccountEventKind {
        self.kind
    }

    pub fn resulting_balance(&self) -> Decimal {
        self.balance
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum AccountError {
    #[error("Insufficient funds: requested {requested}, available {available}")]
    InsufficientFunds {
        requested: Decimal,
        available: Decimal,
    },
    #[error("Balance {balance} cannot take {amount} more")]
    BalanceOverflow { balance: Decimal, amount: Decimal },
    #[error("Amount must not be negative, got {0}")]
    NegativeAmount(Decimal),
}

/// Plain field values of an [`Account`], used by record stores to encode and
/// rebuild accounts without reaching into private state.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AccountSnapshot {
    pub holder_name: String,
    pub account_number: String,
    pub account_type: AccountType,
    pub balance: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Account {
    holder_name: String,
    account_number: String,
    account_type: AccountType,
    balance: Decimal,
}

impl Account {
    pub fn new(
        holder_name: impl Into<String>,
        account_number: impl Into<String>,
        account_type: AccountType,
        balance: Decimal,
    ) -> Self {
        Self {
            holder_name: holder_name.into(),
            account_number: account_number.into(),
            account_type,
            balance,
        }
    }

    pub fn balance(&self) -> Decimal {
        self.balance
    }

    pub fn account_number(&self) -> &str {
        &self.account_number
    }

    pub fn holder_name(&self) -> &str {
        &self.holder_name
    }

    pub fn account_type(&self) -> AccountType {
        self.account_type
    }

    pub fn to_snapshot(&self) -> AccountSnapshot {
        AccountSnapshot {
            holder_name: self.holder_name.clone(),
            account_number: self.account_number.clone(),
            account_type: self.account_type,
            balance: self.balance,
        }
    }

    pub fn apply(&mut self, event: &AccountEvent) {
        self.balance = event.balance;
    }

    pub fn handle_deposit(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount < Decimal::zero() {
            return Err(AccountError::NegativeAmount(amount));
        }
        let balance = self
            .balance
            .checked_add(amount)
            .ok_or(AccountError::BalanceOverflow {
                balance: self.balance,
                amount,
            })?;
        Ok(AccountEvent {
            amount,
            balance,
            kind: AccountEventKind::Deposited,
        })
    }

    pub fn handle_withdrawal(&self, amount: Decimal) -> Result<AccountEvent, AccountError> {
        if amount < Decimal::zero() {
            return Err(AccountError::NegativeAmount(amount));
        }
        if amount > self.balance {
            return Err(AccountError::InsufficientFunds {
                requested: amount,
                available: self.balance,
            });
        }
        let balance = self
            .balance
            .checked_sub(amount)
            .ok_or(AccountError::BalanceOverflow {
                balance: self.balance,
                amount,
            })?;
        Ok(AccountEvent {
            amount,
            balance,
            kind: AccountEventKind::Withdrawn,
        })
    }

    pub fn deposit(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let evt = self.handle_deposit(amount)?;
        self.apply(&evt);
        Ok(())
    }

    pub fn withdraw(&mut self, amount: Decimal) -> Result<(), AccountError> {
        let evt = self.handle_withdrawal(amount)?;
        self.apply(&evt);
        Ok(())
    }

    /// Moves `amount` from this account into `target`.
    ///
    /// Both sides are validated before either is touched, so on error
    /// neither balance changes.
    pub fn transfer(&mut self, target: &mut Account, amount: Decimal) -> Result<(), AccountError> {
        let withdrawn = self.handle_withdrawal(amount)?;
        let deposited = target.handle_deposit(amount)?;
        self.apply(&withdrawn);
        target.apply(&deposited);
        Ok(())
    }
}

impl From<AccountSnapshot> for Account {
    fn from(snapshot: AccountSnapshot) -> Self {
        Self {
            holder_name: snapshot.holder_name,
            account_number: snapshot.account_number,
            account_type: snapshot.account_type,
            balance: snapshot.balance,
        }
    }
}

impl fmt::Display for Account {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Account Holder's Name: {}", self.holder_name)?;
        writeln!(f, "Account Number: {}", self.account_number)?;
        writeln!(f, "Account Type: {}", self.account_type)?;
        writeln!(f, "Current Balance: RM{}", self.balance)
    }
}
