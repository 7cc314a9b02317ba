use rust_decimal::{Decimal, prelude::Zero};
use serde::Deserialize;
use thiserror::Error;

use crate::account::AccountType;

#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Open,
    Deposit,
    Withdraw,
    Transfer,
    Save,
    Load,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LedgerCommand {
    Open {
        account_number: String,
        holder_name: String,
        account_type: AccountType,
        balance: Decimal,
    },
    Deposit {
        account_number: String,
        amount: Decimal,
    },
    Withdraw {
        account_number: String,
        amount: Decimal,
    },
    Transfer {
        from: String,
        to: String,
        amount: Decimal,
    },
    Save {
        account_number: String,
    },
    Load {
        account_number: String,
    },
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum CommandError {
    #[error("Amount is required for {kind:?}")]
    AmountRequired { kind: OperationKind },
    #[error("Amount must not be negative for {kind:?}")]
    NegativeAmount { kind: OperationKind },
    #[error("Target account is required for Transfer")]
    TargetRequired,
    #[error("Cannot transfer from account `{0}` to itself")]
    SameAccount(String),
}

impl LedgerCommand {
    pub fn parse(
        kind: OperationKind,
        account_number: String,
        target: Option<String>,
        amount: Option<Decimal>,
        holder_name: Option<String>,
        account_type: Option<AccountType>,
    ) -> Result<Self, CommandError> {
        match kind {
            OperationKind::Open => Ok(Self::Open {
                account_number,
                holder_name: holder_name.unwrap_or_default(),
                account_type: account_type.unwrap_or_default(),
                balance: Self::non_negative(kind, amount.unwrap_or_default())?,
            }),
            OperationKind::Deposit => Ok(Self::Deposit {
                account_number,
                amount: Self::required_amount(kind, amount)?,
            }),
            OperationKind::Withdraw => Ok(Self::Withdraw {
                account_number,
                amount: Self::required_amount(kind, amount)?,
            }),
            OperationKind::Transfer => {
                let amount = Self::required_amount(kind, amount)?;
                let to = target.ok_or(CommandError::TargetRequired)?;
                if to == account_number {
                    return Err(CommandError::SameAccount(to));
                }
                Ok(Self::Transfer {
                    from: account_number,
                    to,
                    amount,
                })
            }
            OperationKind::Save => Ok(Self::Save { account_number }),
            OperationKind::Load => Ok(Self::Load { account_number }),
        }
    }

    fn required_amount(kind: OperationKind, amount: Option<Decimal>) -> Result<Decimal, CommandError> {
        let Some(amount) = amount else {
            return Err(CommandError::AmountRequired { kind });
        };
        Self::non_negative(kind, amount)
    }

    fn non_negative(kind: OperationKind, amount: Decimal) -> Result<Decimal, CommandError> {
        if amount >= Decimal::zero() {
            Ok(amount)
        } else {
            Err(CommandError::NegativeAmount { kind })
        }
    }
}
