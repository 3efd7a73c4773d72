use pinocchio::{account_info::AccountInfo, program_error::ProgramError};

use crate::error::WalletError;

pub struct Context<T> {
    pub accounts: T,
}

pub struct CreateV1Accounts<'a> {
    pub wallet: &'a AccountInfo,
    pub payer: &'a AccountInfo,
    pub owner: &'a AccountInfo,
    pub system_program: &'a AccountInfo,
}

impl<'a> CreateV1Accounts<'a> {
    pub fn context(accounts: &'a [AccountInfo]) -> Result<Context<Self>, ProgramError> {
        if accounts.len() < 4 {
            return Err(WalletError::InvalidAccountsLength.into());
        }
        Ok(Context {
            accounts: Self {
                wallet: &accounts[0],
                payer: &accounts[1],
                owner: &accounts[2],
                system_program: &accounts[3],
            },
        })
    }
}

pub struct SetGuardiansV1Accounts<'a> {
    pub wallet: &'a AccountInfo,
    pub owner: &'a AccountInfo,
}

impl<'a> SetGuardiansV1Accounts<'a> {
    pub fn context(accounts: &'a [AccountInfo]) -> Result<Context<Self>, ProgramError> {
        if accounts.len() < 2 {
            return Err(WalletError::InvalidAccountsLength.into());
        }
        Ok(Context {
            accounts: Self {
                wallet: &accounts[0],
                owner: &accounts[1],
            },
        })
    }
}

pub struct SignV1Accounts<'a> {
    pub wallet: &'a AccountInfo,
    pub payer: &'a AccountInfo,
    pub owner: &'a AccountInfo,
}

impl<'a> SignV1Accounts<'a> {
    pub fn context(accounts: &'a [AccountInfo]) -> Result<Context<Self>, ProgramError> {
        if accounts.len() < 3 {
            return Err(WalletError::InvalidAccountsLength.into());
        }
        Ok(Context {
            accounts: Self {
                wallet: &accounts[0],
                payer: &accounts[1],
                owner: &accounts[2],
            },
        })
    }
}
