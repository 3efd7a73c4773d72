//! Compact encoding for the sub-operations a wallet executes on behalf of
//! its owner. The payload references accounts by their index in the outer
//! transaction instead of repeating 32-byte keys:
//!
//! `count u8 | per instruction: program_id_index u8, num_accounts u8,
//! account_index u8 * num_accounts, data_len u16 le, data`
//!
//! The `client` feature adds the off-chain builder that produces this
//! encoding from regular `solana_program` instructions.

mod compact_instructions;

pub use compact_instructions::*;
use pinocchio::{
    account_info::AccountInfo,
    instruction::{Account, AccountMeta, Instruction, Signer},
    program::invoke_signed_unchecked,
    program_error::ProgramError,
    pubkey::Pubkey,
    ProgramResult,
};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum InstructionError {
    #[error("Missing instructions")]
    MissingInstructions,
    #[error("Missing AccountInfo")]
    MissingAccountInfo,
    #[error("Missing Data")]
    MissingData,
    #[error("Too many accounts")]
    TooManyAccounts,
}

pub const MAX_ACCOUNTS: usize = 64;

/// One decoded sub-operation, ready for CPI.
pub struct InstructionHolder<'a> {
    pub program_id: &'a Pubkey,
    pub cpi_accounts: Vec<Account<'a>>,
    pub indexes: Vec<usize>,
    pub accounts: Vec<AccountMeta<'a>>,
    pub data: &'a [u8],
}

impl<'a> InstructionHolder<'a> {
    pub fn borrow(&'a self) -> Instruction<'a, 'a, 'a, 'a> {
        Instruction {
            program_id: self.program_id,
            accounts: &self.accounts,
            data: self.data,
        }
    }

    /// Invokes the sub-operation with the wallet PDA as signer.
    ///
    /// System transfers out of the wallet are applied as a direct lamport
    /// move: the runtime rejects system-program transfers from accounts
    /// that carry data, and the wallet account always does.
    pub fn execute(
        &'a self,
        all_accounts: &'a [AccountInfo],
        wallet_key: &'a Pubkey,
        wallet_signer: &[Signer],
    ) -> ProgramResult {
        if self.program_id == &pinocchio_system::ID
            && self.data.len() >= 12
            && self.data[0..4] == [2, 0, 0, 0]
            && self.indexes.len() >= 2
            && self.accounts[0].pubkey == wallet_key
        {
            let amount = u64::from_le_bytes(
                self.data[4..12]
                    .try_into()
                    .map_err(|_| ProgramError::InvalidInstructionData)?,
            );
            let from = &all_accounts[self.indexes[0]];
            let to = &all_accounts[self.indexes[1]];
            if from.lamports() < amount {
                return Err(ProgramError::InsufficientFunds);
            }
            unsafe {
                *from.borrow_mut_lamports_unchecked() -= amount;
                *to.borrow_mut_lamports_unchecked() += amount;
            }
        } else {
            unsafe { invoke_signed_unchecked(&self.borrow(), &self.cpi_accounts, wallet_signer) }
        }
        Ok(())
    }
}

/// Streaming decoder over a compact payload. Signer privileges of the
/// restricted keys (the fee payer and the owner) are never forwarded into
/// sub-operations; the wallet PDA is the only key this program adds as a
/// signer.
pub struct InstructionIterator<'a> {
    accounts: &'a [AccountInfo],
    data: &'a [u8],
    cursor: usize,
    remaining: usize,
    signer: &'a Pubkey,
    restricted_keys: &'a [&'a Pubkey],
}

impl<'a> InstructionIterator<'a> {
    pub fn new(
        accounts: &'a [AccountInfo],
        data: &'a [u8],
        signer: &'a Pubkey,
        restricted_keys: &'a [&'a Pubkey],
    ) -> Result<Self, InstructionError> {
        if data.is_empty() {
            return Err(InstructionError::MissingInstructions);
        }
        Ok(Self {
            accounts,
            data,
            cursor: 1, // Start after the number of instructions
            remaining: data[0] as usize,
            signer,
            restricted_keys,
        })
    }

    fn account(&self, index: usize) -> Result<&'a AccountInfo, InstructionError> {
        self.accounts
            .get(index)
            .ok_or(InstructionError::MissingAccountInfo)
    }

    fn parse_next_instruction(&mut self) -> Result<InstructionHolder<'a>, InstructionError> {
        let program_id_index = self.read_u8()? as usize;
        let program_id = self.account(program_id_index)?.key();

        let num_accounts = self.read_u8()? as usize;
        if num_accounts > MAX_ACCOUNTS {
            return Err(InstructionError::TooManyAccounts);
        }

        let mut accounts = Vec::with_capacity(num_accounts);
        let mut cpi_accounts = Vec::with_capacity(num_accounts);
        let mut indexes = Vec::with_capacity(num_accounts);
        for _ in 0..num_accounts {
            let account_index = self.read_u8()? as usize;
            let account = self.account(account_index)?;
            let pubkey = account.key();

            let is_signer = (pubkey == self.signer || account.is_signer())
                && !self.restricted_keys.contains(&pubkey);

            accounts.push(AccountMeta {
                pubkey,
                is_signer,
                is_writable: account.is_writable(),
            });
            cpi_accounts.push(Account::from(account));
            indexes.push(account_index);
        }

        let data_len = self.read_u16()? as usize;
        let data = self.read_slice(data_len)?;

        Ok(InstructionHolder {
            program_id,
            cpi_accounts,
            indexes,
            accounts,
            data,
        })
    }

    #[inline(always)]
    fn read_u8(&mut self) -> Result<u8, InstructionError> {
        if self.cursor >= self.data.len() {
            return Err(InstructionError::MissingData);
        }
        let value = self.data[self.cursor];
        self.cursor += 1;
        Ok(value)
    }

    #[inline(always)]
    fn read_u16(&mut self) -> Result<u16, InstructionError> {
        if self.cursor + 2 > self.data.len() {
            return Err(InstructionError::MissingData);
        }
        let value =
            u16::from_le_bytes(self.data[self.cursor..self.cursor + 2].try_into().unwrap());
        self.cursor += 2;
        Ok(value)
    }

    #[inline(always)]
    fn read_slice(&mut self, len: usize) -> Result<&'a [u8], InstructionError> {
        if self.cursor + len > self.data.len() {
            return Err(InstructionError::MissingData);
        }
        let slice = &self.data[self.cursor..self.cursor + len];
        self.cursor += len;
        Ok(slice)
    }
}

impl<'a> Iterator for InstructionIterator<'a> {
    type Item = Result<InstructionHolder<'a>, InstructionError>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        self.remaining -= 1;
        Some(self.parse_next_instruction())
    }
}
