pub mod actions;
pub mod error;
pub mod instruction;

use std::mem::MaybeUninit;

use actions::process_action;
#[cfg(not(feature = "no-entrypoint"))]
use pinocchio::lazy_entrypoint;
use pinocchio::{
    account_info::AccountInfo,
    lazy_entrypoint::{InstructionContext, MaybeAccount},
    program_error::ProgramError,
    ProgramResult,
};
use pinocchio_pubkey::declare_id;

declare_id!("Fg6PaFpoGXkYsidMpWTK6W2BeZ7FEfcYkg476zPFsLnS");

/// Upper bound on accounts a single invocation can reference.
pub const MAX_ACCOUNTS: usize = 64;

pinocchio::default_allocator!();
pinocchio::default_panic_handler!();

#[cfg(not(feature = "no-entrypoint"))]
lazy_entrypoint!(process_instruction);

#[cfg(not(feature = "no-entrypoint"))]
solana_security_txt::security_txt! {
    name: "Haven Wallet",
    project_url: "https://haven.money",
    contacts: "email:security@haven.money",
    policy: "https://github.com/haven-money/haven/blob/main/SECURITY.md"
}

pub fn process_instruction(mut ctx: InstructionContext) -> ProgramResult {
    const AI: MaybeUninit<AccountInfo> = MaybeUninit::<AccountInfo>::uninit();
    let mut accounts = [AI; MAX_ACCOUNTS];
    let mut index: usize = 0;
    while let Ok(acc) = ctx.next_account() {
        if index >= MAX_ACCOUNTS {
            return Err(ProgramError::NotEnoughAccountKeys);
        }
        match acc {
            MaybeAccount::Account(account) => {
                accounts[index].write(account);
            },
            MaybeAccount::Duplicated(account_index) => {
                accounts[index].write(unsafe {
                    accounts[account_index as usize].assume_init_ref().clone()
                });
            },
        }
        index += 1;
    }
    let instruction = unsafe { ctx.instruction_data_unchecked() };
    process_action(
        unsafe { core::slice::from_raw_parts(accounts.as_ptr() as _, index) },
        instruction,
    )
}
