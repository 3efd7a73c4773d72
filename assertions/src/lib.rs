//! Small account-precondition checks shared by the wallet program's
//! instruction handlers. Each helper takes the error to surface so callers
//! keep their own taxonomy.

use pinocchio::{account_info::AccountInfo, program_error::ProgramError, pubkey::Pubkey};

/// The account must have signed the current transaction.
#[inline(always)]
pub fn check_signer<E: Into<ProgramError>>(
    account: &AccountInfo,
    error: E,
) -> Result<(), ProgramError> {
    if !account.is_signer() {
        return Err(error.into());
    }
    Ok(())
}

/// The account must still be owned by the system program, i.e. not yet
/// allocated by any other program.
#[inline(always)]
pub fn check_system_owner<E: Into<ProgramError>>(
    account: &AccountInfo,
    error: E,
) -> Result<(), ProgramError> {
    if unsafe { account.owner() } != &pinocchio_system::ID {
        return Err(error.into());
    }
    Ok(())
}

/// The account must hold no lamports. Together with [`check_system_owner`]
/// this guards account creation against an address that is already in use.
#[inline(always)]
pub fn check_zero_balance<E: Into<ProgramError>>(
    account: &AccountInfo,
    error: E,
) -> Result<(), ProgramError> {
    if account.lamports() != 0 {
        return Err(error.into());
    }
    Ok(())
}

/// The account must be owned by `program_id`.
#[inline(always)]
pub fn check_self_owned<E: Into<ProgramError>>(
    account: &AccountInfo,
    program_id: &Pubkey,
    error: E,
) -> Result<(), ProgramError> {
    if unsafe { account.owner() } != program_id {
        return Err(error.into());
    }
    Ok(())
}
