pub mod create_v1;
pub mod set_guardians_v1;
pub mod sign_v1;

use pinocchio::{account_info::AccountInfo, program_error::ProgramError, ProgramResult};

use self::{create_v1::*, set_guardians_v1::*, sign_v1::*};
use crate::instruction::{
    accounts::{CreateV1Accounts, SetGuardiansV1Accounts, SignV1Accounts},
    WalletInstruction,
};

#[inline(always)]
pub fn process_action(accounts: &[AccountInfo], data: &[u8]) -> ProgramResult {
    if data.len() < 2 {
        return Err(ProgramError::InvalidInstructionData);
    }
    let discriminator = u16::from_le_bytes([data[0], data[1]]);
    let ix = WalletInstruction::try_from(discriminator)
        .map_err(|_| ProgramError::InvalidInstructionData)?;
    match ix {
        WalletInstruction::CreateV1 => {
            let ctx = CreateV1Accounts::context(accounts)?;
            create_v1(ctx, data)
        },
        WalletInstruction::SetGuardiansV1 => {
            let ctx = SetGuardiansV1Accounts::context(accounts)?;
            set_guardians_v1(ctx, data)
        },
        WalletInstruction::SignV1 => {
            let ctx = SignV1Accounts::context(accounts)?;
            sign_v1(ctx, accounts, data)
        },
    }
}
