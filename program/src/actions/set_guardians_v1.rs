//! Replacement of a wallet's guardian sequence by its owner.

use haven_assertions::*;
use haven_state::{
    wallet::{WalletBuilder, GUARDIAN_LEN},
    IntoBytes, Transmutable,
};
use pinocchio::{
    program_error::ProgramError,
    sysvars::{clock::Clock, Sysvar},
    ProgramResult,
};
use static_assertions::const_assert_eq;

use crate::{
    error::WalletError,
    instruction::{
        accounts::{Context, SetGuardiansV1Accounts},
        WalletInstruction,
    },
};

#[repr(C, align(8))]
#[derive(Debug)]
pub struct SetGuardiansV1Args {
    discriminator: WalletInstruction,
    /// Number of guardian keys following this header. The full sequence
    /// replaces the stored one verbatim; an empty sequence clears it.
    pub num_guardians: u16,
    _padding: [u8; 4],
}

const_assert_eq!(core::mem::size_of::<SetGuardiansV1Args>(), 8);

impl SetGuardiansV1Args {
    pub fn new(num_guardians: u16) -> Self {
        Self {
            discriminator: WalletInstruction::SetGuardiansV1,
            num_guardians,
            _padding: [0; 4],
        }
    }
}

impl Transmutable for SetGuardiansV1Args {
    const LEN: usize = core::mem::size_of::<Self>();
}

impl IntoBytes for SetGuardiansV1Args {
    fn into_bytes(&self) -> Result<&[u8], ProgramError> {
        Ok(unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) })
    }
}

pub struct SetGuardiansV1<'a> {
    pub args: &'a SetGuardiansV1Args,
    pub guardians: &'a [u8],
}

impl<'a> SetGuardiansV1<'a> {
    pub fn from_instruction_bytes(bytes: &'a [u8]) -> Result<Self, ProgramError> {
        if bytes.len() < SetGuardiansV1Args::LEN {
            return Err(WalletError::InvalidSetGuardiansInstructionData.into());
        }
        let (args, guardians) = unsafe { bytes.split_at_unchecked(SetGuardiansV1Args::LEN) };
        let args = unsafe { SetGuardiansV1Args::load_unchecked(args)? };
        if guardians.len() != args.num_guardians as usize * GUARDIAN_LEN {
            return Err(WalletError::InvalidSetGuardiansInstructionData.into());
        }
        Ok(Self { args, guardians })
    }
}

#[inline(always)]
pub fn set_guardians_v1(ctx: Context<SetGuardiansV1Accounts>, data: &[u8]) -> ProgramResult {
    let set_guardians = SetGuardiansV1::from_instruction_bytes(data)?;

    check_self_owned(
        ctx.accounts.wallet,
        &crate::ID,
        WalletError::OwnerMismatchWalletAccount,
    )?;

    let wallet_data = unsafe { ctx.accounts.wallet.borrow_mut_data_unchecked() };
    let mut builder = WalletBuilder::new_from_bytes(wallet_data)?;

    // Authorization first: the stored owner must have signed this call.
    check_signer(ctx.accounts.owner, WalletError::Unauthorized)?;
    if ctx.accounts.owner.key() != &builder.wallet.owner {
        return Err(WalletError::Unauthorized.into());
    }

    // The builder checks the fixed capacity before touching any slot, so an
    // oversized sequence leaves the stored one unchanged.
    let now = Clock::get()?.unix_timestamp;
    builder.set_guardians(set_guardians.guardians, now)?;

    Ok(())
}
