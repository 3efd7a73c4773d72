//! Owner-authorized execution of a batch of sub-operations, signed with the
//! wallet's derivation proof.

use haven_assertions::*;
use haven_compact_instructions::InstructionIterator;
use haven_state::{
    wallet::{wallet_account_signer, Wallet},
    Discriminator, IntoBytes, Transmutable,
};
use pinocchio::{account_info::AccountInfo, program_error::ProgramError, ProgramResult};
use static_assertions::const_assert_eq;

use crate::{
    error::WalletError,
    instruction::{
        accounts::{Context, SignV1Accounts},
        WalletInstruction,
    },
};

#[repr(C, align(8))]
#[derive(Debug)]
pub struct SignV1Args {
    discriminator: WalletInstruction,
    /// Length of the compact instruction payload that follows this header.
    pub instruction_payload_len: u16,
    _padding: [u8; 4],
}

const_assert_eq!(core::mem::size_of::<SignV1Args>(), 8);

impl SignV1Args {
    pub fn new(instruction_payload_len: u16) -> Self {
        Self {
            discriminator: WalletInstruction::SignV1,
            instruction_payload_len,
            _padding: [0; 4],
        }
    }
}

impl Transmutable for SignV1Args {
    const LEN: usize = core::mem::size_of::<Self>();
}

impl IntoBytes for SignV1Args {
    fn into_bytes(&self) -> Result<&[u8], ProgramError> {
        Ok(unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) })
    }
}

pub struct SignV1<'a> {
    pub args: &'a SignV1Args,
    pub instruction_payload: &'a [u8],
}

impl<'a> SignV1<'a> {
    pub fn from_instruction_bytes(bytes: &'a [u8]) -> Result<Self, ProgramError> {
        if bytes.len() < SignV1Args::LEN {
            return Err(WalletError::InvalidSignInstructionData.into());
        }
        let (args, instruction_payload) = unsafe { bytes.split_at_unchecked(SignV1Args::LEN) };
        let args = unsafe { SignV1Args::load_unchecked(args)? };
        if instruction_payload.len() != args.instruction_payload_len as usize {
            return Err(WalletError::InvalidSignInstructionData.into());
        }
        Ok(Self {
            args,
            instruction_payload,
        })
    }
}

#[inline(always)]
pub fn sign_v1(
    ctx: Context<SignV1Accounts>,
    all_accounts: &[AccountInfo],
    data: &[u8],
) -> ProgramResult {
    let sign = SignV1::from_instruction_bytes(data)?;

    check_self_owned(
        ctx.accounts.wallet,
        &crate::ID,
        WalletError::OwnerMismatchWalletAccount,
    )?;

    // Copy the signing seeds out of the account so no borrow is held across
    // the CPIs below.
    let (uid, bump) = {
        let wallet_data = unsafe { ctx.accounts.wallet.borrow_data_unchecked() };
        if wallet_data.len() < Wallet::LEN
            || wallet_data[0] != Discriminator::WalletAccount as u8
        {
            return Err(WalletError::InvalidWalletAccountDiscriminator.into());
        }
        let wallet = unsafe { Wallet::load_unchecked(&wallet_data[..Wallet::LEN])? };

        check_signer(ctx.accounts.owner, WalletError::Unauthorized)?;
        if ctx.accounts.owner.key() != &wallet.owner {
            return Err(WalletError::Unauthorized.into());
        }

        (wallet.uid, [wallet.bump])
    };

    let restricted_keys = [ctx.accounts.payer.key(), ctx.accounts.owner.key()];
    let ix_iter = InstructionIterator::new(
        all_accounts,
        sign.instruction_payload,
        ctx.accounts.wallet.key(),
        &restricted_keys,
    )
    .map_err(WalletError::InstructionError)?;

    for ix in ix_iter {
        match ix {
            Ok(ix) => {
                ix.execute(
                    all_accounts,
                    ctx.accounts.wallet.key(),
                    &[wallet_account_signer(&uid, &bump).as_slice().into()],
                )?;
            },
            Err(e) => return Err(WalletError::InstructionError(e).into()),
        }
    }

    Ok(())
}
