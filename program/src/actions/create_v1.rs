//! Creation of a new wallet account at its derived address.

use haven_assertions::*;
use haven_state::{
    wallet::{
        validate_uid, wallet_account_seeds, wallet_account_signer, Wallet, WalletBuilder,
        MAX_GUARDIANS, UID_LEN,
    },
    IntoBytes, Transmutable,
};
use pinocchio::{
    msg,
    program_error::ProgramError,
    pubkey,
    sysvars::{clock::Clock, rent::Rent, Sysvar},
    ProgramResult,
};
use pinocchio_system::instructions::CreateAccount;
use static_assertions::const_assert_eq;

use crate::{
    error::WalletError,
    instruction::{
        accounts::{Context, CreateV1Accounts},
        WalletInstruction,
    },
};

#[repr(C, align(8))]
#[derive(Debug)]
pub struct CreateV1Args {
    discriminator: WalletInstruction,
    pub bump: u8,
    /// Guardian capacity of the new wallet. This many 32-byte slots are
    /// reserved forever; the sequence itself starts out empty.
    pub num_guardians: u8,
    pub uid: [u8; UID_LEN],
    _padding: [u8; 6],
    /// Stored verbatim; read by the recovery protocol, not by this program.
    pub recovery_grace_period: i64,
}

const_assert_eq!(core::mem::size_of::<CreateV1Args>(), 24);

impl CreateV1Args {
    pub fn new(uid: [u8; UID_LEN], bump: u8, num_guardians: u8, recovery_grace_period: i64) -> Self {
        Self {
            discriminator: WalletInstruction::CreateV1,
            bump,
            num_guardians,
            uid,
            _padding: [0; 6],
            recovery_grace_period,
        }
    }
}

impl Transmutable for CreateV1Args {
    const LEN: usize = core::mem::size_of::<Self>();
}

impl IntoBytes for CreateV1Args {
    fn into_bytes(&self) -> Result<&[u8], ProgramError> {
        Ok(unsafe { core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN) })
    }
}

pub struct CreateV1<'a> {
    pub args: &'a CreateV1Args,
}

impl<'a> CreateV1<'a> {
    pub fn from_instruction_bytes(bytes: &'a [u8]) -> Result<Self, ProgramError> {
        if bytes.len() < CreateV1Args::LEN {
            return Err(WalletError::InvalidCreateInstructionData.into());
        }
        let (args, _) = unsafe { bytes.split_at_unchecked(CreateV1Args::LEN) };
        let args = unsafe { CreateV1Args::load_unchecked(args)? };
        Ok(Self { args })
    }
}

#[inline(always)]
pub fn create_v1(ctx: Context<CreateV1Accounts>, data: &[u8]) -> ProgramResult {
    let create = CreateV1::from_instruction_bytes(data)?;

    validate_uid(&create.args.uid).map_err(|_| WalletError::InvalidUid)?;
    if create.args.num_guardians > MAX_GUARDIANS {
        return Err(WalletError::TooManyGuardians.into());
    }

    // Re-creation guard: the derived address must not hold an account yet.
    check_system_owner(ctx.accounts.wallet, WalletError::WalletAccountInUse)?;
    check_zero_balance(ctx.accounts.wallet, WalletError::WalletAccountInUse)?;
    check_signer(ctx.accounts.payer, WalletError::Unauthorized)?;

    // Only the canonical derivation is accepted. Every valid bump yields a
    // usable program address, so accepting any of them would let one
    // identifier map to several wallet accounts.
    let (derived, canonical_bump) =
        pubkey::find_program_address(&wallet_account_seeds(&create.args.uid), &crate::ID);
    if &derived != ctx.accounts.wallet.key() || canonical_bump != create.args.bump {
        return Err(WalletError::InvalidSeedWalletAccount.into());
    }
    let bump = [canonical_bump];

    let account_size = Wallet::size_of(create.args.num_guardians);
    let lamports_needed = Rent::get()?.minimum_balance(account_size);

    CreateAccount {
        from: ctx.accounts.payer,
        to: ctx.accounts.wallet,
        lamports: lamports_needed,
        space: account_size as u64,
        owner: &crate::ID,
    }
    .invoke_signed(&[wallet_account_signer(&create.args.uid, &bump)
        .as_slice()
        .into()])?;

    let now = Clock::get()?.unix_timestamp;
    let wallet = Wallet::new(
        create.args.uid,
        create.args.bump,
        create.args.num_guardians,
        *ctx.accounts.owner.key(),
        create.args.recovery_grace_period,
        now,
    );
    let wallet_data = unsafe { ctx.accounts.wallet.borrow_mut_data_unchecked() };
    WalletBuilder::create(wallet_data, wallet)?;

    msg!("wallet created");
    Ok(())
}
