//! Layout and lifecycle of the wallet account.
//!
//! A wallet account is a fixed-size record: a 64-byte [`Wallet`] header
//! followed by `guardian_capacity` reserved 32-byte guardian slots. The
//! capacity is chosen at creation and never changes; only the first
//! `guardian_count` slots are live. The account lives at a PDA derived from
//! `["wallet", uid]`, which is also the seed set the program signs with when
//! it executes transactions on the wallet's behalf.

use pinocchio::{instruction::Seed, program_error::ProgramError, pubkey::Pubkey};
use static_assertions::const_assert_eq;

use crate::{Discriminator, IntoBytes, Transmutable, TransmutableMut, WalletStateError};

/// Number of bytes in a wallet identifier.
pub const UID_LEN: usize = 6;

/// Number of bytes in a guardian public key.
pub const GUARDIAN_LEN: usize = 32;

/// Protocol-wide upper bound on the guardian capacity of a single wallet.
pub const MAX_GUARDIANS: u8 = 16;

#[inline(always)]
pub fn wallet_account_seeds(uid: &[u8]) -> [&[u8]; 2] {
    [b"wallet".as_ref(), uid]
}

pub fn wallet_account_signer<'a>(uid: &'a [u8], bump: &'a [u8; 1]) -> [Seed<'a>; 3] {
    [
        b"wallet".as_ref().into(),
        uid.as_ref().into(),
        bump.as_ref().into(),
    ]
}

/// Checks the lexical rule for wallet identifiers: exactly [`UID_LEN`] bytes,
/// each ASCII alphanumeric. Case is significant and never folded.
pub fn validate_uid(uid: &[u8]) -> Result<(), WalletStateError> {
    if uid.len() != UID_LEN || !uid.iter().all(|b| b.is_ascii_alphanumeric()) {
        return Err(WalletStateError::InvalidUid);
    }
    Ok(())
}

/// Fixed header of a wallet account.
#[derive(Debug)]
#[repr(C, align(8))]
pub struct Wallet {
    /// Account type tag, always `Discriminator::WalletAccount`.
    pub discriminator: u8,
    /// The PDA bump proving the account address derivation.
    pub bump: u8,
    /// Identifier of the wallet, immutable after creation.
    pub uid: [u8; UID_LEN],
    /// The only key allowed to set guardians and execute transactions.
    pub owner: Pubkey,
    /// Maximum number of guardian slots reserved at creation.
    pub guardian_capacity: u8,
    /// Number of live guardian slots.
    pub guardian_count: u8,
    _padding: [u8; 6],
    /// Grace period (seconds) between the approval of a recovery and the
    /// moment the new owner is set. Stored verbatim; interpreted by the
    /// recovery protocol, not by this program.
    pub recovery_grace_period: i64,
    /// Unix timestamp (seconds) of the last mutation to this account.
    pub updated_at: i64,
}

const_assert_eq!(core::mem::size_of::<Wallet>(), 64);

impl Wallet {
    pub const LEN: usize = core::mem::size_of::<Wallet>();

    pub fn new(
        uid: [u8; UID_LEN],
        bump: u8,
        guardian_capacity: u8,
        owner: Pubkey,
        recovery_grace_period: i64,
        now: i64,
    ) -> Self {
        Self {
            discriminator: Discriminator::WalletAccount as u8,
            bump,
            uid,
            owner,
            guardian_capacity,
            guardian_count: 0,
            _padding: [0; 6],
            recovery_grace_period,
            updated_at: now,
        }
    }

    /// Total account size for a wallet with the given guardian capacity.
    /// Fixed forever once the account is allocated.
    pub fn size_of(guardian_capacity: u8) -> usize {
        Self::LEN + guardian_capacity as usize * GUARDIAN_LEN
    }

    /// Advances `updated_at`. The timestamp must strictly increase across
    /// mutations even when two of them land in the same ledger second.
    pub fn touch(&mut self, now: i64) {
        self.updated_at = now.max(self.updated_at + 1);
    }
}

impl Transmutable for Wallet {
    const LEN: usize = core::mem::size_of::<Wallet>();
}

impl TransmutableMut for Wallet {}

impl IntoBytes for Wallet {
    fn into_bytes(&self) -> Result<&[u8], ProgramError> {
        Ok(unsafe {
            core::slice::from_raw_parts(self as *const Self as *const u8, Self::LEN)
        })
    }
}

/// Mutable access to a wallet account's header and guardian slots.
pub struct WalletBuilder<'a> {
    pub wallet: &'a mut Wallet,
    guardian_slots: &'a mut [u8],
}

impl<'a> WalletBuilder<'a> {
    /// Writes a fresh header into `account_buffer` and hands back a builder
    /// over it. The buffer must be exactly the size reserved at creation.
    pub fn create(account_buffer: &'a mut [u8], wallet: Wallet) -> Result<Self, ProgramError> {
        if account_buffer.len() != Wallet::size_of(wallet.guardian_capacity) {
            return Err(WalletStateError::InvalidWalletData.into());
        }
        let (header_bytes, guardian_slots) = account_buffer.split_at_mut(Wallet::LEN);
        header_bytes.copy_from_slice(wallet.into_bytes()?);
        Ok(Self {
            wallet: unsafe { Wallet::load_mut_unchecked(header_bytes)? },
            guardian_slots,
        })
    }

    /// Reopens an existing wallet account.
    pub fn new_from_bytes(account_buffer: &'a mut [u8]) -> Result<Self, ProgramError> {
        if account_buffer.len() < Wallet::LEN
            || account_buffer[0] != Discriminator::WalletAccount as u8
        {
            return Err(WalletStateError::InvalidWalletData.into());
        }
        let (header_bytes, guardian_slots) = account_buffer.split_at_mut(Wallet::LEN);
        let wallet = unsafe { Wallet::load_mut_unchecked(header_bytes)? };
        if guardian_slots.len() != wallet.guardian_capacity as usize * GUARDIAN_LEN {
            return Err(WalletStateError::InvalidWalletData.into());
        }
        Ok(Self {
            wallet,
            guardian_slots,
        })
    }

    /// Replaces the guardian sequence verbatim: order preserved, duplicates
    /// kept, empty allowed. The capacity check happens before any byte of
    /// state changes, so a rejected call leaves the stored sequence intact.
    pub fn set_guardians(&mut self, guardians: &[u8], now: i64) -> Result<(), WalletStateError> {
        if guardians.len() % GUARDIAN_LEN != 0 {
            return Err(WalletStateError::InvalidGuardianData);
        }
        let count = guardians.len() / GUARDIAN_LEN;
        if count > self.wallet.guardian_capacity as usize {
            return Err(WalletStateError::GuardianCapacityExceeded);
        }
        self.guardian_slots[..guardians.len()].copy_from_slice(guardians);
        self.guardian_slots[guardians.len()..].fill(0);
        self.wallet.guardian_count = count as u8;
        self.wallet.touch(now);
        Ok(())
    }

    /// The live guardian slots, in storage order.
    pub fn guardians(&self) -> &[u8] {
        &self.guardian_slots[..self.wallet.guardian_count as usize * GUARDIAN_LEN]
    }
}

/// Read-only view over raw wallet account bytes, for clients and tests.
pub struct WalletView<'a> {
    pub wallet: &'a Wallet,
    guardian_slots: &'a [u8],
}

impl<'a> WalletView<'a> {
    pub fn from_bytes(bytes: &'a [u8]) -> Result<Self, ProgramError> {
        if bytes.len() < Wallet::LEN || bytes[0] != Discriminator::WalletAccount as u8 {
            return Err(WalletStateError::InvalidWalletData.into());
        }
        let (header_bytes, guardian_slots) = bytes.split_at(Wallet::LEN);
        let wallet = unsafe { Wallet::load_unchecked(header_bytes)? };
        if guardian_slots.len() != wallet.guardian_capacity as usize * GUARDIAN_LEN {
            return Err(WalletStateError::InvalidWalletData.into());
        }
        Ok(Self {
            wallet,
            guardian_slots,
        })
    }

    pub fn guardian(&self, index: usize) -> Option<&'a [u8]> {
        if index >= self.wallet.guardian_count as usize {
            return None;
        }
        Some(&self.guardian_slots[index * GUARDIAN_LEN..(index + 1) * GUARDIAN_LEN])
    }

    /// Iterates the live guardian keys in storage order.
    pub fn guardians(&self) -> core::slice::ChunksExact<'a, u8> {
        self.guardian_slots[..self.wallet.guardian_count as usize * GUARDIAN_LEN]
            .chunks_exact(GUARDIAN_LEN)
    }
}
