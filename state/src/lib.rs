//! State layer for the Haven wallet program: the wallet account layout,
//! identifier validation, and deterministic address derivation. Everything
//! here is plain bytes; accounts are read and written zero-copy through the
//! [`Transmutable`] family of traits.

use pinocchio::program_error::ProgramError;

pub mod wallet;

/// Type tag stored in the first byte of every program-owned account.
#[repr(u8)]
pub enum Discriminator {
    WalletAccount = 1,
}

/// Errors surfaced by the state layer. Codes start at 1000 so they never
/// collide with the program crate's own error codes.
#[derive(Debug)]
pub enum WalletStateError {
    /// Account data is too short or carries the wrong discriminator
    InvalidWalletData = 1000,
    /// Identifier is not exactly 6 ASCII alphanumeric characters
    InvalidUid,
    /// Guardian payload is not a whole number of public keys
    InvalidGuardianData,
    /// More guardians supplied than the capacity fixed at creation
    GuardianCapacityExceeded,
}

impl From<WalletStateError> for ProgramError {
    fn from(e: WalletStateError) -> Self {
        ProgramError::Custom(e as u32)
    }
}

/// Marker trait for types that can be cast from a raw pointer.
///
/// It is up to the type implementing this trait to guarantee that the cast is
/// safe, i.e., the fields of the type are well aligned and there are no
/// padding bytes.
pub trait Transmutable: Sized {
    /// The length of the type.
    const LEN: usize;

    /// Return a `T` reference from the given bytes.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `bytes` contains a valid representation
    /// of `T`.
    #[inline(always)]
    unsafe fn load_unchecked(bytes: &[u8]) -> Result<&Self, ProgramError> {
        if bytes.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(&*(bytes.as_ptr() as *const Self))
    }
}

/// Marker trait for types that can be mutably cast from a raw pointer.
pub trait TransmutableMut: Transmutable {
    /// Return a mutable `T` reference from the given bytes.
    ///
    /// # Safety
    ///
    /// The caller must ensure that `bytes` contains a valid representation
    /// of `T`.
    #[inline(always)]
    unsafe fn load_mut_unchecked(bytes: &mut [u8]) -> Result<&mut Self, ProgramError> {
        if bytes.len() != Self::LEN {
            return Err(ProgramError::InvalidAccountData);
        }
        Ok(&mut *(bytes.as_mut_ptr() as *mut Self))
    }
}

pub trait IntoBytes {
    fn into_bytes(&self) -> Result<&[u8], ProgramError>;
}
