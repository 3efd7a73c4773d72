use haven_compact_instructions::InstructionError;
use pinocchio::{msg, program_error::ProgramError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum WalletError {
    #[error("UID must consist of 6 alphanumerical characters")]
    InvalidUid,
    #[error("A wallet account already exists at the derived address")]
    WalletAccountInUse,
    #[error("Guardian capacity exceeds the protocol maximum")]
    TooManyGuardians,
    #[error("Signer does not match the wallet owner")]
    Unauthorized,
    #[error("Account is not owned by the wallet program")]
    OwnerMismatchWalletAccount,
    #[error("Wallet account does not match the derived address")]
    InvalidSeedWalletAccount,
    #[error("Not enough accounts supplied")]
    InvalidAccountsLength,
    #[error("Account is not a wallet account")]
    InvalidWalletAccountDiscriminator,
    #[error("Create instruction data too short")]
    InvalidCreateInstructionData,
    #[error("Set-guardians instruction data malformed")]
    InvalidSetGuardiansInstructionData,
    #[error("Sign instruction data malformed")]
    InvalidSignInstructionData,
    #[error("Instruction Error: {0}")]
    InstructionError(InstructionError),
    #[error("Sub-operation failed to execute")]
    InstructionExecutionError,
}

impl From<InstructionError> for WalletError {
    fn from(e: InstructionError) -> Self {
        WalletError::InstructionError(e)
    }
}

impl From<WalletError> for u32 {
    fn from(e: WalletError) -> Self {
        match e {
            WalletError::InvalidUid => 0,
            WalletError::WalletAccountInUse => 1,
            WalletError::TooManyGuardians => 2,
            WalletError::Unauthorized => 3,
            WalletError::OwnerMismatchWalletAccount => 4,
            WalletError::InvalidSeedWalletAccount => 5,
            WalletError::InvalidAccountsLength => 6,
            WalletError::InvalidWalletAccountDiscriminator => 7,
            WalletError::InvalidCreateInstructionData => 8,
            WalletError::InvalidSetGuardiansInstructionData => 9,
            WalletError::InvalidSignInstructionData => 10,
            WalletError::InstructionError(_) => 11,
            WalletError::InstructionExecutionError => 12,
        }
    }
}

impl From<WalletError> for ProgramError {
    fn from(e: WalletError) -> Self {
        msg!("Error: {:?}", e);
        ProgramError::Custom(e.into())
    }
}
