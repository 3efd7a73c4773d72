pub mod accounts;

use num_enum::{IntoPrimitive, TryFromPrimitive};
use shank::ShankInstruction;

/// Operations of the wallet program. The `u16` discriminator is the first
/// field of every instruction's argument block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, ShankInstruction, TryFromPrimitive, IntoPrimitive)]
#[rustfmt::skip]
#[repr(u16)]
pub enum WalletInstruction {
  #[account(0, writable, name="wallet", desc="the wallet account to create")]
  #[account(1, writable, signer, name="payer", desc="the account paying the rent")]
  #[account(2, name="owner", desc="the account set as the wallet owner")]
  #[account(3, name="system_program", desc="the system program")]
  CreateV1 = 0,
  #[account(0, writable, name="wallet", desc="the wallet account")]
  #[account(1, signer, name="owner", desc="the owner of the wallet")]
  SetGuardiansV1 = 1,
  #[account(0, writable, name="wallet", desc="the wallet account")]
  #[account(1, writable, signer, name="payer", desc="the fee payer")]
  #[account(2, signer, name="owner", desc="the owner of the wallet")]
  // Every account referenced by the compact instruction payload follows;
  // sub-operations address them by index into this list.
  SignV1 = 2,
}
