#[cfg(feature = "client")]
mod inner {
    use solana_program::{
        instruction::{AccountMeta, Instruction},
        pubkey::Pubkey,
    };

    use super::{CompactInstruction, CompactInstructions};

    /// Flattens `inner_instructions` into the compact payload, extending
    /// `accounts` with every program id and account the sub-operations
    /// reference. Accounts already present are reused (flags merged) so the
    /// outer transaction never lists a key twice. The wallet's own signer
    /// flag is always stripped: the program re-adds it on-chain via its
    /// derivation proof.
    pub fn compact_instructions(
        wallet_account: Pubkey,
        mut accounts: Vec<AccountMeta>,
        inner_instructions: Vec<Instruction>,
    ) -> (Vec<AccountMeta>, CompactInstructions) {
        fn intern(accounts: &mut Vec<AccountMeta>, meta: AccountMeta) -> u8 {
            match accounts.iter().position(|a| a.pubkey == meta.pubkey) {
                Some(index) => {
                    accounts[index].is_writable |= meta.is_writable;
                    accounts[index].is_signer |= meta.is_signer;
                    index as u8
                },
                None => {
                    accounts.push(meta);
                    (accounts.len() - 1) as u8
                },
            }
        }

        let mut compact_ix = Vec::with_capacity(inner_instructions.len());
        for ix in inner_instructions.into_iter() {
            let program_id_index = intern(
                &mut accounts,
                AccountMeta::new_readonly(ix.program_id, false),
            );
            let mut accts = Vec::with_capacity(ix.accounts.len());
            for mut ix_account in ix.accounts.into_iter() {
                if ix_account.pubkey == wallet_account {
                    ix_account.is_signer = false;
                }
                accts.push(intern(&mut accounts, ix_account));
            }
            compact_ix.push(CompactInstruction {
                program_id_index,
                accounts: accts,
                data: ix.data,
            });
        }

        (
            accounts,
            CompactInstructions {
                inner_instructions: compact_ix,
            },
        )
    }
}
#[cfg(feature = "client")]
pub use inner::compact_instructions;

pub struct CompactInstructions {
    pub inner_instructions: Vec<CompactInstruction>,
}

pub struct CompactInstruction {
    pub program_id_index: u8,
    pub accounts: Vec<u8>,
    pub data: Vec<u8>,
}

impl CompactInstructions {
    pub fn into_bytes(&self) -> Vec<u8> {
        let mut bytes = vec![self.inner_instructions.len() as u8];
        for ix in self.inner_instructions.iter() {
            bytes.push(ix.program_id_index);
            bytes.push(ix.accounts.len() as u8);
            bytes.extend(ix.accounts.iter());
            bytes.extend((ix.data.len() as u16).to_le_bytes());
            bytes.extend(ix.data.iter());
        }
        bytes
    }
}
