//! Client-side builders for the Haven wallet program's instructions.

pub use haven;
use haven::actions::{
    create_v1::CreateV1Args, set_guardians_v1::SetGuardiansV1Args, sign_v1::SignV1Args,
};
pub use haven_compact_instructions::*;
use haven_state::{
    wallet::{wallet_account_seeds, UID_LEN},
    IntoBytes,
};
use solana_sdk::{
    instruction::{AccountMeta, Instruction},
    pubkey::Pubkey,
    system_program,
};

pub fn program_id() -> Pubkey {
    haven::ID.into()
}

/// Derives the wallet account address and bump for an identifier.
pub fn wallet_key(uid: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&wallet_account_seeds(uid.as_bytes()), &program_id())
}

fn uid_bytes(uid: &str) -> anyhow::Result<[u8; UID_LEN]> {
    uid.as_bytes()
        .try_into()
        .map_err(|_| anyhow::anyhow!("uid must be exactly {} characters, got {:?}", UID_LEN, uid))
}

pub struct CreateWalletInstruction;
impl CreateWalletInstruction {
    pub fn new(
        wallet_account: Pubkey,
        wallet_bump_seed: u8,
        payer: Pubkey,
        owner: Pubkey,
        uid: &str,
        num_guardians: u8,
        recovery_grace_period: i64,
    ) -> anyhow::Result<Instruction> {
        let create = CreateV1Args::new(
            uid_bytes(uid)?,
            wallet_bump_seed,
            num_guardians,
            recovery_grace_period,
        );
        let data = create
            .into_bytes()
            .map_err(|e| anyhow::anyhow!("Failed to serialize create {:?}", e))?
            .to_vec();
        Ok(Instruction {
            program_id: program_id(),
            accounts: vec![
                AccountMeta::new(wallet_account, false),
                AccountMeta::new(payer, true),
                AccountMeta::new_readonly(owner, false),
                AccountMeta::new_readonly(system_program::ID, false),
            ],
            data,
        })
    }
}

pub struct SetGuardiansInstruction;
impl SetGuardiansInstruction {
    pub fn new(
        wallet_account: Pubkey,
        owner: Pubkey,
        guardians: &[Pubkey],
    ) -> anyhow::Result<Instruction> {
        let args = SetGuardiansV1Args::new(guardians.len() as u16);
        let mut data = args
            .into_bytes()
            .map_err(|e| anyhow::anyhow!("Failed to serialize args {:?}", e))?
            .to_vec();
        for guardian in guardians {
            data.extend_from_slice(guardian.as_ref());
        }
        Ok(Instruction {
            program_id: program_id(),
            accounts: vec![
                AccountMeta::new(wallet_account, false),
                AccountMeta::new_readonly(owner, true),
            ],
            data,
        })
    }
}

pub struct SignInstruction;
impl SignInstruction {
    pub fn new(
        wallet_account: Pubkey,
        payer: Pubkey,
        owner: Pubkey,
        inner_instructions: Vec<Instruction>,
    ) -> anyhow::Result<Instruction> {
        let accounts = vec![
            AccountMeta::new(wallet_account, false),
            AccountMeta::new(payer, true),
            AccountMeta::new_readonly(owner, true),
        ];
        let (accounts, ixs) = compact_instructions(wallet_account, accounts, inner_instructions);
        let payload = ixs.into_bytes();
        let payload_len = u16::try_from(payload.len()).map_err(|_| {
            anyhow::anyhow!("instruction payload is {} bytes, max is 65535", payload.len())
        })?;
        let args = SignV1Args::new(payload_len);
        let arg_bytes = args
            .into_bytes()
            .map_err(|e| anyhow::anyhow!("Failed to serialize args {:?}", e))?;
        Ok(Instruction {
            program_id: program_id(),
            accounts,
            data: [arg_bytes, &payload].concat(),
        })
    }
}
