use anyhow::Result;
use haven_interface::{
    haven, CreateWalletInstruction, SetGuardiansInstruction, SignInstruction,
};
use haven_state::wallet::wallet_account_seeds;
use litesvm::{
    types::{FailedTransactionMetadata, TransactionMetadata},
    LiteSVM,
};
use litesvm_token::{spl_token, CreateAssociatedTokenAccount, CreateMint, MintTo};
use rand::Rng;
use solana_sdk::{
    clock::Clock,
    instruction::Instruction,
    message::{v0, VersionedMessage},
    pubkey::Pubkey,
    signature::Keypair,
    signer::Signer,
    transaction::VersionedTransaction,
};

pub fn program_id() -> Pubkey {
    haven::ID.into()
}

pub struct WalletTestContext {
    pub svm: LiteSVM,
    pub default_payer: Keypair,
}

pub fn setup_test_context() -> anyhow::Result<WalletTestContext> {
    let payer = Keypair::new();
    let mut svm = LiteSVM::new();

    load_program(&mut svm)?;
    svm.airdrop(&payer.pubkey(), 10_000_000_000)
        .map_err(|e| anyhow::anyhow!("Failed to airdrop {:?}", e))?;
    Ok(WalletTestContext {
        svm,
        default_payer: payer,
    })
}

pub fn load_program(svm: &mut LiteSVM) -> anyhow::Result<()> {
    svm.add_program_from_file(program_id(), "../target/deploy/haven.so")
        .map_err(|_| anyhow::anyhow!("Failed to load program"))
}

const UID_ALPHABET: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

pub fn random_uid() -> String {
    let mut rng = rand::rng();
    (0..6)
        .map(|_| UID_ALPHABET[rng.random_range(0..UID_ALPHABET.len())] as char)
        .collect()
}

pub fn wallet_key(uid: &str) -> (Pubkey, u8) {
    Pubkey::find_program_address(&wallet_account_seeds(uid.as_bytes()), &program_id())
}

pub fn send_instruction_raw(
    context: &mut WalletTestContext,
    instruction: Instruction,
    extra_signers: &[&Keypair],
) -> Result<TransactionMetadata, FailedTransactionMetadata> {
    let payer_pubkey = context.default_payer.pubkey();
    let msg = v0::Message::try_compile(
        &payer_pubkey,
        &[instruction],
        &[],
        context.svm.latest_blockhash(),
    )
    .unwrap();
    let mut signers = vec![context.default_payer.insecure_clone()];
    signers.extend(extra_signers.iter().map(|kp| kp.insecure_clone()));
    let tx = VersionedTransaction::try_new(VersionedMessage::V0(msg), &signers).unwrap();
    context.svm.send_transaction(tx)
}

pub fn send_instruction(
    context: &mut WalletTestContext,
    instruction: Instruction,
    extra_signers: &[&Keypair],
) -> anyhow::Result<TransactionMetadata> {
    send_instruction_raw(context, instruction, extra_signers)
        .map_err(|e| anyhow::anyhow!("Failed to send transaction {:?}", e.err))
}

pub fn assert_custom_error(failed: FailedTransactionMetadata, code: u32) {
    use solana_sdk::{instruction::InstructionError, transaction::TransactionError};
    match failed.err {
        TransactionError::InstructionError(_, InstructionError::Custom(actual)) => {
            assert_eq!(actual, code, "logs: {:?}", failed.meta.logs)
        },
        other => panic!("unexpected transaction error {:?}", other),
    }
}

pub fn create_wallet(
    context: &mut WalletTestContext,
    uid: &str,
    owner: &Pubkey,
    num_guardians: u8,
    recovery_grace_period: i64,
) -> anyhow::Result<(Pubkey, u8)> {
    let (wallet, bump) = wallet_key(uid);
    let create_ix = CreateWalletInstruction::new(
        wallet,
        bump,
        context.default_payer.pubkey(),
        *owner,
        uid,
        num_guardians,
        recovery_grace_period,
    )?;
    send_instruction(context, create_ix, &[])?;
    Ok((wallet, bump))
}

pub fn set_guardians(
    context: &mut WalletTestContext,
    wallet: &Pubkey,
    owner: &Keypair,
    guardians: &[Pubkey],
) -> anyhow::Result<TransactionMetadata> {
    let ix = SetGuardiansInstruction::new(*wallet, owner.pubkey(), guardians)?;
    send_instruction(context, ix, &[owner])
}

pub fn sign_with_wallet(
    context: &mut WalletTestContext,
    wallet: &Pubkey,
    owner: &Keypair,
    inner_instructions: Vec<Instruction>,
) -> anyhow::Result<TransactionMetadata> {
    let ix = SignInstruction::new(
        *wallet,
        context.default_payer.pubkey(),
        owner.pubkey(),
        inner_instructions,
    )?;
    send_instruction(context, ix, &[owner])
}

/// Raw data of the wallet account; parse with `WalletView::from_bytes`.
pub fn wallet_account_data(context: &WalletTestContext, wallet: &Pubkey) -> Result<Vec<u8>> {
    let account = context
        .svm
        .get_account(wallet)
        .ok_or(anyhow::anyhow!("Wallet account not found"))?;
    Ok(account.data)
}

pub fn ledger_timestamp(context: &WalletTestContext) -> i64 {
    context.svm.get_sysvar::<Clock>().unix_timestamp
}

pub fn setup_mint(svm: &mut LiteSVM, payer: &Keypair) -> anyhow::Result<Pubkey> {
    let mint = CreateMint::new(svm, payer)
        .decimals(9)
        .token_program_id(&spl_token::ID)
        .send()
        .map_err(|e| anyhow::anyhow!("Failed to create mint {:?}", e))?;
    Ok(mint)
}

pub fn setup_ata(
    svm: &mut LiteSVM,
    mint: &Pubkey,
    user: &Pubkey,
    payer: &Keypair,
) -> Result<Pubkey, anyhow::Error> {
    CreateAssociatedTokenAccount::new(svm, payer, mint)
        .owner(user)
        .send()
        .map_err(|_| anyhow::anyhow!("Failed to create associated token account"))
}

pub fn mint_to(
    svm: &mut LiteSVM,
    mint: &Pubkey,
    authority: &Keypair,
    to: &Pubkey,
    amount: u64,
) -> Result<(), anyhow::Error> {
    MintTo::new(svm, authority, mint, to, amount)
        .send()
        .map_err(|e| anyhow::anyhow!("Failed to mint {:?}", e))?;
    Ok(())
}

pub fn token_balance(context: &WalletTestContext, token_account: &Pubkey) -> u64 {
    use solana_sdk::program_pack::Pack;
    let account = context
        .svm
        .get_account(token_account)
        .expect("token account should exist");
    spl_token::state::Account::unpack(&account.data)
        .expect("valid token account")
        .amount
}
