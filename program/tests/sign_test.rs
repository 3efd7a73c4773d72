mod common;

use common::*;
use haven_state::wallet::WalletView;
use litesvm_token::spl_token;
use solana_sdk::{
    pubkey::Pubkey, signature::Keypair, signer::Signer, system_instruction,
};

struct TokenFixture {
    wallet: Pubkey,
    owner: Keypair,
    wallet_ata: Pubkey,
    recipient_ata: Pubkey,
}

fn setup_token_fixture(context: &mut WalletTestContext, initial_amount: u64) -> TokenFixture {
    let owner = Keypair::new();
    let uid = random_uid();
    let (wallet, _) = create_wallet(context, &uid, &owner.pubkey(), 4, 0).unwrap();

    let payer = context.default_payer.insecure_clone();
    let mint = setup_mint(&mut context.svm, &payer).unwrap();
    let wallet_ata = setup_ata(&mut context.svm, &mint, &wallet, &payer).unwrap();
    let recipient = Pubkey::new_unique();
    let recipient_ata = setup_ata(&mut context.svm, &mint, &recipient, &payer).unwrap();
    mint_to(&mut context.svm, &mint, &payer, &wallet_ata, initial_amount).unwrap();

    TokenFixture {
        wallet,
        owner,
        wallet_ata,
        recipient_ata,
    }
}

fn token_transfer_ix(fixture: &TokenFixture, amount: u64) -> solana_sdk::instruction::Instruction {
    spl_token::instruction::transfer(
        &spl_token::ID,
        &fixture.wallet_ata,
        &fixture.recipient_ata,
        &fixture.wallet,
        &[],
        amount,
    )
    .unwrap()
}

#[test_log::test]
fn test_sign_executes_token_transfer() {
    let mut context = setup_test_context().unwrap();
    let fixture = setup_token_fixture(&mut context, 1000);

    sign_with_wallet(
        &mut context,
        &fixture.wallet,
        &fixture.owner,
        vec![token_transfer_ix(&fixture, 100)],
    )
    .unwrap();

    assert_eq!(token_balance(&context, &fixture.wallet_ata), 900);
    assert_eq!(token_balance(&context, &fixture.recipient_ata), 100);
}

#[test_log::test]
fn test_sign_executes_multiple_sub_operations() {
    let mut context = setup_test_context().unwrap();
    let fixture = setup_token_fixture(&mut context, 1000);

    sign_with_wallet(
        &mut context,
        &fixture.wallet,
        &fixture.owner,
        vec![
            token_transfer_ix(&fixture, 100),
            token_transfer_ix(&fixture, 250),
        ],
    )
    .unwrap();

    assert_eq!(token_balance(&context, &fixture.wallet_ata), 650);
    assert_eq!(token_balance(&context, &fixture.recipient_ata), 350);
}

#[test_log::test]
fn test_sign_rejects_non_owner() {
    let mut context = setup_test_context().unwrap();
    let fixture = setup_token_fixture(&mut context, 1000);
    let intruder = Keypair::new();

    let ix = haven_interface::SignInstruction::new(
        fixture.wallet,
        context.default_payer.pubkey(),
        intruder.pubkey(),
        vec![token_transfer_ix(&fixture, 100)],
    )
    .unwrap();
    let err = send_instruction_raw(&mut context, ix, &[&intruder]).unwrap_err();
    assert_custom_error(err, 3);

    assert_eq!(token_balance(&context, &fixture.wallet_ata), 1000);
    assert_eq!(token_balance(&context, &fixture.recipient_ata), 0);
}

#[test_log::test]
fn test_sign_requires_owner_signature() {
    let mut context = setup_test_context().unwrap();
    let fixture = setup_token_fixture(&mut context, 1000);

    // Correct owner key, but nobody holds the private key signature.
    let mut ix = haven_interface::SignInstruction::new(
        fixture.wallet,
        context.default_payer.pubkey(),
        fixture.owner.pubkey(),
        vec![token_transfer_ix(&fixture, 100)],
    )
    .unwrap();
    ix.accounts[2].is_signer = false;

    let err = send_instruction_raw(&mut context, ix, &[]).unwrap_err();
    assert_custom_error(err, 3);
    assert_eq!(token_balance(&context, &fixture.wallet_ata), 1000);
}

#[test_log::test]
fn test_sign_failing_sub_operation_aborts_batch() {
    let mut context = setup_test_context().unwrap();
    let fixture = setup_token_fixture(&mut context, 1000);

    // Second transfer overdraws; the whole batch must roll back.
    let res = sign_with_wallet(
        &mut context,
        &fixture.wallet,
        &fixture.owner,
        vec![
            token_transfer_ix(&fixture, 100),
            token_transfer_ix(&fixture, 5000),
        ],
    );
    assert!(res.is_err());

    assert_eq!(token_balance(&context, &fixture.wallet_ata), 1000);
    assert_eq!(token_balance(&context, &fixture.recipient_ata), 0);
}

#[test_log::test]
fn test_sign_transfers_sol_out_of_wallet() {
    let mut context = setup_test_context().unwrap();
    let owner = Keypair::new();
    let uid = random_uid();
    let (wallet, _) = create_wallet(&mut context, &uid, &owner.pubkey(), 4, 0).unwrap();

    context.svm.airdrop(&wallet, 5_000_000_000).unwrap();
    let recipient = Pubkey::new_unique();
    context.svm.airdrop(&recipient, 1_000_000).unwrap();

    let wallet_before = context.svm.get_account(&wallet).unwrap().lamports;
    let recipient_before = context.svm.get_account(&recipient).unwrap().lamports;

    sign_with_wallet(
        &mut context,
        &wallet,
        &owner,
        vec![system_instruction::transfer(&wallet, &recipient, 1_000_000_000)],
    )
    .unwrap();

    let wallet_after = context.svm.get_account(&wallet).unwrap().lamports;
    let recipient_after = context.svm.get_account(&recipient).unwrap().lamports;
    assert_eq!(wallet_before - wallet_after, 1_000_000_000);
    assert_eq!(recipient_after - recipient_before, 1_000_000_000);
}

#[test_log::test]
fn test_sign_sol_transfer_rejects_overdraw() {
    let mut context = setup_test_context().unwrap();
    let owner = Keypair::new();
    let uid = random_uid();
    let (wallet, _) = create_wallet(&mut context, &uid, &owner.pubkey(), 4, 0).unwrap();

    context.svm.airdrop(&wallet, 1_000_000_000).unwrap();
    let recipient = Pubkey::new_unique();

    let res = sign_with_wallet(
        &mut context,
        &wallet,
        &owner,
        vec![system_instruction::transfer(&wallet, &recipient, 50_000_000_000)],
    );
    assert!(res.is_err());
    assert!(context.svm.get_account(&recipient).is_none());
}

#[test_log::test]
fn test_sign_does_not_advance_updated_at() {
    let mut context = setup_test_context().unwrap();
    let owner = Keypair::new();
    let uid = random_uid();
    let (wallet, _) = create_wallet(&mut context, &uid, &owner.pubkey(), 4, 0).unwrap();

    context.svm.airdrop(&wallet, 5_000_000_000).unwrap();
    let data = wallet_account_data(&context, &wallet).unwrap();
    let before = WalletView::from_bytes(&data).unwrap().wallet.updated_at;

    let recipient = Pubkey::new_unique();
    context.svm.airdrop(&recipient, 1_000_000).unwrap();
    sign_with_wallet(
        &mut context,
        &wallet,
        &owner,
        vec![system_instruction::transfer(&wallet, &recipient, 1_000_000_000)],
    )
    .unwrap();

    // Execution is not a configuration change.
    let data = wallet_account_data(&context, &wallet).unwrap();
    assert_eq!(WalletView::from_bytes(&data).unwrap().wallet.updated_at, before);
}
