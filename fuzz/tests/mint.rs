use fuzz_helpers::*;
use kermes_staking::token_ops::TokenProtocol;
use kermes_vault_share::error::VaultShareError;
use kermes_vault_share::events::MintEvent;
use solana_sdk::signature::{Keypair, Signer};

struct MintFixture {
    env: FuzzTestEnv,
    authority: Keypair,
    user: Keypair,
    share: ShareMintAccounts,
    user_share_account: solana_sdk::pubkey::Pubkey,
}

async fn setup_mint_fixture() -> FuzzResult<MintFixture> {
    let mut env = setup_program_test().await;
    let authority = Keypair::new();
    let user = Keypair::new();

    let share = setup_share_mint(&mut env.context, &authority.pubkey(), 9).await?;
    let user_share_account = create_token_account(
        &mut env.context,
        TokenProtocol::Extensions,
        &share.share_mint,
        &user.pubkey(),
    )
    .await?;

    Ok(MintFixture {
        env,
        authority,
        user,
        share,
        user_share_account,
    })
}

#[tokio::test]
async fn share_mint_records_configured_authority() -> FuzzResult<()> {
    let MintFixture {
        mut env,
        authority,
        share,
        ..
    } = setup_mint_fixture().await?;

    let config = get_share_config(&mut env.context, &share.share_config).await?;
    assert_eq!(config.mint, share.share_mint);
    assert_eq!(config.authority, authority.pubkey());
    assert_eq!(config.decimals, 9);
    assert_eq!(get_mint_supply(&mut env.context, &share.share_mint).await?, 0);

    Ok(())
}

#[tokio::test]
async fn mints_shares_and_emits_one_event() -> FuzzResult<()> {
    let MintFixture {
        mut env,
        authority,
        user,
        share,
        user_share_account,
    } = setup_mint_fixture().await?;

    let amount = 1_000_000_000;
    let ix = mint_shares_ix(&share, &user_share_account, &authority.pubkey(), amount);
    let (result, inner_data) = send_with_events(&mut env.context, &[ix], &[&authority]).await?;
    result?;

    assert_eq!(
        get_token_balance(&mut env.context, &user_share_account).await?,
        amount
    );
    assert_eq!(
        get_mint_supply(&mut env.context, &share.share_mint).await?,
        amount
    );

    let events = decode_events::<MintEvent>(&inner_data);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].recipient, user.pubkey());
    assert_eq!(events[0].mint, share.share_mint);
    assert_eq!(events[0].amount, amount);
    assert!(events[0].timestamp > 0);

    Ok(())
}

#[tokio::test]
async fn rejects_signer_other_than_configured_authority() -> FuzzResult<()> {
    let MintFixture {
        mut env,
        share,
        user_share_account,
        ..
    } = setup_mint_fixture().await?;

    let impostor = Keypair::new();
    let ix = mint_shares_ix(&share, &user_share_account, &impostor.pubkey(), 1_000);
    let result = send(&mut env.context, &[ix], &[&impostor]).await;

    assert_program_error(result, VaultShareError::AuthorityMismatch.into());
    assert_eq!(get_mint_supply(&mut env.context, &share.share_mint).await?, 0);
    Ok(())
}

#[tokio::test]
async fn rejects_destination_of_another_mint() -> FuzzResult<()> {
    let MintFixture {
        mut env,
        authority,
        user,
        share,
        ..
    } = setup_mint_fixture().await?;

    let other_share = setup_share_mint(&mut env.context, &authority.pubkey(), 9).await?;
    let foreign_account = create_token_account(
        &mut env.context,
        TokenProtocol::Extensions,
        &other_share.share_mint,
        &user.pubkey(),
    )
    .await?;

    let ix = mint_shares_ix(&share, &foreign_account, &authority.pubkey(), 1_000);
    let result = send(&mut env.context, &[ix], &[&authority]).await;

    assert_program_error(result, VaultShareError::MintAccountMismatch.into());
    assert_eq!(get_token_balance(&mut env.context, &foreign_account).await?, 0);
    Ok(())
}

#[tokio::test]
async fn rejects_zero_amount() -> FuzzResult<()> {
    let MintFixture {
        mut env,
        authority,
        share,
        user_share_account,
        ..
    } = setup_mint_fixture().await?;

    let ix = mint_shares_ix(&share, &user_share_account, &authority.pubkey(), 0);
    let result = send(&mut env.context, &[ix], &[&authority]).await;

    assert_program_error(result, VaultShareError::InvalidAmount.into());
    Ok(())
}

#[tokio::test]
async fn rejects_supply_overflow() -> FuzzResult<()> {
    let MintFixture {
        mut env,
        authority,
        share,
        user_share_account,
        ..
    } = setup_mint_fixture().await?;

    let ix = mint_shares_ix(&share, &user_share_account, &authority.pubkey(), u64::MAX);
    send(&mut env.context, &[ix], &[&authority]).await?;

    let ix = mint_shares_ix(&share, &user_share_account, &authority.pubkey(), 1);
    let result = send(&mut env.context, &[ix], &[&authority]).await;

    assert_program_error(result, VaultShareError::ArithmeticOverflow.into());
    assert_eq!(
        get_mint_supply(&mut env.context, &share.share_mint).await?,
        u64::MAX
    );
    Ok(())
}
