use anchor_lang::error::ErrorCode;
use fuzz_helpers::*;
use kermes_staking::error::StakingError;
use kermes_staking::events::VaultInitialized;
use kermes_staking::state::derive_vault_address;
use kermes_staking::token_ops::TokenProtocol;
use solana_sdk::pubkey::Pubkey;
use solana_sdk::signature::{Keypair, Signer};

/// A funded curator and a legacy asset mint with 9 decimals
async fn setup_curator() -> FuzzResult<(FuzzTestEnv, Keypair, MintAccounts)> {
    let mut env = setup_program_test().await;
    let asset = setup_asset_mint(&mut env.context, TokenProtocol::Legacy, 9).await?;
    let curator = Keypair::new();
    fund_account(&mut env.context, &curator.pubkey(), 1_000_000_000).await?;
    Ok((env, curator, asset))
}

#[tokio::test]
async fn initializes_vault_at_derived_address() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    let (vault, bump) = derive_vault_address(&curator.pubkey(), &asset.mint, "Vault One")
        .ok_or("name should be valid")?;
    let share = setup_vault_share_mint(&mut env.context, &vault, 9).await?;
    let ix = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &share, "Vault One");
    let (result, inner_data) = send_with_events(&mut env.context, &[ix], &[&curator]).await?;
    result?;

    let state = get_vault_state(&mut env.context, &vault).await?;
    assert_eq!(state.curator, curator.pubkey());
    assert_eq!(state.asset, asset.mint);
    assert_eq!(state.share_mint, share.share_mint);
    assert_eq!(state.name, "Vault One");
    assert_eq!(state.bump, bump);
    assert_eq!(state.total_deposited, 0);

    let events = decode_events::<VaultInitialized>(&inner_data);
    assert_eq!(events.len(), 1);
    assert_eq!(events[0].vault, vault);
    assert_eq!(events[0].share_mint, share.share_mint);
    assert_eq!(events[0].name, "Vault One");

    Ok(())
}

#[tokio::test]
async fn one_curator_can_own_several_vaults_over_one_asset() -> FuzzResult<()> {
    let mut env = setup_program_test().await;
    let asset = setup_asset_mint(&mut env.context, TokenProtocol::Extensions, 9).await?;
    let curator = Keypair::new();

    let first = setup_vault(&mut env.context, &curator, &asset, "Vault One").await?;
    let second = setup_vault(&mut env.context, &curator, &asset, "Vault Two").await?;

    assert_ne!(first.vault, second.vault);
    assert_ne!(first.share.share_mint, second.share.share_mint);
    let state = get_vault_state(&mut env.context, &second.vault).await?;
    assert_eq!(state.name, "Vault Two");
    assert_eq!(state.total_deposited, 0);

    Ok(())
}

#[tokio::test]
async fn rejects_second_initialization_of_same_vault() -> FuzzResult<()> {
    let mut env = setup_program_test().await;
    let asset = setup_asset_mint(&mut env.context, TokenProtocol::Legacy, 9).await?;
    let curator = Keypair::new();
    let vault = setup_vault(&mut env.context, &curator, &asset, "Vault One").await?;

    // A fresh blockhash keeps the repeated instruction from being deduplicated
    env.context.last_blockhash = env.context.get_new_latest_blockhash().await?;

    let ix = initialize_vault_ix(
        &vault.vault,
        &curator.pubkey(),
        &asset.mint,
        &vault.share,
        "Vault One",
    );
    let result = send(&mut env.context, &[ix], &[&curator]).await;

    assert_program_error(result, StakingError::AddressCollision.into());
    Ok(())
}

#[tokio::test]
async fn rejects_empty_and_overlong_names() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    let vault = Pubkey::new_unique();
    let share = setup_vault_share_mint(&mut env.context, &vault, 9).await?;

    let empty = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &share, "");
    let result = send(&mut env.context, &[empty], &[&curator]).await;
    assert_program_error(result, StakingError::InvalidVaultName.into());

    let long_name = "n".repeat(33);
    let overlong = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &share, &long_name);
    let result = send(&mut env.context, &[overlong], &[&curator]).await;
    assert_program_error(result, StakingError::InvalidVaultName.into());

    Ok(())
}

#[tokio::test]
async fn rejects_vault_address_not_derived_from_inputs() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    // Address derived for a different name than the one submitted
    let (other_vault, _) = derive_vault_pda(&curator.pubkey(), &asset.mint, "Vault Two");
    let share = setup_vault_share_mint(&mut env.context, &other_vault, 9).await?;
    let ix = initialize_vault_ix(&other_vault, &curator.pubkey(), &asset.mint, &share, "Vault One");
    let result = send(&mut env.context, &[ix], &[&curator]).await;

    assert_program_error(result, StakingError::AddressDerivationMismatch.into());
    Ok(())
}

#[tokio::test]
async fn initializes_over_prefunded_vault_address() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    let (vault, _) = derive_vault_pda(&curator.pubkey(), &asset.mint, "Vault One");
    fund_account(&mut env.context, &vault, 1_000_000).await?;

    let share = setup_vault_share_mint(&mut env.context, &vault, 9).await?;
    let ix = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &share, "Vault One");
    send(&mut env.context, &[ix], &[&curator]).await?;

    let state = get_vault_state(&mut env.context, &vault).await?;
    assert_eq!(state.curator, curator.pubkey());
    assert_eq!(state.total_deposited, 0);

    Ok(())
}

#[tokio::test]
async fn rejects_share_mint_bound_to_another_vault() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    // The receipt mint of an existing vault cannot back a second one
    let existing = setup_vault(&mut env.context, &Keypair::new(), &asset, "Vault One").await?;

    let (vault, _) = derive_vault_pda(&curator.pubkey(), &asset.mint, "Vault Two");
    let ix = initialize_vault_ix(
        &vault,
        &curator.pubkey(),
        &asset.mint,
        &existing.share,
        "Vault Two",
    );
    let result = send(&mut env.context, &[ix], &[&curator]).await;
    assert_program_error(result, StakingError::InvalidShareMint.into());

    // Nor can a mint whose config names an arbitrary authority
    let foreign = setup_share_mint(&mut env.context, &curator.pubkey(), 9).await?;
    let ix = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &foreign, "Vault Two");
    let result = send(&mut env.context, &[ix], &[&curator]).await;
    assert_program_error(result, StakingError::InvalidShareMint.into());

    Ok(())
}

#[tokio::test]
async fn rejects_share_config_of_another_mint() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    let (vault, _) = derive_vault_pda(&curator.pubkey(), &asset.mint, "Vault One");
    let share = setup_vault_share_mint(&mut env.context, &vault, 9).await?;
    let other = setup_vault_share_mint(&mut env.context, &vault, 9).await?;

    let mixed = ShareMintAccounts {
        share_config: other.share_config,
        ..share
    };
    let ix = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &mixed, "Vault One");
    let result = send(&mut env.context, &[ix], &[&curator]).await;

    assert_program_error(result, ErrorCode::ConstraintSeeds.into());
    assert!(get_vault_state(&mut env.context, &vault).await.is_err());
    Ok(())
}

#[tokio::test]
async fn rejects_share_mint_with_other_decimals_than_asset() -> FuzzResult<()> {
    let (mut env, curator, asset) = setup_curator().await?;

    let (vault, _) = derive_vault_pda(&curator.pubkey(), &asset.mint, "Vault One");
    let share = setup_vault_share_mint(&mut env.context, &vault, 6).await?;
    let ix = initialize_vault_ix(&vault, &curator.pubkey(), &asset.mint, &share, "Vault One");
    let result = send(&mut env.context, &[ix], &[&curator]).await;

    assert_program_error(result, StakingError::DecimalsMismatch.into());
    Ok(())
}
