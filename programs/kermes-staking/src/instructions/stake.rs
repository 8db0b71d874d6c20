use anchor_lang::prelude::*;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::{Mint, TokenAccount};
use kermes_vault_share::program::KermesVaultShare;

use crate::constants::STAKING_AUTHORITY_SEED;
use crate::error::StakingError;
use crate::events::StakeEvent;
use crate::state::Vault;
use crate::token_ops::AssetTransfer;

#[event_cpi]
#[derive(Accounts)]
pub struct Stake<'info> {
    #[account(
        mut,
        constraint = vault.is_derived_at(&vault.key()) @ StakingError::AddressDerivationMismatch,
        constraint = vault.asset == asset_mint.key() @ StakingError::InvalidTokenMint,
    )]
    pub vault: Account<'info, Vault>,

    pub staker: Signer<'info>,

    /// The staker's token account for the vault asset
    #[account(
        mut,
        constraint = staker_token_account.owner == staker.key() @ StakingError::InvalidTokenAccount,
        constraint = staker_token_account.mint == asset_mint.key() @ StakingError::InvalidTokenMint,
    )]
    pub staker_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The vault's token account that holds staked assets
    #[account(
        mut,
        constraint = vault_token_account.owner == vault.key() @ StakingError::InvalidVaultTokenAccount,
        constraint = vault_token_account.mint == asset_mint.key() @ StakingError::InvalidTokenMint,
    )]
    pub vault_token_account: InterfaceAccount<'info, TokenAccount>,

    /// The staked asset mint
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// The staker's token account receiving vault shares
    #[account(
        mut,
        constraint = staker_share_account.owner == staker.key() @ StakingError::InvalidTokenAccount,
    )]
    pub staker_share_account: InterfaceAccount<'info, TokenAccount>,

    /// CHECK: Bound to the vault here, validated against its config by the
    /// vault share program during the nested mint
    #[account(
        mut,
        constraint = share_mint.key() == vault.share_mint @ StakingError::InvalidShareMint,
    )]
    pub share_mint: UncheckedAccount<'info>,

    /// CHECK: Validated by the vault share program during the nested mint
    pub share_config: UncheckedAccount<'info>,

    /// CHECK: Validated by the vault share program during the nested mint
    pub share_mint_authority: UncheckedAccount<'info>,

    /// CHECK: PDA that signs mint requests on behalf of this vault
    #[account(
        seeds = [STAKING_AUTHORITY_SEED, vault.key().as_ref()],
        bump
    )]
    pub staking_authority: UncheckedAccount<'info>,

    /// CHECK: Event authority of the vault share program, checked by its
    /// self-CPI
    pub share_event_authority: UncheckedAccount<'info>,

    /// CHECK: Selects the asset transfer protocol; resolved and cross-checked
    /// against every asset account in `token_ops`
    pub asset_token_program: UncheckedAccount<'info>,

    pub share_token_program: Program<'info, Token2022>,

    pub vault_share_program: Program<'info, KermesVaultShare>,
}

pub fn handler(ctx: Context<Stake>, amount: u64, decimals: u8) -> Result<()> {
    require!(amount > 0, StakingError::InvalidAmount);

    let total_deposited = ctx
        .accounts
        .vault
        .total_deposited
        .checked_add(amount)
        .ok_or(StakingError::ArithmeticOverflow)?;

    // Move the asset from the staker into the vault
    AssetTransfer {
        source: &ctx.accounts.staker_token_account,
        destination: &ctx.accounts.vault_token_account,
        mint: &ctx.accounts.asset_mint,
        authority: ctx.accounts.staker.to_account_info(),
        token_program: ctx.accounts.asset_token_program.to_account_info(),
    }
    .execute(amount, decimals)?;

    // Issue receipt shares 1:1 through the vault share program
    let vault_key = ctx.accounts.vault.key();
    let staking_authority_seeds = &[
        STAKING_AUTHORITY_SEED,
        vault_key.as_ref(),
        &[ctx.bumps.staking_authority],
    ];
    let signer_seeds = &[&staking_authority_seeds[..]];

    let mint_accounts = kermes_vault_share::cpi::accounts::MintShares {
        share_config: ctx.accounts.share_config.to_account_info(),
        mint: ctx.accounts.share_mint.to_account_info(),
        destination: ctx.accounts.staker_share_account.to_account_info(),
        authority: ctx.accounts.staking_authority.to_account_info(),
        mint_authority: ctx.accounts.share_mint_authority.to_account_info(),
        token_program: ctx.accounts.share_token_program.to_account_info(),
        event_authority: ctx.accounts.share_event_authority.to_account_info(),
        program: ctx.accounts.vault_share_program.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.vault_share_program.to_account_info(),
        mint_accounts,
        signer_seeds,
    );

    kermes_vault_share::cpi::mint(cpi_ctx, amount)?;

    ctx.accounts.vault.total_deposited = total_deposited;

    emit_cpi!(StakeEvent {
        vault: vault_key,
        staker: ctx.accounts.staker.key(),
        amount,
        total_deposited,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Stake successful!");
    msg!("Vault: {}", vault_key);
    msg!("Staked: {} tokens", amount);
    msg!("Minted: {} shares", amount);
    msg!("Total deposited: {}", total_deposited);

    Ok(())
}
