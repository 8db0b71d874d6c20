use anchor_lang::prelude::*;
use anchor_spl::token_2022::{self, MintTo, Token2022};
use anchor_spl::token_interface::{Mint, TokenAccount};

use crate::constants::{MINT_AUTHORITY_SEED, SHARE_CONFIG_SEED};
use crate::error::VaultShareError;
use crate::events::MintEvent;
use crate::state::ShareConfig;

#[event_cpi]
#[derive(Accounts)]
pub struct MintShares<'info> {
    #[account(
        seeds = [SHARE_CONFIG_SEED, mint.key().as_ref()],
        bump = share_config.bump,
        has_one = mint @ VaultShareError::MintAccountMismatch,
        has_one = authority @ VaultShareError::AuthorityMismatch,
    )]
    pub share_config: Account<'info, ShareConfig>,

    /// The receipt mint whose supply is raised
    #[account(mut)]
    pub mint: InterfaceAccount<'info, Mint>,

    /// The token account credited with the new shares
    #[account(
        mut,
        constraint = destination.mint == mint.key() @ VaultShareError::MintAccountMismatch,
    )]
    pub destination: InterfaceAccount<'info, TokenAccount>,

    /// The credential configured on `share_config`
    pub authority: Signer<'info>,

    /// CHECK: PDA holding token-level mint authority, verified by seeds
    #[account(
        seeds = [MINT_AUTHORITY_SEED, mint.key().as_ref()],
        bump = share_config.mint_authority_bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    pub token_program: Program<'info, Token2022>,
}

/// Supply after minting `amount`, or an overflow error.
pub fn next_supply(supply: u64, amount: u64) -> Result<u64> {
    supply
        .checked_add(amount)
        .ok_or_else(|| error!(VaultShareError::ArithmeticOverflow))
}

pub fn handler(ctx: Context<MintShares>, amount: u64) -> Result<()> {
    require!(amount > 0, VaultShareError::InvalidAmount);

    let new_supply = next_supply(ctx.accounts.mint.supply, amount)?;

    let mint_key = ctx.accounts.mint.key();
    let mint_authority_seeds = &[
        MINT_AUTHORITY_SEED,
        mint_key.as_ref(),
        &[ctx.accounts.share_config.mint_authority_bump],
    ];
    let signer_seeds = &[&mint_authority_seeds[..]];

    let mint_accounts = MintTo {
        mint: ctx.accounts.mint.to_account_info(),
        to: ctx.accounts.destination.to_account_info(),
        authority: ctx.accounts.mint_authority.to_account_info(),
    };

    let cpi_ctx = CpiContext::new_with_signer(
        ctx.accounts.token_program.to_account_info(),
        mint_accounts,
        signer_seeds,
    );

    token_2022::mint_to(cpi_ctx, amount)?;

    emit_cpi!(MintEvent {
        recipient: ctx.accounts.destination.owner,
        mint: mint_key,
        amount,
        timestamp: Clock::get()?.unix_timestamp,
    });

    msg!("Mint successful!");
    msg!("Minted: {} shares", amount);
    msg!("Recipient: {}", ctx.accounts.destination.owner);
    msg!("Total shares supply: {}", new_supply);

    Ok(())
}
