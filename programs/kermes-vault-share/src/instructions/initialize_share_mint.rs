use anchor_lang::prelude::*;
use anchor_spl::token_2022::Token2022;
use anchor_spl::token_interface::Mint;

use crate::constants::{MINT_AUTHORITY_SEED, SHARE_CONFIG_SEED};
use crate::state::ShareConfig;

#[derive(Accounts)]
#[instruction(decimals: u8)]
pub struct InitializeShareMint<'info> {
    /// The configuration account recording who may mint
    #[account(
        init,
        payer = payer,
        space = ShareConfig::LEN,
        seeds = [SHARE_CONFIG_SEED, share_mint.key().as_ref()],
        bump
    )]
    pub share_config: Account<'info, ShareConfig>,

    /// CHECK: PDA used only as the token-level mint authority, holds no data
    #[account(
        seeds = [MINT_AUTHORITY_SEED, share_mint.key().as_ref()],
        bump
    )]
    pub mint_authority: UncheckedAccount<'info>,

    /// The receipt mint to be created
    #[account(
        init,
        payer = payer,
        mint::decimals = decimals,
        mint::authority = mint_authority,
        mint::token_program = token_program,
    )]
    pub share_mint: InterfaceAccount<'info, Mint>,

    /// CHECK: Any principal may be named; it must sign every later mint request
    pub authority: UncheckedAccount<'info>,

    #[account(mut)]
    pub payer: Signer<'info>,

    pub system_program: Program<'info, System>,
    pub token_program: Program<'info, Token2022>,
}

pub fn handler(ctx: Context<InitializeShareMint>, decimals: u8) -> Result<()> {
    let share_config = &mut ctx.accounts.share_config;

    share_config.mint = ctx.accounts.share_mint.key();
    share_config.authority = ctx.accounts.authority.key();
    share_config.decimals = decimals;
    share_config.bump = ctx.bumps.share_config;
    share_config.mint_authority_bump = ctx.bumps.mint_authority;

    msg!("Share mint initialized!");
    msg!("Share Mint: {}", share_config.mint);
    msg!("Share Config: {}", share_config.key());
    msg!("Minting Authority: {}", share_config.authority);
    msg!("Decimals: {}", decimals);

    Ok(())
}
