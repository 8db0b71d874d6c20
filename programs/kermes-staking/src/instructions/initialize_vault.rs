use anchor_lang::prelude::*;
use anchor_lang::system_program::{
    allocate, assign, create_account, transfer, Allocate, Assign, CreateAccount, Transfer,
};
use anchor_spl::token_interface::Mint;
use kermes_vault_share::state::ShareConfig;
use kermes_vault_share::SHARE_CONFIG_SEED;

use crate::constants::VAULT_SEED;
use crate::error::StakingError;
use crate::events::VaultInitialized;
use crate::state::{derive_vault_address, staking_authority_address, Vault};

#[event_cpi]
#[derive(Accounts)]
pub struct InitializeVault<'info> {
    /// CHECK: Address is re-derived from (curator, asset, name) and the
    /// account is created by the handler, which also rejects collisions
    #[account(mut)]
    pub vault: UncheckedAccount<'info>,

    /// The vault curator, who also pays for the vault account
    #[account(mut)]
    pub curator: Signer<'info>,

    /// The asset the vault will accept, owned by SPL Token or Token-2022
    pub asset_mint: InterfaceAccount<'info, Mint>,

    /// The receipt mint bound to this vault for its whole lifetime
    pub share_mint: InterfaceAccount<'info, Mint>,

    /// Minting configuration of `share_mint`; must name this vault's
    /// staking authority
    #[account(
        seeds = [SHARE_CONFIG_SEED, share_mint.key().as_ref()],
        bump = share_config.bump,
        seeds::program = kermes_vault_share::ID,
        constraint = share_config.mint == share_mint.key() @ StakingError::InvalidShareMint,
    )]
    pub share_config: Account<'info, ShareConfig>,

    pub system_program: Program<'info, System>,
}

pub fn handler(ctx: Context<InitializeVault>, name: String) -> Result<()> {
    let curator = ctx.accounts.curator.key();
    let asset = ctx.accounts.asset_mint.key();

    let (expected_vault, bump) =
        derive_vault_address(&curator, &asset, &name).ok_or(StakingError::InvalidVaultName)?;
    require_keys_eq!(
        ctx.accounts.vault.key(),
        expected_vault,
        StakingError::AddressDerivationMismatch
    );

    let (staking_authority, _) = staking_authority_address(&expected_vault);
    require_keys_eq!(
        ctx.accounts.share_config.authority,
        staking_authority,
        StakingError::InvalidShareMint
    );
    require!(
        ctx.accounts.share_config.decimals == ctx.accounts.asset_mint.decimals,
        StakingError::DecimalsMismatch
    );
    let share_mint = ctx.accounts.share_mint.key();

    let vault_info = ctx.accounts.vault.to_account_info();
    require!(
        vault_info.owner != &crate::ID && vault_info.data_is_empty(),
        StakingError::AddressCollision
    );

    let bump_seed = [bump];
    let vault_seeds = &[
        VAULT_SEED,
        curator.as_ref(),
        asset.as_ref(),
        name.as_bytes(),
        &bump_seed,
    ];
    let signer_seeds = &[&vault_seeds[..]];

    create_vault_account(&ctx.accounts, signer_seeds)?;

    let vault = Vault {
        curator,
        asset,
        share_mint,
        total_deposited: 0,
        bump,
        name,
    };
    {
        let mut data = vault_info.try_borrow_mut_data()?;
        let mut writer: &mut [u8] = &mut data;
        vault.try_serialize(&mut writer)?;
    }

    emit_cpi!(VaultInitialized {
        vault: expected_vault,
        curator,
        asset,
        share_mint,
        name: vault.name.clone(),
    });

    msg!("Vault initialized successfully!");
    msg!("Vault: {}", expected_vault);
    msg!("Vault Name: {}", vault.name);
    msg!("Curator: {}", curator);
    msg!("Asset Mint: {}", asset);
    msg!("Share Mint: {}", share_mint);

    Ok(())
}

/// Creates the vault PDA, also covering an address that was pre-funded with
/// lamports before initialization.
fn create_vault_account(accounts: &InitializeVault, signer_seeds: &[&[&[u8]]]) -> Result<()> {
    let vault = accounts.vault.to_account_info();
    let curator = accounts.curator.to_account_info();
    let system_program = accounts.system_program.to_account_info();

    let space = Vault::LEN;
    let rent_exempt = Rent::get()?.minimum_balance(space);
    let current_lamports = vault.lamports();

    if current_lamports == 0 {
        return create_account(
            CpiContext::new_with_signer(
                system_program,
                CreateAccount {
                    from: curator,
                    to: vault,
                },
                signer_seeds,
            ),
            rent_exempt,
            space as u64,
            &crate::ID,
        );
    }

    let top_up = rent_exempt.saturating_sub(current_lamports);
    if top_up > 0 {
        transfer(
            CpiContext::new(
                system_program.clone(),
                Transfer {
                    from: curator,
                    to: vault.clone(),
                },
            ),
            top_up,
        )?;
    }

    allocate(
        CpiContext::new_with_signer(
            system_program.clone(),
            Allocate {
                account_to_allocate: vault.clone(),
            },
            signer_seeds,
        ),
        space as u64,
    )?;

    assign(
        CpiContext::new_with_signer(
            system_program,
            Assign {
                account_to_assign: vault,
            },
            signer_seeds,
        ),
        &crate::ID,
    )
}
