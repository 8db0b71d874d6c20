pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;
pub mod token_ops;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("3aWDZ2X82E8mx6ACPmKhmvsZUwXftQtQF9u9vTjnJ6FV");

#[program]
pub mod kermes_staking {
    use super::*;

    pub fn initialize_vault(ctx: Context<InitializeVault>, name: String) -> Result<()> {
        initialize_vault::handler(ctx, name)
    }

    pub fn stake(ctx: Context<Stake>, amount: u64, decimals: u8) -> Result<()> {
        stake::handler(ctx, amount, decimals)
    }
}
