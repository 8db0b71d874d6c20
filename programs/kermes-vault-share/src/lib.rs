pub mod constants;
pub mod error;
pub mod events;
pub mod instructions;
pub mod state;

use anchor_lang::prelude::*;

pub use constants::*;
pub use instructions::*;
pub use state::*;

declare_id!("9QZeymvqEZukDWVKTMv5S2BoL7bHKPUpnVv3cmmHE8J1");

#[program]
pub mod kermes_vault_share {
    use super::*;

    pub fn initialize_share_mint(ctx: Context<InitializeShareMint>, decimals: u8) -> Result<()> {
        initialize_share_mint::handler(ctx, decimals)
    }

    pub fn mint(ctx: Context<MintShares>, amount: u64) -> Result<()> {
        mint::handler(ctx, amount)
    }
}
