use anchor_lang::prelude::*;

#[account]
pub struct ShareConfig {
    /// The receipt mint this configuration governs
    pub mint: Pubkey,
    /// The only principal allowed to request minting
    pub authority: Pubkey,
    /// Decimals fixed when the mint was created
    pub decimals: u8,
    /// Bump seed for PDA derivation
    pub bump: u8,
    /// Bump seed of the mint authority PDA
    pub mint_authority_bump: u8,
}

impl ShareConfig {
    pub const LEN: usize = 8 + // discriminator
        32 + // mint
        32 + // authority
        1 + // decimals
        1 + // bump
        1; // mint_authority_bump
}
