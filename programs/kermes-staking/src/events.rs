use anchor_lang::prelude::*;

#[event]
pub struct VaultInitialized {
    pub vault: Pubkey,
    pub curator: Pubkey,
    pub asset: Pubkey,
    pub share_mint: Pubkey,
    pub name: String,
}

#[event]
pub struct StakeEvent {
    pub vault: Pubkey,
    pub staker: Pubkey,
    pub amount: u64,
    pub total_deposited: u64,
    pub timestamp: i64,
}
