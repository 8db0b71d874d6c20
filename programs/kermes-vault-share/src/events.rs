use anchor_lang::prelude::*;

/// Emitted once per successful `mint`. Field order is part of the wire format.
#[event]
pub struct MintEvent {
    pub recipient: Pubkey,
    pub mint: Pubkey,
    pub amount: u64,
    pub timestamp: i64,
}
