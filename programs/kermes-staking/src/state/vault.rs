use anchor_lang::prelude::*;

use crate::constants::{MAX_VAULT_NAME_LEN, STAKING_AUTHORITY_SEED, VAULT_SEED};

#[account]
pub struct Vault {
    /// The identity that created the vault
    pub curator: Pubkey,
    /// The mint of the only asset this vault accepts
    pub asset: Pubkey,
    /// The receipt mint issued 1:1 for stakes into this vault
    pub share_mint: Pubkey,
    /// Sum of every successful stake into this vault
    pub total_deposited: u64,
    /// Bump seed for PDA derivation
    pub bump: u8,
    /// Human-chosen name, part of the vault address
    pub name: String,
}

impl Vault {
    pub const LEN: usize = 8 + // discriminator
        32 + // curator
        32 + // asset
        32 + // share_mint
        8 + // total_deposited
        1 + // bump
        4 + MAX_VAULT_NAME_LEN; // name (length prefix + max bytes)

    /// Re-derives the vault address from the recorded business keys and bump.
    pub fn is_derived_at(&self, key: &Pubkey) -> bool {
        if !is_valid_vault_name(&self.name) {
            return false;
        }
        Pubkey::create_program_address(
            &[
                VAULT_SEED,
                self.curator.as_ref(),
                self.asset.as_ref(),
                self.name.as_bytes(),
                &[self.bump],
            ],
            &crate::ID,
        )
        .map_or(false, |expected| expected == *key)
    }
}

pub fn is_valid_vault_name(name: &str) -> bool {
    !name.is_empty() && name.len() <= MAX_VAULT_NAME_LEN
}

/// Address and bump of the vault for `(curator, asset, name)`.
///
/// Returns `None` when `name` is not a valid vault name.
pub fn derive_vault_address(curator: &Pubkey, asset: &Pubkey, name: &str) -> Option<(Pubkey, u8)> {
    if !is_valid_vault_name(name) {
        return None;
    }
    Pubkey::try_find_program_address(
        &[VAULT_SEED, curator.as_ref(), asset.as_ref(), name.as_bytes()],
        &crate::ID,
    )
}

/// The PDA that signs share-mint requests for `vault`. A share mint can only
/// back one vault because its config names exactly one of these.
pub fn staking_authority_address(vault: &Pubkey) -> (Pubkey, u8) {
    Pubkey::find_program_address(&[STAKING_AUTHORITY_SEED, vault.as_ref()], &crate::ID)
}
