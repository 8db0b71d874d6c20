use anchor_lang::prelude::*;

#[error_code]
pub enum VaultShareError {
    #[msg("Mint amount must be greater than zero")]
    InvalidAmount,
    #[msg("Signer is not the authority configured for this share mint")]
    AuthorityMismatch,
    #[msg("Destination token account does not belong to this share mint")]
    MintAccountMismatch,
    #[msg("Share supply would overflow")]
    ArithmeticOverflow,
}
