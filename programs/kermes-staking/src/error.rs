use anchor_lang::prelude::*;

#[error_code]
pub enum StakingError {
    #[msg("Vault name must be between 1 and 32 bytes")]
    InvalidVaultName,
    #[msg("A vault already exists at this address")]
    AddressCollision,
    #[msg("Stake amount must be greater than zero")]
    InvalidAmount,
    #[msg("Vault account does not match its derived address")]
    AddressDerivationMismatch,
    #[msg("Token mint doesn't match vault's token mint")]
    InvalidTokenMint,
    #[msg("Invalid token account owner")]
    InvalidTokenAccount,
    #[msg("Vault token account is not owned by the vault")]
    InvalidVaultTokenAccount,
    #[msg("Invalid token program")]
    InvalidTokenProgram,
    #[msg("Account is not owned by the selected token program")]
    ProtocolMismatch,
    #[msg("Decimals do not match the asset mint")]
    DecimalsMismatch,
    #[msg("Source account balance is too low")]
    InsufficientBalance,
    #[msg("Mint extension would break 1:1 deposit accounting")]
    UnsupportedMintExtension,
    #[msg("Math operation overflow")]
    ArithmeticOverflow,
    #[msg("Share mint is not the receipt mint of this vault")]
    InvalidShareMint,
}
