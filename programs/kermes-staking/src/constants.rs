/// Seed prefix of every vault address.
pub const VAULT_SEED: &[u8] = b"vault";

/// Seed prefix of the per-vault PDA that signs nested share-mint requests.
pub const STAKING_AUTHORITY_SEED: &[u8] = b"staking_authority";

/// Vault names are used verbatim as a PDA seed, which caps them at 32 bytes.
pub const MAX_VAULT_NAME_LEN: usize = 32;
