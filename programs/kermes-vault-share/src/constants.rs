/// Seed of the per-mint configuration account.
pub const SHARE_CONFIG_SEED: &[u8] = b"share_config";

/// Seed of the PDA holding token-level mint authority over a receipt mint.
pub const MINT_AUTHORITY_SEED: &[u8] = b"mint_authority";
