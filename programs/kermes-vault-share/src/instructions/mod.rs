pub mod initialize_share_mint;
pub mod mint;

pub use initialize_share_mint::*;
pub use mint::*;
