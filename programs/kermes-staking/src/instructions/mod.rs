pub mod initialize_vault;
pub mod stake;

pub use initialize_vault::*;
pub use stake::*;
