pub mod share_config;

pub use share_config::*;
