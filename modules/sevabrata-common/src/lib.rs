pub mod config;
pub mod format;
pub mod types;

pub use config::Config;
pub use types::*;
