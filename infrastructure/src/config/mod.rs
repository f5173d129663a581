//! Configuration loading.
//!
//! - [`file_config::FileConfig`] — serde model of `quizduel.toml`
//! - [`loader::ConfigLoader`] — figment-based multi-source merging

pub mod file_config;
pub mod loader;

pub use file_config::{BankConfig, FileConfig};
pub use loader::ConfigLoader;
