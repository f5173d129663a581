//! Configuration file model

use quizduel_application::DuelRules;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Question bank settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BankConfig {
    /// Path to the TOML question bank.
    pub path: PathBuf,
}

impl Default for BankConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("questions.toml"),
        }
    }
}

/// Root configuration loaded from `quizduel.toml`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FileConfig {
    /// Question bank settings.
    #[serde(default)]
    pub bank: BankConfig,
    /// Players known to the in-memory store.
    #[serde(default)]
    pub players: Vec<String>,
    /// Duel composition rules.
    #[serde(default)]
    pub rules: DuelRules,
}
