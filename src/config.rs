//! Implementation of the configuration module.

use std::path::Path;

use anyhow::Context;
use anyhow::Result;
use flagtree_hierarchy::ClangConventions;
use flagtree_hierarchy::GccConventions;
use serde::Deserialize;
use serde::Serialize;

/// Represents the configuration for the flagtree CLI tool.
///
/// Every section and field is optional; missing values take the defaults
/// that describe upstream GCC and Clang.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", deny_unknown_fields, default)]
pub struct Config {
    /// Configuration for the `gcc` command.
    pub gcc: GccConventions,
    /// Configuration for the `clang` command.
    pub clang: ClangConventions,
}

impl Config {
    /// Read a configuration file from the specified path.
    pub fn read_config(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to open config file `{}`", path.display()))?;
        toml::from_str(&text)
            .with_context(|| format!("failed to parse config file `{}`", path.display()))
    }
}
