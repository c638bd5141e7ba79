use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs;
use std::path::PathBuf;

use crate::paths::paths;

/// Top-level configuration structure loaded from `config.toml`.
///
/// The file defines which repositories gitmir keeps mirrored. The optional
/// `root` key overrides the directory mirrors are placed under; the targets
/// themselves live in the `mirrors` section.
///
/// Example TOML:
/// ```toml
/// root = "/srv/git"
///
/// [[mirrors]]
/// source = "https://git.example.org/infra/deploy.git"
/// path   = "deploy.git"
///
/// [[mirrors]]
/// source = "https://github.com/zsh-users/zsh-autosuggestions.git"
/// mode   = "worktree"
/// ```
#[derive(Debug, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub root: Option<PathBuf>,
    #[serde(default)]
    pub mirrors: Vec<Mirror>,
}

/// Representation of a single mirror entry in `config.toml`.
///
/// Each field corresponds to keys typically found under `[[mirrors]]`.
/// All fields are optional (default empty or `None`) to allow flexible
/// configs; entries without a `source` are reported as skipped at sync time.
#[derive(Debug, Deserialize, Clone)]
pub struct Mirror {
    #[serde(default)]
    pub source: String,
    #[serde(default)]
    pub path: Option<PathBuf>,
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
}

/// Load and parse `config.toml` into a [`Config`] structure.
///
/// # Errors
/// - Returns an error if `config.toml` cannot be read.
/// - Returns an error if parsing the TOML fails.
///
/// # Notes
/// - This always resolves the path using [`paths()`].
/// - If the file is missing, the error message includes the resolved path.
pub fn load_config() -> Result<Config> {
    let p = paths()?;
    let txt = fs::read_to_string(&p.config)
        .with_context(|| format!("config not found: {}", p.config.display()))?;
    let cfg: Config = toml::from_str(&txt).context("failed to parse config.toml")?;
    Ok(cfg)
}
