//! Settings resolved from flags, environment and `~/.quoter/config.toml`.
//!
//! Precedence for the ledger path: `--ledger`, then `QUOTER_LEDGER`, then the
//! `ledger` key of the config file, then `~/.quoter/quotes.csv`. Relative paths
//! in the config file are relative to the file itself.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use quote_catalog::{Catalog, Letterhead};
use serde::Deserialize;

const QUOTER_DIR: &str = ".quoter";
const CONFIG_FILE: &str = "config.toml";
const LEDGER_FILE: &str = "quotes.csv";

pub const LEDGER_ENV: &str = "QUOTER_LEDGER";
pub const CONFIG_ENV: &str = "QUOTER_CONFIG";

#[derive(Debug, Default, Deserialize)]
#[serde(default, deny_unknown_fields)]
struct ConfigFile {
    ledger: Option<PathBuf>,
    catalog: Option<PathBuf>,
    letterhead: Letterhead,
}

impl ConfigFile {
    fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file {}", path.display()))?;
        toml::from_str(&contents)
            .with_context(|| format!("Failed to parse config file {}", path.display()))
    }
}

#[derive(Debug)]
pub struct Settings {
    pub ledger: PathBuf,
    pub catalog: Catalog,
    pub letterhead: Letterhead,
}

impl Settings {
    pub fn resolve(config_flag: Option<&Path>, ledger_flag: Option<PathBuf>) -> Result<Self> {
        let home = dirs::home_dir().context("Failed to get home directory")?;

        let config_path = config_flag
            .map(Path::to_path_buf)
            .or_else(|| env_path(CONFIG_ENV))
            .or_else(|| {
                let default = home.join(QUOTER_DIR).join(CONFIG_FILE);
                default.exists().then_some(default)
            });

        let file = match &config_path {
            Some(path) => {
                log::debug!("Loading config from {}", path.display());
                ConfigFile::load(path)?
            }
            None => ConfigFile::default(),
        };

        let ledger_override = ledger_flag.or_else(|| env_path(LEDGER_ENV));
        Self::from_parts(file, config_path.as_deref(), ledger_override, &home)
    }

    fn from_parts(
        file: ConfigFile,
        config_path: Option<&Path>,
        ledger_override: Option<PathBuf>,
        home: &Path,
    ) -> Result<Self> {
        let base = config_path.and_then(Path::parent).unwrap_or(Path::new(""));
        let relative_to_config = |p: PathBuf| if p.is_absolute() { p } else { base.join(p) };

        let ledger = ledger_override
            .or_else(|| file.ledger.map(relative_to_config))
            .unwrap_or_else(|| home.join(QUOTER_DIR).join(LEDGER_FILE));

        let catalog = match file.catalog.map(relative_to_config) {
            Some(path) => Catalog::load(&path)
                .with_context(|| format!("Failed to load service catalog {}", path.display()))?,
            None => Catalog::builtin(),
        };

        Ok(Self {
            ledger,
            catalog,
            letterhead: file.letterhead,
        })
    }
}

fn env_path(var: &str) -> Option<PathBuf> {
    std::env::var_os(var)
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}
