use anyhow::{Context, Result};
use pesalog_core::{Rule, default_rules};
use pesalog_ingest::FieldAliases;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub store: StoreSection,
    pub aliases: FieldAliases,
    pub rules: Vec<Rule>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreSection {
    /// Entry file location; defaults to ~/.pesalog/entries.json.
    pub path: Option<PathBuf>,
    pub timeout_secs: u64,
}

impl Default for StoreSection {
    fn default() -> Self {
        StoreSection {
            path: None,
            timeout_secs: 10,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            store: StoreSection::default(),
            aliases: FieldAliases::default(),
            rules: default_rules(),
        }
    }
}

pub fn pesalog_home() -> Result<PathBuf> {
    let home = std::env::var("HOME").context("HOME is not set")?;
    Ok(PathBuf::from(home).join(".pesalog"))
}

pub fn ensure_pesalog_home() -> Result<PathBuf> {
    let dir = pesalog_home()?;
    fs::create_dir_all(&dir).with_context(|| format!("create {}", dir.display()))?;
    Ok(dir)
}

pub fn config_path() -> Result<PathBuf> {
    Ok(ensure_pesalog_home()?.join("config.toml"))
}

/// Load from an explicit path, or the default location, or fall back to
/// built-in defaults when no file exists.
pub fn load_config(explicit: Option<&Path>) -> Result<Config> {
    let path = match explicit {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !path.exists() {
        if explicit.is_some() {
            anyhow::bail!("config not found: {}", path.display());
        }
        return Ok(Config::default());
    }
    load_config_file(&path)
}

pub fn load_config_file(path: &Path) -> Result<Config> {
    let s = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    toml::from_str(&s).with_context(|| format!("parse {}", path.display()))
}

pub fn save_config(cfg: &Config, path: &Path) -> Result<()> {
    let s = toml::to_string_pretty(cfg).context("serialize config")?;
    fs::write(path, s).with_context(|| format!("write {}", path.display()))?;
    Ok(())
}

/// Write the default config for editing; refuses to clobber.
pub fn init_config() -> Result<()> {
    let p = config_path()?;
    if p.exists() {
        println!("Config already exists: {}", p.display());
        return Ok(());
    }
    save_config(&Config::default(), &p)?;
    println!("Wrote {}", p.display());
    Ok(())
}

impl Config {
    pub fn store_path(&self) -> Result<PathBuf> {
        match &self.store.path {
            Some(p) => Ok(p.clone()),
            None => Ok(ensure_pesalog_home()?.join("entries.json")),
        }
    }
}
