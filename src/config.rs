//! Configuration for citemark.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variable CITEMARK_CONFIG (path to a config file)
//! 2. Project config file (.citemark/config.yaml)
//! 3. User config file (<config dir>/citemark/config.yaml)
//! 4. Defaults
//!
//! Config file discovery:
//! - Searches current directory and parents for .citemark/config.yaml

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::limits::InputLimits;
use crate::parser::ParseOptions;

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub parser: ParserConfig,
    #[serde(default)]
    pub limits: Option<InputLimits>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct ParserConfig {
    /// Recompute spans after every parse (default: true)
    pub validate_spans: Option<bool>,
    /// Separate chain-of-thought text (default: false)
    pub thinking: Option<bool>,
}

/// Resolved configuration
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
    /// Options every parse starts from
    pub parse: ParseOptions,
}

impl ResolvedConfig {
    fn from_file(config_file: Option<PathBuf>, file: Option<ConfigFile>) -> Self {
        let parser = file
            .as_ref()
            .map(|f| f.parser.clone())
            .unwrap_or_default();
        let limits = file.and_then(|f| f.limits).unwrap_or_default();

        Self {
            config_file,
            parse: ParseOptions {
                validate_spans: parser.validate_spans.unwrap_or(true),
                thinking: parser.thinking.unwrap_or(false),
                limits: Some(limits),
            },
        }
    }
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(".citemark").join("config.yaml");
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// User-level config file, if present
fn user_config_file() -> Option<PathBuf> {
    let path = dirs::config_dir()?.join("citemark").join("config.yaml");
    path.exists().then_some(path)
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Load configuration from all sources, discovering project config from `cwd`
fn load_config_from(cwd: &Path) -> Result<ResolvedConfig> {
    let config_path = match std::env::var_os("CITEMARK_CONFIG") {
        Some(path) => Some(PathBuf::from(path)),
        None => find_config_file(cwd).or_else(user_config_file),
    };

    let file = config_path
        .as_deref()
        .map(load_config_file)
        .transpose()?;

    Ok(ResolvedConfig::from_file(config_path, file))
}

fn load_config() -> Result<ResolvedConfig> {
    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    load_config_from(&cwd)
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{e:#}")));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Force reload configuration (useful for testing)
pub fn reload_config() -> Result<ResolvedConfig> {
    load_config()
}
