//! Configuration for bookshelf paths.
//!
//! Configuration sources (highest priority first):
//! 1. Environment variables (BOOKSHELF_DATA, BOOKSHELF_HOME)
//! 2. Config file (.bookshelf/config.yaml)
//! 3. Defaults (~/.bookshelf/books.json)
//!
//! Config file discovery:
//! - Searches current directory and parents for .bookshelf/config.yaml
//! - Paths in config file are relative to the .bookshelf/ directory

use std::path::{Path, PathBuf};
use std::sync::OnceLock;

use anyhow::{Context, Result};
use serde::Deserialize;

/// Environment variable overriding the catalog file
pub const ENV_DATA: &str = "BOOKSHELF_DATA";

/// Environment variable overriding the state directory
pub const ENV_HOME: &str = "BOOKSHELF_HOME";

const CONFIG_DIR: &str = ".bookshelf";
const CONFIG_FILE: &str = "config.yaml";
const DEFAULT_DATA_FILE: &str = "books.json";

/// Global cached configuration (stores Result to handle init errors)
static CONFIG: OnceLock<Result<ResolvedConfig, String>> = OnceLock::new();

/// Raw config file schema (matches YAML structure)
#[derive(Debug, Clone, Deserialize)]
pub struct ConfigFile {
    pub version: String,
    #[serde(default)]
    pub paths: PathsConfig,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PathsConfig {
    /// State directory (relative to .bookshelf/)
    pub home: Option<String>,
    /// Catalog file (relative to .bookshelf/)
    pub data_file: Option<String>,
}

/// Resolved configuration with absolute paths
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    /// State directory
    pub home: PathBuf,
    /// Catalog JSON file
    pub data_file: PathBuf,
    /// Path to config file (if found)
    pub config_file: Option<PathBuf>,
}

/// Find config file by searching `start` and its parents
fn find_config_file(start: &Path) -> Option<PathBuf> {
    let mut current = start.to_path_buf();

    loop {
        let config_path = current.join(CONFIG_DIR).join(CONFIG_FILE);
        if config_path.exists() {
            return Some(config_path);
        }

        if !current.pop() {
            break;
        }
    }

    None
}

/// Load and parse config file
fn load_config_file(path: &Path) -> Result<ConfigFile> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read config file: {}", path.display()))?;

    serde_yaml::from_str(&content)
        .with_context(|| format!("Failed to parse config file: {}", path.display()))
}

/// Resolve a path that may be relative to the config directory
fn resolve_path(base: &Path, path_str: &str) -> PathBuf {
    let path = PathBuf::from(path_str);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
            .canonicalize()
            .unwrap_or_else(|_| base.join(path_str))
    }
}

/// Everything that feeds into path resolution
#[derive(Debug, Default)]
struct Sources {
    env_home: Option<String>,
    env_data: Option<String>,
    config: Option<(PathBuf, ConfigFile)>,
}

/// Apply precedence rules to the collected sources
fn resolve(sources: Sources, default_home: PathBuf) -> ResolvedConfig {
    let (file_home, file_data, config_file) = match sources.config {
        Some((config_path, config)) => {
            let config_dir = config_path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| PathBuf::from("."));
            let home = config.paths.home.map(|h| resolve_path(&config_dir, &h));
            let data = config
                .paths
                .data_file
                .map(|d| resolve_path(&config_dir, &d));
            (home, data, Some(config_path))
        }
        None => (None, None, None),
    };

    let home = sources
        .env_home
        .map(PathBuf::from)
        .or(file_home)
        .unwrap_or(default_home);

    let data_file = sources
        .env_data
        .map(PathBuf::from)
        .or(file_data)
        .unwrap_or_else(|| home.join(DEFAULT_DATA_FILE));

    ResolvedConfig {
        home,
        data_file,
        config_file,
    }
}

/// Load configuration from all sources
fn load_config() -> Result<ResolvedConfig> {
    let default_home = dirs::home_dir()
        .context("Failed to determine home directory")?
        .join(CONFIG_DIR);

    let cwd = std::env::current_dir().context("Failed to determine current directory")?;
    let config = match find_config_file(&cwd) {
        Some(path) => {
            let parsed = load_config_file(&path)?;
            Some((path, parsed))
        }
        None => None,
    };

    let sources = Sources {
        env_home: std::env::var(ENV_HOME).ok(),
        env_data: std::env::var(ENV_DATA).ok(),
        config,
    };

    Ok(resolve(sources, default_home))
}

/// Get the global configuration (loads once, then cached)
pub fn config() -> Result<&'static ResolvedConfig> {
    let result = CONFIG.get_or_init(|| load_config().map_err(|e| format!("{:#}", e)));

    match result {
        Ok(config) => Ok(config),
        Err(e) => anyhow::bail!("{}", e),
    }
}

/// Get the bookshelf state directory
pub fn bookshelf_home() -> Result<PathBuf> {
    Ok(config()?.home.clone())
}

/// Get the catalog file path
pub fn catalog_path() -> Result<PathBuf> {
    Ok(config()?.data_file.clone())
}
