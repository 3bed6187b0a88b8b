//! Configuration file management for roadmap.
//!
//! Provides a TOML-based config file at `~/.config/roadmap/config.toml` and a
//! resolution chain: CLI flag > env var > config file > default.

use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use serde::{Deserialize, Serialize};
use tracing::debug;

use roadmap_core::DEFAULT_PLAN_NAME;

// -----------------------------------------------------------------------
// Config file types
// -----------------------------------------------------------------------

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct ConfigFile {
    #[serde(default)]
    pub catalog: CatalogSection,
    #[serde(default)]
    pub roadmap: RoadmapSection,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct CatalogSection {
    /// Path to the course catalog JSON file.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<String>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct RoadmapSection {
    /// Name given to the plan of a legacy single-plan roadmap.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_plan_name: Option<String>,
}

// -----------------------------------------------------------------------
// Paths
// -----------------------------------------------------------------------

/// Return the roadmap config directory.
///
/// Always uses XDG layout: `$XDG_CONFIG_HOME/roadmap` or `~/.config/roadmap`.
pub fn config_dir() -> PathBuf {
    if let Ok(xdg) = std::env::var("XDG_CONFIG_HOME") {
        return PathBuf::from(xdg).join("roadmap");
    }
    dirs::home_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join(".config")
        .join("roadmap")
}

/// Return the path to the roadmap config file.
pub fn config_path() -> PathBuf {
    config_dir().join("config.toml")
}

// -----------------------------------------------------------------------
// Read / write
// -----------------------------------------------------------------------

/// Load and parse the config file. Returns an error if it does not exist.
pub fn load_config() -> Result<ConfigFile> {
    let path = config_path();
    let contents = std::fs::read_to_string(&path)
        .with_context(|| format!("failed to read config file at {}", path.display()))?;
    let config: ConfigFile = toml::from_str(&contents).context("failed to parse config file")?;
    Ok(config)
}

/// Serialize and write the config file, creating parent dirs as needed.
pub fn save_config(config: &ConfigFile) -> Result<()> {
    let path = config_path();
    let dir = config_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create config directory {}", dir.display()))?;

    let contents = toml::to_string_pretty(config).context("failed to serialize config")?;
    std::fs::write(&path, &contents)
        .with_context(|| format!("failed to write config file at {}", path.display()))?;

    Ok(())
}

// -----------------------------------------------------------------------
// Resolved config
// -----------------------------------------------------------------------

/// Fully resolved configuration, ready for use.
#[derive(Debug)]
pub struct RoadmapConfig {
    pub catalog_path: PathBuf,
    pub default_plan_name: String,
}

impl RoadmapConfig {
    /// Resolve configuration using the chain: CLI flag > env var > config file > default.
    ///
    /// - Catalog: `cli_catalog` > `ROADMAP_CATALOG` env > `catalog.path` > error
    /// - Default plan name: `ROADMAP_DEFAULT_PLAN_NAME` env > `roadmap.default_plan_name` >
    ///   [`DEFAULT_PLAN_NAME`]
    pub fn resolve(cli_catalog: Option<&str>) -> Result<Self> {
        let file_config = load_config().ok();

        let catalog_path = if let Some(path) = cli_catalog {
            PathBuf::from(path)
        } else if let Ok(path) = std::env::var("ROADMAP_CATALOG") {
            PathBuf::from(path)
        } else if let Some(path) = file_config.as_ref().and_then(|c| c.catalog.path.as_ref()) {
            PathBuf::from(path)
        } else {
            bail!(
                "course catalog not found; pass --catalog, set ROADMAP_CATALOG, or run `roadmap init --catalog <path>`"
            );
        };

        let default_plan_name = if let Ok(name) = std::env::var("ROADMAP_DEFAULT_PLAN_NAME") {
            name
        } else if let Some(name) = file_config
            .as_ref()
            .and_then(|c| c.roadmap.default_plan_name.clone())
        {
            name
        } else {
            DEFAULT_PLAN_NAME.to_string()
        };

        debug!(catalog = %catalog_path.display(), %default_plan_name, "resolved config");

        Ok(Self {
            catalog_path,
            default_plan_name,
        })
    }
}

// -----------------------------------------------------------------------
// Tests
// -----------------------------------------------------------------------
