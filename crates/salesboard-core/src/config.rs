//! Configuration types for salesboard.
//!
//! [`Config::load`] reads `~/.config/salesboard/config.toml`, creating it with
//! hardcoded defaults if it does not yet exist, then applies `SALESBOARD_*`
//! environment overrides (`SALESBOARD_PAGER__PAGE_SIZE=50`).
//! [`Config::defaults`] returns the same defaults without touching the
//! filesystem or environment (useful in tests).
//!
//! The Notion API key is deliberately absent: it comes from the command line
//! or `NOTION_API_KEY` and is never written to disk.

use crate::error::MappingError;
use crate::mapping::MappingOverrides;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

// ---------------------------------------------------------------------------
// Embedded defaults
// ---------------------------------------------------------------------------

const DEFAULT_CONFIG: &str = r#"
[source]
base_url           = "http://localhost:3001/api/notion"
database_id        = ""
notion_version     = "2022-06-28"
request_timeout_ms = 30000

[pager]
page_size           = 100
inter_page_delay_ms = 350
assumed_upper_bound = 1000

# Pin a canonical field to one database property, e.g.
#   customer    = "의원명"
#   sales_stage = "Sales Stage"
[mapping]
"#;

// ---------------------------------------------------------------------------
// Public config types
// ---------------------------------------------------------------------------

/// Top-level configuration, loaded from `~/.config/salesboard/config.toml`.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default)]
    pub source: SourceConfig,
    #[serde(default)]
    pub pager: PagerConfig,
    /// Canonical field name → source property name.
    #[serde(default)]
    pub mapping: HashMap<String, String>,
}

/// `[source]` section: where the paginated query is sent.
#[derive(Debug, Clone, Deserialize)]
pub struct SourceConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub database_id: String,
    #[serde(default = "default_notion_version")]
    pub notion_version: String,
    #[serde(default = "default_request_timeout_ms")]
    pub request_timeout_ms: u64,
}

fn default_base_url() -> String { "http://localhost:3001/api/notion".to_string() }
fn default_notion_version() -> String { "2022-06-28".to_string() }
fn default_request_timeout_ms() -> u64 { 30_000 }

impl Default for SourceConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            database_id: String::new(),
            notion_version: default_notion_version(),
            request_timeout_ms: default_request_timeout_ms(),
        }
    }
}

/// `[pager]` section.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct PagerConfig {
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Fixed pause between consecutive page requests.
    #[serde(default = "default_inter_page_delay_ms")]
    pub inter_page_delay_ms: u64,
    /// Upper bound used to estimate the collection size for progress.
    #[serde(default = "default_assumed_upper_bound")]
    pub assumed_upper_bound: usize,
}

fn default_page_size() -> usize { 100 }
fn default_inter_page_delay_ms() -> u64 { 350 }
fn default_assumed_upper_bound() -> usize { 1000 }

impl Default for PagerConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            inter_page_delay_ms: default_inter_page_delay_ms(),
            assumed_upper_bound: default_assumed_upper_bound(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::defaults()
    }
}

impl Config {
    /// Load from `~/.config/salesboard/config.toml`, layered on top of the
    /// built-in defaults. Creates the file with defaults if it does not exist.
    pub fn load() -> anyhow::Result<Self> {
        let path = config_path();

        if !path.exists() {
            if let Some(parent) = path.parent() {
                std::fs::create_dir_all(parent)?;
            }
            std::fs::write(&path, DEFAULT_CONFIG.trim_start())?;
        }

        Self::load_from(&path)
    }

    /// Load from an explicit file, layered on top of the built-in defaults.
    /// A missing file is not an error.
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .add_source(config::File::from(path).required(false))
            .add_source(
                config::Environment::with_prefix("SALESBOARD")
                    .prefix_separator("_")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()
            .map_err(Into::into)
    }

    /// Return the built-in defaults without touching the filesystem.
    pub fn defaults() -> Self {
        config::Config::builder()
            .add_source(config::File::from_str(DEFAULT_CONFIG, config::FileFormat::Toml))
            .build()
            .expect("built-in default config must be valid TOML")
            .try_deserialize()
            .expect("built-in default config must deserialize correctly")
    }

    /// The `[mapping]` table as typed overrides.
    pub fn mapping_overrides(&self) -> Result<MappingOverrides, MappingError> {
        MappingOverrides::from_table(&self.mapping)
    }
}

// ---------------------------------------------------------------------------
// Path helpers
// ---------------------------------------------------------------------------

fn config_path() -> PathBuf {
    std::env::var("XDG_CONFIG_HOME")
        .map(PathBuf::from)
        .unwrap_or_else(|_| {
            PathBuf::from(std::env::var("HOME").unwrap_or_else(|_| ".".to_string()))
                .join(".config")
        })
        .join("salesboard")
        .join("config.toml")
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
