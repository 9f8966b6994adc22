//! Configuration file support for refgraph.
//!
//! refgraph reads two configuration file locations:
//! - Global: `~/.refgraph/config.toml` - User-wide defaults
//! - Project: `.refgraph/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::Corpus;

/// refgraph configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Indexing settings
    pub index: IndexConfig,

    /// Corpus settings
    pub corpus: CorpusConfig,

    /// Document store settings
    pub store: StoreConfig,
}

/// Indexing configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexConfig {
    /// Also load the external test packages of each entry
    pub include_tests: bool,

    /// Versioning policy (mtime, constant)
    pub version: Option<String>,

    /// Version used by the constant policy
    pub constant_version: Option<i64>,
}

/// Corpus configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CorpusConfig {
    /// Corpus roots. Empty means `$GOROOT/src` and `$GOPATH/*/src`.
    pub roots: Vec<PathBuf>,
}

/// Document store configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Directory of the index store
    pub dir: Option<PathBuf>,
}

/// How packages are versioned.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VersionKind {
    /// Newest file modification time
    #[default]
    Mtime,
    /// The configured constant
    Constant,
}

impl FromStr for VersionKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "mtime" => Ok(VersionKind::Mtime),
            "constant" => Ok(VersionKind::Constant),
            other => bail!(
                "unknown version policy `{}`\n\
                 help: expected `mtime` or `constant`",
                other
            ),
        }
    }
}

impl fmt::Display for VersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            VersionKind::Mtime => write!(f, "mtime"),
            VersionKind::Constant => write!(f, "constant"),
        }
    }
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        // Index settings
        if other.index.include_tests {
            self.index.include_tests = true;
        }
        if other.index.version.is_some() {
            self.index.version = other.index.version;
        }
        if other.index.constant_version.is_some() {
            self.index.constant_version = other.index.constant_version;
        }

        // Corpus settings
        if !other.corpus.roots.is_empty() {
            self.corpus.roots = other.corpus.roots;
        }

        // Store settings
        if other.store.dir.is_some() {
            self.store.dir = other.store.dir;
        }
    }

    /// Parse the versioning policy.
    pub fn version_kind(&self) -> Result<VersionKind> {
        match &self.index.version {
            Some(s) => s.parse(),
            None => Ok(VersionKind::default()),
        }
    }

    /// Configured corpora, or the defaults from the environment.
    pub fn corpora(&self) -> Result<Vec<Corpus>> {
        if self.corpus.roots.is_empty() {
            return Ok(Corpus::default_corpora());
        }
        self.corpus
            .roots
            .iter()
            .map(|root| {
                Corpus::new(root.clone())
                    .with_context(|| format!("invalid corpus root `{}`", root.display()))
            })
            .collect()
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.refgraph/config.toml)
/// 2. Global config (~/.refgraph/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    // Load global config first
    if global_path.exists() {
        let global = Config::load_or_default(global_path);
        config.merge(global);
    }

    // Project config overrides global
    if project_path.exists() {
        let project = Config::load_or_default(project_path);
        config.merge(project);
    }

    config
}

/// Get the global refgraph config directory (~/.refgraph).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".refgraph"))
}

/// Get the global config path (~/.refgraph/config.toml).
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("config.toml"))
}

/// Get the project config path (.refgraph/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".refgraph").join("config.toml")
}
