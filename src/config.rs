//! Configuration management with layered loading
//!
//! Precedence (lowest to highest):
//! 1. Compiled defaults
//! 2. Global config: `$XDG_CONFIG_HOME/ntree/ntree.toml`
//! 3. Explicit config file (`--config` / `NTREE_CONFIG`)
//! 4. Environment variables: `NTREE_*` prefix
//!
//! Command line flags are applied on top by the CLI layer.

use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use config::{Config, ConfigError, Environment};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::{ApplicationError, IoResultExt};
use crate::domain::{FrontierOrder, DEFAULT_MAX_DEGREE};
use crate::infrastructure::render::RenderFormat;

/// Node count of the reference run.
pub const DEFAULT_NODES: usize = 25;

/// Raw settings for intermediate parsing (every field optional, so a file
/// only overrides what it names).
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(default)]
pub struct RawSettings {
    pub nodes: Option<usize>,
    pub max_degree: Option<usize>,
    pub frontier: Option<FrontierOrder>,
    pub render: Option<RenderFormat>,
}

/// Unified configuration for ntree.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(default)]
pub struct Settings {
    /// Number of nodes in the tree (default: 25)
    pub nodes: usize,
    /// Maximum neighbors per node (default: 4)
    pub max_degree: usize,
    /// Frontier discipline used while growing the tree (default: fifo)
    pub frontier: FrontierOrder,
    /// Renderer used by `run` before the diameter report (default: none)
    pub render: RenderFormat,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            nodes: DEFAULT_NODES,
            max_degree: DEFAULT_MAX_DEGREE,
            frontier: FrontierOrder::default(),
            render: RenderFormat::default(),
        }
    }
}

/// Get the XDG config directory for ntree.
pub fn global_config_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "ntree").map(|dirs| dirs.config_dir().to_path_buf())
}

/// Get the path to the global config file.
pub fn global_config_path() -> Option<PathBuf> {
    global_config_dir().map(|dir| dir.join("ntree.toml"))
}

/// Load a TOML file into RawSettings for manual merging.
fn load_raw_settings(path: &Path) -> Result<RawSettings, ApplicationError> {
    let content = std::fs::read_to_string(path).with_path_context("read config", path)?;
    toml::from_str(&content).map_err(|e| ApplicationError::Config {
        message: format!("parse {}: {}", path.display(), e),
    })
}

impl Settings {
    /// Overlay wins where it specifies a value.
    pub fn merge_with(&self, overlay: &RawSettings) -> Self {
        Self {
            nodes: overlay.nodes.unwrap_or(self.nodes),
            max_degree: overlay.max_degree.unwrap_or(self.max_degree),
            frontier: overlay.frontier.unwrap_or(self.frontier),
            render: overlay.render.unwrap_or(self.render),
        }
    }

    /// Load settings with layered precedence.
    ///
    /// # Arguments
    /// * `explicit` - Optional config file; unlike the global file it must exist
    pub fn load(explicit: Option<&Path>) -> Result<Self, ApplicationError> {
        Self::load_from(global_config_path().as_deref(), explicit, None)
    }

    /// Layered load with every source injectable.
    ///
    /// `env` replaces the process environment when given; keys carry the
    /// `NTREE_` prefix (e.g. `NTREE_NODES`).
    pub fn load_from(
        global: Option<&Path>,
        explicit: Option<&Path>,
        env: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // 1. Start with defaults
        let mut current = Self::default();

        // 2. Global config, skipped when absent
        if let Some(global_path) = global {
            if global_path.exists() {
                debug!("global config: {}", global_path.display());
                current = current.merge_with(&load_raw_settings(global_path)?);
            }
        }

        // 3. Explicit config file
        if let Some(path) = explicit {
            if !path.exists() {
                return Err(ApplicationError::Config {
                    message: format!("config file not found: {}", path.display()),
                });
            }
            debug!("explicit config: {}", path.display());
            current = current.merge_with(&load_raw_settings(path)?);
        }

        // 4. Environment variables (explicit override)
        Self::apply_env_overrides(current, env)
    }

    /// Apply NTREE_* environment variables as explicit overrides.
    fn apply_env_overrides(
        mut settings: Self,
        source: Option<HashMap<String, String>>,
    ) -> Result<Self, ApplicationError> {
        // Use config crate just for env var parsing
        let config = Config::builder()
            .add_source(
                Environment::with_prefix("NTREE")
                    .prefix_separator("_")
                    .separator("__")
                    .source(source),
            )
            .build()
            .map_err(config_err)?;

        if let Ok(val) = config.get_string("nodes") {
            settings.nodes = parse_env("NTREE_NODES", &val)?;
        }
        if let Ok(val) = config.get_string("max_degree") {
            settings.max_degree = parse_env("NTREE_MAX_DEGREE", &val)?;
        }
        if let Ok(val) = config.get_string("frontier") {
            settings.frontier = parse_env("NTREE_FRONTIER", &val)?;
        }
        if let Ok(val) = config.get_string("render") {
            settings.render = parse_env("NTREE_RENDER", &val)?;
        }

        Ok(settings)
    }

    /// Show the effective configuration as TOML.
    pub fn to_toml(&self) -> Result<String, ApplicationError> {
        toml::to_string_pretty(self).map_err(|e| ApplicationError::Config {
            message: format!("serialize config: {e}"),
        })
    }

    /// Generate a template config file.
    pub fn template() -> String {
        r#"# ntree configuration
#
# Locations (by precedence, lowest to highest):
#   Global: ~/.config/ntree/ntree.toml
#   File:   --config <file> or NTREE_CONFIG
#   Env:    NTREE_* environment variables (e.g. NTREE_NODES=40)
#   Flags:  -n, --max-degree, --frontier, --render

# Number of nodes, labeled 1..=nodes
# nodes = 25

# Maximum neighbors per node (at least 2)
# max_degree = 4

# Frontier discipline: "fifo" (breadth-first) or "lifo" (depth-first)
# frontier = "fifo"

# Renderer used by `ntree run`: "none", "edges", "dot" or "tree"
# render = "none"
"#
        .to_string()
    }
}

fn parse_env<T>(key: &str, val: &str) -> Result<T, ApplicationError>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    val.trim().parse().map_err(|e: T::Err| ApplicationError::Config {
        message: format!("{key}={val}: {e}"),
    })
}

fn config_err(e: ConfigError) -> ApplicationError {
    ApplicationError::Config {
        message: e.to_string(),
    }
}
