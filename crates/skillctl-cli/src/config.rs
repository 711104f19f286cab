//! Layered configuration: global file, local or explicit file, `SKILLCTL__`
//! environment variables, then command-line flags
//!
//! Nested keys map to environment variables as `SKILLCTL__SECTION__KEY`,
//! e.g. `SKILLCTL__SKILLS__NAMESPACE`.

use anyhow::Context;
use serde::Deserialize;
use std::path::{Path, PathBuf};

use crate::args::Cli;

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct SkillsConfig {
    /// Stock skill collection
    #[serde(default = "default_base_root")]
    pub base_root: PathBuf,
    /// Personal skills; may not exist
    #[serde(default = "default_override_root")]
    pub override_root: PathBuf,
    /// Prefix of namespaced base skill names
    #[serde(default = "default_namespace")]
    pub namespace: String,
    /// Skill appended to `bootstrap` output when installed; empty disables
    #[serde(default = "default_bootstrap_skill")]
    pub bootstrap_skill: String,
}

fn default_base_root() -> PathBuf {
    PathBuf::from("~/.skillctl/skills")
}

fn default_override_root() -> PathBuf {
    PathBuf::from("~/.config/skillctl/skills")
}

fn default_namespace() -> String {
    "core".to_string()
}

fn default_bootstrap_skill() -> String {
    "using-skills".to_string()
}

impl Default for SkillsConfig {
    fn default() -> Self {
        Self {
            base_root: default_base_root(),
            override_root: default_override_root(),
            namespace: default_namespace(),
            bootstrap_skill: default_bootstrap_skill(),
        }
    }
}

impl SkillsConfig {
    pub fn with_roots(base_root: impl Into<PathBuf>, override_root: impl Into<PathBuf>) -> Self {
        Self {
            base_root: base_root.into(),
            override_root: override_root.into(),
            ..Self::default()
        }
    }

    /// Base root with `~` expanded
    pub fn base_root(&self) -> PathBuf {
        expand_home(&self.base_root)
    }

    /// Override root with `~` expanded
    pub fn override_root(&self) -> PathBuf {
        expand_home(&self.override_root)
    }
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct LoggingConfig {
    #[serde(default = "default_level")]
    pub level: String,
}

fn default_level() -> String {
    "warn".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_level(),
        }
    }
}

#[derive(Debug, Deserialize, Clone, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub skills: SkillsConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Config {
    /// Get the global config path: ~/.skillctl/skillctl.toml
    fn global_config_path() -> Option<PathBuf> {
        dirs::home_dir().map(|home| home.join(".skillctl").join("skillctl.toml"))
    }

    /// Load configuration with layered approach:
    /// 1. Global config: ~/.skillctl/skillctl.toml (optional, never created)
    /// 2. `explicit` file (required) or ./skillctl.toml (optional)
    /// 3. Environment variables (highest priority)
    pub fn load(explicit: Option<&Path>) -> anyhow::Result<Self> {
        // Load .env file from current directory
        dotenvy::dotenv().ok();

        Self::load_from(Self::global_config_path(), explicit)
    }

    /// Same as [`Config::load`] with the global file location supplied
    pub fn load_from(global: Option<PathBuf>, explicit: Option<&Path>) -> anyhow::Result<Self> {
        let mut config_builder = config::Config::builder();

        // Layer 1: Global config
        if let Some(global) = global {
            config_builder = config_builder.add_source(config::File::from(global).required(false));
        }

        // Layer 2: Explicit file, or local workspace config
        config_builder = match explicit {
            Some(path) => config_builder.add_source(config::File::from(path).required(true)),
            None => config_builder.add_source(config::File::with_name("skillctl").required(false)),
        };

        // Layer 3: Environment variables with SKILLCTL__ prefix
        config_builder =
            config_builder.add_source(config::Environment::with_prefix("SKILLCTL").separator("__"));

        let config = config_builder
            .build()
            .context("Failed to read configuration")?;

        config
            .try_deserialize()
            .context("Invalid configuration")
    }

    /// Apply command-line flags, which win over every file and env layer
    pub fn with_overrides(mut self, cli: &Cli) -> Self {
        if let Some(root) = &cli.base_root {
            self.skills.base_root = root.clone();
        }
        if let Some(root) = &cli.override_root {
            self.skills.override_root = root.clone();
        }
        if let Some(namespace) = &cli.namespace {
            self.skills.namespace = namespace.clone();
        }
        if let Some(level) = &cli.log_level {
            self.logging.level = level.clone();
        }
        self
    }
}

/// Expand a leading `~` to the home directory
pub fn expand_home(path: &Path) -> PathBuf {
    match (path.strip_prefix("~"), dirs::home_dir()) {
        (Ok(rest), Some(home)) => home.join(rest),
        _ => path.to_path_buf(),
    }
}
