//! skillctl - command-line skill registry for AI coding agents
//!
//! Wires configuration, discovery and resolution into the three commands
//! agents call: `bootstrap`, `find-skills` and `use-skill`.

pub mod args;
pub mod commands;
pub mod config;
pub mod render;

pub use args::{Cli, Commands};
pub use commands::{CommandOutput, Outcome};
pub use config::{Config, LoggingConfig, SkillsConfig};
