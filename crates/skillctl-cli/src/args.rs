//! CLI argument definitions using clap

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "skillctl")]
#[command(about = "Find and load agent skills from stock and personal skill directories")]
#[command(version)]
pub struct Cli {
    /// Directory of stock skills
    #[arg(long, global = true, value_name = "PATH")]
    pub base_root: Option<PathBuf>,

    /// Directory of personal skills that override stock skills of the same name
    #[arg(long, global = true, value_name = "PATH")]
    pub override_root: Option<PathBuf>,

    /// Namespace prefix for stock skills (e.g. `core` in `core:tdd`)
    #[arg(long, global = true)]
    pub namespace: Option<String>,

    /// Configuration file (defaults to ./skillctl.toml when present)
    #[arg(long, global = true, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Log level: trace, debug, info, warn, error
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone, PartialEq, Eq)]
pub enum Commands {
    /// Print onboarding instructions and every available skill
    Bootstrap,

    /// List all skills, or search them by name and summary
    FindSkills {
        /// Search terms; omit to list everything
        query: Vec<String>,

        /// Emit the rows as JSON
        #[arg(long)]
        json: bool,
    },

    /// Print a skill's full content
    UseSkill {
        /// Skill name, bare (`tdd`) or namespaced (`core:tdd`)
        name: String,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_use_skill_with_roots() {
        let cli = Cli::try_parse_from([
            "skillctl",
            "use-skill",
            "core:tdd",
            "--base-root",
            "/opt/skills",
        ])
        .unwrap();

        assert_eq!(
            cli.command,
            Commands::UseSkill {
                name: "core:tdd".into()
            }
        );
        assert_eq!(cli.base_root, Some(PathBuf::from("/opt/skills")));
        assert!(cli.override_root.is_none());
    }

    #[test]
    fn test_parse_find_skills_multi_word_query() {
        let cli = Cli::try_parse_from(["skillctl", "find-skills", "--json", "test", "driven"]).unwrap();
        assert_eq!(
            cli.command,
            Commands::FindSkills {
                query: vec!["test".into(), "driven".into()],
                json: true,
            }
        );
    }

    #[test]
    fn test_use_skill_requires_name() {
        assert!(Cli::try_parse_from(["skillctl", "use-skill"]).is_err());
    }
}
