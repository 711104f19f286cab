//! The three commands: `bootstrap`, `find-skills` and `use-skill`
//!
//! Each command returns a [`CommandOutput`] instead of printing, so the binary
//! owns stdout/stderr and the exit code.

use skillctl_skills::{DirectorySource, RegistryBuilder, Resolution, Resolver, SkillRegistry};
use std::io::{self, Write};
use tracing::{debug, warn};

use crate::args::Commands;
use crate::config::SkillsConfig;
use crate::render::{self, SkillRow};

/// Exit status: the query matched nothing, or matched several skills
pub const EXIT_NOT_FOUND: u8 = 1;
/// Exit status: the installation is broken (unreadable content or config)
pub const EXIT_BROKEN: u8 = 3;

const BOOTSTRAP_INSTRUCTIONS: &str = "\
# Skills

You have a library of skills: instructional documents describing proven
workflows and conventions. Before starting a task, check whether a skill
applies. If one does, load it and follow it.

- `skillctl find-skills [query]` lists skills, or searches names and summaries
- `skillctl use-skill <name>` prints a skill's full instructions

Personal skills override stock skills of the same name. A stock skill stays
reachable by its namespaced name (`{namespace}:<name>`).
";

/// Result classification, mapped to the process exit code
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    Success,
    /// Ask the user to rephrase
    NotFound,
    /// Check the installation
    Broken,
}

impl Outcome {
    pub fn code(self) -> u8 {
        match self {
            Outcome::Success => 0,
            Outcome::NotFound => EXIT_NOT_FOUND,
            Outcome::Broken => EXIT_BROKEN,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub outcome: Outcome,
}

impl CommandOutput {
    fn success(stdout: String) -> Self {
        Self {
            stdout,
            stderr: String::new(),
            outcome: Outcome::Success,
        }
    }

    fn failure(outcome: Outcome, stderr: String) -> Self {
        Self {
            stdout: String::new(),
            stderr,
            outcome,
        }
    }

    /// Write both streams and return the exit code. A failed write exits as broken.
    pub fn emit(&self, stdout: &mut impl Write, stderr: &mut impl Write) -> u8 {
        let written = write_stream(stderr, &self.stderr)
            .and_then(|()| write_stream(stdout, &self.stdout));

        match written {
            Ok(()) => self.outcome.code(),
            Err(_) => EXIT_BROKEN,
        }
    }
}

fn write_stream(stream: &mut impl Write, text: &str) -> io::Result<()> {
    stream.write_all(text.as_bytes())?;
    stream.flush()
}

/// Discover both tiers configured in `settings`
pub fn build_registry(settings: &SkillsConfig) -> SkillRegistry {
    let base = DirectorySource::base(settings.base_root());
    let overrides = DirectorySource::overrides(settings.override_root());
    RegistryBuilder::new(settings.namespace.as_str()).build(&base, &overrides)
}

/// Build the registry and run one command against it
pub fn run(command: &Commands, settings: &SkillsConfig) -> CommandOutput {
    let registry = build_registry(settings);

    match command {
        Commands::Bootstrap => bootstrap(&registry, settings),
        Commands::FindSkills { query, json } => find_skills(&registry, &query.join(" "), *json),
        Commands::UseSkill { name } => use_skill(&registry, name),
    }
}

/// Onboarding instructions, the full listing and the bootstrap skill's content
pub fn bootstrap(registry: &SkillRegistry, settings: &SkillsConfig) -> CommandOutput {
    let mut out = BOOTSTRAP_INSTRUCTIONS.replace("{namespace}", registry.namespace());

    let rows = render::listing_rows(registry);
    out.push_str(&format!("\n## Available skills ({})\n\n", rows.len()));
    if rows.is_empty() {
        out.push_str(&missing_skills_hint(settings));
    } else {
        out.push_str(&render::rows_text(&rows));
    }

    let name = settings.bootstrap_skill.as_str();
    if !name.is_empty() && registry.get(name).is_some() {
        match Resolver::new(registry).resolve(name) {
            Ok(Resolution::Found { content, .. }) => {
                out.push_str(&format!("\n## {}\n\n", name));
                out.push_str(&content);
                if !content.ends_with('\n') {
                    out.push('\n');
                }
            }
            Ok(other) => debug!("Bootstrap skill '{}' did not resolve: {:?}", name, other),
            Err(e) => warn!("Skipping bootstrap skill: {}", e),
        }
    }

    CommandOutput::success(out)
}

/// List everything, or rank skills matching `query`. Never fails on no match.
pub fn find_skills(registry: &SkillRegistry, query: &str, json: bool) -> CommandOutput {
    let query = query.trim();
    let rows: Vec<SkillRow> = if query.is_empty() {
        render::listing_rows(registry)
    } else {
        Resolver::new(registry)
            .search(query)
            .iter()
            .map(|hit| SkillRow::from_hit(registry, hit))
            .collect()
    };

    if json {
        return match render::rows_json(&rows) {
            Ok(mut text) => {
                text.push('\n');
                CommandOutput::success(text)
            }
            Err(e) => CommandOutput::failure(Outcome::Broken, format!("Error: {}\n", e)),
        };
    }

    if rows.is_empty() {
        let message = if registry.is_empty() {
            "No skills installed. Check the configured skill directories.\n".to_string()
        } else {
            format!("No skills match '{}'.\n", query)
        };
        return CommandOutput::success(message);
    }

    CommandOutput::success(render::rows_text(&rows))
}

/// Print a skill's content verbatim, or explain why it could not be resolved
pub fn use_skill(registry: &SkillRegistry, name: &str) -> CommandOutput {
    match Resolver::new(registry).resolve(name) {
        Ok(Resolution::Found { content, .. }) => CommandOutput::success(content),
        Ok(Resolution::Ambiguous { query, candidates }) => {
            let mut message = format!("Skill '{}' is ambiguous. Matching skills:\n", query);
            message.push_str(&render::candidates_text(registry, &candidates));
            message.push_str("Use one of the full names above.\n");
            CommandOutput::failure(Outcome::NotFound, message)
        }
        Ok(Resolution::NotFound { query, suggestions }) => {
            let mut message = format!("Skill '{}' not found.\n", query);
            if registry.is_empty() {
                message.push_str("No skills installed. Check the configured skill directories.\n");
            } else if suggestions.is_empty() {
                message.push_str("Run `skillctl find-skills` to list available skills.\n");
            } else {
                message.push_str("Did you mean:\n");
                message.push_str(&render::candidates_text(registry, &suggestions));
            }
            CommandOutput::failure(Outcome::NotFound, message)
        }
        Err(e) => CommandOutput::failure(Outcome::Broken, format!("Error: {}\n", e)),
    }
}

fn missing_skills_hint(settings: &SkillsConfig) -> String {
    format!(
        "No skills found. Check that skills are installed in {} (stock) or {} (personal).\n",
        settings.base_root().display(),
        settings.override_root().display()
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exit_codes_are_distinct() {
        assert_eq!(Outcome::Success.code(), 0);
        assert_eq!(Outcome::NotFound.code(), 1);
        assert_eq!(Outcome::Broken.code(), 3);
    }

    struct ClosedStream;

    impl Write for ClosedStream {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_emit_writes_both_streams() {
        let output = CommandOutput::failure(Outcome::NotFound, "Skill 'x' not found.\n".into());
        let (mut out, mut err) = (Vec::new(), Vec::new());

        assert_eq!(output.emit(&mut out, &mut err), EXIT_NOT_FOUND);
        assert!(out.is_empty());
        assert_eq!(err, b"Skill 'x' not found.\n");
    }

    #[test]
    fn test_failed_diagnostic_write_is_broken() {
        let output = CommandOutput::failure(Outcome::NotFound, "Skill 'x' not found.\n".into());
        let mut out = Vec::new();

        assert_eq!(output.emit(&mut out, &mut ClosedStream), EXIT_BROKEN);
    }

    #[test]
    fn test_failed_content_write_is_broken() {
        let output = CommandOutput::success("# TDD\n".into());
        let mut err = Vec::new();

        assert_eq!(output.emit(&mut ClosedStream, &mut err), EXIT_BROKEN);
    }

    #[test]
    fn test_bootstrap_with_empty_registry_succeeds() {
        let registry = SkillRegistry::empty("core");
        let settings = SkillsConfig::with_roots("/nonexistent/base", "/nonexistent/personal");

        let output = bootstrap(&registry, &settings);
        assert_eq!(output.outcome, Outcome::Success);
        assert!(output.stdout.contains("Available skills (0)"));
        assert!(output.stdout.contains("/nonexistent/base"));
        assert!(output.stdout.contains("`core:<name>`"));
    }

    #[test]
    fn test_use_skill_on_empty_registry() {
        let registry = SkillRegistry::empty("core");
        let output = use_skill(&registry, "anything");

        assert_eq!(output.outcome, Outcome::NotFound);
        assert!(output.stdout.is_empty());
        assert!(output.stderr.contains("Skill 'anything' not found."));
        assert!(output.stderr.contains("No skills installed"));
    }

    #[test]
    fn test_find_skills_on_empty_registry() {
        let registry = SkillRegistry::empty("core");
        let output = find_skills(&registry, "", false);
        assert_eq!(output.outcome, Outcome::Success);
        assert!(output.stdout.starts_with("No skills installed"));

        let json = find_skills(&registry, "", true);
        assert_eq!(json.stdout, "[]\n");
    }
}
