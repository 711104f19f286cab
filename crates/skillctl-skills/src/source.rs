//! Skill sources
//!
//! A source is one tier's root directory. Each immediate subdirectory holding a
//! `SKILL.md` becomes one entry; the document itself is only read far enough to
//! extract a one-line summary.

use anyhow::{anyhow, Result};
use regex::Regex;
use serde::Deserialize;
use skillctl_types::{SkillEntry, SkillError, Tier};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// File name of the skill document inside a skill directory
pub const SKILL_FILE: &str = "SKILL.md";

/// Maximum summary length in characters
const MAX_SUMMARY_LENGTH: usize = 200;

const ELLIPSIS: &str = "...";

/// Lists the skills of one tier
pub trait SkillSource {
    /// Tier every listed entry belongs to
    fn tier(&self) -> Tier;

    /// Root the source reads from
    fn root(&self) -> &Path;

    /// Enumerate entries, sorted by name.
    ///
    /// Fails with [`SkillError::SourceUnreadable`] when the root itself is
    /// missing or unreadable; individual broken skill directories are skipped.
    fn list(&self) -> Result<Vec<SkillEntry>, SkillError>;
}

/// Skill source backed by a directory on disk
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    tier: Tier,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, tier: Tier) -> Self {
        Self {
            root: root.into(),
            tier,
        }
    }

    /// Stock skill collection
    pub fn base(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Tier::Base)
    }

    /// Operator-supplied skills
    pub fn overrides(root: impl Into<PathBuf>) -> Self {
        Self::new(root, Tier::Override)
    }

    /// Build an entry for one skill directory, or `None` if it holds no skill
    fn entry_for(&self, dir: &Path) -> Option<SkillEntry> {
        let name = dir.file_name()?.to_str()?;
        if name.starts_with('.') {
            return None;
        }
        if name.contains(':') {
            warn!("Skipping {:?}: ':' is reserved for namespaced names", dir);
            return None;
        }

        let skill_file = dir.join(SKILL_FILE);
        if !skill_file.is_file() {
            debug!("Skipping {:?}: no {}", dir, SKILL_FILE);
            return None;
        }

        let content = match fs::read_to_string(&skill_file) {
            Ok(content) => content,
            Err(e) => {
                warn!("Skipping {:?}: {}", skill_file, e);
                return None;
            }
        };

        let summary = extract_summary(name, &content, &skill_file);
        debug!("Discovered {} skill: {} at {:?}", self.tier, name, skill_file);

        Some(SkillEntry::new(name, self.tier, skill_file, summary))
    }
}

impl SkillSource for DirectorySource {
    fn tier(&self) -> Tier {
        self.tier
    }

    fn root(&self) -> &Path {
        &self.root
    }

    fn list(&self) -> Result<Vec<SkillEntry>, SkillError> {
        if !self.root.exists() {
            return Err(SkillError::source_unreadable(
                &self.root,
                "directory does not exist",
            ));
        }

        if !self.root.is_dir() {
            return Err(SkillError::source_unreadable(&self.root, "not a directory"));
        }

        let dir_entries = fs::read_dir(&self.root)
            .map_err(|e| SkillError::source_unreadable(&self.root, e))?;

        let mut entries = Vec::new();
        for dir_entry in dir_entries {
            let path = match dir_entry {
                Ok(dir_entry) => dir_entry.path(),
                Err(e) => {
                    debug!("Skipping unreadable entry in {:?}: {}", self.root, e);
                    continue;
                }
            };

            if !path.is_dir() {
                continue;
            }

            if let Some(entry) = self.entry_for(&path) {
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name));
        info!(
            "Discovered {} {} skills in {:?}",
            entries.len(),
            self.tier,
            self.root
        );

        Ok(entries)
    }
}

/// Metadata block at the top of a skill document
#[derive(Debug, Default, Deserialize)]
struct Frontmatter {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

/// Split a document into its raw YAML frontmatter (if any) and the body
fn split_frontmatter(content: &str) -> Result<(Option<&str>, &str)> {
    let frontmatter_re = Regex::new(r"\A---[ \t]*\r?\n([\s\S]*?)\r?\n---[ \t]*(?:\r?\n|\z)")
        .map_err(|e| anyhow!("Failed to compile regex: {}", e))?;

    match frontmatter_re.captures(content) {
        Some(captures) => {
            let yaml = captures.get(1).map(|m| m.as_str());
            let end = captures.get(0).map_or(0, |m| m.end());
            Ok((yaml, &content[end..]))
        }
        None => Ok((None, content)),
    }
}

/// Extract the one-line summary of a skill document.
///
/// Prefers the frontmatter `description`; otherwise the first non-empty body
/// line that is not a heading.
fn extract_summary(dir_name: &str, content: &str, path: &Path) -> String {
    let (yaml, body) = match split_frontmatter(content) {
        Ok(parts) => parts,
        Err(e) => {
            debug!("Ignoring frontmatter of {:?}: {}", path, e);
            (None, content)
        }
    };

    let frontmatter = yaml
        .map(|yaml| {
            serde_yaml::from_str::<Frontmatter>(yaml).unwrap_or_else(|e| {
                debug!("Invalid YAML frontmatter in {:?}: {}", path, e);
                Frontmatter::default()
            })
        })
        .unwrap_or_default();

    if let Some(declared) = frontmatter.name.as_deref() {
        if declared != dir_name {
            warn!(
                "Skill {:?} declares name '{}', using directory name '{}'",
                path, declared, dir_name
            );
        }
    }

    let description = frontmatter
        .description
        .filter(|d| !d.trim().is_empty())
        .or_else(|| first_description_line(body).map(str::to_string))
        .unwrap_or_default();

    truncate_summary(&description)
}

fn first_description_line(body: &str) -> Option<&str> {
    body.lines()
        .map(str::trim)
        .find(|line| !line.is_empty() && !line.starts_with('#'))
}

/// Collapse whitespace onto one line and bound the length
fn truncate_summary(text: &str) -> String {
    let line = text.split_whitespace().collect::<Vec<_>>().join(" ");
    if line.chars().count() <= MAX_SUMMARY_LENGTH {
        return line;
    }

    let keep = MAX_SUMMARY_LENGTH - ELLIPSIS.len();
    let mut truncated: String = line.chars().take(keep).collect();
    truncated.push_str(ELLIPSIS);
    truncated
}
