//! Skillctl Types - Core types shared across the skillctl workspace
//!
//! Defines the discovered skill entry, its provenance tier and the
//! error taxonomy used by discovery and resolution.

pub mod error;

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

pub use error::SkillError;

/// Provenance level of a skill
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    /// Operator-supplied skills that shadow stock skills of the same name.
    /// Sorts before `Base`.
    Override,
    /// Stock skills shipped with the skill collection
    Base,
}

impl Tier {
    pub fn as_str(&self) -> &'static str {
        match self {
            Tier::Override => "override",
            Tier::Base => "base",
        }
    }
}

impl fmt::Display for Tier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A skill discovered in one tier
///
/// Produced once per invocation by a skill source and never mutated.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SkillEntry {
    /// Directory name of the skill, unique within its tier
    pub name: String,
    pub tier: Tier,
    /// Path of the skill document
    pub location: PathBuf,
    /// First description line of the document
    pub summary: String,
}

impl SkillEntry {
    pub fn new(
        name: impl Into<String>,
        tier: Tier,
        location: impl Into<PathBuf>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            tier,
            location: location.into(),
            summary: summary.into(),
        }
    }

    /// Name under which the entry is addressed when the bare name is not enough
    pub fn qualified_name(&self, namespace: &str) -> String {
        format!("{}:{}", namespace, self.name)
    }

    /// Preferred lookup string: bare for overrides, namespaced for base skills
    pub fn canonical_name(&self, namespace: &str) -> String {
        match self.tier {
            Tier::Override => self.name.clone(),
            Tier::Base => self.qualified_name(namespace),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_canonical_name_by_tier() {
        let base = SkillEntry::new("tdd", Tier::Base, "/skills/tdd/SKILL.md", "");
        let personal = SkillEntry::new("tdd", Tier::Override, "/me/tdd/SKILL.md", "");

        assert_eq!(base.canonical_name("core"), "core:tdd");
        assert_eq!(personal.canonical_name("core"), "tdd");
        assert_eq!(personal.qualified_name("core"), "core:tdd");
    }

    #[test]
    fn test_override_sorts_before_base() {
        assert!(Tier::Override < Tier::Base);
    }

    #[test]
    fn test_tier_serializes_lowercase() {
        let json = serde_json::to_string(&Tier::Override).unwrap();
        assert_eq!(json, "\"override\"");
        assert_eq!(Tier::Base.to_string(), "base");
    }
}
