//! Error taxonomy for skill discovery and resolution

use std::path::PathBuf;
use thiserror::Error;

/// Skill discovery and resolution errors
#[derive(Debug, Error)]
pub enum SkillError {
    /// A source root is missing or unreadable.
    /// Discovery degrades to an empty tier instead of aborting.
    #[error("Skill source {root:?} is unreadable: {reason}")]
    SourceUnreadable {
        /// Root directory of the source
        root: PathBuf,
        /// Failure reason
        reason: String,
    },

    /// The entry existed at discovery but its document could not be read
    #[error("Skill '{name}' content at {path:?} is unreadable: {source}")]
    ContentUnreadable {
        /// Skill name
        name: String,
        /// Document path
        path: PathBuf,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Nothing matched with sufficient confidence
    #[error("Skill '{query}' not found{}", format_candidates("Did you mean", .suggestions))]
    NotFound {
        /// The lookup string
        query: String,
        /// Canonical names of the closest skills, best first
        suggestions: Vec<String>,
    },

    /// A prefix or case-insensitive lookup matched several skills
    #[error("Skill '{query}' is ambiguous{}", format_candidates("Candidates", .candidates))]
    Ambiguous {
        /// The lookup string
        query: String,
        /// Canonical names of every matching skill
        candidates: Vec<String>,
    },
}

fn format_candidates(label: &str, names: &[String]) -> String {
    if names.is_empty() {
        String::new()
    } else {
        format!(". {}: {}", label, names.join(", "))
    }
}

impl SkillError {
    pub fn source_unreadable(root: impl Into<PathBuf>, reason: impl ToString) -> Self {
        Self::SourceUnreadable {
            root: root.into(),
            reason: reason.to_string(),
        }
    }

    /// True for outcomes the user can fix by rephrasing the query
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::NotFound { .. } | Self::Ambiguous { .. })
    }
}

/// Convenient Result type alias
pub type Result<T> = std::result::Result<T, SkillError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message_lists_suggestions() {
        let err = SkillError::NotFound {
            query: "brainstrom".into(),
            suggestions: vec!["brainstorming".into(), "core:brainstorming".into()],
        };
        assert_eq!(
            err.to_string(),
            "Skill 'brainstrom' not found. Did you mean: brainstorming, core:brainstorming"
        );
        assert!(err.is_recoverable());
    }

    #[test]
    fn test_not_found_without_suggestions() {
        let err = SkillError::NotFound {
            query: "anything".into(),
            suggestions: Vec::new(),
        };
        assert_eq!(err.to_string(), "Skill 'anything' not found");
    }

    #[test]
    fn test_content_unreadable_is_not_recoverable() {
        let err = SkillError::ContentUnreadable {
            name: "tdd".into(),
            path: PathBuf::from("/skills/tdd/SKILL.md"),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "gone"),
        };
        assert!(!err.is_recoverable());
        assert!(err.to_string().contains("gone"));
    }
}
