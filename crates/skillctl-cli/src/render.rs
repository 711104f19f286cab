//! Text and JSON rendering of skill listings

use serde::Serialize;
use skillctl_skills::{ListedSkill, MatchKind, SearchHit, SkillEntry, SkillRegistry, Tier};
use std::fmt::Write;
use std::path::PathBuf;

/// One listed skill, shared by `bootstrap` and `find-skills`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SkillRow {
    /// Name to pass to `use-skill`
    pub name: String,
    pub tier: Tier,
    pub summary: String,
    pub location: PathBuf,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shadowed_by: Option<String>,
    #[serde(rename = "match", skip_serializing_if = "Option::is_none")]
    pub match_kind: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub score: Option<f64>,
}

impl SkillRow {
    fn new(registry: &SkillRegistry, entry: &SkillEntry) -> Self {
        Self {
            name: registry.canonical_name(entry),
            tier: entry.tier,
            summary: entry.summary.clone(),
            location: entry.location.clone(),
            shadowed_by: registry
                .shadowed_by(entry)
                .map(|by| registry.canonical_name(by)),
            match_kind: None,
            score: None,
        }
    }

    pub fn from_listed(registry: &SkillRegistry, listed: &ListedSkill<'_>) -> Self {
        Self::new(registry, listed.entry)
    }

    pub fn from_hit(registry: &SkillRegistry, hit: &SearchHit<'_>) -> Self {
        let score = match hit.kind {
            MatchKind::Fuzzy(score) => Some(score),
            _ => None,
        };

        Self {
            match_kind: Some(hit.kind.label()),
            score,
            ..Self::new(registry, hit.entry)
        }
    }
}

/// Full registry listing, one row per skill document
pub fn listing_rows(registry: &SkillRegistry) -> Vec<SkillRow> {
    registry
        .listing()
        .iter()
        .map(|listed| SkillRow::from_listed(registry, listed))
        .collect()
}

/// Format rows as a bullet list:
/// `- core:tdd [base]: Test first (overridden by personal skill tdd)`
pub fn rows_text(rows: &[SkillRow]) -> String {
    let mut text = String::new();

    for row in rows {
        let _ = write!(text, "- {} [{}]", row.name, row.tier);
        if !row.summary.is_empty() {
            let _ = write!(text, ": {}", row.summary);
        }
        if let Some(by) = &row.shadowed_by {
            let _ = write!(text, " (overridden by personal skill {})", by);
        }
        text.push('\n');
    }

    text
}

pub fn rows_json(rows: &[SkillRow]) -> serde_json::Result<String> {
    serde_json::to_string_pretty(rows)
}

/// Candidate list used in not-found and ambiguity diagnostics
pub fn candidates_text(registry: &SkillRegistry, entries: &[SkillEntry]) -> String {
    let rows: Vec<SkillRow> = entries
        .iter()
        .map(|entry| SkillRow::new(registry, entry))
        .collect();
    rows_text(&rows)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn entry(name: &str, tier: Tier, summary: &str) -> SkillEntry {
        SkillEntry::new(name, tier, format!("/skills/{name}/SKILL.md"), summary)
    }

    #[test]
    fn test_rows_text_marks_shadowed_skills() {
        let registry = SkillRegistry::from_entries(
            "core",
            vec![entry("tdd", Tier::Base, "Test first"), entry("notes", Tier::Base, "")],
            vec![entry("tdd", Tier::Override, "My way")],
        );

        let text = rows_text(&listing_rows(&registry));
        assert_eq!(
            text,
            "- core:notes [base]\n\
             - tdd [override]: My way\n\
             - core:tdd [base]: Test first (overridden by personal skill tdd)\n"
        );
    }

    #[test]
    fn test_rows_json_omits_empty_fields() {
        let registry =
            SkillRegistry::from_entries("core", vec![entry("tdd", Tier::Base, "Test first")], vec![]);

        let json = rows_json(&listing_rows(&registry)).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();

        assert_eq!(value[0]["name"], "core:tdd");
        assert_eq!(value[0]["tier"], "base");
        assert!(value[0].get("shadowed_by").is_none());
        assert!(value[0].get("match").is_none());
    }

    #[test]
    fn test_row_from_fuzzy_hit_carries_score() {
        let registry =
            SkillRegistry::from_entries("core", vec![entry("tdd", Tier::Base, "")], vec![]);
        let tdd = entry("tdd", Tier::Base, "");
        let hit = SearchHit {
            entry: &tdd,
            kind: MatchKind::Fuzzy(0.5),
        };

        let row = SkillRow::from_hit(&registry, &hit);
        assert_eq!(row.match_kind, Some("fuzzy"));
        assert_eq!(row.score, Some(0.5));
    }
}
