//! Skills registry merging the base and override tiers
//!
//! Precedence is decided once, here, when the registry is built:
//! - an override skill owns its bare name
//! - a base skill owns its bare name only when no override claims it
//! - every base skill stays reachable as `<namespace>:<name>`

use std::collections::BTreeMap;
use tracing::{debug, info, warn};

use crate::source::SkillSource;
use skillctl_types::{SkillEntry, Tier};

/// Namespace used for base skills when none is configured
pub const DEFAULT_NAMESPACE: &str = "core";

/// What a registry key resolves to
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Binding {
    /// Bare name owned by an override skill
    Override(SkillEntry),
    /// Bare name owned by a base skill that is not overridden
    Base(SkillEntry),
    /// Namespaced name of a base skill, overridden or not
    Qualified(SkillEntry),
}

impl Binding {
    pub fn entry(&self) -> &SkillEntry {
        match self {
            Binding::Override(entry) | Binding::Base(entry) | Binding::Qualified(entry) => entry,
        }
    }
}

/// A base skill hidden behind an override of the same name
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shadowed {
    pub base: SkillEntry,
    pub by: SkillEntry,
}

/// One row of a registry listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListedSkill<'a> {
    pub entry: &'a SkillEntry,
    /// Name the skill should be requested by
    pub canonical_name: String,
    /// Override hiding this skill's bare name, if any
    pub shadowed_by: Option<&'a SkillEntry>,
}

/// Merged, addressable view of both tiers
#[derive(Debug, Clone)]
pub struct SkillRegistry {
    namespace: String,
    bindings: BTreeMap<String, Binding>,
    shadowed: Vec<Shadowed>,
}

impl SkillRegistry {
    /// Create an empty registry
    pub fn empty(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
            bindings: BTreeMap::new(),
            shadowed: Vec::new(),
        }
    }

    /// Merge already-discovered entries of both tiers
    pub fn from_entries(
        namespace: impl Into<String>,
        base: Vec<SkillEntry>,
        overrides: Vec<SkillEntry>,
    ) -> Self {
        let mut registry = Self::empty(namespace);

        for entry in overrides.into_iter().filter(unqualified) {
            registry
                .bindings
                .insert(entry.name.clone(), Binding::Override(entry));
        }

        for entry in base.into_iter().filter(unqualified) {
            let qualified = entry.qualified_name(&registry.namespace);

            match registry.bindings.get(&entry.name) {
                Some(Binding::Override(by)) => {
                    debug!(
                        "Base skill '{}' shadowed by override at {:?}",
                        qualified, by.location
                    );
                    registry.shadowed.push(Shadowed {
                        base: entry.clone(),
                        by: by.clone(),
                    });
                }
                Some(_) => {
                    warn!("Duplicate base skill '{}', keeping the first", entry.name);
                }
                None => {
                    registry
                        .bindings
                        .insert(entry.name.clone(), Binding::Base(entry.clone()));
                }
            }

            registry
                .bindings
                .insert(qualified, Binding::Qualified(entry));
        }

        registry
    }

    /// Namespace prefix of base skills
    pub fn namespace(&self) -> &str {
        &self.namespace
    }

    /// Look up a registry key exactly
    pub fn get(&self, key: &str) -> Option<&Binding> {
        self.bindings.get(key)
    }

    /// All keys with their bindings, ordered by key
    pub fn bindings(&self) -> impl Iterator<Item = (&String, &Binding)> {
        self.bindings.iter()
    }

    /// All resolvable keys, ordered
    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.bindings.keys()
    }

    /// Number of resolvable keys (a base skill may have two)
    pub fn len(&self) -> usize {
        self.bindings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bindings.is_empty()
    }

    /// Base skills hidden behind overrides
    pub fn shadowed(&self) -> &[Shadowed] {
        &self.shadowed
    }

    /// The override hiding `entry`'s bare name, if any
    pub fn shadowed_by(&self, entry: &SkillEntry) -> Option<&SkillEntry> {
        self.shadowed
            .iter()
            .find(|s| &s.base == entry)
            .map(|s| &s.by)
    }

    /// Preferred lookup string for an entry
    pub fn canonical_name(&self, entry: &SkillEntry) -> String {
        entry.canonical_name(&self.namespace)
    }

    /// Distinct skill documents, ordered by name then tier
    pub fn entries(&self) -> Vec<&SkillEntry> {
        let mut entries: Vec<&SkillEntry> = Vec::new();
        for binding in self.bindings.values() {
            let entry = binding.entry();
            if !entries.contains(&entry) {
                entries.push(entry);
            }
        }

        entries.sort_by(|a, b| a.name.cmp(&b.name).then(a.tier.cmp(&b.tier)));
        entries
    }

    /// One row per distinct skill document, ordered by name then tier
    pub fn listing(&self) -> Vec<ListedSkill<'_>> {
        self.entries()
            .into_iter()
            .map(|entry| ListedSkill {
                entry,
                canonical_name: self.canonical_name(entry),
                shadowed_by: self.shadowed_by(entry),
            })
            .collect()
    }

    /// Count of distinct skill documents per tier
    pub fn count(&self, tier: Tier) -> usize {
        self.entries().iter().filter(|e| e.tier == tier).count()
    }
}

/// Builds a [`SkillRegistry`] from a base and an override source
#[derive(Debug, Clone)]
pub struct RegistryBuilder {
    namespace: String,
}

impl RegistryBuilder {
    pub fn new(namespace: impl Into<String>) -> Self {
        Self {
            namespace: namespace.into(),
        }
    }

    /// Discover both tiers and merge them.
    ///
    /// An unreadable source contributes no entries; this never fails.
    pub fn build(&self, base: &dyn SkillSource, overrides: &dyn SkillSource) -> SkillRegistry {
        let base_entries = collect(base);
        let override_entries = collect(overrides);

        let registry =
            SkillRegistry::from_entries(self.namespace.clone(), base_entries, override_entries);

        info!(
            "Skill registry ready: {} base, {} override, {} shadowed",
            registry.count(Tier::Base),
            registry.count(Tier::Override),
            registry.shadowed().len()
        );

        registry
    }
}

impl Default for RegistryBuilder {
    fn default() -> Self {
        Self::new(DEFAULT_NAMESPACE)
    }
}

fn collect(source: &dyn SkillSource) -> Vec<SkillEntry> {
    match source.list() {
        Ok(entries) => entries,
        Err(e) => {
            match source.tier() {
                Tier::Base => warn!("Base skills unavailable: {}", e),
                // Operators are not required to have personal skills
                Tier::Override => debug!("Override skills unavailable: {}", e),
            }
            Vec::new()
        }
    }
}

/// ':' separates the namespace from the name, so a bare name cannot carry one
fn unqualified(entry: &SkillEntry) -> bool {
    if entry.name.contains(':') {
        warn!(
            "Ignoring {} skill '{}' at {:?}: ':' is reserved for namespaced names",
            entry.tier, entry.name, entry.location
        );
        return false;
    }
    true
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn base(name: &str) -> SkillEntry {
        SkillEntry::new(name, Tier::Base, format!("/base/{name}/SKILL.md"), "")
    }

    fn personal(name: &str) -> SkillEntry {
        SkillEntry::new(name, Tier::Override, format!("/home/{name}/SKILL.md"), "")
    }

    #[test]
    fn test_registry_empty() {
        let registry = SkillRegistry::from_entries("core", Vec::new(), Vec::new());
        assert!(registry.is_empty());
        assert_eq!(registry.len(), 0);
        assert!(registry.listing().is_empty());
    }

    #[test]
    fn test_base_skill_reachable_by_both_names() {
        let registry = SkillRegistry::from_entries("core", vec![base("tdd")], Vec::new());

        assert_eq!(registry.get("tdd"), Some(&Binding::Base(base("tdd"))));
        assert_eq!(
            registry.get("core:tdd"),
            Some(&Binding::Qualified(base("tdd")))
        );
        assert_eq!(registry.get("tdd").unwrap().entry(), &base("tdd"));
    }

    #[test]
    fn test_override_owns_bare_name() {
        let registry = SkillRegistry::from_entries(
            "core",
            vec![base("brainstorming")],
            vec![personal("brainstorming")],
        );

        assert_eq!(
            registry.get("brainstorming"),
            Some(&Binding::Override(personal("brainstorming")))
        );
        assert_eq!(
            registry.get("core:brainstorming").unwrap().entry(),
            &base("brainstorming")
        );
        assert_eq!(
            registry.shadowed(),
            &[Shadowed {
                base: base("brainstorming"),
                by: personal("brainstorming"),
            }]
        );
        assert_eq!(
            registry.shadowed_by(&base("brainstorming")),
            Some(&personal("brainstorming"))
        );
    }

    #[test]
    fn test_override_only_skill_has_no_qualified_name() {
        let registry = SkillRegistry::from_entries("core", Vec::new(), vec![personal("notes")]);
        assert!(registry.get("notes").is_some());
        assert!(registry.get("core:notes").is_none());
    }

    #[test]
    fn test_listing_has_one_row_per_document() {
        let registry = SkillRegistry::from_entries(
            "core",
            vec![base("tdd"), base("brainstorming")],
            vec![personal("brainstorming"), personal("alpha")],
        );

        let rows: Vec<_> = registry
            .listing()
            .into_iter()
            .map(|row| (row.canonical_name, row.shadowed_by.is_some()))
            .collect();

        assert_eq!(
            rows,
            vec![
                ("alpha".to_string(), false),
                ("brainstorming".to_string(), false),
                ("core:brainstorming".to_string(), true),
                ("core:tdd".to_string(), false),
            ]
        );
        assert_eq!(registry.count(Tier::Base), 2);
        assert_eq!(registry.count(Tier::Override), 2);
    }

    #[test]
    fn test_namespace_is_configurable() {
        let registry = SkillRegistry::from_entries("superpowers", vec![base("tdd")], Vec::new());
        assert_eq!(registry.namespace(), "superpowers");
        assert!(registry.get("superpowers:tdd").is_some());
        assert_eq!(registry.canonical_name(&base("tdd")), "superpowers:tdd");
    }

    #[test]
    fn test_colon_names_cannot_take_namespaced_keys() {
        let registry = SkillRegistry::from_entries(
            "core",
            vec![base("tdd"), base("core:notes")],
            vec![personal("core:tdd")],
        );

        assert_eq!(
            registry.get("core:tdd"),
            Some(&Binding::Qualified(base("tdd")))
        );
        assert_eq!(registry.get("tdd"), Some(&Binding::Base(base("tdd"))));
        assert!(registry.get("core:notes").is_none());
        assert_eq!(registry.count(Tier::Override), 0);
        assert_eq!(registry.listing().len(), 1);
    }
}
