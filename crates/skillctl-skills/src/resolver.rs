//! Skill lookup against a merged registry
//!
//! Stages run in order and the first one that matches decides:
//! exact key, case-insensitive key, key prefix, then fuzzy suggestions.
//! A stage matching several distinct skills reports ambiguity instead of
//! picking one.

use std::collections::HashMap;
use std::fs;
use tracing::{debug, info};

use crate::fuzzy;
use crate::registry::SkillRegistry;
use skillctl_types::{SkillEntry, SkillError};

/// Outcome of resolving a query
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// A single skill matched; `content` is its full document
    Found { content: String, entry: SkillEntry },
    /// Several skills matched equally well, ordered by canonical name
    Ambiguous {
        query: String,
        candidates: Vec<SkillEntry>,
    },
    /// Nothing matched; closest skills first
    NotFound {
        query: String,
        suggestions: Vec<SkillEntry>,
    },
}

/// How a search hit matched the query
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchKind {
    Exact,
    CaseInsensitive,
    Prefix,
    /// Query appears in the summary
    Summary,
    /// Fuzzy name similarity in `0.0..=1.0`
    Fuzzy(f64),
}

impl MatchKind {
    pub fn label(&self) -> &'static str {
        match self {
            MatchKind::Exact => "exact",
            MatchKind::CaseInsensitive => "case-insensitive",
            MatchKind::Prefix => "prefix",
            MatchKind::Summary => "summary",
            MatchKind::Fuzzy(_) => "fuzzy",
        }
    }
}

/// One ranked result of [`Resolver::search`]
#[derive(Debug, Clone, PartialEq)]
pub struct SearchHit<'a> {
    pub entry: &'a SkillEntry,
    pub kind: MatchKind,
}

/// Name matching without touching the filesystem
enum Lookup<'a> {
    Match(&'a SkillEntry),
    Ambiguous(Vec<&'a SkillEntry>),
    Miss,
}

/// Resolves queries against a registry
pub struct Resolver<'a> {
    registry: &'a SkillRegistry,
}

impl<'a> Resolver<'a> {
    pub fn new(registry: &'a SkillRegistry) -> Self {
        Self { registry }
    }

    /// Resolve `query` to a single skill and load its content.
    ///
    /// Not-found and ambiguous outcomes are values, not errors. The only error
    /// is [`SkillError::ContentUnreadable`], when the matched document can no
    /// longer be read.
    pub fn resolve(&self, query: &str) -> Result<Resolution, SkillError> {
        let query = query.trim();

        match self.lookup(query) {
            Lookup::Match(entry) => {
                let content = fs::read_to_string(&entry.location).map_err(|source| {
                    SkillError::ContentUnreadable {
                        name: self.registry.canonical_name(entry),
                        path: entry.location.clone(),
                        source,
                    }
                })?;

                info!(
                    "Resolved '{}' to {} skill {:?}",
                    query, entry.tier, entry.location
                );
                Ok(Resolution::Found {
                    content,
                    entry: entry.clone(),
                })
            }
            Lookup::Ambiguous(candidates) => {
                debug!("'{}' is ambiguous between {} skills", query, candidates.len());
                Ok(Resolution::Ambiguous {
                    query: query.to_string(),
                    candidates: candidates.into_iter().cloned().collect(),
                })
            }
            Lookup::Miss => Ok(Resolution::NotFound {
                query: query.to_string(),
                suggestions: self
                    .suggest(query)
                    .into_iter()
                    .map(|(entry, _)| entry.clone())
                    .collect(),
            }),
        }
    }

    /// Resolve `query`, turning every outcome other than a match into an error
    pub fn load(&self, query: &str) -> Result<(String, SkillEntry), SkillError> {
        match self.resolve(query)? {
            Resolution::Found { content, entry } => Ok((content, entry)),
            Resolution::Ambiguous { query, candidates } => Err(SkillError::Ambiguous {
                query,
                candidates: self.names(&candidates),
            }),
            Resolution::NotFound { query, suggestions } => Err(SkillError::NotFound {
                query,
                suggestions: self.names(&suggestions),
            }),
        }
    }

    /// Every skill matching `query`, best first, one hit per skill.
    ///
    /// Name matches (exact, case-insensitive, prefix) come first, then skills
    /// whose summary mentions the query, then fuzzy name matches.
    pub fn search(&self, query: &str) -> Vec<SearchHit<'a>> {
        let query = query.trim();
        if query.is_empty() {
            return Vec::new();
        }

        let registry: &'a SkillRegistry = self.registry;
        let lower = query.to_lowercase();
        let mut hits: Vec<SearchHit<'a>> = Vec::new();
        let mut push = |entry: &'a SkillEntry, kind: MatchKind| {
            if !hits.iter().any(|hit| hit.entry == entry) {
                hits.push(SearchHit { entry, kind });
            }
        };

        if let Some(binding) = registry.get(query) {
            push(binding.entry(), MatchKind::Exact);
        }
        for entry in self.keys_matching(|key| key == lower) {
            push(entry, MatchKind::CaseInsensitive);
        }
        for entry in self.keys_matching(|key| key.starts_with(&lower)) {
            push(entry, MatchKind::Prefix);
        }
        for entry in registry.entries() {
            if entry.summary.to_lowercase().contains(&lower) {
                push(entry, MatchKind::Summary);
            }
        }
        for (entry, score) in self.suggest(query) {
            push(entry, MatchKind::Fuzzy(score));
        }

        hits
    }

    fn lookup(&self, query: &str) -> Lookup<'a> {
        if query.is_empty() {
            return Lookup::Miss;
        }

        let registry: &'a SkillRegistry = self.registry;
        if let Some(binding) = registry.get(query) {
            return Lookup::Match(binding.entry());
        }

        let lower = query.to_lowercase();
        if let Some(lookup) = self.decide(self.keys_matching(|key| key == lower)) {
            return lookup;
        }
        if let Some(lookup) = self.decide(self.keys_matching(|key| key.starts_with(&lower))) {
            return lookup;
        }

        Lookup::Miss
    }

    /// One match is a hit, several are ambiguous, none defers to the next stage
    fn decide(&self, mut matches: Vec<&'a SkillEntry>) -> Option<Lookup<'a>> {
        match matches.len() {
            0 => None,
            1 => matches.pop().map(Lookup::Match),
            _ => {
                matches.sort_by_key(|entry| self.registry.canonical_name(entry));
                Some(Lookup::Ambiguous(matches))
            }
        }
    }

    /// Distinct entries whose lowercased key satisfies `predicate`, in key order
    fn keys_matching(&self, predicate: impl Fn(&str) -> bool) -> Vec<&'a SkillEntry> {
        let registry: &'a SkillRegistry = self.registry;
        let mut matches: Vec<&'a SkillEntry> = Vec::new();

        for (key, binding) in registry.bindings() {
            let entry = binding.entry();
            if predicate(&key.to_lowercase()) && !matches.contains(&entry) {
                matches.push(entry);
            }
        }

        matches
    }

    /// Fuzzy-ranked entries with their scores
    fn suggest(&self, query: &str) -> Vec<(&'a SkillEntry, f64)> {
        let registry: &'a SkillRegistry = self.registry;
        let by_name: HashMap<String, &'a SkillEntry> = registry
            .entries()
            .into_iter()
            .map(|entry| (registry.canonical_name(entry), entry))
            .collect();

        let names: Vec<&String> = by_name.keys().collect();
        fuzzy::rank(query, &names)
            .into_iter()
            .filter_map(|ranked| by_name.get(&ranked.name).map(|entry| (*entry, ranked.score)))
            .collect()
    }

    fn names(&self, entries: &[SkillEntry]) -> Vec<String> {
        entries
            .iter()
            .map(|entry| self.registry.canonical_name(entry))
            .collect()
    }
}
