//! Fuzzy ranking of skill names
//!
//! Pure functions only; the resolver feeds in registry names and maps the
//! ranked names back to entries.

use std::collections::BTreeSet;

/// Maximum number of ranked names returned
pub const MAX_SUGGESTIONS: usize = 5;

/// Candidates scoring below this are not worth suggesting
pub const MIN_SCORE: f64 = 0.3;

/// A candidate name with its similarity to the query
#[derive(Debug, Clone, PartialEq)]
pub struct Ranked {
    pub name: String,
    /// Similarity in `0.0..=1.0`
    pub score: f64,
}

/// Rank `candidates` by similarity to `query`.
///
/// Returns at most [`MAX_SUGGESTIONS`] names scoring at least [`MIN_SCORE`],
/// best first, ties broken by name so the order is stable.
pub fn rank<S: AsRef<str>>(query: &str, candidates: &[S]) -> Vec<Ranked> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    let mut ranked: Vec<Ranked> = candidates
        .iter()
        .map(AsRef::as_ref)
        .filter_map(|name| {
            let score = score(&query, name);
            (score >= MIN_SCORE).then(|| Ranked {
                name: name.to_string(),
                score,
            })
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score).then_with(|| a.name.cmp(&b.name)));
    ranked.dedup_by(|a, b| a.name == b.name);
    ranked.truncate(MAX_SUGGESTIONS);
    ranked
}

/// Similarity of `query` to a skill name, case-insensitive.
///
/// A namespaced name also scores on its bare part, so `brainstrom` is as close
/// to `core:brainstorming` as to `brainstorming`.
pub fn score(query: &str, name: &str) -> f64 {
    let query = query.to_lowercase();
    let name = name.to_lowercase();

    let full = similarity(&query, &name);
    match name.rsplit_once(':') {
        Some((_, bare)) => full.max(similarity(&query, bare)),
        None => full,
    }
}

fn similarity(query: &str, name: &str) -> f64 {
    if query.is_empty() || name.is_empty() {
        return 0.0;
    }

    strsim::normalized_damerau_levenshtein(query, name)
        .max(token_overlap(query, name))
        .max(containment(query, name))
}

fn tokens(text: &str) -> BTreeSet<&str> {
    text.split(|c: char| matches!(c, '-' | '_' | ':' | '.' | '/') || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .collect()
}

/// Jaccard index of the word sets
fn token_overlap(query: &str, name: &str) -> f64 {
    let query_tokens = tokens(query);
    let name_tokens = tokens(name);

    let union = query_tokens.union(&name_tokens).count();
    if union == 0 {
        return 0.0;
    }

    let shared = query_tokens.intersection(&name_tokens).count();
    shared as f64 / union as f64
}

/// Credit for one string containing the other, scaled by how much it covers
fn containment(query: &str, name: &str) -> f64 {
    let (short, long) = if query.len() <= name.len() {
        (query, name)
    } else {
        (name, query)
    };

    if !long.contains(short) {
        return 0.0;
    }

    let coverage = short.chars().count() as f64 / long.chars().count() as f64;
    0.5 + 0.5 * coverage
}
