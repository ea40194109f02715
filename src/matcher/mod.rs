//! Matching noisy name strings against the canonical roster.
//!
//! Matching is exact-after-normalization first, then token-subset
//! containment, then fuzzy similarity above a threshold. Token-subset
//! containment outranks fuzzy scores because a name whose words are fully
//! contained in a roster name is a stronger signal than edit distance in
//! this domain (titles omitted, middle names dropped).

pub mod scorer;

pub use scorer::{NormalizedLevenshtein, SimilarityScorer};

use std::collections::{BTreeSet, HashSet};

use tracing::debug;

use crate::models::Roster;
use crate::text::normalize;

/// Confidence tier of a roster match.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MatchTier {
    /// Normalized candidate equals the normalized canonical name
    Exact,
    /// One name's token set contains the other's
    TokenSubset,
    /// Best similarity ratio above the configured threshold
    Fuzzy(f64),
}

/// Outcome of matching one candidate name against the roster.
#[derive(Debug, Clone, PartialEq)]
pub enum MatchResult {
    Matched {
        id: String,
        full_name: String,
        tier: MatchTier,
    },
    Unmatched,
}

impl MatchResult {
    pub fn is_matched(&self) -> bool {
        matches!(self, MatchResult::Matched { .. })
    }

    pub fn entity_id(&self) -> Option<&str> {
        match self {
            MatchResult::Matched { id, .. } => Some(id),
            MatchResult::Unmatched => None,
        }
    }
}

/// Configuration for the entity matcher.
#[derive(Debug, Clone)]
pub struct MatcherConfig {
    /// Minimum fuzzy similarity ratio for a match
    pub threshold: f64,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self { threshold: 0.85 }
    }
}

/// Short-form references a speech is likely to use for a full name:
/// the full normalized name, first+last, and first+second+last.
pub fn build_variations(full_name: &str) -> BTreeSet<String> {
    let mut variations = BTreeSet::new();

    let norm_full = normalize(full_name);
    if norm_full.is_empty() {
        return variations;
    }
    variations.insert(norm_full);

    let parts: Vec<&str> = full_name.split_whitespace().collect();
    if parts.len() >= 2 {
        variations.insert(normalize(&format!("{} {}", parts[0], parts[parts.len() - 1])));
    }
    if parts.len() >= 3 {
        variations.insert(normalize(&format!(
            "{} {} {}",
            parts[0],
            parts[1],
            parts[parts.len() - 1]
        )));
    }

    variations
}

/// Match a noisy candidate name against the roster with the default scorer.
pub fn match_name(candidate: &str, roster: &Roster, config: &MatcherConfig) -> MatchResult {
    match_name_with_scorer(candidate, roster, config.threshold, &NormalizedLevenshtein)
}

/// Match with a caller-provided similarity scorer.
///
/// Tie-break order: exact normalized equality returns immediately;
/// otherwise the first token-subset candidate wins over any fuzzy score;
/// otherwise the highest ratio above `threshold`. Ties on equal ratios are
/// first-seen-wins, which also decides between duplicate roster names.
pub fn match_name_with_scorer<S: SimilarityScorer + ?Sized>(
    candidate: &str,
    roster: &Roster,
    threshold: f64,
    scorer: &S,
) -> MatchResult {
    let norm_candidate = normalize(candidate);
    if norm_candidate.is_empty() {
        return MatchResult::Unmatched;
    }
    let candidate_tokens: HashSet<&str> = norm_candidate.split_whitespace().collect();

    let mut subset_match: Option<(String, String)> = None;
    let mut best_fuzzy: Option<(String, String, f64)> = None;

    for entity in roster.iter() {
        let norm_name = normalize(&entity.full_name);
        if norm_name == norm_candidate {
            debug!(candidate, id = %entity.id, "exact match");
            return MatchResult::Matched {
                id: entity.id.clone(),
                full_name: entity.full_name.clone(),
                tier: MatchTier::Exact,
            };
        }

        // A subset candidate already outranks anything fuzzy, so only the
        // exact check matters for the rest of the roster.
        if subset_match.is_some() {
            continue;
        }

        let name_tokens: HashSet<&str> = norm_name.split_whitespace().collect();
        if candidate_tokens.is_subset(&name_tokens) || name_tokens.is_subset(&candidate_tokens) {
            subset_match = Some((entity.id.clone(), entity.full_name.clone()));
            continue;
        }

        let ratio = scorer.ratio(&norm_candidate, &norm_name);
        if best_fuzzy.as_ref().is_none_or(|(_, _, best)| ratio > *best) {
            best_fuzzy = Some((entity.id.clone(), entity.full_name.clone(), ratio));
        }
    }

    if let Some((id, full_name)) = subset_match {
        debug!(candidate, id = %id, "token-subset match");
        return MatchResult::Matched {
            id,
            full_name,
            tier: MatchTier::TokenSubset,
        };
    }

    if let Some((id, full_name, ratio)) = best_fuzzy {
        if ratio > threshold {
            debug!(candidate, id = %id, ratio, "fuzzy match");
            return MatchResult::Matched {
                id,
                full_name,
                tier: MatchTier::Fuzzy(ratio),
            };
        }
    }

    debug!(candidate, "no match");
    MatchResult::Unmatched
}
