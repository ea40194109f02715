use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use crate::text::normalize;

/// A canonical roster member (legislator).
///
/// `id` is stable and unique across the roster; `full_name` is the canonical
/// Arabic display string. The core never mutates roster entries.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CanonicalEntity {
    /// Stable unique identifier
    pub id: String,
    /// Canonical display name, Arabic
    pub full_name: String,
}

impl CanonicalEntity {
    pub fn new(id: impl Into<String>, full_name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            full_name: full_name.into(),
        }
    }
}

/// The canonical list of known entities a noisy name is matched against.
///
/// Loaded once per run and treated as a read-only snapshot during a
/// segmentation pass.
#[derive(Debug, Clone, Default)]
pub struct Roster {
    entities: Vec<CanonicalEntity>,
}

impl Roster {
    pub fn new(entities: Vec<CanonicalEntity>) -> Self {
        Self { entities }
    }

    pub fn len(&self) -> usize {
        self.entities.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &CanonicalEntity> {
        self.entities.iter()
    }

    pub fn get(&self, id: &str) -> Option<&CanonicalEntity> {
        self.entities.iter().find(|e| e.id == id)
    }

    /// Normalized names shared by more than one entity.
    ///
    /// Matching against such a roster is first-found-wins, so duplicates are
    /// worth surfacing to the caller at load time.
    pub fn duplicate_names(&self) -> Vec<String> {
        let mut counts: HashMap<String, usize> = HashMap::new();
        for entity in &self.entities {
            *counts.entry(normalize(&entity.full_name)).or_default() += 1;
        }
        let mut duplicates: Vec<String> = counts
            .into_iter()
            .filter(|(name, count)| *count > 1 && !name.is_empty())
            .map(|(name, _)| name)
            .collect();
        duplicates.sort();
        duplicates
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_roster_lookup() {
        let roster = Roster::new(vec![
            CanonicalEntity::new("mp_001", "أحمد علي"),
            CanonicalEntity::new("mp_002", "سالم الخصاونة"),
        ]);

        assert_eq!(roster.len(), 2);
        assert_eq!(roster.get("mp_002").unwrap().full_name, "سالم الخصاونة");
        assert!(roster.get("mp_999").is_none());
    }

    #[test]
    fn test_duplicate_names() {
        let roster = Roster::new(vec![
            CanonicalEntity::new("mp_001", "أحمد علي"),
            // Same name after normalization (hamza variant)
            CanonicalEntity::new("mp_002", "احمد علي"),
            CanonicalEntity::new("mp_003", "سالم الخصاونة"),
        ]);

        assert_eq!(roster.duplicate_names(), vec!["احمد علي".to_string()]);
    }
}
