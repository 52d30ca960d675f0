//! Fuzzy identity resolution over entity names.
//!
//! Names are normalized (case, Czech diacritics, punctuation, whitespace)
//! before comparison; similarity is the longest-common-subsequence ratio of
//! the normalized forms.

use tracing::debug;

use chronicler_domain::{DomainError, Entity};

pub const DEFAULT_MATCH_THRESHOLD: f64 = 0.7;

/// Matcher with an inclusive similarity threshold.
#[derive(Debug, Clone, Copy)]
pub struct EntityMatcher {
    threshold: f64,
}

impl Default for EntityMatcher {
    fn default() -> Self {
        Self::new(DEFAULT_MATCH_THRESHOLD)
    }
}

impl EntityMatcher {
    pub fn new(threshold: f64) -> Self {
        Self { threshold }
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }

    /// Similarity of two names in `[0.0, 1.0]`.
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        lcs_ratio(&normalize(a), &normalize(b))
    }

    /// The candidate most similar to `name`, if any reaches the threshold.
    /// Ties keep the earliest candidate.
    pub fn find_best_match<'a>(
        &self,
        name: &str,
        candidates: &'a [Entity],
    ) -> Option<(&'a Entity, f64)> {
        let mut best: Option<(&Entity, f64)> = None;
        for candidate in candidates {
            let score = self.similarity(name, &candidate.name);
            if score >= self.threshold && best.map_or(true, |(_, top)| score > top) {
                best = Some((candidate, score));
            }
        }
        if let Some((entity, score)) = best {
            debug!(%name, matched = %entity.name, score, "best fuzzy match");
        }
        best
    }

    /// Every candidate reaching the threshold, most similar first, capped at
    /// `limit`. The sort is stable, so equally scored candidates keep their
    /// input order.
    pub fn find_ranked_matches<'a>(
        &self,
        name: &str,
        candidates: &'a [Entity],
        limit: usize,
    ) -> Vec<(&'a Entity, f64)> {
        let mut ranked: Vec<(&Entity, f64)> = candidates
            .iter()
            .map(|candidate| (candidate, self.similarity(name, &candidate.name)))
            .filter(|(_, score)| *score >= self.threshold)
            .collect();
        ranked.sort_by(|a, b| b.1.total_cmp(&a.1));
        ranked.truncate(limit);
        ranked
    }

    /// Group entities whose names match. Greedy single pass: each entity
    /// joins the first existing group containing any member it matches,
    /// otherwise it opens a new group. Membership is not transitive across
    /// groups.
    pub fn cluster(&self, entities: Vec<Entity>) -> Vec<Vec<Entity>> {
        let mut groups: Vec<Vec<Entity>> = Vec::new();
        for entity in entities {
            let home = groups.iter().position(|group| {
                group
                    .iter()
                    .any(|member| self.similarity(&entity.name, &member.name) >= self.threshold)
            });
            match home {
                Some(index) => groups[index].push(entity),
                None => groups.push(vec![entity]),
            }
        }
        groups
    }

    /// Merge a group into one record. The first entity is the base; later
    /// ones only contribute fields the accumulated record is missing, plus
    /// their tags.
    pub fn merge(&self, group: Vec<Entity>) -> Result<Entity, DomainError> {
        let mut iter = group.into_iter();
        let mut merged = iter
            .next()
            .ok_or_else(|| DomainError::validation("cannot merge an empty group"))?;
        for entity in iter {
            merged.merge_from(&entity);
        }
        Ok(merged)
    }
}

/// Canonical comparison form of a name: lowercased, Czech diacritics folded
/// to ASCII, punctuation dropped, whitespace collapsed to single spaces.
pub fn normalize(name: &str) -> String {
    let folded: String = name
        .to_lowercase()
        .chars()
        .map(fold_diacritic)
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();
    folded.split_whitespace().collect::<Vec<_>>().join(" ")
}

fn fold_diacritic(c: char) -> char {
    match c {
        'á' => 'a',
        'č' => 'c',
        'ď' => 'd',
        'é' | 'ě' => 'e',
        'í' => 'i',
        'ň' => 'n',
        'ó' => 'o',
        'ř' => 'r',
        'š' => 's',
        'ť' => 't',
        'ú' | 'ů' => 'u',
        'ý' => 'y',
        'ž' => 'z',
        other => other,
    }
}

/// `2 * lcs(a, b) / (|a| + |b|)` over characters. Two empty strings are
/// identical, so they score 1.0.
fn lcs_ratio(a: &str, b: &str) -> f64 {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() && b.is_empty() {
        return 1.0;
    }
    let mut prev = vec![0usize; b.len() + 1];
    let mut row = vec![0usize; b.len() + 1];
    for ca in &a {
        for (j, cb) in b.iter().enumerate() {
            row[j + 1] = if ca == cb {
                prev[j] + 1
            } else {
                prev[j + 1].max(row[j])
            };
        }
        std::mem::swap(&mut prev, &mut row);
    }
    2.0 * prev[b.len()] as f64 / (a.len() + b.len()) as f64
}
