use std::collections::HashMap;
use strsim::normalized_damerau_levenshtein;
use tracing::{debug, info};

use super::disjoint_set::DisjointSet;
use super::TARGET_IDENTITY;
use crate::config::ResolverConfig;

/// Keys whose lengths differ by more than this are never typo-merged
pub const DEFAULT_LENGTH_TOLERANCE: usize = 2;

/// Similarity a key pair must exceed to be typo-merged
pub const DEFAULT_SIMILARITY_THRESHOLD: f64 = 0.92;

/// A set of comparison keys believed to denote one person
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityCluster {
    /// First-seen member
    pub canonical_key: String,
    /// All members in first-seen order, canonical key first
    pub members: Vec<String>,
}

/// Result of one resolution run: every known key mapped to its cluster's
/// canonical key
#[derive(Debug, Clone, Default)]
pub struct IdentityMap {
    canonical: HashMap<String, String>,
    clusters: Vec<IdentityCluster>,
}

impl IdentityMap {
    /// Canonical key for `key`; `None` for keys that were not resolved
    /// (including empty keys, which are never clustered)
    pub fn canonical(&self, key: &str) -> Option<&str> {
        self.canonical.get(key).map(String::as_str)
    }

    /// Clusters in order of their first-seen member
    pub fn clusters(&self) -> &[IdentityCluster] {
        &self.clusters
    }

    pub fn len(&self) -> usize {
        self.canonical.len()
    }

    pub fn is_empty(&self) -> bool {
        self.canonical.is_empty()
    }
}

/// Clusters comparison keys that name the same person.
///
/// Two passes over the distinct keys of a whole document:
/// 1. keys of similar length whose normalized Damerau-Levenshtein similarity
///    exceeds the threshold are merged (OCR and typing noise);
/// 2. keys that are anagrams of each other are merged (given names and
///    surname in a different order).
///
/// Merges go through a disjoint set, so they are transitive and the
/// first-seen key of a cluster always stays its representative.
#[derive(Debug, Clone)]
pub struct IdentityResolver {
    length_tolerance: usize,
    similarity_threshold: f64,
}

impl Default for IdentityResolver {
    fn default() -> Self {
        Self {
            length_tolerance: DEFAULT_LENGTH_TOLERANCE,
            similarity_threshold: DEFAULT_SIMILARITY_THRESHOLD,
        }
    }
}

impl From<&ResolverConfig> for IdentityResolver {
    fn from(config: &ResolverConfig) -> Self {
        Self::new()
            .with_length_tolerance(config.length_tolerance)
            .with_similarity_threshold(config.similarity_threshold)
    }
}

impl IdentityResolver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_length_tolerance(mut self, tolerance: usize) -> Self {
        self.length_tolerance = tolerance;
        self
    }

    pub fn with_similarity_threshold(mut self, threshold: f64) -> Self {
        self.similarity_threshold = threshold;
        self
    }

    /// Similarity oracle used by the typo pass (0.0-1.0)
    pub fn similarity(&self, a: &str, b: &str) -> f64 {
        normalized_damerau_levenshtein(a, b)
    }

    /// Whether the typo pass would merge `a` and `b` directly
    pub fn is_variant(&self, a: &str, b: &str) -> bool {
        let (len_a, len_b) = (a.chars().count(), b.chars().count());
        len_a.abs_diff(len_b) <= self.length_tolerance
            && self.similarity(a, b) > self.similarity_threshold
    }

    /// Resolve the keys of one document, given in document order.
    ///
    /// Duplicates are expected; empty or whitespace-only keys are skipped.
    pub fn resolve<'a, I>(&self, keys: I) -> IdentityMap
    where
        I: IntoIterator<Item = &'a str>,
    {
        let mut distinct: Vec<&str> = Vec::new();
        let mut index_of: HashMap<&str, usize> = HashMap::new();
        for key in keys {
            if key.trim().is_empty() || index_of.contains_key(key) {
                continue;
            }
            index_of.insert(key, distinct.len());
            distinct.push(key);
        }

        let mut sets = DisjointSet::new(distinct.len());

        for i in 0..distinct.len() {
            for j in (i + 1)..distinct.len() {
                if self.is_variant(distinct[i], distinct[j]) && sets.union(i, j) {
                    debug!(
                        target: TARGET_IDENTITY,
                        "Variant match: '{}' ~ '{}' (similarity {:.3})",
                        distinct[i],
                        distinct[j],
                        self.similarity(distinct[i], distinct[j])
                    );
                }
            }
        }

        let mut by_letters: HashMap<String, usize> = HashMap::new();
        for i in 0..distinct.len() {
            let mut letters: Vec<char> = distinct[i].chars().collect();
            letters.sort_unstable();
            let signature: String = letters.into_iter().collect();

            match by_letters.get(&signature) {
                Some(&first) => {
                    if sets.union(first, i) {
                        debug!(
                            target: TARGET_IDENTITY,
                            "Anagram match: '{}' ~ '{}'", distinct[first], distinct[i]
                        );
                    }
                }
                None => {
                    by_letters.insert(signature, i);
                }
            }
        }

        let mut canonical = HashMap::with_capacity(distinct.len());
        let mut clusters: Vec<IdentityCluster> = Vec::new();
        let mut cluster_of_root: HashMap<usize, usize> = HashMap::new();

        for (i, key) in distinct.iter().enumerate() {
            let root = sets.find(i);
            canonical.insert(key.to_string(), distinct[root].to_string());

            match cluster_of_root.get(&root) {
                Some(&position) => clusters[position].members.push(key.to_string()),
                None => {
                    cluster_of_root.insert(root, clusters.len());
                    clusters.push(IdentityCluster {
                        canonical_key: distinct[root].to_string(),
                        members: vec![key.to_string()],
                    });
                }
            }
        }

        info!(
            target: TARGET_IDENTITY,
            "Resolved {} distinct name keys into {} identities",
            distinct.len(),
            clusters.len()
        );

        IdentityMap {
            canonical,
            clusters,
        }
    }
}
