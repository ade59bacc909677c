//! Level-wise Apriori search for frequent itemsets
//!
//! Candidates at level k are built only from pairs of frequent
//! (k-1)-itemsets sharing a (k-2)-prefix, then pruned unless every
//! (k-1)-subset is itself frequent. Support never increases when an itemset
//! grows, which is what makes the pruning exact rather than heuristic.

use ndarray::Array2;
use rayon::prelude::*;
use std::collections::{HashMap, HashSet};

use crate::config::MiningConfig;
use crate::encode::BasketData;
use crate::error::AnalysisError;

/// An immutable, order-independent set of items with value equality and
/// hashing. Items are universe column indices kept sorted and deduplicated,
/// so two sets built from the same items in any order compare equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ItemSet(Vec<u32>);

impl ItemSet {
    pub fn new(mut items: Vec<u32>) -> Self {
        items.sort_unstable();
        items.dedup();
        ItemSet(items)
    }

    pub fn items(&self) -> &[u32] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, item: u32) -> bool {
        self.0.binary_search(&item).is_ok()
    }

    /// All subsets one item smaller, in drop-position order.
    fn subsets_dropping_one(&self) -> Vec<ItemSet> {
        (0..self.0.len())
            .map(|skip| {
                ItemSet(
                    self.0
                        .iter()
                        .enumerate()
                        .filter(|(i, _)| *i != skip)
                        .map(|(_, &item)| item)
                        .collect(),
                )
            })
            .collect()
    }

    /// Join two sorted k-sets sharing a (k-1)-prefix into a (k+1)-set.
    /// Returns `None` when the prefixes differ or the sets are equal.
    fn join(&self, other: &ItemSet) -> Option<ItemSet> {
        let k = self.0.len();
        if other.0.len() != k || k == 0 {
            return None;
        }
        if self.0[..k - 1] != other.0[..k - 1] || self.0[k - 1] == other.0[k - 1] {
            return None;
        }
        let mut joined = self.0.clone();
        joined.push(other.0[k - 1]);
        joined.sort_unstable();
        Some(ItemSet(joined))
    }

    /// Comma-joined item labels for tabular output.
    pub fn label(&self, universe: &[String]) -> String {
        self.0
            .iter()
            .map(|&i| universe[i as usize].as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// A frequent itemset together with its support fraction.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemset {
    pub items: ItemSet,
    pub support: f64,
}

/// Every itemset meeting the support threshold, in level order
/// (lexicographic within each level), plus a support index used by rule
/// generation.
#[derive(Debug, Clone, PartialEq)]
pub struct FrequentItemsets {
    itemsets: Vec<FrequentItemset>,
    support: HashMap<ItemSet, f64>,
    n_transactions: usize,
}

impl FrequentItemsets {
    pub fn iter(&self) -> impl Iterator<Item = &FrequentItemset> {
        self.itemsets.iter()
    }

    pub fn as_slice(&self) -> &[FrequentItemset] {
        &self.itemsets
    }

    pub fn len(&self) -> usize {
        self.itemsets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.itemsets.is_empty()
    }

    pub fn n_transactions(&self) -> usize {
        self.n_transactions
    }

    /// Support of an itemset, if it is frequent. Subsets of any frequent
    /// itemset are always present.
    pub fn support_of(&self, items: &ItemSet) -> Option<f64> {
        self.support.get(items).copied()
    }
}

/// Enumerate all itemsets with support >= `min_support` using the level-wise
/// Apriori strategy.
///
/// Level 1 keeps every single item meeting the threshold; each later level
/// joins and prunes the previous one, counts support against the membership
/// table, and stops once a level comes up empty. Ties in support keep the
/// lexicographic candidate order, so the result is deterministic for a given
/// input. An empty universe yields an empty result.
pub fn mine_frequent_itemsets(
    data: &BasketData,
    config: &MiningConfig,
) -> crate::Result<FrequentItemsets, AnalysisError> {
    config.validate()?;

    let n = data.n_transactions();
    let mut itemsets = Vec::new();
    let mut support = HashMap::new();

    let singles: Vec<ItemSet> = (0..data.universe().len() as u32)
        .map(|i| ItemSet(vec![i]))
        .collect();

    let mut current = keep_frequent(
        data.table(),
        singles,
        n,
        config.min_support,
        &mut itemsets,
        &mut support,
    );

    while !current.is_empty() {
        let candidates = join_and_prune(&current);
        if candidates.is_empty() {
            break;
        }
        current = keep_frequent(
            data.table(),
            candidates,
            n,
            config.min_support,
            &mut itemsets,
            &mut support,
        );
    }

    Ok(FrequentItemsets { itemsets, support, n_transactions: n })
}

/// Count support for each candidate and keep those meeting the threshold,
/// preserving candidate order.
fn keep_frequent(
    table: &Array2<bool>,
    candidates: Vec<ItemSet>,
    n_transactions: usize,
    min_support: f64,
    itemsets: &mut Vec<FrequentItemset>,
    support: &mut HashMap<ItemSet, f64>,
) -> Vec<ItemSet> {
    let counts = count_supports(table, &candidates);
    let mut frequent = Vec::new();
    for (set, count) in candidates.into_iter().zip(counts) {
        let s = count as f64 / n_transactions as f64;
        if s >= min_support {
            support.insert(set.clone(), s);
            itemsets.push(FrequentItemset { items: set.clone(), support: s });
            frequent.push(set);
        }
    }
    frequent
}

/// Transactions containing every item of each candidate. Candidates are
/// independent, so counting fans out across the thread pool; collecting by
/// position keeps the merge order identical to a sequential scan.
fn count_supports(table: &Array2<bool>, candidates: &[ItemSet]) -> Vec<usize> {
    candidates
        .par_iter()
        .map(|candidate| {
            table
                .outer_iter()
                .filter(|row| candidate.items().iter().all(|&i| row[i as usize]))
                .count()
        })
        .collect()
}

/// Join step and prune step over one frequency level.
///
/// `level` is lexicographically sorted, so sets sharing a prefix are
/// contiguous and the scan can stop at the first mismatch. A candidate
/// survives only if all of its one-smaller subsets are frequent.
fn join_and_prune(level: &[ItemSet]) -> Vec<ItemSet> {
    let frequent: HashSet<&ItemSet> = level.iter().collect();
    let mut candidates = Vec::new();

    for i in 0..level.len() {
        for j in (i + 1)..level.len() {
            let Some(candidate) = level[i].join(&level[j]) else {
                break;
            };
            if candidate
                .subsets_dropping_one()
                .iter()
                .all(|subset| frequent.contains(subset))
            {
                candidates.push(candidate);
            }
        }
    }
    candidates
}
