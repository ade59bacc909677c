//! Pipeline orchestration and the read-only query facade
//!
//! [`BasketAnalysis::run`] composes encoder, miner and rule generator as pure
//! stages; the returned value is immutable, so queries can never observe a
//! half-built analysis.

use crate::config::MiningConfig;
use crate::encode::{encode_transactions, BasketData};
use crate::error::AnalysisError;
use crate::mine::{mine_frequent_itemsets, FrequentItemsets};
use crate::rules::{generate_rules, Rule, RuleSet};

/// A completed market basket analysis over one transaction log.
#[derive(Debug, Clone, PartialEq)]
pub struct BasketAnalysis {
    data: BasketData,
    itemsets: FrequentItemsets,
    rules: RuleSet,
    config: MiningConfig,
}

/// One cross-sell suggestion for a queried item.
#[derive(Debug, Clone, PartialEq)]
pub struct Recommendation {
    /// Comma-joined labels of the products to offer
    pub consequent: String,
    pub confidence: f64,
    pub lift: f64,
}

/// Aggregate statistics over a completed analysis.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisSummary {
    pub transaction_count: usize,
    pub universe_size: usize,
    pub itemset_count: usize,
    pub rule_count: usize,
    pub mean_support: f64,
    pub mean_confidence: f64,
    pub mean_lift: f64,
    /// The single highest-lift rule, rendered as "antecedent -> consequent"
    pub top_rule: String,
    pub top_rule_confidence: f64,
    pub top_rule_lift: f64,
}

impl BasketAnalysis {
    /// Run the full pipeline: encode transactions, mine frequent itemsets,
    /// generate and score rules.
    pub fn run(
        transactions: &[Vec<String>],
        config: MiningConfig,
    ) -> crate::Result<Self, AnalysisError> {
        let data = encode_transactions(transactions)?;
        let itemsets = mine_frequent_itemsets(&data, &config)?;
        let rules = generate_rules(&itemsets, &config)?;
        Ok(Self { data, itemsets, rules, config })
    }

    pub fn data(&self) -> &BasketData {
        &self.data
    }

    pub fn itemsets(&self) -> &FrequentItemsets {
        &self.itemsets
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn config(&self) -> &MiningConfig {
        &self.config
    }

    /// Cross-sell suggestions for an item: every rule whose antecedent
    /// contains it, in lift-descending order. Unknown items and items with no
    /// matching rule yield an empty list.
    pub fn recommendations_for(&self, item: &str) -> Vec<Recommendation> {
        let Some(index) = self.data.item_index(item) else {
            return Vec::new();
        };
        self.rules
            .iter()
            .filter(|rule| rule.antecedent.contains(index))
            .map(|rule| Recommendation {
                consequent: rule.consequent_label(self.data.universe()),
                confidence: rule.confidence,
                lift: rule.lift,
            })
            .collect()
    }

    /// The first `n` rules in canonical order.
    pub fn top_rules(&self, n: usize) -> &[Rule] {
        self.rules.top(n)
    }

    /// Aggregate statistics, including the strongest rule. Fails with
    /// [`AnalysisError::NoRulesAvailable`] when every candidate rule was
    /// filtered out by the thresholds.
    pub fn summary(&self) -> crate::Result<AnalysisSummary, AnalysisError> {
        if self.rules.is_empty() {
            return Err(AnalysisError::NoRulesAvailable);
        }
        let n = self.rules.len() as f64;
        let universe = self.data.universe();
        let top = &self.rules.as_slice()[0];

        Ok(AnalysisSummary {
            transaction_count: self.data.n_transactions(),
            universe_size: universe.len(),
            itemset_count: self.itemsets.len(),
            rule_count: self.rules.len(),
            mean_support: self.rules.iter().map(|r| r.support).sum::<f64>() / n,
            mean_confidence: self.rules.iter().map(|r| r.confidence).sum::<f64>() / n,
            mean_lift: self.rules.iter().map(|r| r.lift).sum::<f64>() / n,
            top_rule: format!(
                "{} -> {}",
                top.antecedent_label(universe),
                top.consequent_label(universe)
            ),
            top_rule_confidence: top.confidence,
            top_rule_lift: top.lift,
        })
    }
}
