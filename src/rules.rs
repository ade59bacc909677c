//! Association rule generation and scoring

use std::cmp::Ordering;

use crate::config::{Metric, MiningConfig};
use crate::error::AnalysisError;
use crate::mine::{FrequentItemsets, ItemSet};

/// A directional co-purchase rule: customers buying the antecedent also buy
/// the consequent. Endpoints are disjoint and their union is frequent.
#[derive(Debug, Clone, PartialEq)]
pub struct Rule {
    pub antecedent: ItemSet,
    pub consequent: ItemSet,
    /// Support of antecedent and consequent together
    pub support: f64,
    /// support(union) / support(antecedent), in [0, 1]
    pub confidence: f64,
    /// confidence / support(consequent); 1.0 means independence
    pub lift: f64,
}

impl Rule {
    pub fn antecedent_label(&self, universe: &[String]) -> String {
        self.antecedent.label(universe)
    }

    pub fn consequent_label(&self, universe: &[String]) -> String {
        self.consequent.label(universe)
    }

    fn metric_value(&self, metric: Metric) -> f64 {
        match metric {
            Metric::Support => self.support,
            Metric::Confidence => self.confidence,
            Metric::Lift => self.lift,
        }
    }
}

/// Rules in canonical presentation order: lift descending, then confidence
/// descending, then antecedent size ascending, then the canonical endpoint
/// keys. The order is total, so generation is reproducible bit for bit.
#[derive(Debug, Clone, PartialEq)]
pub struct RuleSet {
    rules: Vec<Rule>,
}

impl RuleSet {
    pub fn iter(&self) -> impl Iterator<Item = &Rule> {
        self.rules.iter()
    }

    pub fn as_slice(&self) -> &[Rule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// The first `n` rules in canonical order.
    pub fn top(&self, n: usize) -> &[Rule] {
        &self.rules[..n.min(self.rules.len())]
    }
}

/// Derive every rule obtainable by splitting a frequent itemset of size >= 2
/// into a non-empty antecedent and consequent, keeping those that satisfy
/// `min_confidence` and the configured primary metric threshold (both
/// mandatory).
///
/// Fails with [`AnalysisError::NoFrequentItemsets`] when the collection has
/// nothing of size >= 2 to split, which usually means `min_support` was set
/// too high for the data.
pub fn generate_rules(
    itemsets: &FrequentItemsets,
    config: &MiningConfig,
) -> crate::Result<RuleSet, AnalysisError> {
    config.validate()?;

    if !itemsets.iter().any(|fi| fi.items.len() >= 2) {
        return Err(AnalysisError::NoFrequentItemsets { min_support: config.min_support });
    }

    let mut rules = Vec::new();
    for fi in itemsets.iter().filter(|fi| fi.items.len() >= 2) {
        let items = fi.items.items();
        let k = items.len();
        // Every bipartition: bitmask selects the antecedent, the rest is the
        // consequent. Masks 0 and 2^k - 1 would leave an empty endpoint.
        for mask in 1..((1u64 << k) - 1) {
            let mut antecedent = Vec::new();
            let mut consequent = Vec::new();
            for (pos, &item) in items.iter().enumerate() {
                if mask & (1 << pos) != 0 {
                    antecedent.push(item);
                } else {
                    consequent.push(item);
                }
            }
            let antecedent = ItemSet::new(antecedent);
            let consequent = ItemSet::new(consequent);

            // Both endpoints are subsets of a frequent itemset, so their
            // supports are always in the index.
            let (Some(sup_ante), Some(sup_cons)) = (
                itemsets.support_of(&antecedent),
                itemsets.support_of(&consequent),
            ) else {
                continue;
            };

            let confidence = fi.support / sup_ante;
            let lift = confidence / sup_cons;
            let rule = Rule {
                antecedent,
                consequent,
                support: fi.support,
                confidence,
                lift,
            };

            if rule.confidence >= config.min_confidence
                && rule.metric_value(config.metric) >= config.metric_threshold()
            {
                rules.push(rule);
            }
        }
    }

    rules.sort_by(canonical_order);
    Ok(RuleSet { rules })
}

fn canonical_order(a: &Rule, b: &Rule) -> Ordering {
    b.lift
        .partial_cmp(&a.lift)
        .unwrap_or(Ordering::Equal)
        .then(b.confidence.partial_cmp(&a.confidence).unwrap_or(Ordering::Equal))
        .then(a.antecedent.len().cmp(&b.antecedent.len()))
        .then_with(|| a.antecedent.cmp(&b.antecedent))
        .then_with(|| a.consequent.cmp(&b.consequent))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::encode::{encode_transactions, BasketData};
    use crate::mine::mine_frequent_itemsets;

    fn basket(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    fn sample() -> (BasketData, FrequentItemsets, MiningConfig) {
        let transactions = vec![
            basket(&["Bread", "Milk"]),
            basket(&["Bread", "Milk", "Butter"]),
            basket(&["Soap"]),
            basket(&["Milk", "Butter"]),
            basket(&["Bread", "Milk", "Butter"]),
        ];
        let data = encode_transactions(&transactions).unwrap();
        let config = MiningConfig {
            min_support: 0.4,
            min_confidence: 0.5,
            min_lift: 1.0,
            metric: Metric::Lift,
        };
        let itemsets = mine_frequent_itemsets(&data, &config).unwrap();
        (data, itemsets, config)
    }

    fn set(data: &BasketData, labels: &[&str]) -> ItemSet {
        ItemSet::new(labels.iter().map(|l| data.item_index(l).unwrap()).collect())
    }

    #[test]
    fn test_single_antecedent_rule_present() {
        let (data, itemsets, config) = sample();
        let rules = generate_rules(&itemsets, &config).unwrap();

        // Every Bread purchase includes Milk: confidence 0.6/0.6 = 1.0,
        // lift 1.0/0.8 = 1.25.
        let rule = rules
            .iter()
            .find(|r| {
                r.antecedent == set(&data, &["Bread"]) && r.consequent == set(&data, &["Milk"])
            })
            .expect("Bread -> Milk rule missing");
        assert_eq!(rule.support, 0.6);
        assert_eq!(rule.confidence, 1.0);
        assert_eq!(rule.lift, 1.25);
    }

    #[test]
    fn test_scores_recompute_from_raw_supports() {
        let (_, itemsets, config) = sample();
        let rules = generate_rules(&itemsets, &config).unwrap();
        assert!(!rules.is_empty());

        for rule in rules.iter() {
            assert!((0.0..=1.0).contains(&rule.confidence), "confidence out of range");
            assert!(rule.lift >= 0.0);

            let sup_ante = itemsets.support_of(&rule.antecedent).unwrap();
            let sup_cons = itemsets.support_of(&rule.consequent).unwrap();
            assert_eq!(rule.confidence, rule.support / sup_ante);
            assert_eq!(rule.lift, rule.confidence / sup_cons);
        }
    }

    #[test]
    fn test_thresholds_are_both_mandatory() {
        let (_, itemsets, config) = sample();
        let rules = generate_rules(&itemsets, &config).unwrap();
        for rule in rules.iter() {
            assert!(rule.confidence >= config.min_confidence);
            assert!(rule.lift >= config.min_lift);
        }
    }

    #[test]
    fn test_support_metric_uses_support_threshold() {
        let (_, itemsets, _) = sample();
        let config = MiningConfig {
            min_support: 0.5,
            min_confidence: 0.0,
            min_lift: 0.0,
            metric: Metric::Support,
        };
        let rules = generate_rules(&itemsets, &config).unwrap();
        assert!(!rules.is_empty());
        for rule in rules.iter() {
            assert!(rule.support >= 0.5);
        }
    }

    #[test]
    fn test_endpoints_are_disjoint_and_cover_a_frequent_itemset() {
        let (_, itemsets, config) = sample();
        let rules = generate_rules(&itemsets, &config).unwrap();
        for rule in rules.iter() {
            for &item in rule.antecedent.items() {
                assert!(!rule.consequent.contains(item));
            }
            let mut union: Vec<u32> = rule.antecedent.items().to_vec();
            union.extend_from_slice(rule.consequent.items());
            assert!(itemsets.support_of(&ItemSet::new(union)).is_some());
        }
    }

    #[test]
    fn test_canonical_ordering() {
        let (_, itemsets, config) = sample();
        let rules = generate_rules(&itemsets, &config).unwrap();
        for pair in rules.as_slice().windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            assert!(
                a.lift > b.lift
                    || (a.lift == b.lift && a.confidence > b.confidence)
                    || (a.lift == b.lift
                        && a.confidence == b.confidence
                        && a.antecedent.len() <= b.antecedent.len()),
                "rules out of canonical order"
            );
        }
    }

    #[test]
    fn test_no_itemsets_of_size_two_is_reported() {
        let transactions = vec![
            basket(&["Apples"]),
            basket(&["Bananas"]),
            basket(&["Cherries"]),
            basket(&["Dates"]),
        ];
        let data = encode_transactions(&transactions).unwrap();
        let config = MiningConfig { min_support: 0.5, ..MiningConfig::default() };
        let itemsets = mine_frequent_itemsets(&data, &config).unwrap();
        assert!(itemsets.is_empty());

        assert!(matches!(
            generate_rules(&itemsets, &config),
            Err(AnalysisError::NoFrequentItemsets { .. })
        ));
    }

    #[test]
    fn test_strict_thresholds_yield_empty_rule_set() {
        let (_, itemsets, _) = sample();
        let config = MiningConfig {
            min_support: 0.4,
            min_confidence: 0.5,
            min_lift: 100.0,
            metric: Metric::Lift,
        };
        let rules = generate_rules(&itemsets, &config).unwrap();
        assert!(rules.is_empty());
    }

    #[test]
    fn test_deterministic_across_runs() {
        let (_, itemsets, config) = sample();
        let first = generate_rules(&itemsets, &config).unwrap();
        let second = generate_rules(&itemsets, &config).unwrap();
        assert_eq!(first, second);
    }
}
