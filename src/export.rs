//! CSV export of analysis results using Polars

use polars::prelude::*;
use std::fs::File;

use crate::mine::FrequentItemsets;
use crate::rules::RuleSet;

/// Write the rule collection as a CSV table with readable endpoint columns.
pub fn write_rules_csv(
    rules: &RuleSet,
    universe: &[String],
    path: &str,
) -> crate::Result<()> {
    let antecedents: Vec<String> =
        rules.iter().map(|r| r.antecedent_label(universe)).collect();
    let consequents: Vec<String> =
        rules.iter().map(|r| r.consequent_label(universe)).collect();
    let supports: Vec<f64> = rules.iter().map(|r| r.support).collect();
    let confidences: Vec<f64> = rules.iter().map(|r| r.confidence).collect();
    let lifts: Vec<f64> = rules.iter().map(|r| r.lift).collect();

    let mut df = DataFrame::new(vec![
        Series::new("antecedents", antecedents),
        Series::new("consequents", consequents),
        Series::new("support", supports),
        Series::new("confidence", confidences),
        Series::new("lift", lifts),
    ])?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

/// Write the frequent itemsets as a CSV table.
pub fn write_itemsets_csv(
    itemsets: &FrequentItemsets,
    universe: &[String],
    path: &str,
) -> crate::Result<()> {
    let labels: Vec<String> =
        itemsets.iter().map(|fi| fi.items.label(universe)).collect();
    let sizes: Vec<u32> = itemsets.iter().map(|fi| fi.items.len() as u32).collect();
    let supports: Vec<f64> = itemsets.iter().map(|fi| fi.support).collect();

    let mut df = DataFrame::new(vec![
        Series::new("itemsets", labels),
        Series::new("length", sizes),
        Series::new("support", supports),
    ])?;

    let mut file = File::create(path)?;
    CsvWriter::new(&mut file).finish(&mut df)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::BasketAnalysis;
    use crate::config::{Metric, MiningConfig};
    use tempfile::tempdir;

    fn sample_analysis() -> BasketAnalysis {
        let basket = |items: &[&str]| items.iter().map(|s| s.to_string()).collect();
        let transactions: Vec<Vec<String>> = vec![
            basket(&["Bread", "Milk"]),
            basket(&["Bread", "Milk", "Butter"]),
            basket(&["Soap"]),
            basket(&["Milk", "Butter"]),
            basket(&["Bread", "Milk", "Butter"]),
        ];
        let config = MiningConfig {
            min_support: 0.4,
            min_confidence: 0.5,
            min_lift: 1.0,
            metric: Metric::Lift,
        };
        BasketAnalysis::run(&transactions, config).unwrap()
    }

    #[test]
    fn test_write_rules_csv() {
        let analysis = sample_analysis();
        let dir = tempdir().unwrap();
        let path = dir.path().join("rules.csv");
        let path = path.to_str().unwrap();

        write_rules_csv(analysis.rules(), analysis.data().universe(), path).unwrap();

        let df = CsvReader::from_path(path).unwrap().has_header(true).finish().unwrap();
        assert_eq!(df.height(), analysis.rules().len());
        assert_eq!(
            df.get_column_names(),
            &["antecedents", "consequents", "support", "confidence", "lift"]
        );
    }

    #[test]
    fn test_write_itemsets_csv() {
        let analysis = sample_analysis();
        let dir = tempdir().unwrap();
        let path = dir.path().join("itemsets.csv");
        let path = path.to_str().unwrap();

        write_itemsets_csv(analysis.itemsets(), analysis.data().universe(), path).unwrap();

        let df = CsvReader::from_path(path).unwrap().has_header(true).finish().unwrap();
        assert_eq!(df.height(), analysis.itemsets().len());
        assert_eq!(df.get_column_names(), &["itemsets", "length", "support"]);
    }
}
