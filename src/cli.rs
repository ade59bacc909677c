//! Command-line interface definitions and argument parsing

use clap::Parser;

use crate::config::{Metric, MiningConfig};

/// Market basket analysis CLI: frequent itemsets and cross-sell rules from a
/// retail transaction log
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Path to the input CSV file
    #[arg(short, long, default_value = "transactions.csv")]
    pub input: String,

    /// Column holding transaction IDs
    #[arg(long, default_value = "TransactionID")]
    pub transaction_col: String,

    /// Column holding product/item names
    #[arg(long, default_value = "Product")]
    pub item_col: String,

    /// Minimum support threshold, a fraction in (0, 1]
    #[arg(short = 's', long, default_value_t = 0.05)]
    pub min_support: f64,

    /// Minimum confidence threshold, a fraction in [0, 1]
    #[arg(short = 'c', long, default_value_t = 0.4)]
    pub min_confidence: f64,

    /// Minimum lift threshold
    #[arg(short = 'l', long, default_value_t = 1.5)]
    pub min_lift: f64,

    /// Metric used for the primary rule filter
    #[arg(short, long, value_enum, default_value_t = Metric::Lift)]
    pub metric: Metric,

    /// Number of top rules to show in reports and charts
    #[arg(short = 'n', long, default_value_t = 10)]
    pub top: usize,

    /// Output path for the rule scatter plot
    #[arg(short, long, default_value = "rules_plot.png")]
    pub output: String,

    /// Directory to write rules.csv and frequent_itemsets.csv into
    #[arg(long)]
    pub export_dir: Option<String>,

    /// Recommendation mode: print cross-sell suggestions for this product
    /// instead of the full report
    #[arg(short, long)]
    pub recommend: Option<String>,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,
}

impl Args {
    /// Thresholds and metric collected into a mining configuration.
    /// Range validation happens inside the pipeline.
    pub fn mining_config(&self) -> MiningConfig {
        MiningConfig {
            min_support: self.min_support,
            min_confidence: self.min_confidence,
            min_lift: self.min_lift,
            metric: self.metric,
        }
    }
}
