//! BasketForge: A Rust CLI application for market basket analysis using the
//! Apriori algorithm
//!
//! This library discovers co-purchase patterns in retail transaction logs and
//! turns them into scored cross-sell rules (support, confidence, lift).

pub mod analysis;
pub mod cli;
pub mod config;
pub mod data;
pub mod encode;
pub mod error;
pub mod export;
pub mod mine;
pub mod rules;
pub mod viz;

// Re-export public items for easier access
pub use analysis::{AnalysisSummary, BasketAnalysis, Recommendation};
pub use cli::Args;
pub use config::{Metric, MiningConfig};
pub use data::load_transactions;
pub use encode::{encode_transactions, BasketData};
pub use error::AnalysisError;
pub use mine::{mine_frequent_itemsets, FrequentItemset, FrequentItemsets, ItemSet};
pub use rules::{generate_rules, Rule, RuleSet};

/// Common result type used throughout the application. The analysis core
/// narrows the error to [`AnalysisError`]; I/O wrappers use the default.
pub type Result<T, E = anyhow::Error> = std::result::Result<T, E>;
