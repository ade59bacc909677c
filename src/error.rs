//! Error types for the analysis core.
//!
//! Every failure the mining pipeline can report is a variant of
//! [`AnalysisError`]. All errors are raised synchronously at the call that
//! detects them; a failed stage never hands back partial output.

use thiserror::Error;

/// Failures of the analysis core.
#[derive(Debug, Error)]
pub enum AnalysisError {
    /// A threshold parameter is outside its valid range.
    #[error("invalid parameter {name}: {value} (expected {expected})")]
    InvalidParameter {
        /// Name of the offending parameter
        name: &'static str,
        /// The rejected value
        value: f64,
        /// Human-readable description of the valid range
        expected: &'static str,
    },

    /// The transaction sequence was empty (or every basket in it was).
    #[error("no transactions to analyze: the input contained no non-empty baskets")]
    EmptyInput,

    /// Mining produced nothing of size >= 2, so no rules can be derived.
    /// Usually a sign that `min_support` is set too high for the data.
    #[error(
        "no frequent itemsets of size >= 2 at min_support {min_support}; \
         lower min_support to surface co-purchase patterns"
    )]
    NoFrequentItemsets { min_support: f64 },

    /// A summary was requested over an empty rule collection.
    #[error("no association rules available; relax the thresholds and rerun the analysis")]
    NoRulesAvailable,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_messages_name_the_cause() {
        let err = AnalysisError::InvalidParameter {
            name: "min_support",
            value: 1.01,
            expected: "a fraction in (0, 1]",
        };
        let msg = err.to_string();
        assert!(msg.contains("min_support"));
        assert!(msg.contains("1.01"));

        let msg = AnalysisError::NoFrequentItemsets { min_support: 0.9 }.to_string();
        assert!(msg.contains("min_support"));
        assert!(msg.contains("0.9"));
    }
}
