//! Mining configuration and threshold validation

use clap::ValueEnum;
use std::fmt;

use crate::error::AnalysisError;

/// Metric used for the primary rule filter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Metric {
    Support,
    Confidence,
    Lift,
}

impl fmt::Display for Metric {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Metric::Support => write!(f, "support"),
            Metric::Confidence => write!(f, "confidence"),
            Metric::Lift => write!(f, "lift"),
        }
    }
}

/// Thresholds and filter settings shared by the miner and the rule generator.
///
/// Confidence is always a mandatory filter; the configured [`Metric`] is
/// additionally thresholded against its own bound (support against
/// `min_support`, confidence against `min_confidence`, lift against
/// `min_lift`). Both filters must pass for a rule to be kept.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MiningConfig {
    /// Minimum fraction of transactions an itemset must appear in, in (0, 1]
    pub min_support: f64,
    /// Minimum rule confidence, in [0, 1]
    pub min_confidence: f64,
    /// Minimum rule lift, non-negative
    pub min_lift: f64,
    /// Metric used for the primary rule filter
    pub metric: Metric,
}

impl Default for MiningConfig {
    fn default() -> Self {
        Self {
            min_support: 0.05,
            min_confidence: 0.4,
            min_lift: 1.5,
            metric: Metric::Lift,
        }
    }
}

impl MiningConfig {
    /// Check every threshold, reporting the first one out of range.
    /// Non-finite values (including NaN) are rejected.
    pub fn validate(&self) -> crate::Result<(), AnalysisError> {
        if !(self.min_support > 0.0 && self.min_support <= 1.0) {
            return Err(AnalysisError::InvalidParameter {
                name: "min_support",
                value: self.min_support,
                expected: "a fraction in (0, 1]",
            });
        }
        if !(self.min_confidence >= 0.0 && self.min_confidence <= 1.0) {
            return Err(AnalysisError::InvalidParameter {
                name: "min_confidence",
                value: self.min_confidence,
                expected: "a fraction in [0, 1]",
            });
        }
        if !(self.min_lift >= 0.0 && self.min_lift.is_finite()) {
            return Err(AnalysisError::InvalidParameter {
                name: "min_lift",
                value: self.min_lift,
                expected: "a non-negative finite number",
            });
        }
        Ok(())
    }

    /// The threshold paired with the configured primary metric.
    pub fn metric_threshold(&self) -> f64 {
        match self.metric {
            Metric::Support => self.min_support,
            Metric::Confidence => self.min_confidence,
            Metric::Lift => self.min_lift,
        }
    }
}
