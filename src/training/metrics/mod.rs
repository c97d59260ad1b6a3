//! Querywise evaluation metrics.
//!
//! Metrics are separate from objectives: an objective produces derivatives
//! to descend on, a metric produces scalar values to monitor. Querywise
//! metrics score each query group independently and leave cross-dataset
//! aggregation policy to the host.

mod ranking;

pub use ranking::SizedAucMetric;

use std::collections::BTreeMap;

use crate::data::QueryInfo;

use super::RankingError;

// =============================================================================
// Metric Trait
// =============================================================================

/// A querywise metric scoring each query group independently.
pub trait MetricFn: Send + Sync {
    /// Score queries `[query_begin, query_end)`, one value per query.
    fn eval_queries(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        queries: &[QueryInfo],
        query_begin: usize,
        query_end: usize,
    ) -> Result<Vec<f64>, RankingError>;

    /// Whether higher values indicate better performance.
    fn higher_is_better(&self) -> bool;

    /// Name of the metric (for logging).
    fn name(&self) -> &'static str;
}

// =============================================================================
// Metric Registry
// =============================================================================

/// Metric selection by configuration name (closed set).
#[derive(Debug, Clone)]
pub enum RankingMetric {
    /// Quality ratio of achieved to ideal weighted AUC.
    SizedAuc(SizedAucMetric),
}

impl RankingMetric {
    /// Build a metric from a configuration name and string-keyed params.
    ///
    /// `sized_auc` takes no parameters; unknown keys (including the legacy
    /// `alpha`) are accepted and ignored.
    pub fn from_params(
        name: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Self, RankingError> {
        match name {
            "sized_auc" => {
                let _ = params;
                Ok(Self::SizedAuc(SizedAucMetric))
            }
            other => Err(RankingError::UnknownMetric(other.to_string())),
        }
    }

    pub fn sized_auc() -> Self {
        Self::SizedAuc(SizedAucMetric)
    }
}

impl MetricFn for RankingMetric {
    fn eval_queries(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        queries: &[QueryInfo],
        query_begin: usize,
        query_end: usize,
    ) -> Result<Vec<f64>, RankingError> {
        match self {
            Self::SizedAuc(inner) => {
                inner.eval_queries(approx, target, size, queries, query_begin, query_end)
            }
        }
    }

    fn higher_is_better(&self) -> bool {
        match self {
            Self::SizedAuc(inner) => inner.higher_is_better(),
        }
    }

    fn name(&self) -> &'static str {
        match self {
            Self::SizedAuc(inner) => inner.name(),
        }
    }
}
