//! Evaluation utilities for training.
//!
//! [`MetricValue`] wraps a computed metric with its name and direction;
//! [`Evaluator`] scores every query in a range once per boosting round and
//! reports the values through a [`TrainingLogger`].

use crate::data::QueryInfo;

use super::logger::{TrainingLogger, Verbosity};
use super::metrics::MetricFn;
use super::RankingError;

// =============================================================================
// MetricValue
// =============================================================================

/// A computed metric value with metadata.
#[derive(Debug, Clone, PartialEq)]
pub struct MetricValue {
    /// Name of the metric (e.g. "q0-sized_auc").
    pub name: String,
    /// The computed value.
    pub value: f64,
    /// Whether higher values are better.
    pub higher_is_better: bool,
}

impl MetricValue {
    pub fn new(name: impl Into<String>, value: f64, higher_is_better: bool) -> Self {
        Self {
            name: name.into(),
            value,
            higher_is_better,
        }
    }

    /// Returns true if this value is better than another.
    pub fn is_better_than(&self, other: &Self) -> bool {
        if self.higher_is_better {
            self.value > other.value
        } else {
            self.value < other.value
        }
    }
}

impl std::fmt::Display for MetricValue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {:.6}", self.name, self.value)
    }
}

// =============================================================================
// Evaluator
// =============================================================================

/// Per-round metric evaluation over a range of queries.
///
/// Aggregation across queries is deliberately left to the host; this type
/// only computes per-query values, labels them, and logs the round.
pub struct Evaluator<'a, M: MetricFn> {
    metric: &'a M,
    logger: TrainingLogger,
}

impl<'a, M: MetricFn> Evaluator<'a, M> {
    pub fn new(metric: &'a M, verbosity: Verbosity) -> Self {
        Self {
            metric,
            logger: TrainingLogger::new(verbosity),
        }
    }

    /// Whether higher metric values are better.
    pub fn higher_is_better(&self) -> bool {
        self.metric.higher_is_better()
    }

    /// Score queries `[query_begin, query_end)` and log one line for the round.
    ///
    /// Returns one [`MetricValue`] per query, named `q{begin}-{metric}`.
    pub fn evaluate_round(
        &self,
        round: usize,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        queries: &[QueryInfo],
        query_begin: usize,
        query_end: usize,
    ) -> Result<Vec<MetricValue>, RankingError> {
        let scores =
            self.metric
                .eval_queries(approx, target, size, queries, query_begin, query_end)?;

        let values: Vec<MetricValue> = scores
            .iter()
            .zip(&queries[query_begin..query_end])
            .map(|(&score, query)| {
                MetricValue::new(
                    format!("q{}-{}", query.begin, self.metric.name()),
                    score,
                    self.metric.higher_is_better(),
                )
            })
            .collect();

        self.logger.log_metrics(round, &values);
        Ok(values)
    }
}
