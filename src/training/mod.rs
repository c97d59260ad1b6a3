//! Training-side components for querywise ranking.
//!
//! This module provides everything a gradient-boosting trainer consumes to
//! optimize and monitor a querywise ranking measure:
//!
//! - [`ObjectiveFn`], [`RankingObjective`], [`SizedAucLoss`]: per-candidate
//!   derivative computation, fanned out over queries
//! - [`MetricFn`], [`RankingMetric`], [`SizedAucMetric`]: per-query quality
//!   scores for monitoring and early stopping
//! - [`Ders`], [`DerivativeBuffer`]: derivative storage indexed by row id
//! - [`Evaluator`], [`MetricValue`]: per-round metric reporting
//! - [`TrainingLogger`], [`Verbosity`]: structured logging
//!
//! The numeric helpers shared by the objective and the metric live in
//! [`sized_auc`].

mod eval;
mod gradients;
mod logger;
pub mod metrics;
pub mod objectives;
pub mod sized_auc;

pub use eval::{Evaluator, MetricValue};
pub use gradients::{DerivativeBuffer, Ders};
pub use logger::{TrainingLogger, Verbosity};
pub use metrics::{MetricFn, RankingMetric, SizedAucMetric};
pub use objectives::{ObjectiveFn, RankingObjective, SizedAucLoss, DEFAULT_ITERATIONS};

use thiserror::Error;

// =============================================================================
// Contract Errors
// =============================================================================

/// Contract violations surfaced by querywise ranking computations.
///
/// All of these are caller preconditions, not recoverable runtime errors:
/// the computation aborts immediately and the host decides whether to stop
/// the run or surface the failure. Offsets refer to the first row of the
/// offending query, matching the ids in the dataset arrays.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum RankingError {
    /// Scores were supplied in exponentiated form, which this objective
    /// cannot consume.
    #[error("approx format does not match: exponentiated approx is not supported")]
    ExponentiatedApprox,

    /// No objective is registered under the requested name.
    #[error("unknown ranking objective '{0}'")]
    UnknownObjective(String),

    /// No metric is registered under the requested name.
    #[error("unknown ranking metric '{0}'")]
    UnknownMetric(String),

    /// A query's targets sum to zero, so target shares are undefined.
    #[error("query at row {offset}: total target mass is zero")]
    ZeroTargetTotal { offset: usize },

    /// A query's sizes sum to zero, so size shares are undefined.
    #[error("query at row {offset}: total size mass is zero")]
    ZeroSizeTotal { offset: usize },

    /// The best-achievable ordering scored a zero weighted AUC, leaving the
    /// quality ratio undefined.
    #[error("query at row {offset}: ideal ordering has zero weighted AUC")]
    ZeroIdealAuc { offset: usize },

    /// The evaluated quality score must be strictly positive.
    #[error("query at row {offset}: quality score {score} is not positive")]
    NonPositiveScore { offset: usize, score: f64 },
}
