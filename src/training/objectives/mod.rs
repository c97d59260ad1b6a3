//! Querywise ranking objectives (derivative calculators).
//!
//! An objective turns the model's current scores into per-candidate first
//! order derivatives the boosting trainer descends on. Work is grouped by
//! query: each query's derivative slots are computed independently, which is
//! what lets the dispatcher fan queries out across threads.

mod ranking;

pub use ranking::{SizedAucLoss, DEFAULT_ITERATIONS};

use std::collections::BTreeMap;

use crate::data::QueryInfo;
use crate::utils::Parallelism;

use super::{Ders, RankingError};

// =============================================================================
// Objective Trait
// =============================================================================

/// A querywise objective: per-candidate derivatives plus a per-query score.
///
/// `ders` covers the rows of all dispatched queries; slot `i` belongs to row
/// `queries[query_start].begin + i`. Each query's slots are zeroed before
/// accumulation, and no slot outside the dispatched queries is touched.
pub trait ObjectiveFn: Send + Sync {
    /// Compute derivatives for every query in `[query_start, query_end)`,
    /// fanning out through `parallelism`.
    fn compute_ders_for_queries(
        &self,
        query_start: usize,
        query_end: usize,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        queries: &[QueryInfo],
        ders: &mut [Ders],
        parallelism: Parallelism,
    ) -> Result<(), RankingError>;

    /// Quality score of a single query under the current model scores.
    fn compute_query_score(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        query: QueryInfo,
    ) -> Result<f64, RankingError>;

    /// Whether derivatives are computed per query group rather than per row.
    fn is_querywise(&self) -> bool {
        true
    }

    /// Direction a monitoring host should treat as improvement.
    fn higher_is_better(&self) -> bool {
        true
    }

    /// Name of the objective (for logging).
    fn name(&self) -> &'static str;
}

// =============================================================================
// Objective Registry
// =============================================================================

/// Objective selection by configuration name (closed set).
///
/// Wraps each concrete objective behind one dispatchable type, the same way
/// a trainer config picks a loss by name.
#[derive(Debug, Clone)]
pub enum RankingObjective {
    /// Randomized pairwise sized-AUC objective.
    SizedAuc(SizedAucLoss),
}

impl RankingObjective {
    /// Build an objective from a configuration name and string-keyed params.
    ///
    /// `exp_approx` signals that scores arrive exponentiated; no registered
    /// objective supports that form, so `true` fails fast with
    /// [`RankingError::ExponentiatedApprox`].
    pub fn from_params(
        name: &str,
        params: &BTreeMap<String, String>,
        exp_approx: bool,
    ) -> Result<Self, RankingError> {
        match name {
            "sized_auc" => Ok(Self::SizedAuc(SizedAucLoss::from_params(params, exp_approx)?)),
            other => Err(RankingError::UnknownObjective(other.to_string())),
        }
    }

    /// Default sized-AUC objective.
    pub fn sized_auc() -> Self {
        Self::SizedAuc(SizedAucLoss::new())
    }
}

impl ObjectiveFn for RankingObjective {
    fn compute_ders_for_queries(
        &self,
        query_start: usize,
        query_end: usize,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        queries: &[QueryInfo],
        ders: &mut [Ders],
        parallelism: Parallelism,
    ) -> Result<(), RankingError> {
        match self {
            Self::SizedAuc(inner) => inner.compute_ders_for_queries(
                query_start,
                query_end,
                approx,
                target,
                size,
                queries,
                ders,
                parallelism,
            ),
        }
    }

    fn compute_query_score(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        query: QueryInfo,
    ) -> Result<f64, RankingError> {
        match self {
            Self::SizedAuc(inner) => inner.compute_query_score(approx, target, size, query),
        }
    }

    fn is_querywise(&self) -> bool {
        match self {
            Self::SizedAuc(inner) => inner.is_querywise(),
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
