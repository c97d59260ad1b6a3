//! Randomized pairwise gradient estimation for the sized-AUC objective.
//!
//! Summing the pairwise logistic-ranking gradient over every candidate pair
//! costs O(n^2) per query. This objective instead draws a fresh uniform
//! permutation of the query a fixed number of times and walks only the
//! adjacent pairs of each draw. Every unordered pair is adjacent with equal
//! probability under a uniform shuffle, so the accumulated sum approaches a
//! scaled copy of the full pairwise sum while costing O(iterations * n).

use std::collections::BTreeMap;

use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};

use crate::data::QueryInfo;
use crate::training::sized_auc::{
    accumulate_shares, extract_query, query_quality, sigmoid, Example,
};
use crate::training::{Ders, RankingError};
use crate::utils::Parallelism;

use super::ObjectiveFn;

/// Shuffle rounds per query.
pub const DEFAULT_ITERATIONS: u32 = 100;

/// Mixes the configured seed with a task index so concurrent tasks draw
/// independent sequences.
const TASK_SEED_MIX: u64 = 0x9E37_79B9_7F4A_7C15;

/// Querywise sized-AUC objective with a Monte-Carlo pairwise gradient.
#[derive(Debug, Clone)]
pub struct SizedAucLoss {
    iterations: u32,
    seed: Option<u64>,
}

impl Default for SizedAucLoss {
    fn default() -> Self {
        Self {
            iterations: DEFAULT_ITERATIONS,
            seed: None,
        }
    }
}

impl SizedAucLoss {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from a string-keyed configuration map.
    ///
    /// The objective takes no tunable parameters; unknown keys (including
    /// the legacy `alpha`) are accepted and ignored. `exp_approx` must be
    /// `false`: scores in exponentiated form are a contract violation.
    pub fn from_params(
        params: &BTreeMap<String, String>,
        exp_approx: bool,
    ) -> Result<Self, RankingError> {
        if exp_approx {
            return Err(RankingError::ExponentiatedApprox);
        }
        let _ = params;
        Ok(Self::new())
    }

    /// Override the shuffle-round count (mainly for convergence studies).
    pub fn with_iterations(mut self, iterations: u32) -> Self {
        self.iterations = iterations;
        self
    }

    /// Fix the random source. Derivatives become reproducible and identical
    /// between sequential and parallel dispatch; without a seed every task
    /// draws a fresh generator from OS entropy.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn iterations(&self) -> u32 {
        self.iterations
    }

    fn task_rng(&self, task_index: usize) -> StdRng {
        match self.seed {
            Some(seed) => {
                StdRng::seed_from_u64(seed ^ (task_index as u64).wrapping_mul(TASK_SEED_MIX))
            }
            None => StdRng::from_entropy(),
        }
    }

    /// Derivatives for one query, accumulated into the query's own slots.
    ///
    /// `ders` must hold exactly `query.len()` slots; slot `i` belongs to row
    /// `query.begin + i`. Slots are zeroed first, and a query with fewer
    /// than two candidates legitimately stays all-zero.
    pub fn compute_query_ders<R: Rng + ?Sized>(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        query: QueryInfo,
        ders: &mut [Ders],
        rng: &mut R,
    ) -> Result<(), RankingError> {
        assert_eq!(
            ders.len(),
            query.len(),
            "ders slice does not match query size"
        );
        ders.fill(Ders::default());

        let n = query.len();
        if n <= 1 {
            return Ok(());
        }

        let mut sample = extract_query(approx, target, size, query.begin, n);
        sample.sort_by(Example::by_approx);
        accumulate_shares(&mut sample)?;

        let weight = query.weight as f64;
        for _ in 0..self.iterations {
            sample.shuffle(rng);

            for i in 1..n {
                let mut a = sample[i - 1];
                let mut b = sample[i];
                if a.cum_target > b.cum_target {
                    std::mem::swap(&mut a, &mut b);
                }

                let delta_auc = (b.target - a.target) as f64 * b.size as f64
                    - (b.cum_target - a.cum_target) as f64 * (b.size - a.size) as f64;
                let delta_approx = a.approx - b.approx;

                let sigma = sigmoid(if delta_auc > 0.0 { delta_approx } else { -delta_approx });
                let delta_der = weight * sigma * sigma * delta_auc;

                ders[a.id as usize - query.begin].der1 -= delta_der;
                ders[b.id as usize - query.begin].der1 += delta_der;
            }
        }
        Ok(())
    }
}

impl ObjectiveFn for SizedAucLoss {
    /// Fan the estimator out over `[query_start, query_end)`.
    ///
    /// `ders` starts at row `queries[query_start].begin`. Query ranges never
    /// overlap, so each task owns a disjoint sub-slice and no locking is
    /// needed; results do not depend on how tasks interleave.
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
        assert!(
            query_start <= query_end && query_end <= queries.len(),
            "query range [{}, {}) out of bounds for {} queries",
            query_start,
            query_end,
            queries.len()
        );
        if query_start == query_end {
            return Ok(());
        }

        let offset = queries[query_start].begin;
        assert!(
            ders.len() >= queries[query_end - 1].end - offset,
            "ders buffer too short for the dispatched queries"
        );

        let mut tasks = Vec::with_capacity(query_end - query_start);
        let mut rest = ders;
        let mut cursor = offset;
        for (task_index, &query) in queries[query_start..query_end].iter().enumerate() {
            assert!(
                query.begin >= cursor,
                "queries must be sorted and non-overlapping"
            );
            let remaining = std::mem::take(&mut rest);
            let (_, tail) = remaining.split_at_mut(query.begin - cursor);
            let (chunk, tail) = tail.split_at_mut(query.len());
            rest = tail;
            cursor = query.end;
            tasks.push((task_index, query, chunk));
        }

        parallelism
            .maybe_par_map(tasks, |(task_index, query, chunk)| {
                let mut rng = self.task_rng(task_index);
                self.compute_query_ders(approx, target, size, query, chunk, &mut rng)
            })
            .into_iter()
            .collect()
    }

    fn compute_query_score(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        query: QueryInfo,
    ) -> Result<f64, RankingError> {
        let mut sample = extract_query(approx, target, size, query.begin, query.len());
        query_quality(&mut sample)
    }

    fn name(&self) -> &'static str {
        "sized_auc"
    }
}

// =============================================================================
// Tests
// =============================================================================
