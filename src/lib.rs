//! queryrank: querywise ranking quality and gradients for gradient boosting.
//!
//! Candidates arrive grouped into queries over flat `approx`/`target`/`size`
//! arrays. For each query this crate computes:
//!
//! - a quality score comparing the model's ordering against the best
//!   achievable ordering by a size-weighted AUC ([`SizedAucMetric`]), and
//! - approximate per-candidate first-order derivatives of that quality
//!   measure, via randomized adjacent-pair sampling ([`SizedAucLoss`]),
//!   for consumption by an external boosting optimizer.
//!
//! # Key Types
//!
//! - [`RankingObjective`] / [`RankingMetric`] - name-keyed selection
//! - [`QueryInfo`] - per-query row range and weight
//! - [`DerivativeBuffer`] / [`Ders`] - caller-owned derivative slots
//! - [`Parallelism`] - injected parallel-execution capability
//!
//! # Example
//!
//! ```
//! use queryrank::{DerivativeBuffer, ObjectiveFn, Parallelism, QueryInfo, SizedAucLoss};
//!
//! let approx = vec![0.2, 1.4, 0.7, 2.0];
//! let target = vec![1.0f32, 2.0, 0.5, 3.0];
//! let size = vec![1.0f32, 1.0, 2.0, 1.0];
//! let queries = vec![QueryInfo::new(0, 4, 1.0)];
//!
//! let objective = SizedAucLoss::new().with_seed(42);
//! let mut ders = DerivativeBuffer::new(approx.len());
//! objective
//!     .compute_ders_for_queries(
//!         0, 1, &approx, &target, &size, &queries,
//!         ders.as_mut_slice(), Parallelism::Sequential,
//!     )
//!     .unwrap();
//!
//! let score = objective
//!     .compute_query_score(&approx, &target, &size, queries[0])
//!     .unwrap();
//! assert!(score > 0.0);
//! ```

// Re-export approx traits for users who want to compare computed values
pub use approx;

pub mod data;
pub mod testing;
pub mod training;
pub mod utils;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use data::{validate_query_layout, QueryInfo, QueryLayoutError};

pub use training::{
    DerivativeBuffer, Ders, Evaluator, MetricFn, MetricValue, ObjectiveFn, RankingError,
    RankingMetric, RankingObjective, SizedAucLoss, SizedAucMetric, TrainingLogger, Verbosity,
    DEFAULT_ITERATIONS,
};

pub use utils::{run_with_threads, Parallelism};
