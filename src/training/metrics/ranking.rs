//! Sized ROC-AUC quality metric.

use crate::data::QueryInfo;
use crate::training::sized_auc::{extract_query, query_quality};
use crate::training::RankingError;

use super::MetricFn;

/// Per-query ratio of the achieved weighted AUC to the ideal weighted AUC.
///
/// A query whose approx ordering already matches the ideal ordering scores
/// exactly 1. The score is required to be strictly positive; anything else
/// indicates a degenerate query and aborts evaluation.
#[derive(Debug, Clone, Copy, Default)]
pub struct SizedAucMetric;

impl MetricFn for SizedAucMetric {
    fn eval_queries(
        &self,
        approx: &[f64],
        target: &[f32],
        size: &[f32],
        queries: &[QueryInfo],
        query_begin: usize,
        query_end: usize,
    ) -> Result<Vec<f64>, RankingError> {
        assert!(
            query_begin <= query_end && query_end <= queries.len(),
            "query range [{}, {}) out of bounds for {} queries",
            query_begin,
            query_end,
            queries.len()
        );

        let mut scores = Vec::with_capacity(query_end - query_begin);
        for query in &queries[query_begin..query_end] {
            let mut sample = extract_query(approx, target, size, query.begin, query.len());
            let score = query_quality(&mut sample)?;
            if score <= 0.0 {
                return Err(RankingError::NonPositiveScore {
                    offset: query.begin,
                    score,
                });
            }
            scores.push(score);
        }
        Ok(scores)
    }

    fn higher_is_better(&self) -> bool {
        true
    }

    fn name(&self) -> &'static str {
        "sized_auc"
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn perfect_orderings_score_one() {
        let approx = [0.0, 1.0, 2.0, 5.0, 6.0];
        let target = [0.0f32, 1.0, 2.0, 1.0, 4.0];
        let size = [1.0f32, 1.0, 1.0, 1.0, 1.0];
        let queries = [QueryInfo::new(0, 3, 1.0), QueryInfo::new(3, 5, 1.0)];

        let metric = SizedAucMetric;
        let scores = metric
            .eval_queries(&approx, &target, &size, &queries, 0, 2)
            .unwrap();
        assert_eq!(scores.len(), 2);
        approx::assert_abs_diff_eq!(scores[0], 1.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(scores[1], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn misordered_query_departs_from_one() {
        // Reversed scores relative to target/size quality.
        let approx = [2.0, 1.0, 0.0];
        let target = [0.0f32, 1.0, 2.0];
        let size = [1.0f32, 1.0, 1.0];
        let queries = [QueryInfo::new(0, 3, 1.0)];

        let scores = SizedAucMetric
            .eval_queries(&approx, &target, &size, &queries, 0, 1)
            .unwrap();
        assert!((scores[0] - 1.0).abs() > 1e-3);
        assert!(scores[0] > 0.0);
    }

    #[test]
    fn size_scaling_leaves_scores_unchanged() {
        let approx = [0.4, 2.0, 1.1, 0.9];
        let target = [1.0f32, 3.0, 0.5, 2.0];
        let size = [1.0f32, 0.5, 2.0, 1.0];
        let scaled: Vec<f32> = size.iter().map(|s| s * 4.0).collect();
        let queries = [QueryInfo::new(0, 4, 1.0)];

        let metric = SizedAucMetric;
        let base = metric
            .eval_queries(&approx, &target, &size, &queries, 0, 1)
            .unwrap();
        let rescaled = metric
            .eval_queries(&approx, &target, &scaled, &queries, 0, 1)
            .unwrap();
        approx::assert_relative_eq!(base[0], rescaled[0], max_relative = 1e-5);
    }

    #[test]
    fn zero_size_mass_fails_with_attribution() {
        let approx = [0.0, 1.0, 2.0, 3.0];
        let target = [1.0f32, 1.0, 1.0, 1.0];
        let size = [1.0f32, 1.0, 0.0, 0.0];
        let queries = [QueryInfo::new(0, 2, 1.0), QueryInfo::new(2, 4, 1.0)];

        let err = SizedAucMetric
            .eval_queries(&approx, &target, &size, &queries, 0, 2)
            .unwrap_err();
        assert_eq!(err, RankingError::ZeroSizeTotal { offset: 2 });
    }
}
