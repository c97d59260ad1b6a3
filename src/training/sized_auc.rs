//! Sized ROC-AUC primitives shared by the ranking objective and metric.
//!
//! A query's candidates are scored by a weighted area-under-curve statistic:
//! walking the list in a given order, each candidate contributes its `size`
//! scaled by the target mass accumulated so far. Comparing the AUC of the
//! model's ordering against the best-achievable ordering yields a per-query
//! quality ratio; the same cumulative shares drive the randomized pairwise
//! gradient estimator in [`objectives`](crate::training::objectives).

use std::cmp::Ordering;

use super::RankingError;

// =============================================================================
// Example
// =============================================================================

/// One scored candidate of a query, self-contained for sorting.
///
/// `id` is the global row index into the dataset arrays and stays stable
/// across reorderings. `cum_target`/`cum_size` are normalized running shares
/// filled in by [`accumulate_shares`]; they are meaningful only in the
/// ordering under which they were computed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Example {
    pub id: u32,
    pub approx: f64,
    pub target: f32,
    pub size: f32,
    pub cum_target: f32,
    pub cum_size: f32,
}

impl Example {
    pub fn new(id: u32, approx: f64, target: f32, size: f32) -> Self {
        Self {
            id,
            approx,
            target,
            size,
            cum_target: 0.0,
            cum_size: 0.0,
        }
    }

    /// Model-order comparator: ascending `approx`, ties broken by
    /// descending `size`.
    pub fn by_approx(a: &Example, b: &Example) -> Ordering {
        match a.approx.partial_cmp(&b.approx) {
            Some(Ordering::Equal) | None => {
                b.size.partial_cmp(&a.size).unwrap_or(Ordering::Equal)
            }
            Some(order) => order,
        }
    }

    /// Ideal-order comparator: ascending target mass per unit size,
    /// compared via cross-multiplication so zero sizes need no division.
    pub fn by_target_share(a: &Example, b: &Example) -> Ordering {
        (a.target * b.size)
            .partial_cmp(&(b.target * a.size))
            .unwrap_or(Ordering::Equal)
    }
}

// =============================================================================
// Extraction and Cumulative Shares
// =============================================================================

/// Copy one query's candidates out of the flat dataset arrays.
///
/// Produces `query_size` examples with `id = offset + local_index`, in row
/// order, without filtering.
///
/// # Panics
///
/// Panics if the arrays disagree in length or the range extends past them;
/// the query layout is a caller contract.
pub fn extract_query(
    approx: &[f64],
    target: &[f32],
    size: &[f32],
    offset: usize,
    query_size: usize,
) -> Vec<Example> {
    assert!(
        approx.len() == target.len() && target.len() == size.len(),
        "dataset arrays disagree in length: approx {}, target {}, size {}",
        approx.len(),
        target.len(),
        size.len()
    );
    assert!(
        offset + query_size <= approx.len(),
        "query [{}, {}) extends past the {} dataset rows",
        offset,
        offset + query_size,
        approx.len()
    );

    (offset..offset + query_size)
        .map(|id| Example::new(id as u32, approx[id], target[id], size[id]))
        .collect()
}

/// Fill `cum_target` and `cum_size` with normalized running shares over the
/// sample's current order.
///
/// Each slot holds the running sum up to and including itself, divided by
/// the grand total, so both sequences are non-decreasing and end at exactly
/// one. `approx`, `target`, `size` and `id` are left untouched.
pub fn accumulate_shares(sample: &mut [Example]) -> Result<(), RankingError> {
    let offset = sample.first().map_or(0, |e| e.id as usize);

    let mut sum_targets = 0.0f32;
    let mut sum_sizes = 0.0f32;
    for example in sample.iter_mut() {
        sum_targets += example.target;
        example.cum_target = sum_targets;
        sum_sizes += example.size;
        example.cum_size = sum_sizes;
    }

    if sum_targets <= 0.0 {
        return Err(RankingError::ZeroTargetTotal { offset });
    }
    if sum_sizes <= 0.0 {
        return Err(RankingError::ZeroSizeTotal { offset });
    }

    for example in sample.iter_mut() {
        example.cum_target /= sum_targets;
        example.cum_size /= sum_sizes;
    }
    Ok(())
}

// =============================================================================
// Weighted AUC and Query Quality
// =============================================================================

/// Weighted AUC of the sample in its current order.
///
/// `auc = sum_i(size_i * running_target_sum_i) / (total_size * total_target)`
/// with the running target sum taken up to and including position `i`. The
/// running sums are computed inline; the normalized shares from
/// [`accumulate_shares`] are not consulted.
pub fn weighted_auc(sample: &[Example]) -> Result<f64, RankingError> {
    let offset = sample.first().map_or(0, |e| e.id as usize);

    let mut sum_sizes = 0.0f64;
    let mut sum_targets = 0.0f64;
    let mut auc = 0.0f64;
    for example in sample {
        sum_sizes += example.size as f64;
        sum_targets += example.target as f64;
        auc += example.size as f64 * sum_targets;
    }

    if sum_targets <= 0.0 {
        return Err(RankingError::ZeroTargetTotal { offset });
    }
    if sum_sizes <= 0.0 {
        return Err(RankingError::ZeroSizeTotal { offset });
    }
    Ok(auc / sum_sizes / sum_targets)
}

/// Quality of the model's ordering relative to the best achievable ordering.
///
/// Sorts the sample by [`Example::by_approx`], scores it, re-sorts by
/// [`Example::by_target_share`], scores again, and returns the ratio. A model
/// whose ordering matches the ideal ordering scores exactly 1.
///
/// The sample is left in ideal order afterwards.
pub fn query_quality(sample: &mut [Example]) -> Result<f64, RankingError> {
    let offset = sample.first().map_or(0, |e| e.id as usize);

    sample.sort_by(Example::by_approx);
    let achieved = weighted_auc(sample)?;

    sample.sort_by(Example::by_target_share);
    let ideal = weighted_auc(sample)?;

    if ideal == 0.0 {
        return Err(RankingError::ZeroIdealAuc { offset });
    }
    Ok(achieved / ideal)
}

// =============================================================================
// Logistic Response
// =============================================================================

/// Logistic response `1 / (1 + e^-delta)`, saturated to exactly 1 above +16
/// and exactly 0 below -16.
#[inline]
pub fn sigmoid(delta: f64) -> f64 {
    if delta > 16.0 {
        1.0
    } else if delta < -16.0 {
        0.0
    } else {
        1.0 / (1.0 + (-delta).exp())
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_from(approx: &[f64], target: &[f32], size: &[f32]) -> Vec<Example> {
        extract_query(approx, target, size, 0, approx.len())
    }

    #[test]
    fn extraction_copies_fields_and_offsets_ids() {
        let approx = [0.1, 0.2, 0.3, 0.4];
        let target = [1.0f32, 2.0, 3.0, 4.0];
        let size = [4.0f32, 3.0, 2.0, 1.0];

        let sample = extract_query(&approx, &target, &size, 1, 2);
        assert_eq!(sample.len(), 2);
        assert_eq!(sample[0].id, 1);
        assert_eq!(sample[1].id, 2);
        assert_eq!(sample[0].approx, 0.2);
        assert_eq!(sample[0].target, 2.0);
        assert_eq!(sample[0].size, 3.0);
    }

    #[test]
    #[should_panic(expected = "extends past")]
    fn extraction_out_of_range_panics() {
        let approx = [0.1, 0.2];
        let target = [1.0f32, 1.0];
        let size = [1.0f32, 1.0];
        extract_query(&approx, &target, &size, 1, 2);
    }

    #[test]
    fn shares_end_at_one_and_are_non_decreasing() {
        let mut sample = sample_from(
            &[0.5, 0.1, 0.9],
            &[1.0, 2.0, 3.0],
            &[2.0, 1.0, 1.0],
        );
        accumulate_shares(&mut sample).unwrap();

        approx::assert_abs_diff_eq!(sample[2].cum_target, 1.0, epsilon = 1e-6);
        approx::assert_abs_diff_eq!(sample[2].cum_size, 1.0, epsilon = 1e-6);
        for pair in sample.windows(2) {
            assert!(pair[0].cum_target <= pair[1].cum_target);
            assert!(pair[0].cum_size <= pair[1].cum_size);
        }
        // Untouched fields.
        assert_eq!(sample[1].approx, 0.1);
        assert_eq!(sample[1].target, 2.0);
        assert_eq!(sample[1].id, 1);
    }

    #[test]
    fn shares_fail_on_zero_target_mass() {
        let mut sample = sample_from(&[0.5, 0.1], &[0.0, 0.0], &[1.0, 1.0]);
        assert_eq!(
            accumulate_shares(&mut sample),
            Err(RankingError::ZeroTargetTotal { offset: 0 })
        );
    }

    #[test]
    fn approx_comparator_breaks_ties_by_size() {
        let mut sample = sample_from(&[1.0, 1.0, 0.5], &[1.0, 1.0, 1.0], &[1.0, 2.0, 3.0]);
        sample.sort_by(Example::by_approx);
        assert_eq!(sample[0].id, 2); // smallest approx first
        assert_eq!(sample[1].id, 1); // then the larger size among the tie
        assert_eq!(sample[2].id, 0);
    }

    #[test]
    fn target_share_comparator_handles_zero_size() {
        // target/size ratios: 1/1, 1/0, 2/1. Cross-products rank the
        // zero-size example past every finite ratio without dividing.
        let mut sample = sample_from(&[0.0, 0.0, 0.0], &[1.0, 1.0, 2.0], &[1.0, 0.0, 1.0]);
        sample.sort_by(Example::by_target_share);
        let ids: Vec<u32> = sample.iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![0, 2, 1]);
    }

    #[test]
    fn weighted_auc_matches_hand_computation() {
        // Order as given: cum targets 1, 3, 6; sizes 2, 1, 1.
        // numerator = 2*1 + 1*3 + 1*6 = 11; totals 4 and 6.
        let sample = sample_from(&[0.0, 0.0, 0.0], &[1.0, 2.0, 3.0], &[2.0, 1.0, 1.0]);
        let auc = weighted_auc(&sample).unwrap();
        approx::assert_abs_diff_eq!(auc, 11.0 / 24.0, epsilon = 1e-9);
    }

    #[test]
    fn perfectly_ordered_query_scores_one() {
        let mut sample = sample_from(&[0.0, 1.0, 2.0], &[0.0, 1.0, 2.0], &[1.0, 1.0, 1.0]);
        let score = query_quality(&mut sample).unwrap();
        approx::assert_abs_diff_eq!(score, 1.0, epsilon = 1e-6);
    }

    #[test]
    fn quality_is_invariant_under_size_scaling() {
        let approx = [0.3, 1.7, 0.9, 0.2];
        let target = [2.0f32, 0.5, 1.0, 3.0];
        let size = [1.0f32, 2.0, 0.5, 1.5];
        let scaled: Vec<f32> = size.iter().map(|s| s * 2.5).collect();

        let mut base = sample_from(&approx, &target, &size);
        let mut scaled_sample = sample_from(&approx, &target, &scaled);

        let lhs = query_quality(&mut base).unwrap();
        let rhs = query_quality(&mut scaled_sample).unwrap();
        approx::assert_relative_eq!(lhs, rhs, max_relative = 1e-5);
    }

    #[test]
    fn degenerate_ideal_auc_is_an_error() {
        // All size mass sits on the zero-target candidate, so the ideal
        // ordering accumulates no area at all.
        let mut sample = sample_from(&[0.0, 1.0], &[0.0, 1.0], &[1.0, 0.0]);
        assert_eq!(
            query_quality(&mut sample),
            Err(RankingError::ZeroIdealAuc { offset: 0 })
        );
    }

    #[test]
    fn sigmoid_saturates_outside_sixteen() {
        assert_eq!(sigmoid(17.0), 1.0);
        assert_eq!(sigmoid(-17.0), 0.0);
        approx::assert_abs_diff_eq!(sigmoid(0.0), 0.5, epsilon = 1e-12);
        assert!(sigmoid(2.0) > 0.5 && sigmoid(2.0) < 1.0);
    }
}
