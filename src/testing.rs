//! Synthetic ranking data for tests and benchmarks.

use rand::prelude::*;

use crate::data::QueryInfo;

/// Generate a random querywise dataset: `(approx, target, size)`.
///
/// Scores are uniform in `[-2, 2]`, targets in `[0, 3)`, sizes in
/// `[0.25, 2.25)`, so every query with at least one row has positive target
/// and size mass.
pub fn random_query_data(n_rows: usize, seed: u64) -> (Vec<f64>, Vec<f32>, Vec<f32>) {
    let mut rng = StdRng::seed_from_u64(seed);
    let approx = (0..n_rows).map(|_| rng.gen::<f64>() * 4.0 - 2.0).collect();
    let target = (0..n_rows)
        .map(|_| 0.1 + rng.gen::<f32>() * 2.9)
        .collect();
    let size = (0..n_rows)
        .map(|_| 0.25 + rng.gen::<f32>() * 2.0)
        .collect();
    (approx, target, size)
}

/// Cut `n_rows` into consecutive queries of `query_size` rows each (the last
/// query takes the remainder).
pub fn uniform_queries(n_rows: usize, query_size: usize, weight: f32) -> Vec<QueryInfo> {
    assert!(query_size > 0, "query_size must be positive");
    let mut queries = Vec::with_capacity(n_rows.div_ceil(query_size));
    let mut begin = 0;
    while begin < n_rows {
        let end = (begin + query_size).min(n_rows);
        queries.push(QueryInfo::new(begin, end, weight));
        begin = end;
    }
    queries
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data::validate_query_layout;

    #[test]
    fn generated_data_is_deterministic() {
        let (a1, t1, s1) = random_query_data(32, 9);
        let (a2, t2, s2) = random_query_data(32, 9);
        assert_eq!(a1, a2);
        assert_eq!(t1, t2);
        assert_eq!(s1, s2);
        assert!(t1.iter().all(|&t| t > 0.0));
        assert!(s1.iter().all(|&s| s > 0.0));
    }

    #[test]
    fn uniform_queries_partition_the_rows() {
        let queries = uniform_queries(10, 4, 1.0);
        assert_eq!(queries.len(), 3);
        assert_eq!(queries[2], QueryInfo::new(8, 10, 1.0));
        validate_query_layout(&queries, 10).unwrap();
    }
}
