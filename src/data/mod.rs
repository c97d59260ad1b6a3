//! Query metadata for grouped (querywise) ranking data.
//!
//! A ranking dataset is three flat, equal-length arrays (`approx`, `target`,
//! `size`) plus a list of [`QueryInfo`] records describing how consecutive
//! rows group into queries. Query ranges never overlap and are sorted by
//! `begin`; together they partition the row range they cover.

use thiserror::Error;

/// One group of candidates ranked together as a single list.
///
/// `begin..end` is a half-open row range into the flat dataset arrays.
/// `weight` scales every gradient contribution from this query.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct QueryInfo {
    pub begin: usize,
    pub end: usize,
    pub weight: f32,
}

impl QueryInfo {
    pub fn new(begin: usize, end: usize, weight: f32) -> Self {
        Self { begin, end, weight }
    }

    /// Number of candidates in the query.
    #[inline]
    pub fn len(&self) -> usize {
        self.end - self.begin
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.end <= self.begin
    }
}

/// Malformed query metadata.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueryLayoutError {
    /// A query's range is empty or reversed.
    #[error("query {index} has begin {begin} >= end {end}")]
    EmptyRange { index: usize, begin: usize, end: usize },

    /// Queries must be sorted by `begin` and must not share rows.
    #[error("query {index} starts at {begin}, before query {prev_index} ends at {prev_end}")]
    Overlapping {
        index: usize,
        begin: usize,
        prev_index: usize,
        prev_end: usize,
    },

    /// A query extends past the dataset arrays.
    #[error("query {index} ends at {end} but the dataset has {n_rows} rows")]
    OutOfBounds { index: usize, end: usize, n_rows: usize },
}

/// Check that `queries` are non-empty ranges, sorted by `begin`,
/// non-overlapping, and within `n_rows`.
///
/// Hosts should run this once when assembling a dataset. The computation
/// entry points assume a valid layout and do not re-check it.
pub fn validate_query_layout(queries: &[QueryInfo], n_rows: usize) -> Result<(), QueryLayoutError> {
    let mut prev_end = 0usize;
    let mut prev_index = 0usize;

    for (index, query) in queries.iter().enumerate() {
        if query.is_empty() {
            return Err(QueryLayoutError::EmptyRange {
                index,
                begin: query.begin,
                end: query.end,
            });
        }
        if index > 0 && query.begin < prev_end {
            return Err(QueryLayoutError::Overlapping {
                index,
                begin: query.begin,
                prev_index,
                prev_end,
            });
        }
        if query.end > n_rows {
            return Err(QueryLayoutError::OutOfBounds {
                index,
                end: query.end,
                n_rows,
            });
        }
        prev_end = query.end;
        prev_index = index;
    }
    Ok(())
}
