//! Interval aggregation: per-bin means and cumulative distributions
//!
//! Both operations are generic over the record type so that the same code
//! serves the per-child table and the deduplicated per-family parent table.
//! Output tables are sparse (only observed bins) and sorted by ascending
//! interval lower bound.

use std::collections::BTreeMap;

use serde::Serialize;

use super::error::{Result, StatsError};

/// Mean of one value grouped by the interval of another.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MeanBucket {
    /// Lower bound of the grouping interval
    pub lower_bound: i64,
    /// Number of records in the interval
    pub count: usize,
    /// Arithmetic mean of the value field across those records
    pub mean: f64,
}

/// Frequency of one interval together with the running totals up to it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DistributionBucket {
    /// Lower bound of the interval
    pub lower_bound: i64,
    /// Records falling in this interval
    pub count: usize,
    /// Records falling in this or any lower interval
    pub cumulative_count: usize,
    /// `100 * cumulative_count / total`
    pub cumulative_percentage: f64,
}

/// Group `records` by `bin_fn(group_field(r))` and average `value_field` per group.
///
/// Returns one bucket per observed interval. An empty input yields an empty table.
pub fn bucket_means<R, B, V, G>(
    records: &[R],
    bin_fn: B,
    value_field: V,
    group_field: G,
) -> Vec<MeanBucket>
where
    B: Fn(f64) -> i64,
    V: Fn(&R) -> f64,
    G: Fn(&R) -> f64,
{
    // (count, sum) per interval; BTreeMap keeps bins ordered
    let mut groups: BTreeMap<i64, (usize, f64)> = BTreeMap::new();

    for record in records {
        let entry = groups.entry(bin_fn(group_field(record))).or_insert((0, 0.0));
        entry.0 += 1;
        entry.1 += value_field(record);
    }

    groups
        .into_iter()
        .map(|(lower_bound, (count, sum))| MeanBucket {
            lower_bound,
            count,
            mean: sum / count as f64,
        })
        .collect()
}

/// Frequency table of `bin_fn(field(r))` with cumulative counts and percentages.
///
/// The running sum is taken over the same ascending table that is returned, so
/// the final row always reaches `total` and 100 percent.
///
/// # Errors
/// [`StatsError::EmptyDataset`] when `records` is empty, since percentages are
/// undefined for a zero total.
pub fn cumulative_distribution<R, B, F>(
    records: &[R],
    bin_fn: B,
    field: F,
) -> Result<Vec<DistributionBucket>>
where
    B: Fn(f64) -> i64,
    F: Fn(&R) -> f64,
{
    if records.is_empty() {
        return Err(StatsError::EmptyDataset(
            "cannot compute a cumulative distribution over zero records".to_string(),
        ));
    }

    let mut counts: BTreeMap<i64, usize> = BTreeMap::new();
    for record in records {
        *counts.entry(bin_fn(field(record))).or_insert(0) += 1;
    }

    let total = records.len() as f64;
    let mut cumulative_count = 0usize;

    let table = counts
        .into_iter()
        .map(|(lower_bound, count)| {
            cumulative_count += count;
            DistributionBucket {
                lower_bound,
                count,
                cumulative_count,
                // Multiply first: 100 * n / n is exact in f64
                cumulative_percentage: 100.0 * cumulative_count as f64 / total,
            }
        })
        .collect();

    Ok(table)
}
