//! Composition of the aggregate tables behind each chart
//!
//! Two source tables feed the statistics:
//! - every record (one per child) for the child distribution and for the mean
//!   child height grouped by father or mother interval;
//! - one record per family ([`unique_parents`]) for the father and mother
//!   distributions, so that parents with several children count once.

use serde::Serialize;

use super::aggregate::{bucket_means, cumulative_distribution, DistributionBucket, MeanBucket};
use super::binning::IntervalBinner;
use super::error::{Result, StatsError};
use super::records::{unique_parents, HeightRecord, ParentRecord};

/// All aggregate tables computed in a single run.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightAnalysis {
    pub interval_width: u32,
    /// Rows in the per-child table
    pub record_count: usize,
    /// Rows in the deduplicated parent table
    pub family_count: usize,
    /// Mean child height by father interval, over every record
    pub father_child_means: Vec<MeanBucket>,
    /// Mean child height by mother interval, over every record
    pub mother_child_means: Vec<MeanBucket>,
    /// Child height distribution, over every record
    pub child_distribution: Vec<DistributionBucket>,
    /// Father height distribution, one row per family
    pub father_distribution: Vec<DistributionBucket>,
    /// Mother height distribution, one row per family
    pub mother_distribution: Vec<DistributionBucket>,
}

/// Compute every table the charts and reports need.
///
/// Parents are deduplicated from `records` themselves.
///
/// # Errors
/// [`StatsError::EmptyDataset`] when `records` is empty.
pub fn analyze_heights(records: &[HeightRecord], binner: IntervalBinner) -> Result<HeightAnalysis> {
    analyze_with_parents(records, &unique_parents(records), binner)
}

/// Compute every table from child records and a separate per-family table.
///
/// Used with [`LoadReport::parents`](super::loader::LoadReport), which keeps
/// families whose rows have no usable child height.
///
/// # Errors
/// [`StatsError::EmptyDataset`] when `records` or `parents` is empty.
pub fn analyze_with_parents(
    records: &[HeightRecord],
    parents: &[ParentRecord],
    binner: IntervalBinner,
) -> Result<HeightAnalysis> {
    if records.is_empty() {
        return Err(StatsError::EmptyDataset(
            "no height records to analyze".to_string(),
        ));
    }

    let bin = |height: f64| binner.lower_bound(height);

    let father_child_means = bucket_means(records, bin, |r| r.child, |r| r.father);
    let mother_child_means = bucket_means(records, bin, |r| r.child, |r| r.mother);

    let child_distribution = cumulative_distribution(records, bin, |r| r.child)?;
    let father_distribution = cumulative_distribution(parents, bin, |p| p.father)?;
    let mother_distribution = cumulative_distribution(parents, bin, |p| p.mother)?;

    Ok(HeightAnalysis {
        interval_width: binner.width(),
        record_count: records.len(),
        family_count: parents.len(),
        father_child_means,
        mother_child_means,
        child_distribution,
        father_distribution,
        mother_distribution,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<HeightRecord> {
        vec![
            HeightRecord::new("1", 70.0, 64.0, 68.0),
            HeightRecord::new("1", 70.0, 64.0, 66.0),
            HeightRecord::new("2", 72.0, 62.0, 70.0),
        ]
    }

    #[test]
    fn test_parent_distribution_counts_families_once() {
        let analysis = analyze_heights(&sample(), IntervalBinner::default()).unwrap();

        assert_eq!(analysis.record_count, 3);
        assert_eq!(analysis.family_count, 2);

        let father_total: usize = analysis.father_distribution.iter().map(|b| b.count).sum();
        assert_eq!(father_total, 2);
        let child_total: usize = analysis.child_distribution.iter().map(|b| b.count).sum();
        assert_eq!(child_total, 3);
    }

    #[test]
    fn test_means_use_every_record() {
        let analysis = analyze_heights(&sample(), IntervalBinner::default()).unwrap();

        let seventy = &analysis.father_child_means[0];
        assert_eq!(seventy.lower_bound, 70);
        assert_eq!(seventy.count, 2);
        assert!((seventy.mean - 67.0).abs() < 1e-12);

        let mother_total: usize = analysis.mother_child_means.iter().map(|b| b.count).sum();
        assert_eq!(mother_total, 3);
    }

    #[test]
    fn test_separate_parent_table_feeds_parent_distributions() {
        let parents = vec![
            ParentRecord {
                family: "1".to_string(),
                father: 70.0,
                mother: 64.0,
            },
            ParentRecord {
                family: "9".to_string(),
                father: 74.0,
                mother: 60.0,
            },
        ];

        let analysis =
            analyze_with_parents(&sample()[..2], &parents, IntervalBinner::default()).unwrap();

        assert_eq!(analysis.record_count, 2);
        assert_eq!(analysis.family_count, 2);
        let fathers: Vec<(i64, usize)> = analysis
            .father_distribution
            .iter()
            .map(|b| (b.lower_bound, b.count))
            .collect();
        assert_eq!(fathers, vec![(70, 1), (74, 1)]);
        // Family 9 has no child records, so the means never see it
        assert_eq!(analysis.father_child_means.len(), 1);
    }

    #[test]
    fn test_empty_records_rejected() {
        let result = analyze_heights(&[], IntervalBinner::default());
        assert!(matches!(result, Err(StatsError::EmptyDataset(_))));
    }
}
