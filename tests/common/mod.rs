//! Shared test utilities and fixture generators

use galton::pipeline::{DistributionBucket, HeightRecord};
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use tempfile::TempDir;

/// First four families of the Galton dataset, with the extra columns of the
/// published CSV (which the loader must ignore).
///
/// Known characteristics:
/// - 12 child records, 4 families
/// - father intervals (per family): 78 x1, 74 x3
/// - mother intervals (per family): 66 x2, 64 x2
/// - child intervals (per record): 64 x2, 68 x5, 70 x2, 72 x3
pub const SAMPLE_CSV: &str = "\
rownames,family,father,mother,midparentHeight,children,childNum,gender,childHeight
1,001,78.5,67,75.43,4,1,male,73.2
2,001,78.5,67,75.43,4,2,female,69.2
3,001,78.5,67,75.43,4,3,female,69
4,001,78.5,67,75.43,4,4,female,69
5,002,75.5,66.5,73.66,4,1,male,73.5
6,002,75.5,66.5,73.66,4,2,male,72.5
7,002,75.5,66.5,73.66,4,3,female,65.5
8,002,75.5,66.5,73.66,4,4,female,65.5
9,003,75,64,72.06,2,1,male,71
10,003,75,64,72.06,2,2,female,68
11,004,75,64,72.06,5,1,male,70.5
12,004,75,64,72.06,5,2,male,68.5
";

/// Write `contents` to `data.csv` inside a fresh temporary directory
pub fn create_temp_csv(contents: &str) -> (TempDir, PathBuf) {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("data.csv");
    std::fs::write(&csv_path, contents).unwrap();
    (temp_dir, csv_path)
}

/// Two families, three children; both fathers fall in the 70-72 interval.
pub fn worked_example() -> Vec<HeightRecord> {
    vec![
        HeightRecord::new("1", 70.0, 64.0, 68.0),
        HeightRecord::new("1", 70.0, 64.0, 66.0),
        HeightRecord::new("2", 71.0, 62.0, 70.0),
    ]
}

/// Random records with 1-4 children per family, realistic height ranges
pub fn random_records(families: usize, seed: u64) -> Vec<HeightRecord> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    let mut records = Vec::new();

    for family in 0..families {
        let father = rng.gen_range(62.0..79.0);
        let mother = rng.gen_range(58.0..71.0);
        for _ in 0..rng.gen_range(1..=4) {
            let child = rng.gen_range(56.0..80.0);
            records.push(HeightRecord::new(family.to_string(), father, mother, child));
        }
    }

    records
}

/// Assert the cumulative invariants: counts add up, running totals never
/// decrease, and the last percentage is 100
pub fn assert_valid_distribution(table: &[DistributionBucket], expected_total: usize) {
    assert!(!table.is_empty(), "Distribution should not be empty");

    let total: usize = table.iter().map(|b| b.count).sum();
    assert_eq!(total, expected_total, "Bin counts should sum to the input size");

    for pair in table.windows(2) {
        assert!(
            pair[0].lower_bound < pair[1].lower_bound,
            "Bins should be strictly ascending: {} then {}",
            pair[0].lower_bound,
            pair[1].lower_bound
        );
        assert!(pair[0].cumulative_count <= pair[1].cumulative_count);
        assert!(pair[0].cumulative_percentage <= pair[1].cumulative_percentage);
    }

    let last = table.last().unwrap();
    assert_eq!(last.cumulative_count, expected_total);
    assert!(
        (last.cumulative_percentage - 100.0).abs() < 1e-9,
        "Last cumulative percentage should be 100, got {}",
        last.cumulative_percentage
    );
}
