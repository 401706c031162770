//! Unit tests for the dataset loader

use galton::pipeline::{
    analyze_with_parents, get_column_names, load_records, load_records_with_report,
    unique_parents, IntervalBinner, StatsError,
};
use std::io::Write;
use tempfile::TempDir;

#[path = "common/mod.rs"]
mod common;

#[test]
fn test_load_sample_csv() {
    let (_temp_dir, csv_path) = common::create_temp_csv(common::SAMPLE_CSV);

    let records = load_records(&csv_path, 100).unwrap();

    assert_eq!(records.len(), 12, "Should load every data row");
    assert_eq!(records[0].father, 78.5);
    assert_eq!(records[0].mother, 67.0);
    assert_eq!(records[0].child, 73.2);
    assert_eq!(records[11].child, 68.5, "File order should be preserved");
}

#[test]
fn test_family_ids_are_strings() {
    let (_temp_dir, csv_path) = common::create_temp_csv(
        "family,father,mother,childHeight\n\
         136,68,64,70\n\
         136A,68.5,65,71\n\
         136A,68.5,65,69\n",
    );

    let records = load_records(&csv_path, 100).unwrap();
    let parents = unique_parents(&records);

    assert_eq!(parents.len(), 2, "136 and 136A are different families");
    assert_eq!(parents[1].family, "136A");
    assert_eq!(parents[1].father, 68.5);
}

#[test]
fn test_missing_required_column() {
    let (_temp_dir, csv_path) =
        common::create_temp_csv("family,father,mother\n1,70,64\n2,71,62\n");

    let err = load_records(&csv_path, 100).unwrap_err();

    match err {
        StatsError::MissingColumn { column, .. } => assert_eq!(column, "childHeight"),
        other => panic!("Expected MissingColumn, got {:?}", other),
    }
}

#[test]
fn test_nonexistent_file() {
    let path = std::path::Path::new("/nonexistent/path/to/GaltonFamilies.csv");

    let err = load_records(path, 100).unwrap_err();

    assert!(err.is_data_load(), "Nonexistent file should be a load error");
    assert!(err.to_string().contains("file not found"));
}

#[test]
fn test_header_only_file_is_empty_dataset() {
    let (_temp_dir, csv_path) = common::create_temp_csv("family,father,mother,childHeight\n");

    let result = load_records(&csv_path, 100);

    assert!(
        matches!(result, Err(StatsError::EmptyDataset(_))),
        "Header-only file should be an empty dataset, got {:?}",
        result
    );
}

#[test]
fn test_rows_with_missing_values_are_skipped() {
    let temp_dir = TempDir::new().unwrap();
    let csv_path = temp_dir.path().join("gaps.csv");

    let mut file = std::fs::File::create(&csv_path).unwrap();
    writeln!(file, "family,father,mother,childHeight").unwrap();
    writeln!(file, "1,70,64,68").unwrap();
    writeln!(file, "1,70,,66").unwrap(); // mother missing
    writeln!(file, "2,72,62,").unwrap(); // child missing
    writeln!(file, "3,69,63,67").unwrap();
    drop(file);

    let report = load_records_with_report(&csv_path, 100).unwrap();

    assert_eq!(report.records.len(), 2);
    assert_eq!(report.skipped_rows, 2);
    assert_eq!(report.records[1].family, "3");

    let families: Vec<&str> = report.parents.iter().map(|p| p.family.as_str()).collect();
    assert_eq!(families, vec!["1", "2", "3"], "Family 2 keeps its parents");
}

#[test]
fn test_family_without_child_height_counts_in_parent_distributions() {
    let (_temp_dir, csv_path) =
        common::create_temp_csv("family,father,mother,childHeight\n1,70,64,68\n2,74,60,\n");

    let report = load_records_with_report(&csv_path, 100).unwrap();
    let analysis =
        analyze_with_parents(&report.records, &report.parents, IntervalBinner::default())
            .unwrap();

    assert_eq!(analysis.record_count, 1);
    assert_eq!(analysis.family_count, 2);
    let fathers: Vec<(i64, usize)> = analysis
        .father_distribution
        .iter()
        .map(|b| (b.lower_bound, b.count))
        .collect();
    assert_eq!(fathers, vec![(70, 1), (74, 1)]);
}

#[test]
fn test_get_column_names() {
    let (_temp_dir, csv_path) = common::create_temp_csv(common::SAMPLE_CSV);

    let columns = get_column_names(&csv_path).unwrap();

    assert_eq!(columns.len(), 9);
    assert!(columns.contains(&"childHeight".to_string()));
    assert!(columns.contains(&"midparentHeight".to_string()));
}

#[test]
fn test_full_schema_scan() {
    let (_temp_dir, csv_path) = common::create_temp_csv(common::SAMPLE_CSV);

    let short = load_records(&csv_path, 2).unwrap();
    let full = load_records(&csv_path, 0).unwrap();

    assert_eq!(short, full, "Inference length should not change parsed records");
}
