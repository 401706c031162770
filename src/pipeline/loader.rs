//! Dataset loader for the families CSV

use std::collections::HashSet;
use std::path::Path;
use std::sync::Arc;

use polars::prelude::*;

use super::error::{Result, StatsError};
use super::records::{HeightRecord, ParentRecord};

/// Family identifier column.
pub const FAMILY_COLUMN: &str = "family";
/// Father height column.
pub const FATHER_COLUMN: &str = "father";
/// Mother height column.
pub const MOTHER_COLUMN: &str = "mother";
/// Child height column.
pub const CHILD_COLUMN: &str = "childHeight";

/// Columns that must be present in the input; any others are ignored.
pub const REQUIRED_COLUMNS: [&str; 4] = [FAMILY_COLUMN, FATHER_COLUMN, MOTHER_COLUMN, CHILD_COLUMN];

/// Records read from a file plus the rows that could not be used.
#[derive(Debug, Clone)]
pub struct LoadReport {
    pub records: Vec<HeightRecord>,
    /// First row per family with usable parent heights, in file order.
    ///
    /// A family still appears here when none of its rows has a usable child
    /// height.
    pub parents: Vec<ParentRecord>,
    /// Rows with a missing family id, or a missing, non-finite or negative height
    pub skipped_rows: usize,
}

/// Load height records from a CSV file, in file order.
pub fn load_records(path: &Path, infer_schema_length: usize) -> Result<Vec<HeightRecord>> {
    load_records_with_report(path, infer_schema_length).map(|report| report.records)
}

/// Load height records and report how many rows were skipped.
///
/// # Arguments
/// * `path` - CSV file with at least the [`REQUIRED_COLUMNS`]
/// * `infer_schema_length` - Rows used for type inference (0 scans the whole file)
///
/// # Errors
/// * [`StatsError::DataLoad`] if the file is missing or cannot be parsed
/// * [`StatsError::MissingColumn`] if a required column is absent
/// * [`StatsError::EmptyDataset`] if no usable rows remain
pub fn load_records_with_report(path: &Path, infer_schema_length: usize) -> Result<LoadReport> {
    if !path.is_file() {
        return Err(StatsError::data_load(path, "file not found"));
    }

    let schema = scan_csv(path, infer_schema_length, None)?
        .collect_schema()
        .map_err(|e| StatsError::data_load(path, e))?;
    for column in REQUIRED_COLUMNS {
        if schema.get(column).is_none() {
            return Err(StatsError::MissingColumn {
                path: path.to_path_buf(),
                column: column.to_string(),
            });
        }
    }

    // Ids such as "001" must stay strings, and heights such as "67" must not
    // be inferred as integers when later rows hold "66.5"
    let mut dtypes = Schema::default();
    dtypes.with_column(FAMILY_COLUMN.into(), DataType::String);
    for column in [FATHER_COLUMN, MOTHER_COLUMN, CHILD_COLUMN] {
        dtypes.with_column(column.into(), DataType::Float64);
    }

    let df = scan_csv(path, infer_schema_length, Some(Arc::new(dtypes)))?
        .select([
            col(FAMILY_COLUMN).cast(DataType::String),
            col(FATHER_COLUMN).cast(DataType::Float64),
            col(MOTHER_COLUMN).cast(DataType::Float64),
            col(CHILD_COLUMN).cast(DataType::Float64),
        ])
        .collect()
        .map_err(|e| StatsError::data_load(path, e))?;

    let report = records_from_frame(&df).map_err(|e| StatsError::data_load(path, e))?;

    if report.records.is_empty() {
        return Err(StatsError::EmptyDataset(format!(
            "{} contains no usable rows ({} skipped)",
            path.display(),
            report.skipped_rows
        )));
    }

    Ok(report)
}

/// Get column names from the CSV header
pub fn get_column_names(path: &Path) -> Result<Vec<String>> {
    let schema = scan_csv(path, 100, None)?
        .collect_schema()
        .map_err(|e| StatsError::data_load(path, e))?;

    Ok(schema.iter_names().map(|name| name.to_string()).collect())
}

fn scan_csv(
    path: &Path,
    infer_schema_length: usize,
    dtype_overwrite: Option<SchemaRef>,
) -> Result<LazyFrame> {
    // 0 means full table scan
    let schema_length = if infer_schema_length == 0 {
        None
    } else {
        Some(infer_schema_length)
    };

    LazyCsvReader::new(path)
        .with_infer_schema_length(schema_length)
        .with_dtype_overwrite(dtype_overwrite)
        .finish()
        .map_err(|e| StatsError::data_load(path, e))
}

/// Convert a frame with the four required columns into records.
fn records_from_frame(df: &DataFrame) -> PolarsResult<LoadReport> {
    let family = df.column(FAMILY_COLUMN)?.str()?;
    let father = df.column(FATHER_COLUMN)?.f64()?;
    let mother = df.column(MOTHER_COLUMN)?.f64()?;
    let child = df.column(CHILD_COLUMN)?.f64()?;

    let mut records = Vec::with_capacity(df.height());
    let mut parents = Vec::new();
    let mut seen_families: HashSet<&str> = HashSet::new();
    let mut skipped_rows = 0;

    let rows = family
        .into_iter()
        .zip(father.into_iter())
        .zip(mother.into_iter())
        .zip(child.into_iter());

    for (((family, father), mother), child) in rows {
        if let (Some(family), Some(father), Some(mother)) = (family, father, mother) {
            if is_valid_height(father) && is_valid_height(mother) && seen_families.insert(family) {
                parents.push(ParentRecord {
                    family: family.to_string(),
                    father,
                    mother,
                });
            }
        }

        match (family, father, mother, child) {
            (Some(family), Some(father), Some(mother), Some(child))
                if is_valid_height(father) && is_valid_height(mother) && is_valid_height(child) =>
            {
                records.push(HeightRecord::new(family, father, mother, child));
            }
            _ => skipped_rows += 1,
        }
    }

    Ok(LoadReport {
        records,
        parents,
        skipped_rows,
    })
}

fn is_valid_height(value: f64) -> bool {
    value.is_finite() && value >= 0.0
}
