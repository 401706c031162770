//! JSON export of the aggregate tables

use std::path::Path;

use chrono::Utc;
use serde::Serialize;

use crate::pipeline::{HeightAnalysis, Result, StatsError};

/// Metadata about the run that produced the tables
#[derive(Serialize)]
pub struct ExportMetadata {
    /// Timestamp of the run (RFC 3339)
    pub timestamp: String,
    /// Galton crate version
    pub galton_version: String,
    /// Input file path
    pub input_file: String,
    /// Rows dropped while loading
    pub skipped_rows: usize,
}

/// Complete export: metadata plus every aggregate table
#[derive(Serialize)]
pub struct StatisticsExport<'a> {
    pub metadata: ExportMetadata,
    /// Tables are flattened next to the metadata
    #[serde(flatten)]
    pub analysis: &'a HeightAnalysis,
}

/// Write the aggregate tables to a pretty-printed JSON file.
///
/// # Arguments
/// * `analysis` - Tables computed for this run
/// * `input_file` - Dataset the tables were computed from
/// * `skipped_rows` - Rows the loader could not use
/// * `output_path` - Destination JSON file
pub fn export_statistics(
    analysis: &HeightAnalysis,
    input_file: &Path,
    skipped_rows: usize,
    output_path: &Path,
) -> Result<()> {
    let export = StatisticsExport {
        metadata: ExportMetadata {
            timestamp: Utc::now().to_rfc3339(),
            galton_version: env!("CARGO_PKG_VERSION").to_string(),
            input_file: input_file.display().to_string(),
            skipped_rows,
        },
        analysis,
    };

    let json = serde_json::to_string_pretty(&export).map_err(|e| StatsError::Export {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })?;

    std::fs::write(output_path, json).map_err(|e| StatsError::Export {
        path: output_path.to_path_buf(),
        message: e.to_string(),
    })?;

    Ok(())
}
