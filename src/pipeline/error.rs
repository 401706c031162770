//! Error types for loading, aggregating and rendering height statistics.

use std::path::PathBuf;

use thiserror::Error;

/// Errors raised by the statistics pipeline and its reports.
///
/// None of these are recovered internally; the first failure aborts the run.
#[derive(Error, Debug)]
pub enum StatsError {
    /// The input file is missing, unreadable or not valid CSV.
    #[error("Failed to load dataset {}: {message}", path.display())]
    DataLoad { path: PathBuf, message: String },

    /// A required column is absent from the input file.
    #[error("Required column '{column}' not found in {}", path.display())]
    MissingColumn { path: PathBuf, column: String },

    /// No records were available for a computation that needs at least one.
    #[error("Empty dataset: {0}")]
    EmptyDataset(String),

    /// A chart could not be drawn or written to disk.
    #[error("Failed to render chart {}: {message}", path.display())]
    Render { path: PathBuf, message: String },

    /// The JSON export could not be serialized or written.
    #[error("Failed to export statistics to {}: {message}", path.display())]
    Export { path: PathBuf, message: String },
}

impl StatsError {
    pub(crate) fn data_load(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::DataLoad {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn render(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::Render {
            path: path.into(),
            message: message.to_string(),
        }
    }

    /// True for the error kinds that describe a bad input file.
    pub fn is_data_load(&self) -> bool {
        matches!(self, Self::DataLoad { .. } | Self::MissingColumn { .. })
    }
}

pub type Result<T> = std::result::Result<T, StatsError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_missing_column_is_a_load_error() {
        let err = StatsError::MissingColumn {
            path: PathBuf::from("data.csv"),
            column: "father".to_string(),
        };
        assert!(err.is_data_load());
        assert!(err.to_string().contains("'father'"));
    }

    #[test]
    fn test_render_error_names_path() {
        let err = StatsError::render("out/chart.png", "disk full");
        assert!(!err.is_data_load());
        assert_eq!(
            err.to_string(),
            "Failed to render chart out/chart.png: disk full"
        );
    }
}
