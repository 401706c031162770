//! Command-line argument definitions using clap

use clap::Parser;
use std::path::PathBuf;

use crate::pipeline::IntervalBinner;

/// Galton - interval statistics and charts for family height data
#[derive(Parser, Debug)]
#[command(name = "galton")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Input CSV with family, father, mother and childHeight columns
    #[arg(short, long, default_value = "GaltonFamilies.csv")]
    pub input: PathBuf,

    /// Directory the chart PNG files are written to
    #[arg(short, long, default_value = ".")]
    pub output_dir: PathBuf,

    /// Width of each height interval in inches
    #[arg(long, default_value = "2", value_parser = validate_interval_width)]
    pub interval_width: u32,

    /// Also write every aggregate table to this JSON file
    #[arg(long)]
    pub export: Option<PathBuf>,

    /// Compute and print statistics without rendering charts
    #[arg(long, default_value = "false")]
    pub no_plots: bool,

    /// Number of rows to use for schema inference.
    /// Use 0 for full table scan.
    #[arg(long, default_value = "10000")]
    pub infer_schema_length: usize,
}

impl Cli {
    /// Binner configured with the requested interval width.
    pub fn binner(&self) -> IntervalBinner {
        IntervalBinner::new(self.interval_width)
    }
}

/// Validator for interval_width parameter
fn validate_interval_width(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{}' is not a valid whole number", s))?;

    if value == 0 {
        Err("interval_width must be at least 1".to_string())
    } else {
        Ok(value)
    }
}
