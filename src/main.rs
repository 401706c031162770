//! Galton: Family Height Statistics CLI
//!
//! Loads the families dataset, bins parent and child heights into fixed-width
//! intervals and writes bar charts and ogives of the resulting distributions.

mod cli;
mod pipeline;
mod report;
mod utils;

use std::time::Instant;

use anyhow::{Context, Result};
use clap::Parser;
use console::style;

use cli::Cli;
use pipeline::{analyze_with_parents, get_column_names, load_records_with_report, StatsError};
use report::{export_statistics, render_all, StatisticsSummary};
use utils::{
    create_spinner, finish_with_success, finish_with_warning, print_banner, print_completion,
    print_config, print_count, print_info, print_step_header, print_step_time, print_success,
};

fn main() -> Result<()> {
    let cli = Cli::parse();
    let binner = cli.binner();

    // Print styled banner
    print_banner(env!("CARGO_PKG_VERSION"));

    // Print configuration card
    print_config(
        &cli.input,
        &cli.output_dir,
        binner.width(),
        cli.export.as_deref(),
    );

    // Step 1: Load dataset
    print_step_header(1, "Load Dataset");

    let step_start = Instant::now();
    let spinner = create_spinner("Reading CSV...");
    let load = match load_records_with_report(&cli.input, cli.infer_schema_length) {
        Ok(load) => load,
        Err(err) => {
            finish_with_warning(&spinner, "Dataset could not be loaded");
            if let StatsError::MissingColumn { .. } = err {
                if let Ok(columns) = get_column_names(&cli.input) {
                    print_info(&format!("Available columns: {}", columns.join(", ")));
                }
            }
            return Err(err.into());
        }
    };
    finish_with_success(&spinner, "Dataset loaded");

    println!("\n    {} Dataset Statistics:", style("✧").cyan());
    println!("      Rows: {}", load.records.len());
    if load.skipped_rows > 0 {
        print_count(
            "unusable row(s)",
            load.skipped_rows,
            Some("(missing or invalid values, skipped)"),
        );
    }
    print_step_time(step_start.elapsed());

    // Step 2: Aggregate
    print_step_header(2, "Interval Statistics");

    let step_start = Instant::now();
    let analysis = analyze_with_parents(&load.records, &load.parents, binner)?;
    print_count("child record(s)", analysis.record_count, None);
    print_count(
        "unique famil(ies)",
        analysis.family_count,
        Some("(parent distributions count each family once)"),
    );
    print_success("Computed means and cumulative distributions");
    print_step_time(step_start.elapsed());

    // Step 3: Charts
    print_step_header(3, "Render Charts");

    let step_start = Instant::now();
    if cli.no_plots {
        print_info("Chart rendering skipped (--no-plots)");
    } else {
        let spinner = create_spinner("Drawing charts...");
        let written = match render_all(&analysis, &cli.output_dir) {
            Ok(written) => written,
            Err(err) => {
                finish_with_warning(&spinner, "Chart rendering failed");
                return Err(err.into());
            }
        };
        finish_with_success(&spinner, &format!("Wrote {} chart(s)", written.len()));
        for path in &written {
            println!("      {} {}", style("•").dim(), path.display());
        }
    }
    print_step_time(step_start.elapsed());

    // Step 4: Optional export
    if let Some(export_path) = &cli.export {
        print_step_header(4, "Export Statistics");

        let step_start = Instant::now();
        export_statistics(&analysis, &cli.input, load.skipped_rows, export_path)
            .with_context(|| format!("Export to {} failed", export_path.display()))?;
        print_success(&format!("Saved to {}", export_path.display()));
        print_step_time(step_start.elapsed());
    }

    // Display summary
    StatisticsSummary::new(&analysis, load.skipped_rows).display();

    // Final completion message
    print_completion();

    Ok(())
}
