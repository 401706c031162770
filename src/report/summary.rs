//! Terminal summary of the aggregate tables

use comfy_table::{presets::UTF8_FULL_CONDENSED, Attribute, Cell, CellAlignment, Color, Table};
use console::style;

use crate::pipeline::{DistributionBucket, HeightAnalysis, IntervalBinner, MeanBucket};

/// Summary of a statistics run, printed after the charts are written.
#[derive(Debug)]
pub struct StatisticsSummary<'a> {
    pub analysis: &'a HeightAnalysis,
    pub skipped_rows: usize,
}

impl<'a> StatisticsSummary<'a> {
    pub fn new(analysis: &'a HeightAnalysis, skipped_rows: usize) -> Self {
        Self {
            analysis,
            skipped_rows,
        }
    }

    /// Dataset level counts as a two-column table.
    pub fn overview_table(&self) -> Table {
        let mut table = Table::new();
        table.load_preset(UTF8_FULL_CONDENSED);
        table.set_header(vec![
            Cell::new("Metric").add_attribute(Attribute::Bold),
            Cell::new("Value").add_attribute(Attribute::Bold),
        ]);

        table.add_row(vec![
            Cell::new("👶 Child records"),
            Cell::new(self.analysis.record_count),
        ]);
        table.add_row(vec![
            Cell::new("👪 Unique families"),
            Cell::new(self.analysis.family_count),
        ]);
        table.add_row(vec![
            Cell::new("🗑️  Skipped rows"),
            Cell::new(self.skipped_rows).fg(if self.skipped_rows == 0 {
                Color::White
            } else {
                Color::Red
            }),
        ]);
        table.add_row(vec![
            Cell::new("📏 Interval width"),
            Cell::new(format!("{} in", self.analysis.interval_width))
                .fg(Color::Green)
                .add_attribute(Attribute::Bold),
        ]);

        table
    }

    pub fn display(&self) {
        let binner = IntervalBinner::new(self.analysis.interval_width);

        print_section("📋", "STATISTICS SUMMARY");
        print_indented(&self.overview_table());

        print_section("📊", "MEAN CHILD HEIGHT BY PARENT INTERVAL");
        println!("      {}", style("Father (all records)").yellow());
        print_indented(&mean_table(&self.analysis.father_child_means, &binner));
        println!();
        println!("      {}", style("Mother (all records)").yellow());
        print_indented(&mean_table(&self.analysis.mother_child_means, &binner));

        print_section("📈", "HEIGHT DISTRIBUTIONS");
        for (name, table) in [
            ("Child (all records)", &self.analysis.child_distribution),
            ("Father (unique families)", &self.analysis.father_distribution),
            ("Mother (unique families)", &self.analysis.mother_distribution),
        ] {
            println!("      {}", style(name).yellow());
            print_indented(&distribution_table(table, &binner));
            println!();
        }
    }
}

/// Interval, count and mean columns.
pub fn mean_table(buckets: &[MeanBucket], binner: &IntervalBinner) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Interval").add_attribute(Attribute::Bold),
        Cell::new("Count").add_attribute(Attribute::Bold),
        Cell::new("Mean child height").add_attribute(Attribute::Bold),
    ]);

    for bucket in buckets {
        table.add_row(vec![
            Cell::new(binner.label(bucket.lower_bound)),
            Cell::new(bucket.count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.2}", bucket.mean)).set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

/// Interval, frequency and cumulative columns.
pub fn distribution_table(buckets: &[DistributionBucket], binner: &IntervalBinner) -> Table {
    let mut table = Table::new();
    table.load_preset(UTF8_FULL_CONDENSED);
    table.set_header(vec![
        Cell::new("Interval").add_attribute(Attribute::Bold),
        Cell::new("Frequency").add_attribute(Attribute::Bold),
        Cell::new("Cumulative").add_attribute(Attribute::Bold),
        Cell::new("Cumulative %").add_attribute(Attribute::Bold),
    ]);

    for bucket in buckets {
        table.add_row(vec![
            Cell::new(binner.label(bucket.lower_bound)),
            Cell::new(bucket.count).set_alignment(CellAlignment::Right),
            Cell::new(bucket.cumulative_count).set_alignment(CellAlignment::Right),
            Cell::new(format!("{:.1}%", bucket.cumulative_percentage))
                .set_alignment(CellAlignment::Right),
        ]);
    }

    table
}

fn print_section(icon: &str, title: &str) {
    println!();
    println!("    {} {}", style(icon).cyan(), style(title).white().bold());
    println!("    {}", style("─".repeat(50)).dim());
    println!();
}

// Indent the table
fn print_indented(table: &Table) {
    for line in table.to_string().lines() {
        println!("      {}", line);
    }
}
