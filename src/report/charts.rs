//! Chart rendering for height statistics
//!
//! Figures are described by plain data ([`BarPanel`], [`LinePanel`]) built from a
//! [`HeightAnalysis`] and then drawn side by side into a single PNG with the
//! [`plotters`] bitmap backend. Building the panels never touches the disk, so
//! the figure contents can be tested without rendering.

use std::path::{Path, PathBuf};

use plotters::coord::Shift;
use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::pipeline::{
    DistributionBucket, HeightAnalysis, HeightField, IntervalBinner, MeanBucket, Result,
    StatsError,
};

/// Mean child height by parent interval, two panels.
pub const MEAN_COMPARISON_FILE: &str = "height_comparison_bars.png";
/// Cumulative percentage ogives, three panels.
pub const OGIVE_FILE: &str = "height_comparison_ogive.png";
/// Frequency bar charts, three panels.
pub const FREQUENCY_FILE: &str = "height_frequency_distributions.png";

pub const FATHER_COLOR: RGBColor = RGBColor(31, 119, 180);
pub const MOTHER_COLOR: RGBColor = RGBColor(255, 127, 14);
pub const CHILD_COLOR: RGBColor = RGBColor(44, 160, 44);

const TWO_PANEL_SIZE: (u32, u32) = (1500, 600);
const THREE_PANEL_SIZE: (u32, u32) = (1800, 600);

/// A single bar with the text drawn above it.
#[derive(Debug, Clone, PartialEq)]
pub struct Bar {
    pub label: String,
    pub value: f64,
    pub annotation: String,
}

/// One bar chart panel.
#[derive(Debug, Clone, PartialEq)]
pub struct BarPanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: RGBColor,
    /// Bar values are counts; y ticks between whole numbers stay unlabelled
    pub whole_number_values: bool,
    pub bars: Vec<Bar>,
}

/// One line chart panel with a marker at every point.
#[derive(Debug, Clone, PartialEq)]
pub struct LinePanel {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub color: RGBColor,
    pub points: Vec<(f64, f64)>,
}

/// Bars for the mean child height grouped by father and by mother interval.
///
/// Each bar is annotated with its sample count (`n=<count>`).
pub fn mean_comparison_panels(analysis: &HeightAnalysis) -> Vec<BarPanel> {
    let binner = IntervalBinner::new(analysis.interval_width);

    [
        (HeightField::Father, &analysis.father_child_means, FATHER_COLOR),
        (HeightField::Mother, &analysis.mother_child_means, MOTHER_COLOR),
    ]
    .into_iter()
    .map(|(field, table, color)| BarPanel {
        title: format!("{} Height vs Average Child Height", field.possessive()),
        x_label: format!("{} Height Intervals (inches)", field.possessive()),
        y_label: "Average Child Height (inches)".to_string(),
        color,
        whole_number_values: false,
        bars: mean_bars(table, &binner),
    })
    .collect()
}

/// Cumulative percentage lines for father, mother and child heights.
pub fn ogive_panels(analysis: &HeightAnalysis) -> Vec<LinePanel> {
    [
        (HeightField::Father, &analysis.father_distribution, FATHER_COLOR),
        (HeightField::Mother, &analysis.mother_distribution, MOTHER_COLOR),
        (HeightField::Child, &analysis.child_distribution, CHILD_COLOR),
    ]
    .into_iter()
    .map(|(field, table, color)| LinePanel {
        title: format!(
            "Ogive for {} Height Distribution{}",
            field.possessive(),
            family_suffix(field)
        ),
        x_label: format!("{} Height (inches)", field.possessive()),
        y_label: "Cumulative Percentage (%)".to_string(),
        color,
        points: table
            .iter()
            .map(|bucket| (bucket.lower_bound as f64, bucket.cumulative_percentage))
            .collect(),
    })
    .collect()
}

/// Frequency bars for child, father and mother heights.
///
/// Each bar is annotated with its raw frequency.
pub fn frequency_panels(analysis: &HeightAnalysis) -> Vec<BarPanel> {
    let binner = IntervalBinner::new(analysis.interval_width);

    [
        (HeightField::Child, &analysis.child_distribution, CHILD_COLOR),
        (HeightField::Father, &analysis.father_distribution, FATHER_COLOR),
        (HeightField::Mother, &analysis.mother_distribution, MOTHER_COLOR),
    ]
    .into_iter()
    .map(|(field, table, color)| BarPanel {
        title: format!("{} Height Distribution{}", field, family_suffix(field)),
        x_label: format!("{} Height Intervals (inches)", field.possessive()),
        y_label: "Frequency".to_string(),
        color,
        whole_number_values: true,
        bars: frequency_bars(table, &binner),
    })
    .collect()
}

fn mean_bars(table: &[MeanBucket], binner: &IntervalBinner) -> Vec<Bar> {
    table
        .iter()
        .map(|bucket| Bar {
            label: binner.label(bucket.lower_bound),
            value: bucket.mean,
            annotation: format!("n={}", bucket.count),
        })
        .collect()
}

fn frequency_bars(table: &[DistributionBucket], binner: &IntervalBinner) -> Vec<Bar> {
    table
        .iter()
        .map(|bucket| Bar {
            label: binner.label(bucket.lower_bound),
            value: bucket.count as f64,
            annotation: bucket.count.to_string(),
        })
        .collect()
}

/// Tick label for axes whose values are whole inches or whole counts.
///
/// Plotters places ticks at half steps on short ranges; those get no label.
pub fn whole_number_label(value: f64) -> String {
    let rounded = value.round();
    if (value - rounded).abs() > 1e-6 {
        String::new()
    } else {
        format!("{:.0}", rounded)
    }
}

fn family_suffix(field: HeightField) -> &'static str {
    match field {
        HeightField::Child => "",
        HeightField::Father | HeightField::Mother => " (Unique Families)",
    }
}

/// Render all three figures into `out_dir` and return the written paths.
pub fn render_all(analysis: &HeightAnalysis, out_dir: &Path) -> Result<Vec<PathBuf>> {
    let mean_path = out_dir.join(MEAN_COMPARISON_FILE);
    render_bar_panels(&mean_comparison_panels(analysis), &mean_path, TWO_PANEL_SIZE)?;

    let ogive_path = out_dir.join(OGIVE_FILE);
    render_line_panels(&ogive_panels(analysis), &ogive_path, THREE_PANEL_SIZE)?;

    let frequency_path = out_dir.join(FREQUENCY_FILE);
    render_bar_panels(&frequency_panels(analysis), &frequency_path, THREE_PANEL_SIZE)?;

    Ok(vec![mean_path, ogive_path, frequency_path])
}

/// Draw bar panels left to right and save them as a PNG.
///
/// # Errors
/// * [`StatsError::EmptyDataset`] if there are no panels or a panel has no bars
/// * [`StatsError::Render`] if the output directory is missing or drawing fails
pub fn render_bar_panels(panels: &[BarPanel], path: &Path, size: (u32, u32)) -> Result<()> {
    if panels.is_empty() {
        return Err(StatsError::EmptyDataset("no panels to render".to_string()));
    }
    if let Some(panel) = panels.iter().find(|panel| panel.bars.is_empty()) {
        return Err(StatsError::EmptyDataset(format!(
            "chart '{}' has no bars",
            panel.title
        )));
    }
    check_output_dir(path)?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| StatsError::render(path, e))?;

    let areas = root.split_evenly((1, panels.len()));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        draw_bar_panel(panel, area).map_err(|e| StatsError::render(path, e))?;
    }

    root.present().map_err(|e| StatsError::render(path, e))?;
    Ok(())
}

/// Draw line panels left to right and save them as a PNG.
///
/// # Errors
/// * [`StatsError::EmptyDataset`] if there are no panels or a panel has no points
/// * [`StatsError::Render`] if the output directory is missing or drawing fails
pub fn render_line_panels(panels: &[LinePanel], path: &Path, size: (u32, u32)) -> Result<()> {
    if panels.is_empty() {
        return Err(StatsError::EmptyDataset("no panels to render".to_string()));
    }
    if let Some(panel) = panels.iter().find(|panel| panel.points.is_empty()) {
        return Err(StatsError::EmptyDataset(format!(
            "chart '{}' has no points",
            panel.title
        )));
    }
    check_output_dir(path)?;

    let root = BitMapBackend::new(path, size).into_drawing_area();
    root.fill(&WHITE).map_err(|e| StatsError::render(path, e))?;

    let areas = root.split_evenly((1, panels.len()));
    for (panel, area) in panels.iter().zip(areas.iter()) {
        draw_line_panel(panel, area).map_err(|e| StatsError::render(path, e))?;
    }

    root.present().map_err(|e| StatsError::render(path, e))?;
    Ok(())
}

/// Fail before drawing anything if the PNG could never be written.
fn check_output_dir(path: &Path) -> Result<()> {
    match path.parent() {
        Some(dir) if !dir.as_os_str().is_empty() && !dir.is_dir() => Err(StatsError::render(
            path,
            format!("output directory {} does not exist", dir.display()),
        )),
        _ => Ok(()),
    }
}

fn draw_bar_panel<DB: DrawingBackend>(
    panel: &BarPanel,
    area: &DrawingArea<DB, Shift>,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let n = panel.bars.len();
    let y_max = panel.bars.iter().map(|bar| bar.value).fold(0.0f64, f64::max);
    // Headroom for the annotations
    let y_top = if y_max > 0.0 { y_max * 1.15 } else { 1.0 };

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(-0.5f64..(n as f64 - 0.5), 0.0f64..y_top)?;

    // Bars sit on integer positions; only those get a category label
    let category_label = |x: &f64| -> String {
        let index = x.round();
        if (x - index).abs() > 1e-6 || index < 0.0 {
            return String::new();
        }
        panel
            .bars
            .get(index as usize)
            .map(|bar| bar.label.clone())
            .unwrap_or_default()
    };

    let value_label = |y: &f64| -> String {
        if panel.whole_number_values {
            whole_number_label(*y)
        } else {
            format!("{:.1}", y)
        }
    };

    chart
        .configure_mesh()
        .disable_x_mesh()
        .x_labels(n)
        .x_label_formatter(&category_label)
        .y_label_formatter(&value_label)
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .draw()?;

    chart.draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
        let x = i as f64;
        Rectangle::new(
            [(x - 0.4, 0.0), (x + 0.4, bar.value)],
            panel.color.mix(0.8).filled(),
        )
    }))?;

    let annotation_style =
        TextStyle::from(("sans-serif", 14.0).into_font()).pos(Pos::new(HPos::Center, VPos::Bottom));
    chart.draw_series(panel.bars.iter().enumerate().map(|(i, bar)| {
        Text::new(
            bar.annotation.clone(),
            (i as f64, bar.value),
            annotation_style.clone(),
        )
    }))?;

    Ok(())
}

fn draw_line_panel<DB: DrawingBackend>(
    panel: &LinePanel,
    area: &DrawingArea<DB, Shift>,
) -> std::result::Result<(), DrawingAreaErrorKind<DB::ErrorType>> {
    let x_min = panel.points.iter().map(|(x, _)| *x).fold(f64::INFINITY, f64::min);
    let x_max = panel
        .points
        .iter()
        .map(|(x, _)| *x)
        .fold(f64::NEG_INFINITY, f64::max);

    let mut chart = ChartBuilder::on(area)
        .caption(&panel.title, ("sans-serif", 20))
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d((x_min - 1.0)..(x_max + 1.0), 0.0f64..105.0f64)?;

    chart
        .configure_mesh()
        .x_desc(panel.x_label.as_str())
        .y_desc(panel.y_label.as_str())
        .x_label_formatter(&|x: &f64| whole_number_label(*x))
        .draw()?;

    chart.draw_series(LineSeries::new(
        panel.points.iter().copied(),
        panel.color.stroke_width(2),
    ))?;

    chart.draw_series(
        panel
            .points
            .iter()
            .map(|point| Circle::new(*point, 4, panel.color.filled())),
    )?;

    Ok(())
}
