//! Galton: Family Height Statistics Library
//!
//! Interval binning, frequency counts and cumulative distributions over
//! Galton's family height data, rendered as bar charts and ogives.

pub mod cli;
pub mod pipeline;
pub mod report;
pub mod utils;
