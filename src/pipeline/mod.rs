//! Pipeline module - loading, binning and aggregating height data

pub mod aggregate;
pub mod analysis;
pub mod binning;
pub mod error;
pub mod loader;
pub mod records;

pub use aggregate::*;
pub use analysis::*;
pub use binning::*;
pub use error::{Result, StatsError};
pub use loader::*;
pub use records::*;
