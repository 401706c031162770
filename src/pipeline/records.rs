//! Height records and per-family deduplication

use std::collections::HashSet;

use serde::Serialize;

/// One row of the families dataset: a child together with both parents.
///
/// Heights are in inches. A family with several children appears once per child.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct HeightRecord {
    pub family: String,
    pub father: f64,
    pub mother: f64,
    pub child: f64,
}

impl HeightRecord {
    pub fn new(family: impl Into<String>, father: f64, mother: f64, child: f64) -> Self {
        Self {
            family: family.into(),
            father,
            mother,
            child,
        }
    }

    /// Height of the given family member.
    pub fn height(&self, field: HeightField) -> f64 {
        match field {
            HeightField::Father => self.father,
            HeightField::Mother => self.mother,
            HeightField::Child => self.child,
        }
    }
}

/// Parent heights for a single family, as first seen in the input.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ParentRecord {
    pub family: String,
    pub father: f64,
    pub mother: f64,
}

/// The three measured members of a family.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum HeightField {
    Father,
    Mother,
    Child,
}

impl HeightField {
    /// Possessive label used in chart titles and axis descriptions.
    pub fn possessive(&self) -> &'static str {
        match self {
            HeightField::Father => "Father's",
            HeightField::Mother => "Mother's",
            HeightField::Child => "Child",
        }
    }
}

impl std::fmt::Display for HeightField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HeightField::Father => write!(f, "Father"),
            HeightField::Mother => write!(f, "Mother"),
            HeightField::Child => write!(f, "Child"),
        }
    }
}

/// Collapse per-child records to one parent record per family.
///
/// The first record encountered for a family id (in input order) supplies the
/// father and mother heights; later records for the same family are ignored.
/// Output order follows the first appearance of each family.
pub fn unique_parents(records: &[HeightRecord]) -> Vec<ParentRecord> {
    let mut seen: HashSet<&str> = HashSet::with_capacity(records.len());

    records
        .iter()
        .filter(|record| seen.insert(record.family.as_str()))
        .map(|record| ParentRecord {
            family: record.family.clone(),
            father: record.father,
            mother: record.mother,
        })
        .collect()
}
