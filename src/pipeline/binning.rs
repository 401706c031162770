//! Fixed-width interval binning for height values

/// Default interval width in inches.
pub const DEFAULT_INTERVAL_WIDTH: u32 = 2;

/// Lower bound of the default-width interval containing `height`.
///
/// Equivalent to `floor(height / 2) * 2`.
pub fn interval_lower_bound(height: f64) -> i64 {
    IntervalBinner::default().lower_bound(height)
}

/// Maps heights onto half-open intervals `[k, k + width)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IntervalBinner {
    width: u32,
}

impl Default for IntervalBinner {
    fn default() -> Self {
        Self {
            width: DEFAULT_INTERVAL_WIDTH,
        }
    }
}

impl IntervalBinner {
    /// Create a binner with the given width. A width of zero is raised to one.
    pub fn new(width: u32) -> Self {
        Self {
            width: width.max(1),
        }
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    /// Lower bound `floor(height / width) * width`, flooring toward negative infinity.
    pub fn lower_bound(&self, height: f64) -> i64 {
        let width = self.width as f64;
        ((height / width).floor() * width) as i64
    }

    /// Exclusive upper bound of the interval identified by `lower`.
    pub fn upper_bound(&self, lower: i64) -> i64 {
        lower + self.width as i64
    }

    /// Axis label such as `"70-72"`.
    pub fn label(&self, lower: i64) -> String {
        format!("{}-{}", lower, self.upper_bound(lower))
    }
}
