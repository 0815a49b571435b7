//! Linear axis scale and tick placement.

/// Maps a data interval onto [0, 1].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LinearScale {
    min: f64,
    max: f64,
}

impl LinearScale {
    /// Create a scale over `[min, max]`. A degenerate interval is widened so
    /// the transform stays finite.
    pub fn new(min: f64, max: f64) -> Self {
        if max > min {
            return LinearScale { min, max };
        }
        let padding = if min == 0.0 { 1.0 } else { min.abs() * 0.1 };
        LinearScale {
            min: min - padding,
            max: max + padding,
        }
    }

    /// Transform a data value to normalized coordinates.
    pub fn transform(&self, value: f64) -> f64 {
        (value - self.min) / (self.max - self.min)
    }

    /// The data interval covered.
    pub fn range(&self) -> (f64, f64) {
        (self.min, self.max)
    }

    /// Tick values inside the interval.
    pub fn ticks(&self, num_ticks: usize) -> Vec<f64> {
        nice_ticks(self.min, self.max, num_ticks)
    }
}

impl Default for LinearScale {
    fn default() -> Self {
        LinearScale { min: 0.0, max: 1.0 }
    }
}

/// Compute "nice" numbers for axis ticks.
pub fn nice_number(range: f64, round: bool) -> f64 {
    let exponent = range.log10().floor();
    let fraction = range / 10_f64.powf(exponent);

    let nice_fraction = if round {
        if fraction < 1.5 {
            1.0
        } else if fraction < 3.0 {
            2.0
        } else if fraction < 7.0 {
            5.0
        } else {
            10.0
        }
    } else if fraction <= 1.0 {
        1.0
    } else if fraction <= 2.0 {
        2.0
    } else if fraction <= 5.0 {
        5.0
    } else {
        10.0
    };

    nice_fraction * 10_f64.powf(exponent)
}

/// Generate nice tick positions within `[min, max]`.
pub fn nice_ticks(min: f64, max: f64, num_ticks: usize) -> Vec<f64> {
    if num_ticks < 2 || !(max > min) {
        return vec![(min + max) / 2.0];
    }

    let range = nice_number(max - min, false);
    let spacing = nice_number(range / (num_ticks - 1) as f64, true);
    let first = (min / spacing - 1e-9).ceil() as i64;
    let last = (max / spacing + 1e-9).floor() as i64;

    // Multiply instead of accumulating so ticks land on exact multiples.
    (first..=last).map(|i| i as f64 * spacing).collect()
}
