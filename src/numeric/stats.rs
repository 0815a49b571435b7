//! Percentiles, kernel density estimation and binning.

use super::NumericError;

/// The `q`-th percentile (0..=100) with linear interpolation between the
/// two nearest ranks. NaN for empty input.
pub fn percentile(values: &[f64], q: f64) -> f64 {
    if values.is_empty() {
        return f64::NAN;
    }
    let mut sorted = values.to_vec();
    sorted.sort_by(f64::total_cmp);

    let position = (q / 100.0).clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = position.floor() as usize;
    let upper = position.ceil() as usize;
    if lower == upper {
        sorted[lower]
    } else {
        let weight = position - lower as f64;
        sorted[lower] * (1.0 - weight) + sorted[upper] * weight
    }
}

fn mean_and_std(values: &[f64]) -> (f64, f64) {
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let variance = values.iter().map(|x| (x - mean).powi(2)).sum::<f64>() / (n - 1.0);
    (mean, variance.sqrt())
}

/// One-dimensional Gaussian kernel density estimate.
#[derive(Debug, Clone)]
pub struct GaussianKde {
    samples: Vec<f64>,
    /// Kernel standard deviation
    bandwidth: f64,
}

impl GaussianKde {
    /// Silverman's rule for the bandwidth factor, `(3n/4)^(-1/5)`, scaled
    /// by `multiplier` and applied to the sample standard deviation.
    pub fn silverman(samples: &[f64], multiplier: f64) -> Result<Self, NumericError> {
        if samples.len() < 2 {
            return Err(NumericError::TooFewPoints {
                needed: 2,
                got: samples.len(),
            });
        }
        if samples.iter().any(|x| !x.is_finite()) {
            return Err(NumericError::NonFinite);
        }
        let (_, std) = mean_and_std(samples);
        let n = samples.len() as f64;
        let factor = (n * 3.0 / 4.0).powf(-0.2) * multiplier;
        let bandwidth = factor * std;
        if !(bandwidth > 0.0) {
            return Err(NumericError::Singular);
        }
        Ok(GaussianKde {
            samples: samples.to_vec(),
            bandwidth,
        })
    }

    pub fn bandwidth(&self) -> f64 {
        self.bandwidth
    }

    /// Density at `x`.
    pub fn evaluate(&self, x: f64) -> f64 {
        let norm = 1.0 / ((2.0 * std::f64::consts::PI).sqrt() * self.bandwidth);
        let sum: f64 = self
            .samples
            .iter()
            .map(|&xi| {
                let u = (x - xi) / self.bandwidth;
                (-0.5 * u * u).exp()
            })
            .sum();
        norm * sum / self.samples.len() as f64
    }
}

/// Counts over `edges.len() - 1` adjacent bins.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram1D {
    pub edges: Vec<f64>,
    pub counts: Vec<u64>,
}

impl Histogram1D {
    /// Counts normalised so the histogram integrates to one.
    pub fn density(&self) -> Vec<f64> {
        let total: u64 = self.counts.iter().sum();
        self.edges
            .windows(2)
            .zip(self.counts.iter())
            .map(|(edge, &count)| {
                if total == 0 {
                    0.0
                } else {
                    count as f64 / (total as f64 * (edge[1] - edge[0]))
                }
            })
            .collect()
    }
}

fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    let mut iter = values.iter().copied().filter(|v| v.is_finite());
    let first = iter.next()?;
    let (lo, hi) = iter.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v)));
    if lo == hi {
        Some((lo - 0.5, hi + 0.5))
    } else {
        Some((lo, hi))
    }
}

fn bin_edges(lo: f64, hi: f64, bins: usize) -> Vec<f64> {
    super::linspace(lo, hi, bins + 1)
}

/// Index of the bin containing `value`; the last bin is closed on the right.
fn bin_index(value: f64, lo: f64, hi: f64, bins: usize) -> Option<usize> {
    if !value.is_finite() || value < lo || value > hi {
        return None;
    }
    let index = ((value - lo) / (hi - lo) * bins as f64).floor() as usize;
    Some(index.min(bins - 1))
}

/// Bin `values` into `bins` equal-width bins spanning their extent.
pub fn histogram(values: &[f64], bins: usize) -> Result<Histogram1D, NumericError> {
    let (lo, hi) = finite_range(values).ok_or(NumericError::TooFewPoints { needed: 1, got: 0 })?;
    let bins = bins.max(1);
    let mut counts = vec![0u64; bins];
    for &value in values {
        if let Some(index) = bin_index(value, lo, hi, bins) {
            counts[index] += 1;
        }
    }
    Ok(Histogram1D {
        edges: bin_edges(lo, hi, bins),
        counts,
    })
}

/// Joint counts; `counts[i][j]` covers x bin `i` and y bin `j`.
#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2DCounts {
    pub x_edges: Vec<f64>,
    pub y_edges: Vec<f64>,
    pub counts: Vec<Vec<u64>>,
}

impl Histogram2DCounts {
    pub fn total(&self) -> u64 {
        self.counts.iter().flatten().sum()
    }

    /// Probability mass per bin (count over total).
    pub fn mass(&self) -> Vec<Vec<f64>> {
        let total = self.total().max(1) as f64;
        self.counts
            .iter()
            .map(|column| column.iter().map(|&c| c as f64 / total).collect())
            .collect()
    }

    /// Probability density per bin.
    pub fn density(&self) -> Vec<Vec<f64>> {
        let mass = self.mass();
        mass.iter()
            .zip(self.x_edges.windows(2))
            .map(|(column, xe)| {
                column
                    .iter()
                    .zip(self.y_edges.windows(2))
                    .map(|(&m, ye)| m / ((xe[1] - xe[0]) * (ye[1] - ye[0])))
                    .collect()
            })
            .collect()
    }

    /// Bin centers along x and y.
    pub fn centers(&self) -> (Vec<f64>, Vec<f64>) {
        let center = |edges: &[f64]| edges.windows(2).map(|e| (e[0] + e[1]) / 2.0).collect();
        (center(&self.x_edges), center(&self.y_edges))
    }
}

/// Bin paired samples into `x_bins` by `y_bins` equal-width bins spanning
/// their extent. Pairs with a non-finite coordinate are dropped.
pub fn histogram2d(
    x: &[f64],
    y: &[f64],
    x_bins: usize,
    y_bins: usize,
) -> Result<Histogram2DCounts, NumericError> {
    let pairs: Vec<(f64, f64)> = x
        .iter()
        .zip(y.iter())
        .map(|(&a, &b)| (a, b))
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .collect();
    if pairs.is_empty() {
        return Err(NumericError::TooFewPoints { needed: 1, got: 0 });
    }
    let xs: Vec<f64> = pairs.iter().map(|p| p.0).collect();
    let ys: Vec<f64> = pairs.iter().map(|p| p.1).collect();
    let (x_lo, x_hi) = finite_range(&xs).ok_or(NumericError::NonFinite)?;
    let (y_lo, y_hi) = finite_range(&ys).ok_or(NumericError::NonFinite)?;
    let (x_bins, y_bins) = (x_bins.max(1), y_bins.max(1));

    let mut counts = vec![vec![0u64; y_bins]; x_bins];
    for (a, b) in pairs {
        if let (Some(i), Some(j)) = (
            bin_index(a, x_lo, x_hi, x_bins),
            bin_index(b, y_lo, y_hi, y_bins),
        ) {
            counts[i][j] += 1;
        }
    }

    Ok(Histogram2DCounts {
        x_edges: bin_edges(x_lo, x_hi, x_bins),
        y_edges: bin_edges(y_lo, y_hi, y_bins),
        counts,
    })
}
