//! Numerical building blocks used by the content handlers.

mod interpolate;
mod roots;
mod stats;

pub use interpolate::Pchip;
pub use roots::brentq;
pub use stats::{histogram, histogram2d, percentile, GaussianKde, Histogram1D, Histogram2DCounts};

use thiserror::Error;

#[derive(Debug, Error, PartialEq)]
pub enum NumericError {
    #[error("need at least {needed} points, got {got}")]
    TooFewPoints { needed: usize, got: usize },

    #[error("abscissae must be strictly increasing")]
    NotIncreasing,

    #[error("f(a) and f(b) must have different signs")]
    NoSignChange,

    #[error("root finding did not converge after {0} iterations")]
    NoConvergence(usize),

    #[error("samples have zero variance, density estimate is singular")]
    Singular,

    #[error("input contains non-finite values")]
    NonFinite,
}

/// `n` evenly spaced values from `start` to `stop`, both included.
pub fn linspace(start: f64, stop: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![start],
        _ => {
            let step = (stop - start) / (n - 1) as f64;
            let mut values: Vec<f64> = (0..n).map(|i| start + i as f64 * step).collect();
            values[n - 1] = stop;
            values
        }
    }
}
