//! Shape-preserving piecewise cubic Hermite interpolation (PCHIP).
//!
//! Slopes follow Fritsch and Carlson: zero at local extrema, a weighted
//! harmonic mean of the neighbouring secants elsewhere, and a one-sided
//! three-point estimate at the ends. The interpolant never overshoots the
//! data, which keeps credible bands from crossing their median.

use super::NumericError;

#[derive(Debug, Clone)]
pub struct Pchip {
    x: Vec<f64>,
    y: Vec<f64>,
    slopes: Vec<f64>,
}

impl Pchip {
    pub fn new(x: &[f64], y: &[f64]) -> Result<Self, NumericError> {
        let n = x.len().min(y.len());
        if n < 2 {
            return Err(NumericError::TooFewPoints { needed: 2, got: n });
        }
        let (x, y) = (&x[..n], &y[..n]);
        if x.iter().chain(y.iter()).any(|v| !v.is_finite()) {
            return Err(NumericError::NonFinite);
        }
        if x.windows(2).any(|w| w[1] <= w[0]) {
            return Err(NumericError::NotIncreasing);
        }

        let h: Vec<f64> = x.windows(2).map(|w| w[1] - w[0]).collect();
        let delta: Vec<f64> = y
            .windows(2)
            .zip(h.iter())
            .map(|(w, &hk)| (w[1] - w[0]) / hk)
            .collect();

        let mut slopes = vec![0.0; n];
        if n == 2 {
            slopes[0] = delta[0];
            slopes[1] = delta[0];
        } else {
            for k in 1..n - 1 {
                let (d0, d1) = (delta[k - 1], delta[k]);
                if d0 == 0.0 || d1 == 0.0 || d0.signum() != d1.signum() {
                    continue;
                }
                let w1 = 2.0 * h[k] + h[k - 1];
                let w2 = h[k] + 2.0 * h[k - 1];
                slopes[k] = (w1 + w2) / (w1 / d0 + w2 / d1);
            }
            slopes[0] = end_slope(h[0], h[1], delta[0], delta[1]);
            slopes[n - 1] = end_slope(h[n - 2], h[n - 3], delta[n - 2], delta[n - 3]);
        }

        Ok(Pchip {
            x: x.to_vec(),
            y: y.to_vec(),
            slopes,
        })
    }

    /// Interpolated value at `t`. Outside the data the end cubic is
    /// extrapolated.
    pub fn evaluate(&self, t: f64) -> f64 {
        let last = self.x.len() - 2;
        let k = self.x.partition_point(|&xk| xk <= t).saturating_sub(1).min(last);

        let h = self.x[k + 1] - self.x[k];
        let s = (t - self.x[k]) / h;
        let (s2, s3) = (s * s, s * s * s);

        let h00 = 2.0 * s3 - 3.0 * s2 + 1.0;
        let h10 = s3 - 2.0 * s2 + s;
        let h01 = -2.0 * s3 + 3.0 * s2;
        let h11 = s3 - s2;

        h00 * self.y[k] + h10 * h * self.slopes[k] + h01 * self.y[k + 1] + h11 * h * self.slopes[k + 1]
    }
}

fn end_slope(h0: f64, h1: f64, d0: f64, d1: f64) -> f64 {
    let slope = ((2.0 * h0 + h1) * d0 - h0 * d1) / (h0 + h1);
    if slope.signum() != d0.signum() || d0 == 0.0 {
        0.0
    } else if d0.signum() != d1.signum() && slope.abs() > 3.0 * d0.abs() {
        3.0 * d0
    } else {
        slope
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reproduces_knots() {
        let x = [0.0, 1.0, 2.5, 4.0];
        let y = [1.0, 3.0, 2.0, 5.0];
        let pchip = Pchip::new(&x, &y).unwrap();
        for (&xi, &yi) in x.iter().zip(y.iter()) {
            assert!((pchip.evaluate(xi) - yi).abs() < 1e-12);
        }
    }

    #[test]
    fn test_linear_data_is_exact() {
        let x = [0.0, 1.0, 2.0, 3.0];
        let y = [1.0, 3.0, 5.0, 7.0];
        let pchip = Pchip::new(&x, &y).unwrap();
        assert!((pchip.evaluate(1.5) - 4.0).abs() < 1e-12);
        assert!((pchip.evaluate(2.75) - 6.5).abs() < 1e-12);
    }

    #[test]
    fn test_monotone_data_does_not_overshoot() {
        let x = [0.0, 1.0, 2.0, 3.0, 4.0];
        let y = [0.0, 0.0, 1.0, 1.0, 1.0];
        let pchip = Pchip::new(&x, &y).unwrap();
        let mut previous = f64::NEG_INFINITY;
        for t in crate::numeric::linspace(0.0, 4.0, 101) {
            let v = pchip.evaluate(t);
            assert!((-1e-12..=1.0 + 1e-12).contains(&v));
            assert!(v >= previous - 1e-12);
            previous = v;
        }
    }

    #[test]
    fn test_rejects_bad_input() {
        assert!(matches!(
            Pchip::new(&[0.0], &[1.0]),
            Err(NumericError::TooFewPoints { .. })
        ));
        assert_eq!(
            Pchip::new(&[0.0, 0.0], &[1.0, 2.0]).unwrap_err(),
            NumericError::NotIncreasing
        );
    }
}
