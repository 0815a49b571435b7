//! Bracketed root finding.

use super::NumericError;

const XTOL: f64 = 2e-12;
const RTOL: f64 = 4.0 * f64::EPSILON;
const MAX_ITER: usize = 100;

/// Brent's method on `[a, b]`. `f(a)` and `f(b)` must bracket a root.
///
/// Combines bisection with secant and inverse quadratic steps; a step is
/// only taken when it shrinks the bracket faster than bisection would.
pub fn brentq<F>(f: F, a: f64, b: f64) -> Result<f64, NumericError>
where
    F: Fn(f64) -> f64,
{
    let (mut xpre, mut xcur) = (a, b);
    let (mut fpre, mut fcur) = (f(xpre), f(xcur));
    let (mut xblk, mut fblk) = (0.0, 0.0);
    let (mut spre, mut scur) = (0.0, 0.0);

    if fpre * fcur > 0.0 {
        return Err(NumericError::NoSignChange);
    }
    if fpre == 0.0 {
        return Ok(xpre);
    }
    if fcur == 0.0 {
        return Ok(xcur);
    }

    for _ in 0..MAX_ITER {
        if fpre != 0.0 && fcur != 0.0 && fpre.is_sign_negative() != fcur.is_sign_negative() {
            xblk = xpre;
            fblk = fpre;
            spre = xcur - xpre;
            scur = spre;
        }
        if fblk.abs() < fcur.abs() {
            xpre = xcur;
            xcur = xblk;
            xblk = xpre;
            fpre = fcur;
            fcur = fblk;
            fblk = fpre;
        }

        let delta = (XTOL + RTOL * xcur.abs()) / 2.0;
        let sbis = (xblk - xcur) / 2.0;
        if fcur == 0.0 || sbis.abs() < delta {
            return Ok(xcur);
        }

        if spre.abs() > delta && fcur.abs() < fpre.abs() {
            let stry = if xpre == xblk {
                // secant
                -fcur * (xcur - xpre) / (fcur - fpre)
            } else {
                // inverse quadratic
                let dpre = (fpre - fcur) / (xpre - xcur);
                let dblk = (fblk - fcur) / (xblk - xcur);
                -fcur * (fblk * dblk - fpre * dpre) / (dblk * dpre * (fblk - fpre))
            };
            if 2.0 * stry.abs() < spre.abs().min(3.0 * sbis.abs() - delta) {
                spre = scur;
                scur = stry;
            } else {
                spre = sbis;
                scur = sbis;
            }
        } else {
            spre = sbis;
            scur = sbis;
        }

        xpre = xcur;
        fpre = fcur;
        if scur.abs() > delta {
            xcur += scur;
        } else {
            xcur += if sbis > 0.0 { delta } else { -delta };
        }
        fcur = f(xcur);
    }

    Err(NumericError::NoConvergence(MAX_ITER))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_smooth_root() {
        let root = brentq(|x| x * x - 2.0, 0.0, 2.0).unwrap();
        assert!((root - 2f64.sqrt()).abs() < 1e-10);
    }

    #[test]
    fn test_step_function_converges_to_jump() {
        let root = brentq(|x| if x < 0.3 { 1.0 } else { -1.0 }, 0.0, 1.0).unwrap();
        assert!((root - 0.3).abs() < 1e-9);
    }

    #[test]
    fn test_endpoint_root_and_bad_bracket() {
        assert_eq!(brentq(|x| x, 0.0, 1.0).unwrap(), 0.0);
        assert_eq!(
            brentq(|x| x * x + 1.0, -1.0, 1.0).unwrap_err(),
            NumericError::NoSignChange
        );
    }
}
