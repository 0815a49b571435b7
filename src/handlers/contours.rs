//! Credible-region contours of a pair of sampled variables.

use crate::content::Contours2DContent;
use crate::error::{Error, Result};
use crate::numeric::{brentq, histogram2d};
use crate::plotting::{Axes, ContourSet};

use super::{infer_range, Context};

/// Enclosed probability and label of each drawn contour.
const LEVELS: [(f64, &str); 3] = [(0.68, "68%"), (0.95, "95%"), (0.99, "99%")];

/// Thresholds `t` on the per-bin probability mass such that the bins above
/// `t` hold probability `p`, one per entry of `probabilities`.
pub fn credible_levels(mass: &[Vec<f64>], probabilities: &[f64]) -> Result<Vec<f64>> {
    let cells: Vec<f64> = mass.iter().flatten().copied().collect();
    probabilities
        .iter()
        .map(|&p| {
            let enclosed = |t: f64| cells.iter().filter(|&&m| m > t).sum::<f64>() - p;
            brentq(enclosed, 0.0, 1.0).map_err(Error::from)
        })
        .collect()
}

pub(super) fn plot(item: &Contours2DContent, ctx: &mut Context<'_>) -> Result<()> {
    ctx.observer.info(&format!(
        "   plotting 2D contours from file \"{}\"",
        item.hdf5_file.display()
    ));
    let file = ctx.loader.load_data_file(&item.hdf5_file)?;
    let [xvariable, yvariable] = &item.variables;
    let xdata = file.column(xvariable)?;
    let ydata = file.column(yvariable)?;

    infer_range(&mut ctx.frame.xrange, &xdata, xvariable, ctx.axes, Axes::set_xlim)?;
    infer_range(&mut ctx.frame.yrange, &ydata, yvariable, ctx.axes, Axes::set_ylim)?;

    let counts = histogram2d(&xdata, &ydata, item.bins, item.bins)?;
    let mass = counts.mass();
    let probabilities = LEVELS.map(|(p, _)| p);
    let thresholds = credible_levels(&mass, &probabilities)?;

    // Widest region first
    let levels: Vec<(f64, Option<String>)> = thresholds
        .iter()
        .zip(LEVELS.iter())
        .rev()
        .map(|(&t, (_, label))| (t, Some(label.to_string())))
        .collect();

    let (xcenters, ycenters) = counts.centers();
    let contours = ContourSet::trace(&xcenters, &ycenters, &mass, &levels).color(item.color.clone());
    ctx.axes.add_plot(Box::new(contours));
    Ok(())
}
