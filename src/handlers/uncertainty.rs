//! Credible bands from propagated uncertainties.

use crate::content::UncertaintyContent;
use crate::error::{Error, Result};
use crate::numeric::{linspace, percentile, Pchip};
use crate::plotting::FillBetween;

use super::Context;

/// Percentiles of the lower edge, the median and the upper edge of the
/// one-sigma band under a normal approximation.
const BAND_PERCENTILES: [f64; 3] = [15.865, 50.0, 84.135];

/// Points on the interpolated curves.
const CURVE_POINTS: usize = 100;

/// Percentile summary of the draws at one kinematic point.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct BandPoint {
    pub x: f64,
    pub lower: f64,
    pub central: f64,
    pub higher: f64,
}

impl BandPoint {
    pub(crate) fn from_samples(x: f64, samples: &[f64]) -> Self {
        let [lower, central, higher] = BAND_PERCENTILES.map(|q| percentile(samples, q));
        BandPoint {
            x,
            lower,
            central,
            higher,
        }
    }
}

/// The x coordinate encoded in a column label such as `q2=1.5`.
fn parse_kinematic(label: &str) -> Result<f64> {
    let mut assignments = label.split(',');
    let first = assignments.next().unwrap_or_default();
    if assignments.next().is_some() {
        return Err(Error::value("more than one kinematic variable specified"));
    }
    let (_, value) = first
        .split_once('=')
        .ok_or_else(|| Error::value(format!("malformed kinematic assignment '{}'", label)))?;
    value
        .trim()
        .parse::<f64>()
        .map_err(|_| Error::value(format!("malformed kinematic value in '{}'", label)))
}

pub(super) fn plot(item: &UncertaintyContent, ctx: &mut Context<'_>) -> Result<()> {
    ctx.observer.info(&format!(
        "   plotting uncertainty propagation from file \"{}\"",
        item.hdf5_file.display()
    ));
    let file = ctx.loader.load_uncertainty_file(&item.hdf5_file)?;

    let mut points = Vec::with_capacity(file.parameters.len());
    for (index, label) in &file.parameters {
        let x = parse_kinematic(label)?;
        if let Some([xmin, xmax]) = item.range {
            if x < xmin || x > xmax {
                continue;
            }
        }
        points.push(BandPoint::from_samples(x, &file.samples(*index)));
    }
    points.sort_by(|a, b| a.x.total_cmp(&b.x));

    let column = |f: fn(&BandPoint) -> f64| points.iter().map(f).collect::<Vec<f64>>();
    let xs = column(|p| p.x);
    let lower = Pchip::new(&xs, &column(|p| p.lower))?;
    let central = Pchip::new(&xs, &column(|p| p.central))?;
    let higher = Pchip::new(&xs, &column(|p| p.higher))?;

    // Pchip needs at least two increasing points, so the extent exists.
    let (xmin, xmax) = (xs[0], xs[xs.len() - 1]);
    let xvalues = linspace(xmin, xmax, CURVE_POINTS);
    let curve = |spline: &Pchip| xvalues.iter().map(|&x| spline.evaluate(x)).collect::<Vec<f64>>();
    let (lower, central, higher) = (curve(&lower), curve(&central), curve(&higher));

    let mut band = FillBetween::new(xvalues.clone(), lower.clone(), higher.clone())
        .color(item.color.clone())
        .opacity(item.opacity);
    if let Some(label) = &item.label {
        band = band.label(label.clone());
    }
    ctx.axes.add_plot(Box::new(band));

    for values in [lower, central, higher] {
        ctx.axes
            .plot(xvalues.clone(), values)
            .color(item.color.clone())
            .opacity(item.opacity)
            .build();
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, ContentItem};
    use crate::handlers::testing::{write_csv, Harness};
    use proptest::prelude::*;
    use serde_json::json;

    fn content(value: serde_json::Value) -> UncertaintyContent {
        match ContentItem::from_value(&value).unwrap().content {
            Content::Uncertainty(content) => content,
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_parse_kinematic() {
        assert_eq!(parse_kinematic("q2=1.5").unwrap(), 1.5);
        assert!(matches!(parse_kinematic("q2=1,s=2"), Err(Error::Value(ref m)) if m == "more than one kinematic variable specified"));
        assert!(matches!(parse_kinematic("q2"), Err(Error::Value(_))));
        assert!(matches!(parse_kinematic("q2=abc"), Err(Error::Value(_))));
    }

    #[test]
    fn test_band_and_curves_are_drawn() {
        let file = write_csv("q2=2.0,q2=0.0,q2=1.0,q2=9.0\n1,0,1,5\n2,1,2,6\n3,2,3,7\n");
        let mut harness = Harness::new();
        let item = content(json!({
            "type": "uncertainty", "name": "u", "hdf5-file": file.path(),
            "range": [0.0, 5.0], "label": "band", "opacity": 0.5,
        }));
        plot(&item, &mut harness.context()).unwrap();

        assert_eq!(harness.axes.num_plots(), 4);
        let entries = harness.axes.legend_entries();
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].label, "band");
        // q2=9 is masked, so the band spans [0, 2]
        let (lo, hi) = harness.axes.x_range();
        assert!(lo < 0.0 && hi < 3.0);
    }

    #[test]
    fn test_multi_dimensional_columns_are_rejected() {
        let file = write_csv("\"q2=1.0,s=2.0\",\"q2=2.0,s=2.0\"\n1,2\n");
        let mut harness = Harness::new();
        let item = content(json!({ "type": "uncertainty", "name": "u", "hdf5-file": file.path() }));
        assert!(matches!(plot(&item, &mut harness.context()), Err(Error::Value(_))));
        assert_eq!(harness.axes.num_plots(), 0);
    }

    #[test]
    fn test_single_point_is_rejected() {
        let file = write_csv("q2=1.0\n1\n2\n");
        let mut harness = Harness::new();
        let item = content(json!({ "type": "uncertainty", "name": "u", "hdf5-file": file.path() }));
        assert!(matches!(plot(&item, &mut harness.context()), Err(Error::Value(_))));
    }

    proptest! {
        #[test]
        fn band_percentiles_are_ordered(samples in prop::collection::vec(-1e6f64..1e6, 1..200)) {
            let point = BandPoint::from_samples(0.0, &samples);
            prop_assert!(point.lower <= point.central);
            prop_assert!(point.central <= point.higher);
        }
    }
}
