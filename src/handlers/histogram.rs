//! One- and two-dimensional histograms of sampled variables.

use crate::content::{Histogram2DContent, HistogramContent};
use crate::error::Result;
use crate::numeric::{histogram, histogram2d};
use crate::plotting::{Histogram, Histogram2D};

use super::Context;

pub(super) fn plot_1d(item: &HistogramContent, ctx: &mut Context<'_>) -> Result<()> {
    ctx.observer.info(&format!(
        "   plotting histogram from file \"{}\"",
        item.hdf5_file.display()
    ));
    let file = ctx.loader.load_data_file(&item.hdf5_file)?;
    let data = file.column(&item.variable)?;

    let binned = histogram(&data, item.bins)?;
    let mut bars = Histogram::new(binned.edges.clone(), binned.density())
        .color(item.color.clone())
        .opacity(item.opacity);
    if let Some(label) = &item.label {
        bars = bars.label(label.clone());
    }
    ctx.axes.add_plot(Box::new(bars));
    Ok(())
}

/// Bins without samples stay blank.
pub(super) fn plot_2d(item: &Histogram2DContent, ctx: &mut Context<'_>) -> Result<()> {
    ctx.observer.info(&format!(
        "   plotting 2D histogram from file \"{}\"",
        item.hdf5_file.display()
    ));
    let file = ctx.loader.load_data_file(&item.hdf5_file)?;
    let [xvariable, yvariable] = &item.variables;
    let xdata = file.column(xvariable)?;
    let ydata = file.column(yvariable)?;

    let binned = histogram2d(&xdata, &ydata, item.bins, item.bins)?;
    let values = binned
        .counts
        .iter()
        .zip(binned.density())
        .map(|(counts, density)| {
            counts
                .iter()
                .zip(density)
                .map(|(&count, d)| (count >= 1).then_some(d))
                .collect()
        })
        .collect();

    let mesh = Histogram2D::new(binned.x_edges.clone(), binned.y_edges.clone(), values);
    ctx.axes.add_plot(Box::new(mesh));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, ContentItem};
    use crate::error::Error;
    use crate::handlers::testing::{write_csv, Harness};
    use serde_json::json;

    fn item(value: serde_json::Value) -> Content {
        ContentItem::from_value(&value).unwrap().content
    }

    #[test]
    fn test_histogram_is_density_normalised() {
        let file = write_csv("x\n0\n1\n1\n2\n3\n4\n");
        let mut harness = Harness::new();
        let Content::Histogram(h) = item(json!({
            "type": "histogram", "name": "h", "hdf5-file": file.path(), "variable": "x", "bins": 4,
        })) else {
            panic!("expected histogram content");
        };
        plot_1d(&h, &mut harness.context()).unwrap();
        assert_eq!(harness.axes.num_plots(), 1);
        // six samples over [0, 4] in four unit bins, two in the tallest
        let (_, ymax) = harness.axes.y_range();
        assert!((ymax - 1.05 / 3.0).abs() < 1e-9);
    }

    #[test]
    fn test_histogram2d_and_unknown_variables() {
        let file = write_csv("x,y\n0,0\n1,1\n1,1\n2,0\n");
        let mut harness = Harness::new();
        let Content::Histogram2D(h) = item(json!({
            "type": "histogram2D", "name": "h", "hdf5-file": file.path(), "variables": ["x", "y"], "bins": 2,
        })) else {
            panic!("expected histogram2D content");
        };
        plot_2d(&h, &mut harness.context()).unwrap();
        assert_eq!(harness.axes.num_plots(), 1);

        let Content::Histogram(bad) = item(json!({
            "type": "histogram", "name": "h", "hdf5-file": file.path(), "variable": "z",
        })) else {
            panic!("expected histogram content");
        };
        assert!(matches!(plot_1d(&bad, &mut harness.context()), Err(Error::Value(_))));
    }
}
