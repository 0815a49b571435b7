//! Kernel density estimate of one sampled variable.

use crate::content::KdeContent;
use crate::error::Result;
use crate::numeric::{linspace, GaussianKde};
use crate::plotting::Axes;

use super::{infer_range, Context};

const POINTS: usize = 1000;

pub(super) fn plot(item: &KdeContent, ctx: &mut Context<'_>) -> Result<()> {
    ctx.observer.info(&format!(
        "   plotting KDE from file \"{}\"",
        item.hdf5_file.display()
    ));
    let file = ctx.loader.load_data_file(&item.hdf5_file)?;
    let data = file.column(&item.variable)?;

    let kde = GaussianKde::silverman(&data, item.bandwidth.unwrap_or(1.0))?;
    ctx.observer.debug(&format!(
        "   kernel bandwidth for '{}': {:.4e}",
        item.variable,
        kde.bandwidth()
    ));

    let (xmin, xmax) =
        infer_range(&mut ctx.frame.xrange, &data, &item.variable, ctx.axes, Axes::set_xlim)?;
    let x = linspace(xmin, xmax, POINTS);
    let y = x.iter().map(|&v| kde.evaluate(v)).collect();

    ctx.axes
        .plot(x, y)
        .color(item.color.clone())
        .label(item.label.clone())
        .build();
    Ok(())
}
