//! Curves of a restricted expression in `x`.

use crate::content::FunctionContent;
use crate::error::{Error, Result};
use crate::numeric::linspace;

use super::Context;

/// The name the sample value is bound to.
const VARIABLE: &str = "x";

pub(super) fn plot(item: &FunctionContent, ctx: &mut Context<'_>) -> Result<()> {
    if let Some(unknown) = item.f.variables().into_iter().find(|v| v != VARIABLE) {
        return Err(Error::value(format!(
            "function '{}' depends on '{}'; only '{}' is bound",
            item.f, unknown, VARIABLE
        )));
    }

    let (xmin, xmax) = ctx.axes.x_range();
    let x = linspace(xmin, xmax, item.points);
    let y = x
        .iter()
        .map(|&value| {
            item.f
                .evaluate(&|name| (name == VARIABLE).then_some(value))
                .map_err(|e| Error::Evaluation(format!("{}: {}", item.f, e)))
        })
        .collect::<Result<Vec<f64>>>()?;

    ctx.axes
        .plot(x, y)
        .color(item.color.clone())
        .opacity(item.opacity)
        .linestyle(item.style.clone())
        .label(item.label.clone())
        .build();
    Ok(())
}
