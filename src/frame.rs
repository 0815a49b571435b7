//! Plot frame setup and the axis range state shared by handlers.

use crate::error::{Error, Result};
use crate::instructions::{AxisSpec, PlotFrame};
use crate::plotting::{Axes, Figure, TickFormatter};

/// Centimeters per inch.
const CM_PER_INCH: f64 = 2.54;

/// Tick count hint applied to both axes.
const NUM_TICKS: usize = 5;

/// An axis range and where it came from.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum RangeState {
    #[default]
    Unset,
    /// From the `plot` section
    Explicit(f64, f64),
    /// Derived from the data of an earlier content item
    Inferred(f64, f64),
}

impl RangeState {
    pub fn get(&self) -> Option<(f64, f64)> {
        match *self {
            RangeState::Unset => None,
            RangeState::Explicit(lo, hi) | RangeState::Inferred(lo, hi) => Some((lo, hi)),
        }
    }

    pub fn is_set(&self) -> bool {
        !matches!(self, RangeState::Unset)
    }

    /// Record an inferred range unless one is already set. Returns the
    /// range in effect afterwards.
    pub fn infer(&mut self, lo: f64, hi: f64) -> (f64, f64) {
        if let Some(range) = self.get() {
            return range;
        }
        *self = RangeState::Inferred(lo, hi);
        (lo, hi)
    }
}

/// Range state of both axes.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct FrameState {
    pub xrange: RangeState,
    pub yrange: RangeState,
}

/// Apply the `plot` section to the figure.
pub fn setup(frame: &PlotFrame, figure: &mut Figure) -> Result<FrameState> {
    if let Some([width, height]) = frame.size {
        figure.set_size_inches(width / CM_PER_INCH, height / CM_PER_INCH)?;
    }

    let axes = figure.gca();
    axes.x_axis.num_ticks = NUM_TICKS;
    axes.y_axis.num_ticks = NUM_TICKS;

    let mut state = FrameState::default();

    if let Some(x) = &frame.x {
        if let Some([lo, hi]) = x.range {
            check_range("x", lo, hi)?;
            axes.set_xlim(lo, hi);
            state.xrange = RangeState::Explicit(lo, hi);
        }
        if let Some(scale) = x.scale {
            axes.x_axis.formatter = scaled(scale)?;
        }
    }

    if let Some(y) = &frame.y {
        if let Some([lo, hi]) = y.range {
            check_range("y", lo, hi)?;
            axes.set_ylim(lo, hi);
            state.yrange = RangeState::Explicit(lo, hi);
        }
        if let Some(scale) = y.scale {
            axes.y_axis.formatter = scaled(scale)?;
        }
    }

    apply_labels(axes, frame);
    Ok(state)
}

fn apply_labels(axes: &mut Axes, frame: &PlotFrame) {
    if let Some(label) = frame.x.as_ref().and_then(AxisSpec::composed_label) {
        axes.set_xlabel(label);
    }
    if let Some(label) = frame.y.as_ref().and_then(AxisSpec::composed_label) {
        axes.set_ylabel(label);
    }
    if let Some(title) = &frame.title {
        axes.set_title(title.clone());
    }
}

/// Explicit ranges must be finite and increasing.
fn check_range(axis: &str, lo: f64, hi: f64) -> Result<()> {
    if !(lo.is_finite() && hi.is_finite() && lo < hi) {
        return Err(Error::value(format!(
            "invalid {} range [{}, {}], expected finite bounds with lower < upper",
            axis, lo, hi
        )));
    }
    Ok(())
}

fn scaled(scale: f64) -> Result<TickFormatter> {
    if scale == 0.0 || !scale.is_finite() {
        return Err(Error::value(format!(
            "axis scale must be finite and non-zero, got {}",
            scale
        )));
    }
    Ok(TickFormatter::Scaled(scale))
}
