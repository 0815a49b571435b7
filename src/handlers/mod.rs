//! Content handlers, one module per content kind.
//!
//! Every handler consumes one validated content record and draws onto the
//! shared axes through a [`Context`]. Handlers run strictly in document
//! order; range state inferred by one is visible to the next.

mod constraint;
mod contours;
mod function;
mod histogram;
mod kde;
mod observable;
mod uncertainty;
mod watermark;

pub use contours::credible_levels;
pub use watermark::position;

use crate::backend::Backend;
use crate::content::{Content, ContentItem};
use crate::data::DataLoader;
use crate::error::{Error, Result};
use crate::frame::{FrameState, RangeState};
use crate::observer::PlotObserver;
use crate::plotting::Axes;

/// Shared state handed to every handler.
pub struct Context<'a> {
    pub axes: &'a mut Axes,
    pub frame: &'a mut FrameState,
    pub backend: &'a dyn Backend,
    pub loader: &'a dyn DataLoader,
    pub observer: &'a dyn PlotObserver,
}

/// Draw one content item.
pub fn plot(item: &ContentItem, ctx: &mut Context<'_>) -> Result<()> {
    match &item.content {
        Content::Observable(content) => observable::plot(content, ctx),
        Content::Uncertainty(content) => uncertainty::plot(content, ctx),
        Content::Constraint(content) => constraint::plot(content, ctx),
        Content::Contours2D(content) => contours::plot(content, ctx),
        Content::Kde(content) => kde::plot(content, ctx),
        Content::Histogram(content) => histogram::plot_1d(content, ctx),
        Content::Histogram2D(content) => histogram::plot_2d(content, ctx),
        Content::Function(content) => function::plot(content, ctx),
        Content::Watermark(content) => watermark::plot(content, ctx),
    }
}

/// Smallest and largest finite value.
fn extent(values: &[f64]) -> Option<(f64, f64)> {
    let mut finite = values.iter().copied().filter(|v| v.is_finite());
    let first = finite.next()?;
    Some(finite.fold((first, first), |(lo, hi), v| (lo.min(v), hi.max(v))))
}

/// Infer a range from `values` unless `state` is already set, and apply
/// the resulting limits to the axes through `set_lim`. Returns the range
/// in effect.
fn infer_range(
    state: &mut RangeState,
    values: &[f64],
    variable: &str,
    axes: &mut Axes,
    set_lim: fn(&mut Axes, f64, f64) -> &mut Axes,
) -> Result<(f64, f64)> {
    let (lo, hi) = match state.get() {
        Some(range) => range,
        None => extent(values)
            .ok_or_else(|| Error::value(format!("no finite samples of '{}'", variable)))?,
    };
    let (lo, hi) = state.infer(lo, hi);
    set_lim(axes, lo, hi);
    Ok((lo, hi))
}

#[cfg(test)]
pub(crate) mod testing {
    use std::io::Write;

    use crate::data::CsvLoader;
    use crate::frame::FrameState;
    use crate::manifest::ManifestBackend;
    use crate::observer::testing::RecordingObserver;
    use crate::plotting::Axes;

    use super::Context;

    pub const MANIFEST: &str = r#"
version: 1.0.3
parameters:
  a: { central: 2.0, latex: '$a$' }
observables:
  line: 'a * q2'
"#;

    pub fn write_csv(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    /// Everything a handler borrows, owned in one place.
    pub struct Harness {
        pub axes: Axes,
        pub frame: FrameState,
        pub backend: ManifestBackend,
        pub observer: RecordingObserver,
    }

    impl Harness {
        pub fn new() -> Self {
            Harness {
                axes: Axes::new(),
                frame: FrameState::default(),
                backend: ManifestBackend::from_yaml_str(MANIFEST).unwrap(),
                observer: RecordingObserver::default(),
            }
        }

        pub fn context(&mut self) -> Context<'_> {
            Context {
                axes: &mut self.axes,
                frame: &mut self.frame,
                backend: &self.backend,
                loader: &CsvLoader,
                observer: &self.observer,
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extent_skips_non_finite() {
        assert_eq!(extent(&[f64::NAN, 3.0, -1.0, f64::INFINITY]), Some((-1.0, 3.0)));
        assert_eq!(extent(&[f64::NAN]), None);
    }

    #[test]
    fn test_infer_range_respects_explicit() {
        let mut axes = Axes::new();
        let mut state = RangeState::Explicit(0.0, 1.0);
        infer_range(&mut state, &[5.0, 6.0], "x", &mut axes, Axes::set_xlim).unwrap();
        assert_eq!(state, RangeState::Explicit(0.0, 1.0));
        assert_eq!(axes.x_range(), (0.0, 1.0));

        let mut state = RangeState::Unset;
        infer_range(&mut state, &[5.0, 6.0], "y", &mut axes, Axes::set_ylim).unwrap();
        assert_eq!(state, RangeState::Inferred(5.0, 6.0));
        assert_eq!(axes.y_range(), (5.0, 6.0));

        let mut state = RangeState::Unset;
        let err = infer_range(&mut state, &[f64::NAN], "y", &mut axes, Axes::set_ylim);
        assert!(matches!(err, Err(Error::Value(_))));
    }
}
