//! In-house rendering engine.
//! Provides a small matplotlib-like figure/axes API with SVG output.

pub mod axes;
pub mod backend;
pub mod element;
pub mod error;
pub mod figure;
pub mod plot;
pub mod scale;
pub mod style;

pub use axes::Axes;
pub use element::{Annotation, Bounds, LegendPosition, TickFormatter};
pub use error::{PlotError, PlotResult};
pub use figure::Figure;
pub use plot::{ContourSet, ErrorBar, FillBetween, Histogram, Histogram2D, LinePlot, Plot};
pub use style::{Color, DashPattern, FillStyle, LineStyle, TextStyle};
