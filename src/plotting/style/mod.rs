//! Styling module: colors, line, fill and text styles.

pub mod color;
pub mod fill_style;
pub mod line_style;
pub mod text_style;

pub use color::{viridis, Color};
pub use fill_style::FillStyle;
pub use line_style::{DashPattern, LineStyle};
pub use text_style::{DominantBaseline, FontWeight, TextAnchor, TextStyle};
