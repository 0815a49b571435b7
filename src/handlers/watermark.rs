//! The EOS watermark.

use crate::content::{HorizontalPosition, VerticalPosition, WatermarkContent};
use crate::error::Result;
use crate::plotting::style::{DominantBaseline, TextAnchor};
use crate::plotting::{Annotation, Color, FillStyle, TextStyle};

use super::Context;

/// Distance from the axes edges, in axes fractions.
const MARGIN: (f64, f64) = (0.04, 0.04);

const FONT_SIZE: f64 = 15.0;

/// Where the watermark is anchored, in axes fractions.
pub fn position(horizontal: HorizontalPosition, vertical: VerticalPosition) -> (f64, f64) {
    let (dx, dy) = MARGIN;
    let x = match horizontal {
        HorizontalPosition::Left => dx,
        HorizontalPosition::Center => 0.5,
        HorizontalPosition::Right => 1.0 - dx,
    };
    let y = match vertical {
        VerticalPosition::Bottom => dy,
        VerticalPosition::Center => 0.5,
        VerticalPosition::Top => 1.0 - dy,
    };
    (x, y)
}

fn text_and_color(preliminary: bool, version: &str) -> (String, Color) {
    if preliminary {
        ("EOS Preliminary".to_string(), Color::RED)
    } else {
        (format!("EOS v{}", version), Color::ORANGE_RED)
    }
}

pub(super) fn plot(item: &WatermarkContent, ctx: &mut Context<'_>) -> Result<()> {
    let (x, y) = position(item.horizontal, item.vertical);
    let (text, color) = text_and_color(item.preliminary, ctx.backend.version());

    let anchor = match item.horizontal {
        HorizontalPosition::Left => TextAnchor::Start,
        HorizontalPosition::Center => TextAnchor::Middle,
        HorizontalPosition::Right => TextAnchor::End,
    };
    let baseline = match item.vertical {
        VerticalPosition::Bottom => DominantBaseline::Auto,
        VerticalPosition::Center => DominantBaseline::Middle,
        VerticalPosition::Top => DominantBaseline::Hanging,
    };
    let style = TextStyle::new()
        .font_size(FONT_SIZE)
        .bold()
        .color(color)
        .opacity(0.5)
        .anchor(anchor)
        .baseline(baseline);

    ctx.axes.annotate(
        Annotation::new(text, x, y)
            .style(style)
            .bbox(FillStyle::new(Color::WHITE).opacity(0.5)),
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::handlers::testing::Harness;
    use crate::plotting::Figure;

    #[test]
    fn test_corner_positions() {
        assert_eq!(
            position(HorizontalPosition::Left, VerticalPosition::Bottom),
            (0.04, 0.04)
        );
        assert_eq!(
            position(HorizontalPosition::Right, VerticalPosition::Top),
            (0.96, 0.96)
        );
        assert_eq!(
            position(HorizontalPosition::Center, VerticalPosition::Center),
            (0.5, 0.5)
        );
    }

    #[test]
    fn test_text_follows_preliminary_flag() {
        assert_eq!(
            text_and_color(true, "1.0.3"),
            ("EOS Preliminary".to_string(), Color::RED)
        );
        assert_eq!(
            text_and_color(false, "1.0.3"),
            ("EOS v1.0.3".to_string(), Color::ORANGE_RED)
        );
    }

    #[test]
    fn test_watermark_is_rendered() {
        let mut harness = Harness::new();
        let item = WatermarkContent {
            horizontal: HorizontalPosition::Right,
            vertical: VerticalPosition::Top,
            preliminary: false,
        };
        plot(&item, &mut harness.context()).unwrap();

        let mut figure = Figure::default();
        *figure.gca() = harness.axes;
        let svg = figure.render();
        assert!(svg.contains("EOS v1.0.3"));
        assert!(svg.contains("text-anchor=\"end\""));
    }
}
