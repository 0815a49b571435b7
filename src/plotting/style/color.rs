//! Colors as accepted in instruction documents.
//!
//! Content items name colors the way matplotlib does: CSS names
//! (`"OrangeRed"`), hex strings, the `C0`..`C9` cycle and the single-letter
//! shortcuts. Anything else is passed through to the SVG as-is.

use std::fmt;

/// Represents a color for plotting elements.
#[derive(Debug, Clone, PartialEq)]
pub enum Color {
    /// RGB color with values 0-255
    Rgb(u8, u8, u8),
    /// CSS color name, lower-cased
    Named(String),
}

impl Color {
    /// Create a new RGB color.
    pub fn rgb(r: u8, g: u8, b: u8) -> Self {
        Color::Rgb(r, g, b)
    }

    /// Create a color from a hex string (e.g., "#FF0000" or "FF0000").
    pub fn from_hex(hex: &str) -> Option<Self> {
        let hex = hex.trim_start_matches('#');
        if hex.len() != 6 || !hex.is_ascii() {
            return None;
        }
        let r = u8::from_str_radix(&hex[0..2], 16).ok()?;
        let g = u8::from_str_radix(&hex[2..4], 16).ok()?;
        let b = u8::from_str_radix(&hex[4..6], 16).ok()?;
        Some(Color::Rgb(r, g, b))
    }

    /// Parse a matplotlib-style color specification.
    pub fn parse(spec: &str) -> Self {
        let spec = spec.trim();
        if spec.starts_with('#') {
            if let Some(color) = Color::from_hex(spec) {
                return color;
            }
        }
        let lower = spec.to_lowercase();
        if let Some(hex) = shortcut_hex(&lower) {
            if let Some(color) = Color::from_hex(hex) {
                return color;
            }
        }
        Color::Named(lower)
    }

    /// Convert the color to an SVG-compatible string.
    pub fn to_svg_string(&self) -> String {
        match self {
            Color::Rgb(r, g, b) => format!("rgb({},{},{})", r, g, b),
            Color::Named(name) => name.clone(),
        }
    }

    pub const BLACK: Color = Color::Rgb(0, 0, 0);
    pub const WHITE: Color = Color::Rgb(255, 255, 255);
    pub const RED: Color = Color::Rgb(255, 0, 0);
    pub const BLUE: Color = Color::Rgb(0, 0, 255);
    pub const ORANGE_RED: Color = Color::Rgb(255, 69, 0);
    pub const GRAY: Color = Color::Rgb(128, 128, 128);
}

impl Default for Color {
    fn default() -> Self {
        Color::BLACK
    }
}

impl fmt::Display for Color {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_svg_string())
    }
}

impl From<&str> for Color {
    fn from(s: &str) -> Self {
        Color::parse(s)
    }
}

impl From<String> for Color {
    fn from(s: String) -> Self {
        Color::parse(&s)
    }
}

impl From<(u8, u8, u8)> for Color {
    fn from((r, g, b): (u8, u8, u8)) -> Self {
        Color::Rgb(r, g, b)
    }
}

/// Matplotlib shortcuts that are not valid CSS names.
fn shortcut_hex(name: &str) -> Option<&'static str> {
    let hex = match name {
        "c0" => "#1f77b4",
        "c1" => "#ff7f0e",
        "c2" => "#2ca02c",
        "c3" => "#d62728",
        "c4" => "#9467bd",
        "c5" => "#8c564b",
        "c6" => "#e377c2",
        "c7" => "#7f7f7f",
        "c8" => "#bcbd22",
        "c9" => "#17becf",
        "b" => "#0000ff",
        "g" => "#008000",
        "r" => "#ff0000",
        "c" => "#00bfbf",
        "m" => "#bf00bf",
        "y" => "#bfbf00",
        "k" => "#000000",
        "w" => "#ffffff",
        _ => return None,
    };
    Some(hex)
}

/// Anchor points of the viridis color map.
const VIRIDIS: [(u8, u8, u8); 9] = [
    (68, 1, 84),
    (71, 44, 122),
    (59, 81, 139),
    (44, 113, 142),
    (33, 144, 141),
    (39, 173, 129),
    (92, 200, 99),
    (170, 220, 50),
    (253, 231, 37),
];

/// Sample the viridis color map at `t` in [0, 1].
pub fn viridis(t: f64) -> Color {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let scaled = t * (VIRIDIS.len() - 1) as f64;
    let lo = scaled.floor() as usize;
    let hi = (lo + 1).min(VIRIDIS.len() - 1);
    let frac = scaled - lo as f64;
    let mix = |a: u8, b: u8| (a as f64 + (b as f64 - a as f64) * frac).round() as u8;
    let (r0, g0, b0) = VIRIDIS[lo];
    let (r1, g1, b1) = VIRIDIS[hi];
    Color::Rgb(mix(r0, r1), mix(g0, g1), mix(b0, b1))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_css_name_is_lowercased() {
        assert_eq!(Color::parse("OrangeRed").to_svg_string(), "orangered");
    }

    #[test]
    fn test_parse_hex_and_cycle() {
        assert_eq!(Color::parse("#ff0000"), Color::RED);
        assert_eq!(Color::parse("C0"), Color::Rgb(0x1f, 0x77, 0xb4));
        assert_eq!(Color::parse("k"), Color::BLACK);
    }

    #[test]
    fn test_viridis_endpoints() {
        assert_eq!(viridis(0.0), Color::Rgb(68, 1, 84));
        assert_eq!(viridis(1.0), Color::Rgb(253, 231, 37));
        assert_eq!(viridis(f64::NAN), Color::Rgb(68, 1, 84));
    }
}
