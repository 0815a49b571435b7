//! Typed content items.
//!
//! Each raw item of the `contents` list is converted into a [`ContentItem`]
//! right before it is plotted. The item's `type` selects one [`Content`]
//! variant; the remaining keys are deserialised into that variant's record
//! and checked for required and mutually exclusive fields.

use std::fmt;
use std::path::PathBuf;

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::Value;

use crate::error::{Error, Result};
use crate::expr::Expr;
use crate::plotting::{Color, DashPattern};

// ============================================================================
// Content kinds
// ============================================================================

/// The closed set of content types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ContentKind {
    Observable,
    Uncertainty,
    Constraint,
    Contours2D,
    Kde,
    Histogram,
    Histogram2D,
    Function,
    Watermark,
}

impl ContentKind {
    pub const ALL: [ContentKind; 9] = [
        ContentKind::Observable,
        ContentKind::Uncertainty,
        ContentKind::Constraint,
        ContentKind::Contours2D,
        ContentKind::Kde,
        ContentKind::Histogram,
        ContentKind::Histogram2D,
        ContentKind::Function,
        ContentKind::Watermark,
    ];

    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.as_str() == name)
    }

    /// The `type` string used in instruction documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentKind::Observable => "observable",
            ContentKind::Uncertainty => "uncertainty",
            ContentKind::Constraint => "constraint",
            ContentKind::Contours2D => "contours2D",
            ContentKind::Kde => "kde",
            ContentKind::Histogram => "histogram",
            ContentKind::Histogram2D => "histogram2D",
            ContentKind::Function => "function",
            ContentKind::Watermark => "watermark",
        }
    }

    /// Anonymous kinds do not need a `name`.
    pub fn is_anonymous(&self) -> bool {
        matches!(self, ContentKind::Watermark)
    }
}

impl fmt::Display for ContentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ============================================================================
// Typed records
// ============================================================================

/// The variable mapped onto the x axis of an observable curve.
#[derive(Debug, Clone, PartialEq)]
pub enum XVariable {
    Kinematic(String),
    Parameter(String),
}

#[derive(Debug, Clone, PartialEq)]
pub struct ObservableContent {
    pub observable: String,
    /// Explicit parameter values, applied after `parameters_from_file`
    pub parameters: Option<IndexMap<String, f64>>,
    pub parameters_from_file: Option<PathBuf>,
    pub variable: XVariable,
    /// Extra kinematics, only used with a parameter on the x axis
    pub kinematics: IndexMap<String, f64>,
    pub color: Color,
    pub samples: usize,
    pub range: Option<[f64; 2]>,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct UncertaintyContent {
    pub hdf5_file: PathBuf,
    pub range: Option<[f64; 2]>,
    pub color: Color,
    pub opacity: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ConstraintContent {
    pub constraints: Vec<String>,
    pub variable: String,
    pub observable: Option<String>,
    pub rescale_by_width: bool,
    pub color: Color,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Contours2DContent {
    pub hdf5_file: PathBuf,
    pub variables: [String; 2],
    pub bins: usize,
    pub color: Color,
}

#[derive(Debug, Clone, PartialEq)]
pub struct KdeContent {
    pub hdf5_file: PathBuf,
    pub variable: String,
    pub bandwidth: Option<f64>,
    pub color: Color,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HistogramContent {
    pub hdf5_file: PathBuf,
    pub variable: String,
    pub bins: usize,
    pub color: Color,
    pub opacity: f64,
    pub label: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Histogram2DContent {
    pub hdf5_file: PathBuf,
    pub variables: [String; 2],
    pub bins: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionContent {
    pub f: Expr,
    pub color: Color,
    pub opacity: f64,
    pub style: DashPattern,
    pub points: usize,
    pub label: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HorizontalPosition {
    Left,
    Center,
    Right,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerticalPosition {
    Bottom,
    Center,
    Top,
}

impl HorizontalPosition {
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "left" => Ok(HorizontalPosition::Left),
            "center" => Ok(HorizontalPosition::Center),
            "right" => Ok(HorizontalPosition::Right),
            other => Err(Error::value(format!("invalid horizontal position '{}'", other))),
        }
    }
}

impl VerticalPosition {
    pub fn parse(token: &str) -> Result<Self> {
        match token {
            "bottom" => Ok(VerticalPosition::Bottom),
            "center" => Ok(VerticalPosition::Center),
            "top" => Ok(VerticalPosition::Top),
            other => Err(Error::value(format!("invalid vertical position '{}'", other))),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct WatermarkContent {
    pub horizontal: HorizontalPosition,
    pub vertical: VerticalPosition,
    pub preliminary: bool,
}

/// One typed record per content kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Content {
    Observable(ObservableContent),
    Uncertainty(UncertaintyContent),
    Constraint(ConstraintContent),
    Contours2D(Contours2DContent),
    Kde(KdeContent),
    Histogram(HistogramContent),
    Histogram2D(Histogram2DContent),
    Function(FunctionContent),
    Watermark(WatermarkContent),
}

impl Content {
    pub fn kind(&self) -> ContentKind {
        match self {
            Content::Observable(_) => ContentKind::Observable,
            Content::Uncertainty(_) => ContentKind::Uncertainty,
            Content::Constraint(_) => ContentKind::Constraint,
            Content::Contours2D(_) => ContentKind::Contours2D,
            Content::Kde(_) => ContentKind::Kde,
            Content::Histogram(_) => ContentKind::Histogram,
            Content::Histogram2D(_) => ContentKind::Histogram2D,
            Content::Function(_) => ContentKind::Function,
            Content::Watermark(_) => ContentKind::Watermark,
        }
    }
}

/// A validated content item.
#[derive(Debug, Clone, PartialEq)]
pub struct ContentItem {
    pub name: Option<String>,
    pub content: Content,
}

impl ContentItem {
    /// Validate one raw item of the `contents` list.
    pub fn from_value(value: &Value) -> Result<Self> {
        let map = value
            .as_object()
            .ok_or_else(|| Error::config(format!("wrong data type for content item {}", value)))?;

        let name = match map.get("name") {
            None | Some(Value::Null) => None,
            Some(Value::String(name)) => Some(name.clone()),
            Some(other) => Some(other.to_string()),
        };

        let type_name = match map.get("type") {
            Some(Value::String(t)) => t.as_str(),
            Some(_) => return Err(Error::config("content type must be a string")),
            None => {
                return Err(Error::config(format!(
                    "plot content \"{}\" has no type",
                    name.as_deref().unwrap_or("unnamed")
                )));
            }
        };

        let kind = ContentKind::from_name(type_name)
            .ok_or_else(|| Error::config(format!("unknown content type: \"{}\"", type_name)))?;

        if name.is_none() && !kind.is_anonymous() {
            return Err(Error::config(format!("unnamed plot content of type '{}'", kind)));
        }

        let content = match kind {
            ContentKind::Observable => Content::Observable(record::<RawObservable>(value, kind)?.try_into()?),
            ContentKind::Uncertainty => Content::Uncertainty(record::<RawUncertainty>(value, kind)?.try_into()?),
            ContentKind::Constraint => Content::Constraint(record::<RawConstraint>(value, kind)?.try_into()?),
            ContentKind::Contours2D => Content::Contours2D(record::<RawContours2D>(value, kind)?.try_into()?),
            ContentKind::Kde => Content::Kde(record::<RawKde>(value, kind)?.try_into()?),
            ContentKind::Histogram => Content::Histogram(record::<RawHistogram>(value, kind)?.try_into()?),
            ContentKind::Histogram2D => Content::Histogram2D(record::<RawHistogram2D>(value, kind)?.try_into()?),
            ContentKind::Function => Content::Function(record::<RawFunction>(value, kind)?.try_into()?),
            ContentKind::Watermark => Content::Watermark(record::<RawWatermark>(value, kind)?.try_into()?),
        };

        Ok(ContentItem { name, content })
    }

    pub fn kind(&self) -> ContentKind {
        self.content.kind()
    }
}

// ============================================================================
// Raw records as written in instruction documents
// ============================================================================

fn record<T: DeserializeOwned>(value: &Value, kind: ContentKind) -> Result<T> {
    T::deserialize(value).map_err(|e| Error::config(format!("invalid {} content: {}", kind, e)))
}

fn require<T>(field: Option<T>, message: &str) -> Result<T> {
    field.ok_or_else(|| Error::config(message))
}

fn color_or(color: Option<String>, default: Color) -> Color {
    color.as_deref().map(Color::parse).unwrap_or(default)
}

fn positive_bins(bins: Option<usize>) -> Result<usize> {
    match bins {
        None => Ok(DEFAULT_BINS),
        Some(0) => Err(Error::value("number of bins must be positive")),
        Some(n) => Ok(n),
    }
}

const DEFAULT_BINS: usize = 100;

#[derive(Deserialize)]
#[serde(untagged)]
enum OneOrMany {
    One(String),
    Many(Vec<String>),
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawObservable {
    observable: Option<String>,
    #[serde(default)]
    parameters: Option<IndexMap<String, f64>>,
    #[serde(default)]
    parameters_from_file: Option<PathBuf>,
    #[serde(default)]
    kinematic: Option<String>,
    #[serde(default)]
    parameter: Option<String>,
    #[serde(default)]
    kinematics: IndexMap<String, f64>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    samples: Option<usize>,
    #[serde(default)]
    range: Option<[f64; 2]>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawObservable> for ObservableContent {
    type Error = Error;

    fn try_from(raw: RawObservable) -> Result<Self> {
        let observable = require(raw.observable, "no observable specified")?;
        let variable = match (raw.kinematic, raw.parameter) {
            (Some(k), None) => XVariable::Kinematic(k),
            (None, Some(p)) => XVariable::Parameter(p),
            (None, None) => {
                return Err(Error::config(
                    "neither kinematic nor parameter found; do not know how to map x to a variable",
                ));
            }
            (Some(_), Some(_)) => {
                return Err(Error::config(
                    "both kinematic and parameter found; do not know how to map x to a variable",
                ));
            }
        };
        Ok(ObservableContent {
            observable,
            parameters: raw.parameters,
            parameters_from_file: raw.parameters_from_file,
            variable,
            kinematics: raw.kinematics,
            color: color_or(raw.color, Color::BLACK),
            samples: raw.samples.unwrap_or(100),
            range: raw.range,
            label: raw.label,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawUncertainty {
    hdf5_file: Option<PathBuf>,
    #[serde(default)]
    range: Option<[f64; 2]>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawUncertainty> for UncertaintyContent {
    type Error = Error;

    fn try_from(raw: RawUncertainty) -> Result<Self> {
        Ok(UncertaintyContent {
            hdf5_file: require(raw.hdf5_file, "no hdf5-file specified")?,
            range: raw.range,
            color: color_or(raw.color, Color::BLACK),
            opacity: raw.opacity.unwrap_or(1.0),
            label: raw.label,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawConstraint {
    constraints: Option<OneOrMany>,
    variable: Option<String>,
    #[serde(default)]
    observable: Option<String>,
    #[serde(default)]
    rescale_by_width: bool,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawConstraint> for ConstraintContent {
    type Error = Error;

    fn try_from(raw: RawConstraint) -> Result<Self> {
        let constraints = match require(raw.constraints, "no constraints specified")? {
            OneOrMany::One(name) => vec![name],
            OneOrMany::Many(names) => names,
        };
        Ok(ConstraintContent {
            constraints,
            variable: require(raw.variable, "no variable specified")?,
            observable: raw.observable,
            rescale_by_width: raw.rescale_by_width,
            color: color_or(raw.color, Color::BLACK),
            label: raw.label,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawContours2D {
    hdf5_file: Option<PathBuf>,
    variables: Option<[String; 2]>,
    #[serde(default)]
    bins: Option<usize>,
    #[serde(default)]
    color: Option<String>,
}

impl TryFrom<RawContours2D> for Contours2DContent {
    type Error = Error;

    fn try_from(raw: RawContours2D) -> Result<Self> {
        Ok(Contours2DContent {
            hdf5_file: require(raw.hdf5_file, "no hdf5-file specified")?,
            variables: require(raw.variables, "no variables specified")?,
            bins: positive_bins(raw.bins)?,
            color: color_or(raw.color, Color::ORANGE_RED),
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawKde {
    hdf5_file: Option<PathBuf>,
    variable: Option<String>,
    #[serde(default)]
    bandwidth: Option<f64>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawKde> for KdeContent {
    type Error = Error;

    fn try_from(raw: RawKde) -> Result<Self> {
        if let Some(bw) = raw.bandwidth {
            if !(bw > 0.0 && bw.is_finite()) {
                return Err(Error::value(format!("bandwidth must be positive, got {}", bw)));
            }
        }
        Ok(KdeContent {
            hdf5_file: require(raw.hdf5_file, "no hdf5-file specified")?,
            variable: require(raw.variable, "no variable specified")?,
            bandwidth: raw.bandwidth,
            color: color_or(raw.color, Color::BLUE),
            label: raw.label,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawHistogram {
    hdf5_file: Option<PathBuf>,
    variable: Option<String>,
    #[serde(default)]
    bins: Option<usize>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawHistogram> for HistogramContent {
    type Error = Error;

    fn try_from(raw: RawHistogram) -> Result<Self> {
        Ok(HistogramContent {
            hdf5_file: require(raw.hdf5_file, "no hdf5-file specified")?,
            variable: require(raw.variable, "no variable specified")?,
            bins: positive_bins(raw.bins)?,
            color: color_or(raw.color, Color::BLUE),
            opacity: raw.opacity.unwrap_or(0.3),
            label: raw.label,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawHistogram2D {
    hdf5_file: Option<PathBuf>,
    variables: Option<[String; 2]>,
    #[serde(default)]
    bins: Option<usize>,
}

impl TryFrom<RawHistogram2D> for Histogram2DContent {
    type Error = Error;

    fn try_from(raw: RawHistogram2D) -> Result<Self> {
        Ok(Histogram2DContent {
            hdf5_file: require(raw.hdf5_file, "no hdf5-file specified")?,
            variables: require(raw.variables, "no variables specified")?,
            bins: positive_bins(raw.bins)?,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawFunction {
    f: Option<String>,
    #[serde(default)]
    color: Option<String>,
    #[serde(default)]
    opacity: Option<f64>,
    #[serde(default)]
    style: Option<String>,
    #[serde(default)]
    points: Option<usize>,
    #[serde(default)]
    label: Option<String>,
}

impl TryFrom<RawFunction> for FunctionContent {
    type Error = Error;

    fn try_from(raw: RawFunction) -> Result<Self> {
        let source = require(raw.f, "no function specified")?;
        let f = Expr::parse(&source)
            .map_err(|e| Error::value(format!("invalid function '{}': {}", source, e)))?;
        let style = match raw.style.as_deref() {
            None => DashPattern::Solid,
            Some(s) => DashPattern::parse(s)
                .ok_or_else(|| Error::value(format!("invalid line style '{}'", s)))?,
        };
        Ok(FunctionContent {
            f,
            color: color_or(raw.color, Color::BLACK),
            opacity: raw.opacity.unwrap_or(1.0),
            style,
            points: raw.points.unwrap_or(100),
            label: raw.label,
        })
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "kebab-case")]
struct RawWatermark {
    #[serde(default)]
    position: Option<[String; 2]>,
    #[serde(default)]
    preliminary: bool,
}

impl TryFrom<RawWatermark> for WatermarkContent {
    type Error = Error;

    fn try_from(raw: RawWatermark) -> Result<Self> {
        let (horizontal, vertical) = match raw.position {
            Some([h, v]) => (HorizontalPosition::parse(&h)?, VerticalPosition::parse(&v)?),
            None => (HorizontalPosition::Right, VerticalPosition::Top),
        };
        Ok(WatermarkContent {
            horizontal,
            vertical,
            preliminary: raw.preliminary,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_kind_names_round_trip() {
        for kind in ContentKind::ALL {
            assert_eq!(ContentKind::from_name(kind.as_str()), Some(kind));
        }
        assert_eq!(ContentKind::from_name("scatter"), None);
    }

    #[test]
    fn test_item_shape_errors() {
        assert!(matches!(
            ContentItem::from_value(&json!("watermark")),
            Err(Error::Configuration(_))
        ));
        assert!(matches!(
            ContentItem::from_value(&json!({ "name": "no type" })),
            Err(Error::Configuration(_))
        ));
        let unknown = ContentItem::from_value(&json!({ "type": "scatter", "name": "s" }));
        assert!(matches!(unknown, Err(Error::Configuration(ref m)) if m.contains("unknown content type")));
        let unnamed = ContentItem::from_value(&json!({ "type": "function", "f": "x" }));
        assert!(matches!(unnamed, Err(Error::Configuration(ref m)) if m.contains("unnamed")));
    }

    #[test]
    fn test_watermark_is_anonymous_with_defaults() {
        let item = ContentItem::from_value(&json!({ "type": "watermark" })).unwrap();
        assert_eq!(item.name, None);
        assert_eq!(
            item.content,
            Content::Watermark(WatermarkContent {
                horizontal: HorizontalPosition::Right,
                vertical: VerticalPosition::Top,
                preliminary: false,
            })
        );

        let bad = ContentItem::from_value(&json!({ "type": "watermark", "position": ["middle", "top"] }));
        assert!(matches!(bad, Err(Error::Value(_))));
    }

    #[test]
    fn test_observable_variable_is_exclusive() {
        let both = json!({
            "type": "observable", "name": "o", "observable": "obs",
            "kinematic": "q2", "parameter": "mass::b",
        });
        assert!(matches!(ContentItem::from_value(&both), Err(Error::Configuration(_))));

        let neither = json!({ "type": "observable", "name": "o", "observable": "obs" });
        assert!(matches!(ContentItem::from_value(&neither), Err(Error::Configuration(_))));

        let item = ContentItem::from_value(&json!({
            "type": "observable", "name": "o", "observable": "obs", "parameter": "a",
            "kinematics": { "q2": 1.0 }, "range": [0.0, 1.0],
        }))
        .unwrap();
        let Content::Observable(obs) = item.content else {
            panic!("expected observable content");
        };
        assert_eq!(obs.variable, XVariable::Parameter("a".into()));
        assert_eq!(obs.samples, 100);
        assert_eq!(obs.color, Color::BLACK);
        assert_eq!(obs.kinematics.get("q2"), Some(&1.0));
    }

    #[test]
    fn test_file_backed_items_require_file() {
        for kind in ["uncertainty", "contours2D", "kde", "histogram", "histogram2D"] {
            let item = json!({ "type": kind, "name": "n", "variable": "x", "variables": ["x", "y"] });
            let err = ContentItem::from_value(&item).unwrap_err();
            assert!(
                matches!(err, Error::Configuration(ref m) if m == "no hdf5-file specified"),
                "{}: {}",
                kind,
                err
            );
        }
    }

    #[test]
    fn test_defaults_and_overrides() {
        let item = ContentItem::from_value(&json!({
            "type": "histogram", "name": "h", "hdf5-file": "s.csv", "variable": "x",
        }))
        .unwrap();
        let Content::Histogram(h) = item.content else {
            panic!("expected histogram content");
        };
        assert_eq!((h.bins, h.opacity, h.color), (100, 0.3, Color::BLUE));

        let item = ContentItem::from_value(&json!({
            "type": "constraint", "name": "c", "constraints": "B->pi::BR", "variable": "q2",
        }))
        .unwrap();
        let Content::Constraint(c) = item.content else {
            panic!("expected constraint content");
        };
        assert_eq!(c.constraints, vec!["B->pi::BR".to_string()]);
        assert!(!c.rescale_by_width);

        let zero_bins = json!({ "type": "histogram2D", "name": "h", "hdf5-file": "s.csv", "variables": ["x", "y"], "bins": 0 });
        assert!(matches!(ContentItem::from_value(&zero_bins), Err(Error::Value(_))));
    }

    #[test]
    fn test_function_record() {
        let item = ContentItem::from_value(&json!({
            "type": "function", "name": "f", "f": "2 * x", "style": "--", "points": 10,
        }))
        .unwrap();
        let Content::Function(f) = item.content else {
            panic!("expected function content");
        };
        assert_eq!(f.style, DashPattern::Dashed);
        assert_eq!(f.points, 10);

        let bad_style = json!({ "type": "function", "name": "f", "f": "x", "style": "~" });
        assert!(matches!(ContentItem::from_value(&bad_style), Err(Error::Value(_))));
        let bad_expr = json!({ "type": "function", "name": "f", "f": "x +" });
        assert!(matches!(ContentItem::from_value(&bad_expr), Err(Error::Value(_))));
        let missing = json!({ "type": "function", "name": "f" });
        assert!(matches!(ContentItem::from_value(&missing), Err(Error::Configuration(_))));
    }
}
