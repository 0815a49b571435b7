//! Instruction documents.
//!
//! A document has a `plot` section describing the frame and an ordered
//! `contents` list. The frame is deserialised into typed structs up front;
//! content items stay raw until the dispatcher reaches them.

use std::fs;
use std::path::Path;

use serde::Deserialize;
use serde_json::{Map, Value};

use crate::error::{Error, Result};

// ============================================================================
// Plot frame section
// ============================================================================

/// The `plot` section.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct PlotFrame {
    #[serde(default)]
    pub title: Option<String>,
    /// Width and height in centimeters
    #[serde(default)]
    pub size: Option<[f64; 2]>,
    #[serde(default)]
    pub x: Option<AxisSpec>,
    #[serde(default)]
    pub y: Option<AxisSpec>,
    #[serde(default)]
    pub legend: Option<LegendSpec>,
}

/// Per-axis settings under `plot.x` / `plot.y`.
#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct AxisSpec {
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub unit: Option<String>,
    #[serde(default)]
    pub range: Option<[f64; 2]>,
    /// Tick labels show `value / scale`
    #[serde(default)]
    pub scale: Option<f64>,
}

impl AxisSpec {
    /// `label [unit]`, or whichever of the two is present.
    pub fn composed_label(&self) -> Option<String> {
        match (&self.label, &self.unit) {
            (Some(label), Some(unit)) => Some(format!("{} [{}]", label, unit)),
            (Some(label), None) => Some(label.clone()),
            (None, Some(unit)) => Some(format!("[{}]", unit)),
            (None, None) => None,
        }
    }
}

#[derive(Deserialize, Debug, Clone, Default, PartialEq)]
pub struct LegendSpec {
    #[serde(default)]
    pub location: Option<String>,
}

// ============================================================================
// Document
// ============================================================================

/// A parsed instruction document.
#[derive(Debug, Clone, PartialEq)]
pub struct Instructions {
    root: Map<String, Value>,
}

impl Instructions {
    /// Wrap an already parsed document. The root must be a mapping.
    pub fn from_value(value: Value) -> Result<Self> {
        match value {
            Value::Object(root) => Ok(Instructions { root }),
            _ => Err(Error::config("instructions must be a mapping")),
        }
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Self::from_value(serde_yaml::from_str(text)?)
    }

    pub fn from_json_str(text: &str) -> Result<Self> {
        Self::from_value(serde_json::from_str(text)?)
    }

    /// Load from a file; `.json` files are read as JSON, everything else as
    /// YAML.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let is_json = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("json"));
        if is_json {
            Self::from_json_str(&text)
        } else {
            Self::from_yaml_str(&text)
        }
    }

    /// The typed `plot` section.
    pub fn plot(&self) -> Result<PlotFrame> {
        let section = self
            .root
            .get("plot")
            .ok_or_else(|| Error::config("no plot metadata specified"))?;
        PlotFrame::deserialize(section)
            .map_err(|e| Error::config(format!("invalid plot metadata: {}", e)))
    }

    /// The raw `contents` items in document order; empty if absent.
    pub fn contents(&self) -> Result<&[Value]> {
        match self.root.get("contents") {
            None | Some(Value::Null) => Ok(&[]),
            Some(Value::Array(items)) => Ok(items),
            Some(_) => Err(Error::config("contents must be a sequence")),
        }
    }
}
