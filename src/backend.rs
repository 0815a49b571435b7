//! The evaluation library surface the plotter talks to.
//!
//! Parameters and kinematics are plain named containers owned by the
//! caller; an [`Observable`] reads both on every evaluation, so changing the
//! x variable between calls sweeps the curve.

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::{Error, Result};

// ============================================================================
// Parameters
// ============================================================================

/// A named parameter with its central value and current value.
#[derive(Debug, Clone, PartialEq)]
pub struct Parameter {
    pub name: String,
    pub value: f64,
    pub central: f64,
    pub latex: Option<String>,
}

/// An ordered set of parameters.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters {
    entries: IndexMap<String, Parameter>,
}

/// Value of one entry in a parameter override file.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum OverrideValue {
    Plain(f64),
    Detailed { central: f64 },
}

/// Override files either hold the name/value mapping directly or nest it
/// under a `parameters` key.
#[derive(Deserialize, Debug)]
#[serde(untagged)]
enum OverrideFile {
    Nested { parameters: IndexMap<String, OverrideValue> },
    Flat(IndexMap<String, OverrideValue>),
}

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a parameter, or reset an existing one, to `central`.
    pub fn declare(&mut self, name: &str, central: f64, latex: Option<String>) {
        let entry = self.entries.entry(name.to_string()).or_insert_with(|| Parameter {
            name: name.to_string(),
            value: central,
            central,
            latex: None,
        });
        entry.value = central;
        entry.central = central;
        if latex.is_some() {
            entry.latex = latex;
        }
    }

    /// Set the current value of a known parameter.
    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        match self.entries.get_mut(name) {
            Some(entry) => {
                entry.value = value;
                Ok(())
            }
            None => Err(Error::value(format!("unknown parameter '{}'", name))),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.entries.contains_key(name)
    }

    pub fn value(&self, name: &str) -> Option<f64> {
        self.entries.get(name).map(|p| p.value)
    }

    pub fn central(&self, name: &str) -> Option<f64> {
        self.entries.get(name).map(|p| p.central)
    }

    pub fn latex(&self, name: &str) -> Option<&str> {
        self.entries.get(name).and_then(|p| p.latex.as_deref())
    }

    pub fn iter(&self) -> impl Iterator<Item = &Parameter> {
        self.entries.values()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Set current values from a YAML file of `name: value` or
    /// `name: { central: value }` entries.
    pub fn override_from_file(&mut self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let values = match serde_yaml::from_str(&text)? {
            OverrideFile::Nested { parameters } => parameters,
            OverrideFile::Flat(values) => values,
        };
        for (name, value) in values {
            let value = match value {
                OverrideValue::Plain(v) | OverrideValue::Detailed { central: v } => v,
            };
            self.set(&name, value)?;
        }
        Ok(())
    }
}

// ============================================================================
// Kinematics and options
// ============================================================================

/// Named kinematic variables.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Kinematics {
    values: IndexMap<String, f64>,
}

impl Kinematics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a kinematic variable, overwriting any previous value.
    pub fn declare(&mut self, name: &str, value: f64) {
        self.values.insert(name.to_string(), value);
    }

    pub fn set(&mut self, name: &str, value: f64) -> Result<()> {
        match self.values.get_mut(name) {
            Some(slot) => {
                *slot = value;
                Ok(())
            }
            None => Err(Error::value(format!("unknown kinematic variable '{}'", name))),
        }
    }

    pub fn get(&self, name: &str) -> Option<f64> {
        self.values.get(name).copied()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.values.contains_key(name)
    }
}

/// Observable options (`key=value` pairs).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Options {
    values: IndexMap<String, String>,
}

impl Options {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn declare(&mut self, key: &str, value: &str) {
        self.values.insert(key.to_string(), value.to_string());
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.values.get(key).map(String::as_str)
    }
}

// ============================================================================
// Observables and backends
// ============================================================================

/// A quantity computed from parameters and kinematics.
pub trait Observable {
    fn name(&self) -> &str;

    /// Evaluate at the current parameter and kinematic values.
    fn evaluate(&self, parameters: &Parameters, kinematics: &Kinematics) -> Result<f64>;
}

/// The evaluation library: default parameters, an observable factory and
/// the constraint registry.
pub trait Backend {
    /// Library version, shown in watermarks.
    fn version(&self) -> &str;

    /// A fresh copy of the default parameter set.
    fn default_parameters(&self) -> Parameters;

    /// Build the observable `name`. Fails with a value error when the name
    /// is unknown or its inputs cannot be resolved.
    fn make_observable(
        &self,
        name: &str,
        parameters: &Parameters,
        kinematics: &Kinematics,
        options: &Options,
    ) -> Result<Box<dyn Observable>>;

    /// The serialised (YAML) constraint entry named `name`, or `None` when
    /// no such constraint exists.
    fn constraint(&self, name: &str) -> Result<Option<String>>;
}

/// The LaTeX label of a known parameter, otherwise `\verb{name}`.
pub fn variable_to_latex(backend: &dyn Backend, variable: &str) -> String {
    let parameters = backend.default_parameters();
    match parameters.latex(variable) {
        Some(latex) => latex.to_string(),
        None => format!("\\verb{{{}}}", variable),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_declare_and_set() {
        let mut params = Parameters::new();
        params.declare("mass::b", 4.18, Some("$m_b$".into()));
        params.set("mass::b", 4.2).unwrap();
        assert_eq!(params.value("mass::b"), Some(4.2));
        assert_eq!(params.central("mass::b"), Some(4.18));
        assert_eq!(params.latex("mass::b"), Some("$m_b$"));
        assert!(matches!(params.set("mass::c", 1.0), Err(Error::Value(_))));
    }

    #[test]
    fn test_override_from_file_accepts_both_layouts() {
        let mut params = Parameters::new();
        params.declare("a", 1.0, None);
        params.declare("b", 2.0, None);

        let mut flat = tempfile::NamedTempFile::new().unwrap();
        writeln!(flat, "a: 10.0\nb: {{ central: 20.0 }}").unwrap();
        params.override_from_file(flat.path()).unwrap();
        assert_eq!(params.value("a"), Some(10.0));
        assert_eq!(params.value("b"), Some(20.0));

        let mut nested = tempfile::NamedTempFile::new().unwrap();
        writeln!(nested, "parameters:\n  a: 3.0").unwrap();
        params.override_from_file(nested.path()).unwrap();
        assert_eq!(params.value("a"), Some(3.0));
    }

    #[test]
    fn test_override_from_missing_file() {
        let mut params = Parameters::new();
        let err = params.override_from_file("/nonexistent/params.yaml").unwrap_err();
        assert!(matches!(err, Error::Io { .. }));
    }

    #[test]
    fn test_kinematics_set_requires_declaration() {
        let mut kin = Kinematics::new();
        kin.declare("q2", f64::NAN);
        kin.set("q2", 1.5).unwrap();
        assert_eq!(kin.get("q2"), Some(1.5));
        assert!(kin.set("s", 1.0).is_err());
    }
}
