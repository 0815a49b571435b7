//! A [`Backend`] described by a YAML manifest.
//!
//! ```yaml
//! version: 1.0.3
//! parameters:
//!   CKM::abs(V_ub): { central: 3.7e-3, latex: '$|V_{ub}|$' }
//!   mass::B_d: 5.2796
//! observables:
//!   B->pilnu::dBR/dq2: '{CKM::abs(V_ub)}^2 * 1e5 * (1 - q2 / {mass::B_d}^2)^3'
//! constraints:
//!   B->pilnu::BR@Example:
//!     type: Gaussian
//!     ...
//! ```

use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use serde::Deserialize;

use crate::backend::{Backend, Kinematics, Observable, Options, Parameters};
use crate::error::{Error, Result};
use crate::expr::Expr;

#[derive(Deserialize, Debug, Clone)]
#[serde(untagged)]
enum ParameterEntry {
    Central(f64),
    Detailed {
        central: f64,
        #[serde(default)]
        latex: Option<String>,
    },
}

#[derive(Deserialize, Debug, Clone)]
pub struct ManifestBackend {
    #[serde(default = "default_version")]
    version: String,
    #[serde(default)]
    parameters: IndexMap<String, ParameterEntry>,
    #[serde(default)]
    observables: IndexMap<String, Expr>,
    #[serde(default)]
    constraints: IndexMap<String, serde_yaml::Value>,
}

fn default_version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}

impl ManifestBackend {
    /// Load a manifest from a YAML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
        let backend = Self::from_yaml_str(&text)?;
        debug!(
            "loaded manifest '{}': {} parameters, {} observables, {} constraints",
            path.display(),
            backend.parameters.len(),
            backend.observables.len(),
            backend.constraints.len()
        );
        Ok(backend)
    }

    pub fn from_yaml_str(text: &str) -> Result<Self> {
        Ok(serde_yaml::from_str(text)?)
    }
}

impl Backend for ManifestBackend {
    fn version(&self) -> &str {
        &self.version
    }

    fn default_parameters(&self) -> Parameters {
        let mut parameters = Parameters::new();
        for (name, entry) in &self.parameters {
            match entry {
                ParameterEntry::Central(central) => parameters.declare(name, *central, None),
                ParameterEntry::Detailed { central, latex } => {
                    parameters.declare(name, *central, latex.clone())
                }
            }
        }
        parameters
    }

    fn make_observable(
        &self,
        name: &str,
        parameters: &Parameters,
        kinematics: &Kinematics,
        _options: &Options,
    ) -> Result<Box<dyn Observable>> {
        let expr = self
            .observables
            .get(name)
            .ok_or_else(|| Error::value(format!("unknown observable '{}'", name)))?;

        if let Some(missing) = expr
            .variables()
            .into_iter()
            .find(|v| !kinematics.contains(v) && !parameters.contains(v))
        {
            return Err(Error::value(format!(
                "observable '{}' depends on '{}', which is neither a kinematic variable nor a parameter",
                name, missing
            )));
        }

        Ok(Box::new(ExpressionObservable {
            name: name.to_string(),
            expr: expr.clone(),
        }))
    }

    fn constraint(&self, name: &str) -> Result<Option<String>> {
        match self.constraints.get(name) {
            Some(entry) => Ok(Some(serde_yaml::to_string(entry)?)),
            None => Ok(None),
        }
    }
}

/// An observable defined by an expression over kinematic variables and
/// parameters. Kinematic variables shadow parameters of the same name.
struct ExpressionObservable {
    name: String,
    expr: Expr,
}

impl Observable for ExpressionObservable {
    fn name(&self) -> &str {
        &self.name
    }

    fn evaluate(&self, parameters: &Parameters, kinematics: &Kinematics) -> Result<f64> {
        self.expr
            .evaluate(&|var| kinematics.get(var).or_else(|| parameters.value(var)))
            .map_err(|e| Error::Evaluation(format!("{}: {}", self.name, e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::variable_to_latex;

    const MANIFEST: &str = r#"
version: 1.0.3
parameters:
  a: { central: 2.0, latex: '$a$' }
  b: 3.0
observables:
  linear: 'a * q2 + b'
  broken: 'a * missing'
constraints:
  point:
    type: Gaussian
    kinematics: { q2: 1.0 }
    mean: 5.0
"#;

    #[test]
    fn test_make_and_evaluate() {
        let backend = ManifestBackend::from_yaml_str(MANIFEST).unwrap();
        assert_eq!(backend.version(), "1.0.3");

        let mut params = backend.default_parameters();
        let mut kin = Kinematics::new();
        kin.declare("q2", f64::NAN);
        let obs = backend
            .make_observable("linear", &params, &kin, &Options::new())
            .unwrap();

        kin.set("q2", 2.0).unwrap();
        assert_eq!(obs.evaluate(&params, &kin).unwrap(), 7.0);
        params.set("b", 0.0).unwrap();
        assert_eq!(obs.evaluate(&params, &kin).unwrap(), 4.0);
    }

    #[test]
    fn test_unknown_observable_and_unresolved_variable() {
        let backend = ManifestBackend::from_yaml_str(MANIFEST).unwrap();
        let params = backend.default_parameters();
        let kin = Kinematics::new();
        let opts = Options::new();
        assert!(matches!(
            backend.make_observable("nope", &params, &kin, &opts),
            Err(Error::Value(_))
        ));
        assert!(matches!(
            backend.make_observable("broken", &params, &kin, &opts),
            Err(Error::Value(_))
        ));
    }

    #[test]
    fn test_constraint_serialisation_and_latex() {
        let backend = ManifestBackend::from_yaml_str(MANIFEST).unwrap();
        let text = backend.constraint("point").unwrap().unwrap();
        assert!(text.contains("type: Gaussian"));
        assert!(backend.constraint("other").unwrap().is_none());

        assert_eq!(variable_to_latex(&backend, "a"), "$a$");
        assert_eq!(variable_to_latex(&backend, "b"), "\\verb{b}");
        assert_eq!(variable_to_latex(&backend, "q2"), "\\verb{q2}");
    }

    #[test]
    fn test_bad_expression_fails_to_load() {
        let err = ManifestBackend::from_yaml_str("observables:\n  x: 'a +'\n").unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
    }
}
