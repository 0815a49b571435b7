//! Measurements from the constraint registry, drawn as error bars.
//!
//! Each registry entry is serialised as YAML with a `type` tag naming its
//! likelihood shape. A kinematic point becomes a marker; a bin given by
//! `<variable>_min`/`<variable>_max` becomes a marker at the bin center with
//! a horizontal error bar spanning the bin.

use indexmap::IndexMap;
use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::content::ConstraintContent;
use crate::error::{Error, Result};
use crate::plotting::ErrorBar;

use super::Context;

// ============================================================================
// Serialised constraint entries
// ============================================================================

#[derive(Deserialize, Debug, Clone, Copy)]
struct Asymmetric {
    hi: f64,
    lo: f64,
}

#[derive(Deserialize, Debug)]
struct Gaussian {
    kinematics: IndexMap<String, f64>,
    mean: f64,
    #[serde(rename = "sigma-stat")]
    sigma_stat: Asymmetric,
    #[serde(rename = "sigma-sys")]
    sigma_sys: Asymmetric,
}

#[derive(Deserialize, Debug)]
struct MultivariateGaussianCovariance {
    dim: usize,
    covariance: Vec<Vec<f64>>,
    observables: Vec<String>,
    means: Vec<f64>,
    kinematics: Vec<IndexMap<String, f64>>,
}

#[derive(Deserialize, Debug)]
#[serde(rename_all = "kebab-case")]
struct MultivariateGaussian {
    dim: usize,
    sigma_stat_hi: Vec<f64>,
    sigma_stat_lo: Vec<f64>,
    sigma_sys: Vec<f64>,
    observables: Vec<String>,
    means: Vec<f64>,
    kinematics: Vec<IndexMap<String, f64>>,
}

/// Errorbar data accumulated over all constraints of one item.
#[derive(Debug, Default, PartialEq)]
struct Series {
    x: Vec<f64>,
    xerr: Vec<f64>,
    y: Vec<f64>,
    /// (below, above)
    yerr: Vec<(f64, f64)>,
}

/// Position of a measurement along the x variable.
#[derive(Debug, Clone, Copy, PartialEq)]
struct Abscissa {
    x: f64,
    xerr: f64,
    /// Divisor applied to values and errors
    width: f64,
}

fn abscissa(
    kinematics: &IndexMap<String, f64>,
    variable: &str,
    rescale_by_width: bool,
    constraint: &str,
) -> Result<Abscissa> {
    if let Some(&x) = kinematics.get(variable) {
        return Ok(Abscissa {
            x,
            xerr: 0.0,
            width: 1.0,
        });
    }
    let min = kinematics.get(&format!("{}_min", variable));
    let max = kinematics.get(&format!("{}_max", variable));
    match (min, max) {
        (Some(&min), Some(&max)) => Ok(Abscissa {
            x: (max + min) / 2.0,
            xerr: (max - min) / 2.0,
            width: if rescale_by_width { max - min } else { 1.0 },
        }),
        _ => Err(Error::value(format!(
            "constraint '{}' has neither kinematic '{}' nor a '{}_min'/'{}_max' bin",
            constraint, variable, variable, variable
        ))),
    }
}

fn entry<T: DeserializeOwned>(value: serde_yaml::Value, name: &str) -> Result<T> {
    serde_yaml::from_value(value)
        .map_err(|e| Error::value(format!("malformed constraint '{}': {}", name, e)))
}

fn at<'v, T>(values: &'v [T], index: usize, field: &str, name: &str) -> Result<&'v T> {
    values.get(index).ok_or_else(|| {
        Error::value(format!(
            "constraint '{}' has too few entries in '{}'",
            name, field
        ))
    })
}

fn require_observable<'a>(item: &'a ConstraintContent, kind: &str) -> Result<&'a str> {
    item.observable.as_deref().ok_or_else(|| {
        Error::config(format!(
            "observable needs to be specified for {} constraints",
            kind
        ))
    })
}

impl Series {
    /// `below` comes from the `lo` uncertainties and `above` from `hi`.
    fn push(&mut self, pos: Abscissa, mean: f64, below: f64, above: f64) {
        self.x.push(pos.x);
        self.xerr.push(pos.xerr);
        self.y.push(mean / pos.width);
        self.yerr.push((below / pos.width, above / pos.width));
    }

    /// Append the measurements of the serialised constraint `text`.
    fn extend(&mut self, item: &ConstraintContent, name: &str, text: &str) -> Result<()> {
        let value: serde_yaml::Value = serde_yaml::from_str(text)
            .map_err(|e| Error::value(format!("malformed constraint '{}': {}", name, e)))?;
        let kind = value
            .get("type")
            .and_then(serde_yaml::Value::as_str)
            .unwrap_or_default()
            .to_string();

        match kind.as_str() {
            "Gaussian" => {
                let c: Gaussian = entry(value, name)?;
                let pos = abscissa(&c.kinematics, &item.variable, item.rescale_by_width, name)?;
                let above = c.sigma_stat.hi.hypot(c.sigma_sys.hi);
                let below = c.sigma_stat.lo.hypot(c.sigma_sys.lo);
                self.push(pos, c.mean, below, above);
            }
            "MultivariateGaussian(Covariance)" => {
                let observable = require_observable(item, &kind)?;
                let c: MultivariateGaussianCovariance = entry(value, name)?;
                for i in 0..c.dim {
                    if at(&c.observables, i, "observables", name)?.as_str() != observable {
                        continue;
                    }
                    let kinematics = at(&c.kinematics, i, "kinematics", name)?;
                    let row = at(&c.covariance, i, "covariance", name)?;
                    let sigma = at(row, i, "covariance", name)?.sqrt();
                    let pos = abscissa(kinematics, &item.variable, item.rescale_by_width, name)?;
                    self.push(pos, *at(&c.means, i, "means", name)?, sigma, sigma);
                }
            }
            "MultivariateGaussian" => {
                let observable = require_observable(item, &kind)?;
                let c: MultivariateGaussian = entry(value, name)?;
                for i in 0..c.dim {
                    if at(&c.observables, i, "observables", name)?.as_str() != observable {
                        continue;
                    }
                    let kinematics = at(&c.kinematics, i, "kinematics", name)?;
                    let stat = at(&c.sigma_stat_hi, i, "sigma-stat-hi", name)?
                        + at(&c.sigma_stat_lo, i, "sigma-stat-lo", name)?;
                    let sys = at(&c.sigma_sys, i, "sigma-sys", name)?;
                    let sigma = (sys.powi(2) + 0.25 * stat.powi(2)).sqrt();
                    let pos = abscissa(kinematics, &item.variable, item.rescale_by_width, name)?;
                    self.push(pos, *at(&c.means, i, "means", name)?, sigma, sigma);
                }
            }
            _ => {
                return Err(Error::value(format!(
                    "type of constraint '{}' presently not supported: '{}'",
                    name, kind
                )));
            }
        }
        Ok(())
    }
}

pub(super) fn plot(item: &ConstraintContent, ctx: &mut Context<'_>) -> Result<()> {
    let mut series = Series::default();
    for name in &item.constraints {
        ctx.observer.info(&format!("   plotting constraint \"{}\"", name));
        let text = ctx
            .backend
            .constraint(name)?
            .ok_or_else(|| Error::value(format!("unknown constraint {}", name)))?;
        series.extend(item, name, &text)?;
    }

    let mut errorbar = ErrorBar::new(series.x, series.y, series.yerr)
        .xerr(series.xerr)
        .color(item.color.clone());
    if let Some(label) = &item.label {
        errorbar = errorbar.label(label.clone());
    }
    ctx.axes.add_plot(Box::new(errorbar));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{Content, ContentItem};
    use crate::handlers::testing::Harness;
    use crate::manifest::ManifestBackend;
    use serde_json::json;

    const CONSTRAINTS: &str = r#"
constraints:
  point:
    type: Gaussian
    kinematics: { q2: 1.0 }
    mean: 5.0
    sigma-stat: { hi: 3.0, lo: 6.0 }
    sigma-sys: { hi: 4.0, lo: 8.0 }
  bin:
    type: Gaussian
    kinematics: { q2_min: 2.0, q2_max: 6.0 }
    mean: 8.0
    sigma-stat: { hi: 0.0, lo: 0.0 }
    sigma-sys: { hi: 4.0, lo: 4.0 }
  covariance:
    type: MultivariateGaussian(Covariance)
    dim: 3
    observables: [A, B, A]
    means: [1.0, 2.0, 3.0]
    kinematics: [{ q2: 1.0 }, { q2: 2.0 }, { q2_min: 2.0, q2_max: 4.0 }]
    covariance: [[4.0, 0, 0], [0, 1.0, 0], [0, 0, 16.0]]
  correlated:
    type: MultivariateGaussian
    dim: 1
    observables: [A]
    means: [1.0]
    kinematics: [{ q2: 1.0 }]
    sigma-stat-hi: [1.0]
    sigma-stat-lo: [3.0]
    sigma-sys: [0.0]
  exotic:
    type: LogGamma
"#;

    fn item(value: serde_json::Value) -> ConstraintContent {
        match ContentItem::from_value(&value).unwrap().content {
            Content::Constraint(content) => content,
            other => panic!("unexpected content {:?}", other),
        }
    }

    fn series(value: serde_json::Value, name: &str) -> Result<Series> {
        let backend = ManifestBackend::from_yaml_str(CONSTRAINTS).unwrap();
        let text = crate::backend::Backend::constraint(&backend, name).unwrap().unwrap();
        let mut series = Series::default();
        series.extend(&item(value), name, &text)?;
        Ok(series)
    }

    #[test]
    fn test_gaussian_point_and_bin() {
        let point = series(json!({ "type": "constraint", "name": "c", "constraints": "point", "variable": "q2" }), "point").unwrap();
        assert_eq!(point.x, vec![1.0]);
        assert_eq!(point.xerr, vec![0.0]);
        assert_eq!(point.y, vec![5.0]);
        // below from the `lo` uncertainties, above from `hi`
        assert_eq!(point.yerr, vec![(10.0, 5.0)]);

        let bin = series(
            json!({ "type": "constraint", "name": "c", "constraints": "bin", "variable": "q2", "rescale-by-width": true }),
            "bin",
        )
        .unwrap();
        assert_eq!(bin.x, vec![4.0]);
        assert_eq!(bin.xerr, vec![2.0]);
        assert_eq!(bin.y, vec![2.0]);
        assert_eq!(bin.yerr, vec![(1.0, 1.0)]);
    }

    #[test]
    fn test_multivariate_rows_filtered_by_observable() {
        let value = json!({ "type": "constraint", "name": "c", "constraints": "covariance", "variable": "q2", "observable": "A" });
        let s = series(value, "covariance").unwrap();
        assert_eq!(s.x, vec![1.0, 3.0]);
        assert_eq!(s.y, vec![1.0, 3.0]);
        assert_eq!(s.yerr, vec![(2.0, 2.0), (4.0, 4.0)]);

        let value = json!({ "type": "constraint", "name": "c", "constraints": "correlated", "variable": "q2", "observable": "A" });
        let s = series(value, "correlated").unwrap();
        assert_eq!(s.yerr, vec![(2.0, 2.0)]);

        let missing = json!({ "type": "constraint", "name": "c", "constraints": "covariance", "variable": "q2" });
        assert!(matches!(series(missing, "covariance"), Err(Error::Configuration(_))));
    }

    #[test]
    fn test_unsupported_and_unknown_constraints() {
        let value = json!({ "type": "constraint", "name": "c", "constraints": "exotic", "variable": "q2" });
        assert!(matches!(series(value, "exotic"), Err(Error::Value(_))));

        let mut harness = Harness::new();
        harness.backend = ManifestBackend::from_yaml_str(CONSTRAINTS).unwrap();
        let unknown = item(json!({ "type": "constraint", "name": "c", "constraints": ["point", "nope"], "variable": "q2" }));
        assert!(matches!(plot(&unknown, &mut harness.context()), Err(Error::Value(_))));
        assert_eq!(harness.axes.num_plots(), 0);
    }

    /// A registry that knows every name but cannot serialise any entry.
    struct BrokenRegistry;

    impl crate::backend::Backend for BrokenRegistry {
        fn version(&self) -> &str {
            "0.0.0"
        }

        fn default_parameters(&self) -> crate::backend::Parameters {
            crate::backend::Parameters::new()
        }

        fn make_observable(
            &self,
            name: &str,
            _: &crate::backend::Parameters,
            _: &crate::backend::Kinematics,
            _: &crate::backend::Options,
        ) -> Result<Box<dyn crate::backend::Observable>> {
            Err(Error::value(format!("unknown observable {}", name)))
        }

        fn constraint(&self, _: &str) -> Result<Option<String>> {
            let err = serde_yaml::from_str::<f64>("[").unwrap_err();
            Err(Error::from(err))
        }
    }

    #[test]
    fn test_registry_failure_is_not_reported_as_unknown() {
        let mut harness = Harness::new();
        let mut ctx = harness.context();
        ctx.backend = &BrokenRegistry;
        let point = item(json!({ "type": "constraint", "name": "c", "constraints": "point", "variable": "q2" }));
        let err = plot(&point, &mut ctx).unwrap_err();
        assert!(matches!(err, Error::Yaml(_)));
        assert_eq!(harness.axes.num_plots(), 0);
    }

    #[test]
    fn test_all_constraints_form_one_series() {
        let mut harness = Harness::new();
        harness.backend = ManifestBackend::from_yaml_str(CONSTRAINTS).unwrap();
        let both = item(json!({
            "type": "constraint", "name": "c", "constraints": ["point", "bin"],
            "variable": "q2", "label": "data",
        }));
        plot(&both, &mut harness.context()).unwrap();
        assert_eq!(harness.axes.num_plots(), 1);
        assert_eq!(harness.axes.legend_entries()[0].label, "data");
    }
}
