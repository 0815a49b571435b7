//! A single observable, without uncertainties, as a function of one
//! kinematic variable or one parameter.

use crate::backend::{Kinematics, Options};
use crate::content::{ObservableContent, XVariable};
use crate::error::{Error, Result};
use crate::numeric::linspace;

use super::Context;

pub(super) fn plot(item: &ObservableContent, ctx: &mut Context<'_>) -> Result<()> {
    ctx.observer
        .info(&format!("   plotting EOS observable \"{}\"", item.observable));

    let mut parameters = ctx.backend.default_parameters();
    if item.parameters_from_file.is_some() && item.parameters.is_some() {
        ctx.observer.warn(
            "    overriding values read from 'parameters-from-file' with explicit values in 'parameters'",
        );
    }
    if let Some(path) = &item.parameters_from_file {
        parameters.override_from_file(path)?;
    }
    for (name, value) in item.parameters.iter().flatten() {
        parameters.set(name, *value)?;
    }

    let mut kinematics = Kinematics::new();
    match &item.variable {
        XVariable::Kinematic(name) => kinematics.declare(name, f64::NAN),
        XVariable::Parameter(name) => {
            parameters.declare(name, f64::NAN, None);
            for (k, v) in &item.kinematics {
                kinematics.declare(k, *v);
            }
        }
    }

    let observable = ctx.backend.make_observable(
        &item.observable,
        &parameters,
        &kinematics,
        &Options::new(),
    )?;

    let (xlo, xhi) = item
        .range
        .map(|[lo, hi]| (lo, hi))
        .or_else(|| ctx.frame.xrange.get())
        .ok_or_else(|| {
            Error::config(format!(
                "no range specified for observable '{}' and no x range set",
                item.observable
            ))
        })?;

    let xvalues = linspace(xlo, xhi, item.samples + 1);
    let mut ovalues = Vec::with_capacity(xvalues.len());
    for &x in &xvalues {
        match &item.variable {
            XVariable::Kinematic(name) => kinematics.set(name, x)?,
            XVariable::Parameter(name) => parameters.set(name, x)?,
        }
        ovalues.push(observable.evaluate(&parameters, &kinematics)?);
    }

    ctx.axes
        .plot(xvalues, ovalues)
        .color(item.color.clone())
        .label(item.label.clone())
        .build();
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use super::*;
    use crate::backend::{Backend, Observable, Parameters};
    use crate::content::{Content, ContentItem};
    use crate::frame::RangeState;
    use crate::handlers::testing::Harness;
    use serde_json::json;

    /// Records the value of `q2` at every evaluation.
    struct Probe {
        seen: Rc<RefCell<Vec<f64>>>,
    }

    impl Observable for Probe {
        fn name(&self) -> &str {
            "probe"
        }

        fn evaluate(&self, _: &Parameters, kinematics: &Kinematics) -> Result<f64> {
            let q2 = kinematics.get("q2").unwrap_or(f64::NAN);
            self.seen.borrow_mut().push(q2);
            Ok(q2)
        }
    }

    struct ProbeBackend {
        seen: Rc<RefCell<Vec<f64>>>,
    }

    impl Backend for ProbeBackend {
        fn version(&self) -> &str {
            "0.0.0"
        }

        fn default_parameters(&self) -> Parameters {
            Parameters::new()
        }

        fn make_observable(
            &self,
            _: &str,
            _: &Parameters,
            _: &Kinematics,
            _: &Options,
        ) -> Result<Box<dyn Observable>> {
            Ok(Box::new(Probe {
                seen: Rc::clone(&self.seen),
            }))
        }

        fn constraint(&self, _: &str) -> Result<Option<String>> {
            Ok(None)
        }
    }

    fn content(value: serde_json::Value) -> ObservableContent {
        match ContentItem::from_value(&value).unwrap().content {
            Content::Observable(content) => content,
            other => panic!("unexpected content {:?}", other),
        }
    }

    #[test]
    fn test_samples_plus_one_points() {
        let seen = Rc::new(RefCell::new(Vec::new()));
        let backend = ProbeBackend { seen: Rc::clone(&seen) };
        let mut harness = Harness::new();
        let mut ctx = harness.context();
        ctx.backend = &backend;

        let item = content(json!({
            "type": "observable", "name": "o", "observable": "probe",
            "kinematic": "q2", "range": [0.0, 1.0], "samples": 4,
        }));
        plot(&item, &mut ctx).unwrap();

        assert_eq!(*seen.borrow(), vec![0.0, 0.25, 0.5, 0.75, 1.0]);
        assert_eq!(harness.axes.num_plots(), 1);
    }

    #[test]
    fn test_parameter_on_x_axis_with_frame_range() {
        let mut harness = Harness::new();
        harness.frame.xrange = RangeState::Explicit(1.0, 3.0);
        let item = content(json!({
            "type": "observable", "name": "o", "observable": "line",
            "parameter": "a", "kinematics": { "q2": 2.0 }, "samples": 2,
        }));
        plot(&item, &mut harness.context()).unwrap();

        assert_eq!(harness.axes.num_plots(), 1);
        assert!(harness.axes.y_range().0 < 2.0);
        assert!(harness.observer.with_level("info")[0].contains("\"line\""));
    }

    #[test]
    fn test_parameter_override_warns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"a: 5.0\n").unwrap();

        let mut harness = Harness::new();
        let item = content(json!({
            "type": "observable", "name": "o", "observable": "line", "kinematic": "q2",
            "range": [0.0, 1.0], "parameters-from-file": file.path(), "parameters": { "a": 1.0 },
        }));
        plot(&item, &mut harness.context()).unwrap();
        assert_eq!(harness.observer.with_level("warn").len(), 1);
    }

    #[test]
    fn test_empty_parameters_next_to_file_still_warns() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        std::io::Write::write_all(&mut file, b"a: 5.0\n").unwrap();

        let mut harness = Harness::new();
        let item = content(json!({
            "type": "observable", "name": "o", "observable": "line", "kinematic": "q2",
            "range": [0.0, 1.0], "parameters-from-file": file.path(), "parameters": {},
        }));
        assert_eq!(item.parameters, Some(Default::default()));
        plot(&item, &mut harness.context()).unwrap();
        assert_eq!(harness.observer.with_level("warn").len(), 1);

        let mut harness = Harness::new();
        let item = content(json!({
            "type": "observable", "name": "o", "observable": "line", "kinematic": "q2",
            "range": [0.0, 1.0], "parameters-from-file": file.path(),
        }));
        plot(&item, &mut harness.context()).unwrap();
        assert!(harness.observer.with_level("warn").is_empty());
    }

    #[test]
    fn test_missing_range_and_unknown_observable() {
        let mut harness = Harness::new();
        let no_range = content(json!({
            "type": "observable", "name": "o", "observable": "line", "kinematic": "q2",
        }));
        assert!(matches!(
            plot(&no_range, &mut harness.context()),
            Err(Error::Configuration(_))
        ));

        let unknown = content(json!({
            "type": "observable", "name": "o", "observable": "nope", "kinematic": "q2",
            "range": [0.0, 1.0],
        }));
        assert!(matches!(plot(&unknown, &mut harness.context()), Err(Error::Value(_))));
        assert_eq!(harness.axes.num_plots(), 0);
    }
}
