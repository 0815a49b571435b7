//! The plotter facade: frame setup, content dispatch and output.

use std::path::{Path, PathBuf};

use crate::backend::Backend;
use crate::content::ContentItem;
use crate::data::{CsvLoader, DataLoader};
use crate::error::{Error, Result};
use crate::frame::{self, FrameState};
use crate::handlers::{self, Context};
use crate::instructions::Instructions;
use crate::observer::{LogObserver, PlotObserver};
use crate::plotting::{Figure, LegendPosition};

/// Produces one plot from one instruction document.
///
/// ```no_run
/// use eos_plot::{Instructions, ManifestBackend, Plotter};
///
/// let backend = ManifestBackend::load("eos.yaml")?;
/// let instructions = Instructions::load("plot.yaml")?;
/// Plotter::new(&instructions, "plot.svg", &backend).plot()?;
/// # Ok::<(), eos_plot::Error>(())
/// ```
pub struct Plotter<'a> {
    instructions: &'a Instructions,
    output: PathBuf,
    backend: &'a dyn Backend,
    loader: &'a dyn DataLoader,
    observer: &'a dyn PlotObserver,
    figure: Figure,
    frame: FrameState,
}

impl<'a> Plotter<'a> {
    /// A plotter reading data files as CSV and reporting through `log`.
    pub fn new(
        instructions: &'a Instructions,
        output: impl Into<PathBuf>,
        backend: &'a dyn Backend,
    ) -> Self {
        Plotter {
            instructions,
            output: output.into(),
            backend,
            loader: &CsvLoader,
            observer: &LogObserver,
            figure: Figure::default(),
            frame: FrameState::default(),
        }
    }

    pub fn with_loader(mut self, loader: &'a dyn DataLoader) -> Self {
        self.loader = loader;
        self
    }

    pub fn with_observer(mut self, observer: &'a dyn PlotObserver) -> Self {
        self.observer = observer;
        self
    }

    pub fn output(&self) -> &Path {
        &self.output
    }

    pub fn figure(&self) -> &Figure {
        &self.figure
    }

    pub fn frame_state(&self) -> FrameState {
        self.frame
    }

    /// Configure the figure from the `plot` section.
    pub fn setup(&mut self) -> Result<()> {
        let plot = self.instructions.plot()?;
        self.frame = frame::setup(&plot, &mut self.figure)?;
        Ok(())
    }

    /// Draw every content item in document order, then the legend.
    pub fn plot_contents(&mut self) -> Result<()> {
        let mut ctx = Context {
            axes: self.figure.gca(),
            frame: &mut self.frame,
            backend: self.backend,
            loader: self.loader,
            observer: self.observer,
        };

        for value in self.instructions.contents()? {
            let item = ContentItem::from_value(value)?;
            match &item.name {
                Some(name) => self.observer.info(&format!("plotting \"{}\"", name)),
                None => self.observer.debug(&format!(
                    "plotting anonymous contents of type '{}'",
                    item.kind()
                )),
            }
            handlers::plot(&item, &mut ctx)?;
        }

        let location = self
            .instructions
            .plot()?
            .legend
            .and_then(|legend| legend.location);
        if let Some(location) = location {
            let position = LegendPosition::from_location(&location).ok_or_else(|| {
                Error::config(format!("invalid legend location '{}'", location))
            })?;
            ctx.axes.legend_at(position);
        }
        Ok(())
    }

    /// Set up, draw and write the output file. Nothing is written if any
    /// step fails.
    pub fn plot(mut self) -> Result<()> {
        self.setup()?;
        self.plot_contents()?;
        self.figure.save(&self.output)?;
        self.observer
            .info(&format!("wrote \"{}\"", self.output.display()));
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::manifest::ManifestBackend;
    use crate::observer::testing::RecordingObserver;
    use proptest::prelude::*;
    use std::io::Write;

    const BACKEND: &str = r#"
version: 1.0.3
parameters:
  a: { central: 2.0, latex: '$a$' }
observables:
  line: 'a * q2'
"#;

    fn backend() -> ManifestBackend {
        ManifestBackend::from_yaml_str(BACKEND).unwrap()
    }

    #[test]
    fn test_end_to_end_svg() {
        let mut samples = tempfile::Builder::new().suffix(".csv").tempfile().unwrap();
        writeln!(samples, "q2=0.0,q2=1.0,q2=2.0").unwrap();
        for i in 0..20 {
            let s = i as f64 / 10.0;
            writeln!(samples, "{},{},{}", s, 1.0 + s, 2.0 + s).unwrap();
        }

        let document = format!(
            r#"
plot:
  title: 'Example'
  x: {{ label: '$q^2$', unit: 'GeV$^2$', range: [0.0, 2.0] }}
  y: {{ label: 'rate' }}
  legend: {{ location: 'upper left' }}
contents:
  - {{ type: observable, name: 'central', observable: 'line', kinematic: 'q2', label: 'theory' }}
  - {{ type: uncertainty, name: 'band', hdf5-file: '{}', label: '68%' }}
  - {{ type: function, name: 'f', f: '2 * x', style: '--' }}
  - {{ type: watermark, preliminary: true }}
"#,
            samples.path().display()
        );
        let instructions = Instructions::from_yaml_str(&document).unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plot.svg");
        let backend = backend();
        let observer = RecordingObserver::default();

        Plotter::new(&instructions, &output, &backend)
            .with_observer(&observer)
            .plot()
            .unwrap();

        let svg = std::fs::read_to_string(&output).unwrap();
        assert!(svg.starts_with("<svg") || svg.starts_with("<?xml"));
        assert!(svg.contains("EOS Preliminary"));
        assert!(svg.contains("$q^2$ [GeV$^2$]"));
        assert!(svg.contains("theory"));

        let info = observer.with_level("info");
        assert_eq!(&info[..1], &["plotting \"central\"".to_string()]);
        assert!(observer
            .with_level("debug")
            .contains(&"plotting anonymous contents of type 'watermark'".to_string()));
    }

    #[test]
    fn test_missing_file_aborts_before_output() {
        let instructions = Instructions::from_yaml_str(
            "plot: { x: { range: [0, 1] } }\ncontents:\n  - { type: function, name: 'f', f: 'x' }\n  - { type: kde, name: 'k', variable: 'x' }\n",
        )
        .unwrap();
        let dir = tempfile::tempdir().unwrap();
        let output = dir.path().join("plot.svg");
        let backend = backend();

        let err = Plotter::new(&instructions, &output, &backend).plot().unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m == "no hdf5-file specified"));
        assert!(!output.exists());
    }

    #[test]
    fn test_unknown_type_and_missing_plot_propagate() {
        let backend = backend();
        let unknown = Instructions::from_yaml_str(
            "plot: {}\ncontents:\n  - { type: scatter, name: 's' }\n",
        )
        .unwrap();
        let mut plotter = Plotter::new(&unknown, "unused.svg", &backend);
        plotter.setup().unwrap();
        assert!(matches!(plotter.plot_contents(), Err(Error::Configuration(_))));

        let no_plot = Instructions::from_yaml_str("contents: []").unwrap();
        let err = Plotter::new(&no_plot, "unused.svg", &backend).plot().unwrap_err();
        assert!(matches!(err, Error::Configuration(ref m) if m == "no plot metadata specified"));
    }

    #[test]
    fn test_legend_location() {
        let backend = backend();
        let instructions = Instructions::from_yaml_str(
            "plot: { legend: { location: 'lower right' } }\ncontents:\n  - { type: function, name: 'f', f: 'x', label: 'x' }\n",
        )
        .unwrap();
        let mut plotter = Plotter::new(&instructions, "unused.svg", &backend);
        plotter.setup().unwrap();
        plotter.plot_contents().unwrap();
        let legend = plotter.figure().axes().legend.as_ref().unwrap();
        assert_eq!(legend.position, LegendPosition::BottomRight);

        let invalid = Instructions::from_yaml_str("plot: { legend: { location: 'somewhere' } }").unwrap();
        let mut plotter = Plotter::new(&invalid, "unused.svg", &backend);
        plotter.setup().unwrap();
        assert!(matches!(plotter.plot_contents(), Err(Error::Configuration(_))));
    }

    proptest! {
        #[test]
        fn handlers_run_in_document_order(names in prop::collection::vec("[a-z]{1,8}", 0..12)) {
            let contents: Vec<serde_json::Value> = names
                .iter()
                .map(|name| serde_json::json!({ "type": "function", "name": name, "f": "x" }))
                .collect();
            let document = serde_json::json!({ "plot": {}, "contents": contents });
            let instructions = Instructions::from_value(document).unwrap();
            let backend = backend();
            let observer = RecordingObserver::default();

            let mut plotter = Plotter::new(&instructions, "unused.svg", &backend).with_observer(&observer);
            plotter.setup().unwrap();
            plotter.plot_contents().unwrap();

            let expected: Vec<String> = names.iter().map(|n| format!("plotting \"{}\"", n)).collect();
            prop_assert_eq!(observer.with_level("info"), expected);
            prop_assert_eq!(plotter.figure().axes().num_plots(), names.len());
        }
    }
}
