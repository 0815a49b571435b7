//! Declarative plotting of EOS observables, constraints and posterior samples.
//!
//! A plot is described by an instruction document with a `plot` section
//! (frame, axes, legend) and an ordered list of `contents`. The [`Plotter`]
//! sets up the frame, hands every content item to its handler and writes the
//! figure as SVG.

pub mod backend;
pub mod content;
pub mod data;
pub mod error;
pub mod expr;
pub mod frame;
pub mod handlers;
pub mod instructions;
pub mod manifest;
pub mod numeric;
pub mod observer;
pub mod plotter;
pub mod plotting;

pub use error::{Error, Result};
pub use instructions::Instructions;
pub use manifest::ManifestBackend;
pub use plotter::Plotter;
