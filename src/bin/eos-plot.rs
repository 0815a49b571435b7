use std::path::Path;

use anyhow::{bail, Context};
use clap::{Parser, ValueEnum};
use log::{error, info};

use eos_plot::{Instructions, ManifestBackend, Plotter};

#[derive(Parser)]
#[command(name = "eos-plot")]
#[command(
    about = "Plot EOS observables, constraints and samples",
    long_about = "Reads a declarative plot description (YAML or JSON) and renders it as SVG, evaluating observables and constraints with a manifest-driven backend."
)]
struct Cli {
    /// Log verbosity level
    #[arg(long, default_value = "info")]
    log_level: LogLevel,
    /// Write log output to a file instead of stderr
    #[arg(long)]
    log_file: Option<String>,
    /// Append to log file instead of truncating
    #[arg(long)]
    append_log: bool,
    /// YAML manifest with the parameters, observables and constraints to evaluate.
    #[arg(long, required = true)]
    backend: String,
    /// Force overwrite of an existing output file.
    #[arg(short, long)]
    force: bool,
    /// Plot instructions. Files ending in `.json` are read as JSON, everything else as YAML.
    instructions: String,
    /// Output file. Must end in `.svg`.
    output: String,
}

#[derive(Clone, ValueEnum)]
enum LogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl LogLevel {
    fn to_level_filter(&self) -> log::LevelFilter {
        match self {
            LogLevel::Error => log::LevelFilter::Error,
            LogLevel::Warn => log::LevelFilter::Warn,
            LogLevel::Info => log::LevelFilter::Info,
            LogLevel::Debug => log::LevelFilter::Debug,
            LogLevel::Trace => log::LevelFilter::Trace,
        }
    }
}

// Create the output directory and refuse to clobber an existing plot
fn check_output_path(output: &str, force: bool) -> anyhow::Result<()> {
    let path = Path::new(output);
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
        && !parent.exists()
    {
        info!("Creating output directory: {:?}", parent);
        std::fs::create_dir_all(parent)
            .with_context(|| format!("could not create output directory {:?}", parent))?;
    }

    if !force && path.exists() {
        bail!(
            "Output file {} already exists. Use --force to overwrite.",
            output
        );
    }
    Ok(())
}

fn run(cli: &Cli) -> anyhow::Result<()> {
    check_output_path(&cli.output, cli.force)?;

    let backend = ManifestBackend::load(&cli.backend)
        .with_context(|| format!("Error loading backend manifest {}", cli.backend))?;
    let instructions = Instructions::load(&cli.instructions)
        .with_context(|| format!("Error loading plot instructions {}", cli.instructions))?;

    Plotter::new(&instructions, &cli.output, &backend)
        .plot()
        .with_context(|| format!("Error plotting {}", cli.instructions))?;
    Ok(())
}

fn main() {
    let cli = Cli::parse();

    let mut log_builder = env_logger::Builder::from_default_env();
    log_builder
        .filter_level(cli.log_level.to_level_filter())
        .format_module_path(false);
    if let Some(ref path) = cli.log_file {
        let file = if cli.append_log {
            std::fs::File::options().create(true).append(true).open(path)
        } else {
            std::fs::File::create(path)
        };
        match file {
            Ok(file) => {
                log_builder.target(env_logger::Target::Pipe(Box::new(file)));
            }
            Err(e) => {
                eprintln!("Could not open log file '{}': {}", path, e);
                std::process::exit(1);
            }
        }
    }
    log_builder.init();

    if let Err(e) = run(&cli) {
        error!("{:#}", e);
        std::process::exit(1);
    }
}
