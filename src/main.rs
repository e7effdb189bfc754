//! Bulletin Canvas CLI
//!
//! Usage:
//!   bulletin-canvas [OPTIONS] <COMMAND>
//!
//! Commands:
//!   default       Print the default layout for a bulletin as JSON
//!   lint          Check a layout for overlapping, off-page or undersized blocks
//!   preview       Render one page of a layout as SVG
//!   drift-matrix  Resize every handle at several rotations and report drift
//!
//! Options:
//!   -c, --config <FILE>  Canvas configuration (TOML format)
//!   -v, --verbose        Debug logging (otherwise RUST_LOG, default warn)

use std::fs;
use std::io::{self, Read};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

use clap::{Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use bulletin_canvas::drift::{any_real_drift, MatrixRun, MATRIX_ROTATIONS};
use bulletin_canvas::model::lint;
use bulletin_canvas::resize::ResizeStrategy;
use bulletin_canvas::{
    default_layout, load_layout, render_page, CanvasConfig, CanvasError, CssRenderer,
    DefaultLayoutInput, Layout, Point, ResizeHandle, SvgOptions,
};

#[derive(Parser)]
#[command(name = "bulletin-canvas")]
#[command(about = "Block geometry tools for the bulletin layout editor")]
struct Cli {
    /// Canvas configuration file (TOML format)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Enable debug logging
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the default layout for a bulletin as JSON
    Default {
        /// Church display name
        #[arg(long)]
        church: String,
        /// Online giving link
        #[arg(long)]
        giving_url: String,
        /// Owning bulletin id
        #[arg(long)]
        bulletin_id: String,
    },

    /// Check a layout for overlapping, off-page or undersized blocks
    Lint {
        /// Layout JSON file (reads from stdin if not provided)
        input: Option<PathBuf>,
    },

    /// Render one page of a layout as SVG
    Preview {
        /// Layout JSON file (reads from stdin if not provided)
        input: Option<PathBuf>,
        /// Page number to render
        #[arg(short, long, default_value_t = 1)]
        page: u32,
        /// Omit block captions
        #[arg(long)]
        no_captions: bool,
    },

    /// Resize every handle at several rotations and report drift
    DriftMatrix {
        /// Use the rotation-unaware resize math
        #[arg(long)]
        naive: bool,
        /// Rotations to test, in degrees
        #[arg(long, value_delimiter = ',', allow_negative_numbers = true)]
        rotations: Vec<f64>,
        /// Only test these handles (n, ne, e, se, s, sw, w, nw)
        #[arg(long, value_delimiter = ',')]
        handles: Vec<ResizeHandle>,
        /// Horizontal pointer displacement
        #[arg(long, default_value_t = 20.0, allow_negative_numbers = true)]
        dx: f64,
        /// Vertical pointer displacement
        #[arg(long, default_value_t = 12.0, allow_negative_numbers = true)]
        dy: f64,
    },
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

fn init_tracing(verbose: bool) {
    let filter = if verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();
}

fn run(cli: Cli) -> Result<ExitCode, CanvasError> {
    let config = match &cli.config {
        Some(path) => CanvasConfig::from_file(path)?,
        None => CanvasConfig::default(),
    };

    match cli.command {
        Command::Default {
            church,
            giving_url,
            bulletin_id,
        } => {
            let input = DefaultLayoutInput::new(church, giving_url, bulletin_id);
            let layout = default_layout(&input);
            println!("{}", layout.to_json_pretty()?);
            Ok(ExitCode::SUCCESS)
        }

        Command::Lint { input } => {
            let layout = read_layout(input.as_deref())?;
            let warnings = lint::check(&layout, &config);
            for warning in &warnings {
                println!("{}", warning);
            }
            if warnings.is_empty() {
                println!("no issues in {} blocks", layout.block_count());
                Ok(ExitCode::SUCCESS)
            } else {
                Ok(ExitCode::FAILURE)
            }
        }

        Command::Preview {
            input,
            page,
            no_captions,
        } => {
            let layout = read_layout(input.as_deref())?;
            let options = SvgOptions {
                captions: !no_captions,
                ..SvgOptions::default()
            };
            print!("{}", render_page(&layout, page, &config, options)?);
            Ok(ExitCode::SUCCESS)
        }

        Command::DriftMatrix {
            naive,
            rotations,
            handles,
            dx,
            dy,
        } => {
            let strategy = if naive {
                ResizeStrategy::Naive
            } else {
                ResizeStrategy::AnchorInvariant
            };
            let rotations = if rotations.is_empty() {
                MATRIX_ROTATIONS.to_vec()
            } else {
                rotations
            };
            let handles = if handles.is_empty() {
                ResizeHandle::ALL.to_vec()
            } else {
                handles
            };
            let reports = MatrixRun::default()
                .with_strategy(strategy)
                .with_rotations(&rotations)
                .with_handles(&handles)
                .with_delta(Point::new(dx, dy))
                .run(&config, CssRenderer)?;

            for report in &reports {
                println!(
                    "{:>5}° {:<2}  model={:<5} presentation={:<5} rect={:<5} => {}",
                    report.rotation,
                    report.handle,
                    report.model_drift,
                    report.presentation_drift,
                    report.bounding_rect_changed,
                    if report.has_real_drift { "DRIFT" } else { "ok" }
                );
            }

            if any_real_drift(&reports) {
                Ok(ExitCode::FAILURE)
            } else {
                Ok(ExitCode::SUCCESS)
            }
        }
    }
}

fn read_layout(path: Option<&Path>) -> Result<Layout, CanvasError> {
    let source = match path {
        Some(path) => fs::read_to_string(path).map_err(bulletin_canvas::ConfigError::from)?,
        None => {
            let mut buffer = String::new();
            io::stdin()
                .read_to_string(&mut buffer)
                .map_err(bulletin_canvas::ConfigError::from)?;
            buffer
        }
    };
    load_layout(&source)
}
