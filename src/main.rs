use clap::{Parser, Subcommand};
use respsize::config;
use respsize::diagnostics::TracingDiagnostics;
use respsize::output::{self, BatchEntry};
use respsize::sizing::{RawSizeSpec, RealDimension, SizeEngine};
use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "respsize")]
#[command(about = "Resolve responsive image size specifications to pixels")]
#[command(long_about = "\
Resolve responsive image size specifications to pixels

A size is a width, a height, or both, plus a scaling function:

  320                 width 320px, height follows the aspect ratio
  50%                 half the source width (also 0.5x, 50pc)
  640X480             fit inside 640x480 (uppercase X separates)
  '{\"width\": \"0.5x\", \"height\": \"0.25x\", \"function\": \"cover\"}'

Functions:
  contain   fit inside the box, keep aspect ratio (default)
  cover     fill the box, keep aspect ratio
  exact     stretch to the box, needs width and height
  check     validate only

A JSON <SPEC> is read as a size object; anything else is a bare token.

Run 'respsize gen-config' to generate a documented respsize.toml.")]
#[command(version)]
struct Cli {
    /// Config file (stock defaults when omitted)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Log every scaling step (RUST_LOG takes precedence)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Resolve one size against a source width and height
    Pixel {
        spec: String,
        width: f64,
        height: f64,
        /// Print JSON instead of WxH
        #[arg(long)]
        json: bool,
    },
    /// Print the canonical object form of a size
    Elaborate { spec: String },
    /// Resolve every configured size against one source
    Batch { width: f64, height: f64 },
    /// Print a stock respsize.toml with all options documented
    GenConfig,
}

fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Command::GenConfig = cli.command {
        print!("{}", config::stock_config_toml());
        return Ok(ExitCode::SUCCESS);
    }

    let sizes_config = config::load_config_or_default(cli.config.as_deref())?;
    let engine = SizeEngine::with_config(sizes_config.engine.clone(), Arc::new(TracingDiagnostics));

    // Size failures are already reported through diagnostics; only the exit
    // code is left to set.
    match cli.command {
        Command::Pixel {
            spec,
            width,
            height,
            json,
        } => {
            let spec = parse_spec(&spec)?;
            match engine.to_pixel_wh(&spec, width, height) {
                Ok(eff) => output::print_pixel(eff, json)?,
                Err(_) => return Ok(ExitCode::FAILURE),
            }
        }
        Command::Elaborate { spec } => {
            let spec = parse_spec(&spec)?;
            match engine.elaborate(&spec) {
                Ok(object) => output::print_elaborated(&object)?,
                Err(_) => return Ok(ExitCode::FAILURE),
            }
        }
        Command::Batch { width, height } => {
            let real = RealDimension::new(width, height);
            let entries: Vec<BatchEntry> = sizes_config
                .sizes
                .into_iter()
                .map(|spec| BatchEntry {
                    outcome: engine.to_pixel(&spec, real),
                    spec,
                })
                .collect();
            output::print_batch(real, &entries);
            if entries.iter().any(|e| e.outcome.is_err()) {
                return Ok(ExitCode::FAILURE);
            }
        }
        Command::GenConfig => {}
    }

    Ok(ExitCode::SUCCESS)
}

/// Logs go to stderr so stdout stays machine-readable.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "respsize=debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .with_writer(std::io::stderr)
        .compact()
        .init();
}

/// JSON when the argument is JSON, a bare token otherwise.
///
/// An argument that looks like an object must parse as one, so a typo in a
/// key is an error instead of a garbage token.
fn parse_spec(arg: &str) -> Result<RawSizeSpec, serde_json::Error> {
    if arg.trim_start().starts_with('{') {
        return serde_json::from_str(arg);
    }
    Ok(serde_json::from_str(arg).unwrap_or_else(|_| RawSizeSpec::from(arg)))
}
