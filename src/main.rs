use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;
use tracing_subscriber::EnvFilter;

use txnplot::{ErrorKind, PlotConfig, PlotError, Scale};

#[derive(Parser, Debug)]
#[command(
    name = "txnplot",
    about = "Plot verified vs. unverified transaction throughput"
)]
struct Args {
    /// Measurements CSV with num_txns, elapsed_ms, num_keys and verified columns.
    #[arg(long)]
    input: Option<PathBuf>,

    /// Directory to write the chart images into.
    #[arg(long)]
    output_dir: Option<PathBuf>,

    /// Which chart variants to render.
    #[arg(long, value_enum, default_value_t = ScaleArg::Both)]
    scale: ScaleArg,

    /// Optional JSON config; flags given on the command line take precedence.
    #[arg(long)]
    config: Option<PathBuf>,
}

#[derive(Copy, Clone, Debug, clap::ValueEnum)]
enum ScaleArg {
    Linear,
    Log,
    Both,
}

impl ScaleArg {
    fn to_scales(self) -> &'static [Scale] {
        match self {
            ScaleArg::Linear => &[Scale::Linear],
            ScaleArg::Log => &[Scale::Logarithmic],
            ScaleArg::Both => &Scale::ALL,
        }
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    setup_tracing();

    match execute(&args) {
        Ok(written) => {
            info!(charts = written.len(), "done");
            ExitCode::SUCCESS
        }
        Err(err) => {
            report(&err);
            ExitCode::FAILURE
        }
    }
}

fn setup_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn execute(args: &Args) -> Result<Vec<PathBuf>> {
    let mut config = match &args.config {
        Some(path) => PlotConfig::from_json_file(path).map_err(PlotError::from)?,
        None => PlotConfig::default(),
    };
    if let Some(input) = &args.input {
        config = config.with_input(input);
    }
    if let Some(dir) = &args.output_dir {
        config = config.with_output_dir(dir);
    }
    info!(?config, scale = ?args.scale, "starting txnplot");

    txnplot::run(&config, args.scale.to_scales())
        .with_context(|| format!("plotting {}", config.input.display()))
}

fn report(err: &anyhow::Error) {
    let not_found = err
        .downcast_ref::<PlotError>()
        .is_some_and(|plot| plot.kind() == ErrorKind::FileNotFound);

    if not_found {
        // The context line only repeats the path, so print the root cause alone.
        eprintln!("Error: {}", err.root_cause());
    } else {
        eprintln!("An error occurred: {err:#}");
    }
}
