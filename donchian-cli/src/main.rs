//! Donchian CLI — run a Donchian channel over CSV bars.
//!
//! Commands:
//! - `run` — stream bars through the channel and write one row per bar
//! - `check` — report void, insane, and out-of-order bars

use std::fs::File;
use std::io::{self, BufWriter};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use donchian_cli::{
    check_bars, drop_void_bars, load_bars, run_channel, write_rows, AppConfig, OutputFormat,
};
use donchian_core::indicators::DonchianChannel;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "donchian", about = "Donchian channel over CSV price bars")]
struct Cli {
    /// Log at debug level (overridden by RUST_LOG).
    #[arg(long, short, global = true, default_value_t = false)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Stream bars through the channel and write the bands for every bar.
    Run {
        /// CSV file with timestamp,open,high,low,close,volume columns.
        #[arg(long)]
        input: PathBuf,

        /// Path to a TOML config file.
        #[arg(long)]
        config: Option<PathBuf>,

        /// Lookback window in bars. Defaults to 20.
        #[arg(long)]
        period: Option<usize>,

        /// Indicator name. Defaults to donchian_{period}.
        #[arg(long)]
        name: Option<String>,

        /// Output format. Defaults to csv.
        #[arg(long, value_enum)]
        format: Option<OutputFormat>,

        /// Output file. Defaults to stdout.
        #[arg(long)]
        output: Option<PathBuf>,

        /// Only write rows once the channel is ready.
        #[arg(long, default_value_t = false)]
        skip_warmup: bool,
    },
    /// Report data quality problems without running the channel.
    Check {
        /// CSV file with timestamp,open,high,low,close,volume columns.
        #[arg(long)]
        input: PathBuf,
    },
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    match cli.command {
        Commands::Run {
            input,
            config,
            period,
            name,
            format,
            output,
            skip_warmup,
        } => run_cmd(&input, config, period, name, format, output, skip_warmup),
        Commands::Check { input } => check_cmd(&input),
    }
}

fn init_tracing(verbose: bool) {
    let default = if verbose {
        "donchian=debug,donchian_cli=debug,donchian_core=debug"
    } else {
        "donchian=info,donchian_cli=info"
    };
    tracing_subscriber::fmt()
        .with_writer(io::stderr)
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| default.into()),
        )
        .init();
}

fn run_cmd(
    input: &Path,
    config_path: Option<PathBuf>,
    period: Option<usize>,
    name: Option<String>,
    format: Option<OutputFormat>,
    output: Option<PathBuf>,
    skip_warmup: bool,
) -> Result<()> {
    let config = match &config_path {
        Some(path) => AppConfig::load(path)?,
        None => AppConfig::default(),
    }
    .apply_overrides(period, name, format, skip_warmup)?;

    let mut bars = load_bars(input).with_context(|| format!("loading {}", input.display()))?;
    info!(bars = bars.len(), input = %input.display(), "loaded bars");

    let dropped = drop_void_bars(&mut bars);
    if !dropped.is_empty() {
        warn!(dropped = dropped.len(), first = dropped[0], "skipping void bars");
    }

    let report = check_bars(&bars);
    if !report.is_clean() {
        warn!(
            void = report.void.len(),
            insane = report.insane.len(),
            out_of_order = report.out_of_order.len(),
            "input has suspect bars; run `donchian check` for details"
        );
    }

    let mut channel = DonchianChannel::new(config.channel.resolved_name(), config.channel.period)?;
    let rows = run_channel(&mut channel, &bars);
    let ready = rows.iter().filter(|r| r.ready).count();

    let written = match &output {
        Some(path) => {
            let file = File::create(path)
                .with_context(|| format!("creating {}", path.display()))?;
            write_rows(&rows, config.output.format, config.output.skip_warmup, BufWriter::new(file))?
        }
        None => write_rows(
            &rows,
            config.output.format,
            config.output.skip_warmup,
            io::stdout().lock(),
        )?,
    };

    info!(
        indicator = %config.channel.resolved_name(),
        period = config.channel.period,
        rows = written,
        ready,
        "channel complete"
    );
    Ok(())
}

fn check_cmd(input: &Path) -> Result<()> {
    let bars = load_bars(input).with_context(|| format!("loading {}", input.display()))?;
    let report = check_bars(&bars);

    println!("bars:          {}", report.total);
    println!("void:          {}", report.void.len());
    println!("insane:        {}", report.insane.len());
    println!("out of order:  {}", report.out_of_order.len());

    for &i in &report.void {
        warn!(index = i, timestamp = %bars[i].timestamp, "void bar");
    }
    for &i in &report.insane {
        warn!(index = i, timestamp = %bars[i].timestamp, "OHLC ordering violated");
    }
    for &i in &report.out_of_order {
        warn!(index = i, timestamp = %bars[i].timestamp, "timestamp not after previous bar");
    }

    if report.is_clean() {
        info!("no problems found");
    }
    Ok(())
}
