//! Gesture Sensing Engine
//!
//! Replays a recorded accelerometer/gyroscope stream through the engine and
//! prints what the phone screen would have shown after every sample.
//!
//! This is the entry point for standalone binaries. For library use, see lib.rs.

use std::env;
use std::io::{self, BufWriter, Read, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};

use gesture_sensing::{Error, MonitorConfig, MotionMonitor, Readout, SampleReader};

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    cmd: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Feed a CSV recording (kind,x,y,z[,timestamp_ms]) through the engine
    Replay {
        /// Path to the recording
        file: PathBuf,
        /// TOML configuration file
        #[arg(short, long)]
        config: Option<PathBuf>,
        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
        /// Only print readouts whose orientation or action changed
        #[arg(long)]
        only_changes: bool,
    },
}

#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
enum OutputFormat {
    /// Six-panel text, as on the phone screen
    Text,
    /// One JSON object per line
    Json,
}

fn main() -> Result<()> {
    let log_level = env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string());
    env_logger::Builder::new().parse_filters(&log_level).init();
    log::debug!("Starting gesture-sense v{}", env!("CARGO_PKG_VERSION"));

    let args = Cli::parse();
    match args.cmd {
        Commands::Replay {
            file,
            config,
            format,
            only_changes,
        } => replay(file, config, format, only_changes),
    }
}

fn replay(
    file: PathBuf,
    config: Option<PathBuf>,
    format: OutputFormat,
    only_changes: bool,
) -> Result<()> {
    let config = match config {
        Some(path) => MonitorConfig::from_toml_file(&path)
            .with_context(|| format!("loading configuration {}", path.display()))?,
        None => MonitorConfig::default(),
    };

    let mut monitor = MotionMonitor::new(config)?;
    let reader = SampleReader::open(&file)?;
    let stdout = io::stdout();
    let mut out = BufWriter::new(stdout.lock());

    monitor.start()?;
    let stats = replay_stream(&mut monitor, reader, &mut out, format, only_changes)?;
    out.flush()?;

    log::info!(
        "Replayed {} samples from {} ({} written, {} skipped)",
        monitor.accepted(),
        file.display(),
        stats.written,
        stats.skipped
    );
    monitor.stop();
    Ok(())
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
struct ReplayStats {
    /// Readouts written to the output.
    written: usize,
    /// Rows that could not be parsed or held non-finite values.
    skipped: usize,
}

/// Feed every record of `reader` through a started monitor, writing readouts to `out`.
fn replay_stream<R: Read, W: Write>(
    monitor: &mut MotionMonitor,
    mut reader: SampleReader<R>,
    out: &mut W,
    format: OutputFormat,
    only_changes: bool,
) -> Result<ReplayStats> {
    let mut stats = ReplayStats::default();
    let mut previous: Option<Readout> = None;

    while let Some(sample) = reader.next() {
        let sample = match sample {
            Ok(sample) => sample,
            Err(e) => {
                log::warn!("Skipping line {}: {e}", reader.line());
                stats.skipped += 1;
                continue;
            }
        };

        let readout = match monitor.process(&sample) {
            Ok(readout) => readout,
            Err(e @ Error::NonFiniteSample { .. }) => {
                log::warn!("Skipping line {}: {e}", reader.line());
                stats.skipped += 1;
                continue;
            }
            Err(e) => return Err(e.into()),
        };

        let changed = previous.map_or(true, |p| readout.labels_differ(&p));
        previous = Some(readout);
        if only_changes && !changed {
            continue;
        }

        match format {
            OutputFormat::Text => {
                if let Some(ts) = readout.timestamp_ms {
                    writeln!(out, "--- t={ts}ms ---")?;
                }
                writeln!(out, "{readout}\n")?;
            }
            OutputFormat::Json => {
                serde_json::to_writer(&mut *out, &readout)?;
                writeln!(out)?;
            }
        }
        stats.written += 1;
    }

    Ok(stats)
}
