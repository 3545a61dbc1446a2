// Copyright (C) 2022 Yehowshua Immanuel
// This program is distributed under both the GPLV3 license
// and the YEHOWSHUA license, both of which can be found at
// the root of the folder containing the sources for this program.
use std::io::Write;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::LevelFilter;

use vcd_resample::{convert, Config, ProgressConfig};

/// Converts selected signals of a VCD dump into one `.dat` file each,
/// sampled once per tick.
#[derive(Parser)]
#[command(version)]
struct Cli {
    /// The path to the file to read
    path: PathBuf,

    /// Signals to track; elements of two level arrays are named `{name}_{outer}`
    #[arg(required = true)]
    signals: Vec<String>,

    /// First sample time, in dump time units
    #[arg(long, default_value_t = 0)]
    start_time: u64,

    /// Time between samples, in dump time units
    #[arg(long, default_value_t = vcd_resample::DEFAULT_TICK_WIDTH)]
    tick_width: u64,

    /// Dump time units between progress messages (0 disables them)
    #[arg(long)]
    report_interval: Option<u64>,

    /// Unit label for progress messages
    #[arg(long)]
    report_unit: Option<String>,

    /// Directory the `{signal}_proc.dat` files are written to
    #[arg(short, long, default_value = ".")]
    output_dir: PathBuf,

    /// More output (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    /// Only report errors
    #[arg(short, long)]
    quiet: bool,
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = if quiet {
        LevelFilter::Error
    } else {
        match verbose {
            0 => LevelFilter::Info,
            1 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    };

    env_logger::Builder::new()
        .filter_level(level)
        .format(|buf, record| writeln!(buf, "[{}] {}", record.level(), record.args()))
        .init();
}

fn main() -> ExitCode {
    let args = Cli::parse();
    init_logging(args.verbose, args.quiet);

    log::info!("reading {}", args.path.display());
    log::info!("signals to track are {:?}", args.signals);

    let defaults = ProgressConfig::default();
    let config = Config {
        start_time: args.start_time,
        tick_width: args.tick_width,
        report: ProgressConfig {
            interval: args.report_interval.unwrap_or(defaults.interval),
            unit: args.report_unit.unwrap_or(defaults.unit),
        },
        output_dir: args.output_dir,
    };

    use std::time::Instant;
    let now = Instant::now();

    match convert(&args.path, &args.signals, &config) {
        Ok(conversion) => {
            for path in &conversion.outputs {
                log::info!("wrote {}", path.display());
            }
            log::info!(
                "converted {} signals up to #{} in {:.2?}",
                conversion.outputs.len(),
                conversion.final_time,
                now.elapsed()
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
