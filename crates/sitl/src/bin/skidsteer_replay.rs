//! Play a route through the control bridge and record the vehicle state.
//!
//! Records are written as JSON lines, one per simulation tick, to stdout or
//! to `--output`. Without `--route` the vehicle drives a square.
//!
//! Usage:
//!   cargo run -p skidsteer_sitl --bin skidsteer_replay -- [OPTIONS]

use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use skidsteer_sitl::route::{run_realtime, write_json_line, write_json_lines};
use skidsteer_sitl::{logging, Route, RouteError, RoutePlayer, SimConfig};
use tracing::{error, info};

#[derive(Parser, Debug)]
#[command(version, about = "Replay a skid-steer route against the built-in simulator")]
struct Opts {
    /// Route file (JSON). Defaults to a square.
    #[arg(long)]
    route: Option<PathBuf>,
    /// Simulator config file (JSON)
    #[arg(long)]
    config: Option<PathBuf>,
    /// Write records here instead of stdout
    #[arg(short, long)]
    output: Option<PathBuf>,
    /// Pace playback to wall-clock time
    #[arg(long)]
    realtime: bool,
    /// Straight leg duration of the default square, in seconds
    #[arg(long, default_value_t = 2.0)]
    leg_s: f32,
    /// Pivot duration of the default square, in seconds
    #[arg(long, default_value_t = 0.63)]
    pivot_s: f32,
    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    let opts = Opts::parse();
    logging::init(opts.verbose);

    match run(opts).await {
        Ok(ticks) => {
            info!(ticks, "replay complete");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("replay failed: {}", e);
            ExitCode::FAILURE
        }
    }
}

async fn run(opts: Opts) -> Result<u64, RouteError> {
    let route = match &opts.route {
        Some(path) => Route::from_file(path)?,
        None => Route::square(opts.leg_s, opts.pivot_s),
    };
    let config = match &opts.config {
        Some(path) => SimConfig::from_file(path)?,
        None => SimConfig::default(),
    };

    let mut writer: Box<dyn Write> = match &opts.output {
        Some(path) => Box::new(BufWriter::new(File::create(path)?)),
        None => Box::new(BufWriter::new(io::stdout().lock())),
    };

    let mut player = RoutePlayer::new(route, config)?;

    let ticks = if opts.realtime {
        run_realtime(&mut player, |record| write_json_line(record, &mut writer)).await?
    } else {
        let records = player.run_to_end()?;
        write_json_lines(&records, &mut writer)?;
        records.len() as u64
    };

    writer.flush()?;
    Ok(ticks)
}
