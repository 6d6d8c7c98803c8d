use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use log::error;

use bastion_app::game_loop::LoopConfig;
use bastion_app::session::{self, SessionSummary};
use bastion_app::{init_logging, AppError};
use bastion_sim::SimConfig;

/// Headless BASTION session runner
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Play endless mode instead of the normal campaign
    #[arg(long)]
    endless: bool,

    /// Simulated seconds to run
    #[arg(long, default_value_t = 120.0)]
    seconds: f32,

    /// Run on the game loop thread at wall-clock speed
    #[arg(long)]
    realtime: bool,

    /// JSON array of commands to play instead of the default opening
    #[arg(long)]
    script: Option<PathBuf>,

    /// Profile file for lifetime stats, achievements and settings
    #[arg(long)]
    profile: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn run(args: Args) -> Result<SessionSummary, AppError> {
    let config = LoopConfig {
        sim: SimConfig {
            seed: args.seed,
            ..SimConfig::default()
        },
        profile_path: args.profile,
    };
    let script = match &args.script {
        Some(path) => session::load_script(path)?,
        None => session::default_script(args.endless),
    };

    if args.realtime {
        session::run_realtime(config, script, args.seconds)
    } else {
        Ok(session::run_fast(&config, script, args.seconds))
    }
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbose);

    match run(args).and_then(|summary| Ok(serde_json::to_string_pretty(&summary)?)) {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(e) => {
            error!("{e}");
            ExitCode::FAILURE
        }
    }
}
