//! # Dunsim Headless
//!
//! Runs a session without a window, driving controller 0 with a seeded
//! input script.
//!
//! ```text
//! dunsim_headless [--config PATH] [--ticks N]
//! ```
//!
//! Set `RUST_LOG=debug` to see every simulation event.

use std::path::PathBuf;
use std::process::ExitCode;

use dunsim::{GameLoop, InputScript, Session, SessionConfig, SessionResult};
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

const DEFAULT_TICKS: u64 = 600;
const FRAME_DT: f32 = 1.0 / 60.0;
const HOLD_TICKS: u32 = 12;

struct Args {
    config: Option<PathBuf>,
    ticks: u64,
}

impl Args {
    fn parse() -> Result<Self, String> {
        let args: Vec<String> = std::env::args().skip(1).collect();
        let value_of = |flag: &str| {
            args.iter()
                .position(|arg| arg == flag)
                .map(|i| args.get(i + 1).ok_or_else(|| format!("{flag} needs a value")))
                .transpose()
        };

        let config = value_of("--config")?.map(PathBuf::from);
        let ticks = match value_of("--ticks")? {
            Some(text) => text
                .parse()
                .map_err(|_| format!("--ticks expects a number, got {text:?}"))?,
            None => DEFAULT_TICKS,
        };
        Ok(Self { config, ticks })
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

fn run(args: &Args) -> SessionResult<()> {
    let config = match &args.config {
        Some(path) => SessionConfig::from_path(path)?,
        None => SessionConfig::default(),
    };
    let mut script = InputScript::new(config.seed, 0, HOLD_TICKS);

    let session = Session::new(config)?;
    let events = session.events();
    let generation = session.generation();
    info!(
        rooms = generation.rooms,
        entities = generation.entities,
        chunks = generation.chunks,
        "dungeon ready"
    );

    let mut game_loop = GameLoop::new(session);
    for _ in 0..args.ticks {
        game_loop.run_frame(&script.next_frame(FRAME_DT))?;
        for event in events.drain() {
            debug!(?event, "sim event");
        }
    }

    let stats = game_loop.stats();
    let world = game_loop.session().world();
    info!(
        ticks = game_loop.frame_count(),
        moves_accepted = stats.moves_accepted,
        moves_rejected = stats.moves_rejected,
        floor_changes = stats.floor_changes,
        events_dropped = stats.events_dropped,
        avg_frame_us = stats.avg_frame_us(),
        max_frame_us = stats.max_frame_us,
        entities = world.entities().len(),
        chunks = world.chunks().chunk_count(),
        "session finished"
    );
    Ok(())
}

fn main() -> ExitCode {
    init_tracing();

    let args = match Args::parse() {
        Ok(args) => args,
        Err(message) => {
            error!("{message}");
            eprintln!("Usage: dunsim_headless [--config PATH] [--ticks N]");
            return ExitCode::FAILURE;
        }
    };

    match run(&args) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            error!(error = %err, "session failed");
            ExitCode::FAILURE
        }
    }
}
