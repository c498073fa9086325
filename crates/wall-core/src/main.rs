//! Curved Wall Layout
//!
//! Generates a curved wall, runs a timed activation session against it and
//! reports the result.
//!
//! Examples:
//!   cargo run -p wall-core -- --rows 5 --columns 7
//!   cargo run -p wall-core -- --output snapshot > wall.json
//!   cargo run -p wall-core -- --retune-at 2.0 --retune-ratio 0.4
//!   cargo run -p wall-core -- --activate 202 --activate 405 --output events
//!
//! Library logs go to stderr; set `RUST_LOG` (e.g. `RUST_LOG=debug`) to see
//! rejected parameter values.

use clap::{Parser, ValueEnum};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use wall_core::{
    AppConfig, CellEntity, ConfigError, LaserColors, PointGridMesh, PointerFeedback, TimedCell,
    WallLayoutEngine, DEFAULT_CONFIG_PATH,
};
use wall_events::{CellId, CellRecord};

/// Upper bound on update steps in one session
const MAX_SESSION_STEPS: u64 = 10_000_000;

/// What to print once the session ends
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
enum Output {
    /// Human-readable summary
    Summary,
    /// Wall snapshot as JSON
    Snapshot,
    /// Built surface mesh as JSON
    Mesh,
    /// Wall events as JSON lines
    Events,
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "curved_wall")]
#[command(about = "Lay out and drive a curved wall of targets")]
struct Args {
    /// Path to the TOML configuration
    #[arg(long, default_value = DEFAULT_CONFIG_PATH)]
    config: PathBuf,

    /// Override the row count
    #[arg(long)]
    rows: Option<u32>,

    /// Override the column count
    #[arg(long)]
    columns: Option<u32>,

    /// Override the random seed
    #[arg(long)]
    seed: Option<u64>,

    /// Session length in seconds
    #[arg(long, default_value_t = 10.0)]
    duration: f64,

    /// Update step in seconds
    #[arg(long, default_value_t = 0.05)]
    dt: f64,

    /// Seconds between activations
    #[arg(long, default_value_t = 0.5)]
    spawn_interval: f64,

    /// How long an activated cell stays up
    #[arg(long, default_value_t = 1.5)]
    life_time: f32,

    /// How long an activated cell takes to go back down
    #[arg(long, default_value_t = 0.5)]
    expiring_duration: f32,

    /// Probability that an activation is a decoy
    #[arg(long, default_value_t = 0.2)]
    fake_chance: f64,

    /// Activate this cell id when the session starts (repeatable)
    #[arg(long = "activate", value_name = "ID")]
    activate: Vec<CellId>,

    /// Change both curve ratios at this time (seconds) to exercise a live rebuild
    #[arg(long)]
    retune_at: Option<f64>,

    /// Curve ratio applied at --retune-at
    #[arg(long, default_value_t = 0.5)]
    retune_ratio: f32,

    /// What to print
    #[arg(long, value_enum, default_value_t = Output::Summary)]
    output: Output,
}

#[derive(Debug, Error)]
enum CliError {
    #[error("config error: {0}")]
    Config(#[from] ConfigError),
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("invalid argument: {0}")]
    InvalidArgument(String),
}

#[derive(Debug, Default)]
struct SessionStats {
    activations: u32,
    fakes: u32,
    skipped: u32,
    rebuilds: u64,
    flashes: u32,
}

fn main() {
    init_logging();

    let args = Args::parse();
    if let Err(e) = run(args) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

/// Checks the session arguments and returns the number of update steps.
fn session_steps(args: &Args) -> Result<u64, CliError> {
    if !(args.dt.is_finite() && args.dt > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "--dt must be positive, got {}",
            args.dt
        )));
    }
    if !(args.duration.is_finite() && args.duration >= 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "--duration must be zero or more, got {}",
            args.duration
        )));
    }
    if !(args.spawn_interval.is_finite() && args.spawn_interval > 0.0) {
        return Err(CliError::InvalidArgument(format!(
            "--spawn-interval must be positive, got {}",
            args.spawn_interval
        )));
    }
    if !(0.0..=1.0).contains(&args.fake_chance) {
        return Err(CliError::InvalidArgument(format!(
            "--fake-chance must be within [0, 1], got {}",
            args.fake_chance
        )));
    }

    let steps = (args.duration / args.dt).ceil();
    if steps > MAX_SESSION_STEPS as f64 {
        return Err(CliError::InvalidArgument(format!(
            "--duration {} with --dt {} needs {} steps, more than {}",
            args.duration, args.dt, steps, MAX_SESSION_STEPS
        )));
    }
    Ok(steps as u64)
}

fn run(args: Args) -> Result<(), CliError> {
    let steps = session_steps(&args)?;

    let mut config = if args.config.exists() {
        AppConfig::from_file(&args.config)?
    } else {
        AppConfig::load_or_default(&args.config)
    };
    config.wall.update_grid_size(args.rows, args.columns);
    if let Some(seed) = args.seed {
        config.engine.seed = seed;
    }

    let mut engine = WallLayoutEngine::with_engine_config(
        config.wall.clone(),
        &config.engine,
        TimedCell::from_record as fn(&CellRecord) -> TimedCell,
        PointGridMesh::new(),
    );
    let mut pointer = PointerFeedback::new(config.pointer.clone(), LaserColors::default());
    let mut rng = SmallRng::seed_from_u64(config.engine.seed.wrapping_add(1));

    engine.initialize();
    engine.enable();

    let mut stats = SessionStats::default();
    for &id in &args.activate {
        if engine.activate_specific(id, args.life_time, args.expiring_duration, false) {
            stats.activations += 1;
            pointer.shoot();
            stats.flashes += 1;
        } else {
            tracing::warn!("Cell {} is not on the wall, skipping", id);
        }
    }

    let mut events = engine.drain_events();
    let dt = args.dt as f32;
    let mut until_spawn = 0.0_f64;
    let mut retuned = false;

    for step in 0..steps {
        let elapsed = step as f64 * args.dt;
        if let Some(at) = args.retune_at {
            if !retuned && elapsed >= at {
                engine.update_curve_ratio(Some(args.retune_ratio), Some(args.retune_ratio));
                engine.on_parameters_changed();
                retuned = true;
            }
        }

        until_spawn -= args.dt;
        if until_spawn <= 0.0 {
            until_spawn += args.spawn_interval;
            // Random activation never returns if nothing can be activated
            let any_ready = engine.cells().values().any(|c| c.entity.can_be_activated());
            if any_ready {
                let is_fake = rng.gen_bool(args.fake_chance);
                if engine
                    .activate_random(args.life_time, args.expiring_duration, is_fake)
                    .is_some()
                {
                    stats.activations += 1;
                    if is_fake {
                        stats.fakes += 1;
                    } else {
                        pointer.shoot();
                        stats.flashes += 1;
                    }
                }
            } else {
                stats.skipped += 1;
            }
        }

        engine.update(dt);
        pointer.update(dt);
        events.extend(engine.drain_events());
    }
    stats.rebuilds = engine.generation().saturating_sub(1);

    match args.output {
        Output::Summary => print_summary(&engine, &stats, steps as f64 * args.dt),
        Output::Snapshot => println!("{}", engine.snapshot().to_json()?),
        Output::Mesh => match engine.mesh().surface() {
            Some(surface) => println!("{}", serde_json::to_string_pretty(surface)?),
            None => eprintln!("Warning: no surface was built"),
        },
        Output::Events => {
            for event in &events {
                println!("{}", event.to_jsonl()?);
            }
        }
    }

    Ok(())
}

fn print_summary(
    engine: &WallLayoutEngine<fn(&CellRecord) -> TimedCell, PointGridMesh>,
    stats: &SessionStats,
    elapsed: f64,
) {
    let config = engine.config();
    println!("Curved Wall");
    println!("===========");
    println!(
        "Grid: {} columns x {} rows",
        config.column_count, config.row_count
    );
    println!(
        "Wall size: ({}, {}, {})",
        config.wall_size.x, config.wall_size.y, config.wall_size.z
    );
    println!(
        "Curve ratios: x={} y={}  Max angle: {}",
        config.x_curve_ratio, config.y_curve_ratio, config.max_angle
    );
    println!("Cells: {}", engine.cells().len());
    if let Some(surface) = engine.mesh().surface() {
        println!(
            "Surface: {} vertices, {} triangles",
            surface.vertices.len(),
            surface.triangle_count()
        );
    }
    println!();
    println!("Session: {:.2}s", elapsed);
    println!(
        "  Activations: {} ({} decoys)",
        stats.activations, stats.fakes
    );
    println!("  Skipped (no cell ready): {}", stats.skipped);
    println!("  Pointer flashes: {}", stats.flashes);
    println!("  Rebuilds: {}", stats.rebuilds);

    let busiest = engine
        .cells()
        .values()
        .max_by_key(|c| c.entity.activation_count());
    if let Some(cell) = busiest {
        println!(
            "  Busiest cell: {} at {} ({} activations)",
            cell.record.id,
            cell.record.index,
            cell.entity.activation_count()
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(extra: &[&str]) -> Args {
        let mut argv = vec!["curved_wall"];
        argv.extend_from_slice(extra);
        Args::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_default_session_steps() {
        assert_eq!(session_steps(&parse(&[])).unwrap(), 200);
    }

    #[test]
    fn test_small_step_session_is_counted_exactly() {
        let args = parse(&["--duration", "0.5", "--dt", "0.0001"]);
        assert_eq!(session_steps(&args).unwrap(), 5000);
    }

    #[test]
    fn test_oversized_session_rejected() {
        let args = parse(&["--duration", "4", "--dt", "1e-7"]);
        assert!(matches!(session_steps(&args), Err(CliError::InvalidArgument(_))));
    }

    #[test]
    fn test_fake_chance_must_be_a_probability() {
        for value in ["NaN", "-0.1", "1.5", "inf"] {
            let flag = format!("--fake-chance={}", value);
            let args = parse(&[flag.as_str()]);
            assert!(
                matches!(session_steps(&args), Err(CliError::InvalidArgument(_))),
                "{} accepted",
                value
            );
        }
        assert!(session_steps(&parse(&["--fake-chance", "1"])).is_ok());
    }

    #[test]
    fn test_bad_step_and_interval_rejected() {
        for flag in ["--dt=0", "--dt=NaN", "--duration=-1", "--spawn-interval=0"] {
            assert!(session_steps(&parse(&[flag])).is_err(), "{} accepted", flag);
        }
    }

    #[test]
    fn test_activate_parses_cell_ids() {
        let args = parse(&["--activate", "202", "--activate", "1011"]);
        assert_eq!(args.activate, vec![CellId(202), CellId(1011)]);

        let argv = ["curved_wall", "--activate", "200"];
        assert!(Args::try_parse_from(argv).is_err());
    }
}
