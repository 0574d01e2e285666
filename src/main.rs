use anyhow::{bail, Context, Result};
use clap::Parser;
use log::info;
use serde_json::json;
use std::path::PathBuf;

use grid_traffic::simulation::{
    AgentKind, LayoutSource, SimConfig, SimWorld, StepReport, SPAWN_INTERVAL,
};

#[derive(Parser)]
#[command(name = "grid_traffic")]
#[command(about = "Grid-based traffic simulation, run headless")]
struct Cli {
    /// Layout file, one glyph per cell. The built-in demo city is used when omitted
    #[arg(long, requires = "dictionary")]
    layout: Option<PathBuf>,

    /// Glyph dictionary (JSON) for the layout file
    #[arg(long, requires = "layout")]
    dictionary: Option<PathBuf>,

    /// Number of simulation steps to run
    #[arg(long, default_value = "100")]
    steps: u64,

    /// Seed for destination choice and activation order
    #[arg(long)]
    seed: Option<u64>,

    /// Steps between spawn waves
    #[arg(long, default_value_t = SPAWN_INTERVAL)]
    spawn_interval: u64,

    /// Print a summary and map every N steps (0 disables)
    #[arg(long, default_value = "10")]
    report_every: u64,

    /// Print final snapshots as JSON instead of summaries
    #[arg(long)]
    json: bool,
}

fn main() -> Result<()> {
    env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn,grid_traffic=info"),
    )
    .init();

    let cli = Cli::parse();

    let source = match (cli.layout.clone(), cli.dictionary.clone()) {
        (Some(layout), Some(dictionary)) => LayoutSource::Files { layout, dictionary },
        (None, None) => LayoutSource::demo(),
        _ => bail!("--layout and --dictionary must be given together"),
    };

    let mut config = SimConfig::default().with_spawn_interval(cli.spawn_interval);
    if let Some(seed) = cli.seed {
        config = config.with_seed(seed);
    }

    let world = source
        .build(config)
        .context("Failed to build the simulation world")?;

    run_headless(world, &cli)
}

/// Run the simulation in headless mode (no graphics)
fn run_headless(mut world: SimWorld, cli: &Cli) -> Result<()> {
    let verbose = !cli.json;

    if verbose {
        println!("Running grid traffic simulation for {} steps...", cli.steps);
        println!();
        println!("Initial state:");
        world.print_summary();
        world.draw_map();
    }

    for _ in 0..cli.steps {
        let report = world.step();

        if verbose && cli.report_every > 0 && report.step % cli.report_every == 0 {
            print_step_report(&report);
            world.print_summary();
            world.draw_map();
        }
    }

    info!("=== SIMULATION COMPLETE ===");
    info!("Steps run: {}", world.step_count());
    info!("Total vehicles spawned: {}", world.total_spawned());
    info!("Total vehicles arrived: {}", world.total_arrived());
    info!("Active vehicles: {}", world.vehicle_count());
    info!(
        "Arrival rate: {:.1}%",
        if world.total_spawned() > 0 {
            world.total_arrived() as f64 / world.total_spawned() as f64 * 100.0
        } else {
            0.0
        }
    );

    if cli.json {
        let output = json!({
            "dimensions": world.dimensions(),
            "totalArrived": world.total_arrived(),
            "step": world.step_count(),
            "vehicles": world.snapshot(AgentKind::Vehicles),
            "obstacles": world.snapshot(AgentKind::Obstacles),
            "destinations": world.snapshot(AgentKind::Destinations),
            "trafficLights": world.snapshot(AgentKind::TrafficLights),
        });
        println!("{}", serde_json::to_string_pretty(&output)?);
    } else {
        println!("=== Final State ===");
        world.print_summary();
        world.draw_map();
    }

    Ok(())
}

fn print_step_report(report: &StepReport) {
    println!(
        "--- After step {} (advanced {}, held {}, arrived {}, spawned {}) ---",
        report.step, report.advanced, report.held, report.arrived, report.spawned
    );
}
