//! sim-harness: runs an airstrike scenario headless and prints the result.
//!
//! Usage:
//!   sim-harness run --scenario strike.json --ticks 3000 --seed 7 --verbose

use std::fs;
use std::path::PathBuf;
use std::process;

use airstrike_core::events::SimEvent;
use airstrike_core::state::SimSnapshot;
use airstrike_sim::scenario::AirstrikeScenario;
use airstrike_sim::{SimConfig, SimulationEngine};
use log::{info, LevelFilter};

/// Ten simulated minutes at 25 Hz.
const DEFAULT_TICKS: u64 = 15_000;

fn main() {
    let args: Vec<String> = std::env::args().collect();

    if args.len() < 2 {
        print_usage();
        process::exit(1);
    }

    match args[1].as_str() {
        "run" => cmd_run(&args[2..]),
        "help" | "--help" | "-h" => print_usage(),
        other => {
            eprintln!("Unknown command: {other}");
            print_usage();
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "sim-harness: AIRSTRIKE headless scenario runner\n\
         \n\
         Commands:\n\
         \n\
         run       Run a scenario and print the final snapshot as JSON\n\
         \n\
           --scenario <path>  Scenario JSON file\n\
           --ticks <N>        Maximum ticks to run (default: {DEFAULT_TICKS})\n\
           --seed <S>         RNG seed (default: 42)\n\
           --verbose          Log debug output\n\
         \n\
         The run stops early once no bomber or bomb is left in the world.\n"
    );
}

/// Initializes the global logger. `RUST_LOG` overrides the default level.
fn init_logging(verbose: bool) {
    let level = if verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Info
    };
    let env = env_logger::Env::default().default_filter_or(level.to_string());
    let _ = env_logger::Builder::from_env(env).try_init();
}

fn parse_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.iter()
        .position(|a| a == flag)
        .and_then(|i| args.get(i + 1))
        .map(String::as_str)
}

fn parse_number(args: &[String], flag: &str, default: u64) -> u64 {
    match parse_value(args, flag) {
        Some(raw) => match raw.parse::<u64>() {
            Ok(n) => n,
            Err(_) => {
                eprintln!("Error: {flag} expects a whole number, got {raw:?}");
                process::exit(1);
            }
        },
        None => default,
    }
}

// --- Run command ---

fn cmd_run(args: &[String]) {
    init_logging(args.iter().any(|a| a == "--verbose"));

    let path = match parse_value(args, "--scenario") {
        Some(p) => PathBuf::from(p),
        None => {
            eprintln!("Error: --scenario <path> is required");
            process::exit(1);
        }
    };
    let max_ticks = parse_number(args, "--ticks", DEFAULT_TICKS);
    let seed = parse_number(args, "--seed", SimConfig::default().seed);

    let json = match fs::read_to_string(&path) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error reading {}: {e}", path.display());
            process::exit(1);
        }
    };
    let scenario = match AirstrikeScenario::from_json(&json) {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Error in {}: {e}", path.display());
            process::exit(1);
        }
    };

    let config = SimConfig {
        seed,
        ..Default::default()
    };
    let mut engine = match SimulationEngine::from_scenario(config, &scenario) {
        Ok(engine) => engine,
        Err(e) => {
            eprintln!("Error: {e}");
            process::exit(1);
        }
    };

    info!("Running '{}' for up to {max_ticks} ticks (seed {seed})", scenario.name);

    let mut last = SimSnapshot::default();
    for _ in 0..max_ticks {
        last = engine.tick();
        for event in &last.events {
            log_event(last.time.tick, event);
        }
        if last.bombers.is_empty() && last.munitions.is_empty() {
            break;
        }
    }

    info!(
        "Stopped at tick {} ({:.1}s), sync hash {:016x}",
        last.time.tick, last.time.elapsed_secs, last.sync_hash
    );

    match serde_json::to_string_pretty(&last) {
        Ok(out) => println!("{out}"),
        Err(e) => {
            eprintln!("Error serializing snapshot: {e}");
            process::exit(1);
        }
    }
}

fn log_event(tick: u64, event: &SimEvent) {
    match event {
        SimEvent::Impact { owner, position } => info!(
            "[{tick:>6}] impact from {owner:?} at ({:.0}, {:.0}, {:.0})",
            position.x, position.y, position.z
        ),
        other => info!("[{tick:>6}] {other:?}"),
    }
}
