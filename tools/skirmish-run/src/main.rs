//! skirmish-run: run a headless skirmish and print the result.
//!
//! Usage:
//!   skirmish-run --scenario tank-line --ticks 4000 --seed 7
//!   skirmish-run --config tuning.json

use std::path::PathBuf;
use std::process;

use skirmish_core::config::CombatConfig;
use skirmish_core::enums::ScenarioId;
use skirmish_sim::{Skirmish, SkirmishConfig};

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .with_writer(std::io::stderr)
        .init();

    let args: Vec<String> = std::env::args().skip(1).collect();
    if args.iter().any(|a| a == "help" || a == "--help" || a == "-h") {
        print_usage();
        return;
    }

    let config = match parse_config(&args) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            print_usage();
            process::exit(1);
        }
    };

    let mut skirmish = Skirmish::new(config);
    let snapshot = skirmish.run_to_end();

    tracing::info!(
        steps = snapshot.time.step,
        own_alive = snapshot.own_alive,
        enemy_alive = snapshot.enemy_alive,
        winner = ?snapshot.winner,
        "finished"
    );
    match serde_json::to_string_pretty(&snapshot) {
        Ok(json) => println!("{json}"),
        Err(e) => {
            eprintln!("Error: failed to encode snapshot: {e}");
            process::exit(1);
        }
    }
}

fn print_usage() {
    eprintln!(
        "skirmish-run: headless group combat skirmish\n\
         \n\
         Options:\n\
         \n\
           --scenario <name>  bio-vs-ling-bane (default), tank-line,\n\
                              gateway-vs-hydra, air-battle\n\
           --ticks <N>        Step limit (default: 22400)\n\
           --seed <N>         RNG seed (default: 42)\n\
           --config <path>    JSON combat tuning overrides (optional)\n\
         \n\
         The final snapshot is printed to stdout as JSON. Set RUST_LOG=debug\n\
         to see group decisions.\n"
    );
}

fn flag_value<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    for i in 0..args.len() {
        if args[i] == flag && i + 1 < args.len() {
            return Some(&args[i + 1]);
        }
    }
    None
}

fn parse_scenario(name: &str) -> Option<ScenarioId> {
    match name {
        "bio-vs-ling-bane" => Some(ScenarioId::BioVsLingBane),
        "tank-line" => Some(ScenarioId::TankLine),
        "gateway-vs-hydra" => Some(ScenarioId::GatewayVsHydra),
        "air-battle" => Some(ScenarioId::AirBattle),
        _ => None,
    }
}

fn parse_config(args: &[String]) -> Result<SkirmishConfig, String> {
    let mut config = SkirmishConfig::default();

    if let Some(name) = flag_value(args, "--scenario") {
        config.scenario = parse_scenario(name).ok_or_else(|| format!("unknown scenario: {name}"))?;
    }
    if let Some(ticks) = flag_value(args, "--ticks") {
        config.max_steps = ticks
            .parse()
            .map_err(|e| format!("invalid --ticks {ticks}: {e}"))?;
    }
    if let Some(seed) = flag_value(args, "--seed") {
        config.seed = seed
            .parse()
            .map_err(|e| format!("invalid --seed {seed}: {e}"))?;
    }
    if let Some(path) = flag_value(args, "--config") {
        let path = PathBuf::from(path);
        let json = std::fs::read_to_string(&path)
            .map_err(|e| format!("failed to read {}: {e}", path.display()))?;
        config.combat = CombatConfig::from_json(&json).map_err(|e| e.to_string())?;
    }

    Ok(config)
}
