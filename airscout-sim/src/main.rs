//! Host-side simulator for the AirScout engine.
//!
//! Runs the fixed-interval polling cycle against a scripted bus and prints
//! one line per cycle, or the full cycle report as JSON lines.
//!
//! ```text
//! RUST_LOG=debug airscout-sim --scenario co-leak --cycles 80 --interval-ms 0
//! ```

mod scenario;

use std::time::Duration;

use clap::Parser;
use log::info;

use airscout_core::sensor::SensorId;
use airscout_core::time::{FixedTime, MonotonicTime, SystemTime, TimeSource};
use airscout_core::{CycleReport, Monitor, MonitorConfig};

use scenario::{Scenario, SimBus, SIM_CO_ADDRESS};

#[derive(Parser)]
#[command(name = "airscout-sim")]
#[command(about = "Drive the AirScout engine against a simulated sensor bus")]
#[command(version = airscout_core::VERSION)]
struct Cli {
    /// Number of polling cycles to run
    #[arg(long, default_value_t = 60)]
    cycles: u32,

    /// Wall-clock delay between cycles; 0 runs as fast as possible on simulated time
    #[arg(long)]
    interval_ms: Option<u64>,

    /// Room behaviour to simulate
    #[arg(long, value_enum, default_value_t = Scenario::Normal)]
    scenario: Scenario,

    /// Print every cycle report as a JSON line
    #[arg(long)]
    json: bool,

    /// Monitor configuration as JSON (missing fields use defaults)
    #[arg(long)]
    config: Option<std::path::PathBuf>,

    /// Stamp reports with Unix epoch milliseconds instead of time since start
    #[arg(long)]
    wall_clock: bool,

    /// Seed for reading jitter
    #[arg(long, default_value_t = 0x5EED)]
    seed: u32,
}

fn load_config(cli: &Cli) -> Result<MonitorConfig, Box<dyn std::error::Error>> {
    let mut config = match &cli.config {
        Some(path) => serde_json::from_str(&std::fs::read_to_string(path)?)?,
        None => MonitorConfig::default(),
    };
    if cli.scenario.has_co_sensor() && config.co.addresses.is_empty() {
        config = config.with_addresses(SensorId::Co, &[SIM_CO_ADDRESS])?;
    }
    if let Some(ms) = cli.interval_ms.filter(|ms| *ms > 0) {
        config = config.with_poll_interval_ms(ms);
    }
    config.validate()?;
    Ok(config)
}

/// Simulated clock when running flat out, real clock otherwise
enum Clock {
    Simulated(FixedTime),
    Real(Box<dyn TimeSource>),
}

impl Clock {
    fn for_cli(cli: &Cli) -> Self {
        match (cli.interval_ms, cli.wall_clock) {
            (Some(0) | None, false) => Clock::Simulated(FixedTime::new(0)),
            (Some(0) | None, true) => Clock::Simulated(FixedTime::new(SystemTime.now())),
            (Some(_), false) => Clock::Real(Box::new(MonotonicTime::new())),
            (Some(_), true) => Clock::Real(Box::new(SystemTime)),
        }
    }

    fn now(&self) -> u64 {
        match self {
            Clock::Simulated(t) => t.now(),
            Clock::Real(t) => t.now(),
        }
    }

    fn wait(&mut self, interval_ms: u64) {
        match self {
            Clock::Simulated(t) => t.advance(interval_ms),
            Clock::Real(_) => std::thread::sleep(Duration::from_millis(interval_ms)),
        }
    }
}

fn print_line(report: &CycleReport) {
    let states: Vec<String> = report
        .sensors
        .iter()
        .map(|s| format!("{}={}", s.sensor.name(), s.state))
        .collect();
    println!(
        "#{:<4} {:>3}/100 {:<8} [{}] {}",
        report.cycle,
        report.evaluation.score,
        report.evaluation.alert,
        states.join(" "),
        report.summary.headline,
    );
    for entry in report.evaluation.breakdown.iter() {
        println!("        {} {} ({})", entry.name(), entry.points, entry.label);
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let cli = Cli::parse();
    let config = load_config(&cli)?;
    let interval_ms = config.poll_interval_ms;

    let mut clock = Clock::for_cli(&cli);
    let mut bus = SimBus::new(cli.scenario, cli.seed);
    let mut monitor: Monitor = Monitor::new(config)?;

    info!("Simulating {:?} for {} cycles every {} ms", cli.scenario, cli.cycles, interval_ms);

    let mut last = None;
    for _ in 0..cli.cycles {
        let report = monitor.run_cycle(&mut bus, clock.now());
        if cli.json {
            println!("{}", serde_json::to_string(&report)?);
        } else {
            print_line(&report);
        }
        if report.co_danger {
            info!("CO danger trigger at cycle {}", report.cycle);
        }
        last = Some(report);
        clock.wait(interval_ms);
    }

    if let (Some(report), false) = (last, cli.json) {
        println!();
        println!("{}", report.summary);
        let scores: Vec<String> = monitor.score_history().map(|s| s.to_string()).collect();
        println!("Score history: {}", scores.join(" "));
    }

    Ok(())
}
