use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use rand::rngs::StdRng;
use rand::SeedableRng;
use tracing_subscriber::EnvFilter;

use lunar_lander::advisory::{Advice, Correction};
use lunar_lander::io::csv;
use lunar_lander::types::VehicleState;
use lunar_lander::{BurnCommand, LanderConfig, LandingOutcome, Session, Termination};

const RED: &str = "\x1b[31m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RESET: &str = "\x1b[0m";

#[derive(Parser)]
#[command(author, version, about = "Apollo lunar module manual descent simulator")]
struct Cli {
    /// TOML file overriding the default scenario
    #[arg(long)]
    config: Option<PathBuf>,

    /// Seed for the initial speeds (random if omitted)
    #[arg(long)]
    seed: Option<u64>,

    /// Write per-step telemetry to this CSV file when the flight ends
    #[arg(long)]
    telemetry: Option<String>,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();
    let config = match &cli.config {
        Some(path) => LanderConfig::load(path)
            .with_context(|| format!("loading {}", path.display()))?,
        None => LanderConfig::default(),
    };

    let mut rng = match cli.seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    };
    let initial = config.initial.sample(&mut rng, &config.vehicle);

    print_intro(&config, &initial);

    let mut session = Session::new(config, initial);
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();

    while !session.is_finished() {
        let state = session.state();
        if state.fuel_exhausted() {
            println!("{RED}[WARNING] DESCENT FUEL HAS RUN OUT. CONSIDER ABORT PROCESS.{RESET}");
        }
        println!(
            "t={:.2}s  Alt={:.3}  vDown={:.3}  hPos={:.3}  hSpeed={:.3}  Fuel={:.3}",
            state.time, state.altitude, state.v_down, state.horiz_pos, state.horiz_speed,
            state.descent_fuel
        );

        let Some(cmd) = read_command(&mut lines)? else {
            println!();
            println!("Input closed. Leaving the simulator.");
            break;
        };

        if cmd.is_abort() {
            println!("Aborting landing...");
        }

        let result = match session.submit(cmd) {
            Ok(result) => result,
            Err(err) => {
                println!("Invalid command: {err}.");
                continue;
            }
        };

        for correction in &result.delivered {
            print_correction(correction);
        }

        match result.termination {
            Termination::None => {}
            Termination::Landed(outcome) => print_touchdown(&result.state, outcome),
            Termination::AbortSucceeded { delta_v } => {
                println!(
                    "{GREEN}Abort successful! Achieved lunar orbit with {delta_v:.2} ft/s delta-v.{RESET}"
                );
            }
            Termination::AbortFailedContinuing(failure) => {
                println!("{RED}{failure}{RESET}");
                println!("Continuing landing with remaining fuel.");
            }
            Termination::AbortFailedCrash(failure) => println!("{RED}{failure}{RESET}"),
            Termination::TimeLimit => {
                println!();
                println!("Simulation aborted after reaching the time limit.");
            }
        }
    }

    if let Some(path) = &cli.telemetry {
        csv::write_trajectory_file(path, session.trajectory())
            .with_context(|| format!("writing telemetry to {path}"))?;
        println!("Telemetry written to {path}");
    }

    Ok(())
}

fn print_intro(config: &LanderConfig, initial: &VehicleState) {
    let lem = &config.vehicle;
    let adv = &config.advisory;
    let total = lem.total_mass(initial.descent_fuel, initial.ascent_fuel);

    println!("=========================================================");
    println!("          APOLLO LUNAR LANDER SIMULATOR");
    println!("=========================================================");
    println!();
    println!("You are the pilot of the Lunar Module (LEM) when the AGC");
    println!("fails at {:.0} ft due to prior burn errors. Initial speeds", initial.altitude);
    println!(
        "are random (vDown: {}-{} ft/s, horizSpeed: {}-{} ft/s).",
        config.initial.v_down_min,
        config.initial.v_down_max,
        config.initial.horiz_speed_min,
        config.initial.horiz_speed_max
    );
    println!();
    println!("Starting Conditions:");
    println!("  - Altitude: {:.0} ft", initial.altitude);
    println!("  - Vertical Speed: {:.2} ft/s (downward)", initial.v_down);
    println!("  - Horizontal Speed: {:.2} ft/s", initial.horiz_speed);
    println!("  - Descent Fuel: {:.2} lbs", initial.descent_fuel);
    println!("  - Ascent Fuel (for abort): {:.0} lbs", initial.ascent_fuel);
    println!("  - Descent Dry Mass: {:.0} lbs", lem.descent_dry_mass);
    println!("  - Ascent Dry Mass: {:.0} lbs", lem.ascent_dry_mass);
    println!("  - Total Mass: {:.0} lbs", total);
    println!(
        "  - Total Mass Slugs: {:.3}",
        lem.mass_slugs(initial.descent_fuel, initial.ascent_fuel)
    );
    println!();
    println!("Controls:");
    println!("  - Duration: Time (seconds) to apply burns (-1 to abort)");
    println!("  - vBurn: Vertical burn rate (0 to {:.0} lbs/s)", lem.max_vertical_burn);
    println!(
        "  - hBurn: Horizontal burn rate (-{0:.0} to {0:.0} lbs/s)",
        lem.max_horiz_burn
    );
    println!();
    println!("Objective:");
    println!("Land with vDown <= 5 ft/s and |horizSpeed| <= 5 ft/s for a");
    println!("perfect landing. Receive feedback after each burn to adjust");
    println!("your trajectory. Abort if needed, but ensure you can reach orbit!");
    println!();
    println!(
        "Note: Mission Control feedback arrives {:.1} seconds after each burn",
        adv.total_delay()
    );
    println!(
        "      ({:.1} s signal delay plus {:.1} s for Ground Control to process).",
        adv.transmission_delay, adv.processing_delay
    );
    println!("=========================================================");
    println!();
    println!(
        "Lunar Lander: AGC failed. Altitude={:.0} ft, vDown={:.0} ft/s, hSpeed={:.0} ft/s",
        initial.altitude, initial.v_down, initial.horiz_speed
    );
    println!("Input duration (s, -1 to abort), vBurn, hBurn, separated by spaces");
}

/// Prompt until three numbers are entered. `None` on end of input.
fn read_command<B: BufRead>(lines: &mut io::Lines<B>) -> anyhow::Result<Option<BurnCommand>> {
    loop {
        print!(">> ");
        io::stdout().flush()?;

        let Some(line) = lines.next() else {
            return Ok(None);
        };
        let line = line?;
        let parts: Vec<&str> = line.split_whitespace().collect();
        if parts.len() != 3 {
            println!("Invalid input. Please enter three numbers separated by spaces.");
            continue;
        }
        match (parts[0].parse::<f64>(), parts[1].parse::<f64>(), parts[2].parse::<f64>()) {
            (Ok(d), Ok(v), Ok(h)) => return Ok(Some(BurnCommand::new(d, v, h))),
            _ => println!("Invalid input. Please enter valid numbers."),
        }
    }
}

fn print_correction(c: &Correction) {
    let header = format!(
        "[Mission Control: on t={:.2}s (received on t={:.2}s)]",
        c.eval_time, c.delivery_time
    );
    match c.advice {
        Advice::Nominal => println!("{YELLOW}{header} Burn rates are nominal.{RESET}"),
        Advice::Adjust { v_burn_delta, h_burn_delta } => {
            for (name, delta) in [("vBurn", v_burn_delta), ("hBurn", h_burn_delta)] {
                if delta > 0.0 {
                    println!("{YELLOW}{header} Increase {name} by {delta:.2} lbs/s{RESET}");
                } else if delta < 0.0 {
                    println!("{YELLOW}{header} Decrease {name} by {:.2} lbs/s{RESET}", -delta);
                }
            }
        }
    }
}

fn print_touchdown(state: &VehicleState, outcome: LandingOutcome) {
    println!();
    println!("Touchdown at t = {:.1} s", state.time);
    println!("Final Downward Speed: {:.2} ft/s", state.v_down);
    println!("Final Horizontal Speed: {:.2} ft/s", state.horiz_speed);
    match outcome {
        LandingOutcome::Perfect => println!("{GREEN}Perfect Landing! Impact speed is safe.{RESET}"),
        LandingOutcome::Good => println!("{GREEN}Good Landing (minor impact).{RESET}"),
        LandingOutcome::Crash => println!("{RED}Crash Landing! Impact speed is too high.{RESET}"),
    }
}
