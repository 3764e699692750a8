//! Economy balance simulator CLI.
//!
//! Run Monte Carlo sessions of a greedy bot to analyze economy balance.
//!
//! Usage:
//!   cargo run --bin simulate -- [OPTIONS]
//!
//! Examples:
//!   cargo run --bin simulate                    # Default: 100 one-hour runs
//!   cargo run --bin simulate -- -n 20 -d 86400  # 20 one-day runs
//!   cargo run --bin simulate -- --seed 42       # Reproducible run

use emsx_miner::build_info;
use emsx_miner::simulator::{run_simulation, SimConfig};
use std::env;
use std::path::PathBuf;
use std::process;
use tracing_subscriber::EnvFilter;

/// Output options that do not affect the simulation itself.
#[derive(Debug, Default)]
struct OutputOptions {
    json: bool,
    quiet: bool,
}

fn main() {
    let args: Vec<String> = env::args().collect();
    let (config, output) = parse_args(&args);

    let default_level = match (output.quiet, config.verbosity) {
        (true, _) => "error",
        (false, v) if v >= 2 => "info",
        _ => "warn",
    };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_writer(std::io::stderr)
        .init();

    if !output.quiet {
        println!("╔═══════════════════════════════════════════════════════════════╗");
        println!("║              EMSX MINER BALANCE SIMULATOR                     ║");
        println!("╚═══════════════════════════════════════════════════════════════╝");
        println!();
        println!("Configuration:");
        println!("  Runs:           {}", config.num_runs);
        println!("  Duration:       {}s", config.duration_secs);
        println!("  Tick:           {}ms", config.tick_ms);
        if let Some(seed) = config.seed {
            println!("  Seed:           {}", seed);
        }
        if let Some(dir) = &config.save_dir {
            println!("  Save Dir:       {}", dir.display());
        }
        println!();
        println!("Running simulation...");
        println!();
    }

    let report = run_simulation(&config);

    if !output.quiet {
        println!("{}", report.to_text());
    }

    if output.json {
        let filename = format!(
            "sim_report_{}.json",
            chrono::Utc::now().format("%Y%m%d_%H%M%S")
        );
        match std::fs::write(&filename, report.to_json()) {
            Ok(()) => println!("JSON report saved to: {}", filename),
            Err(e) => {
                eprintln!("Failed to write JSON report {}: {}", filename, e);
                process::exit(1);
            }
        }
    }
}

fn parse_args(args: &[String]) -> (SimConfig, OutputOptions) {
    let mut config = SimConfig::default();
    let mut output = OutputOptions::default();

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "-n" | "--runs" => {
                if let Some(v) = value {
                    config.num_runs = v.parse().unwrap_or(100);
                    i += 1;
                }
            }
            "-s" | "--seed" => {
                if let Some(v) = value {
                    config.seed = v.parse().ok();
                    i += 1;
                }
            }
            "-d" | "--duration" => {
                if let Some(v) = value {
                    config.duration_secs = v.parse().unwrap_or(3_600);
                    i += 1;
                }
            }
            "-t" | "--tick" => {
                if let Some(v) = value {
                    config.tick_ms = v.parse().unwrap_or(1_000);
                    i += 1;
                }
            }
            "--save-dir" => {
                if let Some(v) = value {
                    config.save_dir = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--json" => output.json = true,
            "-v" | "--verbose" => config.verbosity = 2,
            "-q" | "--quiet" => {
                output.quiet = true;
                config.verbosity = 0;
            }
            "--quick" => config = SimConfig::quick(),
            "--long" => config = SimConfig::long_session(),
            "--version" => {
                println!("simulate {}", build_info::version_string());
                process::exit(0);
            }
            "-h" | "--help" => {
                print_help();
                process::exit(0);
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }

    (config, output)
}

fn print_help() {
    println!("EMSX Miner Balance Simulator");
    println!();
    println!("USAGE:");
    println!("    cargo run --bin simulate -- [OPTIONS]");
    println!();
    println!("OPTIONS:");
    println!("    -n, --runs <N>        Number of simulation runs (default: 100)");
    println!("    -s, --seed <S>        Random seed for reproducibility");
    println!("    -d, --duration <SEC>  Simulated seconds per run (default: 3600)");
    println!("    -t, --tick <MS>       Clock step between ticks (default: 1000)");
    println!("    --save-dir <DIR>      Persist each run under DIR/run-<n>");
    println!("    --json                Save JSON report");
    println!("    --quick               Quick test (10 runs of 10 minutes)");
    println!("    --long                Long test (20 runs of one day)");
    println!("    -v, --verbose         Log every run");
    println!("    -q, --quiet           Only errors");
    println!("    --version             Show version");
    println!("    -h, --help            Show this help");
    println!();
    println!("Set RUST_LOG to override the log filter.");
}
