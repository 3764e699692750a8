//! Headless EMSX Miner session.
//!
//! Loads the saved game, applies offline earnings, optionally performs a few
//! purchases, then idles for a while printing what each tick produced.

use emsx_miner::build_info;
use emsx_miner::economy::Currency;
use emsx_miner::persistence::FileStorage;
use emsx_miner::{GameContext, SystemClock, TickEvent};
use std::path::PathBuf;
use std::process;
use std::thread;
use std::time::{Duration, Instant};
use tracing::info;
use tracing_subscriber::EnvFilter;

/// Wall-clock spacing of driver ticks.
const TICK_INTERVAL: Duration = Duration::from_millis(100);

/// Seconds between status lines.
const STATUS_INTERVAL_SECS: u64 = 10;

#[derive(Debug)]
struct Options {
    seconds: u64,
    save_dir: Option<PathBuf>,
    player_name: Option<String>,
    purchases: Vec<Currency>,
}

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let options = parse_args(&args);

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let storage = match &options.save_dir {
        Some(dir) => FileStorage::in_dir(dir),
        None => FileStorage::new(),
    };
    let storage = match storage {
        Ok(storage) => storage,
        Err(e) => {
            eprintln!("Cannot open save directory: {}", e);
            process::exit(1);
        }
    };
    info!(dir = %storage.dir().display(), "using save directory");

    let mut game = GameContext::load(SystemClock, storage, rand::thread_rng());

    let offline = game.catch_up();
    if !offline.is_empty() {
        println!("Welcome back! You were away for {:.0}s.", offline.elapsed_seconds);
        for (currency, gain) in offline.gains.iter() {
            println!("  +{:.4} {}", gain, currency);
        }
    }

    if let Some(name) = &options.player_name {
        if !game.set_player_name(name) {
            eprintln!("Ignoring blank player name");
        }
    }
    for currency in &options.purchases {
        match game.try_purchase(*currency) {
            Ok(id) => println!("Bought {} ({})", currency.miner_label(), id),
            Err(e) => println!("Could not buy {}: {}", currency.miner_label(), e),
        }
    }

    let started = Instant::now();
    let mut last_status = 0;
    while started.elapsed().as_secs() < options.seconds {
        let result = game.tick();
        for event in &result.events {
            match event {
                TickEvent::EventStarted { kind, multiplier, .. } => {
                    println!("Event: {} (x{})", kind.name(), multiplier)
                }
                TickEvent::EventExpired { kind } => println!("Event over: {}", kind.name()),
                TickEvent::AchievementUnlocked { name, .. } => {
                    println!("Achievement unlocked: {}", name)
                }
                TickEvent::ScoreSubmitted { coins, rank } => match rank {
                    Some(rank) => println!("Score {:.2} ranked #{}", coins, rank),
                    None => println!("Score {:.2} did not place", coins),
                },
            }
        }

        let elapsed = started.elapsed().as_secs();
        if elapsed >= last_status + STATUS_INTERVAL_SECS {
            last_status = elapsed;
            print_status(&game);
        }
        thread::sleep(TICK_INTERVAL);
    }

    game.save_all();
    print_status(&game);
}

fn print_status<C, S, R>(game: &GameContext<C, S, R>)
where
    C: emsx_miner::Clock,
    S: emsx_miner::persistence::Storage,
    R: rand::Rng,
{
    let view = game.view();
    let balances: Vec<String> = view
        .balances
        .iter()
        .map(|(currency, balance)| format!("{:.2} {}", balance, currency))
        .collect();
    println!(
        "[{}] {} | {} miners",
        view.player_name,
        balances.join(" / "),
        view.miners.len()
    );
    if let Some(event) = view.active_event {
        println!("  {} x{} ({}s left)", event.title, event.multiplier, event.remaining_secs);
    }
}

fn parse_currency(code: &str) -> Option<Currency> {
    Currency::ALL
        .into_iter()
        .find(|c| c.code().eq_ignore_ascii_case(code))
}

fn parse_args(args: &[String]) -> Options {
    let mut options = Options {
        seconds: 60,
        save_dir: None,
        player_name: None,
        purchases: Vec::new(),
    };

    let mut i = 1;
    while i < args.len() {
        let value = args.get(i + 1);
        match args[i].as_str() {
            "--seconds" => {
                if let Some(v) = value {
                    options.seconds = v.parse().unwrap_or(60);
                    i += 1;
                }
            }
            "--save-dir" => {
                if let Some(v) = value {
                    options.save_dir = Some(PathBuf::from(v));
                    i += 1;
                }
            }
            "--name" => {
                if let Some(v) = value {
                    options.player_name = Some(v.clone());
                    i += 1;
                }
            }
            "--buy" => {
                if let Some(v) = value {
                    match parse_currency(v) {
                        Some(currency) => options.purchases.push(currency),
                        None => eprintln!("Unknown currency: {}", v),
                    }
                    i += 1;
                }
            }
            "--version" | "-V" => {
                println!("emsx-miner {}", build_info::version_string());
                process::exit(0);
            }
            "--help" | "-h" => {
                print_help();
                process::exit(0);
            }
            other => eprintln!("Ignoring unknown argument: {}", other),
        }
        i += 1;
    }
    options
}

fn print_help() {
    println!("EMSX Miner - idle merge-mining\n");
    println!("USAGE:");
    println!("    emsx-miner [OPTIONS]\n");
    println!("OPTIONS:");
    println!("    --seconds <N>      Idle for N seconds before exiting (default: 60)");
    println!("    --save-dir <DIR>   Save directory (default: ~/.emsx-miner)");
    println!("    --name <NAME>      Set the leaderboard player name");
    println!("    --buy <CURRENCY>   Buy a miner (EMSX, USDT or TON); repeatable");
    println!("    -V, --version      Show version");
    println!("    -h, --help         Show this help");
}
