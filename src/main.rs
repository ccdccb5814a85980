mod batch;
mod report;

use batch::{MAX_TILES, read_hand_file, solve_all};
use galaxy::GalaxyRule;
use galaxy::hand::{parse_tile, parse_tiles};
use galaxy::rule::derive_doras;
use galaxy::wall::Wall;
use galaxy::worker::spawn_wait_solver;
use report::{DealReport, DoraReport, HandReport, WaitReport};
use std::fmt::Display;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result, ensure};
use clap::{ArgAction, Parser, Subcommand};
use indicatif::ProgressBar;
use log::{LevelFilter, info};
use serde::Serialize;
use simplelog::{ColorChoice, ConfigBuilder, TermLogger, TerminalMode};

/// Galaxy mahjong hand solver.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// JSON rule file. Missing fields take their default.
    #[arg(long, global = true)]
    rule: Option<PathBuf>,
    /// Print results as JSON.
    #[arg(long, global = true)]
    json: bool,
    /// More logging, repeat for more.
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,
    /// Only log errors.
    #[arg(short, long, global = true)]
    quiet: bool,
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Decompose a complete hand, e.g. `hand 1s1s2s2s3s3s4s4s`.
    Hand {
        #[arg(required = true)]
        tiles: Vec<String>,
    },
    /// List the waits of a hand one tile short.
    Wait {
        #[arg(required = true)]
        tiles: Vec<String>,
    },
    /// Show the dora indicated by a tile.
    Dora { indicator: String },
    /// Deal tiles off a shuffled wall.
    Deal {
        #[arg(long)]
        seed: Option<u64>,
        #[arg(long, default_value_t = 13)]
        count: usize,
    },
    /// Solve one hand per line; `.gz` files are decompressed.
    Batch { path: PathBuf },
}

fn init_log(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => LevelFilter::Error,
        (_, 0) => LevelFilter::Warn,
        (_, 1) => LevelFilter::Info,
        (_, 2) => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    };
    let config = ConfigBuilder::new().add_filter_allow_str("galaxy").build();
    if TermLogger::init(level, config, TerminalMode::Stderr, ColorChoice::Auto).is_err() {
        eprintln!("a logger is already installed");
    }
}

fn load_rule(path: Option<&Path>) -> Result<GalaxyRule> {
    let Some(path) = path else {
        return Ok(GalaxyRule::default());
    };
    let file = File::open(path).with_context(|| format!("failed to open rule file {}", path.display()))?;
    let rule: GalaxyRule = serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("failed to parse rule file {}", path.display()))?;
    rule.validate()?;
    info!("loaded {rule:?} from {}", path.display());
    Ok(rule)
}

fn parse_hand(tiles: &[String]) -> Result<Vec<galaxy::Tile>> {
    let hand = parse_tiles(&tiles.join(" "))?;
    ensure!(hand.len() <= MAX_TILES, "{} tiles, at most {MAX_TILES} are allowed", hand.len());
    Ok(hand)
}

fn print<T: Serialize + Display>(value: &T, json: bool) -> Result<()> {
    if json {
        println!("{}", serde_json::to_string_pretty(value)?);
    } else {
        println!("{value}");
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_log(cli.verbose, cli.quiet);
    let rule = load_rule(cli.rule.as_deref())?;

    match cli.command {
        Command::Hand { tiles } => {
            let hand = parse_hand(&tiles)?;
            let decompositions = rule.solve_hand(&hand);
            print(&HandReport { hand, decompositions }, cli.json)?;
        }
        Command::Wait { tiles } => {
            let hand = parse_hand(&tiles)?;
            let rx = spawn_wait_solver(Arc::new(rule), hand.clone());
            let spinner = ProgressBar::new_spinner().with_message("solving waits");
            spinner.enable_steady_tick(Duration::from_millis(100));
            let waits = rx.recv().context("wait solver exited without a result")?;
            spinner.finish_and_clear();
            print(&WaitReport::new(hand, waits), cli.json)?;
        }
        Command::Dora { indicator } => {
            let indicator = parse_tile(&indicator)?;
            let doras = derive_doras(indicator);
            print(&DoraReport { indicator, doras }, cli.json)?;
        }
        Command::Deal { seed, count } => {
            let seed = match seed {
                Some(s) => s,
                None => SystemTime::now().duration_since(UNIX_EPOCH)?.as_nanos() as u64,
            };
            let mut tiles = Wall::new(&rule, seed)?.deal(count)?;
            tiles.sort_unstable();
            print(&DealReport { seed, tiles }, cli.json)?;
        }
        Command::Batch { path } => {
            let raw = read_hand_file(&path)?;
            let reports = solve_all(&rule, &raw);
            info!("solved {} hands from {}", reports.len(), path.display());
            if cli.json {
                println!("{}", serde_json::to_string_pretty(&reports)?);
            } else {
                for report in &reports {
                    println!("{report}");
                }
            }
        }
    }

    Ok(())
}
