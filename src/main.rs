//! catwalk - an ASCII-art cat that walks across your terminal
//!
//! The cat appears from the left edge, walks to the right edge inside an
//! 11-row band below the prompt, and leaves. That's it.
//!
//! # Usage
//!
//! ```text
//! catwalk              # one walk at the default speed
//! CAT_SPEED=400 catwalk
//! ```
//!
//! # Environment
//!
//! | Variable | Meaning |
//! |----------|---------|
//! | `CAT_SPEED` | Higher is faster (default 100) |
//! | `CATWALK_LOG` | Append logs to this file |
//! | `RUST_LOG` | Log filter when `CATWALK_LOG` is set |

mod animation;
mod clock;
mod config;
mod renderer;
mod sprite;
mod terminal;

use std::env;
use std::fs::OpenOptions;
use std::sync::Mutex;

use tracing::{error, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use crate::animation::Animation;
use crate::config::Config;
use crate::renderer::Renderer;
use crate::sprite::{Creature, CREATURES};
use crate::terminal::Session;

/// Version string from Cargo.toml
const VERSION: &str = env!("CARGO_PKG_VERSION");

/// What the command line asked for
#[derive(Debug, PartialEq, Eq)]
enum Command {
    Help,
    Version,
    /// Walk, optionally naming the creature
    Walk(Option<String>),
}

fn print_version() {
    eprintln!("catwalk {}", VERSION);
}

fn print_help() {
    eprintln!("catwalk {} - an ASCII-art cat walks across your terminal", VERSION);
    eprintln!();
    eprintln!("Usage: catwalk [OPTIONS] [CREATURE]");
    eprintln!();
    let names: Vec<&str> = CREATURES.iter().map(|c| c.name).collect();
    eprintln!("Creatures: {} (default: cat)", names.join(", "));
    eprintln!();
    eprintln!("Options:");
    eprintln!("  -V, --version         Show version");
    eprintln!("  -h, --help            Show this help");
    eprintln!();
    eprintln!("Environment:");
    eprintln!("  CAT_SPEED=<n>         Walking speed, higher is faster (default 100)");
    eprintln!("  CATWALK_LOG=<path>    Append log output to <path>");
}

fn parse_args(args: &[String]) -> Command {
    let mut creature = None;
    for arg in args.iter().skip(1) {
        match arg.as_str() {
            "-h" | "--help" => return Command::Help,
            "-V" | "--version" => return Command::Version,
            // Unknown flags are ignored
            flag if flag.starts_with('-') => continue,
            name => {
                if creature.is_none() {
                    creature = Some(name.to_string());
                }
            }
        }
    }
    Command::Walk(creature)
}

/// Install a file logger when one was asked for. The terminal itself is the
/// drawing surface, so logs never go to stdout or stderr.
fn init_logging(config: &Config) {
    let Some(path) = &config.log_file else {
        return;
    };

    let file = match OpenOptions::new().create(true).append(true).open(path) {
        Ok(file) => file,
        Err(_) => return,
    };

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(filter)
        .with_writer(Mutex::new(file))
        .with_ansi(false)
        .finish();
    let _ = tracing::subscriber::set_global_default(subscriber);
}

fn run(config: &Config, creature: &'static Creature) -> anyhow::Result<usize> {
    let session = Session::open();
    let delay = clock::frame_delay(config.speed, session.width());

    let renderer = Renderer::new(session, creature);
    let mut animation = Animation::new(renderer, delay);
    let frames = animation.run(std::thread::sleep)?;
    Ok(frames)
}

fn main() -> anyhow::Result<()> {
    let args: Vec<String> = env::args().collect();
    let creature_name = match parse_args(&args) {
        Command::Help => {
            print_help();
            return Ok(());
        }
        Command::Version => {
            print_version();
            return Ok(());
        }
        Command::Walk(name) => name,
    };

    let config = Config::load();
    init_logging(&config);
    info!("catwalk {} starting, speed {}", VERSION, config.speed);

    let creature = Creature::by_name(creature_name.as_deref());
    match run(&config, creature) {
        Ok(frames) => info!("{} walked {} frames", creature.name, frames),
        // Nothing useful to tell the user mid-animation
        Err(e) => error!("Animation aborted: {:#}", e),
    }

    Ok(())
}
