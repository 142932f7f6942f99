//! numberlab - terminal math puzzle arcade
//!
//! Ten generated puzzle kinds on three difficulty tiers, played against a
//! countdown in a ratatui frontend, with local accounts and achievements.

mod achievements;
mod auth;
mod config;
mod core;
mod frontend;
mod profile;
mod puzzles;
mod theme;
mod widgets;

use anyhow::{bail, Context, Result};
use clap::{Parser as ClapParser, Subcommand};
use frontend::Frontend;
use puzzles::{Difficulty, PuzzleInstance, PuzzleKind};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::PathBuf;

#[derive(ClapParser)]
#[command(name = "numberlab")]
#[command(about = "Terminal math puzzle arcade", long_about = None)]
struct Cli {
    /// Configuration file path
    #[arg(short, long, value_name = "FILE", global = true)]
    config: Option<PathBuf>,

    /// Custom data directory (default: ~/.numberlab)
    /// Can also be set via NUMBERLAB_DIR environment variable
    #[arg(long, value_name = "DIR", global = true)]
    data_dir: Option<PathBuf>,

    /// Difficulty tier (easy, medium, hard); overrides the config default
    #[arg(short, long, global = true)]
    difficulty: Option<Difficulty>,

    /// Screen to open on, e.g. /all-puzzles/fractions
    #[arg(long, value_name = "ROUTE")]
    route: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List every puzzle with its slug
    List,

    /// Generate one puzzle and print it as JSON
    Generate {
        /// Puzzle slug (see `list`)
        slug: String,

        /// Seed for a reproducible puzzle (random if omitted)
        #[arg(long)]
        seed: Option<u64>,

        /// Include the expected answer
        #[arg(long)]
        reveal: bool,
    },

    /// Check an answer against a seeded puzzle
    Check {
        slug: String,

        #[arg(long)]
        seed: u64,

        #[arg(long)]
        answer: String,
    },

    /// Create a local account
    Signup {
        #[arg(long)]
        email: String,
    },

    /// Verify local account credentials
    Login {
        #[arg(long)]
        email: String,
    },

    /// Print a player's statistics
    Profile {
        /// Account email (guest profile if omitted)
        #[arg(long)]
        user: Option<String>,
    },
}

fn parse_kind(slug: &str) -> Result<PuzzleKind> {
    PuzzleKind::from_slug(slug)
        .with_context(|| format!("Unknown puzzle '{}' (run `numberlab list`)", slug))
}

fn init_logging() -> Result<()> {
    // TUI apps can't log to stdout, so we write to a file
    // (use RUST_LOG env var to control level, e.g. RUST_LOG=debug)
    let log_path = config::Config::log_path()?;
    if let Some(parent) = log_path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create data directory {:?}", parent))?;
    }
    let log_file = std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
        .with_context(|| format!("Failed to open log file {:?}", log_path))?;

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_writer(std::sync::Mutex::new(log_file))
        .with_ansi(false) // No color codes in log file
        .init();
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    // Set custom data directory before anything resolves paths
    if let Some(data_dir) = &cli.data_dir {
        std::env::set_var(config::DATA_DIR_ENV, data_dir);
    }

    init_logging()?;
    tracing::info!("Data directory: {:?}", config::Config::base_dir()?);

    let mut config = match &cli.config {
        Some(path) => config::Config::load_from_path(path)?,
        None => config::Config::load()?,
    };
    if let Some(difficulty) = cli.difficulty {
        config.game.default_difficulty = difficulty;
    }
    let difficulty = config.game.default_difficulty;

    match cli.command {
        Some(Commands::List) => {
            for kind in PuzzleKind::ALL {
                println!("{:<18} {:<20} {}", kind.slug(), kind.title(), kind.blurb());
            }
        }
        Some(Commands::Generate { slug, seed, reveal }) => {
            let kind = parse_kind(&slug)?;
            let seed = seed.unwrap_or_else(|| StdRng::from_entropy().gen());
            let instance = PuzzleInstance::generate(kind, difficulty, &mut StdRng::seed_from_u64(seed));

            let mut out = serde_json::json!({
                "seed": seed,
                "difficulty": difficulty,
                "time_limit": config.time_limit(kind, difficulty),
                "prompt": instance.prompt(),
                "puzzle": instance,
            });
            if reveal {
                out["solution"] = serde_json::Value::String(instance.solution());
            }
            println!(
                "{}",
                serde_json::to_string_pretty(&out).context("Failed to serialize puzzle")?
            );
        }
        Some(Commands::Check { slug, seed, answer }) => {
            let kind = parse_kind(&slug)?;
            let instance = PuzzleInstance::generate(kind, difficulty, &mut StdRng::seed_from_u64(seed));
            match instance.submit(&answer) {
                Ok(true) => println!("✓ Correct"),
                Ok(false) => {
                    println!("✗ Incorrect");
                    std::process::exit(1);
                }
                Err(e) => bail!("Could not read answer: {}", e),
            }
        }
        Some(Commands::Signup { email }) => {
            use crate::auth::IdentityProvider;
            let mut provider = auth::LocalIdentityProvider::open(&config::Config::accounts_path()?)?;
            let password = rpassword::prompt_password("Choose a password: ")
                .context("Failed to read password")?;
            let confirm = rpassword::prompt_password("Repeat the password: ")
                .context("Failed to read password")?;
            if password != confirm {
                bail!("Passwords do not match");
            }
            let user = provider.sign_up(&email, &password)?;
            println!("✓ Created account {}", user.email);
        }
        Some(Commands::Login { email }) => {
            use crate::auth::IdentityProvider;
            let mut provider = auth::LocalIdentityProvider::open(&config::Config::accounts_path()?)?;
            let password = rpassword::prompt_password(format!("Password for {}: ", email))
                .context("Failed to read password")?;
            let user = provider.sign_in(&email, &password)?;
            println!("✓ Signed in as {}", user.email);
        }
        Some(Commands::Profile { user }) => {
            let name = match user {
                Some(email) => auth::normalize_email(&email)?,
                None => profile::GUEST.to_string(),
            };
            print_profile(&profile::Profile::load(&config::Config::base_dir()?, &name)?);
        }
        None => {
            if let Some(route) = &cli.route {
                if crate::core::Screen::from_route(route).is_none() {
                    bail!("Unknown route '{}'", route);
                }
            }
            run_tui(config, cli.route)?;
        }
    }

    Ok(())
}

fn print_profile(profile: &profile::Profile) {
    println!(
        "{}: played {}, solved {}",
        profile.user,
        profile.total_played(),
        profile.total_solved()
    );
    if let Some(when) = &profile.last_played {
        println!("Last played {}", when);
    }
    println!();
    println!(
        "{:<22} {:>6} {:>6} {:>6} {:>6} {:>6}",
        "Puzzle", "Played", "Solved", "Failed", "Best", "Streak"
    );
    for kind in PuzzleKind::ALL {
        let s = profile.stats_for(kind);
        let best = s.best_seconds.map_or("-".to_string(), |b| format!("{}s", b));
        println!(
            "{:<22} {:>6} {:>6} {:>6} {:>6} {:>6}",
            kind.title(),
            s.played,
            s.solved,
            s.failed,
            best,
            s.best_streak
        );
    }
    println!();
    for unlocked in &profile.achievements {
        println!(
            "★ {} ({})",
            unlocked.achievement.title(),
            unlocked.unlocked_at
        );
    }
}

/// Run TUI frontend
fn run_tui(config: config::Config, route: Option<String>) -> Result<()> {
    // Use tokio runtime for the account worker
    let runtime = tokio::runtime::Runtime::new()?;
    runtime.block_on(async_run_tui(config, route))
}

/// Async TUI main loop
async fn async_run_tui(config: config::Config, route: Option<String>) -> Result<()> {
    use crate::auth::{AuthWorker, LocalIdentityProvider};
    use crate::core::AppCore;
    use crate::frontend::{FrontendEvent, TuiFrontend};
    use std::time::{Duration, Instant};

    let data_dir = config::Config::base_dir()?;
    let provider = LocalIdentityProvider::open(&config::Config::accounts_path()?)?;
    tracing::info!("{} local account(s) on file", provider.account_count());
    let (auth_tx, mut auth_rx, auth_handle) = AuthWorker::spawn(Box::new(provider));

    let mut app_core = AppCore::new(config, data_dir, StdRng::from_entropy());
    app_core.set_auth_sender(auth_tx);
    if let Some(route) = route {
        app_core.navigate_route(&route);
    }

    let mut frontend = TuiFrontend::new(&app_core.config)?;

    // Track time for countdown ticks
    let mut last_tick = Instant::now();
    const TICK: Duration = Duration::from_secs(1);

    while app_core.running {
        for event in frontend.poll_events()? {
            match event {
                FrontendEvent::Key { code, modifiers } => app_core.handle_key(code, modifiers),
                FrontendEvent::Paste { text } => app_core.handle_paste(&text),
                FrontendEvent::Resize { width, height } => {
                    tracing::debug!("Terminal resized to {}x{}", width, height);
                }
            }
        }

        app_core.drain_auth_events(&mut auth_rx);

        while last_tick.elapsed() >= TICK {
            app_core.tick();
            last_tick += TICK;
        }

        frontend.render(&mut app_core)?;

        // Let the account worker make progress between frames
        tokio::task::yield_now().await;
    }

    frontend.cleanup()?;
    let (width, height) = frontend.size();
    tracing::info!("Exiting ({}x{} terminal)", width, height);

    // Dropping the core drops the request sender, which stops the worker
    drop(app_core);
    if let Err(e) = auth_handle.await {
        tracing::warn!("Auth worker ended abnormally: {}", e);
    }

    Ok(())
}
