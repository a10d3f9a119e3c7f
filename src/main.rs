//! Agent Tic-Tac-Toe - CLI
//!
//! Seats two model presets, plays the configured number of games and
//! prints every move, the history and the running statistics.

#![warn(missing_docs)]

mod cli;

use agent_tictactoe::{
    GameSession, Mark, MatchConfig, RunStatus, Seat, format_stats, print_events, seat_title,
};
use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command, PlayArgs};
use std::path::Path;
use tokio::sync::mpsc;
use tracing::{info, instrument, warn};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    initialize_tracing();

    match cli.command {
        Command::Play(args) => play(args).await,
        Command::Models { config } => list_models(&config),
    }
}

fn env_lookup(var: &str) -> Option<String> {
    std::env::var(var).ok()
}

/// Play the configured games
#[instrument(skip_all, fields(config_path = %args.config.display()))]
async fn play(args: PlayArgs) -> Result<()> {
    let mut config = MatchConfig::load_or_default(&args.config)?;
    let catalog = config.catalog();

    if args.random {
        for mark in [Mark::X, Mark::O] {
            let Some(preset) = catalog.random() else {
                bail!("Model catalog is empty");
            };
            config.set_seat(mark, preset.key().clone());
        }
    }
    if let Some(x) = args.x {
        config.set_seat(Mark::X, x);
    }
    if let Some(o) = args.o {
        config.set_seat(Mark::O, o);
    }
    if let Some(games) = args.games {
        config.set_games(games)?;
    }

    let missing = catalog.missing_keys([config.seat(Mark::X), config.seat(Mark::O)], env_lookup);
    if !missing.is_empty() {
        bail!("Missing API keys:\n  {}", missing.join("\n  "));
    }

    let x = config.seat_agent(Mark::X, &catalog, env_lookup)?;
    let o = config.seat_agent(Mark::O, &catalog, env_lookup)?;

    let (event_tx, event_rx) = mpsc::unbounded_channel();
    let printer = tokio::spawn(print_events(event_rx));

    let mut session = GameSession::new(
        Seat::new(x, config.seat(Mark::X)),
        Seat::new(o, config.seat(Mark::O)),
    )
    .with_turn_timeout(config.turn_timeout())
    .with_events(event_tx);

    let pause = session.pause_handle();
    tokio::spawn(async move {
        while tokio::signal::ctrl_c().await.is_ok() {
            if pause.interrupt() {
                warn!("Second interrupt received, exiting");
                std::process::exit(130);
            }
            info!("Interrupt received, stopping after the current turn (Ctrl-C again to exit)");
        }
    });

    for mark in [Mark::X, Mark::O] {
        println!("{}", seat_title(mark, config.seat(mark)));
    }
    println!();

    for game in 1..=*config.games() {
        info!(game, "Starting game");
        match session.run(*config.max_attempts_per_turn()).await {
            Ok(RunStatus::Finished(outcome)) => info!(game, %outcome, "Game finished"),
            Ok(RunStatus::Paused) => {
                warn!(game, "Stopped before the game finished");
                break;
            }
            Err(e) => {
                warn!(game, error = %e, "Game abandoned");
                println!("Game {} abandoned: {}\n", game, e);
            }
        }
        if game < *config.games() {
            session.new_game();
        }
    }

    let summary = format_stats(session.stats());
    drop(session);
    printer.await?;

    println!("Final Statistics\n{}", summary);
    Ok(())
}

/// List model presets and missing keys
#[instrument]
fn list_models(config_path: &Path) -> Result<()> {
    let config = MatchConfig::load_or_default(config_path)?;
    let catalog = config.catalog();

    println!("{:<22} {:<10} {:<42} {:<8} {}", "KEY", "PROVIDER", "MODEL", "SIZE", "SPEED");
    for preset in catalog.presets() {
        println!(
            "{:<22} {:<10} {:<42} {:<8} {}",
            preset.key(),
            preset.provider(),
            preset.model_id(),
            preset.size(),
            preset.speed()
        );
    }

    let missing = catalog.missing_keys(catalog.presets().iter().map(|p| p.key().as_str()), env_lookup);
    if !missing.is_empty() {
        println!("\nMissing API keys:");
        for line in missing {
            println!("  {}", line);
        }
    }
    Ok(())
}

#[instrument]
fn initialize_tracing() {
    tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,agent_tictactoe=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    info!("Tracing initialized");
}
