//! Command-line interface for agent_tictactoe.

use agent_tictactoe::DEFAULT_CONFIG_PATH;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// Agent Tic-Tac-Toe - watch two language models play each other
#[derive(Parser, Debug)]
#[command(name = "agent_tictactoe")]
#[command(about = "Tic-tac-toe between LLM agents", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Play one or more games between two model presets
    Play(PlayArgs),

    /// List model presets and missing API keys
    Models {
        /// Path to match configuration file
        #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,
    },
}

/// Options for `play`; flags override the configuration file.
#[derive(Args, Debug)]
pub struct PlayArgs {
    /// Path to match configuration file
    #[arg(short, long, default_value = DEFAULT_CONFIG_PATH)]
    pub config: PathBuf,

    /// Preset playing X
    #[arg(short, long)]
    pub x: Option<String>,

    /// Preset playing O
    #[arg(short, long)]
    pub o: Option<String>,

    /// Number of games to play
    #[arg(short, long, value_parser = clap::value_parser!(u32).range(1..))]
    pub games: Option<u32>,

    /// Seat two random presets
    #[arg(long, conflicts_with_all = ["x", "o"])]
    pub random: bool,
}
