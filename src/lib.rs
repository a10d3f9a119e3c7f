//! Agent Tic-Tac-Toe: two language-model agents play tic-tac-toe.
//!
//! # Architecture
//!
//! - **Board engine**: grid state, move validation, win/draw evaluation
//!   and the canonical text rendering sent to agents
//! - **Move resolver**: one turn from prompt to applied move, parsing free
//!   text replies and refusing anything that is not a legal move
//! - **Agents**: LLM-backed players over NVIDIA, Groq, OpenAI or Anthropic,
//!   plus a scripted agent for tests and offline runs
//! - **Session**: the turn loop, move history, statistics and events for
//!   the display
//!
//! # Example
//!
//! ```no_run
//! use agent_tictactoe::{GameSession, ScriptedAgent, Seat};
//!
//! # async fn example() -> anyhow::Result<()> {
//! let x = Seat::new(ScriptedAgent::new("Player X", ["1 1", "0 0", "2 2"]), "x-bot");
//! let o = Seat::new(ScriptedAgent::new("Player O", ["0 1", "0 2"]), "o-bot");
//! let mut session = GameSession::new(x, o);
//! let status = session.run(3).await?;
//! println!("{status:?}\n{}", session.stats());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod agent;
mod catalog;
mod config;
mod display;
mod events;
mod games;
mod llm_client;
mod prompt;
mod resolver;
mod session;
mod stats;

// Crate-level exports - Board engine
pub use games::tictactoe::{
    Board, BoardError, Cell, DEFAULT_SIZE, Mark, Move, Outcome, invariants, parse_rendered, rules,
};

// Crate-level exports - Move resolver
pub use prompt::{extract_coordinates, format_moves, system_prompt, to_move, turn_prompt};
pub use resolver::{TurnError, TurnResult, resolve_turn};

// Crate-level exports - Agents and LLM client
pub use agent::{Agent, AgentError, LlmAgent, ScriptedAgent};
pub use llm_client::{LlmClient, LlmConfig, LlmError, LlmProvider};

// Crate-level exports - Configuration
pub use catalog::{DEFAULT_O_PRESET, DEFAULT_X_PRESET, ModelCatalog, ModelPreset};
pub use config::{ConfigError, DEFAULT_CONFIG_PATH, MatchConfig};

// Crate-level exports - Session
pub use display::{
    EventPrinter, format_event, format_history, format_stats, print_events, seat_title,
};
pub use events::{GameEvent, MoveRecord};
pub use session::{GameSession, PauseHandle, RunStatus, Seat, SessionError};
pub use stats::{SessionStats, Streak};
