//! Agent trait and implementations.
//!
//! An agent is anything that, given a prompt, proposes a move as free
//! text. The resolver knows nothing else about it.

mod llm;
mod scripted;

pub use llm::LlmAgent;
pub use scripted::ScriptedAgent;

use derive_more::{Display, Error};
use tracing::{error, instrument};

/// Capability of proposing a move for one turn.
#[async_trait::async_trait]
pub trait Agent: Send {
    /// Sends `prompt` and returns the raw reply text.
    ///
    /// # Errors
    ///
    /// Returns [`AgentError`] when the agent cannot be reached or its
    /// response carries no text.
    async fn propose(&mut self, prompt: &str) -> Result<String, AgentError>;

    /// Returns the agent's display name.
    fn name(&self) -> &str;
}

/// Transport-level failure while asking an agent for a proposal.
#[derive(Debug, Clone, Display, Error)]
#[display("Agent error: {} at {}:{}", message, file, line)]
pub struct AgentError {
    /// Error message.
    pub message: String,
    /// Line number where error occurred.
    pub line: u32,
    /// Source file where error occurred.
    pub file: &'static str,
}

impl AgentError {
    /// Creates a new agent error with caller location tracking.
    #[track_caller]
    #[instrument(skip(message))]
    pub fn new(message: impl Into<String>) -> Self {
        let loc = std::panic::Location::caller();
        let message = message.into();
        error!(error_message = %message, "Agent error created");
        Self {
            message,
            line: loc.line(),
            file: loc.file(),
        }
    }
}

impl From<crate::llm_client::LlmError> for AgentError {
    #[track_caller]
    fn from(err: crate::llm_client::LlmError) -> Self {
        Self::new(err.message)
    }
}
