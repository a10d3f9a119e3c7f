//! Agent backed by a hosted language model.

use super::{Agent, AgentError};
use crate::games::tictactoe::Mark;
use crate::llm_client::LlmClient;
use crate::prompt::system_prompt;
use tracing::{info, instrument};

/// Seat player that forwards each turn prompt to an LLM.
///
/// The system prompt (rules, coordinates, reply format) is fixed for the
/// seat; the per-turn prompt comes from the resolver.
#[derive(Debug, Clone)]
pub struct LlmAgent {
    name: String,
    system_prompt: String,
    client: LlmClient,
}

impl LlmAgent {
    /// Creates the agent for `mark`, named e.g. "Player X".
    #[instrument(skip(client), fields(model = %client.config().model()))]
    pub fn new(name: impl Into<String> + std::fmt::Debug, mark: Mark, client: LlmClient) -> Self {
        let name = name.into();
        let system_prompt = system_prompt(&name, mark);
        info!(agent = %name, "Created LLM agent");
        Self {
            name,
            system_prompt,
            client,
        }
    }

    /// System prompt sent with every request.
    pub fn system_prompt(&self) -> &str {
        &self.system_prompt
    }
}

#[async_trait::async_trait]
impl Agent for LlmAgent {
    #[instrument(skip(self, prompt), fields(agent = %self.name))]
    async fn propose(&mut self, prompt: &str) -> Result<String, AgentError> {
        let reply = self.client.generate(&self.system_prompt, prompt).await?;
        Ok(reply)
    }

    fn name(&self) -> &str {
        &self.name
    }
}
