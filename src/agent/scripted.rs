//! Agent that replays canned replies.

use super::{Agent, AgentError};
use std::collections::VecDeque;
use tracing::{debug, instrument};

/// Replays a fixed queue of replies, one per prompt.
///
/// An exhausted queue behaves like an unreachable agent. Every prompt
/// received is kept for inspection.
#[derive(Debug, Clone, Default)]
pub struct ScriptedAgent {
    name: String,
    replies: VecDeque<Result<String, String>>,
    prompts: Vec<String>,
}

impl ScriptedAgent {
    /// Creates an agent that answers with `replies` in order.
    pub fn new<I, S>(name: impl Into<String>, replies: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            name: name.into(),
            replies: replies.into_iter().map(|r| Ok(r.into())).collect(),
            prompts: Vec::new(),
        }
    }

    /// Queues a transport failure after the current replies.
    pub fn then_fail(mut self, message: impl Into<String>) -> Self {
        self.replies.push_back(Err(message.into()));
        self
    }

    /// Queues another reply.
    pub fn then_reply(mut self, reply: impl Into<String>) -> Self {
        self.replies.push_back(Ok(reply.into()));
        self
    }

    /// Prompts received so far, oldest first.
    pub fn prompts(&self) -> &[String] {
        &self.prompts
    }

    /// Replies not yet consumed.
    pub fn remaining(&self) -> usize {
        self.replies.len()
    }
}

#[async_trait::async_trait]
impl Agent for ScriptedAgent {
    #[instrument(skip(self, prompt), fields(agent = %self.name))]
    async fn propose(&mut self, prompt: &str) -> Result<String, AgentError> {
        self.prompts.push(prompt.to_string());
        match self.replies.pop_front() {
            Some(Ok(reply)) => {
                debug!(reply = %reply, "Scripted reply");
                Ok(reply)
            }
            Some(Err(message)) => Err(AgentError::new(message)),
            None => Err(AgentError::new(format!(
                "{} has no scripted replies left",
                self.name
            ))),
        }
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_replies_in_order_then_exhausts() {
        let mut agent = ScriptedAgent::new("bot", ["1 1", "0 2"]).then_fail("offline");

        assert_eq!(agent.propose("a").await.expect("reply"), "1 1");
        assert_eq!(agent.propose("b").await.expect("reply"), "0 2");
        assert_eq!(agent.propose("c").await.unwrap_err().message, "offline");
        assert!(agent.propose("d").await.is_err());
        assert_eq!(agent.prompts().to_vec(), vec!["a", "b", "c", "d"]);
        assert_eq!(agent.remaining(), 0);
    }
}
