use std::sync::Arc;

use zeroshot_interface::CompletionBackend;
use zeroshot_prompt::Conversation;

use crate::{config::LlmConfig, log::LogRecord};

/// Completion backend plus configuration shared by both agents.
#[derive(Debug, Clone)]
pub struct LocalModelAgent {
    pub backend: Arc<dyn CompletionBackend>,
    pub config: LlmConfig,
    pub log_info: Option<LogRecord>,
}

impl LocalModelAgent {
    pub fn new(backend: Arc<dyn CompletionBackend>, config: LlmConfig) -> Self {
        Self {
            backend,
            config,
            log_info: None,
        }
    }

    /// One greedy completion limited to `config.max_tokens`.
    pub fn generate_response(&self, conversation: &Conversation) -> crate::Result<String> {
        crate::debug!("{conversation}");
        let response = self
            .backend
            .complete(conversation, self.config.max_tokens)?;
        crate::debug!("response: {response:?}");
        Ok(response)
    }

    pub fn record(&mut self, conversation: &Conversation, response: &str) {
        let record = LogRecord::new(conversation, response, self.backend.as_ref());
        crate::trace!("{record}");
        self.log_info = Some(record);
    }
}
