use std::fmt;

use zeroshot_prompt::{Conversation, PromptTokenizer};

use crate::{
    client::{
        chat::ChatCompletionRequest,
        health::{server_status, ServerStatus},
        tokenize::TokenizeRequest,
    },
    error::{InterfaceError, InterfaceResult},
    server::{
        ipc::{http::HttpClient, ServerClient},
        process::ServerProcessGuard,
    },
    service::CompletionService,
};

/// A running llama.cpp server, either launched by us or attached to.
#[derive(Debug)]
pub struct LlamaServer {
    pub client: Box<dyn ServerClient>,
    /// Present only when this handle owns the process.
    pub guard: Option<ServerProcessGuard>,
    pub model_name: String,
}

impl LlamaServer {
    pub fn new(
        client: Box<dyn ServerClient>,
        guard: Option<ServerProcessGuard>,
        model_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            guard,
            model_name: model_name.into(),
        }
    }

    /// Connects to a server that is already running at `url`. Fails unless it reports ready.
    pub fn attach(url: &str, model_name: impl Into<String>) -> InterfaceResult<Self> {
        let client = HttpClient::from_url(url);
        match server_status(&client) {
            ServerStatus::Ready => (),
            ServerStatus::Loading => {
                return Err(InterfaceError::ServerLaunch(format!(
                    "server at {url} is still loading its model"
                )))
            }
            ServerStatus::ErrorOrOffline(msg) => {
                return Err(InterfaceError::ServerLaunch(format!(
                    "server at {url} is not reachable: {msg}"
                )))
            }
        }
        let server = Self::new(Box::new(client), None, model_name);
        crate::info!("Attached to {server}");
        Ok(server)
    }

    pub fn status(&self) -> ServerStatus {
        server_status(self.client.as_ref())
    }

    /// Stops the owned process. Attached servers are left running.
    pub fn stop(&self) -> InterfaceResult<()> {
        match &self.guard {
            Some(guard) => guard.stop().map_err(Into::into),
            None => Ok(()),
        }
    }
}

impl CompletionService for LlamaServer {
    fn complete(&self, conversation: &Conversation, max_tokens: u32) -> InterfaceResult<String> {
        let request = ChatCompletionRequest::greedy(conversation, max_tokens);
        let response = self.chat_completion(&request)?;
        let choice = response
            .choices
            .into_iter()
            .next()
            .ok_or(InterfaceError::EmptyCompletion)?;
        let text = choice.message.content.unwrap_or_default();
        crate::trace!("completion ({} chars): {text}", text.len());
        Ok(text)
    }
}

impl PromptTokenizer for LlamaServer {
    fn tokenize(&self, input: &str) -> Vec<usize> {
        let request = TokenizeRequest::builder().content(input).build();
        match self.tokenize_request(&request) {
            Ok(response) => response.ids(),
            Err(e) => {
                crate::warn!("Failed to tokenize input: {e}");
                Vec::new()
            }
        }
    }
}

impl fmt::Display for LlamaServer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "LlamaServer({} @ {}", self.model_name, self.client.base_url())?;
        if let Some(guard) = &self.guard {
            write!(f, ", pid {}", guard.pid())?;
        }
        write!(f, ")")
    }
}
