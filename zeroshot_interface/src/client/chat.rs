use bon::Builder;
use serde::{Deserialize, Serialize};
use zeroshot_prompt::{Conversation, PromptMessage};

use crate::{error::InterfaceResult, server::ipc::ServerClientExt, LlamaServer};

impl LlamaServer {
    /// `POST /v1/chat/completions`.
    pub fn chat_completion(
        &self,
        request: &ChatCompletionRequest,
    ) -> InterfaceResult<ChatCompletionResponse> {
        self.client
            .post("/v1/chat/completions", request)
            .map_err(Into::into)
    }
}

/// OpenAI-compatible chat request. Sampling defaults make decoding greedy.
#[derive(Serialize, Debug, Clone, Builder)]
pub struct ChatCompletionRequest {
    pub messages: Vec<PromptMessage>,

    /// Maximum number of generated tokens.
    pub max_tokens: u32,

    #[builder(default = 0.0)]
    pub temperature: f32,

    #[builder(default = 1)]
    pub top_k: u32,

    #[builder(default)]
    pub stream: bool,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

impl ChatCompletionRequest {
    /// Greedy request for one conversation.
    pub fn greedy(conversation: &Conversation, max_tokens: u32) -> Self {
        Self::builder()
            .messages(conversation.messages().to_vec())
            .max_tokens(max_tokens)
            .build()
    }
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatCompletionResponse {
    #[serde(default)]
    pub choices: Vec<ChatChoice>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub usage: Option<Usage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatChoice {
    #[serde(default)]
    pub index: u32,
    pub message: ChatMessage,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub finish_reason: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone)]
pub struct ChatMessage {
    pub role: String,
    /// `null` when the model produced nothing.
    #[serde(default)]
    pub content: Option<String>,
}

#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq)]
pub struct Usage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    pub total_tokens: u32,
}
