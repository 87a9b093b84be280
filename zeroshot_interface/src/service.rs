use zeroshot_prompt::{Conversation, PromptTokenizer};

use crate::error::InterfaceResult;

/// Turns a conversation into generated text.
///
/// Implementations must decode greedily: the same conversation and budget produce the same text.
pub trait CompletionService: Send + Sync + std::fmt::Debug {
    /// Generates at most `max_tokens` tokens in reply to `conversation` and returns the decoded
    /// text, without special tokens.
    fn complete(&self, conversation: &Conversation, max_tokens: u32) -> InterfaceResult<String>;
}

/// A completion service that can also count tokens with the model's own tokenizer.
pub trait CompletionBackend: CompletionService + PromptTokenizer {}

impl<T: CompletionService + PromptTokenizer + ?Sized> CompletionBackend for T {}
