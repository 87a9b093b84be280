use serde::{Deserialize, Serialize};
use zeroshot_prompt::{Conversation, PromptTokenizer};

use crate::logging::i_nln;

/// Per-call observability record. Never read back by the agents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LogRecord {
    /// Rendered user prompt.
    pub input_pred: String,
    /// Raw completion.
    pub output_pred: String,
    /// Tokens of the system prompt and user prompt concatenated.
    pub num_input_tokens: usize,
    pub num_output_tokens: usize,
}

impl LogRecord {
    pub fn new<T: PromptTokenizer + ?Sized>(
        conversation: &Conversation,
        response: &str,
        tokenizer: &T,
    ) -> Self {
        let full_prompt = format!("{}{}", conversation.system_content(), conversation.user_content());
        Self {
            input_pred: conversation.user_content().to_string(),
            output_pred: response.to_string(),
            num_input_tokens: tokenizer.count_tokens(&full_prompt),
            num_output_tokens: tokenizer.count_tokens(response),
        }
    }
}

impl std::fmt::Display for LogRecord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "LogRecord:")?;
        i_nln(f, format_args!("num_input_tokens: {}", self.num_input_tokens))?;
        i_nln(f, format_args!("num_output_tokens: {}", self.num_output_tokens))?;
        i_nln(f, format_args!("output_pred: {:?}", self.output_pred))?;
        Ok(())
    }
}
