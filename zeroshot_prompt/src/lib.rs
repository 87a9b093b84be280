//! # zeroshot_prompt: Prompt construction for zero-shot LLM agents
//!
//! The zeroshot_prompt crate is a workspace member of the zeroshot project. It renders the
//! prompts used by the diagnosis classification agent and the text-to-SQL agent.
//!
//! ## Features
//!
//! - Fixed instruction templates for both tasks, rendered deterministically
//! - Whitespace normalization so indented template literals never leak indentation into prompts
//! - An ordered, duplicate-free `LabelSet` that deserializes from a JSON object in document order
//! - A two-message `Conversation` that serializes to the OpenAI `messages` shape
//! - The `PromptTokenizer` trait for token accounting
//!
//! ## Use
//!
//! ```rust
//! use zeroshot_prompt::*;
//!
//! let labels = LabelSet::from_pairs([(1, "flu"), (2, "cold")])?;
//! let conversation = build_classification_prompt(&labels, "Fever and aches for two days.");
//!
//! assert_eq!(conversation.system().message_type, PromptMessageType::System);
//! assert!(conversation.user_content().contains("1. flu\n2. cold"));
//!
//! let conversation = build_sql_prompt("CREATE TABLE t (id INT);", "How many rows?");
//! assert!(conversation.user_content().starts_with("CREATE TABLE t (id INT);"));
//! # Ok::<(), zeroshot_prompt::PromptError>(())
//! ```

// Internal modules
mod error;
mod label_set;
mod normalize;
mod prompt_message;
mod prompt_tokenizer;
mod templates;

// Public exports
pub use error::PromptError;
pub use label_set::{Label, LabelSet};
pub use normalize::strip_all_lines;
pub use prompt_message::{Conversation, PromptMessage, PromptMessageType};
pub use prompt_tokenizer::PromptTokenizer;
pub use templates::{
    build_classification_prompt, build_sql_prompt, classification_system_prompt,
    classification_user_prompt, sql_system_prompt, sql_user_prompt,
};
