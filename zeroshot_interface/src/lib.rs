//! zeroshot_interface – the text completion service behind zeroshot agents
//! ========================================================================
//!
//! Agents never generate text themselves. They hand a [`Conversation`](zeroshot_prompt::Conversation)
//! and an output token budget to a [`CompletionService`] and get one decoded completion back.
//! Decoding is always greedy.
//!
//! This crate provides that seam plus one implementation backed by llama.cpp's `llama-server`.
//!
//! ```text
//! Agent
//!   │
//!   ├─→ LlamaServerLauncher   (spawns llama-server, waits on /health)
//!   │         ↓
//!   └─→ LlamaServer           (CompletionService + PromptTokenizer)
//!             │
//!             ├─→ POST /v1/chat/completions   → complete()
//!             ├─→ POST /tokenize              → count_tokens()
//!             └─→ GET  /health                → status()
//! ```
//!
//! ```rust,no_run
//! use zeroshot_interface::*;
//! use zeroshot_prompt::Conversation;
//!
//! fn main() -> InterfaceResult<()> {
//!     let server = LlamaServer::attach("http://127.0.0.1:8080", "qwen2.5-7b-instruct")?;
//!     let text = server.complete(&Conversation::new("Be terse.", "Say hi."), 16)?;
//!     println!("{text}");
//!     Ok(())
//! }
//! ```

#[allow(unused_imports)]
use tracing::{debug, error, info, span, trace, warn, Level};

pub mod client;
pub mod error;
pub mod server;
pub mod service;

pub use client::{chat::*, health::*, tokenize::*};
pub use error::{InterfaceError, InterfaceResult};
pub use server::{
    args::*,
    handle::*,
    launcher::*,
    process::{ProcessError, ServerProcessGuard},
};
pub use server::ipc::{error::ClientError, http::HttpClient, ServerClient, ServerClientExt};
pub use service::{CompletionBackend, CompletionService};
