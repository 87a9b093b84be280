//! zeroshot_client – zero-shot benchmark agents
//! ============================================
//!
//! Two agents share one shape: render a prompt with [`zeroshot_prompt`], get one greedy
//! completion from a [`CompletionBackend`](zeroshot_interface::CompletionBackend), parse it.
//!
//! * [`ClassificationAgent`] returns a label key from the [`LabelSet`](zeroshot_prompt::LabelSet)
//!   it was given. Parsing never fails: unusable output falls back to a random key.
//! * [`SqlGenerationAgent`] returns the contents of the first ```` ```sql ```` fence, or the raw
//!   completion when there is none.
//!
//! The [`benchmark`] module feeds JSONL datasets through an agent and writes predictions.

pub mod agents;
pub mod benchmark;
pub mod config;
pub mod error;
pub mod log;
pub mod logging;
pub mod parsing;
pub mod prelude;

#[allow(unused_imports)]
pub(crate) use anyhow::{anyhow, bail, Result};
pub use prelude::*;
#[allow(unused_imports)]
pub(crate) use tracing::{debug, error, info, span, trace, warn, Level};
