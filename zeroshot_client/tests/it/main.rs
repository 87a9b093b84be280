mod agents;
mod cli;
mod runner;

use std::{
    collections::VecDeque,
    sync::{Arc, Mutex},
};

use zeroshot_client::*;
use zeroshot_interface::{InterfaceError, InterfaceResult};

/// Replays canned completions in order and remembers every request.
#[derive(Debug, Default)]
pub struct ScriptedBackend {
    responses: Mutex<VecDeque<String>>,
    requests: Mutex<Vec<(Conversation, u32)>>,
}

impl ScriptedBackend {
    pub fn new<I, S>(responses: I) -> Arc<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Arc::new(Self {
            responses: Mutex::new(responses.into_iter().map(Into::into).collect()),
            requests: Mutex::default(),
        })
    }

    pub fn requests(&self) -> Vec<(Conversation, u32)> {
        self.requests.lock().unwrap().clone()
    }
}

impl CompletionService for ScriptedBackend {
    fn complete(&self, conversation: &Conversation, max_tokens: u32) -> InterfaceResult<String> {
        self.requests
            .lock()
            .unwrap()
            .push((conversation.clone(), max_tokens));
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .ok_or(InterfaceError::EmptyCompletion)
    }
}

/// One token per whitespace-separated word.
impl PromptTokenizer for ScriptedBackend {
    fn tokenize(&self, input: &str) -> Vec<usize> {
        input.split_whitespace().map(str::len).collect()
    }
}

/// Always picks the same index.
#[derive(Debug)]
pub struct FixedIndex(pub usize);

impl RandomSource for FixedIndex {
    fn pick_index(&mut self, len: usize) -> usize {
        self.0 % len
    }
}

pub fn config(bench_name: &str) -> LlmConfig {
    LlmConfig::new(bench_name, "Qwen/Qwen2.5-7B-Instruct-GGUF", "cpu", false).unwrap()
}

pub fn flu_cold() -> LabelSet {
    LabelSet::from_pairs([(1, "flu"), (2, "cold")]).unwrap()
}
