use std::sync::Arc;

use zeroshot_interface::CompletionBackend;
use zeroshot_prompt::{build_classification_prompt, LabelSet};

use super::{local_model::LocalModelAgent, Agent};
use crate::{
    config::{BenchmarkTask, LlmConfig},
    parsing::{
        label::extract_label,
        random::{RandomSource, RngSource},
    },
};

/// Diagnoses a patient profile by picking one key from the given label set.
#[derive(Debug)]
pub struct ClassificationAgent {
    pub inner: LocalModelAgent,
    rng: Box<dyn RandomSource>,
}

impl ClassificationAgent {
    pub const MAX_TOKENS: u32 = 32;

    /// The output budget is forced to [`Self::MAX_TOKENS`].
    pub fn new(backend: Arc<dyn CompletionBackend>, mut config: LlmConfig) -> Self {
        config.max_tokens = BenchmarkTask::Classification.max_tokens();
        Self {
            inner: LocalModelAgent::new(backend, config),
            rng: Box::new(RngSource::from_entropy()),
        }
    }

    /// Replaces the source used for fallback picks.
    pub fn with_random_source(mut self, rng: Box<dyn RandomSource>) -> Self {
        self.rng = rng;
        self
    }

    /// Returns a label key as a string.
    ///
    /// Fails only on a transport error, or when a fallback pick is needed and `label_set` is empty.
    pub fn call(&mut self, label_set: &LabelSet, text: &str) -> crate::Result<String> {
        self.reset_log_info();
        let conversation = build_classification_prompt(label_set, text);
        let response = self.inner.generate_response(&conversation)?;
        let prediction = extract_label(&response, label_set, self.rng.as_mut())?;
        self.inner.record(&conversation, &response);
        Ok(prediction)
    }
}

impl Agent for ClassificationAgent {
    fn local_model(&self) -> &LocalModelAgent {
        &self.inner
    }

    fn local_model_mut(&mut self) -> &mut LocalModelAgent {
        &mut self.inner
    }
}
