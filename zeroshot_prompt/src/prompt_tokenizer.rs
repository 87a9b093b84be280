use std::fmt::Debug;
use std::sync::Arc;

/// A trait for tokenizers used to account for prompt and response sizes.
///
/// Token counts are recorded for observability only. Implementations backed by a remote service
/// should degrade to an empty result rather than fail the call that requested the count.
pub trait PromptTokenizer: Send + Sync + Debug {
    /// Converts a text string into a sequence of token IDs.
    fn tokenize(&self, input: &str) -> Vec<usize>;

    /// Counts the number of tokens in a text string.
    ///
    /// May be cheaper than calling `tokenize` and counting the results.
    fn count_tokens(&self, input: &str) -> usize {
        self.tokenize(input).len()
    }
}

impl PromptTokenizer for Arc<dyn PromptTokenizer> {
    fn tokenize(&self, input: &str) -> Vec<usize> {
        (**self).tokenize(input)
    }

    fn count_tokens(&self, input: &str) -> usize {
        (**self).count_tokens(input)
    }
}
