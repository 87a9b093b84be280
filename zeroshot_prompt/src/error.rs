#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PromptError {
    #[error("duplicate label key {0}")]
    DuplicateLabel(u32),

    #[error("label key `{0}` is not an unsigned integer")]
    InvalidLabelKey(String),
}
