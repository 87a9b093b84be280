use std::path::PathBuf;

/// The only parse-stage failure. Every other unusable completion resolves to a fallback.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseError {
    #[error("cannot pick a random label from an empty label set")]
    EmptyLabelSet,
}

#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid benchmark name: {0}")]
    InvalidBenchmark(String),

    #[error("failed to {action} {path:?}: {source}")]
    Io {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to write CSV {path:?}: {source}")]
    Csv {
        path: PathBuf,
        #[source]
        source: csv::Error,
    },

    #[error("{path:?} line {line}: {source}")]
    DatasetRow {
        path: PathBuf,
        line: usize,
        #[source]
        source: serde_json::Error,
    },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Interface(#[from] zeroshot_interface::InterfaceError),
}
