pub use crate::{
    agents::{
        classification::ClassificationAgent, local_model::LocalModelAgent,
        sql_generation::SqlGenerationAgent, Agent,
    },
    benchmark::{BenchmarkAgent, BenchmarkRunner, RunSummary},
    config::{BenchConfig, BenchmarkTask, LlmConfig},
    error::{ClientError, ParseError},
    log::LogRecord,
    logging::LoggingConfig,
    parsing::{
        label::{extract_label, random_label, scan_label, LabelExtraction},
        random::{RandomSource, RngSource},
        sql::{parse_sql, SqlExtraction},
    },
};
pub use zeroshot_interface::{CompletionBackend, CompletionService, Device, Precision};
pub use zeroshot_prompt::{Conversation, LabelSet, PromptTokenizer};
