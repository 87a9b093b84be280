use std::sync::Arc;

use zeroshot_interface::CompletionBackend;
use zeroshot_prompt::build_sql_prompt;

use super::{local_model::LocalModelAgent, Agent};
use crate::{
    config::{BenchmarkTask, LlmConfig},
    parsing::sql::parse_sql,
};

/// Answers a question over a table schema with one SQL query.
#[derive(Debug)]
pub struct SqlGenerationAgent {
    pub inner: LocalModelAgent,
}

impl SqlGenerationAgent {
    pub const MAX_TOKENS: u32 = 512;

    /// The output budget is forced to [`Self::MAX_TOKENS`].
    pub fn new(backend: Arc<dyn CompletionBackend>, mut config: LlmConfig) -> Self {
        config.max_tokens = BenchmarkTask::SqlGeneration.max_tokens();
        Self {
            inner: LocalModelAgent::new(backend, config),
        }
    }

    /// Returns the fenced SQL, or the whole completion when it has no fence.
    pub fn call(&mut self, table_schema: &str, user_query: &str) -> crate::Result<String> {
        self.reset_log_info();
        let conversation = build_sql_prompt(table_schema, user_query);
        let response = self.inner.generate_response(&conversation)?;
        let sql = parse_sql(&response);
        self.inner.record(&conversation, &response);
        Ok(sql)
    }
}

impl Agent for SqlGenerationAgent {
    fn local_model(&self) -> &LocalModelAgent {
        &self.inner
    }

    fn local_model_mut(&mut self) -> &mut LocalModelAgent {
        &mut self.inner
    }
}
