//! Feeds benchmark rows through an agent and collects predictions.
//!
//! For each row: call the agent, score the prediction when a gold answer exists, pass the
//! score to [`Agent::update`], keep the prediction and its [`LogRecord`].

pub mod dataset;
pub mod report;

use std::{path::PathBuf, sync::Arc};

use serde::Serialize;
use zeroshot_interface::CompletionBackend;

use crate::{
    agents::{classification::ClassificationAgent, sql_generation::SqlGenerationAgent, Agent},
    config::{BenchConfig, BenchmarkTask, LlmConfig},
    error::ClientError,
    log::LogRecord,
    logging::i_nlns,
};
use dataset::{DatasetRow, Scalar};

/// Rows processed when debugging.
pub const DEBUG_ROWS: usize = 10;

/// The agent matching a benchmark's task.
#[derive(Debug)]
pub enum BenchmarkAgent {
    Classification(ClassificationAgent),
    SqlGeneration(SqlGenerationAgent),
}

impl BenchmarkAgent {
    pub fn new(backend: Arc<dyn CompletionBackend>, config: LlmConfig) -> Result<Self, ClientError> {
        Ok(match config.task()? {
            BenchmarkTask::Classification => {
                BenchmarkAgent::Classification(ClassificationAgent::new(backend, config))
            }
            BenchmarkTask::SqlGeneration => {
                BenchmarkAgent::SqlGeneration(SqlGenerationAgent::new(backend, config))
            }
        })
    }

    pub fn task(&self) -> BenchmarkTask {
        match self {
            BenchmarkAgent::Classification(_) => BenchmarkTask::Classification,
            BenchmarkAgent::SqlGeneration(_) => BenchmarkTask::SqlGeneration,
        }
    }

    pub fn as_agent(&self) -> &dyn Agent {
        match self {
            BenchmarkAgent::Classification(agent) => agent as &dyn Agent,
            BenchmarkAgent::SqlGeneration(agent) => agent as &dyn Agent,
        }
    }

    pub fn as_agent_mut(&mut self) -> &mut dyn Agent {
        match self {
            BenchmarkAgent::Classification(agent) => agent as &mut dyn Agent,
            BenchmarkAgent::SqlGeneration(agent) => agent as &mut dyn Agent,
        }
    }

    /// Runs one row and returns the prediction with its correctness, if gradable.
    fn predict(&mut self, row: &DatasetRow) -> crate::Result<(String, Option<bool>)> {
        match (self, row) {
            (BenchmarkAgent::Classification(agent), DatasetRow::Classification(row)) => {
                let prediction = agent.call(&row.label2desc, &row.text)?;
                let correct = row.label.as_ref().map(|gold| label_matches(gold, &prediction));
                Ok((prediction, correct))
            }
            (BenchmarkAgent::SqlGeneration(agent), DatasetRow::Sql(row)) => {
                let prediction = agent.call(&row.table_schema, &row.user_query)?;
                let correct = row.sql.as_deref().map(|gold| sql_matches(gold, &prediction));
                Ok((prediction, correct))
            }
            (agent, row) => crate::bail!(
                "{:?} row given to the {:?} agent",
                row.task(),
                agent.task()
            ),
        }
    }
}

/// Exact key match. Keys compare numerically when both sides are integers.
pub fn label_matches(gold: &Scalar, prediction: &str) -> bool {
    let gold = gold.to_string();
    match (gold.trim().parse::<u64>(), prediction.trim().parse::<u64>()) {
        (Ok(g), Ok(p)) => g == p,
        _ => gold.trim() == prediction.trim(),
    }
}

fn normalize_sql(sql: &str) -> String {
    let collapsed = sql.split_whitespace().collect::<Vec<_>>().join(" ");
    collapsed
        .to_lowercase()
        .trim_end_matches(';')
        .trim_end()
        .to_string()
}

/// Equality after collapsing whitespace, lower-casing and dropping a trailing `;`.
pub fn sql_matches(gold: &str, prediction: &str) -> bool {
    normalize_sql(gold) == normalize_sql(prediction)
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Prediction {
    pub id: String,
    pub prediction: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub correct: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub log: Option<LogRecord>,
}

impl Prediction {
    pub fn new<I: Into<String>, P: Into<String>>(id: I, prediction: P) -> Self {
        Self {
            id: id.into(),
            prediction: prediction.into(),
            correct: None,
            log: None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct RunSummary {
    pub exp_name: String,
    pub bench_name: String,
    pub rows: usize,
    /// Rows with a gold answer.
    pub scored: usize,
    pub correct: usize,
    pub accuracy: Option<f64>,
    pub total_input_tokens: usize,
    pub total_output_tokens: usize,
}

impl RunSummary {
    fn from_predictions(exp_name: &str, bench_name: &str, predictions: &[Prediction]) -> Self {
        let scored = predictions.iter().filter(|p| p.correct.is_some()).count();
        let correct = predictions.iter().filter(|p| p.correct == Some(true)).count();
        let (total_input_tokens, total_output_tokens) = predictions
            .iter()
            .filter_map(|p| p.log.as_ref())
            .fold((0, 0), |(i, o), log| {
                (i + log.num_input_tokens, o + log.num_output_tokens)
            });
        Self {
            exp_name: exp_name.to_string(),
            bench_name: bench_name.to_string(),
            rows: predictions.len(),
            scored,
            correct,
            accuracy: (scored > 0).then(|| correct as f64 / scored as f64),
            total_input_tokens,
            total_output_tokens,
        }
    }
}

impl std::fmt::Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "RunSummary ({}):", self.exp_name)?;
        let accuracy = match self.accuracy {
            Some(a) => format!("{:.4}", a),
            None => "n/a".to_string(),
        };
        i_nlns(
            f,
            &[
                format_args!("rows: {}", self.rows),
                format_args!("scored: {}", self.scored),
                format_args!("correct: {}", self.correct),
                format_args!("accuracy: {}", accuracy),
                format_args!("total_input_tokens: {}", self.total_input_tokens),
                format_args!("total_output_tokens: {}", self.total_output_tokens),
            ],
        )
    }
}

#[derive(Debug)]
pub struct BenchmarkRunner {
    pub agent: BenchmarkAgent,
    pub bench_config: BenchConfig,
    pub debug: bool,
    pub telemetry_path: Option<PathBuf>,
    pub predictions: Vec<Prediction>,
}

impl BenchmarkRunner {
    pub fn new(agent: BenchmarkAgent, bench_config: BenchConfig) -> Self {
        Self {
            agent,
            bench_config,
            debug: false,
            telemetry_path: None,
            predictions: Vec::new(),
        }
    }

    /// Stop after [`DEBUG_ROWS`] rows.
    pub fn debug(mut self, debug: bool) -> Self {
        self.debug = debug;
        self
    }

    pub fn telemetry_path<P: Into<PathBuf>>(mut self, path: Option<P>) -> Self {
        self.telemetry_path = path.map(Into::into);
        self
    }

    pub fn run(&mut self, rows: &[DatasetRow]) -> crate::Result<RunSummary> {
        let limit = if self.debug {
            rows.len().min(DEBUG_ROWS)
        } else {
            rows.len()
        };
        crate::info!("Running {} on {limit} of {} rows", self.bench_config.bench_name, rows.len());

        self.predictions.clear();
        for (index, row) in rows.iter().take(limit).enumerate() {
            let id = row
                .id()
                .map(Scalar::to_string)
                .unwrap_or_else(|| index.to_string());
            let (prediction, correct) = self.agent.predict(row)?;

            let agent = self.agent.as_agent_mut();
            if let Some(correct) = correct {
                agent.update(correct);
            }
            crate::debug!("row {id}: prediction {prediction:?}, correct {correct:?}");

            self.predictions.push(Prediction {
                id,
                prediction,
                correct,
                log: agent.log_info().cloned(),
            });
        }

        let exp_name = &self.agent.as_agent().local_model().config.exp_name;
        let summary = RunSummary::from_predictions(
            exp_name,
            &self.bench_config.bench_name,
            &self.predictions,
        );
        crate::info!("{summary}");

        if let Some(path) = &self.bench_config.output_path {
            report::write_predictions_csv(path, &self.predictions)?;
        }
        if let Some(path) = &self.telemetry_path {
            report::write_telemetry(path, &self.predictions, &summary)?;
        }
        Ok(summary)
    }
}
