use serde::{Deserialize, Serialize};
use zeroshot_interface::{Device, Precision, DEFAULT_HF_REPO};

use crate::{
    error::ClientError,
    logging::{i_nln, i_nlns},
};

/// The two supported benchmarks, chosen by benchmark-name prefix.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenchmarkTask {
    Classification,
    SqlGeneration,
}

impl BenchmarkTask {
    pub fn from_bench_name(bench_name: &str) -> Result<Self, ClientError> {
        if bench_name.starts_with("classification") {
            Ok(BenchmarkTask::Classification)
        } else if bench_name.starts_with("sql_generation") {
            Ok(BenchmarkTask::SqlGeneration)
        } else {
            Err(ClientError::InvalidBenchmark(bench_name.to_string()))
        }
    }

    /// Output token budget per call.
    pub fn max_tokens(&self) -> u32 {
        match self {
            BenchmarkTask::Classification => 32,
            BenchmarkTask::SqlGeneration => 512,
        }
    }
}

/// Model and decoding settings shared by both agents.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LlmConfig {
    pub model_name: String,
    pub exp_name: String,
    pub bench_name: String,
    pub max_tokens: u32,
    /// Always false: decoding is greedy.
    pub do_sample: bool,
    pub device: String,
    pub use_8bit: bool,
}

impl LlmConfig {
    pub fn new(
        bench_name: &str,
        model_name: &str,
        device: &str,
        use_8bit: bool,
    ) -> Result<Self, ClientError> {
        let task = BenchmarkTask::from_bench_name(bench_name)?;
        Ok(Self {
            model_name: model_name.to_string(),
            exp_name: format!("zeroshot_{bench_name}_{model_name}_8bit-{use_8bit}"),
            bench_name: bench_name.to_string(),
            max_tokens: task.max_tokens(),
            do_sample: false,
            device: device.to_string(),
            use_8bit,
        })
    }

    pub fn task(&self) -> Result<BenchmarkTask, ClientError> {
        BenchmarkTask::from_bench_name(&self.bench_name)
    }

    pub fn parsed_device(&self) -> Result<Device, ClientError> {
        self.device.parse().map_err(ClientError::Interface)
    }

    pub fn precision(&self) -> Precision {
        Precision::from_use_8bit(self.use_8bit)
    }
}

impl Default for LlmConfig {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_HF_REPO.to_string(),
            exp_name: String::new(),
            bench_name: String::new(),
            max_tokens: BenchmarkTask::Classification.max_tokens(),
            do_sample: false,
            device: "cuda:0".to_string(),
            use_8bit: false,
        }
    }
}

impl std::fmt::Display for LlmConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "LlmConfig:")?;
        i_nlns(
            f,
            &[
                format_args!("exp_name: {}", self.exp_name),
                format_args!("model_name: {}", self.model_name),
                format_args!("bench_name: {}", self.bench_name),
                format_args!("max_tokens: {}", self.max_tokens),
                format_args!("do_sample: {}", self.do_sample),
                format_args!("device: {}", self.device),
                format_args!("use_8bit: {}", self.use_8bit),
            ],
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct BenchConfig {
    pub bench_name: String,
    /// CSV destination for predictions.
    pub output_path: Option<std::path::PathBuf>,
}

impl std::fmt::Display for BenchConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f)?;
        writeln!(f, "BenchConfig:")?;
        i_nln(f, format_args!("bench_name: {}", self.bench_name))?;
        match &self.output_path {
            Some(path) => i_nln(f, format_args!("output_path: {}", path.display())),
            None => i_nln(f, format_args!("output_path: none")),
        }
    }
}
