//! JSONL benchmark rows.
//!
//! One JSON object per line; blank lines are skipped. `id` falls back to the row index.

use std::{
    fmt,
    fs::File,
    io::{BufRead, BufReader},
    path::Path,
};

use serde::{Deserialize, Serialize};
use zeroshot_prompt::LabelSet;

use crate::{config::BenchmarkTask, error::ClientError};

/// A JSON number or string, as found in `id` and `label` fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Int(i64),
    Text(String),
}

impl fmt::Display for Scalar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Scalar::Int(n) => write!(f, "{n}"),
            Scalar::Text(s) => write!(f, "{s}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct ClassificationRow {
    #[serde(default)]
    pub id: Option<Scalar>,
    pub label2desc: LabelSet,
    pub text: String,
    /// Gold label key, when the split is labelled.
    #[serde(default)]
    pub label: Option<Scalar>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct SqlRow {
    #[serde(default)]
    pub id: Option<Scalar>,
    pub table_schema: String,
    pub user_query: String,
    /// Gold query, when the split is labelled.
    #[serde(default)]
    pub sql: Option<String>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum DatasetRow {
    Classification(ClassificationRow),
    Sql(SqlRow),
}

impl DatasetRow {
    pub fn id(&self) -> Option<&Scalar> {
        match self {
            DatasetRow::Classification(row) => row.id.as_ref(),
            DatasetRow::Sql(row) => row.id.as_ref(),
        }
    }

    pub fn task(&self) -> BenchmarkTask {
        match self {
            DatasetRow::Classification(_) => BenchmarkTask::Classification,
            DatasetRow::Sql(_) => BenchmarkTask::SqlGeneration,
        }
    }
}

/// Reads every row of `path` in the shape `task` expects.
pub fn load_rows(path: &Path, task: BenchmarkTask) -> Result<Vec<DatasetRow>, ClientError> {
    let file = File::open(path).map_err(|source| ClientError::Io {
        action: "open dataset",
        path: path.to_path_buf(),
        source,
    })?;

    let mut rows = Vec::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line.map_err(|source| ClientError::Io {
            action: "read dataset",
            path: path.to_path_buf(),
            source,
        })?;
        if line.trim().is_empty() {
            continue;
        }
        let row_error = |source: serde_json::Error| ClientError::DatasetRow {
            path: path.to_path_buf(),
            line: index + 1,
            source,
        };
        let row = match task {
            BenchmarkTask::Classification => {
                DatasetRow::Classification(serde_json::from_str(&line).map_err(row_error)?)
            }
            BenchmarkTask::SqlGeneration => {
                DatasetRow::Sql(serde_json::from_str(&line).map_err(row_error)?)
            }
        };
        rows.push(row);
    }
    crate::info!("Loaded {} rows from {}", rows.len(), path.display());
    Ok(rows)
}
