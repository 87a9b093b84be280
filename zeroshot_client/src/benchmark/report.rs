//! Prediction CSV and telemetry JSONL writers.

use std::{
    fs::{create_dir_all, File},
    io::{BufWriter, Write},
    path::Path,
};

use serde::Serialize;

use super::{Prediction, RunSummary};
use crate::error::ClientError;

fn io_error(action: &'static str, path: &Path) -> impl FnOnce(std::io::Error) -> ClientError {
    let path = path.to_path_buf();
    move |source| ClientError::Io {
        action,
        path,
        source,
    }
}

fn create(path: &Path) -> Result<BufWriter<File>, ClientError> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        create_dir_all(parent).map_err(io_error("create directory for", path))?;
    }
    let file = File::create(path).map_err(io_error("create", path))?;
    Ok(BufWriter::new(file))
}

#[derive(Serialize)]
struct PredictionRow<'a> {
    id: &'a str,
    prediction: &'a str,
}

/// Writes `id,prediction` rows. The header is written even when there are no predictions.
pub fn write_predictions_csv(path: &Path, predictions: &[Prediction]) -> Result<(), ClientError> {
    let csv_error = |source| ClientError::Csv {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(create(path)?);
    writer
        .write_record(["id", "prediction"])
        .map_err(csv_error)?;
    for p in predictions {
        writer
            .serialize(PredictionRow {
                id: &p.id,
                prediction: &p.prediction,
            })
            .map_err(csv_error)?;
    }
    writer.flush().map_err(io_error("write", path))?;
    crate::info!("Wrote {} predictions to {}", predictions.len(), path.display());
    Ok(())
}

#[derive(Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum TelemetryLine<'a> {
    Record(&'a Prediction),
    Summary(&'a RunSummary),
}

/// One JSON line per prediction, then the summary.
pub fn write_telemetry(
    path: &Path,
    predictions: &[Prediction],
    summary: &RunSummary,
) -> Result<(), ClientError> {
    let mut writer = create(path)?;
    let lines = predictions
        .iter()
        .map(TelemetryLine::Record)
        .chain(std::iter::once(TelemetryLine::Summary(summary)));
    for line in lines {
        let json = serde_json::to_string(&line).map_err(|e| ClientError::Io {
            action: "serialize telemetry for",
            path: path.to_path_buf(),
            source: e.into(),
        })?;
        writeln!(writer, "{json}").map_err(io_error("write", path))?;
    }
    writer.flush().map_err(io_error("write", path))?;
    crate::info!("Wrote telemetry to {}", path.display());
    Ok(())
}
