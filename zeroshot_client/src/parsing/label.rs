use std::sync::LazyLock;

use regex::Regex;
use zeroshot_prompt::LabelSet;

use super::random::RandomSource;
use crate::error::ParseError;

/// A run of ASCII digits followed by a period, as in `2. cold`.
pub static LABEL_NUMBER: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?P<number>[0-9]+)\.").unwrap());

/// What a scan of a completion found.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LabelExtraction {
    /// Exactly one number, and it is a key of the label set.
    Unique(u32),
    /// Exactly one number, but not a key (or too large to be one).
    OutOfRange(String),
    /// More than one number, in order of appearance.
    Ambiguous(Vec<String>),
    NotFound,
}

/// Collects every `<digits>.` occurrence in `pred_text` and classifies the result.
pub fn scan_label(pred_text: &str, label_set: &LabelSet) -> LabelExtraction {
    let runs: Vec<&str> = LABEL_NUMBER
        .captures_iter(pred_text)
        .filter_map(|caps| caps.name("number"))
        .map(|m| m.as_str())
        .collect();

    match runs.as_slice() {
        [] => LabelExtraction::NotFound,
        [run] => match run.parse::<u32>() {
            Ok(key) if label_set.contains_key(key) => LabelExtraction::Unique(key),
            _ => LabelExtraction::OutOfRange(run.to_string()),
        },
        _ => LabelExtraction::Ambiguous(runs.iter().map(|r| r.to_string()).collect()),
    }
}

impl LabelExtraction {
    /// Applies the fallback policy and returns the prediction as a string.
    ///
    /// With several numbers the first digit run is returned as written and is *not* checked
    /// against the label set, so it may name no label at all.
    pub fn resolve(
        self,
        pred_text: &str,
        label_set: &LabelSet,
        rng: &mut dyn RandomSource,
    ) -> Result<String, ParseError> {
        match self {
            LabelExtraction::Unique(key) => Ok(key.to_string()),
            LabelExtraction::OutOfRange(_) => {
                crate::warn!(
                    "Prediction {pred_text:?} not found in the label set. Randomly select one."
                );
                random_label(label_set, rng)
            }
            LabelExtraction::Ambiguous(runs) => {
                crate::warn!("Extracted numbers {runs:?} is not exactly one. Select the first one.");
                Ok(runs.into_iter().next().unwrap_or_default())
            }
            LabelExtraction::NotFound => {
                crate::warn!(
                    "Prediction {pred_text:?} has no extracted numbers. Randomly select one."
                );
                random_label(label_set, rng)
            }
        }
    }
}

/// Uniformly random key of `label_set`.
pub fn random_label(label_set: &LabelSet, rng: &mut dyn RandomSource) -> Result<String, ParseError> {
    if label_set.is_empty() {
        return Err(ParseError::EmptyLabelSet);
    }
    let index = rng.pick_index(label_set.len());
    label_set
        .key_at(index)
        .map(|key| key.to_string())
        .ok_or(ParseError::EmptyLabelSet)
}

/// [`scan_label`] followed by [`LabelExtraction::resolve`].
pub fn extract_label(
    pred_text: &str,
    label_set: &LabelSet,
    rng: &mut dyn RandomSource,
) -> Result<String, ParseError> {
    scan_label(pred_text, label_set).resolve(pred_text, label_set, rng)
}
