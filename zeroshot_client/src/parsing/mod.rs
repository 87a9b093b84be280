//! Turning free-form completions into task answers.
//!
//! Scanning is pure and returns an outcome enum; fallback policy (warnings, random picks)
//! is applied in a separate resolution step.

pub mod label;
pub mod random;
pub mod sql;
