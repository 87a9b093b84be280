use std::sync::LazyLock;

use regex::Regex;

/// First ```` ```sql ... ``` ```` block; the body may span lines.
pub static SQL_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"```sql(?P<code>[\s\S]*?)```").unwrap());

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SqlExtraction {
    /// Trimmed body of the first fence.
    Fenced(String),
    /// No fence; the completion as given.
    MissingFence(String),
}

impl SqlExtraction {
    pub fn scan(pred_text: &str) -> Self {
        match SQL_FENCE.captures(pred_text).and_then(|caps| caps.name("code")) {
            Some(code) => SqlExtraction::Fenced(code.as_str().trim().to_string()),
            None => SqlExtraction::MissingFence(pred_text.to_string()),
        }
    }

    pub fn into_sql(self) -> String {
        match self {
            SqlExtraction::Fenced(sql) | SqlExtraction::MissingFence(sql) => sql,
        }
    }
}

/// Extracts SQL from a completion, warning when no fence is present.
pub fn parse_sql(pred_text: &str) -> String {
    let extraction = SqlExtraction::scan(pred_text);
    if let SqlExtraction::MissingFence(_) = extraction {
        crate::warn!("No SQL code found in the response");
    }
    extraction.into_sql()
}
