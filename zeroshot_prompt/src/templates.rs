//! Fixed instruction templates for the two zero-shot tasks.
//!
//! Every template is an indented literal passed through [`strip_all_lines`] after interpolation.

use crate::{strip_all_lines, Conversation, LabelSet};

pub fn classification_system_prompt() -> String {
    strip_all_lines(
        "\
        Act as a professional medical doctor that can diagnose the patient based on the patient profile.
        Provide your diagnosis in the following format: <number>. <diagnosis>",
    )
}

pub fn classification_user_prompt(option_text: &str, text: &str) -> String {
    let prompt = format!(
        "\
        Act as a medical doctor and diagnose the patient based on the following patient profile:

        {text}

        All possible diagnoses for you to choose from are as follows (one diagnosis per line, in the format of <number>. <diagnosis>):
        {option_text}

        Now, directly provide the diagnosis for the patient in the following format: <number>. <diagnosis>"
    );
    strip_all_lines(prompt.trim())
}

/// Renders the diagnosis prompt. An empty label set yields an empty option list.
pub fn build_classification_prompt(label_set: &LabelSet, patient_text: &str) -> Conversation {
    let option_text = label_set.option_text();
    Conversation::new(
        classification_system_prompt(),
        classification_user_prompt(&option_text, patient_text),
    )
}

pub fn sql_system_prompt() -> String {
    strip_all_lines(
        "\
        Act as a professional programmer.
        You will be given a table schema and a user query, and you need to generate the correct SQL code to answer the user query in the following format:
        ```sql\n<your_SQL_code>\n```",
    )
}

pub fn sql_user_prompt(table_schema: &str, user_query: &str) -> String {
    let prompt = format!(
        "\
        {table_schema}

        -- Using valid SQLite, answer the following question for the tables provided above.
        -- Question: {user_query}

        Now, generate the correct SQL code directly in the following format:
        ```sql\n<your_SQL_code>\n```"
    );
    strip_all_lines(&prompt)
}

/// Renders the text-to-SQL prompt. Schema and query are embedded verbatim, apart from line
/// normalization.
pub fn build_sql_prompt(table_schema: &str, user_query: &str) -> Conversation {
    Conversation::new(sql_system_prompt(), sql_user_prompt(table_schema, user_query))
}
