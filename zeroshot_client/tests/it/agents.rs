use zeroshot_client::*;
use zeroshot_interface::InterfaceError;

use crate::{config, flu_cold, FixedIndex, ScriptedBackend};

#[test]
fn classification_returns_valid_key() {
    let backend = ScriptedBackend::new(["2. cold"]);
    let mut agent = ClassificationAgent::new(backend.clone(), config("classification_public"));

    let prediction = agent.call(&flu_cold(), "Sneezing and a runny nose.").unwrap();
    assert_eq!(prediction, "2");

    let requests = backend.requests();
    assert_eq!(requests.len(), 1);
    let (conversation, max_tokens) = &requests[0];
    assert_eq!(*max_tokens, 32);
    assert!(conversation.user_content().contains("1. flu\n2. cold"));
    assert!(conversation.user_content().contains("Sneezing and a runny nose."));
}

#[test]
fn classification_log_record() {
    let backend = ScriptedBackend::new(["2. cold"]);
    let mut agent = ClassificationAgent::new(backend.clone(), config("classification_public"));
    assert!(agent.log_info().is_none());

    agent.call(&flu_cold(), "Cough.").unwrap();
    let conversation = &backend.requests()[0].0;
    let record = agent.log_info().unwrap();
    assert_eq!(record.input_pred, conversation.user_content());
    assert_eq!(record.output_pred, "2. cold");
    assert_eq!(record.num_output_tokens, 2);
    let joined = format!("{}{}", conversation.system_content(), conversation.user_content());
    assert_eq!(record.num_input_tokens, joined.split_whitespace().count());
}

#[test]
fn classification_multiple_numbers_take_first() {
    let backend = ScriptedBackend::new(["I think it's either 1. flu or 3. migraine"]);
    let mut agent = ClassificationAgent::new(backend, config("classification_public"));
    assert_eq!(agent.call(&flu_cold(), "Fever.").unwrap(), "1");
}

#[test]
fn classification_fallback_uses_random_source() {
    let backend = ScriptedBackend::new(["No idea.", "7. measles"]);
    let mut agent = ClassificationAgent::new(backend, config("classification_public"))
        .with_random_source(Box::new(FixedIndex(1)));
    assert_eq!(agent.call(&flu_cold(), "Fever.").unwrap(), "2");
    assert_eq!(agent.call(&flu_cold(), "Fever.").unwrap(), "2");
}

#[test]
fn classification_seeded_fallback_stays_in_label_set() {
    let responses = vec!["The patient has a cold"; 25];
    let backend = ScriptedBackend::new(responses);
    let mut agent = ClassificationAgent::new(backend, config("classification_public"))
        .with_random_source(Box::new(RngSource::seeded(11)));
    for _ in 0..25 {
        let key = agent.call(&flu_cold(), "Fever.").unwrap();
        assert!(key == "1" || key == "2", "{key}");
    }
}

#[test]
fn classification_empty_label_set_fallback_fails() {
    let backend = ScriptedBackend::new(["No idea."]);
    let mut agent = ClassificationAgent::new(backend, config("classification_public"));
    let err = agent.call(&LabelSet::new(), "Fever.").unwrap_err();
    assert_eq!(err.downcast_ref::<ParseError>(), Some(&ParseError::EmptyLabelSet));
    assert!(agent.log_info().is_none());
}

#[test]
fn transport_error_propagates_and_clears_log() {
    let backend = ScriptedBackend::new(["1. flu"]);
    let mut agent = ClassificationAgent::new(backend, config("classification_public"));
    agent.call(&flu_cold(), "Fever.").unwrap();
    assert!(agent.log_info().is_some());

    // script exhausted
    let err = agent.call(&flu_cold(), "Fever.").unwrap_err();
    assert!(matches!(
        err.downcast_ref::<InterfaceError>(),
        Some(InterfaceError::EmptyCompletion)
    ));
    assert!(agent.log_info().is_none());
}

#[test]
fn update_is_a_no_op() {
    let backend = ScriptedBackend::new(Vec::<String>::new());
    let mut agent = ClassificationAgent::new(backend.clone(), config("classification_public"));
    assert!(!agent.update(true));
    assert!(!agent.update(false));

    let mut agent = SqlGenerationAgent::new(backend, config("sql_generation_public"));
    assert!(!agent.update(true));
}

#[test]
fn sql_agent_extracts_fenced_code() {
    let backend = ScriptedBackend::new(["Here you go:\n```sql\nSELECT COUNT(*) FROM t;\n```\nDone."]);
    let mut agent = SqlGenerationAgent::new(backend.clone(), config("sql_generation_public"));

    let sql = agent
        .call("CREATE TABLE t (id INT);", "How many rows?")
        .unwrap();
    assert_eq!(sql, "SELECT COUNT(*) FROM t;");

    let (conversation, max_tokens) = &backend.requests()[0];
    assert_eq!(*max_tokens, 512);
    assert!(conversation
        .user_content()
        .starts_with("CREATE TABLE t (id INT);\n\n-- Using valid SQLite"));
    assert_eq!(
        agent.log_info().unwrap().output_pred,
        "Here you go:\n```sql\nSELECT COUNT(*) FROM t;\n```\nDone."
    );
}

#[test]
fn sql_agent_without_fence_returns_raw() {
    let backend = ScriptedBackend::new(["SELECT 1"]);
    let mut agent = SqlGenerationAgent::new(backend, config("sql_generation_public"));
    assert_eq!(agent.call("schema", "query").unwrap(), "SELECT 1");
}

#[test]
fn budget_follows_agent_not_config() {
    let backend = ScriptedBackend::new(["1. flu"]);
    // a classification agent built from an SQL config still uses its own budget
    let mut agent = ClassificationAgent::new(backend.clone(), config("sql_generation_public"));
    agent.call(&flu_cold(), "Fever.").unwrap();
    assert_eq!(backend.requests()[0].1, 32);
}
