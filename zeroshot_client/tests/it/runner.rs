use std::io::Write;

use zeroshot_client::{
    benchmark::dataset::{load_rows, DatasetRow},
    *,
};

use crate::{config, ScriptedBackend};

fn classification_rows(n: usize) -> Vec<DatasetRow> {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    for i in 0..n {
        writeln!(
            file,
            r#"{{"id": {i}, "label2desc": {{"1": "flu", "2": "cold"}}, "text": "Patient {i}.", "label": {}}}"#,
            if i % 2 == 0 { 2 } else { 1 }
        )
        .unwrap();
    }
    load_rows(file.path(), BenchmarkTask::Classification).unwrap()
}

#[test]
fn classification_run_scores_and_writes_csv() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("preds.csv");
    let telemetry = dir.path().join("logs").join("run.jsonl");

    let backend = ScriptedBackend::new(["2. cold", "2. cold", "1. flu", "nothing"]);
    let agent = BenchmarkAgent::new(backend, config("classification_public")).unwrap();
    let bench_config = BenchConfig {
        bench_name: "classification_public".to_string(),
        output_path: Some(output.clone()),
    };
    let mut runner = BenchmarkRunner::new(agent, bench_config).telemetry_path(Some(&telemetry));

    let summary = runner.run(&classification_rows(3)).unwrap();
    assert_eq!(summary.rows, 3);
    assert_eq!(summary.scored, 3);
    // row 0 gold 2, row 1 gold 1, row 2 gold 2
    assert_eq!(summary.correct, 1);
    assert!(summary.total_input_tokens > 0);
    assert_eq!(summary.total_output_tokens, 6);

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "id,prediction\n0,2\n1,2\n2,1\n"
    );

    let lines: Vec<serde_json::Value> = std::fs::read_to_string(&telemetry)
        .unwrap()
        .lines()
        .map(|l| serde_json::from_str(l).unwrap())
        .collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0]["type"], "record");
    assert_eq!(lines[0]["prediction"], "2");
    assert_eq!(lines[0]["correct"], true);
    assert_eq!(lines[0]["log"]["output_pred"], "2. cold");
    assert_eq!(lines[3]["type"], "summary");
    assert_eq!(lines[3]["correct"], 1);
}

#[test]
fn debug_run_stops_after_ten_rows() {
    let backend = ScriptedBackend::new(vec!["1. flu"; 12]);
    let agent = BenchmarkAgent::new(backend.clone(), config("classification_public")).unwrap();
    let mut runner = BenchmarkRunner::new(agent, BenchConfig::default()).debug(true);

    let summary = runner.run(&classification_rows(12)).unwrap();
    assert_eq!(summary.rows, 10);
    assert_eq!(backend.requests().len(), 10);
}

#[test]
fn sql_run_without_gold_is_unscored() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, r#"{{"table_schema": "CREATE TABLE t (a INT, b INT);", "user_query": "a and b"}}"#).unwrap();
    writeln!(file, r#"{{"table_schema": "CREATE TABLE t (a INT);", "user_query": "count", "sql": "select count(*) from t"}}"#).unwrap();
    let rows = load_rows(file.path(), BenchmarkTask::SqlGeneration).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("sql.csv");
    let backend = ScriptedBackend::new([
        "```sql\nSELECT a, b FROM t;\n```",
        "```sql\nSELECT COUNT(*)\nFROM t;\n```",
    ]);
    let agent = BenchmarkAgent::new(backend, config("sql_generation_public")).unwrap();
    let bench_config = BenchConfig {
        bench_name: "sql_generation_public".to_string(),
        output_path: Some(output.clone()),
    };
    let mut runner = BenchmarkRunner::new(agent, bench_config);

    let summary = runner.run(&rows).unwrap();
    assert_eq!(summary.scored, 1);
    assert_eq!(summary.correct, 1);
    assert_eq!(summary.accuracy, Some(1.0));
    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "id,prediction\n0,\"SELECT a, b FROM t;\"\n1,\"SELECT COUNT(*)\nFROM t;\"\n"
    );
}

#[test]
fn mismatched_rows_are_rejected() {
    let backend = ScriptedBackend::new(["```sql\nSELECT 1;\n```"]);
    let agent = BenchmarkAgent::new(backend, config("sql_generation_public")).unwrap();
    let mut runner = BenchmarkRunner::new(agent, BenchConfig::default());
    assert!(runner.run(&classification_rows(1)).is_err());
}

#[test]
fn agent_follows_benchmark_prefix() {
    let backend = ScriptedBackend::new(Vec::<String>::new());
    let agent = BenchmarkAgent::new(backend.clone(), config("classification_x")).unwrap();
    assert_eq!(agent.task(), BenchmarkTask::Classification);
    let agent = BenchmarkAgent::new(backend, config("sql_generation_x")).unwrap();
    assert_eq!(agent.task(), BenchmarkTask::SqlGeneration);
}
