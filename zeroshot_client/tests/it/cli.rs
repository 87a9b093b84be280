use std::io::Write;

use assert_cmd::Command;
use mockito::Matcher;
use predicates::prelude::*;
use serial_test::serial;

#[test]
fn invalid_benchmark_name_is_fatal() {
    Command::cargo_bin("zeroshot")
        .unwrap()
        .args(["--bench-name", "summarization", "--dataset", "rows.jsonl"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid benchmark name: summarization"));
}

#[test]
fn invalid_device_is_fatal() {
    let dir = tempfile::tempdir().unwrap();
    Command::cargo_bin("zeroshot")
        .unwrap()
        .args(["--bench-name", "classification", "--dataset", "rows.jsonl"])
        .args(["--device", "tpu:0", "--log-dir"])
        .arg(dir.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid device"));
}

#[test]
#[serial]
fn classification_run_against_running_server() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_body(r#"{"status":"ok"}"#)
        .create();
    server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(serde_json::json!({"max_tokens": 32, "top_k": 1})))
        .with_status(200)
        .with_body(
            r#"{"choices":[{"index":0,"message":{"role":"assistant","content":"2. cold"},"finish_reason":"stop"}]}"#,
        )
        .expect(2)
        .create();
    server
        .mock("POST", "/tokenize")
        .with_status(200)
        .with_body(r#"{"tokens":[1,2,3]}"#)
        .create();

    let dir = tempfile::tempdir().unwrap();
    let dataset = dir.path().join("rows.jsonl");
    let mut file = std::fs::File::create(&dataset).unwrap();
    writeln!(file, r#"{{"id": 7, "label2desc": {{"1": "flu", "2": "cold"}}, "text": "Sneezing.", "label": 2}}"#).unwrap();
    writeln!(file, r#"{{"label2desc": {{"1": "flu", "2": "cold"}}, "text": "Fever."}}"#).unwrap();
    drop(file);

    let output = dir.path().join("preds.csv");
    let log_dir = dir.path().join("logs");

    Command::cargo_bin("zeroshot")
        .unwrap()
        .args(["--bench-name", "classification_public", "--device", "cpu", "--telemetry"])
        .args(["--server-url", &server.url()])
        .arg("--dataset")
        .arg(&dataset)
        .arg("--output-path")
        .arg(&output)
        .arg("--log-dir")
        .arg(&log_dir)
        .assert()
        .success();

    assert_eq!(
        std::fs::read_to_string(&output).unwrap(),
        "id,prediction\n7,2\n1,2\n"
    );
    let telemetry = log_dir.join(
        "zeroshot_classification_public_Qwen_Qwen2.5-7B-Instruct-GGUF_8bit-false.jsonl",
    );
    let contents = std::fs::read_to_string(telemetry).unwrap();
    assert_eq!(contents.lines().count(), 3);
    assert!(contents.lines().last().unwrap().contains(r#""accuracy":1.0"#));
}
