use mockito::Matcher;
use serde_json::json;
use zeroshot_interface::*;
use zeroshot_prompt::{Conversation, PromptTokenizer};

fn ready_server() -> mockito::ServerGuard {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/health")
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"status":"ok"}"#)
        .create();
    server
}

#[test]
fn attach_requires_ready_health() {
    let server = ready_server();
    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    assert_eq!(llama.status(), ServerStatus::Ready);
    assert!(llama.guard.is_none());
    // stopping an attached server is a no-op
    llama.stop().unwrap();
}

#[test]
fn attach_to_loading_server_fails() {
    let mut server = mockito::Server::new();
    server
        .mock("GET", "/health")
        .with_status(503)
        .with_body(r#"{"error":{"code":503,"message":"Loading model","type":"unavailable_error"}}"#)
        .create();

    match LlamaServer::attach(&server.url(), "test-model") {
        Err(InterfaceError::ServerLaunch(msg)) => assert!(msg.contains("loading"), "{msg}"),
        other => panic!("expected ServerLaunch, got {other:?}"),
    }
}

#[test]
fn attach_to_nothing_fails() {
    match LlamaServer::attach("http://127.0.0.1:9", "test-model") {
        Err(InterfaceError::ServerLaunch(msg)) => assert!(msg.contains("not reachable"), "{msg}"),
        other => panic!("expected ServerLaunch, got {other:?}"),
    }
}

#[test]
fn complete_sends_greedy_request() {
    let mut server = ready_server();
    let chat = server
        .mock("POST", "/v1/chat/completions")
        .match_body(Matcher::PartialJson(json!({
            "messages": [
                {"role": "system", "content": "Be terse."},
                {"role": "user", "content": "Pick one."}
            ],
            "max_tokens": 32,
            "temperature": 0.0,
            "top_k": 1,
            "stream": false
        })))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(
            json!({
                "choices": [{"index": 0, "message": {"role": "assistant", "content": "2. cold"}, "finish_reason": "stop"}],
                "usage": {"prompt_tokens": 12, "completion_tokens": 3, "total_tokens": 15}
            })
            .to_string(),
        )
        .expect(1)
        .create();

    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    let text = llama
        .complete(&Conversation::new("Be terse.", "Pick one."), 32)
        .unwrap();
    assert_eq!(text, "2. cold");
    chat.assert();
}

#[test]
fn empty_choices_is_an_error() {
    let mut server = ready_server();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[]}"#)
        .create();

    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    let err = llama
        .complete(&Conversation::new("s", "u"), 8)
        .unwrap_err();
    assert!(matches!(err, InterfaceError::EmptyCompletion), "got {err:?}");
}

#[test]
fn null_content_is_empty_text() {
    let mut server = ready_server();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(200)
        .with_body(r#"{"choices":[{"index":0,"message":{"role":"assistant","content":null}}]}"#)
        .create();

    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    assert_eq!(llama.complete(&Conversation::new("s", "u"), 8).unwrap(), "");
}

#[test]
fn server_error_surfaces_as_client_error() {
    let mut server = ready_server();
    server
        .mock("POST", "/v1/chat/completions")
        .with_status(500)
        .with_body(r#"{"error":{"code":500,"message":"context overflow"}}"#)
        .create();

    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    match llama.complete(&Conversation::new("s", "u"), 8) {
        Err(InterfaceError::Client(ClientError::Remote { code, message })) => {
            assert_eq!(code, 500);
            assert!(message.contains("context overflow"));
        }
        other => panic!("expected remote error, got {other:?}"),
    }
}

#[test]
fn token_counting_uses_tokenize_endpoint() {
    let mut server = ready_server();
    server
        .mock("POST", "/tokenize")
        .match_body(Matcher::Json(json!({"content": "hello world"})))
        .with_status(200)
        .with_body(r#"{"tokens":[15339,1917]}"#)
        .create();

    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    assert_eq!(llama.count_tokens("hello world"), 2);
    assert_eq!(llama.tokenize("hello world"), vec![15339, 1917]);
}

#[test]
fn token_counting_failure_counts_zero() {
    let mut server = ready_server();
    server.mock("POST", "/tokenize").with_status(500).create();

    let llama = LlamaServer::attach(&server.url(), "test-model").unwrap();
    assert_eq!(llama.count_tokens("anything"), 0);
}
