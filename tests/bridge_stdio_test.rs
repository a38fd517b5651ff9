use std::sync::Arc;

use fileutils::{bridge, BackendRegistry, FileUtils, FileUtilsConfig, MemoryBackend};
use serde_json::{json, Value};

fn plugin() -> FileUtils {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://docs/memo", None, "to do:\r\nship it");
    let mut registry = BackendRegistry::new();
    registry.register(provider);
    FileUtils::new(registry, FileUtilsConfig::default())
}

async fn exchange(input: &str) -> Vec<Value> {
    let mut output = Vec::new();
    bridge::serve(&plugin(), input.as_bytes(), &mut output)
        .await
        .expect("bridge failed");

    let output = String::from_utf8(output).expect("bridge wrote invalid UTF-8");
    assert!(output.is_empty() || output.ends_with('\n'));
    output
        .lines()
        .map(|line| serde_json::from_str(line).expect("response is not JSON"))
        .collect()
}

#[tokio::test]
async fn test_one_response_per_request_with_echoed_id() {
    let input = concat!(
        r#"{"id": 1, "method": "getFileExtension", "options": {"uri": "content://docs/memo.md"}}"#,
        "\n",
        r#"{"id": "two", "method": "readFileContent", "options": {"uri": "content://docs/memo"}}"#,
        "\n",
    );

    let responses = exchange(input).await;
    assert_eq!(
        responses,
        vec![
            json!({"id": 1, "result": {"extension": "md"}}),
            json!({"id": "two", "result": {"content": "to do:\nship it\n"}}),
        ]
    );
}

#[tokio::test]
async fn test_rejections_carry_code_and_id() {
    let input = concat!(
        r#"{"id": 7, "method": "readFileContent", "options": {}}"#,
        "\n",
        r#"{"id": 8, "method": "openFile"}"#,
        "\n",
    );

    let responses = exchange(input).await;
    assert_eq!(
        responses,
        vec![
            json!({"id": 7, "error": {"code": "INVALID_ARGUMENT", "message": "URI not provided"}}),
            json!({"id": 8, "error": {"code": "NOT_IMPLEMENTED", "message": "Method not implemented: openFile"}}),
        ]
    );
}

#[tokio::test]
async fn test_malformed_line_gets_parse_error() {
    let input = "this is not json\n{\"id\": 3}\n";

    let responses = exchange(input).await;
    assert_eq!(responses.len(), 2);
    for response in &responses {
        assert_eq!(response["id"], Value::Null);
        assert_eq!(response["error"]["code"], "PARSE_ERROR");
        assert!(response["error"]["message"]
            .as_str()
            .unwrap()
            .starts_with("Malformed request: "));
        assert!(response.get("result").is_none());
    }
}

#[tokio::test]
async fn test_blank_lines_are_skipped() {
    let input = "\n   \n{\"id\": 1, \"method\": \"getFileExtension\", \"options\": {\"uri\": \"content://docs/a.tar.gz\"}}\n\n";

    let responses = exchange(input).await;
    assert_eq!(responses, vec![json!({"id": 1, "result": {"extension": "gz"}})]);

    assert!(exchange("").await.is_empty());
}
