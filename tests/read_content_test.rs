use std::sync::Arc;

use fileutils::{
    BackendRegistry, ErrorKind, FileUtils, FileUtilsConfig, IOErrorEnum, MemoryBackend, UriOptions,
};

fn plugin_with(provider: Arc<MemoryBackend>, config: FileUtilsConfig) -> FileUtils {
    let mut registry = BackendRegistry::with_local();
    registry.register(provider);
    FileUtils::new(registry, config)
}

#[tokio::test]
async fn test_reads_lines_with_trailing_newline() {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://p/ab", Some("text/plain"), "a\nb");
    let plugin = plugin_with(provider, FileUtilsConfig::default());

    let result = plugin
        .read_file_content(&UriOptions::new("content://p/ab"))
        .await
        .unwrap();
    assert_eq!(result.content, "a\nb\n");
}

#[tokio::test]
async fn test_repeated_reads_are_identical() {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://p/log", None, "first\r\nsecond\r\n");
    let plugin = plugin_with(provider, FileUtilsConfig::default());

    let options = UriOptions::new("content://p/log");
    let first = plugin.read_file_content(&options).await.unwrap();
    let second = plugin.read_file_content(&options).await.unwrap();
    assert_eq!(first, second);
    assert_eq!(first.content, "first\nsecond\n");
}

#[tokio::test]
async fn test_missing_content_is_read_failure() {
    let plugin = plugin_with(Arc::new(MemoryBackend::default()), FileUtilsConfig::default());

    let err = plugin
        .read_file_content(&UriOptions::new("content://p/missing"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert_eq!(
        err.message(),
        "Failed to read file content: No content for URI: content://p/missing"
    );
}

#[tokio::test]
async fn test_binary_content_is_read_failure() {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://p/img", Some("image/png"), vec![0x89, b'P', 0xff, 0xfe, b'\n']);
    let plugin = plugin_with(provider, FileUtilsConfig::default());

    let err = plugin
        .read_file_content(&UriOptions::new("content://p/img"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert_eq!(err.cause().map(|c| c.kind()), Some(IOErrorEnum::InvalidData));
    assert!(err.message().starts_with("Failed to read file content: "));
}

#[tokio::test]
async fn test_content_limit() {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://p/small", None, "12345");
    provider.insert("content://p/big", None, "123456");
    let config = FileUtilsConfig {
        max_content_bytes: Some(5),
        ..Default::default()
    };
    let plugin = plugin_with(provider, config);

    let small = plugin
        .read_file_content(&UriOptions::new("content://p/small"))
        .await
        .unwrap();
    assert_eq!(small.content, "12345\n");

    let err = plugin
        .read_file_content(&UriOptions::new("content://p/big"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert_eq!(err.message(), "Failed to read file content: Content exceeds 5 bytes");
}

#[tokio::test]
async fn test_reads_local_file() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    tokio::fs::write(&path, "line one\nline two\n").await.unwrap();

    let plugin = FileUtils::default();
    let uri = format!("file://{}", path.to_string_lossy());
    let result = plugin.read_file_content(&UriOptions::new(uri)).await.unwrap();
    assert_eq!(result.content, "line one\nline two\n");
}

#[tokio::test]
async fn test_missing_local_file_is_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let uri = format!("file://{}", dir.path().join("absent.txt").to_string_lossy());

    let err = FileUtils::default()
        .read_file_content(&UriOptions::new(uri))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert_eq!(err.cause().map(|c| c.kind()), Some(IOErrorEnum::NotFound));
}

#[tokio::test]
async fn test_directory_is_read_failure() {
    let dir = tempfile::tempdir().unwrap();
    let uri = format!("file://{}", dir.path().to_string_lossy());

    let err = FileUtils::default()
        .read_file_content(&UriOptions::new(uri))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert_eq!(err.cause().map(|c| c.kind()), Some(IOErrorEnum::IsDirectory));
}

#[tokio::test]
async fn test_limit_cutting_a_character_reports_size() {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://p/accent", Some("text/plain"), "abé");
    let config = FileUtilsConfig {
        max_content_bytes: Some(3),
        ..Default::default()
    };
    let plugin = plugin_with(provider, config);

    let err = plugin
        .read_file_content(&UriOptions::new("content://p/accent"))
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::ReadFailure);
    assert_eq!(err.cause().map(|c| c.kind()), Some(IOErrorEnum::TooLarge));
    assert_eq!(err.message(), "Failed to read file content: Content exceeds 3 bytes");
}

#[tokio::test]
async fn test_carriage_returns_end_lines() {
    let provider = Arc::new(MemoryBackend::default());
    provider.insert("content://p/old-mac", Some("text/plain"), "one\rtwo\r");
    let plugin = plugin_with(provider, FileUtilsConfig::default());

    let result = plugin
        .read_file_content(&UriOptions::new("content://p/old-mac"))
        .await
        .unwrap();
    assert_eq!(result.content, "one\ntwo\n");
}
