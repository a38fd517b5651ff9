//! Host-facing plugin
//!
//! `FileUtils` exposes `getFileExtension` and `readFileContent` to the host.
//! Each call is independent: the locator is parsed, handed to the backend for
//! its scheme, and the result or a [`Rejection`] goes back to the host.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncReadExt, BufReader};
use tracing::{debug, warn};

use crate::backend::BackendRegistry;
use crate::config::FileUtilsConfig;
use crate::error::{BackendError, BackendResult, FileUtilsError, IOErrorEnum, Result};
use crate::iostream::InputStream;
use crate::mime::{extension_for_mime_type, extension_from_file_name};
use crate::uri::Uri;

/// Options accepted by both plugin methods.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UriOptions {
    #[serde(default)]
    pub uri: Option<String>,
}

impl UriOptions {
    pub fn new(uri: impl Into<String>) -> Self {
        Self {
            uri: Some(uri.into()),
        }
    }

    /// Reads options from a bridge call. Anything other than a string `uri`
    /// counts as missing.
    pub fn from_value(options: &Value) -> Self {
        Self {
            uri: options
                .get("uri")
                .and_then(Value::as_str)
                .map(str::to_string),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExtensionResult {
    pub extension: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentResult {
    pub content: String,
}

/// Failure reported back to the host.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Rejection {
    pub code: String,
    pub message: String,
}

impl From<FileUtilsError> for Rejection {
    fn from(err: FileUtilsError) -> Self {
        Self {
            code: err.kind().code().to_string(),
            message: err.message().to_string(),
        }
    }
}

pub struct FileUtils {
    registry: BackendRegistry,
    config: FileUtilsConfig,
}

impl FileUtils {
    pub fn new(registry: BackendRegistry, config: FileUtilsConfig) -> Self {
        Self { registry, config }
    }

    pub fn registry(&self) -> &BackendRegistry {
        &self.registry
    }

    pub fn config(&self) -> &FileUtilsConfig {
        &self.config
    }

    /// Dispatches a host call by method name.
    pub async fn call(&self, method: &str, options: &Value) -> std::result::Result<Value, Rejection> {
        let options = UriOptions::from_value(options);
        let result = match method {
            "getFileExtension" => self
                .get_file_extension(&options)
                .await
                .and_then(|r| to_value(&r, FileUtilsError::resolution)),
            "readFileContent" => self
                .read_file_content(&options)
                .await
                .and_then(|r| to_value(&r, FileUtilsError::read)),
            other => {
                let err = FileUtilsError::not_implemented(other);
                warn!(code = err.kind().code(), "{}", err);
                Err(err)
            }
        };
        result.map_err(Rejection::from)
    }

    pub async fn get_file_extension(&self, options: &UriOptions) -> Result<ExtensionResult> {
        let uri = require_uri(options)?;
        debug!(uri = %uri, "getFileExtension");

        match self.resolve_extension(&uri).await {
            Ok(extension) => Ok(ExtensionResult { extension }),
            Err(e) => {
                let err = FileUtilsError::resolution(e);
                warn!(code = err.kind().code(), "{}", err);
                Err(err)
            }
        }
    }

    pub async fn read_file_content(&self, options: &UriOptions) -> Result<ContentResult> {
        let uri = require_uri(options)?;
        debug!(uri = %uri, "readFileContent");

        match self.read_content(&uri).await {
            Ok(content) => Ok(ContentResult { content }),
            Err(e) => {
                let err = FileUtilsError::read(e);
                warn!(code = err.kind().code(), "{}", err);
                Err(err)
            }
        }
    }

    async fn resolve_extension(&self, uri: &Uri) -> BackendResult<String> {
        let backend = self.registry.backend_for_uri(uri)?;

        if let Some(mime_type) = backend.get_type(uri).await? {
            let extension = extension_for_mime_type(&mime_type);
            debug!(mime_type = %mime_type, extension, "extension from MIME type");
            return Ok(extension.to_string());
        }

        if self.config.probe_on_fallback {
            let mut stream = backend.open_input_stream(uri).await?;
            stream.close()?;
        }

        let extension = uri
            .last_path_segment()
            .map(|name| extension_from_file_name(&name).to_string())
            .unwrap_or_default();
        debug!(extension = %extension, "extension from file name");
        Ok(extension)
    }

    async fn read_content(&self, uri: &Uri) -> BackendResult<String> {
        let backend = self.registry.backend_for_uri(uri)?;
        let stream = backend.open_input_stream(uri).await?;

        // One byte past the limit is enough to tell that it was exceeded.
        let cap = self
            .config
            .max_content_bytes
            .map_or(u64::MAX, |limit| limit.saturating_add(1));
        let mut reader = BufReader::new(stream.take(cap));
        let content = reassemble_lines(&mut reader, self.config.max_content_bytes).await?;

        reader.into_inner().into_inner().close()?;
        Ok(content)
    }
}

impl Default for FileUtils {
    fn default() -> Self {
        Self::new(BackendRegistry::with_local(), FileUtilsConfig::default())
    }
}

fn require_uri(options: &UriOptions) -> Result<Uri> {
    match options.uri.as_deref() {
        Some(uri) => Ok(Uri::parse(uri)),
        None => {
            let err = FileUtilsError::invalid_argument("URI not provided");
            warn!(code = err.kind().code(), "{}", err);
            Err(err)
        }
    }
}

fn to_value<T: Serialize>(
    result: &T,
    wrap: fn(BackendError) -> FileUtilsError,
) -> Result<Value> {
    serde_json::to_value(result).map_err(|e| {
        wrap(BackendError::with_source(
            IOErrorEnum::Failed,
            e.to_string(),
            Box::new(e),
        ))
    })
}

/// Reads UTF-8 text line by line and joins it back with a `\n` after every
/// line. `\n`, `\r\n` and a lone `\r` all end a line.
///
/// The byte count is checked against `limit` before anything is decoded, so
/// a stream cut short inside a multi-byte character still reports the limit.
async fn reassemble_lines<R>(reader: &mut R, limit: Option<u64>) -> BackendResult<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut content = String::new();
    let mut line: Vec<u8> = Vec::new();
    let mut total: u64 = 0;
    let mut after_cr = false;

    loop {
        let buf = reader.fill_buf().await?;
        if buf.is_empty() {
            break;
        }
        let len = buf.len();
        total += len as u64;
        if let Some(limit) = limit {
            if total > limit {
                return Err(BackendError::new(
                    IOErrorEnum::TooLarge,
                    format!("Content exceeds {} bytes", limit),
                ));
            }
        }

        for &byte in buf {
            match byte {
                // Second half of a `\r\n`.
                b'\n' if after_cr => after_cr = false,
                b'\n' | b'\r' => {
                    push_line(&mut content, &mut line)?;
                    after_cr = byte == b'\r';
                }
                _ => {
                    after_cr = false;
                    line.push(byte);
                }
            }
        }
        reader.consume(len);
    }

    if !line.is_empty() {
        push_line(&mut content, &mut line)?;
    }

    Ok(content)
}

fn push_line(content: &mut String, line: &mut Vec<u8>) -> BackendResult<()> {
    let text = std::str::from_utf8(line).map_err(|e| {
        BackendError::with_source(
            IOErrorEnum::InvalidData,
            "stream did not contain valid UTF-8",
            Box::new(e),
        )
    })?;
    content.push_str(text);
    content.push('\n');
    line.clear();
    Ok(())
}
