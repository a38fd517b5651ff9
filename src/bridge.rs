//! Line-delimited JSON bridge
//!
//! Reads one request per line:
//! `{"id": 1, "method": "readFileContent", "options": {"uri": "file:///tmp/a.txt"}}`
//! and answers each with one line, `{"id": 1, "result": {...}}` or
//! `{"id": 1, "error": {"code": "...", "message": "..."}}`. Blank lines are
//! skipped.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tokio::io::{AsyncBufRead, AsyncBufReadExt, AsyncWrite, AsyncWriteExt};
use tracing::warn;

use crate::error::FileUtilsError;
use crate::plugin::{FileUtils, Rejection};

#[derive(Debug, Deserialize)]
struct BridgeRequest {
    #[serde(default)]
    id: Option<Value>,
    method: String,
    #[serde(default)]
    options: Value,
}

#[derive(Debug, Serialize)]
struct BridgeResponse {
    id: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<Rejection>,
}

/// Serves requests from `reader` until end of input, writing responses to
/// `writer`. Only I/O failures on the two channels stop the loop.
pub async fn serve<R, W>(plugin: &FileUtils, reader: R, mut writer: W) -> std::io::Result<()>
where
    R: AsyncBufRead + Unpin,
    W: AsyncWrite + Unpin,
{
    let mut lines = reader.lines();

    while let Some(line) = lines.next_line().await? {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        let response = handle_line(plugin, line).await;
        let mut encoded = serde_json::to_vec(&response)?;
        encoded.push(b'\n');
        writer.write_all(&encoded).await?;
        writer.flush().await?;
    }

    Ok(())
}

async fn handle_line(plugin: &FileUtils, line: &str) -> BridgeResponse {
    let request = match serde_json::from_str::<BridgeRequest>(line) {
        Ok(request) => request,
        Err(e) => {
            let err = FileUtilsError::malformed_request(e);
            warn!(code = err.kind().code(), "{}", err);
            return BridgeResponse {
                id: None,
                result: None,
                error: Some(Rejection::from(err)),
            };
        }
    };

    match plugin.call(&request.method, &request.options).await {
        Ok(result) => BridgeResponse {
            id: request.id,
            result: Some(result),
            error: None,
        },
        Err(rejection) => BridgeResponse {
            id: request.id,
            result: None,
            error: Some(rejection),
        },
    }
}
