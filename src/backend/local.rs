use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncReadExt;

use crate::backend::Backend;
use crate::error::{BackendError, BackendResult, IOErrorEnum};
use crate::iostream::InputStream;
use crate::mime::{MimeResolver, SNIFF_LEN};
use crate::uri::Uri;

/// Serves `file://` URIs from the local filesystem.
pub struct LocalBackend;

impl LocalBackend {
    pub fn new() -> Self {
        Self
    }

    fn path_for(&self, uri: &Uri) -> BackendResult<PathBuf> {
        uri.to_file_path().ok_or_else(|| {
            BackendError::new(
                IOErrorEnum::InvalidArg,
                format!("Not a local file URI: {}", uri),
            )
        })
    }
}

impl Default for LocalBackend {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Backend for LocalBackend {
    fn scheme(&self) -> &str {
        "file"
    }

    async fn get_type(&self, uri: &Uri) -> BackendResult<Option<String>> {
        let path = self.path_for(uri)?;
        let metadata = fs::metadata(&path).await?;
        if metadata.is_dir() {
            return Ok(Some("inode/directory".to_string()));
        }

        if let Some(mime_type) = MimeResolver::guess_from_path(&path) {
            return Ok(Some(mime_type));
        }

        // No usable extension, look at the content instead.
        let file = fs::File::open(&path).await?;
        let mut head = Vec::with_capacity(SNIFF_LEN);
        file.take(SNIFF_LEN as u64).read_to_end(&mut head).await?;
        Ok(MimeResolver::sniff(&head))
    }

    async fn open_input_stream(&self, uri: &Uri) -> BackendResult<Box<dyn InputStream>> {
        let path = self.path_for(uri)?;
        let metadata = fs::metadata(&path).await?;
        if metadata.is_dir() {
            return Err(BackendError::new(
                IOErrorEnum::IsDirectory,
                format!("Is a directory: {}", path.display()),
            ));
        }
        let file = fs::File::open(&path).await?;
        Ok(Box::new(file))
    }
}
