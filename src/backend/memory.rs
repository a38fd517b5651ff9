//! In-process content provider.
//!
//! Holds documents the host generated or received itself and serves them under
//! a URI scheme of its choosing, `content` by default.

use std::collections::HashMap;
use std::io::Cursor;
use std::sync::{Arc, RwLock};

use async_trait::async_trait;

use crate::backend::Backend;
use crate::error::{BackendError, BackendResult, IOErrorEnum};
use crate::iostream::InputStream;
use crate::uri::Uri;

#[derive(Clone)]
struct MemoryEntry {
    mime_type: Option<String>,
    data: Arc<Vec<u8>>,
}

pub struct MemoryBackend {
    scheme: String,
    entries: RwLock<HashMap<String, MemoryEntry>>,
}

impl MemoryBackend {
    pub fn new(scheme: impl Into<String>) -> Self {
        Self {
            scheme: scheme.into(),
            entries: RwLock::new(HashMap::new()),
        }
    }

    /// Adds or replaces the document at `uri`.
    pub fn insert(&self, uri: &str, mime_type: Option<&str>, data: impl Into<Vec<u8>>) {
        let entry = MemoryEntry {
            mime_type: mime_type.map(str::to_string),
            data: Arc::new(data.into()),
        };
        match self.entries.write() {
            Ok(mut entries) => {
                entries.insert(uri.to_string(), entry);
            }
            Err(e) => {
                tracing::warn!("Memory backend lock poisoned, recovering: {}", e);
                e.into_inner().insert(uri.to_string(), entry);
            }
        }
    }

    pub fn remove(&self, uri: &str) -> bool {
        match self.entries.write() {
            Ok(mut entries) => entries.remove(uri).is_some(),
            Err(e) => e.into_inner().remove(uri).is_some(),
        }
    }

    pub fn len(&self) -> usize {
        match self.entries.read() {
            Ok(entries) => entries.len(),
            Err(e) => e.into_inner().len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn entry(&self, uri: &Uri) -> Option<MemoryEntry> {
        match self.entries.read() {
            Ok(entries) => entries.get(uri.as_str()).cloned(),
            Err(e) => {
                tracing::warn!("Memory backend lock poisoned, recovering: {}", e);
                e.into_inner().get(uri.as_str()).cloned()
            }
        }
    }
}

impl Default for MemoryBackend {
    fn default() -> Self {
        Self::new("content")
    }
}

#[async_trait]
impl Backend for MemoryBackend {
    fn scheme(&self) -> &str {
        &self.scheme
    }

    async fn get_type(&self, uri: &Uri) -> BackendResult<Option<String>> {
        Ok(self.entry(uri).and_then(|entry| entry.mime_type))
    }

    async fn open_input_stream(&self, uri: &Uri) -> BackendResult<Box<dyn InputStream>> {
        let entry = self.entry(uri).ok_or_else(|| {
            BackendError::new(IOErrorEnum::NotFound, format!("No content for URI: {}", uri))
        })?;
        Ok(Box::new(Cursor::new(entry.data.as_ref().clone())))
    }
}
