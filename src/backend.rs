pub mod local;
pub mod memory;

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;

use crate::error::{BackendError, BackendResult, IOErrorEnum};
use crate::iostream::InputStream;
use crate::uri::Uri;

/// Content-resolution service for one URI scheme (e.g. "file", "content").
///
/// This is the only seam between the plugin and the platform: everything the
/// plugin knows about a resource comes from these two calls.
#[async_trait]
pub trait Backend: Send + Sync {
    fn scheme(&self) -> &str;

    /// Returns the MIME type of the resource, or `None` when the service has
    /// no information about it.
    async fn get_type(&self, uri: &Uri) -> BackendResult<Option<String>>;

    /// Opens the resource for reading.
    async fn open_input_stream(&self, uri: &Uri) -> BackendResult<Box<dyn InputStream>>;
}

/// Maps URI schemes to the backends serving them.
#[derive(Clone)]
pub struct BackendRegistry {
    backends: HashMap<String, Arc<dyn Backend>>,
}

impl BackendRegistry {
    pub fn new() -> Self {
        Self {
            backends: HashMap::new(),
        }
    }

    /// A registry serving `file://` URIs from the local filesystem.
    pub fn with_local() -> Self {
        let mut registry = Self::new();
        registry.register(Arc::new(local::LocalBackend::new()));
        registry
    }

    /// Registers a backend, replacing any previous one for the same scheme.
    pub fn register(&mut self, backend: Arc<dyn Backend>) {
        self.backends
            .insert(backend.scheme().to_ascii_lowercase(), backend);
    }

    pub fn get_backend(&self, scheme: &str) -> Option<Arc<dyn Backend>> {
        self.backends.get(&scheme.to_ascii_lowercase()).cloned()
    }

    pub fn backend_for_uri(&self, uri: &Uri) -> BackendResult<Arc<dyn Backend>> {
        self.get_backend(uri.scheme()).ok_or_else(|| {
            BackendError::new(
                IOErrorEnum::NotSupported,
                format!("No backend found for scheme: {}", uri.scheme()),
            )
        })
    }
}

impl Default for BackendRegistry {
    fn default() -> Self {
        Self::new()
    }
}
