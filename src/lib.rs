//! # fileutils
//!
//! File utility plugin for hybrid apps. Resolves the file extension behind a
//! content URI and reads text documents, on top of pluggable content-resolution
//! backends.
//!
//! ## Core Concepts
//!
//! - **Uri**: the locator the host hands over, parsed only far enough to pick a backend
//! - **Backend**: content-resolution service for one URI scheme (`file://`, `content://`, ...)
//! - **FileUtils**: the plugin itself, exposing `getFileExtension` and `readFileContent`
//!
//! ## Example
//!
//! ```no_run
//! use std::sync::Arc;
//! use fileutils::{BackendRegistry, FileUtils, FileUtilsConfig, MemoryBackend, UriOptions};
//!
//! # async fn example() -> fileutils::Result<()> {
//! let provider = Arc::new(MemoryBackend::default());
//! provider.insert("content://docs/1", Some("text/plain"), "hello\nworld");
//!
//! let mut registry = BackendRegistry::with_local();
//! registry.register(provider);
//! let plugin = FileUtils::new(registry, FileUtilsConfig::default());
//!
//! let ext = plugin.get_file_extension(&UriOptions::new("content://docs/1")).await?;
//! assert_eq!(ext.extension, "txt");
//!
//! let text = plugin.read_file_content(&UriOptions::new("content://docs/1")).await?;
//! assert_eq!(text.content, "hello\nworld\n");
//! # Ok(())
//! # }
//! ```

pub mod backend;
pub mod bridge;
pub mod config;
pub mod error;
pub mod iostream;
pub mod mime;
pub mod plugin;
pub mod uri;

pub use backend::{Backend, BackendRegistry};
pub use backend::local::LocalBackend;
pub use backend::memory::MemoryBackend;
pub use config::{ConfigError, FileUtilsConfig, PLUGIN_NAME};
pub use error::{BackendError, BackendResult, ErrorKind, FileUtilsError, IOErrorEnum, Result};
pub use iostream::InputStream;
pub use mime::{extension_for_mime_type, MimeResolver};
pub use plugin::{ContentResult, ExtensionResult, FileUtils, Rejection, UriOptions};
pub use uri::Uri;
