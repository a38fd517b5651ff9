use std::io::Cursor;

use tokio::io::AsyncRead;

use crate::error::BackendResult;

/// Trait representing an input stream (source of bytes).
/// Extends AsyncRead to integrate with Tokio.
pub trait InputStream: AsyncRead + Send + Unpin {
    fn close(&mut self) -> BackendResult<()>;
}

// Implement for Box<dyn InputStream> to make it usable as an object
impl InputStream for Box<dyn InputStream> {
    fn close(&mut self) -> BackendResult<()> {
        (**self).close()
    }
}

impl InputStream for tokio::fs::File {
    fn close(&mut self) -> BackendResult<()> {
        Ok(())
    }
}

impl InputStream for Cursor<Vec<u8>> {
    fn close(&mut self) -> BackendResult<()> {
        Ok(())
    }
}
