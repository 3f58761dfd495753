//! Byte buffers backing the panes.
//!
//! A [`ByteBuffer`] owns the raw contents of one file together with the path
//! it was read from. Buffers are loaded once and only ever replaced wholesale
//! by [`ByteBuffer::reload`]; nothing in the viewer writes them back.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Raw file contents plus the path they came from.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ByteBuffer {
    path: PathBuf,
    bytes: Vec<u8>,
}

impl ByteBuffer {
    /// Build a buffer from bytes already in memory.
    pub fn from_bytes(path: impl Into<PathBuf>, bytes: Vec<u8>) -> Self {
        Self {
            path: path.into(),
            bytes,
        }
    }

    /// The empty, pathless buffer used when no file was given.
    pub fn scratch() -> Self {
        Self::default()
    }

    /// Read the whole file at `path`.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn load(path: impl Into<PathBuf>) -> Result<Self> {
        let path = path.into();
        let bytes =
            std::fs::read(&path).with_context(|| format!("Failed to read {}", path.display()))?;
        tracing::debug!(path = %path.display(), len = bytes.len(), "buffer loaded");
        Ok(Self { path, bytes })
    }

    /// Read the file at `path`, falling back to an empty buffer.
    ///
    /// The error is handed back so the caller can surface a warning; the
    /// buffer keeps the path so a later reload can pick the file up.
    pub fn load_lossy(path: impl Into<PathBuf>) -> (Self, Option<anyhow::Error>) {
        let path = path.into();
        match Self::load(path.clone()) {
            Ok(buffer) => (buffer, None),
            Err(err) => {
                tracing::debug!(path = %path.display(), "load failed: {err:#}");
                (Self::from_bytes(path, Vec::new()), Some(err))
            }
        }
    }

    /// Replace the contents with a fresh read of the same path.
    ///
    /// On failure the buffer becomes empty.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read.
    pub fn reload(&mut self) -> Result<()> {
        match std::fs::read(&self.path) {
            Ok(bytes) => {
                tracing::debug!(path = %self.path.display(), len = bytes.len(), "buffer reloaded");
                self.bytes = bytes;
                Ok(())
            }
            Err(err) => {
                self.bytes.clear();
                Err(err).with_context(|| format!("Failed to reload {}", self.path.display()))
            }
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// File name shown on pane borders.
    pub fn name(&self) -> String {
        self.path.file_name().map_or_else(
            || {
                if self.path.as_os_str().is_empty() {
                    "[scratch]".to_string()
                } else {
                    self.path.display().to_string()
                }
            },
            |n| n.to_string_lossy().to_string(),
        )
    }

    /// Up to `len` bytes starting at `offset`.
    ///
    /// The length is clamped to what remains; an `offset` past the end is a
    /// caller bug and panics like any out-of-range slice.
    pub fn slice(&self, offset: usize, len: usize) -> &[u8] {
        let end = offset + len.min(self.bytes.len().saturating_sub(offset));
        &self.bytes[offset..end]
    }
}
