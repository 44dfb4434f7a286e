//! Atomic .docx packaging.
//!
//! The archive is built in a temporary file next to the destination and
//! renamed over it only once complete, so a failed run leaves any previous
//! output untouched.

use crate::docx::{builder, DocxDocument};
use crate::error::{AssembleError, AssembleResult};
use std::path::{Path, PathBuf};

#[derive(Debug, Default, Clone, Copy)]
pub struct DocxWriter;

impl DocxWriter {
    pub fn new() -> Self {
        Self
    }

    /// Write `doc` to `path`, replacing it atomically.
    pub fn write(&self, path: &Path, doc: &DocxDocument<'_>) -> AssembleResult<PathBuf> {
        let dir = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };

        let mut tmp = tempfile::Builder::new()
            .prefix(".srcdoc-")
            .suffix(".docx.part")
            .tempfile_in(&dir)?;

        builder::build_docx(doc)
            .build()
            .pack(tmp.as_file_mut())
            .map_err(|e| AssembleError::package(e.to_string()))?;

        tmp.as_file().sync_all()?;
        tmp.persist(path).map_err(|e| AssembleError::Persist {
            path: path.to_path_buf(),
            source: e.error,
        })?;

        tracing::debug!(path = %path.display(), pages = doc.pages.len(), "Wrote document package");
        Ok(path.to_path_buf())
    }
}
