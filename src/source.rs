//! Labeled email sources

use crate::error::{FeatureError, Result};
use crate::types::Label;
use std::ffi::{OsStr, OsString};
use std::path::{Path, PathBuf};

/// A raw email ready for extraction
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RawEmail {
    /// Entry name inside its source
    pub name: OsString,
    pub text: String,
    pub label: Label,
}

/// A labeled collection of raw emails
pub trait EmailSource {
    /// Label shared by every email in this source
    fn label(&self) -> Label;

    /// Human-readable location, used in logs and skip reports
    fn describe(&self) -> String;

    /// Entry names in listing order; the scanner does not re-sort them
    ///
    /// The outer error means the source cannot be listed at all. An inner
    /// error is one entry that could not be enumerated.
    fn list(&self) -> Result<Vec<Result<OsString>>>;

    /// Raw bytes of one entry
    fn read(&self, name: &OsStr) -> Result<Vec<u8>>;
}

/// A directory holding one email per file
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
    label: Label,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>, label: Label) -> Self {
        Self {
            root: root.into(),
            label,
        }
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl EmailSource for DirectorySource {
    fn label(&self) -> Label {
        self.label
    }

    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn list(&self) -> Result<Vec<Result<OsString>>> {
        if !self.root.is_dir() {
            return Err(FeatureError::MissingSource(self.root.clone()));
        }

        let entries = std::fs::read_dir(&self.root).map_err(|e| FeatureError::io(&self.root, e))?;
        Ok(entries
            .map(|entry| {
                entry
                    .map(|e| e.file_name())
                    .map_err(|e| FeatureError::io(&self.root, e))
            })
            .collect())
    }

    fn read(&self, name: &OsStr) -> Result<Vec<u8>> {
        let path = self.root.join(name);
        std::fs::read(&path).map_err(|e| FeatureError::io(path, e))
    }
}

/// Decode file contents as text without ever failing
///
/// Invalid UTF-8 becomes U+FFFD, a leading BOM is dropped and line endings
/// are normalized to `\n`.
#[must_use]
pub fn decode_text(bytes: &[u8]) -> String {
    let (text, had_errors) = encoding_rs::UTF_8.decode_with_bom_removal(bytes);
    if had_errors {
        tracing::trace!("Replaced malformed UTF-8 sequences");
    }
    normalize_newlines(&text)
}

fn normalize_newlines(text: &str) -> String {
    if !text.contains('\r') {
        return text.to_string();
    }
    text.replace("\r\n", "\n").replace('\r', "\n")
}
