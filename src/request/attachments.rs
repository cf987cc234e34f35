//! Ordered, name-deduplicated attachment list

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AttachmentError {
    #[error("attachment index {index} out of range (len {len})")]
    IndexOutOfRange { index: usize, len: usize },
}

/// A picked file. The handle is opaque to the form; only the name is compared.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    pub name: String,
    pub handle: PathBuf,
}

impl FileRef {
    pub fn new(name: impl Into<String>, handle: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            handle: handle.into(),
        }
    }

    /// Build a reference from a path, naming it after the final component
    pub fn from_path(path: &Path) -> Option<Self> {
        let name = path.file_name()?.to_string_lossy().into_owned();
        Some(Self::new(name, path))
    }
}

/// Attached files in first-seen order, at most one per file name.
///
/// Two files with the same name but different content collapse to the first
/// one added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Vec<FileRef>", into = "Vec<FileRef>")]
pub struct AttachmentSet {
    files: Vec<FileRef>,
}

impl AttachmentSet {
    /// Append every file whose name is not already present. Returns how many were added.
    pub fn add<I>(&mut self, new_files: I) -> usize
    where
        I: IntoIterator<Item = FileRef>,
    {
        let before = self.files.len();
        for file in new_files {
            if !self.contains_name(&file.name) {
                self.files.push(file);
            }
        }
        self.files.len() - before
    }

    /// Remove the entry at `index`, shifting later entries down by one
    pub fn remove_at(&mut self, index: usize) -> Result<FileRef, AttachmentError> {
        if index >= self.files.len() {
            return Err(AttachmentError::IndexOutOfRange {
                index,
                len: self.files.len(),
            });
        }
        Ok(self.files.remove(index))
    }

    pub fn contains_name(&self, name: &str) -> bool {
        self.files.iter().any(|f| f.name == name)
    }

    pub fn files(&self) -> &[FileRef] {
        &self.files
    }

    pub fn len(&self) -> usize {
        self.files.len()
    }

    pub fn is_empty(&self) -> bool {
        self.files.is_empty()
    }
}

impl From<Vec<FileRef>> for AttachmentSet {
    fn from(files: Vec<FileRef>) -> Self {
        let mut set = Self::default();
        set.add(files);
        set
    }
}

impl From<AttachmentSet> for Vec<FileRef> {
    fn from(set: AttachmentSet) -> Self {
        set.files
    }
}
