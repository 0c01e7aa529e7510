//! # Note Storage
//!
//! JSON file implementation of `NoteStore`. The whole note book is one object mapping
//! sender ids to their list of notes. A missing file reads as an empty book.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use async_trait::async_trait;

use crate::domain::traits::NoteStore;
use crate::domain::types::NoteBook;

pub struct JsonNoteStore {
    path: PathBuf,
}

impl JsonNoteStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }
}

#[async_trait]
impl NoteStore for JsonNoteStore {
    async fn read(&self) -> Result<NoteBook> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(NoteBook::new()),
            Err(e) => {
                return Err(e).with_context(|| format!("Failed to read {}", self.path.display()));
            }
        };
        if content.trim().is_empty() {
            return Ok(NoteBook::new());
        }
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse notes in {}", self.path.display()))
    }

    async fn write(&self, notes: &NoteBook) -> Result<()> {
        if let Some(parent) = self.path.parent()
            && !parent.as_os_str().is_empty()
        {
            tokio::fs::create_dir_all(parent)
                .await
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let content = serde_json::to_string_pretty(notes)?;
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, content)
            .await
            .with_context(|| format!("Failed to write {}", tmp.display()))?;
        tokio::fs::rename(&tmp, &self.path)
            .await
            .with_context(|| format!("Failed to replace {}", self.path.display()))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonNoteStore::new(dir.path().join("user_notes.json"));
        assert!(store.read().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_write_then_read() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested/user_notes.json");
        let store = JsonNoteStore::new(&path);

        let mut book = NoteBook::new();
        book.insert("@alice".to_string(), vec!["buy milk".to_string()]);
        store.write(&book).await.unwrap();

        assert_eq!(store.read().await.unwrap(), book);
        assert!(!path.with_extension("json.tmp").exists());
    }

    #[tokio::test]
    async fn test_reads_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_notes.json");
        std::fs::write(&path, r#"{"@bob": ["a", "b"]}"#).unwrap();

        let book = JsonNoteStore::new(&path).read().await.unwrap();
        assert_eq!(book["@bob"], vec!["a".to_string(), "b".to_string()]);
    }

    #[tokio::test]
    async fn test_corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("user_notes.json");
        std::fs::write(&path, "not json").unwrap();
        assert!(JsonNoteStore::new(&path).read().await.is_err());
    }
}
