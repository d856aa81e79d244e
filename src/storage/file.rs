//! Filesystem storage backend for native environments.

use super::{NoteStorage, StorageError, StorageFuture};
use std::{
    io::ErrorKind,
    path::{Path, PathBuf},
};
use tokio::fs;

const FILE_STORAGE_PREFIX: &str = "note-";
const STORAGE_FILE_EXTENSION: &str = "json";

/// File-based storage backend that persists each key to its own file under
/// a caller-chosen directory.
#[derive(Debug, Clone)]
pub struct FileStorage {
    directory: PathBuf,
}

impl FileStorage {
    /// Creates a new [`FileStorage`] rooted at `directory`.
    ///
    /// The directory is created on first write.
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    /// The directory this backend reads and writes under.
    pub fn directory(&self) -> &Path {
        &self.directory
    }

    fn file_path(&self, key: &str) -> PathBuf {
        let sanitized_key = sanitize_key(key);
        self.directory.join(format!(
            "{FILE_STORAGE_PREFIX}{sanitized_key}.{STORAGE_FILE_EXTENSION}"
        ))
    }

    async fn ensure_directory(&self) -> Result<(), StorageError> {
        if self.directory.as_os_str().is_empty() {
            return Ok(()); // current directory
        }
        fs::create_dir_all(&self.directory).await?;
        Ok(())
    }
}

fn sanitize_key(key: &str) -> String {
    key.chars()
        .map(|c| {
            if matches!(c, '/' | '\\' | ':' | '*') {
                '_'
            } else {
                c
            }
        })
        .collect()
}

impl NoteStorage for FileStorage {
    fn get<'a>(
        &'a mut self,
        key: &'a str,
    ) -> StorageFuture<'a, Result<Option<String>, StorageError>> {
        Box::pin(async move {
            match fs::read_to_string(self.file_path(key)).await {
                Ok(contents) => Ok(Some(contents)),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
                Err(e) => Err(StorageError::from(e)),
            }
        })
    }

    fn set<'a>(
        &'a mut self,
        key: &'a str,
        value: String,
    ) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            self.ensure_directory().await?;
            fs::write(self.file_path(key), value).await?;
            Ok(())
        })
    }

    fn remove<'a>(&'a mut self, key: &'a str) -> StorageFuture<'a, Result<(), StorageError>> {
        Box::pin(async move {
            match fs::remove_file(self.file_path(key)).await {
                Ok(()) => Ok(()),
                Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
                Err(e) => Err(StorageError::from(e)),
            }
        })
    }
}

impl From<FileStorage> for Box<dyn NoteStorage> {
    fn from(storage: FileStorage) -> Self {
        Box::new(storage)
    }
}
