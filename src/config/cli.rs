use crate::core::Storage;
use crate::utils::error::{Result, ScraperError};
use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

/// Local filesystem storage. Files are written through a temporary file in
/// the destination directory and renamed into place, so a failed write
/// never leaves a partial CSV behind.
#[derive(Debug, Clone)]
pub struct LocalStorage {
    base_path: PathBuf,
}

impl LocalStorage {
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
        }
    }

    fn write_atomic(&self, full_path: &Path, data: &[u8]) -> Result<()> {
        let parent = match full_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent).map_err(|e| map_io_error(e, full_path))?;

        let mut temp_file =
            NamedTempFile::new_in(&parent).map_err(|e| map_io_error(e, full_path))?;
        temp_file
            .write_all(data)
            .and_then(|_| temp_file.flush())
            .map_err(|e| map_io_error(e, full_path))?;

        // 失敗時 NamedTempFile 會在 drop 時自動刪除暫存檔
        temp_file
            .persist(full_path)
            .map_err(|e| map_io_error(e.error, full_path))?;

        Ok(())
    }
}

fn map_io_error(err: std::io::Error, path: &Path) -> ScraperError {
    if err.kind() == ErrorKind::PermissionDenied {
        ScraperError::PermissionDenied {
            path: path.display().to_string(),
        }
    } else {
        ScraperError::IoError(err)
    }
}

impl Storage for LocalStorage {
    async fn write_file(&self, path: &str, data: &[u8]) -> Result<String> {
        let full_path = self.base_path.join(path);
        self.write_atomic(&full_path, data)?;
        Ok(full_path.display().to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_creates_parent_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let written = storage
            .write_file("nested/out/products.csv", b"Title\nA\n")
            .await
            .unwrap();

        let full_path = temp_dir.path().join("nested/out/products.csv");
        assert_eq!(written, full_path.display().to_string());
        assert_eq!(fs::read(&full_path).unwrap(), b"Title\nA\n");
    }

    #[tokio::test]
    async fn test_write_replaces_existing_file_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());
        fs::write(temp_dir.path().join("products.csv"), b"old").unwrap();

        storage.write_file("products.csv", b"new").await.unwrap();

        assert_eq!(fs::read(temp_dir.path().join("products.csv")).unwrap(), b"new");
        let entries = fs::read_dir(temp_dir.path()).unwrap().count();
        assert_eq!(entries, 1);
    }

    #[tokio::test]
    async fn test_write_into_directory_path_fails() {
        let temp_dir = TempDir::new().unwrap();
        fs::create_dir(temp_dir.path().join("taken")).unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let result = storage.write_file("taken", b"data").await;

        assert!(result.is_err());
        assert!(temp_dir.path().join("taken").is_dir());
    }
}
