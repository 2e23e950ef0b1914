use crate::domain::ports::Storage;
use crate::utils::error::Result;
use std::path::{Path, PathBuf};

/// 以本機目錄為根的檔案輸出
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

    pub fn base_path(&self) -> &Path {
        &self.base_path
    }
}

impl Storage for LocalStorage {
    async fn read_file(&self, path: &str) -> Result<Vec<u8>> {
        let full_path = self.base_path.join(path);
        let data = tokio::fs::read(full_path).await?;
        Ok(data)
    }

    async fn write_file(&self, path: &str, data: &[u8]) -> Result<()> {
        let full_path = self.base_path.join(path);

        if let Some(parent) = full_path.parent() {
            tokio::fs::create_dir_all(parent).await?;
        }

        // 整個檔案覆寫，不做附加
        tokio::fs::write(&full_path, data).await?;
        tracing::debug!("Wrote {} bytes to {}", data.len(), full_path.display());
        Ok(())
    }

    fn display_path(&self, path: &str) -> String {
        self.base_path.join(path).display().to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_then_read_creates_directories() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path().join("out"));

        storage.write_file("data.json", b"first\n").await.unwrap();
        storage.write_file("data.json", b"second\n").await.unwrap();

        let data = storage.read_file("data.json").await.unwrap();
        assert_eq!(data, b"second\n");
    }

    #[tokio::test]
    async fn test_read_missing_file_is_io_error() {
        let temp_dir = TempDir::new().unwrap();
        let storage = LocalStorage::new(temp_dir.path());

        let err = storage.read_file("missing.json").await.unwrap_err();
        assert!(matches!(err, crate::utils::error::EtlError::IoError(_)));
    }

    #[test]
    fn test_display_path_joins_base() {
        let storage = LocalStorage::new("/var/lib/countries");
        assert_eq!(
            storage.display_path("data.json"),
            Path::new("/var/lib/countries").join("data.json").display().to_string()
        );
    }
}
