use std::path::{Path, PathBuf};
use std::sync::Arc;

use catalog_core::{dataset::io_error, parse_dataset, Dataset, DatasetError};

/// Handle to the on-disk dataset.
///
/// Every [`load`](Self::load) re-reads the file, so edits are visible to the
/// next request without a restart.
#[derive(Debug, Clone)]
pub struct CatalogSource {
    path: Arc<PathBuf>,
}

impl CatalogSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Arc::new(path.into()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub async fn load(&self) -> Result<Dataset, DatasetError> {
        let bytes = tokio::fs::read(self.path())
            .await
            .map_err(|e| io_error(self.path(), e))?;
        parse_dataset(&bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn load_reads_bundled_dataset() {
        let source = CatalogSource::new(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("../../data/products.json"),
        );
        let dataset = source.load().await.expect("load bundled dataset");
        assert!(dataset.products.iter().any(|p| p.id == 1001));
    }

    #[tokio::test]
    async fn load_missing_file_is_reported_as_missing() {
        let source = CatalogSource::new("/definitely/not/here/products.json");
        let err = source.load().await.unwrap_err();
        assert!(err.is_missing(), "got: {err:?}");
    }

    #[tokio::test]
    async fn load_malformed_file_is_reported_as_malformed() {
        let source = CatalogSource::new(
            Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/fixtures/malformed.json"),
        );
        let err = source.load().await.unwrap_err();
        assert!(matches!(err, DatasetError::Malformed(_)), "got: {err:?}");
    }
}
