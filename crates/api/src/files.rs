//! Article file storage.
//!
//! [`FileStore`] abstracts where uploaded binaries live; metadata always
//! lives in the `article_files` table. The default [`DiskFileStore`]
//! writes binaries under `{files_dir}/{article_id}/{file_id}`.

use std::path::PathBuf;

use async_trait::async_trait;
use folio_core::types::DbId;
use folio_db::repositories::ArticleFileRepo;
use folio_db::DbPool;

use crate::error::{AppError, AppResult};
use crate::forms::FileUpload;

/// Storage provider for uploaded article files.
#[async_trait]
pub trait FileStore: Send + Sync {
    /// Register and store an uploaded file, returning the new file id.
    async fn store(&self, pool: &DbPool, article_id: DbId, upload: &FileUpload) -> AppResult<DbId>;

    /// Delete a stored file: the metadata row first, then the binary.
    ///
    /// The two deletes are not transactional; a crash in between leaves
    /// an orphaned binary, which is accepted.
    async fn delete(&self, pool: &DbPool, article_id: DbId, file_id: DbId) -> AppResult<()>;
}

/// Local-filesystem file store.
pub struct DiskFileStore {
    root: PathBuf,
}

impl DiskFileStore {
    pub fn new(root: PathBuf) -> Self {
        Self { root }
    }

    fn path_for(&self, article_id: DbId, file_id: DbId) -> PathBuf {
        self.root.join(article_id.to_string()).join(file_id.to_string())
    }
}

#[async_trait]
impl FileStore for DiskFileStore {
    async fn store(&self, pool: &DbPool, article_id: DbId, upload: &FileUpload) -> AppResult<DbId> {
        let file_id = ArticleFileRepo::create(
            pool,
            article_id,
            &upload.file_name,
            &upload.content_type,
            upload.data.len() as i64,
        )
        .await?;

        let path = self.path_for(article_id, file_id);
        if let Some(dir) = path.parent() {
            tokio::fs::create_dir_all(dir)
                .await
                .map_err(|e| AppError::InternalError(format!("Failed to create file dir: {e}")))?;
        }
        tokio::fs::write(&path, upload.data.as_bytes())
            .await
            .map_err(|e| AppError::InternalError(format!("Failed to write file: {e}")))?;

        tracing::info!(article_id, file_id, file_name = %upload.file_name, "Stored article file");
        Ok(file_id)
    }

    async fn delete(&self, pool: &DbPool, article_id: DbId, file_id: DbId) -> AppResult<()> {
        ArticleFileRepo::delete(pool, file_id).await?;

        // Binary removal comes second; a missing binary is not an error.
        let path = self.path_for(article_id, file_id);
        if let Err(e) = tokio::fs::remove_file(&path).await {
            if e.kind() != std::io::ErrorKind::NotFound {
                tracing::warn!(article_id, file_id, error = %e, "Failed to remove stored binary");
            }
        }
        Ok(())
    }
}
