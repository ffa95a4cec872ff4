//! Disk-backed storage for uploaded avatars.
//!
//! Uploads are first written to a temporary directory under a generated
//! name, then moved into the uploads directory once the owning user has
//! been updated. Both directories are opened as capability handles, so no
//! file name can escape them.

use std::io;
use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use cap_std::ambient_authority;
use cap_std::fs::Dir;
use tracing::debug;
use uuid::Uuid;

use crate::domain::ports::{StorageError, StorageProvider};

const MAX_NAME_LEN: usize = 100;

/// [`StorageProvider`] over a temporary and a permanent directory.
#[derive(Clone)]
pub struct DiskStorageProvider {
    tmp: Arc<Dir>,
    uploads: Arc<Dir>,
}

impl DiskStorageProvider {
    /// Open (creating when missing) the temporary and uploads directories.
    ///
    /// # Errors
    ///
    /// Returns [`StorageError::Io`] when either directory cannot be created
    /// or opened.
    pub fn open(tmp_dir: &Path, uploads_dir: &Path) -> Result<Self, StorageError> {
        Ok(Self {
            tmp: Arc::new(open_dir(tmp_dir)?),
            uploads: Arc::new(open_dir(uploads_dir)?),
        })
    }
}

fn open_dir(path: &Path) -> Result<Dir, StorageError> {
    Dir::create_ambient_dir_all(path, ambient_authority()).map_err(io_error)?;
    Dir::open_ambient_dir(path, ambient_authority()).map_err(io_error)
}

fn io_error(error: io::Error) -> StorageError {
    StorageError::io(error.to_string())
}

/// Accept only a single plain path component.
fn plain_name(name: &str) -> Result<&str, StorageError> {
    let plain = !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0']);
    if plain {
        Ok(name)
    } else {
        Err(StorageError::invalid_name(name))
    }
}

/// Reduce a client-supplied file name to a safe suffix.
fn sanitise_upload_name(original: &str) -> String {
    let base = original
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or_default()
        .trim();
    let cleaned: String = base
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || matches!(c, '.' | '-' | '_') {
                c
            } else {
                '_'
            }
        })
        .take(MAX_NAME_LEN)
        .collect();
    let cleaned = cleaned.trim_start_matches('.');
    if cleaned.is_empty() {
        "upload".to_owned()
    } else {
        cleaned.to_owned()
    }
}

async fn remove_if_present(dir: Arc<Dir>, name: String) -> Result<(), StorageError> {
    blocking(move || match dir.remove_file(&name) {
        Ok(()) => Ok(()),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(()),
        Err(err) => Err(io_error(err)),
    })
    .await
}

async fn blocking<T, F>(work: F) -> Result<T, StorageError>
where
    F: FnOnce() -> Result<T, StorageError> + Send + 'static,
    T: Send + 'static,
{
    tokio::task::spawn_blocking(work)
        .await
        .map_err(|err| StorageError::io(err.to_string()))?
}

#[async_trait]
impl StorageProvider for DiskStorageProvider {
    async fn stage_upload(
        &self,
        original_name: &str,
        bytes: Vec<u8>,
    ) -> Result<String, StorageError> {
        let name = format!(
            "{}-{}",
            Uuid::new_v4().simple(),
            sanitise_upload_name(original_name)
        );
        let tmp = Arc::clone(&self.tmp);
        let staged = name.clone();
        blocking(move || tmp.write(&staged, bytes).map_err(io_error)).await?;
        debug!(file = %name, "upload staged");
        Ok(name)
    }

    async fn save_file(&self, file: &str) -> Result<String, StorageError> {
        let name = plain_name(file)?.to_owned();
        let (tmp, uploads) = (Arc::clone(&self.tmp), Arc::clone(&self.uploads));
        let moved = name.clone();
        blocking(move || tmp.rename(&moved, &uploads, &moved).map_err(io_error)).await?;
        Ok(name)
    }

    async fn delete_file(&self, file: &str) -> Result<(), StorageError> {
        let name = plain_name(file)?.to_owned();
        remove_if_present(Arc::clone(&self.uploads), name).await
    }

    async fn discard_upload(&self, file: &str) -> Result<(), StorageError> {
        let name = plain_name(file)?.to_owned();
        remove_if_present(Arc::clone(&self.tmp), name).await?;
        debug!(file, "staged upload discarded");
        Ok(())
    }
}
