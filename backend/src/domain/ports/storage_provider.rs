//! Port for user-uploaded file storage.
use async_trait::async_trait;

use super::define_port_error;

define_port_error! {
    /// Errors raised by storage providers.
    pub enum StorageError {
        /// The file could not be moved, written or removed.
        Io { message: String } => "storage operation failed: {message}",
        /// The file name is not a plain file name.
        InvalidName { name: String } => "invalid stored file name: {name}",
    }
}

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageProvider: Send + Sync {
    /// Write an uploaded payload to temporary storage and return the
    /// generated temporary file name.
    async fn stage_upload(&self, original_name: &str, bytes: Vec<u8>)
    -> Result<String, StorageError>;

    /// Promote an uploaded temporary file to permanent storage.
    async fn save_file(&self, file: &str) -> Result<String, StorageError>;

    /// Remove a stored file; removing a missing file succeeds.
    async fn delete_file(&self, file: &str) -> Result<(), StorageError>;

    /// Drop a staged upload that was never promoted; a missing file succeeds.
    async fn discard_upload(&self, file: &str) -> Result<(), StorageError>;
}
