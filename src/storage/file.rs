//! JsonFileStorage - a single file on disk, rewritten through a sibling temp file.

use std::ffi::OsString;
use std::future::Future;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use tokio::fs;

use super::Storage;
use crate::error::StoreError;

/// File-backed storage.
///
/// Writes go to `<path>.tmp` first and are renamed over `path`, so a reader
/// never observes a half-written snapshot.
#[derive(Debug, Clone)]
pub struct JsonFileStorage {
    path: PathBuf,
}

impl JsonFileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = OsString::from(self.path.as_os_str());
        name.push(".tmp");
        PathBuf::from(name)
    }
}

impl Storage for JsonFileStorage {
    fn read(&self) -> impl Future<Output = Result<Option<Vec<u8>>, StoreError>> + Send {
        async move {
            match fs::read(&self.path).await {
                Ok(bytes) => Ok(Some(bytes)),
                Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
                Err(err) => Err(StoreError::io(&self.path, err)),
            }
        }
    }

    fn write(&self, bytes: Vec<u8>) -> impl Future<Output = Result<(), StoreError>> + Send {
        async move {
            let tmp_path = self.temp_path();

            fs::write(&tmp_path, bytes)
                .await
                .map_err(|err| StoreError::io(&tmp_path, err))?;

            if let Err(err) = fs::rename(&tmp_path, &self.path).await {
                let _ = fs::remove_file(&tmp_path).await;
                return Err(StoreError::io(&self.path, err));
            }
            Ok(())
        }
    }

    fn describe(&self) -> String {
        self.path.display().to_string()
    }
}
