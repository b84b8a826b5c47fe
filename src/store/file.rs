use super::{CredentialStore, Device};
use crate::error::StoreError;
use crate::Result;
use async_trait::async_trait;
use std::path::PathBuf;
use tokio::fs;

/// JSON-file credential store under the data directory.
///
/// One account per process means one document; a database would be a
/// heavier hammer than the job needs.
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &PathBuf {
        &self.path
    }
}

#[async_trait]
impl CredentialStore for FileStore {
    async fn load_device(&self) -> Result<Option<Device>> {
        let raw = match fs::read(&self.path).await {
            Ok(raw) => raw,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(StoreError::Load(e.to_string()).into()),
        };
        let device =
            serde_json::from_slice(&raw).map_err(|e| StoreError::Load(e.to_string()))?;
        Ok(Some(device))
    }

    async fn create_device(&self) -> Result<Device> {
        let device = Device::generate();
        self.save(&device).await?;
        Ok(device)
    }

    async fn save(&self, device: &Device) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| StoreError::Save(e.to_string()))?;
        }
        let raw = serde_json::to_vec_pretty(device).map_err(|e| StoreError::Save(e.to_string()))?;
        fs::write(&self.path, raw)
            .await
            .map_err(|e| StoreError::Save(e.to_string()))?;
        Ok(())
    }

    async fn wipe(&self) -> Result<()> {
        match fs::remove_file(&self.path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StoreError::Save(e.to_string()).into()),
        }
    }
}
