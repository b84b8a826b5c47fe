use super::{CredentialStore, Device};
use crate::Result;
use async_trait::async_trait;
use std::sync::RwLock;

/// In-memory credential store (for testing or single-run use; not persistent).
pub struct MemoryStore {
    device: RwLock<Option<Device>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self {
            device: RwLock::new(None),
        }
    }

    /// Store seeded with an existing device.
    pub fn with_device(device: Device) -> Self {
        Self {
            device: RwLock::new(Some(device)),
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl CredentialStore for MemoryStore {
    async fn load_device(&self) -> Result<Option<Device>> {
        Ok(self
            .device
            .read()
            .unwrap_or_else(|e| e.into_inner())
            .clone())
    }

    async fn create_device(&self) -> Result<Device> {
        let device = Device::generate();
        self.save(&device).await?;
        Ok(device)
    }

    async fn save(&self, device: &Device) -> Result<()> {
        *self.device.write().unwrap_or_else(|e| e.into_inner()) = Some(device.clone());
        Ok(())
    }

    async fn wipe(&self) -> Result<()> {
        *self.device.write().unwrap_or_else(|e| e.into_inner()) = None;
        Ok(())
    }
}
