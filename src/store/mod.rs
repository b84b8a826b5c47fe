//! Credential store: the device identity persisted across invocations.

mod file;
mod memory;

pub use file::FileStore;
pub use memory::MemoryStore;

use crate::types::Jid;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;

/// Device identity and key material for the one linked device.
///
/// Created once by [`CredentialStore::create_device`] when nothing is
/// stored, reused across every subsequent invocation, destroyed only by an
/// explicit wipe.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct Device {
    /// Our JID after pairing (None until the account accepts this device).
    pub id: Option<Jid>,
    /// Registration ID assigned at device creation.
    pub registration_id: u32,
    /// Identity key pair (opaque to this crate).
    pub identity_key_pub: Option<[u8; 32]>,
    pub identity_key_priv: Option<[u8; 32]>,
    /// Platform string reported by the phone during pairing.
    pub platform: Option<String>,
}

impl Device {
    /// Whether this identity is bound to an account.
    pub fn is_authenticated(&self) -> bool {
        self.id.is_some()
    }

    /// Fresh unauthenticated identity with new key material.
    pub fn generate() -> Self {
        Self {
            id: None,
            registration_id: rand::random::<u32>() & 0x3fff,
            identity_key_pub: Some(rand::random()),
            identity_key_priv: Some(rand::random()),
            platform: None,
        }
    }
}

/// Persist and load the single device identity.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    /// The stored device, if any.
    async fn load_device(&self) -> crate::Result<Option<Device>>;

    /// Create (and persist) a fresh unauthenticated device.
    async fn create_device(&self) -> crate::Result<Device>;

    /// Save device state (after pairing or key changes).
    async fn save(&self, device: &Device) -> crate::Result<()>;

    /// Remove the stored identity entirely.
    async fn wipe(&self) -> crate::Result<()>;
}

/// Alias for a shared store handle (common usage).
pub type Store = Arc<dyn CredentialStore>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_device_is_unauthenticated() {
        let dev = Device::generate();
        assert!(!dev.is_authenticated());
        assert!(dev.identity_key_pub.is_some());
        assert!(dev.identity_key_priv.is_some());
        assert!(dev.registration_id <= 0x3fff);
    }

    #[test]
    fn device_with_id_is_authenticated() {
        let mut dev = Device::generate();
        dev.id = Some(Jid::new("123", crate::types::DEFAULT_USER_SERVER));
        assert!(dev.is_authenticated());
    }
}
