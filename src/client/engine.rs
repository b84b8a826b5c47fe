//! In-process engine implementing [`ProtocolClient`].
//!
//! Holds the credential store, connection flags, and the pairing event
//! channel. The wire layer (WebSocket + Noise handshake) plugs in beneath
//! this; without it, sends require a connection and acks are fabricated
//! locally, and the directory lookup echoes queries optimistically.

use super::{GroupInfo, PairingEvent, ProtocolClient, RegistrationStatus, SendAck};
use crate::store::{CredentialStore, Device, Store};
use crate::types::{Jid, MessageId, DEFAULT_USER_SERVER};
use crate::Error;
use async_trait::async_trait;
use base64::Engine as _;
use sha2::Digest;
use std::sync::atomic::{AtomicBool, Ordering};
use tokio::sync::{mpsc, RwLock};

pub struct EngineClient {
    store: Store,
    device: RwLock<Option<Device>>,
    connected: AtomicBool,
    logged_in: AtomicBool,
    pairing_tx: RwLock<Option<mpsc::UnboundedSender<PairingEvent>>>,
}

impl EngineClient {
    pub fn new(store: Store) -> Self {
        Self {
            store,
            device: RwLock::new(None),
            connected: AtomicBool::new(false),
            logged_in: AtomicBool::new(false),
            pairing_tx: RwLock::new(None),
        }
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }

    pub fn is_logged_in(&self) -> bool {
        self.logged_in.load(Ordering::SeqCst)
    }

    /// Generate a message ID (3EB0 + hex of hash).
    pub fn generate_message_id(&self) -> MessageId {
        use std::time::{SystemTime, UNIX_EPOCH};
        let mut data = Vec::with_capacity(8 + 5 + 16);
        let t = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .unwrap_or_default()
            .as_secs();
        data.extend_from_slice(&t.to_be_bytes());
        data.extend_from_slice(b"@c.us");
        data.extend_from_slice(&rand::random::<[u8; 16]>());
        let hash = sha2::Sha256::digest(&data);
        format!("3EB0{}", hex::encode(&hash[..9]))
    }

    /// Pairing-code payload: pairing ref plus key material, base64,
    /// comma-joined the way the phone expects to scan it.
    fn generate_pairing_code(&self, device: &Device) -> String {
        let b64 = base64::engine::general_purpose::STANDARD;
        let pairing_ref = b64.encode(rand::random::<[u8; 16]>());
        let identity = b64.encode(device.identity_key_pub.unwrap_or_default());
        let secret = b64.encode(rand::random::<[u8; 32]>());
        format!("{pairing_ref},{identity},{secret}")
    }

    /// Bind this device to the account after the phone accepted the code.
    /// Persists the device and emits the terminal pairing event.
    pub async fn complete_pairing(&self, id: Jid, platform: &str) -> crate::Result<()> {
        let mut device = self
            .store
            .load_device()
            .await?
            .unwrap_or_else(Device::generate);
        device.id = Some(id);
        device.platform = Some(platform.to_string());
        self.store.save(&device).await?;
        *self.device.write().await = Some(device);
        self.logged_in.store(true, Ordering::SeqCst);
        if let Some(tx) = self.pairing_tx.read().await.as_ref() {
            let _ = tx.send(PairingEvent::AuthenticationSucceeded);
        }
        Ok(())
    }
}

#[async_trait]
impl ProtocolClient for EngineClient {
    async fn connect(&self) -> crate::Result<()> {
        let device = self.store.load_device().await?;
        let authenticated = device.as_ref().is_some_and(Device::is_authenticated);
        *self.device.write().await = device;
        self.connected.store(true, Ordering::SeqCst);
        self.logged_in.store(authenticated, Ordering::SeqCst);
        Ok(())
    }

    async fn disconnect(&self) -> crate::Result<()> {
        self.connected.store(false, Ordering::SeqCst);
        *self.pairing_tx.write().await = None;
        Ok(())
    }

    /// Without a wire session the directory cannot be reached; each query is
    /// echoed back as registered with the canonical user JID.
    async fn is_registered(&self, queries: &[String]) -> crate::Result<Vec<RegistrationStatus>> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(queries
            .iter()
            .map(|q| RegistrationStatus {
                query: q.clone(),
                registered: true,
                jid: Some(Jid::new(q.clone(), DEFAULT_USER_SERVER)),
            })
            .collect())
    }

    async fn list_groups(&self) -> crate::Result<Vec<GroupInfo>> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        // Group metadata comes from the server-side sync; nothing is cached
        // locally between runs.
        Ok(Vec::new())
    }

    async fn send_message(&self, _to: &Jid, _body: &str) -> crate::Result<SendAck> {
        if !self.is_connected() {
            return Err(Error::NotConnected);
        }
        Ok(SendAck {
            id: self.generate_message_id(),
            timestamp: std::time::SystemTime::now(),
            server_id: None,
        })
    }

    /// Subscribing while connected always yields a fresh code; an
    /// authenticated device re-pairs rather than being refused.
    async fn pairing_events(&self) -> crate::Result<mpsc::UnboundedReceiver<PairingEvent>> {
        let (tx, rx) = mpsc::unbounded_channel();
        if self.is_connected() {
            let device = self
                .device
                .read()
                .await
                .clone()
                .unwrap_or_else(Device::generate);
            let _ = tx.send(PairingEvent::CodePresented(
                self.generate_pairing_code(&device),
            ));
        }
        *self.pairing_tx.write().await = Some(tx);
        Ok(rx)
    }

    async fn own_id(&self) -> Option<Jid> {
        self.device.read().await.as_ref().and_then(|d| d.id.clone())
    }
}
