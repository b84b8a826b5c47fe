//! # zap-cli
//!
//! Command-line WhatsApp-style messaging client: QR-code pairing, a
//! persisted single-device session, and outbound operations (send a
//! message, check a number, list groups).
//!
//! The crate is organized around one session per process:
//!
//! - [`store`]: the persisted device identity (credential store)
//! - [`session`]: lifecycle from stored credentials to a connected,
//!   authenticated [`session::Session`], including the pairing loop
//! - [`resolve`]: destination string -> canonical [`types::Recipient`]
//! - [`dispatch`]: one bounded-wait send attempt
//! - [`client`]: the protocol capability boundary ([`client::ProtocolClient`])
//!
//! ## Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use tokio::sync::watch;
//! use zapcli::artifact::NullArtifact;
//! use zapcli::client::EngineClient;
//! use zapcli::session::SessionManager;
//! use zapcli::store::{Device, MemoryStore};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     // A previously paired identity; a fresh one goes through `setup`.
//!     let mut device = Device::generate();
//!     device.id = Some("15550000001@s.whatsapp.net".parse()?);
//!     let store = Arc::new(MemoryStore::with_device(device));
//!     let client = Arc::new(EngineClient::new(store.clone()));
//!     let (_tx, rx) = watch::channel(false);
//!     let manager = SessionManager::new(store, client, Arc::new(NullArtifact), rx);
//!     let session = manager.ensure_session(true).await?;
//!     assert!(session.is_ready());
//!     Ok(())
//! }
//! ```

pub mod artifact;
pub mod cli;
pub mod client;
pub mod config;
pub mod dispatch;
pub mod error;
pub mod resolve;
pub mod session;
pub mod store;
pub mod types;

#[cfg(test)]
pub(crate) mod testutil;

pub use client::{EngineClient, PairingEvent, ProtocolClient, SendAck};
pub use dispatch::{dispatch, DispatchFailure, DispatchOutcome};
pub use error::{Error, Result};
pub use resolve::resolve;
pub use session::{Session, SessionManager, SessionState};
pub use store::{CredentialStore, Device, Store};
pub use types::{Jid, MessageId, Recipient};
