//! Protocol capability boundary.
//!
//! Everything the session core needs from the messaging engine is behind
//! [`ProtocolClient`]: connecting, the directory lookup, group listing,
//! sending, and the pairing event stream. The wire protocol itself
//! (handshake, encryption, node encoding) lives behind this trait and is
//! not owned by this crate.

mod engine;

pub use engine::EngineClient;

use crate::types::{Jid, MessageId};
use async_trait::async_trait;
use std::time::SystemTime;
use tokio::sync::mpsc;

/// One event from the pairing flow. Produced in order while a QR cycle is
/// active; consumed exactly once each by the session manager.
#[derive(Clone, Debug)]
pub enum PairingEvent {
    /// A fresh pairing code. Repeats when the previous code expires.
    CodePresented(String),
    /// The code was scanned and the account accepted this device.
    AuthenticationSucceeded,
    /// The server rejected the pairing attempt.
    AuthenticationFailed(String),
}

/// Server acknowledgement for one sent message, surfaced verbatim.
#[derive(Clone, Debug)]
pub struct SendAck {
    pub id: MessageId,
    pub timestamp: SystemTime,
    pub server_id: Option<i32>,
}

impl std::fmt::Display for SendAck {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self.server_id {
            Some(sid) => write!(f, "id={} server_id={}", self.id, sid),
            None => write!(f, "id={}", self.id),
        }
    }
}

/// Directory answer for one queried identifier.
#[derive(Clone, Debug)]
pub struct RegistrationStatus {
    /// The identifier as queried.
    pub query: String,
    pub registered: bool,
    /// Canonical identity per the directory; authoritative over the query.
    pub jid: Option<Jid>,
}

/// One group the account is a member of.
#[derive(Clone, Debug)]
pub struct GroupInfo {
    pub jid: Jid,
    pub name: String,
    pub member_count: usize,
}

/// The messaging engine as seen by the session core.
#[async_trait]
pub trait ProtocolClient: Send + Sync {
    /// Open the connection. Not retried; failures surface verbatim.
    async fn connect(&self) -> crate::Result<()>;

    /// Tear the connection down. Safe to call when already disconnected.
    async fn disconnect(&self) -> crate::Result<()>;

    /// Check which of the given identifiers are registered accounts.
    async fn is_registered(&self, queries: &[String]) -> crate::Result<Vec<RegistrationStatus>>;

    /// Groups the authenticated account is a member of.
    async fn list_groups(&self) -> crate::Result<Vec<GroupInfo>>;

    /// Send one text message and wait for the server ack.
    async fn send_message(&self, to: &Jid, body: &str) -> crate::Result<SendAck>;

    /// Subscribe to pairing events. The stream stays open until a terminal
    /// event (`AuthenticationSucceeded` / `AuthenticationFailed`) or the
    /// engine drops the sender.
    async fn pairing_events(&self) -> crate::Result<mpsc::UnboundedReceiver<PairingEvent>>;

    /// Our own JID once authenticated.
    async fn own_id(&self) -> Option<Jid>;
}
