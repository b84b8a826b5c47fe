//! Scriptable fakes shared by the unit tests.

use crate::artifact::PairingArtifact;
use crate::client::{GroupInfo, PairingEvent, ProtocolClient, RegistrationStatus, SendAck};
use crate::error::{ConnectionError, SendError};
use crate::types::{Jid, DEFAULT_USER_SERVER};
use crate::Error;
use async_trait::async_trait;
use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;
use tokio::sync::mpsc;

/// Protocol client with scripted responses and call counters.
#[derive(Default)]
pub struct MockClient {
    connect_calls: AtomicUsize,
    disconnect_calls: AtomicUsize,
    lookup_calls: AtomicUsize,
    send_calls: AtomicUsize,
    pairing_subs: AtomicUsize,

    connect_error: Option<String>,
    lookup_error: Option<String>,
    send_error: Option<String>,
    send_delay: Option<Duration>,

    registrations: Mutex<HashMap<String, RegistrationStatus>>,
    pairing_events: Mutex<Vec<PairingEvent>>,
    hold_stream: bool,
    held_senders: Mutex<Vec<mpsc::UnboundedSender<PairingEvent>>>,
    groups: Mutex<Vec<GroupInfo>>,
}

impl MockClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_pairing_events(self, events: Vec<PairingEvent>) -> Self {
        *self.pairing_events.lock().unwrap() = events;
        self
    }

    /// Keep the pairing stream open after the scripted events are drained.
    pub fn hold_pairing_stream_open(mut self) -> Self {
        self.hold_stream = true;
        self
    }

    pub fn fail_connect(mut self, reason: &str) -> Self {
        self.connect_error = Some(reason.to_string());
        self
    }

    pub fn fail_lookup(mut self, reason: &str) -> Self {
        self.lookup_error = Some(reason.to_string());
        self
    }

    pub fn fail_send(mut self, reason: &str) -> Self {
        self.send_error = Some(reason.to_string());
        self
    }

    pub fn delay_send(mut self, delay: Duration) -> Self {
        self.send_delay = Some(delay);
        self
    }

    pub fn registered(self, query: &str, jid: Jid) -> Self {
        self.registrations.lock().unwrap().insert(
            query.to_string(),
            RegistrationStatus {
                query: query.to_string(),
                registered: true,
                jid: Some(jid),
            },
        );
        self
    }

    pub fn unregistered(self, query: &str) -> Self {
        self.registrations.lock().unwrap().insert(
            query.to_string(),
            RegistrationStatus {
                query: query.to_string(),
                registered: false,
                jid: None,
            },
        );
        self
    }

    pub fn with_groups(self, groups: Vec<GroupInfo>) -> Self {
        *self.groups.lock().unwrap() = groups;
        self
    }

    pub fn connect_calls(&self) -> usize {
        self.connect_calls.load(Ordering::SeqCst)
    }

    pub fn disconnect_calls(&self) -> usize {
        self.disconnect_calls.load(Ordering::SeqCst)
    }

    pub fn lookup_calls(&self) -> usize {
        self.lookup_calls.load(Ordering::SeqCst)
    }

    pub fn send_calls(&self) -> usize {
        self.send_calls.load(Ordering::SeqCst)
    }

    pub fn pairing_subscriptions(&self) -> usize {
        self.pairing_subs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ProtocolClient for MockClient {
    async fn connect(&self) -> crate::Result<()> {
        self.connect_calls.fetch_add(1, Ordering::SeqCst);
        match &self.connect_error {
            Some(reason) => Err(Error::Connection(ConnectionError::Transport(reason.clone()))),
            None => Ok(()),
        }
    }

    async fn disconnect(&self) -> crate::Result<()> {
        self.disconnect_calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn is_registered(&self, queries: &[String]) -> crate::Result<Vec<RegistrationStatus>> {
        self.lookup_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(reason) = &self.lookup_error {
            return Err(Error::Connection(ConnectionError::Transport(reason.clone())));
        }
        let registrations = self.registrations.lock().unwrap();
        Ok(queries
            .iter()
            .map(|q| {
                registrations.get(q).cloned().unwrap_or(RegistrationStatus {
                    query: q.clone(),
                    registered: true,
                    jid: Some(Jid::new(q.clone(), DEFAULT_USER_SERVER)),
                })
            })
            .collect())
    }

    async fn list_groups(&self) -> crate::Result<Vec<GroupInfo>> {
        Ok(self.groups.lock().unwrap().clone())
    }

    async fn send_message(&self, _to: &Jid, _body: &str) -> crate::Result<SendAck> {
        let n = self.send_calls.fetch_add(1, Ordering::SeqCst);
        if let Some(delay) = self.send_delay {
            tokio::time::sleep(delay).await;
        }
        if let Some(reason) = &self.send_error {
            return Err(Error::Send(SendError::Server(reason.clone())));
        }
        Ok(SendAck {
            id: format!("3EB0{:016X}", n),
            timestamp: std::time::SystemTime::now(),
            server_id: None,
        })
    }

    async fn pairing_events(&self) -> crate::Result<mpsc::UnboundedReceiver<PairingEvent>> {
        self.pairing_subs.fetch_add(1, Ordering::SeqCst);
        let (tx, rx) = mpsc::unbounded_channel();
        for evt in self.pairing_events.lock().unwrap().drain(..) {
            let _ = tx.send(evt);
        }
        if self.hold_stream {
            self.held_senders.lock().unwrap().push(tx);
        }
        Ok(rx)
    }

    async fn own_id(&self) -> Option<Jid> {
        Some(Jid::new("15550000001", DEFAULT_USER_SERVER))
    }
}

/// Artifact renderer that records calls instead of touching the filesystem.
#[derive(Default)]
pub struct RecordingArtifact {
    rendered: Mutex<Vec<String>>,
    cleaned: AtomicBool,
}

impl RecordingArtifact {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rendered(&self) -> Vec<String> {
        self.rendered.lock().unwrap().clone()
    }

    pub fn cleaned_up(&self) -> bool {
        self.cleaned.load(Ordering::SeqCst)
    }
}

impl PairingArtifact for RecordingArtifact {
    fn render(&self, code: &str) -> anyhow::Result<PathBuf> {
        self.rendered.lock().unwrap().push(code.to_string());
        Ok(PathBuf::new())
    }

    fn cleanup(&self) {
        self.cleaned.store(true, Ordering::SeqCst);
    }
}
