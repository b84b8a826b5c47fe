//! Session lifecycle: from "credentials on disk" to a connected,
//! authenticated session.

use crate::artifact::PairingArtifact;
use crate::client::{PairingEvent, ProtocolClient};
use crate::error::PairingError;
use crate::store::{CredentialStore, Device, Store};
use crate::{Error, Result};
use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::watch;
use tracing::{debug, info, warn};

/// Lifecycle state of the single per-process session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    Unauthenticated,
    PairingInProgress,
    Authenticated,
    Connected,
    Disconnected,
}

/// One device identity bound to a live connection.
pub struct Session {
    client: Arc<dyn ProtocolClient>,
    device: Device,
    state: SessionState,
}

impl Session {
    pub fn state(&self) -> SessionState {
        self.state
    }

    pub fn device(&self) -> &Device {
        &self.device
    }

    pub fn client(&self) -> &Arc<dyn ProtocolClient> {
        &self.client
    }

    /// Readiness predicate for commands that need a usable session.
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Connected
    }
}

impl fmt::Debug for Session {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Session")
            .field("state", &self.state)
            .field("device", &self.device)
            .finish_non_exhaustive()
    }
}

/// Owns the session lifecycle: loading or creating the device identity,
/// connecting, driving the pairing event stream, and tearing down.
pub struct SessionManager {
    store: Store,
    client: Arc<dyn ProtocolClient>,
    artifact: Arc<dyn PairingArtifact>,
    shutdown: watch::Receiver<bool>,
    torn_down: AtomicBool,
}

impl SessionManager {
    pub fn new(
        store: Store,
        client: Arc<dyn ProtocolClient>,
        artifact: Arc<dyn PairingArtifact>,
        shutdown: watch::Receiver<bool>,
    ) -> Self {
        Self {
            store,
            client,
            artifact,
            shutdown,
            torn_down: AtomicBool::new(false),
        }
    }

    /// Bring the process to a connected, authenticated session.
    ///
    /// With `require_existing`, a missing device identity is fatal
    /// ([`Error::NoSession`]) and no connection attempt is made. Otherwise
    /// the pairing flow always runs, even over an authenticated identity
    /// (re-pairing), until a terminal event or an interruption signal.
    pub async fn ensure_session(&self, require_existing: bool) -> Result<Session> {
        let device = match self.store.load_device().await? {
            Some(device) => device,
            None if require_existing => return Err(Error::NoSession),
            None => {
                debug!("no stored device identity, creating a fresh one");
                self.store.create_device().await?
            }
        };

        if !require_existing && device.is_authenticated() {
            warn!("already set up; scanning a new QR code will re-authenticate this device");
        }

        // Connection failure is fatal and surfaced verbatim; this is a
        // one-shot CLI, not a daemon.
        self.client.connect().await?;

        if require_existing && device.is_authenticated() {
            return Ok(Session {
                client: Arc::clone(&self.client),
                device,
                state: SessionState::Connected,
            });
        }

        self.pair(device).await
    }

    /// Consume the pairing event stream until a terminal event arrives or a
    /// shutdown is requested. The pairing artifact is cleaned up on every
    /// exit path.
    async fn pair(&self, device: Device) -> Result<Session> {
        let mut events = self.client.pairing_events().await?;
        let mut shutdown = self.shutdown.clone();
        if *shutdown.borrow_and_update() {
            // The signal arrived before the loop started; don't present a code.
            self.teardown().await;
            return Err(Error::Interrupted);
        }
        info!("pairing in progress; waiting for the phone to scan the code");

        let outcome = loop {
            tokio::select! {
                evt = events.recv() => match evt {
                    Some(PairingEvent::CodePresented(code)) => {
                        // Codes repeat on expiry; each render replaces the
                        // previous artifact.
                        match self.artifact.render(&code) {
                            Ok(path) if !path.as_os_str().is_empty() => {
                                info!(path = %path.display(), "QR code written; scan it with the phone");
                            }
                            Ok(_) => {}
                            Err(e) => {
                                warn!(error = %e, "could not render the pairing code");
                            }
                        }
                        println!("Pairing code (scan or paste into a QR generator): {code}");
                    }
                    Some(PairingEvent::AuthenticationSucceeded) => break Ok(()),
                    Some(PairingEvent::AuthenticationFailed(reason)) => {
                        break Err(Error::Pairing(PairingError::AuthenticationFailed(reason)));
                    }
                    None => break Err(Error::Pairing(PairingError::StreamClosed)),
                },
                _ = shutdown.changed() => break Err(Error::Interrupted),
            }
        };

        self.artifact.cleanup();

        match outcome {
            Ok(()) => {
                // The engine persisted the authenticated identity; pick it up.
                let device = match self.store.load_device().await {
                    Ok(stored) => stored.unwrap_or(device),
                    Err(err) => {
                        self.teardown().await;
                        return Err(err);
                    }
                };
                info!("authentication successful");
                Ok(Session {
                    client: Arc::clone(&self.client),
                    device,
                    state: SessionState::Connected,
                })
            }
            Err(err) => {
                self.teardown().await;
                Err(err)
            }
        }
    }

    /// Disconnect and remove any pairing artifact. Runs at most once no
    /// matter how many paths request it.
    pub async fn teardown(&self) {
        if self.torn_down.swap(true, Ordering::SeqCst) {
            return;
        }
        if let Err(e) = self.client.disconnect().await {
            warn!(error = %e, "disconnect failed during teardown");
        }
        self.artifact.cleanup();
    }
}
