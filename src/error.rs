use thiserror::Error;

/// Crate result type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while driving a session or sending a message.
#[derive(Error, Debug)]
pub enum Error {
    #[error("no session found; run `zap setup` first")]
    NoSession,

    #[error("connection: {0}")]
    Connection(#[from] ConnectionError),

    #[error("pairing: {0}")]
    Pairing(#[from] PairingError),

    #[error("resolve: {0}")]
    Resolve(#[from] ResolveError),

    #[error("store: {0}")]
    Store(#[from] StoreError),

    #[error("send: {0}")]
    Send(#[from] SendError),

    #[error("not connected")]
    NotConnected,

    #[error("interrupted")]
    Interrupted,

    #[error("{0}")]
    Other(#[from] anyhow::Error),
}

/// Connection-related errors. Surfaced verbatim; connecting is never retried.
#[derive(Error, Debug)]
pub enum ConnectionError {
    #[error("transport: {0}")]
    Transport(String),

    #[error("timeout")]
    Timeout,

    #[error("disconnected")]
    Disconnected,
}

/// Pairing-related errors. Any of these ends the setup flow.
#[derive(Error, Debug)]
pub enum PairingError {
    #[error("authentication failed: {0}")]
    AuthenticationFailed(String),

    #[error("pairing event stream closed before a terminal event")]
    StreamClosed,
}

/// Recipient resolution errors. All fatal before any message is dispatched.
#[derive(Error, Debug)]
pub enum ResolveError {
    #[error("invalid group ID format, should be 'number@g.us': {0:?}")]
    MalformedGroupId(String),

    #[error("recipient is empty after normalization")]
    EmptyRecipient,

    #[error("phone number {0} not found on WhatsApp")]
    NotRegistered(String),
}

/// Credential store errors.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("save failed: {0}")]
    Save(String),

    #[error("load failed: {0}")]
    Load(String),
}

/// Send errors reported by the protocol engine.
#[derive(Error, Debug)]
pub enum SendError {
    #[error("timeout waiting for server ack")]
    Timeout,

    #[error("server error: {0}")]
    Server(String),
}
