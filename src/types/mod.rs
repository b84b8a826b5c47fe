//! Shared identity types.

mod jid;
mod recipient;

pub use jid::{Jid, JidParseError, DEFAULT_USER_SERVER, GROUP_SERVER, LEGACY_USER_SERVER};
pub use recipient::Recipient;

/// Message ID on the wire.
pub type MessageId = String;
