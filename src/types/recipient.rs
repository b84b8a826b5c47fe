//! Canonical destination for one outbound message.

use std::fmt;

use super::jid::{Jid, DEFAULT_USER_SERVER, GROUP_SERVER};

/// A resolved message destination.
///
/// The domain is pinned per kind: individuals always live on
/// `s.whatsapp.net`, groups on `g.us`. Constructed fresh per send
/// operation; never persisted.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Recipient {
    Individual(Jid),
    Group(Jid),
}

impl Recipient {
    /// Individual recipient from a normalized (digits-only) local part.
    pub fn individual(local: impl Into<String>) -> Self {
        Self::Individual(Jid::new(local, DEFAULT_USER_SERVER))
    }

    /// Group recipient from a group-local part, taken unchanged.
    pub fn group(local: impl Into<String>) -> Self {
        Self::Group(Jid::new(local, GROUP_SERVER))
    }

    /// Individual recipient from a canonical JID returned by the directory.
    /// The directory form is authoritative over locally guessed digits.
    pub fn from_canonical(jid: Jid) -> Self {
        Self::Individual(jid)
    }

    pub fn jid(&self) -> &Jid {
        match self {
            Self::Individual(jid) | Self::Group(jid) => jid,
        }
    }

    pub fn is_group(&self) -> bool {
        matches!(self, Self::Group(_))
    }
}

impl fmt::Display for Recipient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.jid())
    }
}
