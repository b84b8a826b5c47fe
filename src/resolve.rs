//! Recipient resolution: one user-supplied destination string to exactly
//! one canonical [`Recipient`], or a clear failure.

use crate::client::ProtocolClient;
use crate::error::ResolveError;
use crate::types::{Recipient, GROUP_SERVER};
use crate::Result;
use tracing::{debug, warn};

/// Resolve a raw destination into a canonical recipient identity.
///
/// Group IDs are validated syntactically only; the directory API cannot
/// verify them. Individual numbers are normalized (whitespace trimmed, one
/// leading `+` stripped) and checked against the directory, whose canonical
/// JID wins over the locally constructed one. A failed lookup is a warning,
/// not an error: the recipient is constructed speculatively and the send
/// may still succeed or fail downstream.
pub async fn resolve(raw: &str, client: &dyn ProtocolClient) -> Result<Recipient> {
    // The group marker includes the separator; a bare "g.us" substring is
    // just digits-and-letters input and goes down the individual path.
    let group_marker = format!("@{GROUP_SERVER}");
    if raw.contains(&group_marker) {
        return resolve_group(raw);
    }

    let number = normalize_number(raw);
    let number = number.as_str();
    if number.is_empty() {
        return Err(ResolveError::EmptyRecipient.into());
    }

    match client.is_registered(&[number.to_string()]).await {
        Err(e) => {
            warn!(number, error = %e,
                "could not check whether the number is registered; constructing the JID anyway");
            Ok(Recipient::individual(number))
        }
        Ok(results) => match results.into_iter().next() {
            Some(status) if status.registered => {
                // The directory's canonical form is authoritative; number
                // migration can change the local part.
                let recipient = match status.jid {
                    Some(jid) => Recipient::from_canonical(jid),
                    None => Recipient::individual(number),
                };
                debug!(%recipient, "directory confirmed recipient");
                Ok(recipient)
            }
            _ => Err(ResolveError::NotRegistered(number.to_string()).into()),
        },
    }
}

/// Trim surrounding whitespace and strip a single leading `+`.
pub fn normalize_number(raw: &str) -> String {
    let number = raw.trim();
    number.strip_prefix('+').unwrap_or(number).to_string()
}

fn resolve_group(raw: &str) -> Result<Recipient> {
    if raw.matches('@').count() != 1 {
        return Err(ResolveError::MalformedGroupId(raw.to_string()).into());
    }
    let (local, _server) = raw
        .split_once('@')
        .ok_or_else(|| ResolveError::MalformedGroupId(raw.to_string()))?;
    if local.is_empty() {
        return Err(ResolveError::MalformedGroupId(raw.to_string()).into());
    }
    // The local part is taken unchanged; groups get no normalization.
    Ok(Recipient::group(local))
}
