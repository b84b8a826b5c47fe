//! `zap check`: directory diagnostics for one phone number.

use super::{AppContext, CheckArgs};
use crate::client::ProtocolClient;
use crate::resolve::normalize_number;
use crate::types::{Jid, DEFAULT_USER_SERVER};
use crate::{Error, Result};
use anyhow::anyhow;

pub async fn run(args: &CheckArgs, ctx: &AppContext) -> Result<()> {
    let phone = args
        .number()
        .ok_or_else(|| Error::Other(anyhow!("a phone number is required; see `zap check --help`")))?;

    println!("Connecting to WhatsApp...");
    let session = ctx.manager.ensure_session(true).await?;

    if let Some(own) = session.client().own_id().await {
        println!("Connected as: {own}");
        println!("Your phone number: {}", own.user);
    }

    let number = normalize_number(&phone);
    println!();
    println!("Checking phone number: {phone}");
    println!("JID for this number: {}", Jid::new(number.clone(), DEFAULT_USER_SERVER));

    // A lookup failure here is diagnostic output, not a command failure.
    match session.client().is_registered(&[number]).await {
        Err(e) => println!("Error checking if user exists: {e}"),
        Ok(results) => {
            for status in results {
                if status.registered {
                    let jid = status
                        .jid
                        .map(|j| j.to_string())
                        .unwrap_or_else(|| "unknown".into());
                    println!("{} is on WhatsApp (JID: {jid})", status.query);
                } else {
                    println!("{} is NOT on WhatsApp", status.query);
                }
            }
        }
    }

    println!();
    println!("Connection details:");
    println!("Session ready: {}", session.is_ready());
    println!();
    println!("Diagnostic complete.");

    ctx.manager.teardown().await;
    Ok(())
}
