//! `zap setup`: QR-code pairing.

use super::{AppContext, SetupArgs};
use crate::client::ProtocolClient;
use crate::Result;

pub async fn run(_args: &SetupArgs, ctx: &AppContext) -> Result<()> {
    // A QR image from an earlier aborted run is stale; remove it before a
    // fresh code is rendered.
    ctx.artifact.cleanup();

    let session = ctx.manager.ensure_session(false).await?;

    println!("Authentication successful!");
    if let Some(id) = session.client().own_id().await {
        println!("Linked as: {id}");
    }
    println!("Setup complete! The session is now authenticated.");
    println!("You can now use zap commands to interact with WhatsApp.");

    ctx.manager.teardown().await;
    Ok(())
}
