//! `zap send`: resolve a destination and dispatch one message.

use super::{AppContext, SendArgs};
use crate::client::ProtocolClient;
use crate::dispatch::{dispatch, DispatchOutcome};
use crate::resolve::resolve;
use crate::{Error, Result};
use anyhow::anyhow;
use std::sync::Arc;
use tracing::debug;

pub async fn run(args: &SendArgs, ctx: &AppContext) -> Result<()> {
    let (to, msg) = args.destination();
    let (to, msg) = match (to, msg) {
        (Some(to), Some(msg)) => (to, msg),
        _ => {
            return Err(Error::Other(anyhow!(
                "recipient and message are required; see `zap send --help`"
            )))
        }
    };

    let session = ctx.manager.ensure_session(true).await?;
    if let Some(own) = session.client().own_id().await {
        debug!(%own, "connected");
    }

    let recipient = match resolve(&to, session.client().as_ref()).await {
        Ok(recipient) => recipient,
        Err(e) => {
            ctx.manager.teardown().await;
            return Err(e);
        }
    };

    println!("Sending message to {recipient}...");
    let outcome = dispatch(
        Arc::clone(session.client()),
        &recipient,
        &msg,
        ctx.config.wait,
    )
    .await;
    ctx.manager.teardown().await;

    match outcome {
        DispatchOutcome::Delivered(Some(ack)) => {
            println!("Message sent successfully to {recipient}, server response: {ack}");
            Ok(())
        }
        DispatchOutcome::Delivered(None) => {
            println!("Message handed to the transport (confirmation not requested).");
            Ok(())
        }
        DispatchOutcome::Failed(failure) => {
            Err(Error::Other(anyhow!("error sending message: {failure}")))
        }
    }
}
