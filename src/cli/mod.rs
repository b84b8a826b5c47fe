//! Command-line surface: `setup`, `send`, `check`, `groups`.

mod check;
mod groups;
mod send;
mod setup;

use crate::artifact::PairingArtifact;
use crate::config::RunConfig;
use crate::session::SessionManager;
use crate::Result;
use clap::{Args, Parser, Subcommand};
use std::sync::Arc;

/// A command line interface to interact with WhatsApp.
#[derive(Parser, Debug)]
#[command(name = "zap", version, about = "WhatsApp CLI client")]
pub struct Cli {
    /// Enable verbose debugging
    #[arg(short, long, global = true)]
    pub debug: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Set up a WhatsApp connection using QR code
    Setup(SetupArgs),
    /// Send a WhatsApp message to a contact or group
    Send(SendArgs),
    /// Check if a phone number is on WhatsApp
    Check(CheckArgs),
    /// List all your WhatsApp groups
    Groups,
}

#[derive(Args, Debug)]
pub struct SetupArgs {
    /// Do not open the QR image with the platform viewer
    #[arg(long)]
    pub no_open: bool,
}

#[derive(Args, Debug)]
pub struct SendArgs {
    /// Recipient (phone number or group ID)
    #[arg(short = 't', long)]
    pub to: Option<String>,

    /// Message text to send
    #[arg(short = 'm', long = "msg")]
    pub msg: Option<String>,

    /// Seconds to wait for message confirmation (0 = do not wait)
    #[arg(short, long, default_value_t = 5)]
    pub wait: u64,

    /// Recipient, positionally
    #[arg(value_name = "RECIPIENT")]
    pub recipient_pos: Option<String>,

    /// Message, positionally
    #[arg(value_name = "MESSAGE")]
    pub message_pos: Option<String>,
}

impl SendArgs {
    /// Positional arguments fill flags the caller left unset, mirroring
    /// `send [recipient] [message]`.
    pub fn destination(&self) -> (Option<String>, Option<String>) {
        let mut to = self.to.clone();
        let mut msg = self.msg.clone();
        match (&self.recipient_pos, &self.message_pos) {
            (Some(a), Some(b)) if to.is_none() => {
                to = Some(a.clone());
                msg = Some(b.clone());
            }
            (Some(a), _) if msg.is_none() => msg = Some(a.clone()),
            _ => {}
        }
        (to, msg)
    }
}

#[derive(Args, Debug)]
pub struct CheckArgs {
    /// Phone number to check
    #[arg(short, long)]
    pub phone: Option<String>,

    /// Phone number, positionally
    #[arg(value_name = "PHONE")]
    pub phone_pos: Option<String>,
}

impl CheckArgs {
    pub fn number(&self) -> Option<String> {
        self.phone.clone().or_else(|| self.phone_pos.clone())
    }
}

/// Everything a command needs, wired once in `main`. Commands never read
/// global state.
pub struct AppContext {
    pub manager: SessionManager,
    pub artifact: Arc<dyn PairingArtifact>,
    pub config: RunConfig,
}

/// Run the selected subcommand to completion.
pub async fn run(command: Command, ctx: AppContext) -> Result<()> {
    match command {
        Command::Setup(args) => setup::run(&args, &ctx).await,
        Command::Send(args) => send::run(&args, &ctx).await,
        Command::Check(args) => check::run(&args, &ctx).await,
        Command::Groups => groups::run(&ctx).await,
    }
}
