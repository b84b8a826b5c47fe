//! `zap groups`: list the groups the account is a member of.

use super::AppContext;
use crate::client::ProtocolClient;
use crate::Result;

pub async fn run(ctx: &AppContext) -> Result<()> {
    println!("Connecting to WhatsApp...");
    let session = ctx.manager.ensure_session(true).await?;

    let groups = match session.client().list_groups().await {
        Ok(groups) => groups,
        Err(e) => {
            ctx.manager.teardown().await;
            return Err(e);
        }
    };

    if groups.is_empty() {
        println!("You are not a member of any groups");
    } else {
        println!();
        println!("===== YOUR WHATSAPP GROUPS =====");
        println!("Count: {}", groups.len());
        println!("----------------------------------");
        for (i, group) in groups.iter().enumerate() {
            println!("{}. Group Name: {}", i + 1, group.name);
            println!("   Group ID: {}", group.jid);
            println!("   Member Count: {}", group.member_count);
            println!("----------------------------------");
        }
        println!();
        println!("To send a message to a group, use:");
        println!("zap send -t \"GROUP_ID\" -m \"Hello group!\"");
        if let Some(first) = groups.first() {
            println!();
            println!("Example:");
            println!("zap send -t \"{}\" -m \"Hello group!\"", first.jid);
        }
    }

    ctx.manager.teardown().await;
    Ok(())
}
