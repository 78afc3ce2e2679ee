use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::pluralize;

pub async fn run(client: &Client, event_id: &str, address: &str) -> Result<()> {
    let cancelled = client.cancel_rsvp(address, event_id).await?;

    println!("{}", cancelled.message.yellow());
    let remaining = format!(
        "{} now has {} {}",
        cancelled.event_id,
        cancelled.new_rsvp_count,
        pluralize("RSVP", cancelled.new_rsvp_count)
    );
    println!("{}", remaining.dimmed());

    Ok(())
}
