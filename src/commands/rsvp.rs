use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::pluralize;

pub async fn run(client: &Client, event_id: &str, address: &str) -> Result<()> {
    let created = client.rsvp(event_id, address).await?;

    println!("{}", created.message.green());
    let summary = format!(
        "{} now has {} {} (RSVP id {})",
        created.event_name,
        created.new_rsvp_count,
        pluralize("RSVP", created.new_rsvp_count),
        created.rsvp_id
    );
    println!("{}", summary.dimmed());
    println!("{}", format!("Cancel with: rsvp cancel {}", created.event_id).dimmed());

    Ok(())
}
