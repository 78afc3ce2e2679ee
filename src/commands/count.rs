use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::pluralize;

pub async fn run(client: &Client, event_id: &str) -> Result<()> {
    let count = client.rsvp_count(event_id).await?;

    println!(
        "{} {}",
        count.event_name.bold(),
        format!(
            "[{}] {} {}",
            count.event_id,
            count.rsvp_count,
            pluralize("RSVP", count.rsvp_count)
        )
        .dimmed()
    );

    Ok(())
}
