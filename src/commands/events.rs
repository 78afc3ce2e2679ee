use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::Render;

pub async fn run(client: &Client) -> Result<()> {
    let list = client.list_events().await?;

    println!("{}  {}", "Onchain Summit Events".bold(), list.stats.render());
    println!();

    if list.events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    for event in &list.events {
        println!("{}", event.render());
    }

    Ok(())
}
