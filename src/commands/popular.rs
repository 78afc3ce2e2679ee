use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::render_ranked;

pub async fn run(client: &Client) -> Result<()> {
    let popularity = client.popular_events().await?;

    if popularity.top3_events.is_empty() {
        println!("{}", "No events found".dimmed());
        return Ok(());
    }

    println!("{}", "Popular Events".bold());
    for (i, event) in popularity.top3_events.iter().enumerate() {
        println!("  {}", render_ranked(i + 1, event));
    }

    Ok(())
}
