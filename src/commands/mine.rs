use anyhow::Result;
use owo_colors::OwoColorize;

use crate::client::Client;
use crate::render::{Render, pluralize};

pub async fn run(client: &Client, address: &str) -> Result<()> {
    let user = client.user_rsvps(address).await?;

    if user.rsvps.is_empty() {
        println!("{}", "No RSVPs yet. Browse events with: rsvp events".dimmed());
        return Ok(());
    }

    println!(
        "{}",
        format!("{} {}", user.count, pluralize("RSVP", user.count)).bold()
    );
    for rsvp in &user.rsvps {
        println!();
        println!("{}", rsvp.render());
    }

    Ok(())
}
