use anyhow::Result;
use owo_colors::OwoColorize;
use rsvp_core::NewEvent;

use crate::client::Client;
use crate::render::Render;

pub async fn run(client: &Client, event: NewEvent) -> Result<()> {
    let created = client.create_event(&event).await?;

    println!("{}", "Created event".green());
    println!("{}", created.render());

    Ok(())
}
