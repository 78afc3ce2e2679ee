mod client;
mod commands;
mod render;

use anyhow::Result;
use clap::{Parser, Subcommand};
use rsvp_core::NewEvent;

use crate::client::{Client, DEFAULT_SERVER_URL};

#[derive(Parser)]
#[command(name = "rsvp")]
#[command(about = "Browse conference events and manage your RSVPs")]
struct Cli {
    /// Base URL of rsvp-server
    #[arg(long, global = true, env = "RSVP_SERVER_URL", default_value = DEFAULT_SERVER_URL)]
    server: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List all events with their RSVP counts
    Events,
    /// Show the three most popular events
    Popular,
    /// Show the RSVP count for one event
    Count {
        /// Event id (e.g. "art-show")
        event_id: String,
    },
    /// RSVP to an event
    Rsvp {
        /// Event id (e.g. "art-show")
        event_id: String,

        /// Your wallet address
        #[arg(short, long, env = "RSVP_ADDRESS")]
        address: String,
    },
    /// List your RSVPs
    Mine {
        /// Your wallet address
        #[arg(short, long, env = "RSVP_ADDRESS")]
        address: String,
    },
    /// Cancel an RSVP
    Cancel {
        /// Event id (e.g. "art-show")
        event_id: String,

        /// Your wallet address
        #[arg(short, long, env = "RSVP_ADDRESS")]
        address: String,
    },
    /// Add an event to the catalog
    Create {
        #[arg(long)]
        name: String,

        /// Schedule text (e.g. "Saturday 7:00-11:00 PM")
        #[arg(long)]
        date: String,

        #[arg(long)]
        description: String,

        #[arg(long)]
        link: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let client = Client::connect(&cli.server).await?;

    match cli.command {
        Commands::Events => commands::events::run(&client).await,
        Commands::Popular => commands::popular::run(&client).await,
        Commands::Count { event_id } => commands::count::run(&client, &event_id).await,
        Commands::Rsvp { event_id, address } => {
            commands::rsvp::run(&client, &event_id, &address).await
        }
        Commands::Mine { address } => commands::mine::run(&client, &address).await,
        Commands::Cancel { event_id, address } => {
            commands::cancel::run(&client, &event_id, &address).await
        }
        Commands::Create {
            name,
            date,
            description,
            link,
        } => {
            let event = NewEvent {
                name,
                date,
                description,
                link,
            };
            commands::create::run(&client, event).await
        }
    }
}
