//! TUI rendering for rsvp types.
//!
//! Extension traits that add colored terminal rendering to rsvp-core types
//! using owo_colors.

use chrono::Local;
use owo_colors::OwoColorize;
use rsvp_core::{CatalogStats, Event, Rsvp};

/// Extension trait for TUI rendering with colors.
pub trait Render {
    fn render(&self) -> String;
}

impl Render for Event {
    fn render(&self) -> String {
        let count = format!("{:>4}", self.rsvp_count);
        let id = format!("[{}]", self.id);
        format!(
            "{} {} {}\n       {}\n       {}\n       {}",
            count.cyan(),
            self.name.bold(),
            id.dimmed(),
            self.date.dimmed(),
            self.description.dimmed(),
            self.link.underline()
        )
    }
}

impl Render for Rsvp {
    fn render(&self) -> String {
        let taken = self.rsvp_date.with_timezone(&Local).format("%b %-d %H:%M");
        format!(
            "✅ {} {}\n   {}\n   {}\n   {}",
            self.event_name.bold(),
            format!("({})", self.event_date).dimmed(),
            self.event_description.dimmed(),
            self.event_link.underline(),
            format!("RSVP'd {}", taken).dimmed()
        )
    }
}

impl Render for CatalogStats {
    fn render(&self) -> String {
        format!(
            "{} {}  {} {}",
            self.total_events.bold(),
            pluralize("event", self.total_events),
            self.total_rsvps.bold(),
            pluralize("RSVP", self.total_rsvps)
        )
    }
}

/// Render one entry of the popularity ranking (rank is 1-based)
pub fn render_ranked(rank: usize, event: &Event) -> String {
    let crown = if rank == 1 { " 👑" } else { "" };
    format!(
        "{}{} {} {}",
        format!("#{}", rank).yellow(),
        crown,
        short_name(&event.name).bold(),
        format!("{} {}", event.rsvp_count, pluralize("RSVP", event.rsvp_count)).dimmed()
    )
}

/// First two words of an event name, for compact listings
pub fn short_name(name: &str) -> String {
    name.split_whitespace().take(2).collect::<Vec<_>>().join(" ")
}

/// Simple pluralization helper
pub fn pluralize(word: &str, count: usize) -> String {
    if count == 1 {
        word.to_string()
    } else {
        format!("{}s", word)
    }
}
